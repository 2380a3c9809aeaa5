//! 语法编译配置，控制展开后的模式交给正则引擎时的编译参数

use serde::{Deserialize, Serialize};

use crate::error::GrammarResult;

/// 语法编译配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    // 单个正则编译后的大小上限（字节）
    pub size_limit: usize,
    // 惰性DFA缓存上限（字节）
    pub dfa_size_limit: usize,
    // 正则解析嵌套深度上限
    pub nest_limit: u32,
    // 是否忽略大小写
    pub case_insensitive: bool,
    // ^/$ 是否按行匹配
    pub multi_line: bool,
    // 编译前是否把 \Q...\E 字面量片段转义（regex引擎本身不支持该语法）
    pub quote_literals: bool,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            size_limit: 10 * (1 << 20),
            dfa_size_limit: 2 * (1 << 20),
            nest_limit: 250,
            case_insensitive: false,
            multi_line: false,
            quote_literals: true,
        }
    }
}

impl GrammarConfig {
    /// 从JSON加载配置，缺失字段取默认值
    pub fn from_json(json: &str) -> GrammarResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 序列化为JSON
    pub fn to_json(&self) -> GrammarResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GrammarConfig {
        GrammarConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> GrammarConfigBuilder {
        GrammarConfigBuilder::new()
    }
}

/// 配置构建器
#[derive(Debug, Clone, Default)]
pub struct GrammarConfigBuilder {
    config: GrammarConfig,
}

impl GrammarConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GrammarConfig::default(),
        }
    }

    pub fn size_limit(mut self, limit: usize) -> Self {
        self.config.size_limit = limit;
        self
    }

    pub fn dfa_size_limit(mut self, limit: usize) -> Self {
        self.config.dfa_size_limit = limit;
        self
    }

    pub fn nest_limit(mut self, limit: u32) -> Self {
        self.config.nest_limit = limit;
        self
    }

    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.config.case_insensitive = yes;
        self
    }

    pub fn multi_line(mut self, yes: bool) -> Self {
        self.config.multi_line = yes;
        self
    }

    pub fn quote_literals(mut self, yes: bool) -> Self {
        self.config.quote_literals = yes;
        self
    }

    pub fn build(self) -> GrammarConfig {
        self.config
    }
}
