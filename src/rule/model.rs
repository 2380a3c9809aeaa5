//! 规则数据模型

use serde::Serialize;

use super::name::RuleName;
use crate::compiler::CompiledPattern;

/// 单条规则：原始（或规整后的）模式文本 + 依赖的子规则 + 编译结果
#[derive(Debug, Clone)]
pub struct Rule {
    pub(crate) name: RuleName,
    // 输入模式：规整后或原样保存
    pub(crate) pattern: String,
    // 依赖的 ${SUBRULE}，按首次出现顺序去重
    pub(crate) subrules: Vec<RuleName>,
    // 编译成功后才填充
    pub(crate) compiled: Option<CompiledPattern>,
}

impl Rule {
    pub(crate) fn new(name: RuleName, pattern: String, subrules: Vec<RuleName>) -> Self {
        Self {
            name,
            pattern,
            subrules,
            compiled: None,
        }
    }

    pub fn name(&self) -> &RuleName {
        &self.name
    }

    /// 添加时保存的模式文本
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn subrules(&self) -> &[RuleName] {
        &self.subrules
    }

    /// 展开后的模式文本，仅在语法成功编译后可用
    pub fn expanded(&self) -> Option<&str> {
        self.compiled.as_ref().map(CompiledPattern::as_str)
    }

    pub fn compiled(&self) -> Option<&CompiledPattern> {
        self.compiled.as_ref()
    }

    pub(crate) fn summary(&self) -> RuleSummary {
        RuleSummary {
            name: self.name.to_string(),
            pattern: self.pattern.clone(),
            subrules: self.subrules.iter().map(RuleName::to_string).collect(),
            expanded: self.expanded().map(str::to_string),
        }
    }
}

/// 规则概要，便于调试输出/序列化
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub name: String,
    pub pattern: String,
    pub subrules: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<String>,
}
