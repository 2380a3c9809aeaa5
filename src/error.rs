//! 全局错误类型定义
//! 所有错误都携带所属语法（grammar）名称，涉及具体规则时同时携带规则名，便于多规则场景排查

use thiserror::Error;
use regex::Error as RegexError;

#[derive(Error, Debug)]
pub enum GrammarError {
    // ===================== 规则注册错误 =====================
    /// 规则名不是合法标识符
    #[error("grammar {grammar:?}: rule name {rule:?} not allowed")]
    InvalidName { grammar: String, rule: String },

    /// 规则中引用的子规则名不是合法标识符
    #[error("grammar {grammar:?}: rule {rule:?} references malformed subrule name {subrule:?}")]
    InvalidSubruleName {
        grammar: String,
        rule: String,
        subrule: String,
    },

    /// 同名规则重复添加
    #[error("grammar {grammar:?}: rule {rule:?} already exists")]
    DuplicateName { grammar: String, rule: String },

    /// 规则直接引用自身
    #[error("grammar {grammar:?}: rule {rule:?} is self referencing")]
    SelfReference { grammar: String, rule: String },

    /// 语法已完成编译，拒绝再次修改/编译
    #[error("grammar {grammar:?} is already finalized")]
    AlreadyFinalized { grammar: String },

    // ===================== 编译阶段错误 =====================
    /// 引用了不存在的子规则（在任何编译发生前检出）
    #[error("grammar {grammar:?}: rule {rule:?} depends on missing subrule {subrule:?}")]
    MissingRule {
        grammar: String,
        rule: String,
        subrule: String,
    },

    /// 依赖图存在环；`remaining` 为排序无法消解的全部规则（可能多于环本身）
    #[error("grammar {grammar:?}: cyclic dependency in unresolved rules {remaining:?}")]
    CyclicDependency {
        grammar: String,
        remaining: Vec<String>,
    },

    /// 正则引擎拒绝了展开后的模式
    #[error("grammar {grammar:?}: regex compilation of rule {rule:?} failed: {source}")]
    PatternSyntaxError {
        grammar: String,
        rule: String,
        #[source]
        source: RegexError,
    },

    // ===================== 查询错误 =====================
    /// 查询从未添加过的规则
    #[error("grammar {grammar:?}: rule {rule:?} is not added")]
    UnknownRule { grammar: String, rule: String },

    /// 语法尚未成功编译
    #[error("grammar {grammar:?} is not finalized")]
    NotFinalized { grammar: String },

    // ===================== 基础错误 =====================
    /// 配置解析失败
    #[error("invalid grammar config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// 内部不变量被破坏（属于严重逻辑错误）
    #[error("grammar {grammar:?}: invariant violation: {detail}")]
    InvariantViolation { grammar: String, detail: String },
}

impl GrammarError {
    /// 错误所属的语法名称（配置错误不属于任何语法）
    pub fn grammar(&self) -> Option<&str> {
        match self {
            GrammarError::InvalidName { grammar, .. }
            | GrammarError::InvalidSubruleName { grammar, .. }
            | GrammarError::DuplicateName { grammar, .. }
            | GrammarError::SelfReference { grammar, .. }
            | GrammarError::AlreadyFinalized { grammar }
            | GrammarError::MissingRule { grammar, .. }
            | GrammarError::CyclicDependency { grammar, .. }
            | GrammarError::PatternSyntaxError { grammar, .. }
            | GrammarError::UnknownRule { grammar, .. }
            | GrammarError::NotFinalized { grammar }
            | GrammarError::InvariantViolation { grammar, .. } => Some(grammar.as_str()),
            GrammarError::InvalidConfig(_) => None,
        }
    }

    /// 出错的规则名（若错误与单条规则相关）
    pub fn rule(&self) -> Option<&str> {
        match self {
            GrammarError::InvalidName { rule, .. }
            | GrammarError::InvalidSubruleName { rule, .. }
            | GrammarError::DuplicateName { rule, .. }
            | GrammarError::SelfReference { rule, .. }
            | GrammarError::MissingRule { rule, .. }
            | GrammarError::PatternSyntaxError { rule, .. }
            | GrammarError::UnknownRule { rule, .. } => Some(rule.as_str()),
            _ => None,
        }
    }
}

// 全局Result类型
pub type GrammarResult<T> = Result<T, GrammarError>;
