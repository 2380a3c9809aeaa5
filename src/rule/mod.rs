//! 规则模块：规则名、子规则扫描、规则数据模型
pub mod model;
pub mod name;
pub mod scanner;

// 导出核心接口
pub use self::model::{Rule, RuleSummary};
pub use self::name::{is_valid_name, RuleName};
pub use self::scanner::{placeholders, scan, Placeholder};
