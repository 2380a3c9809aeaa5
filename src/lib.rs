//! rxgrammar - 用带注释、可排版的正则片段组合出最终正则
//!
//! 规则可以通过 `${SUBRULE}` 占位符引用同一语法内的其他规则，
//! 编译时按依赖顺序逐一展开并交给 regex 引擎：
//!
//! ```
//! use rxgrammar::Grammar;
//!
//! let mut g = Grammar::new("numbers");
//! g.add("NUMBER", r"
//!     [+-]?                  // optional sign
//!     (?: \d+\.\d+ | \d+\. | \.\d+ | \d+ )
//!     (?: [eE] [+-]? \d+ )?  // optional exponent
//! ").unwrap();
//! g.add("MANY", r"^ \s* ${NUMBER} (?: \s+ ${NUMBER} )+ $").unwrap();
//! g.finalize().unwrap();
//!
//! assert!(g.rx("MANY").unwrap().is_match("1.23 3.1415 0.5e3"));
//! ```

// 导出全局错误类型
pub use self::error::{GrammarError, GrammarResult};

// 导出配置模块
pub use self::config::{ConfigManager, GrammarConfig, GrammarConfigBuilder};

// 导出语法核心接口
pub use self::grammar::{Grammar, GrammarState};

// 导出规则模块核心接口
pub use self::rule::{is_valid_name, scan, Rule, RuleName, RuleSummary};

// 导出编译模块核心接口
pub use self::compiler::{CompiledPattern, PatternCompiler};

// 导出工具函数
pub use self::utils::normalize;

// 声明所有子模块
pub mod compiler;
pub mod config;
pub mod error;
pub mod grammar;
pub mod rule;
pub mod utils;
