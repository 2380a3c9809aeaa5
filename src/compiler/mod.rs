//! 编译模块：依赖排序、子规则插值、正则编译
pub mod compiler;
pub mod interpolate;
pub mod pattern;
pub mod toposort;

pub use self::compiler::{quote_literals, PatternCompiler};
pub use self::interpolate::interpolate;
pub use self::pattern::CompiledPattern;
pub use self::toposort::DependencyGraph;
