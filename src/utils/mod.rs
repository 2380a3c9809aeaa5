//! 工具模块：文本规整与日志预览
pub mod normalize;
pub mod preview;

pub use self::normalize::normalize;
pub use self::preview::{preview_compact, preview_names, PATTERN_PREVIEW_LEN};
