//! 编译后模式模型

use std::fmt;
use std::sync::Arc;

use regex::{Captures, Match, Regex};

/// 编译后的规则模式
///
/// 克隆代价很低（正则与展开文本均为共享引用），可跨线程只读使用。
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    // 子规则全部展开后的文本
    expanded: Arc<str>,
}

impl CompiledPattern {
    pub(crate) fn new(regex: Regex, expanded: impl Into<Arc<str>>) -> Self {
        Self {
            regex,
            expanded: expanded.into(),
        }
    }

    /// 展开后的模式文本（与交给引擎前的字面量改写无关）
    pub fn as_str(&self) -> &str {
        &self.expanded
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    pub fn find<'h>(&self, haystack: &'h str) -> Option<Match<'h>> {
        self.regex.find(haystack)
    }

    pub fn captures<'h>(&self, haystack: &'h str) -> Option<Captures<'h>> {
        self.regex.captures(haystack)
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expanded)
    }
}

impl AsRef<Regex> for CompiledPattern {
    fn as_ref(&self) -> &Regex {
        &self.regex
    }
}
