//! 模式编译器：把展开后的文本交给regex引擎

use std::borrow::Cow;

use regex::{Error as RegexError, Regex, RegexBuilder};

use crate::config::GrammarConfig;

/// 模式编译器，持有引擎参数
#[derive(Debug, Clone, Default)]
pub struct PatternCompiler {
    config: GrammarConfig,
}

impl PatternCompiler {
    pub fn new(config: GrammarConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// 编译单个展开后的模式
    pub fn compile(&self, expanded: &str) -> Result<Regex, RegexError> {
        let source = if self.config.quote_literals {
            quote_literals(expanded)
        } else {
            Cow::Borrowed(expanded)
        };

        RegexBuilder::new(&source)
            .size_limit(self.config.size_limit)
            .dfa_size_limit(self.config.dfa_size_limit)
            .nest_limit(self.config.nest_limit)
            .case_insensitive(self.config.case_insensitive)
            .multi_line(self.config.multi_line)
            .build()
    }
}

/// 把 `\Q...\E` 字面量片段改写为转义文本
///
/// 缺少 `\E` 时字面量延续到结尾；`\\Q` 是转义的反斜杠加字母Q，不开启字面量。
pub fn quote_literals(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains(r"\Q") {
        return Cow::Borrowed(pattern);
    }

    let mut out = String::with_capacity(pattern.len() + 16);
    let mut rest = pattern;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];

        match tail.chars().next() {
            Some('Q') => {
                let body = &tail[1..];
                let (literal, after) = match body.find(r"\E") {
                    Some(end) => (&body[..end], &body[end + 2..]),
                    None => (body, ""),
                };
                out.push_str(&regex::escape(literal));
                rest = after;
            }
            Some(c) => {
                // 普通转义原样保留（包括 \\）
                out.push('\\');
                out.push(c);
                rest = &tail[c.len_utf8()..];
            }
            None => {
                out.push('\\');
                rest = "";
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;

    #[test]
    fn test_quote_literals_exact() {
        assert_eq!(quote_literals(r"^\QExactly like this!\E$"), "^Exactly like this!$");
        assert_eq!(quote_literals(r"\Qa.b*c\E"), r"a\.b\*c");
    }

    #[test]
    fn test_quote_literals_untouched() {
        assert!(matches!(quote_literals(r"^\d+$"), Cow::Borrowed(_)));
        // 转义的反斜杠后面的Q不是字面量起点
        assert_eq!(quote_literals(r"\\Q.\Qx\E"), r"\\Q.x");
    }

    #[test]
    fn test_quote_literals_unterminated() {
        assert_eq!(quote_literals(r"a\Q(b"), r"a\(b");
    }

    #[test]
    fn test_compile_literal_pattern() {
        let compiler = PatternCompiler::default();
        let rx = compiler.compile(r"^\QExactly like this!\E$").unwrap();
        assert!(rx.is_match("Exactly like this!"));
        assert!(!rx.is_match("Exactly like this!!"));
        assert!(!rx.is_match("exactly like this!"));
    }

    #[test]
    fn test_compile_without_quoting() {
        let compiler = PatternCompiler::new(ConfigManager::custom().quote_literals(false).build());
        assert!(compiler.compile(r"^\QExactly\E$").is_err());
    }

    #[test]
    fn test_compile_case_insensitive() {
        let compiler = PatternCompiler::new(ConfigManager::custom().case_insensitive(true).build());
        let rx = compiler.compile("^abc$").unwrap();
        assert!(rx.is_match("ABC"));
    }

    #[test]
    fn test_compile_syntax_error() {
        let compiler = PatternCompiler::default();
        assert!(compiler.compile("^(").is_err());
    }
}
