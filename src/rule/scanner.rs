//! 子规则引用扫描
//!
//! 占位符语法固定为 `${NAME}`：`${` 后跟一个或多个非 `{`/`}` 字符，再以 `}` 结束。
//! 占位符不可嵌套；括号不平衡的片段不会被匹配，也不在此处报错。
//! 规则作者无法转义字面量 `${`，不作为引用的 `${...}` 文本必须避免出现。

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

static SUBRULE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{(?P<SUBRULE>[^{}]+)\}").unwrap());

/// 一次占位符出现
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// 整个 `${...}` 在原文中的字节范围
    pub span: Range<usize>,
    /// 花括号内的原始文本（未校验）
    pub name: &'a str,
}

/// 按出现顺序遍历全部占位符
pub fn placeholders(text: &str) -> impl Iterator<Item = Placeholder<'_>> {
    SUBRULE_REGEX.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let name = caps.name("SUBRULE")?;
        Some(Placeholder {
            span: whole.range(),
            name: name.as_str(),
        })
    })
}

/// 提取引用的子规则名，保留重复项，顺序与原文一致
pub fn scan(text: &str) -> Vec<&str> {
    placeholders(text).map(|p| p.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_in_order_with_duplicates() {
        let text = r"^\s*${NUMBER}(?:\s+${NUMBER})+${TAIL}$";
        assert_eq!(scan(text), vec!["NUMBER", "NUMBER", "TAIL"]);
    }

    #[test]
    fn test_scan_returns_unvalidated_names() {
        assert_eq!(scan(" ${1digit} "), vec!["1digit"]);
        assert_eq!(scan(" ${Iden)t}} "), vec!["Iden)t"]);
        assert_eq!(scan("${ spaced }"), vec![" spaced "]);
    }

    #[test]
    fn test_scan_ignores_malformed() {
        assert!(scan("${").is_empty());
        assert!(scan("${}").is_empty());
        assert!(scan("$NAME").is_empty());
        assert!(scan(r"\d{1,3}").is_empty());
        // 双括号写法：内层花括号不允许出现在名称中
        assert!(scan("${{ONE}}").is_empty());
    }

    #[test]
    fn test_placeholder_spans() {
        let text = "ab${X}cd${YY}";
        let found: Vec<_> = placeholders(text).collect();
        assert_eq!(found.len(), 2);
        assert_eq!(&text[found[0].span.clone()], "${X}");
        assert_eq!(found[1].name, "YY");
        assert_eq!(found[1].span, 8..13);
    }
}
