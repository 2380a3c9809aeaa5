//! 子规则插值：把 `${NAME}` 替换为 NAME 已展开的文本
//!
//! 只做一遍替换，插入的文本不再被扫描，即使其中恰好含有 `${...}` 形式的片段。
//! 替换按完整占位符进行，`${NUM}` 不会受到 `${NUMBER}` 的影响。

use crate::rule::placeholders;

/// 执行插值
///
/// `resolve` 根据子规则名返回其展开文本；返回 `None` 时以 `Err(name)` 报告该名称。
pub fn interpolate<'r, F>(pattern: &str, resolve: F) -> Result<String, String>
where
    F: Fn(&str) -> Option<&'r str>,
{
    let mut out = String::with_capacity(pattern.len());
    let mut last = 0;

    for placeholder in placeholders(pattern) {
        let replacement = resolve(placeholder.name).ok_or_else(|| placeholder.name.to_string())?;
        out.push_str(&pattern[last..placeholder.span.start]);
        out.push_str(replacement);
        last = placeholder.span.end;
    }
    out.push_str(&pattern[last..]);

    Ok(out)
}
