//! 文本规整：去掉 `//` 行注释并删除全部空白
//!
//! 规整后的模式不再含任何空白，适用于空白本身无意义的正则写法；
//! 需要字面空白的规则应使用引擎的转义（如 `\x20`、`\s`）或以 verbatim 方式添加。

use once_cell::sync::Lazy;
use regex::Regex;

// 行注释：从 `//` 到行尾，不感知引号、字符类与转义
static COMMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)//.*$").unwrap());
// 任意空白（含换行）
static SPACES_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// 去掉所有注释与空白
///
/// 删除空白后可能拼出新的 `//`（如 `a/ /b`），此时它同样视为注释起点，
/// 截断到末尾，保证 `normalize(normalize(x)) == normalize(x)`。
pub fn normalize(text: &str) -> String {
    let without_comments = COMMENT_REGEX.replace_all(text, "");
    let mut compact = SPACES_REGEX.replace_all(&without_comments, "").into_owned();

    if let Some(pos) = compact.find("//") {
        compact.truncate(pos);
    }

    compact
}
