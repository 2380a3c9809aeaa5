//! 日志预览工具：长模式文本与规则名列表的紧凑输出

use std::fmt::{self, Write};

/// 单条模式预览默认最大字符数
pub const PATTERN_PREVIEW_LEN: usize = 80;

// ======================== 核心：零堆分配字符串预览 ========================
/// 空白字符折叠 + 截断，零堆分配的日志预览
/// 逻辑：
/// 1. 连续空白折叠为单个空格（仅影响输出，不修改原字符串）
/// 2. 超过最大长度时输出省略号并终止遍历
#[inline(always)]
pub fn preview_compact<'a>(s: &'a str, max_len: usize) -> impl fmt::Display + 'a {
    struct CompactView<'a> {
        source: &'a str,
        max_length: usize,
    }

    impl fmt::Display for CompactView<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut char_count = 0;
            let mut last_was_whitespace = false;

            for ch in self.source.chars() {
                if ch.is_whitespace() && last_was_whitespace {
                    continue;
                }
                if char_count >= self.max_length {
                    f.write_char('…')?;
                    break;
                }

                if ch.is_whitespace() {
                    f.write_char(' ')?;
                    last_was_whitespace = true;
                } else {
                    f.write_char(ch)?;
                    last_was_whitespace = false;
                }
                char_count += 1;
            }
            Ok(())
        }
    }

    CompactView {
        source: s,
        max_length: max_len,
    }
}

// ======================== 衍生：规则名列表预览 ========================
/// 规则名列表格式化
/// 格式：[A, B, ...] (total: N)
pub fn preview_names<S: AsRef<str>>(names: &[S]) -> String {
    const MAX_COUNT: usize = 10;
    const MAX_NAME_LEN: usize = 30;

    if names.is_empty() {
        return "[empty]".to_string();
    }

    let mut result = String::with_capacity(MAX_COUNT * (MAX_NAME_LEN + 2) + 20);
    result.push('[');
    for (idx, name) in names.iter().take(MAX_COUNT).enumerate() {
        if idx > 0 {
            result.push_str(", ");
        }
        // 写入String不会失败
        let _ = write!(result, "{}", preview_compact(name.as_ref(), MAX_NAME_LEN));
    }
    if names.len() > MAX_COUNT {
        let _ = write!(result, ", … (total: {})", names.len());
    }
    result.push(']');

    result
}
