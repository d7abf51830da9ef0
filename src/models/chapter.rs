//! 章节数据结构
//!
//! 章节 ID 即文件名去掉 `.txt` 后的部分，只允许安全字符集

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// 章节文件扩展名（匹配时忽略大小写）
pub const CHAPTER_EXTENSION: &str = "txt";

/// 安全 ID：字母、数字、`.`、`_`、`-`
static SAFE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid safe-id pattern"));

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_-]+").expect("valid separator pattern"));

/// 章节列表项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterSummary {
    pub id: String,
    pub title: String,
}

impl ChapterSummary {
    pub fn from_id(id: impl Into<String>) -> Self {
        let id = id.into();
        let title = chapter_title_from_id(&id);
        Self { id, title }
    }
}

/// 判断章节 ID 是否只包含安全字符
///
/// 这是防止路径穿越的唯一校验，`.` 与 `..` 单独出现时同样拒绝
pub fn is_safe_chapter_id(id: &str) -> bool {
    SAFE_ID.is_match(id) && id != "." && id != ".."
}

/// 由章节 ID 生成展示标题
///
/// `_`/`-` 连续出现时替换为一个空格，再按单词首字母大写
pub fn chapter_title_from_id(id: &str) -> String {
    let spaced = SEPARATORS.replace_all(id, " ");
    title_case(spaced.trim())
}

/// 非字母字符之后的第一个字母大写，其余字母小写
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_ids() {
        assert!(is_safe_chapter_id("intro"));
        assert!(is_safe_chapter_id("chapter-01_part.2"));
        assert!(is_safe_chapter_id("..hidden"));
    }

    #[test]
    fn test_unsafe_ids() {
        for id in ["", ".", "..", "../etc/passwd", "a/b", "a\\b", "has space", "ch%2F1", "章节"] {
            assert!(!is_safe_chapter_id(id), "expected {id:?} to be rejected");
        }
    }

    #[test]
    fn test_title_from_id() {
        assert_eq!(chapter_title_from_id("intro"), "Intro");
        assert_eq!(chapter_title_from_id("chapter_01-cell__biology"), "Chapter 01 Cell Biology");
        assert_eq!(chapter_title_from_id("_leading-and-trailing_"), "Leading And Trailing");
        assert_eq!(chapter_title_from_id("part.two"), "Part.Two");
        assert_eq!(chapter_title_from_id("3rd_LAW"), "3Rd Law");
    }

    #[test]
    fn test_summary_serializes_id_and_title() {
        let json = serde_json::to_value(ChapterSummary::from_id("cell_biology")).unwrap();
        assert_eq!(json, serde_json::json!({"id": "cell_biology", "title": "Cell Biology"}));
    }
}
