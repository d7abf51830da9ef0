//! 模型输出解析
//!
//! 模型经常在 JSON 外面包一层说明文字或 markdown 代码块，
//! 先整体解析，失败后再截取第一个 `[` 到最后一个 `]` 之间的内容重试

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ParseError;
use crate::models::Question;

/// 贪婪匹配，`.` 可跨行
static JSON_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("valid array pattern"));

/// 将模型原始输出解析为题目列表，并逐题校验结构
pub fn parse_questions(raw: &str) -> Result<Vec<Question>, ParseError> {
    let questions = match serde_json::from_str::<Vec<Question>>(raw.trim()) {
        Ok(questions) => questions,
        Err(direct_err) => match JSON_ARRAY.find(raw) {
            Some(m) => serde_json::from_str::<Vec<Question>>(m.as_str())
                .map_err(|source| ParseError::InvalidJson { source })?,
            None => return Err(ParseError::InvalidJson { source: direct_err }),
        },
    };

    if questions.is_empty() {
        return Err(ParseError::Empty);
    }

    for (index, question) in questions.iter().enumerate() {
        question
            .validate()
            .map_err(|reason| ParseError::InvalidQuestion { index, reason })?;
    }

    Ok(questions)
}
