//! 出题请求与响应

use serde::Serialize;
use serde_json::Value;

use crate::error::RequestError;
use crate::models::question::Question;

/// 题目来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSource {
    /// 远程模型生成
    Remote,
    /// 离线兜底生成
    Fallback,
}

/// 出题请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub chapter_id: String,
    pub num_questions: usize,
}

impl GenerationRequest {
    /// 从请求体 JSON 中解析出题请求
    ///
    /// - `chapter_id` 缺失、为空白或不是字符串时报错
    /// - `num_questions` 为空值（缺失、null、false、0、""）时使用 `default_count`
    /// - 只有设置了 `max_count` 才检查上限
    pub fn from_payload(
        payload: &Value,
        default_count: usize,
        max_count: Option<usize>,
    ) -> Result<Self, RequestError> {
        let chapter_id = payload
            .get("chapter_id")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(RequestError::MissingChapterId)?
            .to_string();

        let num_questions =
            resolve_question_count(payload.get("num_questions"), default_count)?;
        if let Some(max) = max_count.filter(|max| num_questions > *max) {
            return Err(RequestError::TooManyQuestions {
                requested: num_questions,
                max,
            });
        }

        Ok(Self {
            chapter_id,
            num_questions,
        })
    }
}

/// 解析题目数量
///
/// - 空值（缺失、null、false、0、0.0、""）回落到默认值
/// - `true` 按 1 处理
/// - 其余数值向零截断，截断后为 0 时出 0 道题（如 `0.5`、`"0"`）
/// - 负数和非数字报错
pub fn resolve_question_count(
    value: Option<&Value>,
    default_count: usize,
) -> Result<usize, RequestError> {
    let invalid = |v: &Value| RequestError::InvalidQuestionCount {
        value: v.to_string(),
    };

    let Some(value) = value else {
        return Ok(default_count);
    };

    let count: i64 = match value {
        Value::Null | Value::Bool(false) => return Ok(default_count),
        Value::Bool(true) => 1,
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(0), _) => return Ok(default_count),
            (Some(i), _) => i,
            (None, Some(f)) if f == 0.0 => return Ok(default_count),
            (None, Some(f)) if f.is_finite() && f.abs() < i64::MAX as f64 => f.trunc() as i64,
            _ => return Err(invalid(value)),
        },
        Value::String(s) if s.is_empty() => return Ok(default_count),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid(value))?,
        _ => return Err(invalid(value)),
    };

    if count < 0 {
        return Err(invalid(value));
    }
    usize::try_from(count).map_err(|_| invalid(value))
}

/// 出题接口响应体
///
/// 成功时包含 `chapter_id`、`questions`、`source`；失败时只有 `error`
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<QuestionSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn success(chapter_id: String, questions: Vec<Question>, source: QuestionSource) -> Self {
        Self {
            success: true,
            chapter_id: Some(chapter_id),
            questions: Some(questions),
            source: Some(source),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            chapter_id: None,
            questions: None,
            source: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn count(value: Value) -> Result<usize, RequestError> {
        resolve_question_count(Some(&value), 5)
    }

    #[test]
    fn test_missing_count_uses_default() {
        assert_eq!(resolve_question_count(None, 5).unwrap(), 5);
    }

    #[test]
    fn test_falsy_count_uses_default() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert_eq!(count(value.clone()).unwrap(), 5, "value: {value}");
        }
    }

    #[test]
    fn test_positive_counts() {
        assert_eq!(count(json!(3)).unwrap(), 3);
        assert_eq!(count(json!("7")).unwrap(), 7);
        assert_eq!(count(json!(2.9)).unwrap(), 2);
    }

    #[test]
    fn test_negative_and_garbage_counts_are_rejected() {
        for value in [json!(-1), json!("-4"), json!("abc"), json!([1]), json!({"n": 1})] {
            assert!(
                matches!(count(value.clone()), Err(RequestError::InvalidQuestionCount { .. })),
                "value: {value}"
            );
        }
    }

    #[test]
    fn test_true_counts_as_one() {
        assert_eq!(count(json!(true)).unwrap(), 1);
    }

    #[test]
    fn test_truthy_values_truncating_to_zero() {
        // 非空值截断后为 0 时不回落默认值
        assert_eq!(count(json!(0.5)).unwrap(), 0);
        assert_eq!(count(json!("0")).unwrap(), 0);
    }

    #[test]
    fn test_from_payload_requires_chapter_id() {
        for payload in [json!({}), json!({"chapter_id": "   "}), json!({"chapter_id": 12}), json!(null)] {
            assert!(matches!(
                GenerationRequest::from_payload(&payload, 5, None),
                Err(RequestError::MissingChapterId)
            ));
        }
    }

    #[test]
    fn test_from_payload_trims_id_and_applies_limit() {
        let request =
            GenerationRequest::from_payload(&json!({"chapter_id": " intro ", "num_questions": 2}), 5, Some(50))
                .unwrap();
        assert_eq!(request.chapter_id, "intro");
        assert_eq!(request.num_questions, 2);

        let err = GenerationRequest::from_payload(&json!({"chapter_id": "intro", "num_questions": 51}), 5, Some(50))
            .unwrap_err();
        assert!(matches!(err, RequestError::TooManyQuestions { requested: 51, max: 50 }));
    }

    #[test]
    fn test_from_payload_without_limit_accepts_large_counts() {
        let request =
            GenerationRequest::from_payload(&json!({"chapter_id": "intro", "num_questions": 500}), 5, None)
                .unwrap();
        assert_eq!(request.num_questions, 500);
    }

    #[test]
    fn test_failure_body_shape() {
        let json = serde_json::to_value(GenerationResult::failure("Chapter not found")).unwrap();
        assert_eq!(json, json!({"success": false, "error": "Chapter not found"}));
    }

    #[test]
    fn test_success_body_shape() {
        let json = serde_json::to_value(GenerationResult::success(
            "intro".to_string(),
            Vec::new(),
            QuestionSource::Fallback,
        ))
        .unwrap();
        assert_eq!(
            json,
            json!({"success": true, "chapter_id": "intro", "questions": [], "source": "fallback"})
        );
    }
}
