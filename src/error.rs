use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 请求参数错误（用户输入问题）
    #[error(transparent)]
    Request(#[from] RequestError),
    /// 章节相关错误
    #[error(transparent)]
    Chapter(#[from] ChapterError),
    /// 远程模型服务错误
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// 模型输出解析错误
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 网络监听等 I/O 错误
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// 请求参数错误
///
/// 提示信息会原样返回给调用方
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("chapter_id is required")]
    MissingChapterId,
    #[error("num_questions must be a positive integer")]
    InvalidQuestionCount { value: String },
    #[error("num_questions must not exceed {max}")]
    TooManyQuestions { requested: usize, max: usize },
}

/// 章节错误
#[derive(Debug, Error)]
pub enum ChapterError {
    /// 章节 ID 含非法字符（对外同样表现为未找到）
    #[error("Invalid chapter id: {id}")]
    InvalidId { id: String },
    /// 章节文件不存在
    #[error("Chapter not found: {id}")]
    NotFound { id: String },
    /// 读取失败（含非 UTF-8 内容）
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ChapterError {
    /// 对外是否应表现为 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChapterError::InvalidId { .. } | ChapterError::NotFound { .. })
    }
}

/// 远程模型服务错误
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 未配置密钥
    #[error("{provider} key not set")]
    MissingCredential { provider: &'static str },
    /// 网络请求失败（含超时）
    #[error("{provider} request failed: {source}")]
    RequestFailed {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// 非 2xx 响应，携带原始响应体
    #[error("{provider} error ({status}): {body}")]
    BadStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },
    /// 响应结构中找不到文本字段
    #[error("{provider} returned an unexpected response: {reason}")]
    MalformedEnvelope {
        provider: &'static str,
        reason: String,
    },
}

/// 模型输出解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON question array found in model output: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("question {index} is malformed: {reason}")]
    InvalidQuestion { index: usize, reason: String },
    #[error("model returned an empty question list")]
    Empty,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("environment variable {var_name} has invalid value '{value}', expected {expected_type}")]
    InvalidValue {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建配置值非法错误
    pub fn invalid_config(
        var_name: impl Into<String>,
        value: impl Into<String>,
        expected_type: impl Into<String>,
    ) -> Self {
        AppError::Config(ConfigError::InvalidValue {
            var_name: var_name.into(),
            value: value.into(),
            expected_type: expected_type.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_messages_are_client_facing() {
        assert_eq!(
            AppError::from(RequestError::MissingChapterId).to_string(),
            "chapter_id is required"
        );
        let err = RequestError::TooManyQuestions { requested: 80, max: 50 };
        assert_eq!(err.to_string(), "num_questions must not exceed 50");
    }

    #[test]
    fn test_bad_status_keeps_raw_body() {
        let err = ProviderError::BadStatus {
            provider: "OpenAI",
            status: 500,
            body: r#"{"error":"boom"}"#.to_string(),
        };
        assert!(err.to_string().contains(r#"{"error":"boom"}"#));
    }

    #[test]
    fn test_invalid_id_counts_as_not_found() {
        assert!(ChapterError::InvalidId { id: "../x".into() }.is_not_found());
        assert!(ChapterError::NotFound { id: "x".into() }.is_not_found());
    }
}
