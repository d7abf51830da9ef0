//! 远程模型客户端
//!
//! 两家服务商实现同一个 [`QuestionProvider`] 能力：
//! 输入章节文本和题目数量，返回模型的原始文本输出（不解析）

pub mod anthropic_client;
pub mod openai_client;

pub use anthropic_client::AnthropicClient;
pub use openai_client::OpenAiClient;

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

use crate::error::ProviderError;

/// 服务商类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Anthropic => "Anthropic",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 出题能力
///
/// 每次调用只发一次请求，不做重试
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// 是否已配置密钥
    fn is_configured(&self) -> bool;

    /// 调用远程模型，返回原始文本
    async fn generate(&self, chapter_text: &str, num_questions: usize)
        -> Result<String, ProviderError>;
}

/// 构建带超时的 HTTP 客户端
pub(crate) fn build_http_client(
    kind: ProviderKind,
    timeout: Duration,
) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| ProviderError::RequestFailed {
            provider: kind.name(),
            source,
        })
}

/// 拼接接口地址，容忍 base url 末尾的 `/`
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}
