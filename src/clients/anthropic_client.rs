/// Anthropic Messages 客户端
///
/// 请求 `POST {base}/messages`，返回第一个 content block 的 text
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::clients::{build_http_client, endpoint, ProviderKind, QuestionProvider};
use crate::config::Config;
use crate::error::ProviderError;
use crate::services::build_prompt;

const KIND: ProviderKind = ProviderKind::Anthropic;

/// Anthropic 客户端
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: Option<String>,
    api_base_url: String,
    model_name: String,
    api_version: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicClient {
    /// 根据配置创建客户端（未配置密钥也能创建，调用时才报错）
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        Ok(Self {
            http: build_http_client(KIND, Duration::from_secs(config.request_timeout_secs))?,
            api_key: config.anthropic_api_key.clone(),
            api_base_url: config.anthropic_api_base_url.clone(),
            model_name: config.anthropic_model_name.clone(),
            api_version: config.anthropic_version.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn extract_text(body: &str) -> Result<String, ProviderError> {
        let malformed = |reason: String| ProviderError::MalformedEnvelope {
            provider: KIND.name(),
            reason,
        };

        let response: MessagesResponse =
            serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;

        response
            .content
            .into_iter()
            .next()
            .ok_or_else(|| malformed("no content blocks".to_string()))?
            .text
            .ok_or_else(|| malformed("first content block has no text".to_string()))
    }
}

#[async_trait]
impl QuestionProvider for AnthropicClient {
    fn kind(&self) -> ProviderKind {
        KIND
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(
        &self,
        chapter_text: &str,
        num_questions: usize,
    ) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential {
                provider: KIND.name(),
            })?;

        let prompt = build_prompt(KIND, chapter_text, num_questions);
        let request = MessagesRequest {
            model: &self.model_name,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: &prompt,
            }],
        };

        debug!(
            "调用 Anthropic，模型: {}，提示词长度: {} 字符",
            self.model_name,
            prompt.len()
        );

        let response = self
            .http
            .post(endpoint(&self.api_base_url, "messages"))
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .json(&request)
            .send()
            .await
            .map_err(|source| ProviderError::RequestFailed {
                provider: KIND.name(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ProviderError::RequestFailed {
                provider: KIND.name(),
                source,
            })?;

        if !status.is_success() {
            warn!("Anthropic 返回错误状态: {}", status);
            return Err(ProviderError::BadStatus {
                provider: KIND.name(),
                status: status.as_u16(),
                body,
            });
        }

        debug!("Anthropic 调用成功");
        Self::extract_text(&body)
    }
}
