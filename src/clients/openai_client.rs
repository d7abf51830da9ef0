/// OpenAI Chat Completions 客户端
///
/// 请求 `POST {base}/chat/completions`，返回第一个 choice 的 message.content
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::clients::{build_http_client, endpoint, ProviderKind, QuestionProvider};
use crate::config::Config;
use crate::error::ProviderError;
use crate::services::build_prompt;

const KIND: ProviderKind = ProviderKind::OpenAi;

/// OpenAI 客户端
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    api_base_url: String,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// 根据配置创建客户端（未配置密钥也能创建，调用时才报错）
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        Ok(Self {
            http: build_http_client(KIND, Duration::from_secs(config.request_timeout_secs))?,
            api_key: config.openai_api_key.clone(),
            api_base_url: config.openai_api_base_url.clone(),
            model_name: config.openai_model_name.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// 从响应体中取出文本
    fn extract_text(body: &str) -> Result<String, ProviderError> {
        let malformed = |reason: String| ProviderError::MalformedEnvelope {
            provider: KIND.name(),
            reason,
        };

        let response: ChatResponse =
            serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| malformed("no choices".to_string()))?
            .message
            .content
            .ok_or_else(|| malformed("first choice has no content".to_string()))
    }
}

#[async_trait]
impl QuestionProvider for OpenAiClient {
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
        let request = ChatRequest {
            model: &self.model_name,
            messages: [ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            "调用 OpenAI，模型: {}，提示词长度: {} 字符",
            self.model_name,
            prompt.len()
        );

        let response = self
            .http
            .post(endpoint(&self.api_base_url, "chat/completions"))
            .bearer_auth(api_key)
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
            warn!("OpenAI 返回错误状态: {}", status);
            return Err(ProviderError::BadStatus {
                provider: KIND.name(),
                status: status.as_u16(),
                body,
            });
        }

        debug!("OpenAI 调用成功");
        Self::extract_text(&body)
    }
}
