//! 出题流程 - 流程层
//!
//! 流程顺序：
//! 1. 按优先级选出第一个已配置密钥的服务商（OpenAI → Anthropic）
//! 2. 调用一次 → 解析 → 校验
//! 3. 任一环节失败，或没有可用服务商：离线兜底
//!
//! 远程失败只记日志，不会返回给调用方

use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::{AnthropicClient, OpenAiClient, ProviderKind, QuestionProvider};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{Question, QuestionSource};
use crate::services::{parse_questions, sample_questions_from_text};
use crate::utils::logging::truncate_text;

/// 一次出题的结果
#[derive(Debug, Clone)]
pub struct Generation {
    pub questions: Vec<Question>,
    pub source: QuestionSource,
}

/// 出题流程
///
/// - 持有按优先级排列的服务商列表
/// - 每次请求最多发起一次远程调用
/// - 不持有任何可变状态，可在多个请求间共享
pub struct QuestionFlow {
    providers: Vec<Arc<dyn QuestionProvider>>,
}

impl QuestionFlow {
    /// 按默认优先级（OpenAI、Anthropic）创建
    pub fn new(config: &Config) -> AppResult<Self> {
        let openai: Arc<dyn QuestionProvider> = Arc::new(OpenAiClient::new(config)?);
        let anthropic: Arc<dyn QuestionProvider> = Arc::new(AnthropicClient::new(config)?);
        Ok(Self::with_providers(vec![openai, anthropic]))
    }

    /// 使用自定义的服务商列表（顺序即优先级）
    pub fn with_providers(providers: Vec<Arc<dyn QuestionProvider>>) -> Self {
        Self { providers }
    }

    /// 当前会被使用的服务商
    pub fn active_provider(&self) -> Option<&dyn QuestionProvider> {
        self.providers
            .iter()
            .find(|p| p.is_configured())
            .map(|p| p.as_ref())
    }

    /// 指定服务商是否已配置
    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        self.providers
            .iter()
            .any(|p| p.kind() == kind && p.is_configured())
    }

    /// 生成题目，永远成功
    pub async fn generate(&self, chapter_text: &str, num_questions: usize) -> Generation {
        let Some(provider) = self.active_provider() else {
            info!("📝 未配置任何模型密钥，使用离线出题");
            return Self::fallback(chapter_text, num_questions);
        };

        info!("🤖 使用 {} 生成 {} 道题", provider.kind(), num_questions);

        match Self::try_remote(provider, chapter_text, num_questions).await {
            Ok(questions) => {
                info!("✓ {} 返回 {} 道题", provider.kind(), questions.len());
                Generation {
                    questions,
                    source: QuestionSource::Remote,
                }
            }
            Err(e) => {
                warn!("⚠️ {} 出题失败，改用离线出题: {}", provider.kind(), e);
                Self::fallback(chapter_text, num_questions)
            }
        }
    }

    async fn try_remote(
        provider: &dyn QuestionProvider,
        chapter_text: &str,
        num_questions: usize,
    ) -> Result<Vec<Question>, AppError> {
        let raw = provider.generate(chapter_text, num_questions).await?;
        parse_questions(&raw).map_err(|e| {
            warn!("模型输出无法解析: {}", truncate_text(&raw, 200));
            AppError::from(e)
        })
    }

    fn fallback(chapter_text: &str, num_questions: usize) -> Generation {
        Generation {
            questions: sample_questions_from_text(chapter_text, num_questions),
            source: QuestionSource::Fallback,
        }
    }
}
