//! # Chapter Quiz
//!
//! 基于章节文本自动生成选择题的 HTTP 服务
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 章节目录的扫描与读取，负责 ID 安全校验
//!
//! ### ② 能力层（Clients / Services）
//! - `clients/` - OpenAI / Anthropic 两个远程模型客户端，实现同一个 `QuestionProvider`
//! - `services/` - 提示词构建、模型输出解析、离线兜底出题
//!
//! ### ③ 流程层（Workflow）
//! - `QuestionFlow` - 选服务商 → 调用 → 解析，失败则兜底
//!
//! ### ④ 接口层（API）
//! - `api/` - 路由、请求解析、错误到 HTTP 状态码的映射
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use api::{router, AppState};
pub use app::App;
pub use clients::{ProviderKind, QuestionProvider};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::ChapterStore;
pub use models::{GenerationRequest, GenerationResult, Question, QuestionSource};
pub use workflow::{Generation, QuestionFlow};
