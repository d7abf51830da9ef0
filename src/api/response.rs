use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::error::AppError;
use crate::models::{ChapterSummary, GenerationResult};

/// 对外固定的未找到提示
pub const CHAPTER_NOT_FOUND: &str = "Chapter not found";

/// `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub openai: bool,
    pub anthropic: bool,
    pub chapters: Vec<String>,
}

/// `GET /api/chapters`
#[derive(Debug, Serialize)]
pub struct ChaptersResponse {
    pub chapters: Vec<ChapterSummary>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Request(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Chapter(e) if e.is_not_found() => {
                (StatusCode::NOT_FOUND, CHAPTER_NOT_FOUND.to_string())
            }
            _ => {
                error!("❌ 请求处理失败: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        (status, Json(GenerationResult::failure(message))).into_response()
    }
}
