use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::api::response::{ChaptersResponse, HealthResponse};
use crate::api::AppState;
use crate::clients::ProviderKind;
use crate::error::{AppError, ChapterError};
use crate::models::{ChapterSummary, GenerationRequest, GenerationResult};

static INDEX_HTML: &str = include_str!("../../static/index.html");

/// 首页
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let chapters = state.store.list_chapter_ids().await?;
    Ok(Json(HealthResponse {
        ok: true,
        openai: state.flow.is_configured(ProviderKind::OpenAi),
        anthropic: state.flow.is_configured(ProviderKind::Anthropic),
        chapters,
    }))
}

pub async fn list_chapters(
    State(state): State<AppState>,
) -> Result<Json<ChaptersResponse>, AppError> {
    let chapters = state
        .store
        .list_chapter_ids()
        .await?
        .into_iter()
        .map(ChapterSummary::from_id)
        .collect();
    Ok(Json(ChaptersResponse { chapters }))
}

/// 生成选择题
///
/// 请求体不是合法 JSON 时按空对象处理（随后报 `chapter_id is required`）
pub async fn generate_questions(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerationResult>, AppError> {
    let payload: Value = serde_json::from_slice(&body).unwrap_or_else(|e| {
        debug!("请求体不是合法 JSON: {}", e);
        Value::Null
    });
    let request = GenerationRequest::from_payload(
        &payload,
        state.config.default_question_count,
        state.config.max_question_count,
    )?;

    info!(
        "📨 出题请求: 章节 {} | 题目数 {}",
        request.chapter_id, request.num_questions
    );

    let chapter_text = state.store.read_chapter_text(&request.chapter_id).await?;
    let generation = state
        .flow
        .generate(&chapter_text, request.num_questions)
        .await;

    Ok(Json(GenerationResult::success(
        request.chapter_id,
        generation.questions,
        generation.source,
    )))
}

/// 原样下载章节文件
pub async fn download_chapter(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let path = state.store.resolve_download(&filename).await?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| ChapterError::Io {
            path: path.display().to_string(),
            source,
        })?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        bytes,
    )
        .into_response())
}
