//! HTTP 接口层
//!
//! 只负责请求解析与响应格式，业务交给 `infrastructure` 与 `workflow`

pub mod handlers;
pub mod response;

use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::ChapterStore;
use crate::workflow::QuestionFlow;

/// 所有请求共享的只读状态
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: ChapterStore,
    pub flow: Arc<QuestionFlow>,
}

impl AppState {
    /// 按配置构建默认状态（OpenAI 优先，其次 Anthropic）
    pub fn new(config: Config) -> AppResult<Self> {
        let flow = QuestionFlow::new(&config)?;
        Ok(Self::with_flow(config, flow))
    }

    /// 使用自定义的出题流程
    pub fn with_flow(config: Config, flow: QuestionFlow) -> Self {
        Self {
            store: ChapterStore::new(config.chapters_dir.clone()),
            config: Arc::new(config),
            flow: Arc::new(flow),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/chapters", get(handlers::list_chapters))
        .route("/api/generate-questions", post(handlers::generate_questions))
        .route("/chapters/{*filename}", get(handlers::download_chapter))
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

/// 允许任意来源跨域访问，预检请求直接返回 204
async fn cors(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        let headers = resp.headers_mut();
        allow_origin(headers);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Authorization"),
        );
        return resp;
    }

    let mut resp = next.run(req).await;
    allow_origin(resp.headers_mut());
    resp
}

fn allow_origin(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
}
