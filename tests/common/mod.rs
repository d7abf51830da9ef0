#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, Request, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use chapter_quiz::{router, AppState, Config};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const INTRO: &str = "The mitochondria is the powerhouse of the cell.\nShort line.\nAnother full sentence here now.";

pub const QUESTIONS_JSON: &str = r#"[{"question":"What is the powerhouse of the cell?","options":["Mitochondria","Nucleus","Ribosome","Golgi apparatus"],"correct":0,"explanation":"The chapter states it directly."},{"question":"Which organelle holds DNA?","options":["Ribosome","Nucleus","Vacuole","Lysosome"],"correct":1,"explanation":"General biology."}]"#;

/// 创建带章节文件的临时目录
pub fn chapters_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for (name, content) in files {
        std::fs::write(dir.path().join(name), content).expect("write chapter");
    }
    dir
}

/// 不带任何密钥的配置（纯离线模式）
pub fn offline_config(dir: &Path) -> Config {
    Config {
        chapters_dir: dir.to_path_buf(),
        ..Config::default()
    }
}

pub fn app(config: Config) -> Router {
    chapter_quiz::logger::init();
    router(AppState::new(config).expect("build app state"))
}

/// 发送请求并把响应体解析为 JSON（非 JSON 时返回字符串）
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .expect("request build should succeed");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, headers, json)
}

pub async fn generate(app: &Router, body: &str) -> (StatusCode, Value) {
    let (status, _, json) = send(app, Method::POST, "/api/generate-questions", Some(body)).await;
    (status, json)
}

// ========== 模拟模型服务 ==========

/// 模拟服务收到的请求
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct VendorState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockVendor {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockVendor {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("mock mutex poisoned").clone()
    }
}

async fn vendor_handler(
    State(state): State<VendorState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state
        .requests
        .lock()
        .expect("mock mutex poisoned")
        .push(RecordedRequest {
            path: uri.path().to_string(),
            headers,
            body,
        });
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// 启动一个本地模拟服务，对任意路径返回固定状态码和响应体
pub async fn spawn_mock_vendor(status: StatusCode, body: impl Into<String>) -> MockVendor {
    spawn_slow_mock_vendor(status, body, Duration::ZERO).await
}

pub async fn spawn_slow_mock_vendor(
    status: StatusCode,
    body: impl Into<String>,
    delay: Duration,
) -> MockVendor {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock vendor");
    let addr = listener.local_addr().expect("mock vendor address");
    let requests = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new().fallback(vendor_handler).with_state(VendorState {
        status,
        body: body.into(),
        delay,
        requests: requests.clone(),
    });
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock vendor crashed");
    });

    MockVendor {
        base_url: format!("http://{addr}/v1"),
        requests,
    }
}

/// OpenAI 响应结构
pub fn openai_envelope(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}]
    })
    .to_string()
}

/// Anthropic 响应结构
pub fn anthropic_envelope(text: &str) -> String {
    serde_json::json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn"
    })
    .to_string()
}
