//! 应用入口 - 编排层
//!
//! 负责启动流程：输出配置摘要、准备章节目录、构建共享状态、监听端口

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{self, AppState};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::utils::logging::log_startup;

/// 应用主结构
pub struct App {
    address: SocketAddr,
    state: AppState,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> AppResult<Self> {
        log_startup(&config);

        let address = config
            .bind_address
            .parse::<SocketAddr>()
            .map_err(|_| AppError::invalid_config("BIND_ADDRESS", &config.bind_address, "socket address"))?;

        let state = AppState::new(config)?;
        // 章节目录不存在时自动创建
        state.store.ensure_dir().await?;
        info!("✓ 章节目录就绪: {}", state.store.chapters_dir().display());

        Ok(Self { address, state })
    }

    /// 运行 HTTP 服务，收到 Ctrl-C 后优雅退出
    pub async fn run(self) -> AppResult<()> {
        let listener = TcpListener::bind(self.address).await?;
        info!("✓ 服务已启动: http://{}", listener.local_addr()?);

        axum::serve(listener, api::router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("👋 服务已停止");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听退出信号: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_initialize_creates_chapters_dir() {
        let root = tempdir().unwrap();
        let config = Config {
            bind_address: "127.0.0.1:0".to_string(),
            chapters_dir: root.path().join("chapters"),
            ..Config::default()
        };

        App::initialize(config).await.unwrap();
        assert!(root.path().join("chapters").is_dir());
    }

    #[tokio::test]
    async fn test_initialize_rejects_bad_address() {
        let root = tempdir().unwrap();
        let config = Config {
            bind_address: "not-an-address".to_string(),
            chapters_dir: root.path().to_path_buf(),
            ..Config::default()
        };

        let err = App::initialize(config).await.err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }
}
