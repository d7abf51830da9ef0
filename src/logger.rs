//! 日志初始化
//!
//! 优先使用 `RUST_LOG`，否则按 `verbose` 选择 info / debug

use tracing_subscriber::EnvFilter;

/// 使用默认级别初始化日志
pub fn init() {
    init_with_verbosity(false);
}

/// 初始化日志，可重复调用（测试中多次调用不会 panic）
pub fn init_with_verbosity(verbose: bool) {
    let default_directive = if verbose {
        "chapter_quiz=debug"
    } else {
        "chapter_quiz=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
