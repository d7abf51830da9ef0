/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::{info, warn};

use crate::config::Config;

/// 记录程序启动信息
///
/// 只输出密钥是否配置，不输出密钥本身
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 章节出题服务启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📁 章节目录: {}", config.chapters_dir.display());
    info!("🌐 监听地址: {}", config.bind_address);
    info!(
        "🔑 OpenAI: {} | Anthropic: {}",
        configured_label(config.has_openai()),
        configured_label(config.has_anthropic())
    );
    if !config.has_openai() && !config.has_anthropic() {
        warn!("💡 未配置任何模型密钥，所有题目将由离线兜底生成");
        warn!("💡 可设置 OPENAI_API_KEY 或 ANTHROPIC_API_KEY 启用模型出题");
    }
    info!("{}", "=".repeat(60));
}

fn configured_label(configured: bool) -> &'static str {
    if configured {
        "已配置"
    } else {
        "未配置"
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
