use anyhow::Result;
use chapter_quiz::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 读取 .env（文件不存在时忽略）
    dotenv::dotenv().ok();

    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logger::init_with_verbosity(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
