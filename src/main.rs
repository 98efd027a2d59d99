use anyhow::Result;
use tracing::warn;
use trivia_api::config::Config;
use trivia_api::utils::logging;
use trivia_api::App;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置，严格解析失败时回退到宽松解析
    let (config, config_error) = match Config::try_from_env() {
        Ok(config) => (config, None),
        Err(e) => (Config::from_env(), Some(e)),
    };

    // 初始化日志
    logging::init(config.verbose_logging);
    if let Some(e) = config_error {
        warn!("⚠️ {}，无法解析的配置项使用默认值", e);
    }

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
