use anyhow::Context;
use mailer::app::EmailServiceApp;
use shared::{config::Config, utils::init_logger};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    init_logger("email-service", is_dev, is_enable_file);

    let config = Config::init().context("failed to load config")?;

    let app = EmailServiceApp::new(config);

    app.run().await?;

    info!("✅ Email Service shutdown gracefully.");

    Ok(())
}
