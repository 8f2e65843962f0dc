use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod dispatch;
mod render;
mod telegram;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("boxhunt=info")),
        )
        .init();

    let args = cli::Args::parse();
    let config = config::Config::load(&args.config)?;
    if config.telegram.bot_token.is_empty() {
        bail!(
            "telegram.bot_token is not set; add it to '{}' or export BOXHUNT_BOT_TOKEN",
            args.config
        );
    }

    let api = telegram::BotApi::new(
        &config.telegram.api_url,
        &config.telegram.bot_token,
        config.telegram.poll_timeout_secs,
    )?;
    let service = boxhunt_core::GameService::new(config.game.assignment());

    tracing::info!("starting boxhunt bot");
    dispatch::Dispatcher::new(api, service, config.telegram.poll_timeout_secs)
        .run()
        .await
}
