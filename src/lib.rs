pub mod bot;
pub mod commands;
pub mod config;
pub mod db;
pub mod evaluator;
pub mod logging;
pub mod models;
pub mod parser;
pub mod telegram;

#[cfg(test)]
mod test_utils;

use bot::AppState;
use config::BotConfig;
use db::Store;
use std::sync::Arc;
use telegram::TelegramClient;
use tracing::info;

/// Start the bot and serve until Ctrl-C.
pub async fn run() -> anyhow::Result<()> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  logging::init(logging::LogFormat::from_env())?;

  let config = BotConfig::from_env()?;
  info!(?config, "Starting trainer bot");

  let store = Store::connect(&config.database_url, config.db_max_connections).await?;
  store.initialize().await?;

  let telegram = TelegramClient::new(&config.api_base, &config.token)?;
  let offset = bot::skip_pending_updates(&telegram).await?;

  let state = Arc::new(AppState { store, telegram });

  tokio::select! {
    _ = bot::poll(state.clone(), offset, config.poll_timeout_secs) => {}
    signal = tokio::signal::ctrl_c() => {
      signal?;
      info!("Shutting down");
    }
  }

  state.store.pool().close().await;
  Ok(())
}
