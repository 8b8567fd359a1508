use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::telegram::TELEGRAM_API_BASE;

/// ---------------------------------------------------------------------------
/// Defaults
/// ---------------------------------------------------------------------------

const DEFAULT_TOKEN_FILE: &str = "/run/secrets/bot_token";
const DEFAULT_DATABASE_URL: &str = "sqlite://training_data.db?mode=rwc";
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("No bot token: {path} does not exist and BOT_TOKEN is not set")]
  MissingToken { path: PathBuf },

  #[error("Bot token in {path} is empty")]
  EmptyToken { path: PathBuf },

  #[error("Failed to read the token file {path}: {source}")]
  TokenFile { path: PathBuf, source: io::Error },

  #[error("Invalid value for {key}: {value:?}")]
  Invalid { key: &'static str, value: String },
}

#[derive(Clone)]
pub struct BotConfig {
  pub token: String,
  pub database_url: String,
  pub api_base: String,
  pub poll_timeout_secs: u64,
  pub db_max_connections: u32,
}

// Keep the token out of logs.
impl std::fmt::Debug for BotConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BotConfig")
      .field("token", &"<redacted>")
      .field("database_url", &self.database_url)
      .field("api_base", &self.api_base)
      .field("poll_timeout_secs", &self.poll_timeout_secs)
      .field("db_max_connections", &self.db_max_connections)
      .finish()
  }
}

impl BotConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    Ok(Self {
      token: read_token()?,
      database_url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into()),
      api_base: env::var("TELEGRAM_API_BASE").unwrap_or_else(|_| TELEGRAM_API_BASE.into()),
      poll_timeout_secs: parse_var("POLL_TIMEOUT_SECS", DEFAULT_POLL_TIMEOUT_SECS)?,
      db_max_connections: parse_var("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
    })
  }
}

/// Token from `BOT_TOKEN_FILE` (a Docker secret by default), falling back to
/// `BOT_TOKEN` only when the file does not exist.
fn read_token() -> Result<String, ConfigError> {
  let path = PathBuf::from(env::var("BOT_TOKEN_FILE").unwrap_or_else(|_| DEFAULT_TOKEN_FILE.into()));

  let token = match fs::read_to_string(&path) {
    Ok(contents) => contents.trim().to_string(),
    Err(e) if e.kind() == io::ErrorKind::NotFound => match env::var("BOT_TOKEN") {
      Ok(token) => token.trim().to_string(),
      Err(_) => return Err(ConfigError::MissingToken { path }),
    },
    Err(source) => return Err(ConfigError::TokenFile { path, source }),
  };

  if token.is_empty() {
    return Err(ConfigError::EmptyToken { path });
  }
  Ok(token)
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
  match env::var(key) {
    Ok(value) => value
      .trim()
      .parse()
      .map_err(|_| ConfigError::Invalid { key, value }),
    Err(_) => Ok(default),
  }
}
