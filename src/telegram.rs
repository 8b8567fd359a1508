//! Minimal Telegram Bot API client: long polling and sending replies

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
/// Extra time on top of the long-poll timeout before the HTTP request gives up
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 10;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Invalid API URL: {0}")]
  Url(String),

  #[error("Telegram API error: {0}")]
  Api(String),
}

/// ---------------------------------------------------------------------------
/// API Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
  ok: bool,
  result: Option<T>,
  description: Option<String>,
}

impl<T> ApiResponse<T> {
  fn into_result(self) -> Result<T, TelegramError> {
    match (self.ok, self.result) {
      (true, Some(result)) => Ok(result),
      _ => Err(TelegramError::Api(
        self
          .description
          .unwrap_or_else(|| "request was not successful".to_string()),
      )),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
  pub update_id: i64,
  #[serde(default)]
  pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
  pub message_id: i64,
  #[serde(default)]
  pub from: Option<User>,
  pub chat: Chat,
  #[serde(default)]
  pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
  pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
  pub id: i64,
}

#[derive(Debug, Serialize)]
struct GetUpdatesRequest<'a> {
  #[serde(skip_serializing_if = "Option::is_none")]
  offset: Option<i64>,
  timeout: u64,
  allowed_updates: &'a [&'a str],
}

#[derive(Debug, Clone, Serialize)]
pub struct SendMessage<'a> {
  pub chat_id: i64,
  pub text: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parse_mode: Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reply_to_message_id: Option<i64>,
}

/// ---------------------------------------------------------------------------
/// Client
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TelegramClient {
  http: Client,
  api_base: Url,
  token: String,
}

impl TelegramClient {
  pub fn new(api_base: &str, token: &str) -> Result<Self, TelegramError> {
    let api_base = Url::parse(api_base).map_err(|e| TelegramError::Url(e.to_string()))?;
    if api_base.cannot_be_a_base() {
      return Err(TelegramError::Url(format!("{} cannot be a base URL", api_base)));
    }

    Ok(Self {
      http: Client::new(),
      api_base,
      token: token.to_string(),
    })
  }

  /// `{api_base}/bot{token}/{method}`
  fn method_url(&self, method: &str) -> Result<Url, TelegramError> {
    let mut url = self.api_base.clone();
    url
      .path_segments_mut()
      .map_err(|_| TelegramError::Url(self.api_base.to_string()))?
      .pop_if_empty()
      .push(&format!("bot{}", self.token))
      .push(method);
    Ok(url)
  }

  /// Long-poll for new messages. Blocks up to `timeout_secs` when idle.
  pub async fn get_updates(
    &self,
    offset: Option<i64>,
    timeout_secs: u64,
  ) -> Result<Vec<Update>, TelegramError> {
    let request = GetUpdatesRequest {
      offset,
      timeout: timeout_secs,
      allowed_updates: &["message"],
    };

    let response: ApiResponse<Vec<Update>> = self
      .http
      .post(self.method_url("getUpdates")?)
      .timeout(Duration::from_secs(timeout_secs + REQUEST_TIMEOUT_MARGIN_SECS))
      .json(&request)
      .send()
      .await?
      .json()
      .await?;

    response.into_result()
  }

  pub async fn send_message(&self, message: &SendMessage<'_>) -> Result<(), TelegramError> {
    let response: ApiResponse<serde_json::Value> = self
      .http
      .post(self.method_url("sendMessage")?)
      .json(message)
      .send()
      .await?
      .json()
      .await?;

    response.into_result().map(|_| ())
  }
}
