//! Long-polling loop that feeds chat messages to the command handler

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn, Instrument};

use crate::commands::{self, Reply};
use crate::db::Store;
use crate::telegram::{SendMessage, TelegramClient, TelegramError, Update};

const RETRY_DELAY: Duration = Duration::from_secs(5);
const MARKDOWN: &str = "Markdown";
/// Bot API description prefix for entity parse failures
const PARSE_ENTITIES_ERROR: &str = "can't parse entities";

/// Application state shared by every message task
pub struct AppState {
  pub store: Store,
  pub telegram: TelegramClient,
}

/// A text message worth handling, extracted from an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
  pub update_id: i64,
  pub message_id: i64,
  pub chat_id: i64,
  pub user_id: i64,
  pub text: String,
}

impl Inbound {
  /// `None` for updates without a text message (stickers, edits, ...)
  pub fn from_update(update: &Update) -> Option<Self> {
    let message = update.message.as_ref()?;
    let text = message.text.clone()?;
    let user_id = message.from.as_ref().map_or(message.chat.id, |u| u.id);

    Some(Self {
      update_id: update.update_id,
      message_id: message.message_id,
      chat_id: message.chat.id,
      user_id,
      text,
    })
  }
}

/// Offset acknowledging every update in `updates`
pub fn next_offset(current: Option<i64>, updates: &[Update]) -> Option<i64> {
  updates
    .iter()
    .map(|u| u.update_id + 1)
    .max()
    .max(current)
}

/// Acknowledge whatever queued up while the bot was offline
pub async fn skip_pending_updates(telegram: &TelegramClient) -> Result<Option<i64>, TelegramError> {
  let pending = telegram.get_updates(Some(-1), 0).await?;
  let offset = next_offset(None, &pending);
  if offset.is_some() {
    info!("Skipped updates received while offline");
  }
  Ok(offset)
}

/// Poll forever, spawning one task per inbound message.
pub async fn poll(state: Arc<AppState>, mut offset: Option<i64>, timeout_secs: u64) {
  loop {
    let updates = match state.telegram.get_updates(offset, timeout_secs).await {
      Ok(updates) => updates,
      Err(e) => {
        error!(error = %e, "Failed to fetch updates");
        tokio::time::sleep(RETRY_DELAY).await;
        continue;
      }
    };

    offset = next_offset(offset, &updates);

    for update in &updates {
      let Some(inbound) = Inbound::from_update(update) else {
        debug!(update_id = update.update_id, "Ignoring non-text update");
        continue;
      };

      let span = tracing::info_span!("message", update_id = inbound.update_id, user_id = inbound.user_id);
      tokio::spawn(handle_inbound(state.clone(), inbound).instrument(span));
    }
  }
}

async fn handle_inbound(state: Arc<AppState>, inbound: Inbound) {
  let reply = commands::handle_message(&state.store, inbound.user_id, &inbound.text).await;
  if let Err(e) = send_reply(&state.telegram, &inbound, &reply).await {
    error!(error = %e, "Failed to send reply");
  }
}

/// Send `reply`. A Markdown reply the API refuses to parse is resent as plain
/// text; athlete-typed type names can contain stray `*` or `_`. Other API
/// errors are returned as is.
async fn send_reply(
  telegram: &TelegramClient,
  inbound: &Inbound,
  reply: &Reply,
) -> Result<(), TelegramError> {
  let mut message = SendMessage {
    chat_id: inbound.chat_id,
    text: &reply.text,
    parse_mode: reply.markdown.then_some(MARKDOWN),
    reply_to_message_id: Some(inbound.message_id),
  };

  let first = telegram.send_message(&message).await;
  match first {
    Err(TelegramError::Api(description))
      if message.parse_mode.is_some() && description.contains(PARSE_ENTITIES_ERROR) =>
    {
      warn!(%description, "Markdown rejected, resending as plain text");
      message.parse_mode = None;
      telegram.send_message(&message).await
    }
    result => result,
  }
}
