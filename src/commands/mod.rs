pub mod menu;
pub mod training;

use tracing::{error, warn};

use crate::db::Store;
use training::HandleError;

/// Bot commands with a fixed reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  Start,
  Help,
  Info,
  GetRecommendations,
  GetTraining,
}

impl Command {
  /// Recognize "/name", "/name@botname" and "/name with arguments"
  pub fn parse(text: &str) -> Option<Self> {
    let token = text.trim_start().split_whitespace().next()?;
    let name = token.strip_prefix('/')?;
    let name = name.split_once('@').map_or(name, |(name, _bot)| name);

    match name {
      "start" => Some(Self::Start),
      "help" => Some(Self::Help),
      "info" => Some(Self::Info),
      "get_recommendations" => Some(Self::GetRecommendations),
      "get_training" => Some(Self::GetTraining),
      _ => None,
    }
  }

  pub fn reply(&self) -> Reply {
    match self {
      Self::Start => Reply::plain(menu::START),
      Self::Help => Reply::plain(menu::HELP),
      Self::Info => Reply::markdown(menu::INFO),
      Self::GetRecommendations => Reply::markdown(menu::GET_RECOMMENDATIONS),
      Self::GetTraining => Reply::plain(menu::GET_TRAINING),
    }
  }
}

/// Where an inbound message goes, checked in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
  Command(Command),
  /// Multi-line text with commas: a workout report
  Report,
  /// Text with a hyphen: a date
  DateLookup,
  Unknown,
}

pub fn route(text: &str) -> Route {
  if let Some(command) = Command::parse(text) {
    Route::Command(command)
  } else if text.contains('\n') && text.contains(',') {
    Route::Report
  } else if text.contains('-') {
    Route::DateLookup
  } else {
    Route::Unknown
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
  pub text: String,
  pub markdown: bool,
}

impl Reply {
  pub fn plain(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      markdown: false,
    }
  }

  pub fn markdown(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      markdown: true,
    }
  }
}

/// Handle one inbound text message from `user_id`.
///
/// Never fails: validation and storage errors become a retry message for the
/// athlete and are logged here.
pub async fn handle_message(store: &Store, user_id: i64, text: &str) -> Reply {
  match route(text) {
    Route::Command(command) => command.reply(),
    Route::Report => match training::submit_report(store, user_id, text).await {
      Ok(recommendations) => Reply::markdown(recommendations),
      Err(e) => {
        log_failure("Error saving training data", &e);
        Reply::plain(menu::INVALID_REPORT)
      }
    },
    Route::DateLookup => match training::lookup_by_date(store, user_id, text).await {
      Ok(records) if records.is_empty() => Reply::plain(menu::NO_TRAINING),
      Ok(records) => Reply::markdown(training::render_records(&records)),
      Err(e) => {
        log_failure("Error fetching training data", &e);
        Reply::plain(menu::INVALID_DATE)
      }
    },
    Route::Unknown => Reply::plain(menu::UNKNOWN_INPUT),
  }
}

fn log_failure(context: &str, err: &HandleError) {
  match err {
    HandleError::Validation(e) => warn!(error = %e, "{}", context),
    HandleError::Storage(e) => error!(error = %e, "{}", context),
  }
}
