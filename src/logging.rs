//! Structured logging setup

use anyhow::Result;
use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// sqlx logs every statement at info; keep it quiet unless asked for
const DEFAULT_FILTER: &str = "info,sqlx=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  /// One JSON object per line, for log shippers
  Json,
  Compact,
  /// Default human-readable output
  Full,
}

impl LogFormat {
  pub fn from_env() -> Self {
    Self::parse(env::var("LOG_FORMAT").ok().as_deref())
  }

  fn parse(value: Option<&str>) -> Self {
    match value {
      Some("json") => Self::Json,
      Some("compact") => Self::Compact,
      _ => Self::Full,
    }
  }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set
pub fn init(format: LogFormat) -> Result<()> {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
  let registry = tracing_subscriber::registry().with(filter);

  match format {
    LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
    LogFormat::Compact => registry.with(fmt::layer().compact()).try_init()?,
    LogFormat::Full => registry.with(fmt::layer()).try_init()?,
  }

  Ok(())
}
