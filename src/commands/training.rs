//! Report submission and date lookup flows

use tracing::{debug, info};

use super::menu;
use crate::db::{Store, StoreError};
use crate::evaluator;
use crate::models::{NewTrainingRecord, TrainingRecord};
use crate::parser::{self, ParseError};

#[derive(Debug, thiserror::Error)]
pub enum HandleError {
  #[error("Invalid input: {0}")]
  Validation(#[from] ParseError),

  #[error(transparent)]
  Storage(#[from] StoreError),
}

/// Parse, evaluate and store a report. Returns the rendered feedback.
///
/// Nothing is stored when parsing fails.
pub async fn submit_report(store: &Store, user_id: i64, text: &str) -> Result<String, HandleError> {
  let report = parser::parse_report(text)?;
  let recommendations = evaluator::evaluate(&report).render();

  let record = NewTrainingRecord::new(user_id, report, recommendations.clone());
  let id = store.append(&record).await?;

  info!(
    id,
    workout_type = %record.report.workout_type,
    date = %record.report.date,
    "Training report stored"
  );
  Ok(recommendations)
}

/// Records for the date in `text`, in the order they were submitted
pub async fn lookup_by_date(
  store: &Store,
  user_id: i64,
  text: &str,
) -> Result<Vec<TrainingRecord>, HandleError> {
  let date = parser::parse_date(text)?;
  let records = store.query_by_user_and_date(user_id, date).await?;
  debug!(%date, count = records.len(), "Training lookup");
  Ok(records)
}

pub fn render_records(records: &[TrainingRecord]) -> String {
  if records.is_empty() {
    return menu::NO_TRAINING.to_string();
  }

  records
    .iter()
    .map(TrainingRecord::to_markdown)
    .collect::<Vec<_>>()
    .join(menu::RECORD_SEPARATOR)
}
