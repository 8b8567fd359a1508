//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories

use chrono::NaiveDate;

use crate::db::Store;
use crate::models::{NewTrainingRecord, RecordId, WorkoutReport, WorkoutType, ZoneMinutes};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory store with the schema applied
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> Store {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  let store = Store::from_pool(pool);
  store.initialize().await.expect("Failed to run migrations");
  store
}

/// Close a test database pool
pub async fn teardown_test_db(store: Store) {
  store.pool().close().await;
}

/// Store `count` evaluated reports for one athlete on [`test_date`]
pub async fn seed_test_records(store: &Store, user_id: i64, count: usize) -> Vec<RecordId> {
  let mut ids = Vec::with_capacity(count);
  for i in 0..count {
    let record = NewTrainingRecord::new(
      user_id,
      mock_report(WorkoutType::Light),
      format!("seeded recommendation {}", i),
    );
    ids.push(store.append(&record).await.expect("Failed to seed record"));
  }
  ids
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn test_date() -> NaiveDate {
  NaiveDate::from_ymd_opt(2024, 12, 20).expect("valid date")
}

/// A plausible report: 60 minutes, mostly in zone 2, good cadence
pub fn mock_report(workout_type: WorkoutType) -> WorkoutReport {
  WorkoutReport {
    workout_type,
    duration_minutes: 60.0,
    zone_minutes: ZoneMinutes::new([15.0, 0.0, 45.0, 0.0, 0.0]).expect("valid zones"),
    cadence: 180,
    distance_km: 12.0,
    date: test_date(),
  }
}

/// Chat text for [`mock_report`] with the given type name
pub fn mock_report_text(type_name: &str) -> String {
  format!("{}\n60\n15, 0, 45, 0, 0\n180\n12\n2024-12-20", type_name)
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let store = setup_test_db().await;

    let tables: Vec<(String,)> =
      sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = 'training'")
        .fetch_all(store.pool())
        .await
        .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    teardown_test_db(store).await;
  }

  #[tokio::test]
  async fn test_seed_records_returns_correct_count() {
    let store = setup_test_db().await;

    let ids = seed_test_records(&store, 1, 5).await;
    assert_eq!(ids.len(), 5);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM training")
      .fetch_one(store.pool())
      .await
      .expect("Failed to count records");

    assert_eq!(count, 5);

    teardown_test_db(store).await;
  }

  #[test]
  fn test_mock_report_text_parses_to_mock_report() {
    let parsed = crate::parser::parse_report(&mock_report_text("Tempo")).unwrap();
    assert_eq!(parsed, mock_report(WorkoutType::Tempo));
  }
}
