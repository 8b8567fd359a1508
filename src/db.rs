use chrono::NaiveDate;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::{debug, info};

use crate::models::{NewTrainingRecord, RecordId, TrainingRecord, WorkoutType, ZoneMinutes};

pub type DbPool = SqlitePool;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration failed: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("Corrupt training record {id}: {reason}")]
  CorruptRecord { id: RecordId, reason: String },
}

/// Append-only training record store backed by SQLite.
///
/// Cheap to clone: clones share the same connection pool. Every append is a
/// single INSERT, so concurrent writers never need coordination.
#[derive(Debug, Clone)]
pub struct Store {
  db: DbPool,
}

impl Store {
  /// Open a connection pool. Call [`Store::initialize`] before first use.
  pub async fn connect(db_url: &str, max_connections: u32) -> Result<Self, StoreError> {
    info!(db_url, "Opening training database");

    let pool = SqlitePoolOptions::new()
      .max_connections(max_connections)
      .connect(db_url)
      .await?;

    Ok(Self::from_pool(pool))
  }

  pub fn from_pool(db: DbPool) -> Self {
    Self { db }
  }

  pub fn pool(&self) -> &DbPool {
    &self.db
  }

  /// Create the schema if missing. Safe to call on every start.
  pub async fn initialize(&self) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(&self.db).await?;
    info!("Training database initialized");
    Ok(())
  }

  pub async fn append(&self, record: &NewTrainingRecord) -> Result<RecordId, StoreError> {
    let report = &record.report;

    let result = sqlx::query(
      r#"
      INSERT INTO training (
        user_id, training_type, duration, heart_rate_zones,
        cadence, distance, date, recommendations
      )
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
      "#,
    )
    .bind(record.user_id)
    .bind(report.workout_type.name())
    .bind(report.duration_minutes)
    .bind(report.zone_minutes.to_text())
    .bind(i64::from(report.cadence))
    .bind(report.distance_km)
    .bind(report.date)
    .bind(&record.recommendations)
    .execute(&self.db)
    .await?;

    let id = result.last_insert_rowid();
    debug!(id, user_id = record.user_id, "Stored training record");
    Ok(id)
  }

  /// All records for one athlete on one date, oldest first. Empty when none.
  pub async fn query_by_user_and_date(
    &self,
    user_id: i64,
    date: NaiveDate,
  ) -> Result<Vec<TrainingRecord>, StoreError> {
    let rows = sqlx::query_as::<_, TrainingRow>(
      r#"
      SELECT id, user_id, training_type, duration, heart_rate_zones,
             cadence, distance, date, recommendations
      FROM training
      WHERE user_id = ?1 AND date = ?2
      ORDER BY id
      "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_all(&self.db)
    .await?;

    rows.into_iter().map(TrainingRecord::try_from).collect()
  }
}

/// Raw `training` row as stored
#[derive(Debug, FromRow)]
struct TrainingRow {
  id: i64,
  user_id: i64,
  training_type: String,
  duration: f64,
  heart_rate_zones: String,
  cadence: i64,
  distance: f64,
  date: NaiveDate,
  recommendations: String,
}

impl TryFrom<TrainingRow> for TrainingRecord {
  type Error = StoreError;

  fn try_from(row: TrainingRow) -> Result<Self, Self::Error> {
    let corrupt = |reason: String| StoreError::CorruptRecord { id: row.id, reason };

    let zone_minutes = row
      .heart_rate_zones
      .parse::<ZoneMinutes>()
      .map_err(|e| corrupt(e.to_string()))?;
    let cadence = u32::try_from(row.cadence)
      .map_err(|_| corrupt(format!("cadence out of range: {}", row.cadence)))?;

    Ok(TrainingRecord {
      id: row.id,
      user_id: row.user_id,
      workout_type: WorkoutType::from_name(&row.training_type),
      duration_minutes: row.duration,
      zone_minutes,
      cadence,
      distance_km: row.distance,
      date: row.date,
      recommendations: row.recommendations,
    })
  }
}
