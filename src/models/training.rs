use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::workout::{WorkoutReport, WorkoutType, ZoneMinutes};

/// Auto-assigned row id of a stored training record
pub type RecordId = i64;

/// A persisted workout report together with the feedback it received.
/// Records are written once and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
  pub id: RecordId,
  pub user_id: i64,
  pub workout_type: WorkoutType,
  pub duration_minutes: f64,
  pub zone_minutes: ZoneMinutes,
  pub cadence: u32,
  pub distance_km: f64,
  pub date: NaiveDate,
  pub recommendations: String,
}

impl TrainingRecord {
  /// Markdown block shown when the athlete looks a date up. Duration and
  /// distance always carry a fractional part ("60.0 mins").
  pub fn to_markdown(&self) -> String {
    format!(
      "*Type:* {}\n*Duration:* {:?} mins\n*HR Zones:* {}\n*Cadence:* {}\n*Distance:* {:?} km\n*Recommendations:*\n {}",
      self.workout_type,
      self.duration_minutes,
      self.zone_minutes,
      self.cadence,
      self.distance_km,
      self.recommendations
    )
  }
}

/// For inserting new records (without id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrainingRecord {
  pub user_id: i64,
  pub report: WorkoutReport,
  pub recommendations: String,
}

impl NewTrainingRecord {
  pub fn new(user_id: i64, report: WorkoutReport, recommendations: String) -> Self {
    Self {
      user_id,
      report,
      recommendations,
    }
  }

  pub fn into_record(self, id: RecordId) -> TrainingRecord {
    TrainingRecord {
      id,
      user_id: self.user_id,
      workout_type: self.report.workout_type,
      duration_minutes: self.report.duration_minutes,
      zone_minutes: self.report.zone_minutes,
      cadence: self.report.cadence,
      distance_km: self.report.distance_km,
      date: self.report.date,
      recommendations: self.recommendations,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_markdown_lists_all_fields() {
    let report = WorkoutReport {
      workout_type: WorkoutType::Tempo,
      duration_minutes: 60.0,
      zone_minutes: ZoneMinutes::new([15.0, 0.0, 45.0, 0.0, 0.0]).unwrap(),
      cadence: 180,
      distance_km: 12.5,
      date: NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
    };
    let record = NewTrainingRecord::new(7, report, "Good pace".to_string()).into_record(3);

    assert_eq!(record.id, 3);
    assert_eq!(record.user_id, 7);
    assert_eq!(
      record.to_markdown(),
      "*Type:* Tempo\n*Duration:* 60.0 mins\n*HR Zones:* 15, 0, 45, 0, 0\n*Cadence:* 180\n*Distance:* 12.5 km\n*Recommendations:*\n Good pace"
    );
  }

  #[test]
  fn test_markdown_keeps_fractional_minutes() {
    let report = WorkoutReport {
      workout_type: WorkoutType::Light,
      duration_minutes: 45.25,
      zone_minutes: ZoneMinutes::new([45.0, 0.25, 0.0, 0.0, 0.0]).unwrap(),
      cadence: 176,
      distance_km: 8.0,
      date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
    };
    let text = NewTrainingRecord::new(1, report, String::new())
      .into_record(1)
      .to_markdown();

    assert!(text.contains("*Duration:* 45.25 mins\n"));
    assert!(text.contains("*Distance:* 8.0 km\n"));
  }
}
