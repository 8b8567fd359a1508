use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// Number of heart rate zones a report carries, lowest intensity first.
pub const ZONE_COUNT: usize = 5;

/// ---------------------------------------------------------------------------
/// Workout Type
/// ---------------------------------------------------------------------------

/// Declared training category; selects which pace rule applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutType {
  Light,
  Marathon,
  Tempo,
  Interval,
  Repeated,
  /// Any other name the athlete typed. Stored verbatim, gets no pace feedback.
  Unrecognized(String),
}

impl WorkoutType {
  pub fn from_name(name: &str) -> Self {
    match name {
      "Light" => Self::Light,
      "Marathon" => Self::Marathon,
      "Tempo" => Self::Tempo,
      "Interval" => Self::Interval,
      "Repeated" => Self::Repeated,
      other => Self::Unrecognized(other.to_string()),
    }
  }

  pub fn name(&self) -> &str {
    match self {
      Self::Light => "Light",
      Self::Marathon => "Marathon",
      Self::Tempo => "Tempo",
      Self::Interval => "Interval",
      Self::Repeated => "Repeated",
      Self::Unrecognized(name) => name,
    }
  }

  /// Pace label used in feedback lines ("Ran a little at easy pace")
  pub fn pace_label(&self) -> Option<&'static str> {
    match self {
      Self::Light => Some("easy"),
      Self::Marathon => Some("marathon"),
      Self::Tempo => Some("tempo"),
      Self::Interval => Some("interval"),
      Self::Repeated => Some("repeated"),
      Self::Unrecognized(_) => None,
    }
  }
}

impl fmt::Display for WorkoutType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// ---------------------------------------------------------------------------
/// Heart Rate Zone Minutes
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZoneError {
  #[error("expected 5 heart rate zone values, got {0}")]
  Count(usize),

  #[error("invalid heart rate zone value: {0:?}")]
  Value(String),
}

/// Minutes spent in each heart rate zone, zone 0 (easiest) to zone 4.
///
/// Always holds exactly [`ZONE_COUNT`] finite, non-negative values, so the
/// evaluator can index zones 0..4 without bounds checks failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; ZONE_COUNT]")]
pub struct ZoneMinutes([f64; ZONE_COUNT]);

impl ZoneMinutes {
  pub fn new(values: [f64; ZONE_COUNT]) -> Result<Self, ZoneError> {
    match values.iter().find(|v| !v.is_finite() || **v < 0.0) {
      Some(bad) => Err(ZoneError::Value(bad.to_string())),
      None => Ok(Self(values)),
    }
  }

  pub fn from_slice(values: &[f64]) -> Result<Self, ZoneError> {
    let values: [f64; ZONE_COUNT] = values
      .try_into()
      .map_err(|_| ZoneError::Count(values.len()))?;
    Self::new(values)
  }

  pub fn as_array(&self) -> &[f64; ZONE_COUNT] {
    &self.0
  }

  /// Serialized form used in the `heart_rate_zones` column: "15, 0, 45, 0, 0"
  pub fn to_text(&self) -> String {
    self
      .0
      .iter()
      .map(|v| v.to_string())
      .collect::<Vec<_>>()
      .join(", ")
  }
}

impl TryFrom<[f64; ZONE_COUNT]> for ZoneMinutes {
  type Error = ZoneError;

  fn try_from(values: [f64; ZONE_COUNT]) -> Result<Self, Self::Error> {
    Self::new(values)
  }
}

impl Index<usize> for ZoneMinutes {
  type Output = f64;

  fn index(&self, zone: usize) -> &f64 {
    &self.0[zone]
  }
}

impl fmt::Display for ZoneMinutes {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_text())
  }
}

impl FromStr for ZoneMinutes {
  type Err = ZoneError;

  /// Accepts comma separated values with optional whitespace ("15, 0, 45, 0, 0")
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let values = s
      .split(',')
      .map(|part| {
        let part = part.trim();
        part
          .parse::<f64>()
          .map_err(|_| ZoneError::Value(part.to_string()))
      })
      .collect::<Result<Vec<_>, _>>()?;
    Self::from_slice(&values)
  }
}

/// ---------------------------------------------------------------------------
/// Workout Report
/// ---------------------------------------------------------------------------

/// A fully typed workout report, ready for evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutReport {
  pub workout_type: WorkoutType,
  pub duration_minutes: f64,
  pub zone_minutes: ZoneMinutes,
  /// Steps per minute
  pub cadence: u32,
  /// Recorded only, no rule looks at it
  pub distance_km: f64,
  pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_workout_type_names_roundtrip() {
    for name in ["Light", "Marathon", "Tempo", "Interval", "Repeated"] {
      let parsed = WorkoutType::from_name(name);
      assert!(!matches!(parsed, WorkoutType::Unrecognized(_)));
      assert_eq!(parsed.name(), name);
    }
  }

  #[test]
  fn test_workout_type_is_case_sensitive() {
    assert_eq!(
      WorkoutType::from_name("tempo"),
      WorkoutType::Unrecognized("tempo".to_string())
    );
    assert_eq!(WorkoutType::from_name("Fartlek").to_string(), "Fartlek");
    assert_eq!(WorkoutType::from_name("Fartlek").pace_label(), None);
  }

  #[test]
  fn test_zone_minutes_rejects_wrong_count() {
    assert_eq!(
      ZoneMinutes::from_slice(&[1.0, 2.0, 3.0, 4.0]),
      Err(ZoneError::Count(4))
    );
    assert_eq!(
      ZoneMinutes::from_slice(&[0.0; 6]),
      Err(ZoneError::Count(6))
    );
  }

  #[test]
  fn test_zone_minutes_rejects_negative_and_nan() {
    assert!(matches!(
      ZoneMinutes::new([1.0, -2.0, 0.0, 0.0, 0.0]),
      Err(ZoneError::Value(_))
    ));
    assert!(matches!(
      ZoneMinutes::new([f64::NAN, 0.0, 0.0, 0.0, 0.0]),
      Err(ZoneError::Value(_))
    ));
  }

  #[test]
  fn test_zone_minutes_deserialize_validates() {
    let zones: ZoneMinutes = serde_json::from_str("[15.0, 0.0, 45.0, 0.0, 0.0]").unwrap();
    assert_eq!(zones.as_array(), &[15.0, 0.0, 45.0, 0.0, 0.0]);
    assert_eq!(serde_json::to_string(&zones).unwrap(), "[15.0,0.0,45.0,0.0,0.0]");

    assert!(serde_json::from_str::<ZoneMinutes>("[-5.0, 0.0, 0.0, 0.0, 0.0]").is_err());
    assert!(serde_json::from_str::<ZoneMinutes>("[1.0, 2.0, 3.0, 4.0]").is_err());
  }

  #[test]
  fn test_zone_minutes_text_format() {
    let zones: ZoneMinutes = "15, 0, 45.5, 0,0".parse().unwrap();
    assert_eq!(zones[2], 45.5);
    assert_eq!(zones.to_text(), "15, 0, 45.5, 0, 0");
    assert_eq!(zones.to_text().parse::<ZoneMinutes>().unwrap(), zones);
  }

  #[test]
  fn test_zone_minutes_parse_errors() {
    assert_eq!(
      "15, 0, abc, 0, 0".parse::<ZoneMinutes>(),
      Err(ZoneError::Value("abc".to_string()))
    );
    assert_eq!("15, 0, 45".parse::<ZoneMinutes>(), Err(ZoneError::Count(3)));
  }
}
