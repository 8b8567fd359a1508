//! Text parsing for chat-submitted workout reports
//!
//! A report is six newline separated fields:
//!
//! ```text
//! Tempo
//! 60
//! 15, 0, 45, 0, 0
//! 180
//! 12
//! 2024-12-20
//! ```

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{WorkoutReport, WorkoutType, ZoneError, ZoneMinutes};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
  #[error("expected 6 lines, got {0}")]
  FieldCount(usize),

  #[error("invalid {field}: {value:?}")]
  InvalidNumber { field: &'static str, value: String },

  #[error("{field} must be greater than zero")]
  NotPositive { field: &'static str },

  #[error(transparent)]
  Zones(#[from] ZoneError),

  #[error("invalid date {0:?}, expected YYYY-MM-DD")]
  InvalidDate(String),
}

/// Parse a full six-line report.
pub fn parse_report(text: &str) -> Result<WorkoutReport, ParseError> {
  let mut fields: Vec<&str> = text.lines().map(str::trim).collect();
  while fields.last().is_some_and(|f| f.is_empty()) {
    fields.pop();
  }

  let [workout_type, duration, zones, cadence, distance, date] = fields.as_slice() else {
    return Err(ParseError::FieldCount(fields.len()));
  };

  let duration_minutes = parse_real("duration", duration)?;
  if duration_minutes <= 0.0 {
    return Err(ParseError::NotPositive { field: "duration" });
  }

  let cadence = parse_number::<u32>("cadence", cadence)?;
  if cadence == 0 {
    return Err(ParseError::NotPositive { field: "cadence" });
  }

  let distance_km = parse_real("distance", distance)?;
  if distance_km < 0.0 {
    return Err(ParseError::InvalidNumber {
      field: "distance",
      value: distance.to_string(),
    });
  }

  Ok(WorkoutReport {
    workout_type: WorkoutType::from_name(workout_type),
    duration_minutes,
    zone_minutes: zones.parse::<ZoneMinutes>()?,
    cadence,
    distance_km,
    date: parse_date(date)?,
  })
}

pub fn parse_date(text: &str) -> Result<NaiveDate, ParseError> {
  let text = text.trim();
  NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| ParseError::InvalidDate(text.to_string()))
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
  value.parse::<T>().map_err(|_| ParseError::InvalidNumber {
    field,
    value: value.to_string(),
  })
}

/// Like `parse_number`, but "inf" and "NaN" are rejected too.
fn parse_real(field: &'static str, value: &str) -> Result<f64, ParseError> {
  match parse_number::<f64>(field, value)? {
    v if v.is_finite() => Ok(v),
    _ => Err(ParseError::InvalidNumber {
      field,
      value: value.to_string(),
    }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const EXAMPLE: &str = "Tempo\n60\n15, 0, 45, 0, 0\n180\n12\n2024-12-20";

  #[test]
  fn test_parse_example_report() {
    let report = parse_report(EXAMPLE).unwrap();
    assert_eq!(report.workout_type, WorkoutType::Tempo);
    assert_eq!(report.duration_minutes, 60.0);
    assert_eq!(report.zone_minutes.as_array(), &[15.0, 0.0, 45.0, 0.0, 0.0]);
    assert_eq!(report.cadence, 180);
    assert_eq!(report.distance_km, 12.0);
    assert_eq!(report.date, NaiveDate::from_ymd_opt(2024, 12, 20).unwrap());
  }

  #[test]
  fn test_parse_tolerates_whitespace_and_trailing_lines() {
    let text = "  Light \r\n 45.5\r\n60,0,0,0,0\r\n176\r\n8.2\r\n2024-01-02\r\n\n";
    let report = parse_report(text).unwrap();
    assert_eq!(report.workout_type, WorkoutType::Light);
    assert_eq!(report.duration_minutes, 45.5);
    assert_eq!(report.zone_minutes[0], 60.0);
  }

  #[test]
  fn test_parse_keeps_unknown_type_name() {
    let text = EXAMPLE.replacen("Tempo", "Fartlek", 1);
    let report = parse_report(&text).unwrap();
    assert_eq!(report.workout_type, WorkoutType::Unrecognized("Fartlek".into()));
  }

  #[test]
  fn test_parse_rejects_wrong_field_count() {
    assert_eq!(
      parse_report("Tempo\n60\n15, 0, 45, 0, 0\n180\n12"),
      Err(ParseError::FieldCount(5))
    );
    assert_eq!(
      parse_report(&format!("{}\nextra", EXAMPLE)),
      Err(ParseError::FieldCount(7))
    );
  }

  #[test]
  fn test_parse_rejects_short_zone_list() {
    let text = EXAMPLE.replace("15, 0, 45, 0, 0", "15, 0, 45, 0");
    assert_eq!(parse_report(&text), Err(ParseError::Zones(ZoneError::Count(4))));
  }

  #[test]
  fn test_parse_rejects_bad_numbers() {
    let text = EXAMPLE.replacen("60", "an hour", 1);
    assert!(matches!(
      parse_report(&text),
      Err(ParseError::InvalidNumber { field: "duration", .. })
    ));

    let text = EXAMPLE.replace("180", "180.5");
    assert!(matches!(
      parse_report(&text),
      Err(ParseError::InvalidNumber { field: "cadence", .. })
    ));

    let text = EXAMPLE.replace("\n12\n", "\nNaN\n");
    assert!(matches!(
      parse_report(&text),
      Err(ParseError::InvalidNumber { field: "distance", .. })
    ));
  }

  #[test]
  fn test_parse_rejects_non_positive_values() {
    let text = EXAMPLE.replacen("\n60\n", "\n0\n", 1);
    assert_eq!(
      parse_report(&text),
      Err(ParseError::NotPositive { field: "duration" })
    );

    let text = EXAMPLE.replace("\n180\n", "\n0\n");
    assert_eq!(
      parse_report(&text),
      Err(ParseError::NotPositive { field: "cadence" })
    );
  }

  #[test]
  fn test_parse_date() {
    assert_eq!(
      parse_date(" 2024-12-20 ").unwrap(),
      NaiveDate::from_ymd_opt(2024, 12, 20).unwrap()
    );
    assert_eq!(
      parse_date("2024-13-01"),
      Err(ParseError::InvalidDate("2024-13-01".into()))
    );
    assert!(parse_date("20-12-2024").is_err());
  }
}
