//! Deterministic feedback for a single workout report
//!
//! Maps a typed report onto three fixed sections (pace, duration, cadence).
//! Pace feedback depends on the declared workout type and the minutes spent in
//! each heart rate zone; duration and cadence feedback apply to every type.

use serde::{Deserialize, Serialize};

use crate::models::{WorkoutReport, WorkoutType, ZoneMinutes};

pub const PACE_HEADER: &str = "---------- *Pace* ----------";
pub const DURATION_HEADER: &str = "---------- *Duration* ----------";
pub const CADENCE_HEADER: &str = "---------- *Cadence* ----------";

/// ---------------------------------------------------------------------------
/// Thresholds
/// ---------------------------------------------------------------------------

/// Minutes in the target zone for a steady run (light, marathon, tempo)
const STEADY_TARGET_MIN: f64 = 60.0;
/// Tolerated minutes one zone above target on light and marathon runs
const STEADY_SPILLOVER_MAX: f64 = 3.0;
/// Tolerated minutes one zone above target on tempo runs
const TEMPO_SPILLOVER_MAX: f64 = 0.5;

const INTERVAL_TARGET_MIN: f64 = 9.0;
const INTERVAL_TARGET_MAX: f64 = 15.0;
const INTERVAL_SPILLOVER_MAX: f64 = 1.5;

const REPEATED_TARGET_MIN: f64 = 5.0;
const REPEATED_TARGET_MAX: f64 = 9.0;

const DURATION_MIN: f64 = 40.0;
const DURATION_MAX: f64 = 90.0;

const CADENCE_MIN: u32 = 175;
const CADENCE_MAX: u32 = 185;

/// ---------------------------------------------------------------------------
/// Judgments
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceNote {
  GoodPace,
  /// Not enough time in the target zone
  RanLittle(&'static str),
  /// Enough time in the target zone, but the run was not clean
  RanEnough(&'static str),
  RanTooMuch(&'static str),
  /// Time spent above the target zone
  Acceleration,
}

impl PaceNote {
  pub fn message(&self) -> String {
    match self {
      Self::GoodPace => "Good pace".to_string(),
      Self::RanLittle(pace) => format!("Ran a little at {} pace", pace),
      Self::RanEnough(pace) => format!("Ran enough at {} pace", pace),
      Self::RanTooMuch(pace) => format!("Ran too much at {} pace", pace),
      Self::Acceleration => "A lot of acceleration".to_string(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationNote {
  Good,
  TooLittle,
  TooMuch,
}

impl DurationNote {
  pub fn from_minutes(minutes: f64) -> Self {
    if minutes < DURATION_MIN {
      Self::TooLittle
    } else if minutes > DURATION_MAX {
      Self::TooMuch
    } else {
      Self::Good
    }
  }

  pub fn message(&self) -> &'static str {
    match self {
      Self::Good => "Good running duration",
      Self::TooLittle => "Didn't train much",
      Self::TooMuch => "Too much load",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CadenceNote {
  Good,
  Increase,
  Decrease,
}

impl CadenceNote {
  pub fn from_steps(steps_per_minute: u32) -> Self {
    if steps_per_minute < CADENCE_MIN {
      Self::Increase
    } else if steps_per_minute > CADENCE_MAX {
      Self::Decrease
    } else {
      Self::Good
    }
  }

  pub fn message(&self) -> &'static str {
    match self {
      Self::Good => "Good cadence",
      Self::Increase => "Increase the cadence",
      Self::Decrease => "Decrease the cadence",
    }
  }
}

/// ---------------------------------------------------------------------------
/// Recommendation Result
/// ---------------------------------------------------------------------------

/// Structured feedback for one report. `pace` holds zero to two notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationResult {
  pub pace: Vec<PaceNote>,
  pub duration: DurationNote,
  pub cadence: CadenceNote,
}

impl RecommendationResult {
  /// Message body sent to the athlete and stored with the record
  pub fn render(&self) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(self.pace.len() + 4);
    lines.push(PACE_HEADER.to_string());
    lines.extend(self.pace.iter().map(PaceNote::message));
    lines.push(DURATION_HEADER.to_string());
    lines.push(self.duration.message().to_string());
    lines.push(CADENCE_HEADER.to_string());
    lines.push(self.cadence.message().to_string());
    lines.join("\n")
  }
}

/// ---------------------------------------------------------------------------
/// Evaluation
/// ---------------------------------------------------------------------------

/// Evaluate a report. Zone count is guaranteed by [`ZoneMinutes`], so this
/// cannot fail.
pub fn evaluate(report: &WorkoutReport) -> RecommendationResult {
  RecommendationResult {
    pace: pace_notes(&report.workout_type, &report.zone_minutes),
    duration: DurationNote::from_minutes(report.duration_minutes),
    cadence: CadenceNote::from_steps(report.cadence),
  }
}

pub fn pace_notes(workout_type: &WorkoutType, zones: &ZoneMinutes) -> Vec<PaceNote> {
  // Unknown types only get the section header.
  let Some(label) = workout_type.pace_label() else {
    return Vec::new();
  };

  match workout_type {
    WorkoutType::Light => light_pace(label, zones),
    WorkoutType::Marathon => marathon_pace(label, zones),
    WorkoutType::Tempo => tempo_pace(label, zones),
    WorkoutType::Interval => interval_pace(label, zones),
    WorkoutType::Repeated => repeated_pace(label, zones),
    WorkoutType::Unrecognized(_) => Vec::new(),
  }
}

/// Shared shape of the light, marathon and tempo rows: a primary verdict on
/// the target zone, then an acceleration warning if anything spilled over.
fn steady_pace(label: &'static str, target_minutes: f64, good: bool, spilled: bool) -> Vec<PaceNote> {
  if good {
    return vec![PaceNote::GoodPace];
  }

  let mut notes = Vec::with_capacity(2);
  if target_minutes < STEADY_TARGET_MIN {
    notes.push(PaceNote::RanLittle(label));
  } else {
    notes.push(PaceNote::RanEnough(label));
  }
  if spilled {
    notes.push(PaceNote::Acceleration);
  }
  notes
}

fn light_pace(label: &'static str, z: &ZoneMinutes) -> Vec<PaceNote> {
  let good = z[0] >= STEADY_TARGET_MIN
    && z[1] <= STEADY_SPILLOVER_MAX
    && z[2] == 0.0
    && z[3] == 0.0
    && z[4] == 0.0;
  let spilled = z[1] > STEADY_SPILLOVER_MAX || z[2] > 0.0 || z[3] > 0.0 || z[4] > 0.0;
  steady_pace(label, z[0], good, spilled)
}

fn marathon_pace(label: &'static str, z: &ZoneMinutes) -> Vec<PaceNote> {
  let good = z[1] >= STEADY_TARGET_MIN && z[2] <= STEADY_SPILLOVER_MAX && z[3] == 0.0 && z[4] == 0.0;
  let spilled = z[2] > STEADY_SPILLOVER_MAX || z[3] > 0.0 || z[4] > 0.0;
  steady_pace(label, z[1], good, spilled)
}

fn tempo_pace(label: &'static str, z: &ZoneMinutes) -> Vec<PaceNote> {
  let good = z[2] >= STEADY_TARGET_MIN && z[3] <= TEMPO_SPILLOVER_MAX && z[4] == 0.0;
  let spilled = z[3] > TEMPO_SPILLOVER_MAX || z[4] > 0.0;
  steady_pace(label, z[2], good, spilled)
}

fn interval_pace(label: &'static str, z: &ZoneMinutes) -> Vec<PaceNote> {
  if (INTERVAL_TARGET_MIN..=INTERVAL_TARGET_MAX).contains(&z[3]) && z[4] <= INTERVAL_SPILLOVER_MAX {
    return vec![PaceNote::GoodPace];
  }

  let mut notes = Vec::with_capacity(2);
  if z[3] < INTERVAL_TARGET_MIN {
    notes.push(PaceNote::RanLittle(label));
  } else if z[3] > INTERVAL_TARGET_MAX {
    notes.push(PaceNote::RanTooMuch(label));
  } else {
    notes.push(PaceNote::RanEnough(label));
  }
  if z[4] > INTERVAL_SPILLOVER_MAX {
    notes.push(PaceNote::Acceleration);
  }
  notes
}

fn repeated_pace(label: &'static str, z: &ZoneMinutes) -> Vec<PaceNote> {
  if (REPEATED_TARGET_MIN..=REPEATED_TARGET_MAX).contains(&z[4]) {
    return vec![PaceNote::GoodPace];
  }

  // The "too much" check reads zone 3, not zone 4. Kept as the rule table
  // defines it; see tests pinning this down.
  let note = if z[4] < REPEATED_TARGET_MIN {
    PaceNote::RanLittle(label)
  } else if z[3] > REPEATED_TARGET_MAX {
    PaceNote::RanTooMuch(label)
  } else {
    PaceNote::RanEnough(label)
  };
  vec![note]
}
