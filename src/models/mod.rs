pub mod training;
pub mod workout;

pub use training::{NewTrainingRecord, RecordId, TrainingRecord};
pub use workout::{WorkoutReport, WorkoutType, ZoneError, ZoneMinutes, ZONE_COUNT};
