//! Error type for the time-table engine.

/// Errors produced by time parsing, unit selection and block validation.
///
/// None of these escape as panics: callers either propagate them or treat
/// the offending block as "not rendered".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimetableError {
    /// Input did not match zero-padded 24-hour `HH:MM`.
    #[error("invalid time format: {0:?} (expected HH:MM)")]
    InvalidTimeFormat(String),

    /// An end time that cannot close any hour row (`00:00`).
    #[error("invalid end time: {0:?}")]
    InvalidEndTime(String),

    /// Grid units are restricted to 5, 10, 15 or 30 minutes.
    #[error("unsupported time unit: {0} minutes")]
    UnsupportedUnit(u32),

    /// A range whose end does not come after its start.
    #[error("empty time range: {start} - {end}")]
    EmptyRange { start: String, end: String },

    /// A time-block that fails validation.
    #[error("invalid time block: {0}")]
    InvalidBlock(String),
}

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, TimetableError>;
