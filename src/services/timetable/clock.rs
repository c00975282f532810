//! Clock-time parsing, formatting and flat cell conversion.
//!
//! Times are zero-padded 24-hour `HH:MM` strings with no timezone. Internally
//! they are held as a minute of the day.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::config::{TimeUnit, MINUTES_PER_DAY, MINUTES_PER_HOUR};
use super::error::{Result, TimetableError};

/// A minute of the day in `0..=1440`.
///
/// `1440` is only produced as an exclusive end ("24:00").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY);

    /// Build from a minute of the day. Values past 24:00 saturate.
    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes.min(MINUTES_PER_DAY))
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self(hour * MINUTES_PER_HOUR + minute))
    }

    /// Parse a start-of-cell time. Hours must be `00..=23`.
    pub fn parse(input: &str) -> Result<Self> {
        let (hour, minute) = split_hm(input)?;
        Self::from_hm(hour, minute)
            .ok_or_else(|| TimetableError::InvalidTimeFormat(input.to_string()))
    }

    /// Parse an exclusive end time, which may also be `24:00`.
    pub fn parse_end(input: &str) -> Result<Self> {
        match split_hm(input)? {
            (24, 0) => Ok(Self::END_OF_DAY),
            _ => Self::parse(input),
        }
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / MINUTES_PER_HOUR
    }

    pub fn minute(self) -> u32 {
        self.0 % MINUTES_PER_HOUR
    }

    pub fn is_aligned(self, unit: TimeUnit) -> bool {
        self.0 % unit.minutes() == 0
    }
}

fn split_hm(input: &str) -> Result<(u32, u32)> {
    let invalid = || TimetableError::InvalidTimeFormat(input.to_string());
    let bytes = input.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    let digits = |s: &[u8]| -> Option<u32> {
        s.iter().try_fold(0u32, |acc, b| {
            b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
        })
    };
    let hour = digits(&bytes[0..2]).ok_or_else(invalid)?;
    let minute = digits(&bytes[3..5]).ok_or_else(invalid)?;
    Ok((hour, minute))
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_end(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimetableError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

/// Flat cell index containing `time`.
pub fn time_to_cell_index(time: &str, unit: TimeUnit) -> Result<u32> {
    let time = ClockTime::parse(time)?;
    Ok(time.minutes() / unit.minutes())
}

/// Start time of flat cell `index`. `index == total_cells` yields "24:00".
pub fn cell_index_to_time(index: u32, unit: TimeUnit) -> String {
    ClockTime::from_minutes(index * unit.minutes()).to_string()
}

/// 12-hour display form, e.g. "2:30 PM".
pub fn format_time_display(time: &str) -> Result<String> {
    let time = ClockTime::parse_end(time)?;
    let hour = time.hour() % 24;
    let period = if hour < 12 { "AM" } else { "PM" };
    Ok(format!(
        "{}:{:02} {}",
        twelve_hour(hour),
        time.minute(),
        period
    ))
}

/// Row labels "12 AM" through "11 PM".
pub fn hour_labels() -> Vec<String> {
    (0..24)
        .map(|hour| {
            let period = if hour < 12 { "AM" } else { "PM" };
            format!("{} {}", twelve_hour(hour), period)
        })
        .collect()
}

fn twelve_hour(hour: u32) -> u32 {
    match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    }
}
