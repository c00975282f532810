//! Cell addressing for both grid layouts.
//!
//! A cell is either a flat index over the whole day or an `(hour, column)`
//! pair within an hour row. Both share the same conversion capability through
//! [`CellAddress`], so the selection machinery is written once.

use std::fmt::Debug;

use super::clock::ClockTime;
use super::config::{GridConfig, TimeUnit, MINUTES_PER_HOUR};
use super::error::{Result, TimetableError};

/// Capabilities shared by every cell addressing mode.
pub trait CellAddress: Copy + PartialEq + Debug {
    /// Whether a press on a cell owned by a block may start a selection.
    const DRAG_OVER_BLOCKS: bool;

    /// Minute of the day at which the cell starts.
    fn to_minutes(self, unit: TimeUnit) -> u32;

    /// Cell containing `minutes`.
    fn from_minutes(minutes: u32, unit: TimeUnit) -> Self;

    /// Pull an out-of-range address back onto the grid.
    fn clamp_to_grid(self, config: &GridConfig) -> Self;

    /// Order two cells into `(min, max)` extremes.
    fn normalize(a: Self, b: Self) -> (Self, Self);

    /// Whether the cell lies in the selection spanned by `min..=max`.
    fn is_within(self, min: Self, max: Self, config: &GridConfig) -> bool;

    fn to_row_column(self, unit: TimeUnit) -> RowColumn {
        RowColumn::from_minutes(self.to_minutes(unit), unit)
    }
}

/// Flat cell index, `hour * cells_per_hour + column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinearCell(pub u32);

impl LinearCell {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl CellAddress for LinearCell {
    const DRAG_OVER_BLOCKS: bool = true;

    fn to_minutes(self, unit: TimeUnit) -> u32 {
        self.0 * unit.minutes()
    }

    fn from_minutes(minutes: u32, unit: TimeUnit) -> Self {
        LinearCell(minutes / unit.minutes())
    }

    fn clamp_to_grid(self, config: &GridConfig) -> Self {
        LinearCell(self.0.min(config.last_cell()))
    }

    fn normalize(a: Self, b: Self) -> (Self, Self) {
        (a.min(b), a.max(b))
    }

    fn is_within(self, min: Self, max: Self, _config: &GridConfig) -> bool {
        min <= self && self <= max
    }
}

/// One sub-column of an hour row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowColumn {
    pub hour: u32,
    pub column: u32,
}

impl RowColumn {
    pub fn new(hour: u32, column: u32) -> Self {
        Self { hour, column }
    }
}

impl CellAddress for RowColumn {
    const DRAG_OVER_BLOCKS: bool = false;

    fn to_minutes(self, unit: TimeUnit) -> u32 {
        self.hour * MINUTES_PER_HOUR + self.column * unit.minutes()
    }

    fn from_minutes(minutes: u32, unit: TimeUnit) -> Self {
        Self {
            hour: minutes / MINUTES_PER_HOUR,
            column: (minutes % MINUTES_PER_HOUR) / unit.minutes(),
        }
    }

    fn clamp_to_grid(self, config: &GridConfig) -> Self {
        Self {
            hour: self.hour.min(23),
            column: self.column.min(config.last_column()),
        }
    }

    // Hours and columns are ordered independently.
    fn normalize(a: Self, b: Self) -> (Self, Self) {
        (
            Self::new(a.hour.min(b.hour), a.column.min(b.column)),
            Self::new(a.hour.max(b.hour), a.column.max(b.column)),
        )
    }

    fn is_within(self, min: Self, max: Self, config: &GridConfig) -> bool {
        if self.hour < min.hour || self.hour > max.hour {
            return false;
        }
        let (first, last) = row_range(self.hour, min, max, config.last_column());
        first <= self.column && self.column <= last
    }
}

/// Occupied column range of `hour` for a run from `start` to `end`.
///
/// Single rows keep both ends, the first row runs to the last column, the
/// last row starts at column zero and middle rows take the whole hour.
pub(crate) fn row_range(hour: u32, start: RowColumn, end: RowColumn, last_column: u32) -> (u32, u32) {
    let is_first = hour == start.hour;
    let is_last = hour == end.hour;
    match (is_first, is_last) {
        (true, true) => (start.column, end.column),
        (true, false) => (start.column, last_column),
        (false, true) => (0, end.column),
        (false, false) => (0, last_column),
    }
}

/// Row and column containing a start time.
pub fn time_to_row_column(time: &str, unit: TimeUnit) -> Result<RowColumn> {
    let time = ClockTime::parse(time)?;
    Ok(RowColumn::from_minutes(time.minutes(), unit))
}

/// Last cell covered by an exclusive end time.
///
/// An end on the hour closes the previous row rather than opening the next:
/// `10:00` ends at `(9, last)`. Any other minute rounds up to the column it
/// reaches into.
pub fn end_time_to_row_column(time: &str, unit: TimeUnit) -> Result<RowColumn> {
    let end = ClockTime::parse_end(time)?;
    end_clock_to_row_column(end, unit)
        .ok_or_else(|| TimetableError::InvalidEndTime(time.to_string()))
}

pub(crate) fn end_clock_to_row_column(end: ClockTime, unit: TimeUnit) -> Option<RowColumn> {
    if end.minute() == 0 {
        let hour = end.hour().checked_sub(1)?;
        Some(RowColumn::new(hour, unit.cells_per_hour() - 1))
    } else {
        let column = end.minute().div_ceil(unit.minutes()) - 1;
        Some(RowColumn::new(end.hour(), column))
    }
}
