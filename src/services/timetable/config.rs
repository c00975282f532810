//! Grid geometry derived from the time unit.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cell::LinearCell;
use super::error::TimetableError;

pub const MINUTES_PER_HOUR: u32 = 60;
pub const HOURS_PER_DAY: u32 = 24;
pub const MINUTES_PER_DAY: u32 = MINUTES_PER_HOUR * HOURS_PER_DAY;

/// Minute granularity of one grid cell.
///
/// The set is closed so that `60 / unit` is always an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeUnit {
    Five,
    #[default]
    Ten,
    Fifteen,
    Thirty,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Five,
        TimeUnit::Ten,
        TimeUnit::Fifteen,
        TimeUnit::Thirty,
    ];

    pub fn minutes(self) -> u32 {
        match self {
            TimeUnit::Five => 5,
            TimeUnit::Ten => 10,
            TimeUnit::Fifteen => 15,
            TimeUnit::Thirty => 30,
        }
    }

    pub fn cells_per_hour(self) -> u32 {
        MINUTES_PER_HOUR / self.minutes()
    }
}

impl TryFrom<u32> for TimeUnit {
    type Error = TimetableError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            5 => Ok(TimeUnit::Five),
            10 => Ok(TimeUnit::Ten),
            15 => Ok(TimeUnit::Fifteen),
            30 => Ok(TimeUnit::Thirty),
            other => Err(TimetableError::UnsupportedUnit(other)),
        }
    }
}

impl From<TimeUnit> for u32 {
    fn from(unit: TimeUnit) -> Self {
        unit.minutes()
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.minutes())
    }
}

/// Cell geometry constants for one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub unit: TimeUnit,
    pub cells_per_hour: u32,
    pub total_cells: u32,
    /// Pixels per cell in flat mode
    pub cell_height: f32,
    pub total_height: f32,
}

/// Build the geometry record for `unit`.
pub fn get_grid_config(unit: TimeUnit) -> GridConfig {
    let cells_per_hour = unit.cells_per_hour();
    let total_cells = HOURS_PER_DAY * cells_per_hour;
    // Four pixels per minute regardless of unit
    let cell_height = match unit {
        TimeUnit::Five => 20.0,
        TimeUnit::Ten => 40.0,
        TimeUnit::Fifteen => 60.0,
        TimeUnit::Thirty => 120.0,
    };

    GridConfig {
        unit,
        cells_per_hour,
        total_cells,
        cell_height,
        total_height: total_cells as f32 * cell_height,
    }
}

impl GridConfig {
    /// Index of the last cell of the day.
    pub fn last_cell(&self) -> u32 {
        self.total_cells - 1
    }

    /// Index of the last column of an hour row.
    pub fn last_column(&self) -> u32 {
        self.cells_per_hour - 1
    }

    /// Height of one hour in flat mode.
    pub fn hour_height(&self) -> f32 {
        self.cell_height * self.cells_per_hour as f32
    }

    /// Flat cell under a vertical pixel offset, clamped to the grid.
    pub fn linear_cell_at(&self, y: f32) -> LinearCell {
        let index = (y / self.cell_height).floor();
        if index.is_nan() || index < 0.0 {
            return LinearCell(0);
        }
        LinearCell((index as u32).min(self.last_cell()))
    }
}
