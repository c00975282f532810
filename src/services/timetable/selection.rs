//! Drag-selection state machine.
//!
//! `Idle -> Dragging -> Idle`. A press anchors the selection, moves update
//! the current cell, and a release turns the normalized extremes into a
//! committed [`TimeRange`].

use super::cell::CellAddress;
use super::clock::ClockTime;
use super::config::{get_grid_config, GridConfig, TimeUnit, MINUTES_PER_DAY};
use super::error::{Result, TimetableError};

/// Committed clock range with `end > start`. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: ClockTime,
    end: ClockTime,
}

impl TimeRange {
    pub fn new(start: ClockTime, end: ClockTime) -> Result<Self> {
        if end <= start {
            return Err(TimetableError::EmptyRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    pub fn start_time(&self) -> String {
        self.start.to_string()
    }

    pub fn end_time(&self) -> String {
        self.end.to_string()
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes() - self.start.minutes()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState<A> {
    Idle,
    Dragging { anchor: A, current: A },
}

/// Selection gesture over one grid.
#[derive(Debug, Clone)]
pub struct DragSelection<A> {
    config: GridConfig,
    state: DragState<A>,
}

impl<A: CellAddress> DragSelection<A> {
    pub fn new(unit: TimeUnit) -> Self {
        Self {
            config: get_grid_config(unit),
            state: DragState::Idle,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn state(&self) -> DragState<A> {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start a gesture at `cell`. Any gesture already in flight is replaced.
    pub fn begin(&mut self, cell: A) {
        let cell = cell.clamp_to_grid(&self.config);
        self.state = DragState::Dragging {
            anchor: cell,
            current: cell,
        };
    }

    /// Follow the pointer. Returns whether the current cell changed.
    pub fn update(&mut self, cell: A) -> bool {
        let cell = cell.clamp_to_grid(&self.config);
        match &mut self.state {
            DragState::Dragging { current, .. } if *current != cell => {
                *current = cell;
                true
            }
            _ => false,
        }
    }

    /// Normalized `(min, max)` of the gesture in flight.
    pub fn bounds(&self) -> Option<(A, A)> {
        match self.state {
            DragState::Dragging { anchor, current } => Some(A::normalize(anchor, current)),
            DragState::Idle => None,
        }
    }

    pub fn is_in_selection(&self, cell: A) -> bool {
        self.bounds()
            .is_some_and(|(min, max)| cell.is_within(min, max, &self.config))
    }

    /// Range the gesture would commit if released now.
    pub fn preview(&self) -> Option<TimeRange> {
        let (min, max) = self.bounds()?;
        self.range_between(min, max).ok()
    }

    /// End the gesture. Returns the committed range, or `None` when idle or
    /// when the normalized extremes collapse to a single cell.
    pub fn release(&mut self) -> Option<TimeRange> {
        let (min, max) = self.bounds()?;
        self.state = DragState::Idle;

        if min == max {
            log::debug!("Discarding empty drag selection at {:?}", min);
            return None;
        }
        match self.range_between(min, max) {
            Ok(range) => Some(range),
            Err(err) => {
                log::debug!("Discarding drag selection: {}", err);
                None
            }
        }
    }

    fn range_between(&self, min: A, max: A) -> Result<TimeRange> {
        let unit = self.config.unit;
        let start = min.to_minutes(unit);
        // End is exclusive: one unit past the last selected cell
        let end = (max.to_minutes(unit) + unit.minutes()).min(MINUTES_PER_DAY);
        TimeRange::new(ClockTime::from_minutes(start), ClockTime::from_minutes(end))
    }
}
