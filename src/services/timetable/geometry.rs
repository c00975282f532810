//! Pixel geometry for rendering blocks and hit-testing the pointer.

use super::cell::{CellAddress, LinearCell, RowColumn};
use super::clock::ClockTime;
use super::config::{GridConfig, TimeUnit};
use super::error::Result;
use crate::models::time_block::TimeBlock;

/// Vertical placement of an absolutely positioned block in flat mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockGeometry {
    pub top: f32,
    pub height: f32,
}

impl BlockGeometry {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Offset of the cell containing `start_time`.
pub fn calculate_block_top(start_time: &str, unit: TimeUnit, cell_height: f32) -> Result<f32> {
    let start = ClockTime::parse(start_time)?;
    Ok(cell_of(start, unit) as f32 * cell_height)
}

/// Height covering the cells from start to end, never less than one cell.
pub fn calculate_block_height(
    start_time: &str,
    end_time: &str,
    unit: TimeUnit,
    cell_height: f32,
) -> Result<f32> {
    let start = ClockTime::parse(start_time)?;
    let end = ClockTime::parse_end(end_time)?;
    Ok(height_between(start, end, unit, cell_height))
}

fn cell_of(time: ClockTime, unit: TimeUnit) -> u32 {
    LinearCell::from_minutes(time.minutes(), unit).index()
}

fn height_between(start: ClockTime, end: ClockTime, unit: TimeUnit, cell_height: f32) -> f32 {
    let cells = cell_of(end, unit).saturating_sub(cell_of(start, unit));
    (cells as f32 * cell_height).max(cell_height)
}

/// Geometry of a block on the flat surface, or `None` if it is not placed.
pub fn block_geometry(block: &TimeBlock, config: &GridConfig) -> Option<BlockGeometry> {
    if !block.is_timed() {
        return None;
    }
    match block.clock_range() {
        Ok(Some((start, end))) => Some(BlockGeometry {
            top: cell_of(start, config.unit) as f32 * config.cell_height,
            height: height_between(start, end, config.unit, config.cell_height),
        }),
        Ok(None) => None,
        Err(err) => {
            log::warn!("Not rendering time block {}: {}", block.id, err);
            None
        }
    }
}

/// Highlight covering the selected cells `min..=max`.
pub fn selection_geometry(min: LinearCell, max: LinearCell, config: &GridConfig) -> BlockGeometry {
    let (min, max) = LinearCell::normalize(min, max);
    BlockGeometry {
        top: min.index() as f32 * config.cell_height,
        height: (max.index() - min.index() + 1) as f32 * config.cell_height,
    }
}

/// Pixel layout of the per-hour grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    pub row_height: f32,
    pub column_width: f32,
}

impl RowLayout {
    /// Split `width` evenly into the unit's sub-columns.
    pub fn fit(width: f32, row_height: f32, config: &GridConfig) -> Self {
        Self {
            row_height,
            column_width: width / config.cells_per_hour as f32,
        }
    }

    pub fn total_height(&self) -> f32 {
        self.row_height * 24.0
    }

    /// Cell under `(x, y)`, clamped to the grid.
    pub fn cell_at(&self, x: f32, y: f32, config: &GridConfig) -> RowColumn {
        let to_index = |value: f32, size: f32| {
            let index = (value / size).floor();
            if index.is_nan() || index < 0.0 {
                0
            } else {
                index as u32
            }
        };
        RowColumn::new(to_index(y, self.row_height), to_index(x, self.column_width))
            .clamp_to_grid(config)
    }

    /// `(x, y, width, height)` of a run of `col_span` columns.
    pub fn span_rect(&self, hour: u32, column: u32, col_span: u32) -> (f32, f32, f32, f32) {
        (
            column as f32 * self.column_width,
            hour as f32 * self.row_height,
            col_span as f32 * self.column_width,
            self.row_height,
        )
    }
}
