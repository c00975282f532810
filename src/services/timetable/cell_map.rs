//! Row-span cell map for the per-hour grid.
//!
//! Every column a block covers gets an entry so occupancy checks are O(1).
//! Only the first entry of each run is rendered; it spans `col_span`
//! columns and the rest of the run is skipped.

use std::collections::HashMap;

use super::cell::{end_clock_to_row_column, row_range, CellAddress, RowColumn};
use super::config::{get_grid_config, GridConfig, TimeUnit};
use crate::models::time_block::TimeBlock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMapEntry {
    pub block_id: String,
    pub is_first_cell: bool,
    pub col_span: u32,
}

/// A rendered run inside one hour row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSegment {
    pub hour: u32,
    pub column: u32,
    pub col_span: u32,
    pub block_id: String,
}

/// Occupancy of the hour-row grid for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct CellMap {
    config: GridConfig,
    entries: HashMap<RowColumn, CellMapEntry>,
}

impl CellMap {
    pub fn new(unit: TimeUnit) -> Self {
        Self {
            config: get_grid_config(unit),
            entries: HashMap::new(),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn get(&self, hour: u32, column: u32) -> Option<&CellMapEntry> {
        self.entries.get(&RowColumn::new(hour, column))
    }

    pub fn entry_at(&self, cell: RowColumn) -> Option<&CellMapEntry> {
        self.entries.get(&cell)
    }

    pub fn is_occupied(&self, cell: RowColumn) -> bool {
        self.entries.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Place one block. Cells already claimed by another block are
    /// overwritten.
    pub fn insert_block(&mut self, block: &TimeBlock) {
        let Some((start, end)) = block_extent(block, self.config.unit) else {
            return;
        };

        let last_column = self.config.last_column();
        for hour in start.hour..=end.hour {
            let (first, last) = row_range(hour, start, end, last_column);
            let col_span = last - first + 1;
            for column in first..=last {
                let entry = CellMapEntry {
                    block_id: block.id.clone(),
                    is_first_cell: column == first,
                    col_span,
                };
                if let Some(previous) = self.entries.insert(RowColumn::new(hour, column), entry) {
                    log::trace!(
                        "cell ({}, {}) taken over by {} from {}",
                        hour,
                        column,
                        block.id,
                        previous.block_id
                    );
                }
            }
        }
    }

    /// Runs to render in `hour`, left to right.
    pub fn row_segments(&self, hour: u32) -> Vec<RowSegment> {
        let mut segments = Vec::new();
        let mut column = 0;
        while column < self.config.cells_per_hour {
            match self.get(hour, column) {
                Some(entry) if entry.is_first_cell => {
                    segments.push(RowSegment {
                        hour,
                        column,
                        col_span: entry.col_span,
                        block_id: entry.block_id.clone(),
                    });
                    column += entry.col_span.max(1);
                }
                _ => column += 1,
            }
        }
        segments
    }
}

/// Build the cell map for all placeable blocks, in order.
pub fn build_cell_map(blocks: &[TimeBlock], unit: TimeUnit) -> CellMap {
    let mut map = CellMap::new(unit);
    for block in blocks {
        map.insert_block(block);
    }
    map
}

/// First and last covered cells of a block, or `None` when it cannot be
/// placed on the grid.
fn block_extent(block: &TimeBlock, unit: TimeUnit) -> Option<(RowColumn, RowColumn)> {
    if !block.is_timed() {
        return None;
    }
    let (start, end) = match block.clock_range() {
        Ok(Some(range)) => range,
        Ok(None) => return None,
        Err(err) => {
            log::warn!("Skipping time block {}: {}", block.id, err);
            return None;
        }
    };
    if end <= start {
        log::warn!(
            "Skipping time block {}: end {} is not after start {}",
            block.id,
            end,
            start
        );
        return None;
    }

    if !start.is_aligned(unit) || !end.is_aligned(unit) {
        log::trace!("Snapping time block {} outward to {} cells", block.id, unit);
    }

    let first = RowColumn::from_minutes(start.minutes(), unit);
    let last = end_clock_to_row_column(end, unit)?;
    (first <= last).then_some((first, last))
}
