//! Daily time-table grid engine.
//!
//! Converts clock time to grid cells in two addressing modes (a flat index
//! over the day, or hour rows with sub-columns), lays time-blocks onto the
//! grid and turns pointer drags into committed time ranges.

pub mod cell;
pub mod cell_map;
pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod release;
pub mod selection;

pub use cell::{end_time_to_row_column, time_to_row_column, CellAddress, LinearCell, RowColumn};
pub use cell_map::{build_cell_map, CellMap, CellMapEntry, RowSegment};
pub use clock::{
    cell_index_to_time, format_time_display, hour_labels, time_to_cell_index, ClockTime,
};
pub use config::{get_grid_config, GridConfig, TimeUnit};
pub use error::TimetableError;
pub use geometry::{
    block_geometry, calculate_block_height, calculate_block_top, selection_geometry,
    BlockGeometry, RowLayout,
};
pub use grid::{TimeTableGrid, TimeTableHandler, TimeTableInteraction};
pub use release::{PointerReleaseHub, ReleaseSubscription};
pub use selection::{DragSelection, DragState, TimeRange};
