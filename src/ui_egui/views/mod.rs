pub mod flat_time_table_view;
mod palette;
pub mod time_table_view;
pub mod utils;

pub use flat_time_table_view::FlatTimeTableView;
pub use palette::TimeTablePalette;
pub use time_table_view::RowTimeTableView;
