// Integration tests for the time-table grid
// Drives grids, the release hub and the block store together

mod fixtures;

use fixtures::{blocks, dates};
use planner_timetable::models::time_block::{TimeBlock, TimeBlockUpdate};
use planner_timetable::services::block_store::{InMemoryBlockStore, TimeBlockStore};
use planner_timetable::services::timetable::{
    build_cell_map, calculate_block_height, calculate_block_top, cell_index_to_time,
    get_grid_config, time_to_cell_index, LinearCell, PointerReleaseHub, RowColumn, RowSegment,
    TimeTableGrid, TimeTableHandler, TimeUnit,
};
use pretty_assertions::assert_eq;

/// Records creations and clicks.
#[derive(Default)]
struct Recorder {
    created: Vec<(String, String)>,
    clicked: Vec<String>,
}

impl TimeTableHandler for Recorder {
    fn on_block_create(&mut self, start_time: &str, end_time: &str) {
        self.created.push((start_time.to_string(), end_time.to_string()));
    }

    fn on_block_click(&mut self, block: &TimeBlock) {
        self.clicked.push(block.id.clone());
    }

    fn on_block_delete(&mut self, _block_id: &str) {}

    fn on_block_update(&mut self, _block_id: &str, _update: &TimeBlockUpdate) {}
}

/// Adapter writing grid requests into a store, as a host would.
struct StoreHost<'a> {
    store: &'a mut InMemoryBlockStore,
    day: chrono::NaiveDate,
}

impl TimeTableHandler for StoreHost<'_> {
    fn on_block_create(&mut self, start_time: &str, end_time: &str) {
        let block = TimeBlock::builder()
            .title("New block")
            .time_range(start_time, end_time)
            .build()
            .unwrap();
        self.store.create(self.day, block).unwrap();
    }

    fn on_block_click(&mut self, _block: &TimeBlock) {}

    fn on_block_delete(&mut self, block_id: &str) {
        self.store.delete(block_id).unwrap();
    }

    fn on_block_update(&mut self, block_id: &str, update: &TimeBlockUpdate) {
        self.store.update(block_id, update).unwrap();
    }
}

#[test]
fn test_every_cell_round_trips_through_time() {
    for unit in TimeUnit::ALL {
        let config = get_grid_config(unit);
        for index in 0..config.total_cells {
            let time = cell_index_to_time(index, unit);
            assert_eq!(time_to_cell_index(&time, unit).unwrap(), index, "{} at {}", time, unit);
        }
    }
}

#[test]
fn test_ten_minute_grid_config() {
    let config = get_grid_config(TimeUnit::Ten);
    assert_eq!(config.cells_per_hour, 6);
    assert_eq!(config.total_cells, 144);
    assert_eq!(config.cell_height, 40.0);
    assert_eq!(config.total_height, 5760.0);
}

#[test]
fn test_cell_map_for_reference_blocks() {
    let map = build_cell_map(
        &[blocks::single_row(), blocks::spanning(), blocks::ends_on_hour()],
        TimeUnit::Ten,
    );

    // Later blocks win contested cells, so check each block on its own too.
    let single = build_cell_map(&[blocks::single_row()], TimeUnit::Ten);
    assert_eq!(
        single.row_segments(9),
        vec![RowSegment {
            hour: 9,
            column: 2,
            col_span: 3,
            block_id: "single".to_string(),
        }]
    );

    let spanning = build_cell_map(&[blocks::spanning()], TimeUnit::Ten);
    assert_eq!(spanning.row_segments(9)[0].column, 4);
    assert_eq!(spanning.row_segments(9)[0].col_span, 2);
    assert_eq!(spanning.row_segments(10)[0].column, 0);
    assert_eq!(spanning.row_segments(10)[0].col_span, 2);
    assert!(spanning.get(10, 2).is_none());

    let on_hour = build_cell_map(&[blocks::ends_on_hour()], TimeUnit::Ten);
    assert_eq!(on_hour.row_segments(9)[0].column, 3);
    assert_eq!(on_hour.row_segments(9)[0].col_span, 3);
    assert!(on_hour.row_segments(10).is_empty());

    // Combined: the last inserted block owns 09:30-09:59.
    assert_eq!(map.get(9, 2).unwrap().block_id, "single");
    assert_eq!(map.get(9, 5).unwrap().block_id, "on-hour");
    assert_eq!(map.get(10, 1).unwrap().block_id, "spanning");
}

#[test]
fn test_flat_drag_creates_one_hour_block() {
    let hub = PointerReleaseHub::new();
    let mut grid: TimeTableGrid<LinearCell> = TimeTableGrid::new(TimeUnit::Ten, &hub);
    let mut recorder = Recorder::default();

    assert!(grid.pointer_down(LinearCell(54)));
    for index in 55..=59 {
        grid.pointer_move(LinearCell(index));
    }
    hub.pointer_released();
    grid.dispatch(&mut recorder);

    assert_eq!(
        recorder.created,
        vec![("09:00".to_string(), "10:00".to_string())]
    );
}

#[test]
fn test_click_without_drag_creates_nothing() {
    let hub = PointerReleaseHub::new();
    let mut flat: TimeTableGrid<LinearCell> = TimeTableGrid::new(TimeUnit::Ten, &hub);
    let mut rows: TimeTableGrid<RowColumn> = TimeTableGrid::new(TimeUnit::Ten, &hub);
    let mut recorder = Recorder::default();

    flat.pointer_down(LinearCell(54));
    rows.pointer_down(RowColumn::new(9, 0));
    hub.pointer_released();
    flat.dispatch(&mut recorder);
    rows.dispatch(&mut recorder);

    assert!(recorder.created.is_empty());
    assert!(!flat.is_dragging());
    assert!(!rows.is_dragging());
}

#[test]
fn test_flat_block_geometry() {
    assert_eq!(calculate_block_top("09:00", TimeUnit::Ten, 40.0).unwrap(), 2160.0);
    assert_eq!(
        calculate_block_height("09:00", "10:30", TimeUnit::Ten, 40.0).unwrap(),
        360.0
    );
}

#[test]
fn test_release_outside_grid_commits_every_live_drag() {
    let hub = PointerReleaseHub::new();
    let mut first: TimeTableGrid<RowColumn> = TimeTableGrid::new(TimeUnit::Fifteen, &hub);
    let mut second: TimeTableGrid<LinearCell> = TimeTableGrid::new(TimeUnit::Fifteen, &hub);

    first.pointer_down(RowColumn::new(8, 0));
    first.pointer_move(RowColumn::new(8, 1));
    second.pointer_down(LinearCell(40));
    second.pointer_move(LinearCell(43));
    hub.pointer_released();

    let mut recorder = Recorder::default();
    first.dispatch(&mut recorder);
    second.dispatch(&mut recorder);
    assert_eq!(
        recorder.created,
        vec![
            ("08:00".to_string(), "08:30".to_string()),
            ("10:00".to_string(), "11:00".to_string()),
        ]
    );
}

#[test]
fn test_dropped_grid_stops_listening() {
    let hub = PointerReleaseHub::new();
    {
        let mut grid: TimeTableGrid<LinearCell> = TimeTableGrid::new(TimeUnit::Ten, &hub);
        grid.pointer_down(LinearCell(1));
        assert_eq!(hub.listener_count(), 1);
    }
    assert_eq!(hub.listener_count(), 0);
    hub.pointer_released();
}

#[test]
fn test_row_grid_refuses_drag_from_block_but_clicks_it() {
    let hub = PointerReleaseHub::new();
    let mut grid: TimeTableGrid<RowColumn> = TimeTableGrid::new(TimeUnit::Ten, &hub);
    grid.set_blocks(vec![blocks::single_row()]);

    assert!(!grid.pointer_down(RowColumn::new(9, 3)));
    assert!(grid.click_block("single"));

    let mut recorder = Recorder::default();
    grid.dispatch(&mut recorder);
    assert_eq!(recorder.clicked, vec!["single".to_string()]);
    assert!(recorder.created.is_empty());
}

#[test]
fn test_end_to_end_through_store() {
    let mut store = InMemoryBlockStore::from_json(blocks::workday_json(), dates::monday()).unwrap();
    let hub = PointerReleaseHub::new();
    let mut grid: TimeTableGrid<RowColumn> = TimeTableGrid::new(TimeUnit::Thirty, &hub);
    grid.set_blocks(store.blocks_for_day(dates::monday()));
    assert_eq!(grid.blocks().len(), 2);
    assert_eq!(store.blocks_for_day(dates::tuesday()).len(), 1);

    // Drag out 14:00-15:00 on an empty afternoon.
    assert!(grid.pointer_down(RowColumn::new(14, 0)));
    grid.pointer_move(RowColumn::new(14, 1));
    grid.pointer_up();
    grid.update_block(
        "b1",
        TimeBlockUpdate {
            title: Some("Daily standup".to_string()),
            ..Default::default()
        },
    );
    grid.delete_block("b2");

    let day = dates::monday();
    grid.dispatch(&mut StoreHost {
        store: &mut store,
        day,
    });
    grid.set_blocks(store.blocks_for_day(day));

    let titles: Vec<(&str, Option<&str>)> = grid
        .blocks()
        .iter()
        .map(|block| (block.title.as_str(), block.start_time.as_deref()))
        .collect();
    assert_eq!(
        titles,
        vec![("Daily standup", Some("09:00")), ("New block", Some("14:00"))]
    );
    assert!(grid.cell_map().is_occupied(RowColumn::new(14, 1)));
    assert!(!grid.cell_map().is_occupied(RowColumn::new(10, 0)));
}

#[test]
fn test_workday_cell_map_skips_all_day_block() {
    let workday = blocks::workday();
    let map = build_cell_map(&workday, TimeUnit::Fifteen);

    assert!(map.row_segments(0).is_empty());
    assert!(!map.is_empty());
    assert!(map.get(13, 0).is_none());
    assert_eq!(map.get(12, 0).unwrap().block_id, "b3");
    // 17:45-18:30 splits into the last column of 17 and two of 18.
    assert_eq!(map.row_segments(17).last().unwrap().col_span, 1);
    assert_eq!(map.row_segments(18)[0].col_span, 2);
}
