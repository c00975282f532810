use chrono::NaiveDate;

use crate::models::time_block::{TimeBlock, TimeBlockUpdate};
use crate::services::block_store::TimeBlockStore;
use crate::services::timetable::TimeTableHandler;

pub const NEW_BLOCK_TITLE: &str = "New block";

/// Applies grid requests to a block store for one day.
pub struct StoreHandler<'a, S: TimeBlockStore> {
    store: &'a mut S,
    date: NaiveDate,
    pub clicked: Option<TimeBlock>,
    pub deleted: Vec<String>,
    pub changed: bool,
    pub errors: Vec<String>,
}

impl<'a, S: TimeBlockStore> StoreHandler<'a, S> {
    pub fn new(store: &'a mut S, date: NaiveDate) -> Self {
        Self {
            store,
            date,
            clicked: None,
            deleted: Vec::new(),
            changed: false,
            errors: Vec::new(),
        }
    }

    fn record_error(&mut self, context: &str, err: anyhow::Error) {
        log::error!("{}: {:#}", context, err);
        self.errors.push(format!("{}: {}", context, err));
    }
}

impl<S: TimeBlockStore> TimeTableHandler for StoreHandler<'_, S> {
    fn on_block_create(&mut self, start_time: &str, end_time: &str) {
        let result = TimeBlock::builder()
            .title(NEW_BLOCK_TITLE)
            .date(self.date)
            .time_range(start_time, end_time)
            .build()
            .map_err(anyhow::Error::from)
            .and_then(|block| self.store.create(self.date, block));

        match result {
            Ok(block) => {
                self.changed = true;
                // Open the editor on the fresh block.
                self.clicked = Some(block);
            }
            Err(err) => self.record_error("Failed to create time block", err),
        }
    }

    fn on_block_click(&mut self, block: &TimeBlock) {
        self.clicked = Some(block.clone());
    }

    fn on_block_delete(&mut self, block_id: &str) {
        match self.store.delete(block_id) {
            Ok(()) => {
                log::info!("Deleted time block {}", block_id);
                self.changed = true;
                self.deleted.push(block_id.to_string());
            }
            Err(err) => self.record_error("Failed to delete time block", err),
        }
    }

    fn on_block_update(&mut self, block_id: &str, update: &TimeBlockUpdate) {
        match self.store.update(block_id, update) {
            Ok(block) => {
                log::info!("Updated time block {}", block.id);
                self.changed = true;
            }
            Err(err) => self.record_error("Failed to update time block", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::block_store::InMemoryBlockStore;
    use crate::services::timetable::{PointerReleaseHub, RowColumn, TimeTableGrid, TimeUnit};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn test_drag_creates_block_in_store() {
        let hub = PointerReleaseHub::new();
        let mut grid: TimeTableGrid<RowColumn> = TimeTableGrid::new(TimeUnit::Thirty, &hub);
        let mut store = InMemoryBlockStore::new();

        assert!(grid.pointer_down(RowColumn::new(9, 0)));
        grid.pointer_move(RowColumn::new(10, 1));
        hub.pointer_released();

        let mut handler = StoreHandler::new(&mut store, day());
        grid.dispatch(&mut handler);
        let clicked = handler.clicked.clone().unwrap();
        assert!(handler.changed);

        let blocks = store.blocks_for_day(day());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id, clicked.id);
        assert_eq!(blocks[0].title, NEW_BLOCK_TITLE);
        assert_eq!(blocks[0].start_time.as_deref(), Some("09:00"));
        assert_eq!(blocks[0].end_time.as_deref(), Some("11:00"));
    }

    #[test]
    fn test_failed_update_is_reported() {
        let mut store = InMemoryBlockStore::new();
        let mut handler = StoreHandler::new(&mut store, day());
        handler.on_block_update(
            "missing",
            &TimeBlockUpdate {
                title: Some("x".to_string()),
                ..Default::default()
            },
        );
        handler.on_block_delete("missing");

        assert!(!handler.changed);
        assert_eq!(handler.errors.len(), 2);
    }
}
