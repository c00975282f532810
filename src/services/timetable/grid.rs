//! The time-table grid component.
//!
//! Owns one day's blocks, the drag gesture and the derived cell map, and
//! collects the requests it makes of the host (create, click, delete,
//! update) into a [`TimeTableInteraction`] that the host drains after each
//! event or frame.

use std::cell::RefCell;
use std::rc::Rc;

use super::cell::{CellAddress, RowColumn};
use super::cell_map::{build_cell_map, CellMap};
use super::config::{GridConfig, TimeUnit};
use super::release::{PointerReleaseHub, ReleaseSubscription};
use super::selection::{DragSelection, TimeRange};
use crate::models::time_block::{TimeBlock, TimeBlockUpdate};

/// Callbacks the host view exposes to the grid.
pub trait TimeTableHandler {
    /// A drag produced a non-empty range.
    fn on_block_create(&mut self, start_time: &str, end_time: &str);

    /// A rendered block was clicked outside of a drag.
    fn on_block_click(&mut self, block: &TimeBlock);

    fn on_block_delete(&mut self, block_id: &str);

    fn on_block_update(&mut self, block_id: &str, update: &TimeBlockUpdate);
}

/// Requests collected from the grid since the last drain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeTableInteraction {
    /// Committed drag selections, oldest first
    pub created: Vec<TimeRange>,
    /// Block clicked for editing
    pub clicked: Option<TimeBlock>,
    pub deleted: Vec<String>,
    pub updated: Vec<(String, TimeBlockUpdate)>,
}

impl TimeTableInteraction {
    /// Merge another result into this one.
    pub fn merge(&mut self, other: TimeTableInteraction) {
        self.created.extend(other.created);
        if other.clicked.is_some() {
            self.clicked = other.clicked;
        }
        self.deleted.extend(other.deleted);
        self.updated.extend(other.updated);
    }

    /// Check if any action needs to be processed.
    pub fn has_actions(&self) -> bool {
        !self.created.is_empty()
            || self.clicked.is_some()
            || !self.deleted.is_empty()
            || !self.updated.is_empty()
    }

    /// Deliver every request to `handler`.
    pub fn apply(self, handler: &mut impl TimeTableHandler) {
        for range in &self.created {
            handler.on_block_create(&range.start_time(), &range.end_time());
        }
        if let Some(block) = &self.clicked {
            handler.on_block_click(block);
        }
        for (id, update) in &self.updated {
            handler.on_block_update(id, update);
        }
        for id in &self.deleted {
            handler.on_block_delete(id);
        }
    }
}

struct GridState<A> {
    selection: DragSelection<A>,
    outbox: TimeTableInteraction,
}

impl<A: CellAddress> GridState<A> {
    fn commit_drag(&mut self) {
        if let Some(range) = self.selection.release() {
            log::debug!(
                "Committing time block selection {} - {}",
                range.start(),
                range.end()
            );
            self.outbox.created.push(range);
        }
    }
}

/// One day's time-table in a given addressing mode.
pub struct TimeTableGrid<A: CellAddress + 'static> {
    state: Rc<RefCell<GridState<A>>>,
    blocks: Vec<TimeBlock>,
    cell_map: RefCell<Option<Rc<CellMap>>>,
    _release: ReleaseSubscription,
}

impl<A: CellAddress + 'static> TimeTableGrid<A> {
    /// Create a grid listening for releases on `hub` until it is dropped.
    pub fn new(unit: TimeUnit, hub: &PointerReleaseHub) -> Self {
        let state = Rc::new(RefCell::new(GridState {
            selection: DragSelection::new(unit),
            outbox: TimeTableInteraction::default(),
        }));

        let weak = Rc::downgrade(&state);
        let release = hub.subscribe(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().commit_drag();
            }
        });

        Self {
            state,
            blocks: Vec::new(),
            cell_map: RefCell::new(None),
            _release: release,
        }
    }

    pub fn unit(&self) -> TimeUnit {
        self.config().unit
    }

    pub fn config(&self) -> GridConfig {
        *self.state.borrow().selection.config()
    }

    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    pub fn block(&self, block_id: &str) -> Option<&TimeBlock> {
        self.blocks.iter().find(|block| block.id == block_id)
    }

    /// Replace the day's blocks, e.g. after the store changed.
    pub fn set_blocks(&mut self, blocks: Vec<TimeBlock>) {
        self.blocks = blocks;
        self.cell_map.replace(None);
    }

    /// Switch granularity. Any gesture in flight is dropped.
    pub fn set_unit(&mut self, unit: TimeUnit) {
        if unit == self.unit() {
            return;
        }
        self.state.borrow_mut().selection = DragSelection::new(unit);
        self.cell_map.replace(None);
    }

    /// Cell map derived from the current blocks and unit.
    pub fn cell_map(&self) -> Rc<CellMap> {
        let mut cached = self.cell_map.borrow_mut();
        if let Some(map) = cached.as_ref() {
            return Rc::clone(map);
        }
        log::debug!(
            "Rebuilding cell map for {} blocks at {}",
            self.blocks.len(),
            self.unit()
        );
        let map = Rc::new(build_cell_map(&self.blocks, self.unit()));
        *cached = Some(Rc::clone(&map));
        map
    }

    /// Block owning the cell, if any.
    pub fn block_at(&self, cell: A) -> Option<&TimeBlock> {
        let map = self.cell_map();
        let entry = map.entry_at(cell.to_row_column(self.unit()))?;
        self.block(&entry.block_id)
    }

    /// Press on `cell`. Returns whether a selection started.
    pub fn pointer_down(&mut self, cell: A) -> bool {
        if !A::DRAG_OVER_BLOCKS && self.is_occupied(cell) {
            return false;
        }
        self.state.borrow_mut().selection.begin(cell);
        true
    }

    pub fn pointer_move(&mut self, cell: A) -> bool {
        self.state.borrow_mut().selection.update(cell)
    }

    /// Release observed by the grid itself.
    pub fn pointer_up(&mut self) {
        self.state.borrow_mut().commit_drag();
    }

    pub fn is_dragging(&self) -> bool {
        self.state.borrow().selection.is_dragging()
    }

    pub fn selection_bounds(&self) -> Option<(A, A)> {
        self.state.borrow().selection.bounds()
    }

    pub fn selection_preview(&self) -> Option<TimeRange> {
        self.state.borrow().selection.preview()
    }

    pub fn is_in_selection(&self, cell: A) -> bool {
        self.state.borrow().selection.is_in_selection(cell)
    }

    /// Click on a rendered block. Ignored while a drag is in flight.
    pub fn click_block(&mut self, block_id: &str) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(block) = self.block(block_id).cloned() else {
            log::warn!("Click on unknown time block {}", block_id);
            return false;
        };
        self.state.borrow_mut().outbox.clicked = Some(block);
        true
    }

    pub fn delete_block(&mut self, block_id: &str) {
        self.state
            .borrow_mut()
            .outbox
            .deleted
            .push(block_id.to_string());
    }

    pub fn update_block(&mut self, block_id: &str, update: TimeBlockUpdate) {
        if update.is_empty() {
            return;
        }
        self.state
            .borrow_mut()
            .outbox
            .updated
            .push((block_id.to_string(), update));
    }

    /// Drain the requests collected so far.
    pub fn take_interaction(&mut self) -> TimeTableInteraction {
        std::mem::take(&mut self.state.borrow_mut().outbox)
    }

    /// Drain and deliver the requests collected so far.
    pub fn dispatch(&mut self, handler: &mut impl TimeTableHandler) {
        self.take_interaction().apply(handler);
    }

    fn is_occupied(&self, cell: A) -> bool {
        let cell: RowColumn = cell.to_row_column(self.unit());
        self.cell_map().is_occupied(cell)
    }
}
