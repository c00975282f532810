// Service module exports

pub mod block_store;
pub mod settings;
pub mod timetable;
