mod app;
mod block_editor;
pub mod views;

pub use app::PlannerApp;
