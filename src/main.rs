// Planner Time-Table Application
// Main entry point

use std::path::PathBuf;

use chrono::Local;
use planner_timetable::services::block_store::InMemoryBlockStore;
use planner_timetable::services::settings::SettingsService;
use planner_timetable::ui_egui::PlannerApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Planner Time-Table");

    let settings_service = SettingsService::with_default_path();
    let settings = match &settings_service {
        Some(service) => service.get_or_default(),
        None => {
            log::warn!("No config directory available, settings will not be saved");
            Default::default()
        }
    };

    // Optional JSON file of time blocks, saved back after every change
    let (store, store_path) = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match InMemoryBlockStore::load_json(&path, Local::now().date_naive()) {
            Ok(store) => (store, Some(path)),
            Err(err) => {
                // Leave an unreadable file alone rather than overwrite it.
                log::error!("Failed to load time blocks: {:#}", err);
                (InMemoryBlockStore::new(), None)
            }
        },
        None => (InMemoryBlockStore::new(), None),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Planner Time-Table",
        options,
        Box::new(move |cc| {
            Ok(Box::new(PlannerApp::new(
                cc,
                settings,
                settings_service,
                store,
                store_path,
            )))
        }),
    )
}
