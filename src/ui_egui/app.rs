mod store_handler;

use std::path::PathBuf;

use chrono::{Duration, Local, NaiveDate};
use egui::{RichText, Visuals};

use self::store_handler::StoreHandler;
use crate::models::settings::{GridAddressing, Settings};
use crate::services::block_store::{InMemoryBlockStore, TimeBlockStore};
use crate::services::settings::SettingsService;
use crate::services::timetable::{
    LinearCell, PointerReleaseHub, RowColumn, TimeTableGrid, TimeTableInteraction, TimeUnit,
};
use crate::ui_egui::block_editor::{render_block_editor, BlockEditorAction, BlockEditorState};
use crate::ui_egui::views::{FlatTimeTableView, RowTimeTableView, TimeTablePalette};

const EDITOR_WIDTH: f32 = 260.0;

pub struct PlannerApp {
    settings: Settings,
    settings_service: Option<SettingsService>,
    store: InMemoryBlockStore,
    /// Where the store is saved after every change, if anywhere
    store_path: Option<PathBuf>,
    current_date: NaiveDate,
    /// Document-level release signal shared by both grids
    release_hub: PointerReleaseHub,
    row_grid: TimeTableGrid<RowColumn>,
    flat_grid: TimeTableGrid<LinearCell>,
    editor: Option<BlockEditorState>,
    status_message: Option<String>,
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_toolbar(ctx);
        self.render_status_bar(ctx);
        self.render_editor(ctx);
        self.render_time_table(ctx);

        // A release anywhere in the window ends every drag in progress.
        if ctx.input(|i| i.pointer.any_released()) {
            self.release_hub.pointer_released();
        }

        self.process_interactions();
    }
}

impl PlannerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        settings_service: Option<SettingsService>,
        store: InMemoryBlockStore,
        store_path: Option<PathBuf>,
    ) -> Self {
        let visuals = if settings.is_dark() {
            Visuals::dark()
        } else {
            Visuals::light()
        };
        cc.egui_ctx.set_visuals(visuals);

        let release_hub = PointerReleaseHub::new();
        let unit = settings.time_table_unit;
        let mut app = Self {
            row_grid: TimeTableGrid::new(unit, &release_hub),
            flat_grid: TimeTableGrid::new(unit, &release_hub),
            settings,
            settings_service,
            store,
            store_path,
            current_date: Local::now().date_naive(),
            release_hub,
            editor: None,
            status_message: None,
        };
        app.reload_day();
        log::info!(
            "Time-table ready: {} blocks on {} at {}",
            app.row_grid.blocks().len(),
            app.current_date,
            unit
        );
        app
    }

    fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("◀").on_hover_text("Previous day").clicked() {
                    self.set_date(self.current_date - Duration::days(1));
                }
                if ui.button("Today").clicked() {
                    self.set_date(Local::now().date_naive());
                }
                if ui.button("▶").on_hover_text("Next day").clicked() {
                    self.set_date(self.current_date + Duration::days(1));
                }
                ui.label(
                    RichText::new(self.current_date.format("%A, %B %d, %Y").to_string()).strong(),
                );

                ui.separator();

                let mut unit = self.settings.time_table_unit;
                egui::ComboBox::from_id_source("time_unit")
                    .selected_text(unit.to_string())
                    .show_ui(ui, |ui| {
                        for option in TimeUnit::ALL {
                            ui.selectable_value(&mut unit, option, option.to_string());
                        }
                    });
                if unit != self.settings.time_table_unit {
                    self.set_unit(unit);
                }

                let mut addressing = self.settings.addressing;
                ui.radio_value(&mut addressing, GridAddressing::Rows, "Hour rows");
                ui.radio_value(&mut addressing, GridAddressing::Flat, "Single column");
                if addressing != self.settings.addressing {
                    self.settings.addressing = addressing;
                    self.save_settings();
                }
            });
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        let preview = match self.settings.addressing {
            GridAddressing::Rows => self.row_grid.selection_preview(),
            GridAddressing::Flat => self.flat_grid.selection_preview(),
        };

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(range) = preview {
                    ui.label(format!(
                        "Selecting {} - {} ({} min)",
                        range.start(),
                        range.end(),
                        range.duration_minutes()
                    ));
                } else {
                    ui.label(format!("{} blocks", self.row_grid.blocks().len()));
                }
                if let Some(message) = &self.status_message {
                    ui.separator();
                    ui.colored_label(egui::Color32::from_rgb(220, 80, 80), message);
                }
            });
        });
    }

    fn render_editor(&mut self, ctx: &egui::Context) {
        let Some(state) = self.editor.as_mut() else {
            return;
        };

        let mut action = BlockEditorAction::None;
        egui::SidePanel::right("block_editor")
            .resizable(false)
            .exact_width(EDITOR_WIDTH)
            .show(ctx, |ui| {
                action = render_block_editor(ui, state);
            });

        let block_id = state.block_id.clone();
        match action {
            BlockEditorAction::None => {}
            BlockEditorAction::Save(update) => match self.settings.addressing {
                GridAddressing::Rows => self.row_grid.update_block(&block_id, update),
                GridAddressing::Flat => self.flat_grid.update_block(&block_id, update),
            },
            BlockEditorAction::Delete => match self.settings.addressing {
                GridAddressing::Rows => self.row_grid.delete_block(&block_id),
                GridAddressing::Flat => self.flat_grid.delete_block(&block_id),
            },
            BlockEditorAction::Close => self.editor = None,
        }
    }

    fn render_time_table(&mut self, ctx: &egui::Context) {
        let is_today = self.current_date == Local::now().date_naive();

        egui::CentralPanel::default().show(ctx, |ui| {
            let palette = TimeTablePalette::from_ui(ui);
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.settings.addressing {
                    GridAddressing::Rows => {
                        RowTimeTableView::show(ui, &mut self.row_grid, &palette, is_today);
                    }
                    GridAddressing::Flat => {
                        FlatTimeTableView::show(ui, &mut self.flat_grid, &palette, is_today);
                    }
                });
        });
    }

    /// Hand the grids' requests to the store and refresh what changed.
    fn process_interactions(&mut self) {
        let mut interaction = TimeTableInteraction::default();
        interaction.merge(self.row_grid.take_interaction());
        interaction.merge(self.flat_grid.take_interaction());
        if !interaction.has_actions() {
            return;
        }

        let mut handler = StoreHandler::new(&mut self.store, self.current_date);
        interaction.apply(&mut handler);
        let StoreHandler {
            clicked,
            deleted,
            changed,
            errors,
            ..
        } = handler;

        self.status_message = errors.last().cloned();

        if changed {
            self.reload_day();
            self.persist_store();
        }

        if let Some(block) = clicked {
            self.editor = Some(BlockEditorState::from_block(&block));
        } else if let Some(mut editor) = self.editor.take() {
            // Saved edits come back from the store; failed ones stay in the form.
            self.editor = if deleted.contains(&editor.block_id) {
                None
            } else if let Some(error) = errors.last() {
                editor.error_message = Some(error.clone());
                Some(editor)
            } else {
                match self.row_grid.block(&editor.block_id) {
                    Some(block) if changed => Some(BlockEditorState::from_block(block)),
                    _ => Some(editor),
                }
            };
        }
    }

    fn reload_day(&mut self) {
        let blocks = self.store.blocks_for_day(self.current_date);
        self.row_grid.set_blocks(blocks.clone());
        self.flat_grid.set_blocks(blocks);
    }

    fn set_date(&mut self, date: NaiveDate) {
        if date == self.current_date {
            return;
        }
        self.current_date = date;
        self.editor = None;
        self.reload_day();
    }

    fn set_unit(&mut self, unit: TimeUnit) {
        log::info!("Switching time-table unit to {}", unit);
        self.settings.time_table_unit = unit;
        self.row_grid.set_unit(unit);
        self.flat_grid.set_unit(unit);
        self.save_settings();
    }

    fn save_settings(&mut self) {
        let Some(service) = &self.settings_service else {
            return;
        };
        if let Err(err) = service.update(&self.settings) {
            log::error!("Failed to save settings: {:#}", err);
            self.status_message = Some(format!("Failed to save settings: {}", err));
        }
    }

    fn persist_store(&mut self) {
        let Some(path) = &self.store_path else {
            return;
        };
        if let Err(err) = self.store.save_json(path) {
            log::error!("Failed to save time blocks: {:#}", err);
            self.status_message = Some(format!("Failed to save time blocks: {}", err));
        }
    }
}
