use egui::{Color32, RichText};

use super::views::utils::parse_color;
use crate::models::time_block::{TimeBlock, TimeBlockUpdate, BLOCK_COLORS};
use crate::services::timetable::TimetableError;

/// In-place editor state for a clicked block
pub struct BlockEditorState {
    pub block_id: String,
    original: TimeBlock,

    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub color: String,
    pub description: String,

    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockEditorAction {
    None,
    Save(TimeBlockUpdate),
    Delete,
    Close,
}

impl BlockEditorState {
    pub fn from_block(block: &TimeBlock) -> Self {
        Self {
            block_id: block.id.clone(),
            original: block.clone(),
            title: block.title.clone(),
            start_time: block.start_time.clone().unwrap_or_default(),
            end_time: block.end_time.clone().unwrap_or_default(),
            color: block.color.clone(),
            description: block.description.clone().unwrap_or_default(),
            error_message: None,
        }
    }

    /// Changed fields as an update, validated against the original block.
    pub fn to_update(&self) -> Result<TimeBlockUpdate, TimetableError> {
        let changed = |edited: &str, current: Option<&str>| {
            let edited = edited.trim();
            (Some(edited) != current).then(|| edited.to_string())
        };

        let update = TimeBlockUpdate {
            title: changed(&self.title, Some(self.original.title.as_str())),
            color: changed(&self.color, Some(self.original.color.as_str())),
            start_time: changed(&self.start_time, self.original.start_time.as_deref()),
            end_time: changed(&self.end_time, self.original.end_time.as_deref()),
            description: changed(
                &self.description,
                Some(self.original.description.as_deref().unwrap_or("")),
            ),
        };

        update.apply_to(&self.original).validate()?;
        Ok(update)
    }
}

/// Render the editor into `ui` and report what the user asked for.
pub fn render_block_editor(ui: &mut egui::Ui, state: &mut BlockEditorState) -> BlockEditorAction {
    let mut action = BlockEditorAction::None;

    ui.heading("Edit Block");
    ui.add_space(4.0);

    if let Some(ref error) = state.error_message {
        ui.colored_label(Color32::RED, RichText::new(error).strong());
        ui.add_space(8.0);
    }

    egui::Grid::new("block_editor_fields")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("Title:");
            ui.text_edit_singleline(&mut state.title);
            ui.end_row();

            ui.label("Start:");
            ui.add(egui::TextEdit::singleline(&mut state.start_time).desired_width(60.0).hint_text("HH:MM"));
            ui.end_row();

            ui.label("End:");
            ui.add(egui::TextEdit::singleline(&mut state.end_time).desired_width(60.0).hint_text("HH:MM"));
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.label("Color:");
    ui.horizontal_wrapped(|ui| {
        for (name, hex) in BLOCK_COLORS {
            let Some(color) = parse_color(hex) else {
                continue;
            };
            let selected = state.color.eq_ignore_ascii_case(hex);
            let label = if selected { "●" } else { "○" };
            if ui
                .button(RichText::new(label).color(color).size(18.0))
                .on_hover_text(name)
                .clicked()
            {
                state.color = hex.to_string();
            }
        }
    });

    ui.add_space(8.0);
    ui.label("Description:");
    ui.text_edit_multiline(&mut state.description);

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        if ui.button("Save").clicked() {
            match state.to_update() {
                Ok(update) if update.is_empty() => action = BlockEditorAction::Close,
                Ok(update) => action = BlockEditorAction::Save(update),
                Err(err) => state.error_message = Some(err.to_string()),
            }
        }
        if ui.button("Delete").clicked() {
            action = BlockEditorAction::Delete;
        }
        if ui.button("Close").clicked() {
            action = BlockEditorAction::Close;
        }
    });

    action
}
