//! Single-column time-table rendering.
//!
//! Cells stack vertically at the unit's cell height and blocks are absolutely
//! positioned rectangles drawn over them. The column itself lets a drag run
//! across blocks, so a press that lands on a block is claimed here as a click.

use chrono::{Local, Timelike};
use egui::{Align2, CursorIcon, FontId, Pos2, Rect, Response, Sense, Stroke, Vec2};

use super::palette::TimeTablePalette;
use super::time_table_view::TIME_LABEL_WIDTH;
use super::utils::{block_color, format_block_range, format_block_tooltip, local_offset};
use crate::services::timetable::{
    block_geometry, hour_labels, selection_geometry, BlockGeometry, GridConfig, LinearCell,
    TimeTableGrid,
};

pub struct FlatTimeTableView;

impl FlatTimeTableView {
    pub fn show(
        ui: &mut egui::Ui,
        grid: &mut TimeTableGrid<LinearCell>,
        palette: &TimeTablePalette,
        show_current_time: bool,
    ) -> Response {
        let config = grid.config();
        let width = ui.available_width().max(TIME_LABEL_WIDTH + 120.0);
        let (rect, response) = ui.allocate_exact_size(
            Vec2::new(width, config.total_height),
            Sense::click_and_drag(),
        );
        let column_rect = Rect::from_min_max(
            Pos2::new(rect.left() + TIME_LABEL_WIDTH, rect.top()),
            rect.max,
        );

        let block_rects: Vec<(Rect, String)> = grid
            .blocks()
            .iter()
            .filter_map(|block| {
                let geometry = block_geometry(block, &config)?;
                Some((geometry_rect(column_rect, geometry).shrink2(Vec2::new(2.0, 0.5)), block.id.clone()))
            })
            .collect();
        // Later blocks paint on top, so they win hit tests.
        let block_under = |pos: Pos2| {
            block_rects
                .iter()
                .rev()
                .find(|(block_rect, _)| block_rect.contains(pos))
                .map(|(_, id)| id.clone())
        };
        let cell_under = |pos: Pos2| -> LinearCell {
            let (_, y) = local_offset(column_rect, pos);
            config.linear_cell_at(y)
        };

        let (pressed, pointer) = ui.input(|i| (i.pointer.primary_pressed(), i.pointer.interact_pos()));

        if pressed && response.hovered() {
            if let Some(pos) = pointer.filter(|pos| column_rect.contains(*pos)) {
                if block_under(pos).is_none() {
                    grid.pointer_down(cell_under(pos));
                }
            }
        }

        if grid.is_dragging() {
            if let Some(pos) = pointer.filter(|pos| column_rect.contains(*pos)) {
                grid.pointer_move(cell_under(pos));
            }
            ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
        }

        let hovered_block = response.hover_pos().and_then(block_under);

        if response.clicked() {
            if let Some(block_id) = &hovered_block {
                grid.click_block(block_id);
            }
        }

        paint_column(ui, rect, column_rect, &config, palette);
        paint_selection(ui, column_rect, grid, &config, palette);

        let painter = ui.painter();
        for (block_rect, block_id) in &block_rects {
            let Some(block) = grid.block(block_id) else {
                continue;
            };
            painter.rect_filled(*block_rect, 4.0, block_color(block));

            let text_rect = block_rect.shrink(4.0);
            let clipped = painter.with_clip_rect(text_rect);
            clipped.text(
                text_rect.left_top(),
                Align2::LEFT_TOP,
                &block.title,
                FontId::proportional(12.0),
                palette.block_text,
            );
            if text_rect.height() >= 30.0 {
                if let Some(range) = format_block_range(block) {
                    clipped.text(
                        text_rect.left_top() + Vec2::new(0.0, 15.0),
                        Align2::LEFT_TOP,
                        range,
                        FontId::proportional(11.0),
                        palette.block_text,
                    );
                }
            }
        }

        if show_current_time {
            draw_current_time_indicator(ui, column_rect, &config, palette);
        }

        match hovered_block.as_deref().and_then(|id| grid.block(id)) {
            Some(block) if !grid.is_dragging() => {
                ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
                let tooltip = format_block_tooltip(block);
                response.on_hover_text(tooltip)
            }
            _ => response,
        }
    }
}

fn geometry_rect(column_rect: Rect, geometry: BlockGeometry) -> Rect {
    Rect::from_min_size(
        Pos2::new(column_rect.left(), column_rect.top() + geometry.top),
        Vec2::new(column_rect.width(), geometry.height),
    )
}

fn paint_column(
    ui: &egui::Ui,
    rect: Rect,
    column_rect: Rect,
    config: &GridConfig,
    palette: &TimeTablePalette,
) {
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, palette.gutter_bg);
    painter.rect_filled(column_rect, 0.0, palette.background);

    for cell in 0..config.total_cells {
        let y = column_rect.top() + cell as f32 * config.cell_height;
        let is_hour_start = cell % config.cells_per_hour == 0;
        let (left, color) = if is_hour_start {
            (rect.left(), palette.hour_line)
        } else {
            (column_rect.left(), palette.slot_line)
        };
        painter.line_segment(
            [Pos2::new(left, y), Pos2::new(column_rect.right(), y)],
            Stroke::new(1.0, color),
        );
    }

    for (hour, label) in hour_labels().iter().enumerate() {
        painter.text(
            Pos2::new(column_rect.left() - 6.0, column_rect.top() + hour as f32 * config.hour_height() + 4.0),
            Align2::RIGHT_TOP,
            label,
            FontId::proportional(12.0),
            palette.label_text,
        );
    }
}

fn paint_selection(
    ui: &egui::Ui,
    column_rect: Rect,
    grid: &TimeTableGrid<LinearCell>,
    config: &GridConfig,
    palette: &TimeTablePalette,
) {
    let Some((min, max)) = grid.selection_bounds() else {
        return;
    };
    let selection_rect = geometry_rect(column_rect, selection_geometry(min, max, config));
    let painter = ui.painter();
    painter.rect_filled(selection_rect, 2.0, palette.selection_fill);
    painter.rect_stroke(selection_rect, 2.0, Stroke::new(1.0, palette.selection_stroke));

    if let Some(range) = grid.selection_preview() {
        painter.text(
            selection_rect.left_top() + Vec2::new(4.0, 2.0),
            Align2::LEFT_TOP,
            format!("{} - {}", range.start(), range.end()),
            FontId::proportional(11.0),
            palette.selection_stroke,
        );
    }
}

fn draw_current_time_indicator(
    ui: &egui::Ui,
    column_rect: Rect,
    config: &GridConfig,
    palette: &TimeTablePalette,
) {
    let now = Local::now().time();
    let minutes = now.hour() * 60 + now.minute();
    let y = column_rect.top() + minutes as f32 / config.unit.minutes() as f32 * config.cell_height;

    let painter = ui.painter();
    painter.circle_filled(Pos2::new(column_rect.left() - 4.0, y), 3.0, palette.now_line);
    painter.line_segment(
        [Pos2::new(column_rect.left(), y), Pos2::new(column_rect.right(), y)],
        Stroke::new(2.0, palette.now_line),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time_block::TimeBlock;
    use crate::services::timetable::{get_grid_config, TimeUnit};

    #[test]
    fn test_geometry_rect_offsets_into_column() {
        let config = get_grid_config(TimeUnit::Fifteen);
        let column = Rect::from_min_size(Pos2::new(56.0, 100.0), Vec2::new(300.0, config.total_height));
        let block = TimeBlock::builder()
            .title("Standup")
            .time_range("09:00", "09:30")
            .build()
            .unwrap();

        let geometry = block_geometry(&block, &config).unwrap();
        let rect = geometry_rect(column, geometry);
        assert_eq!(rect.top(), 100.0 + 36.0 * 60.0);
        assert_eq!(rect.height(), 120.0);
        assert_eq!(rect.width(), 300.0);
    }
}
