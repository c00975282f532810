//! Hour-row time-table rendering.
//!
//! One row per hour, split into the unit's sub-columns. Blocks are painted
//! as one rectangle per row segment and cannot be dragged over: a press on
//! an occupied cell is a block click.

use chrono::{Local, Timelike};
use egui::{Align2, CursorIcon, FontId, Pos2, Rect, Response, Sense, Stroke, Vec2};

use super::palette::TimeTablePalette;
use super::utils::{block_color, format_block_tooltip, local_offset};
use crate::services::timetable::{hour_labels, GridConfig, RowColumn, RowLayout, TimeTableGrid};

pub const TIME_LABEL_WIDTH: f32 = 56.0;
pub const ROW_HEIGHT: f32 = 44.0;
const MIN_GRID_WIDTH: f32 = 120.0;

pub struct RowTimeTableView;

impl RowTimeTableView {
    /// Render `grid` and feed it the pointer input of this frame.
    ///
    /// Releases are not handled here; the host forwards them through the
    /// grid's release hub so a drag ending outside the grid still commits.
    pub fn show(
        ui: &mut egui::Ui,
        grid: &mut TimeTableGrid<RowColumn>,
        palette: &TimeTablePalette,
        show_current_time: bool,
    ) -> Response {
        let config = grid.config();
        let width = ui.available_width().max(TIME_LABEL_WIDTH + MIN_GRID_WIDTH);
        let layout = RowLayout::fit(width - TIME_LABEL_WIDTH, ROW_HEIGHT, &config);

        let (rect, response) = ui.allocate_exact_size(
            Vec2::new(width, layout.total_height()),
            Sense::click_and_drag(),
        );
        let grid_rect = Rect::from_min_max(
            Pos2::new(rect.left() + TIME_LABEL_WIDTH, rect.top()),
            rect.max,
        );
        let cell_under = |pos: Pos2| -> RowColumn {
            let (x, y) = local_offset(grid_rect, pos);
            layout.cell_at(x, y, &config)
        };

        let (pressed, pointer) = ui.input(|i| (i.pointer.primary_pressed(), i.pointer.interact_pos()));

        if pressed && response.hovered() {
            if let Some(pos) = pointer.filter(|pos| grid_rect.contains(*pos)) {
                let cell = cell_under(pos);
                if grid.pointer_down(cell) {
                    log::trace!("Row selection started at {:?}", cell);
                }
            }
        }

        if grid.is_dragging() {
            if let Some(pos) = pointer.filter(|pos| grid_rect.contains(*pos)) {
                grid.pointer_move(cell_under(pos));
            }
            ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
        }

        let hovered_cell = response
            .hover_pos()
            .filter(|pos| grid_rect.contains(*pos))
            .map(cell_under);

        if response.clicked() {
            if let Some(block_id) = hovered_cell
                .and_then(|cell| grid.block_at(cell))
                .map(|block| block.id.clone())
            {
                grid.click_block(&block_id);
            }
        }

        paint_grid(ui, rect, grid_rect, &layout, &config, palette);
        paint_selection(ui, grid_rect, &layout, grid, palette);
        paint_blocks(ui, grid_rect, &layout, grid, palette);

        if let Some(cell) = hovered_cell.filter(|_| !grid.is_dragging()) {
            ui.painter()
                .rect_filled(cell_rect(grid_rect, &layout, cell), 0.0, palette.hover_overlay);
        }

        if show_current_time {
            draw_current_time_indicator(ui, grid_rect, &layout, palette);
        }

        match hovered_cell.and_then(|cell| grid.block_at(cell)) {
            Some(block) if !grid.is_dragging() => {
                let tooltip = format_block_tooltip(block);
                response.on_hover_text(tooltip)
            }
            _ => response,
        }
    }
}

fn paint_grid(
    ui: &egui::Ui,
    rect: Rect,
    grid_rect: Rect,
    layout: &RowLayout,
    config: &GridConfig,
    palette: &TimeTablePalette,
) {
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, palette.gutter_bg);
    painter.rect_filled(grid_rect, 0.0, palette.background);

    for column in 1..config.cells_per_hour {
        let x = grid_rect.left() + column as f32 * layout.column_width;
        painter.line_segment(
            [Pos2::new(x, grid_rect.top()), Pos2::new(x, grid_rect.bottom())],
            Stroke::new(1.0, palette.slot_line),
        );
    }

    for (hour, label) in hour_labels().iter().enumerate() {
        let y = grid_rect.top() + hour as f32 * layout.row_height;
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(grid_rect.right(), y)],
            Stroke::new(1.0, palette.hour_line),
        );
        painter.text(
            Pos2::new(grid_rect.left() - 6.0, y + 4.0),
            Align2::RIGHT_TOP,
            label,
            FontId::proportional(12.0),
            palette.label_text,
        );
    }
}

fn paint_selection(
    ui: &egui::Ui,
    grid_rect: Rect,
    layout: &RowLayout,
    grid: &TimeTableGrid<RowColumn>,
    palette: &TimeTablePalette,
) {
    let Some((min, max)) = grid.selection_bounds() else {
        return;
    };
    let painter = ui.painter();

    let last_column = grid.config().last_column();
    for hour in min.hour..=max.hour {
        for column in 0..=last_column {
            let cell = RowColumn::new(hour, column);
            if grid.is_in_selection(cell) {
                painter.rect_filled(cell_rect(grid_rect, layout, cell), 0.0, palette.selection_fill);
            }
        }
    }

    if let Some(range) = grid.selection_preview() {
        let (x, y, _, _) = layout.span_rect(min.hour, min.column, 1);
        painter.text(
            grid_rect.min + Vec2::new(x + 4.0, y + 2.0),
            Align2::LEFT_TOP,
            format!("{} - {}", range.start(), range.end()),
            FontId::proportional(11.0),
            palette.selection_stroke,
        );
    }
}

fn paint_blocks(
    ui: &egui::Ui,
    grid_rect: Rect,
    layout: &RowLayout,
    grid: &TimeTableGrid<RowColumn>,
    palette: &TimeTablePalette,
) {
    let map = grid.cell_map();
    let painter = ui.painter();

    for hour in 0..24 {
        for segment in map.row_segments(hour) {
            let Some(block) = grid.block(&segment.block_id) else {
                continue;
            };
            let (x, y, w, h) = layout.span_rect(segment.hour, segment.column, segment.col_span);
            let block_rect = Rect::from_min_size(grid_rect.min + Vec2::new(x, y), Vec2::new(w, h))
                .shrink(1.0);
            painter.rect_filled(block_rect, 3.0, block_color(block));

            let is_first = map
                .get(segment.hour, segment.column)
                .map(|entry| entry.is_first_cell)
                .unwrap_or(false);
            if is_first {
                let text_rect = block_rect.shrink(4.0);
                painter.with_clip_rect(text_rect).text(
                    text_rect.left_top(),
                    Align2::LEFT_TOP,
                    &block.title,
                    FontId::proportional(12.0),
                    palette.block_text,
                );
            }
        }
    }
}

/// Tick across the current hour row at the current minute.
fn draw_current_time_indicator(
    ui: &egui::Ui,
    grid_rect: Rect,
    layout: &RowLayout,
    palette: &TimeTablePalette,
) {
    let now = Local::now().time();
    let row_top = grid_rect.top() + now.hour() as f32 * layout.row_height;
    let x = grid_rect.left() + (now.minute() as f32 / 60.0) * grid_rect.width();

    let painter = ui.painter();
    painter.circle_filled(Pos2::new(x, row_top), 3.0, palette.now_line);
    painter.line_segment(
        [Pos2::new(x, row_top), Pos2::new(x, row_top + layout.row_height)],
        Stroke::new(2.0, palette.now_line),
    );
}

/// Screen rect of a single cell.
pub fn cell_rect(grid_rect: Rect, layout: &RowLayout, cell: RowColumn) -> Rect {
    let (x, y, w, h) = layout.span_rect(cell.hour, cell.column, 1);
    Rect::from_min_size(grid_rect.min + Vec2::new(x, y), Vec2::new(w, h))
}
