//! Common helpers for the time-table views.

use egui::{Color32, Pos2, Rect};

use crate::models::time_block::{TimeBlock, DEFAULT_BLOCK_COLOR};
use crate::services::timetable::format_time_display;

/// Parse a hex color string to Color32.
///
/// # Arguments
/// * `hex` - A hex color string, optionally prefixed with '#' (e.g., "#FF5500" or "FF5500")
///
/// # Returns
/// * `Some(Color32)` if parsing succeeds
/// * `None` if the input is empty or invalid
pub fn parse_color(hex: &str) -> Option<Color32> {
    if hex.is_empty() {
        return None;
    }

    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}

/// Fill color of a block, falling back to the default block color.
pub fn block_color(block: &TimeBlock) -> Color32 {
    parse_color(&block.color)
        .or_else(|| parse_color(DEFAULT_BLOCK_COLOR))
        .unwrap_or(Color32::from_rgb(236, 72, 153))
}

/// "2:30 PM - 3:00 PM" for a timed block.
pub fn format_block_range(block: &TimeBlock) -> Option<String> {
    let start = format_time_display(block.start_time.as_deref()?).ok()?;
    let end = format_time_display(block.end_time.as_deref()?).ok()?;
    Some(format!("{} - {}", start, end))
}

/// Tooltip text: title, time range and description preview.
pub fn format_block_tooltip(block: &TimeBlock) -> String {
    let mut lines = vec![block.title.clone()];

    if let Some(range) = format_block_range(block) {
        lines.push(range);
    }

    if let Some(description) = block.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let preview: String = description.chars().take(100).collect();
        if description.chars().count() > 100 {
            lines.push(format!("{}...", preview));
        } else {
            lines.push(preview);
        }
    }

    lines.join("\n")
}

/// Pointer position relative to the top-left of `rect`.
pub fn local_offset(rect: Rect, pos: Pos2) -> (f32, f32) {
    (pos.x - rect.left(), pos.y - rect.top())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> TimeBlock {
        TimeBlock::builder()
            .title("Review")
            .time_range("14:30", "15:00")
            .color("#3b82f6")
            .build()
            .unwrap()
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#FF5500"), Some(Color32::from_rgb(255, 85, 0)));
        assert_eq!(parse_color("3b82f6"), Some(Color32::from_rgb(59, 130, 246)));
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("#FFF"), None);
        assert_eq!(parse_color("#GGGGGG"), None);
    }

    #[test]
    fn test_block_color_falls_back() {
        let mut block = block();
        assert_eq!(block_color(&block), Color32::from_rgb(59, 130, 246));
        block.color = "teal".to_string();
        assert_eq!(block_color(&block), Color32::from_rgb(236, 72, 153));
    }

    #[test]
    fn test_tooltip() {
        let mut block = block();
        assert_eq!(format_block_tooltip(&block), "Review\n2:30 PM - 3:00 PM");
        block.description = Some("x".repeat(120));
        let tooltip = format_block_tooltip(&block);
        assert!(tooltip.ends_with("..."));
    }

    #[test]
    fn test_local_offset() {
        let rect = Rect::from_min_max(Pos2::new(10.0, 20.0), Pos2::new(110.0, 220.0));
        assert_eq!(local_offset(rect, Pos2::new(15.0, 60.0)), (5.0, 40.0));
    }
}
