use egui::{Color32, Visuals};

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[derive(Clone, Copy)]
pub struct TimeTablePalette {
    pub background: Color32,
    pub gutter_bg: Color32,
    pub hour_line: Color32,
    pub slot_line: Color32,
    pub label_text: Color32,
    pub selection_fill: Color32,
    pub selection_stroke: Color32,
    pub block_text: Color32,
    pub hover_overlay: Color32,
    pub now_line: Color32,
}

impl TimeTablePalette {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        let accent = visuals.selection.bg_fill;
        let border = visuals.widgets.noninteractive.bg_stroke.color;
        let dark = visuals.dark_mode;
        Self {
            background: visuals.extreme_bg_color,
            gutter_bg: blend(visuals.panel_fill, visuals.extreme_bg_color, 0.4),
            hour_line: border,
            slot_line: with_alpha(border, 110),
            label_text: visuals.weak_text_color(),
            selection_fill: with_alpha(accent, if dark { 110 } else { 70 }),
            selection_stroke: accent,
            block_text: Color32::WHITE,
            hover_overlay: with_alpha(accent, if dark { 50 } else { 30 }),
            now_line: Color32::from_rgb(255, 100, 100),
        }
    }

    pub fn from_ui(ui: &egui::Ui) -> Self {
        Self::from_visuals(ui.visuals())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
        assert_eq!(blend(a, b, 2.0), b);
    }

    #[test]
    fn test_selection_is_translucent() {
        let palette = TimeTablePalette::from_visuals(&Visuals::light());
        assert!(palette.selection_fill.a() < 255);
        let dark = TimeTablePalette::from_visuals(&Visuals::dark());
        assert!(dark.selection_fill.a() > palette.selection_fill.a());
    }
}
