use egui::Color32;
use serde::{Deserialize, Serialize};

/// Surface background. The eraser paints with this color.
pub const BACKGROUND: Color32 = Color32::from_rgb(0x42, 0x42, 0x42);

pub const MIN_STROKE_WIDTH: u32 = 1;
pub const MAX_STROKE_WIDTH: u32 = 20;
pub const DEFAULT_STROKE_WIDTH: u32 = 3;

/// Predefined white swatch, the startup color.
pub const WHITE: Color32 = Color32::from_rgb(0xff, 0xff, 0xff);
/// Predefined black swatch.
pub const BLACK: Color32 = Color32::from_rgb(0x00, 0x00, 0x00);
/// Predefined red swatch.
pub const RED: Color32 = Color32::from_rgb(0xfa, 0x52, 0x52);
/// Predefined pink swatch.
pub const PINK: Color32 = Color32::from_rgb(0xe6, 0x49, 0x80);
/// Predefined purple swatch.
pub const GRAPE: Color32 = Color32::from_rgb(0xbe, 0x4b, 0xdb);
/// Predefined blue swatch.
pub const BLUE: Color32 = Color32::from_rgb(0x22, 0x8b, 0xe6);
/// Predefined teal swatch.
pub const TEAL: Color32 = Color32::from_rgb(0x12, 0xb8, 0x86);
/// Predefined green swatch.
pub const GREEN: Color32 = Color32::from_rgb(0x40, 0xc0, 0x57);
/// Predefined yellow swatch.
pub const YELLOW: Color32 = Color32::from_rgb(0xfa, 0xde, 0x2a);
/// Predefined orange swatch.
pub const ORANGE: Color32 = Color32::from_rgb(0xfd, 0x7e, 0x14);

/// The swatch row shown in the toolbar, in display order.
pub const SWATCHES: [Color32; 10] = [
    WHITE, BLACK, RED, PINK, GRAPE, BLUE, TEAL, GREEN, YELLOW, ORANGE,
];

/// A requested change to the tool configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolIntent {
    /// Pick a palette swatch; leaves eraser mode.
    SelectColor(Color32),
    /// Flip eraser mode on or off.
    ToggleEraser,
    /// Change the stroke width; clamped to the slider range.
    SetWidth(u32),
}

/// The whole tool state as one value, changed only through [`ToolConfig::apply`].
///
/// The color actually painted is derived by [`ToolConfig::stroke_color`], so
/// eraser mode and the selected swatch can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Selected swatch color. Kept while the eraser is active.
    pub color: Color32,
    /// Whether the eraser is active.
    pub eraser: bool,
    /// Stroke width in pixels, always within `[MIN_STROKE_WIDTH, MAX_STROKE_WIDTH]`.
    pub width: u32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            color: WHITE,
            eraser: false,
            width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl ToolConfig {
    /// Pure reducer: returns the configuration after `intent`.
    pub fn apply(self, intent: ToolIntent) -> Self {
        match intent {
            ToolIntent::SelectColor(color) => Self {
                color,
                eraser: false,
                ..self
            },
            ToolIntent::ToggleEraser => Self {
                eraser: !self.eraser,
                ..self
            },
            ToolIntent::SetWidth(width) => Self {
                width: width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH),
                ..self
            },
        }
    }

    /// The color the next stroke paints with.
    pub fn stroke_color(&self) -> Color32 {
        if self.eraser { BACKGROUND } else { self.color }
    }

    pub fn thickness(&self) -> f32 {
        self.width as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_clamped() {
        let tool = ToolConfig::default();
        assert_eq!(tool.apply(ToolIntent::SetWidth(0)).width, 1);
        assert_eq!(tool.apply(ToolIntent::SetWidth(999)).width, 20);
        assert_eq!(tool.apply(ToolIntent::SetWidth(7)).width, 7);
    }

    #[test]
    fn selecting_a_color_leaves_eraser_mode() {
        let tool = ToolConfig::default().apply(ToolIntent::ToggleEraser);
        assert!(tool.eraser);
        assert_eq!(tool.stroke_color(), BACKGROUND);

        let tool = tool.apply(ToolIntent::SelectColor(GREEN));
        assert!(!tool.eraser);
        assert_eq!(tool.stroke_color(), GREEN);
    }

    #[test]
    fn toggling_eraser_off_restores_the_selected_swatch() {
        let tool = ToolConfig::default()
            .apply(ToolIntent::SelectColor(RED))
            .apply(ToolIntent::ToggleEraser);
        assert_eq!(tool.stroke_color(), BACKGROUND);

        let tool = tool.apply(ToolIntent::ToggleEraser);
        assert_eq!(tool.stroke_color(), RED);
    }

    #[test]
    fn width_changes_keep_color_and_eraser() {
        let tool = ToolConfig::default()
            .apply(ToolIntent::SelectColor(BLUE))
            .apply(ToolIntent::SetWidth(12));
        assert_eq!(tool.color, BLUE);
        assert_eq!(tool.width, 12);
        assert!(!tool.eraser);
    }
}
