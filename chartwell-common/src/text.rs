use serde::{Deserialize, Serialize};

use crate::types::FontSpec;

/// Measured extent of a single line of text
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextBounds {
    pub width: f32,
    pub height: f32,
}

/// Measures text for layout without rasterizing it
pub trait TextMeasurer: Send + Sync {
    fn measure_text_bounds(&self, text: &str, font: &FontSpec) -> TextBounds;
}

/// Estimates text extents from character counts.
///
/// Average glyph advance is taken as 0.6 em (0.65 em for bold faces) and the
/// line height as 1.2 em.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApproximateTextMeasurer;

impl TextMeasurer for ApproximateTextMeasurer {
    fn measure_text_bounds(&self, text: &str, font: &FontSpec) -> TextBounds {
        let advance = if font.bold { 0.65 } else { 0.6 };
        let longest_line = text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let line_count = text.lines().count().max(1);
        TextBounds {
            width: longest_line as f32 * font.size * advance,
            height: line_count as f32 * font.size * 1.2,
        }
    }
}

pub fn default_text_measurer() -> ApproximateTextMeasurer {
    ApproximateTextMeasurer
}
