use chartwell_common::types::{colors, ColorOrGradient, StrokeStyle, SymbolShape};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Automatic paints, strokes and shapes for series without explicit styles.
///
/// Each sequence is indexed by series and wraps around when exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingSupplier {
    pub paints: Vec<ColorOrGradient>,
    pub outline_paints: Vec<ColorOrGradient>,
    pub strokes: Vec<StrokeStyle>,
    pub outline_strokes: Vec<StrokeStyle>,
    pub shapes: Vec<SymbolShape>,
}

const DEFAULT_PAINTS: [u32; 22] = [
    0xFF5555, 0x5555FF, 0x55FF55, 0xFFFF55, 0xFF55FF, 0x55FFFF, 0xFFAFAF, 0x808080, 0xC00000,
    0x0000C0, 0x00C000, 0xC0C000, 0xC000C0, 0x00C0C0, 0x404040, 0xFF4040, 0x4040FF, 0x40FF40,
    0xFFFF40, 0xFF40FF, 0x40FFFF, 0xC0C0C0,
];

impl Default for DrawingSupplier {
    fn default() -> Self {
        Self {
            paints: DEFAULT_PAINTS
                .iter()
                .map(|hex| ColorOrGradient::Color(colors::rgb(*hex)))
                .collect(),
            outline_paints: vec![ColorOrGradient::Color(colors::GRAY)],
            strokes: vec![StrokeStyle::new(1.0)],
            outline_strokes: vec![StrokeStyle::new(1.0)],
            shapes: SymbolShape::iter().collect(),
        }
    }
}

fn cycled<T: Clone>(values: &[T], index: usize) -> Option<T> {
    if values.is_empty() {
        None
    } else {
        Some(values[index % values.len()].clone())
    }
}

impl DrawingSupplier {
    /// Paints brighter than the defaults, for dark backgrounds
    pub fn bright() -> Self {
        Self {
            paints: [
                0xFFFF00, 0x00FFFF, 0xFF00FF, 0x00FF00, 0xFFC800, 0xFF0000, 0x8080FF, 0xFFFFFF,
            ]
            .iter()
            .map(|hex| ColorOrGradient::Color(colors::rgb(*hex)))
            .collect(),
            outline_paints: vec![ColorOrGradient::Color(colors::LIGHT_GRAY)],
            ..Default::default()
        }
    }

    pub fn paint(&self, index: usize) -> ColorOrGradient {
        cycled(&self.paints, index).unwrap_or(ColorOrGradient::Color(colors::BLUE))
    }

    pub fn outline_paint(&self, index: usize) -> ColorOrGradient {
        cycled(&self.outline_paints, index).unwrap_or(ColorOrGradient::Color(colors::GRAY))
    }

    pub fn stroke(&self, index: usize) -> StrokeStyle {
        cycled(&self.strokes, index).unwrap_or_default()
    }

    pub fn outline_stroke(&self, index: usize) -> StrokeStyle {
        cycled(&self.outline_strokes, index).unwrap_or_default()
    }

    pub fn shape(&self, index: usize) -> SymbolShape {
        cycled(&self.shapes, index).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequences_wrap() {
        let supplier = DrawingSupplier::default();
        assert_eq!(
            supplier.paint(0),
            ColorOrGradient::Color(colors::rgb(0xFF5555))
        );
        assert_eq!(supplier.paint(22), supplier.paint(0));
        assert_eq!(supplier.shape(1), SymbolShape::Circle);
        assert_eq!(supplier.shape(10), SymbolShape::Square);
    }

    #[test]
    fn test_empty_sequences_fall_back() {
        let supplier = DrawingSupplier {
            paints: vec![],
            shapes: vec![],
            ..Default::default()
        };
        assert_eq!(supplier.paint(3), ColorOrGradient::Color(colors::BLUE));
        assert_eq!(supplier.shape(3), SymbolShape::Square);
    }
}
