use std::hash::{Hash, Hasher};

use lyon_path::Path;
use ordered_float::OrderedFloat;
use palette::Srgb;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, VariantNames};

use crate::error::ChartwellCommonError;
use crate::shapes;

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, VariantNames)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, VariantNames)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StrokeJoin {
    Bevel,
    #[default]
    Miter,
    Round,
}

/// Width, dash pattern, cap and join of a stroked outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub width: f32,
    pub dash: Option<Vec<f32>>,
    pub cap: StrokeCap,
    pub join: StrokeJoin,
}

impl StrokeStyle {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn dashed(width: f32, dash: Vec<f32>) -> Self {
        Self {
            width,
            dash: Some(dash),
            ..Default::default()
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            dash: None,
            cap: StrokeCap::Square,
            join: StrokeJoin::Bevel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorOrGradient {
    Color([f32; 4]),
    Gradient(LinearGradient),
}

impl Hash for ColorOrGradient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            ColorOrGradient::Color(c) => c.iter().for_each(|v| OrderedFloat(*v).hash(state)),
            ColorOrGradient::Gradient(g) => g.hash(state),
        }
    }
}

impl ColorOrGradient {
    pub fn transparent() -> Self {
        ColorOrGradient::Color([0.0, 0.0, 0.0, 0.0])
    }

    pub fn color_or_transparent(&self) -> [f32; 4] {
        match self {
            ColorOrGradient::Color(c) => *c,
            _ => [0.0, 0.0, 0.0, 0.0],
        }
    }

    pub fn is_transparent(&self) -> bool {
        match self {
            ColorOrGradient::Color(c) => c[3] == 0.0,
            ColorOrGradient::Gradient(g) => g.stops.iter().all(|s| s.color[3] == 0.0),
        }
    }

    /// Parses `#rrggbb`, `#rgb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Result<Self, ChartwellCommonError> {
        let trimmed = hex.trim().trim_start_matches('#');
        let (rgb_part, alpha) = if trimmed.len() == 8 {
            let alpha = u8::from_str_radix(&trimmed[6..], 16)
                .map_err(|e| ChartwellCommonError::InvalidColor(hex.to_string(), e.to_string()))?;
            (&trimmed[..6], alpha as f32 / 255.0)
        } else {
            (trimmed, 1.0)
        };
        let rgb: Srgb<u8> = rgb_part
            .parse()
            .map_err(|e: palette::rgb::FromHexError| {
                ChartwellCommonError::InvalidColor(hex.to_string(), e.to_string())
            })?;
        let rgb: Srgb<f32> = rgb.into_format();
        Ok(ColorOrGradient::Color([rgb.red, rgb.green, rgb.blue, alpha]))
    }

    /// Color with each RGB component scaled by `factor`, the way a darker outline is derived
    pub fn scaled(&self, factor: f32) -> Self {
        match self {
            ColorOrGradient::Color([r, g, b, a]) => ColorOrGradient::Color([
                (r * factor).clamp(0.0, 1.0),
                (g * factor).clamp(0.0, 1.0),
                (b * factor).clamp(0.0, 1.0),
                *a,
            ]),
            other => other.clone(),
        }
    }
}

impl From<[f32; 4]> for ColorOrGradient {
    fn from(value: [f32; 4]) -> Self {
        ColorOrGradient::Color(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub stops: Vec<GradientStop>,
}

impl Hash for LinearGradient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .for_each(|v| OrderedFloat::from(*v).hash(state));

        self.stops.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: [f32; 4],
}

impl Hash for GradientStop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        OrderedFloat::from(self.offset).hash(state);
        self.color
            .iter()
            .for_each(|v| OrderedFloat::from(*v).hash(state));
    }
}

/// Font request used for layout and for text marks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl FontSpec {
    pub fn new(family: &str, size: f32, bold: bool) -> Self {
        Self {
            family: family.to_string(),
            size,
            bold,
            italic: false,
        }
    }

    pub fn with_size(&self, size: f32) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("SansSerif", 12.0, false)
    }
}

/// Shapes used to mark data items and legend entries
#[derive(
    Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, VariantNames, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SymbolShape {
    #[default]
    Square,
    Circle,
    TriangleUp,
    Diamond,
    HorizontalRectangle,
    TriangleDown,
    HorizontalEllipse,
    TriangleRight,
    VerticalRectangle,
    TriangleLeft,
}

impl SymbolShape {
    /// Path for this symbol centered on `center`, fitting in a `size` x `size` box
    pub fn path_at(&self, center: [f32; 2], size: f32) -> Path {
        let [cx, cy] = center;
        let r = size / 2.0;
        match self {
            SymbolShape::Square => shapes::rect_path(cx - r, cy - r, size, size),
            SymbolShape::Circle => shapes::ellipse_path(cx, cy, size, size),
            SymbolShape::TriangleUp => {
                shapes::polygon_path(&[[cx, cy - r], [cx + r, cy + r], [cx - r, cy + r]], true)
            }
            SymbolShape::TriangleDown => {
                shapes::polygon_path(&[[cx - r, cy - r], [cx + r, cy - r], [cx, cy + r]], true)
            }
            SymbolShape::TriangleRight => {
                shapes::polygon_path(&[[cx - r, cy - r], [cx + r, cy], [cx - r, cy + r]], true)
            }
            SymbolShape::TriangleLeft => {
                shapes::polygon_path(&[[cx - r, cy], [cx + r, cy - r], [cx + r, cy + r]], true)
            }
            SymbolShape::Diamond => shapes::polygon_path(
                &[[cx, cy - r], [cx + r, cy], [cx, cy + r], [cx - r, cy]],
                true,
            ),
            SymbolShape::HorizontalRectangle => {
                shapes::rect_path(cx - r, cy - r / 2.0, size, size / 2.0)
            }
            SymbolShape::VerticalRectangle => {
                shapes::rect_path(cx - r / 2.0, cy - r, size / 2.0, size)
            }
            SymbolShape::HorizontalEllipse => shapes::ellipse_path(cx, cy, size, size / 2.0),
        }
    }
}

/// Named colors
pub mod colors {
    pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const GRAY: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const LIGHT_GRAY: [f32; 4] = [0.75, 0.75, 0.75, 1.0];
    pub const DARK_GRAY: [f32; 4] = [0.25, 0.25, 0.25, 1.0];
    pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const ORANGE: [f32; 4] = [1.0, 0.784, 0.0, 1.0];
    pub const TRANSPARENT: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

    /// `0xRRGGBB` to an opaque color
    pub const fn rgb(hex: u32) -> [f32; 4] {
        [
            ((hex >> 16) & 0xFF) as f32 / 255.0,
            ((hex >> 8) & 0xFF) as f32 / 255.0,
            (hex & 0xFF) as f32 / 255.0,
            1.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_from_hex() {
        let c = ColorOrGradient::from_hex("#ff8000").unwrap();
        let [r, g, b, a] = c.color_or_transparent();
        assert_approx_eq!(f32, r, 1.0);
        assert_approx_eq!(f32, g, 128.0 / 255.0);
        assert_approx_eq!(f32, b, 0.0);
        assert_approx_eq!(f32, a, 1.0);
    }

    #[test]
    fn test_from_hex_with_alpha() {
        let c = ColorOrGradient::from_hex("#00000080").unwrap();
        assert_approx_eq!(f32, c.color_or_transparent()[3], 128.0 / 255.0);
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(ColorOrGradient::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_rgb_const() {
        assert_eq!(colors::rgb(0xFF0000), colors::RED);
    }
}
