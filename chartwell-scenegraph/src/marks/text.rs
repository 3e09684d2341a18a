use chartwell_common::layout::Bounds;
use chartwell_common::text::{TextBounds, TextMeasurer};
use chartwell_common::types::{ColorOrGradient, FontSpec};
use chartwell_common::value::ScalarOrArray;
use itertools::izip;
use serde::{Deserialize, Serialize};

use super::mark::{check_len, SceneMark};
use crate::error::ChartwellSceneGraphError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    Alphabetic,
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Text anchored at (`x`, `y`), positioned according to align and baseline.
/// `angle` is a clockwise rotation in degrees about the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneTextMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub text: ScalarOrArray<String>,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub align: ScalarOrArray<TextAlign>,
    pub baseline: ScalarOrArray<TextBaseline>,
    pub angle: ScalarOrArray<f32>,
    pub color: ScalarOrArray<ColorOrGradient>,
    pub font: FontSpec,
    pub zindex: Option<i32>,
}

impl SceneTextMark {
    pub fn text_iter(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        self.text.as_iter(self.len as usize)
    }

    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize)
    }

    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize)
    }

    pub fn align_iter(&self) -> Box<dyn Iterator<Item = &TextAlign> + '_> {
        self.align.as_iter(self.len as usize)
    }

    pub fn baseline_iter(&self) -> Box<dyn Iterator<Item = &TextBaseline> + '_> {
        self.baseline.as_iter(self.len as usize)
    }

    /// Unrotated bounding boxes of each text instance
    pub fn bounds(&self, measurer: &dyn TextMeasurer, origin: [f32; 2]) -> Vec<Bounds> {
        izip!(
            self.text_iter(),
            self.x_iter(),
            self.y_iter(),
            self.align_iter(),
            self.baseline_iter()
        )
        .map(|(text, x, y, align, baseline)| {
            let size = measurer.measure_text_bounds(text, &self.font);
            anchored_bounds(
                [*x + origin[0], *y + origin[1]],
                size,
                *align,
                *baseline,
            )
        })
        .collect()
    }

    pub fn validate(&self) -> Result<(), ChartwellSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "text", len, self.text.len())?;
        check_len(&self.name, "x", len, self.x.len())?;
        check_len(&self.name, "y", len, self.y.len())?;
        check_len(&self.name, "align", len, self.align.len())?;
        check_len(&self.name, "baseline", len, self.baseline.len())?;
        check_len(&self.name, "angle", len, self.angle.len())?;
        check_len(&self.name, "color", len, self.color.len())
    }
}

/// Box of `size` placed relative to `anchor`
pub fn anchored_bounds(
    anchor: [f32; 2],
    size: TextBounds,
    align: TextAlign,
    baseline: TextBaseline,
) -> Bounds {
    let x = match align {
        TextAlign::Left => anchor[0],
        TextAlign::Center => anchor[0] - size.width / 2.0,
        TextAlign::Right => anchor[0] - size.width,
    };
    let y = match baseline {
        TextBaseline::Top => anchor[1],
        TextBaseline::Middle => anchor[1] - size.height / 2.0,
        TextBaseline::Bottom => anchor[1] - size.height,
        // Descent is approximated as a fifth of the line height
        TextBaseline::Alphabetic => anchor[1] - size.height * 0.8,
    };
    Bounds::new(x, y, size.width, size.height)
}

impl Default for SceneTextMark {
    fn default() -> Self {
        Self {
            name: "text_mark".to_string(),
            clip: false,
            len: 1,
            text: ScalarOrArray::Scalar(String::new()),
            x: ScalarOrArray::Scalar(0.0),
            y: ScalarOrArray::Scalar(0.0),
            align: ScalarOrArray::Scalar(TextAlign::Left),
            baseline: ScalarOrArray::Scalar(TextBaseline::Middle),
            angle: ScalarOrArray::Scalar(0.0),
            color: ScalarOrArray::Scalar(ColorOrGradient::Color([0.0, 0.0, 0.0, 1.0])),
            font: FontSpec::default(),
            zindex: None,
        }
    }
}

impl From<SceneTextMark> for SceneMark {
    fn from(mark: SceneTextMark) -> Self {
        SceneMark::Text(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_anchored_bounds() {
        let size = TextBounds {
            width: 40.0,
            height: 10.0,
        };
        let b = anchored_bounds([100.0, 50.0], size, TextAlign::Center, TextBaseline::Middle);
        assert_approx_eq!(f32, b.x, 80.0);
        assert_approx_eq!(f32, b.y, 45.0);
        let b = anchored_bounds([100.0, 50.0], size, TextAlign::Right, TextBaseline::Top);
        assert_approx_eq!(f32, b.x, 60.0);
        assert_approx_eq!(f32, b.y, 50.0);
    }
}
