use chartwell_common::layout::Bounds;
use chartwell_common::shapes::rect_path;
use chartwell_common::types::ColorOrGradient;
use chartwell_common::value::ScalarOrArray;
use itertools::izip;
use lyon_path::Path;
use serde::{Deserialize, Serialize};

use super::mark::{check_len, SceneMark};
use crate::error::ChartwellSceneGraphError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneRectMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub width: ScalarOrArray<f32>,
    pub height: ScalarOrArray<f32>,
    pub fill: ScalarOrArray<ColorOrGradient>,
    pub stroke: ScalarOrArray<ColorOrGradient>,
    pub stroke_width: ScalarOrArray<f32>,
    pub corner_radius: f32,
    pub zindex: Option<i32>,
}

impl SceneRectMark {
    /// One rectangle per bounds, filled and stroked uniformly
    pub fn from_bounds(
        name: &str,
        bounds: &[Bounds],
        fill: ColorOrGradient,
        stroke: ColorOrGradient,
        stroke_width: f32,
    ) -> Self {
        Self {
            name: name.to_string(),
            len: bounds.len() as u32,
            x: bounds.iter().map(|b| b.x).collect::<Vec<_>>().into(),
            y: bounds.iter().map(|b| b.y).collect::<Vec<_>>().into(),
            width: bounds.iter().map(|b| b.width).collect::<Vec<_>>().into(),
            height: bounds.iter().map(|b| b.height).collect::<Vec<_>>().into(),
            fill: fill.into(),
            stroke: stroke.into(),
            stroke_width: stroke_width.into(),
            ..Default::default()
        }
    }

    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize)
    }

    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize)
    }

    pub fn width_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.width.as_iter(self.len as usize)
    }

    pub fn height_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.height.as_iter(self.len as usize)
    }

    pub fn stroke_width_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.stroke_width.as_iter(self.len as usize)
    }

    /// Normalized bounds of each rectangle, offset by `origin`
    pub fn bounds_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = Bounds> + '_> {
        Box::new(
            izip!(
                self.x_iter(),
                self.y_iter(),
                self.width_iter(),
                self.height_iter()
            )
            .map(move |(x, y, w, h)| {
                Bounds::from_corners(
                    *x + origin[0],
                    *y + origin[1],
                    *x + *w + origin[0],
                    *y + *h + origin[1],
                )
            }),
        )
    }

    pub fn transformed_path_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = Path> + '_> {
        Box::new(
            self.bounds_iter(origin)
                .map(|b| rect_path(b.x, b.y, b.width, b.height)),
        )
    }

    pub fn validate(&self) -> Result<(), ChartwellSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "x", len, self.x.len())?;
        check_len(&self.name, "y", len, self.y.len())?;
        check_len(&self.name, "width", len, self.width.len())?;
        check_len(&self.name, "height", len, self.height.len())?;
        check_len(&self.name, "fill", len, self.fill.len())?;
        check_len(&self.name, "stroke", len, self.stroke.len())?;
        check_len(&self.name, "stroke_width", len, self.stroke_width.len())
    }
}

impl Default for SceneRectMark {
    fn default() -> Self {
        Self {
            name: "rect_mark".to_string(),
            clip: true,
            len: 1,
            x: ScalarOrArray::Scalar(0.0),
            y: ScalarOrArray::Scalar(0.0),
            width: ScalarOrArray::Scalar(0.0),
            height: ScalarOrArray::Scalar(0.0),
            fill: ScalarOrArray::Scalar(ColorOrGradient::Color([0.0, 0.0, 0.0, 0.0])),
            stroke: ScalarOrArray::Scalar(ColorOrGradient::Color([0.0, 0.0, 0.0, 0.0])),
            stroke_width: ScalarOrArray::Scalar(0.0),
            corner_radius: 0.0,
            zindex: None,
        }
    }
}

impl From<SceneRectMark> for SceneMark {
    fn from(mark: SceneRectMark) -> Self {
        SceneMark::Rect(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_normalize_negative_height() {
        let mark = SceneRectMark {
            len: 2,
            x: vec![0.0, 10.0].into(),
            y: 100.0.into(),
            width: 5.0.into(),
            height: vec![-20.0, 30.0].into(),
            ..Default::default()
        };
        let bounds: Vec<Bounds> = mark.bounds_iter([1.0, 1.0]).collect();
        assert_eq!(bounds[0], Bounds::new(1.0, 81.0, 5.0, 20.0));
        assert_eq!(bounds[1], Bounds::new(11.0, 101.0, 5.0, 30.0));
    }

    #[test]
    fn test_validate_length_mismatch() {
        let mark = SceneRectMark {
            len: 3,
            x: vec![0.0, 1.0].into(),
            ..Default::default()
        };
        assert!(matches!(
            mark.validate(),
            Err(ChartwellSceneGraphError::LengthMismatch { field: "x", .. })
        ));
    }
}
