use chartwell_common::types::{ColorOrGradient, SymbolShape};
use chartwell_common::value::ScalarOrArray;
use itertools::izip;
use lyon_path::Path;
use serde::{Deserialize, Serialize};

use super::mark::{check_len, SceneMark};
use crate::error::ChartwellSceneGraphError;

/// Item shapes drawn at points, as used by shape renderers and legend items.
/// `size` is the side of the box each shape fits in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneSymbolMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub shape: ScalarOrArray<SymbolShape>,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub size: ScalarOrArray<f32>,
    pub fill: ScalarOrArray<ColorOrGradient>,
    pub stroke: ScalarOrArray<ColorOrGradient>,
    pub stroke_width: Option<f32>,
    pub zindex: Option<i32>,
}

impl SceneSymbolMark {
    pub fn shape_iter(&self) -> Box<dyn Iterator<Item = &SymbolShape> + '_> {
        self.shape.as_iter(self.len as usize)
    }

    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize)
    }

    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize)
    }

    pub fn size_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.size.as_iter(self.len as usize)
    }

    pub fn transformed_path_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = Path> + '_> {
        Box::new(
            izip!(
                self.shape_iter(),
                self.x_iter(),
                self.y_iter(),
                self.size_iter()
            )
            .map(move |(shape, x, y, size)| {
                shape.path_at([*x + origin[0], *y + origin[1]], *size)
            }),
        )
    }

    pub fn validate(&self) -> Result<(), ChartwellSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "shape", len, self.shape.len())?;
        check_len(&self.name, "x", len, self.x.len())?;
        check_len(&self.name, "y", len, self.y.len())?;
        check_len(&self.name, "size", len, self.size.len())?;
        check_len(&self.name, "fill", len, self.fill.len())?;
        check_len(&self.name, "stroke", len, self.stroke.len())
    }
}

impl Default for SceneSymbolMark {
    fn default() -> Self {
        Self {
            name: "symbol_mark".to_string(),
            clip: true,
            len: 1,
            shape: ScalarOrArray::Scalar(SymbolShape::Square),
            x: ScalarOrArray::Scalar(0.0),
            y: ScalarOrArray::Scalar(0.0),
            size: ScalarOrArray::Scalar(6.0),
            fill: ScalarOrArray::Scalar(ColorOrGradient::Color([0.0, 0.0, 0.0, 0.0])),
            stroke: ScalarOrArray::Scalar(ColorOrGradient::Color([0.0, 0.0, 0.0, 0.0])),
            stroke_width: None,
            zindex: None,
        }
    }
}

impl From<SceneSymbolMark> for SceneMark {
    fn from(mark: SceneSymbolMark) -> Self {
        SceneMark::Symbol(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartwell_common::shapes::path_bounds;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_symbol_paths_centered_on_points() {
        let mark = SceneSymbolMark {
            len: 2,
            shape: vec![SymbolShape::Square, SymbolShape::Diamond].into(),
            x: vec![10.0, 20.0].into(),
            y: 5.0.into(),
            size: 4.0.into(),
            ..Default::default()
        };
        let bounds: Vec<_> = mark
            .transformed_path_iter([0.0, 0.0])
            .map(|p| path_bounds(&p).unwrap())
            .collect();
        assert_approx_eq!(f32, bounds[0].center_x(), 10.0);
        assert_approx_eq!(f32, bounds[1].center_x(), 20.0);
        assert_approx_eq!(f32, bounds[1].width, 4.0);
        assert_approx_eq!(f32, bounds[1].center_y(), 5.0);
    }
}
