use chartwell_common::types::{ColorOrGradient, StrokeStyle};
use chartwell_common::value::ScalarOrArray;
use itertools::izip;
use lyon_path::geom::point;
use lyon_path::Path;
use serde::{Deserialize, Serialize};

use super::mark::{check_len, SceneMark};
use crate::error::ChartwellSceneGraphError;

/// Connected polyline; undefined points break the line into segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneLineMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub defined: ScalarOrArray<bool>,
    pub stroke: ColorOrGradient,
    pub stroke_style: StrokeStyle,
    pub zindex: Option<i32>,
}

impl SceneLineMark {
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize)
    }

    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize)
    }

    pub fn defined_iter(&self) -> Box<dyn Iterator<Item = &bool> + '_> {
        self.defined.as_iter(self.len as usize)
    }

    pub fn validate(&self) -> Result<(), ChartwellSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "x", len, self.x.len())?;
        check_len(&self.name, "y", len, self.y.len())?;
        check_len(&self.name, "defined", len, self.defined.len())
    }

    pub fn transformed_path(&self, origin: [f32; 2]) -> Path {
        let mut path_builder = Path::builder().with_svg();
        let mut path_len = 0;
        for (x, y, defined) in izip!(self.x_iter(), self.y_iter(), self.defined_iter()) {
            if *defined && x.is_finite() && y.is_finite() {
                if path_len > 0 {
                    path_builder.line_to(point(*x + origin[0], *y + origin[1]));
                } else {
                    path_builder.move_to(point(*x + origin[0], *y + origin[1]));
                }
                path_len += 1;
            } else {
                path_len = 0;
            }
        }
        path_builder.build()
    }
}

impl Default for SceneLineMark {
    fn default() -> Self {
        Self {
            name: "line_mark".to_string(),
            clip: true,
            len: 1,
            x: ScalarOrArray::Scalar(0.0),
            y: ScalarOrArray::Scalar(0.0),
            defined: ScalarOrArray::Scalar(true),
            stroke: ColorOrGradient::Color([0.0, 0.0, 0.0, 1.0]),
            stroke_style: StrokeStyle::default(),
            zindex: None,
        }
    }
}

impl From<SceneLineMark> for SceneMark {
    fn from(mark: SceneLineMark) -> Self {
        SceneMark::Line(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyon_path::PathEvent;

    #[test]
    fn test_gap_starts_new_subpath() {
        let mark = SceneLineMark {
            len: 4,
            x: vec![0.0, 1.0, 2.0, 3.0].into(),
            y: vec![0.0, 1.0, f32::NAN, 3.0].into(),
            ..Default::default()
        };
        let begins = mark
            .transformed_path([0.0, 0.0])
            .iter()
            .filter(|e| matches!(e, PathEvent::Begin { .. }))
            .count();
        assert_eq!(begins, 2);
    }
}
