use chartwell_common::shapes::polygon_path;
use chartwell_common::types::{ColorOrGradient, StrokeCap};
use chartwell_common::value::ScalarOrArray;
use itertools::izip;
use lyon_path::Path;
use serde::{Deserialize, Serialize};

use super::mark::{check_len, SceneMark};
use crate::error::ChartwellSceneGraphError;

/// Independent straight segments from (`x0`, `y0`) to (`x1`, `y1`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneRuleMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub stroke_dash: Option<Vec<f32>>,
    pub x0: ScalarOrArray<f32>,
    pub y0: ScalarOrArray<f32>,
    pub x1: ScalarOrArray<f32>,
    pub y1: ScalarOrArray<f32>,
    pub stroke: ScalarOrArray<ColorOrGradient>,
    pub stroke_width: ScalarOrArray<f32>,
    pub stroke_cap: StrokeCap,
    pub zindex: Option<i32>,
}

impl SceneRuleMark {
    pub fn x0_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x0.as_iter(self.len as usize)
    }

    pub fn y0_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y0.as_iter(self.len as usize)
    }

    pub fn x1_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x1.as_iter(self.len as usize)
    }

    pub fn y1_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y1.as_iter(self.len as usize)
    }

    pub fn stroke_width_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.stroke_width.as_iter(self.len as usize)
    }

    pub fn segments(&self, origin: [f32; 2]) -> Vec<[[f32; 2]; 2]> {
        izip!(self.x0_iter(), self.y0_iter(), self.x1_iter(), self.y1_iter())
            .map(|(x0, y0, x1, y1)| {
                [
                    [*x0 + origin[0], *y0 + origin[1]],
                    [*x1 + origin[0], *y1 + origin[1]],
                ]
            })
            .collect()
    }

    pub fn transformed_path_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = Path> + '_> {
        Box::new(
            self.segments(origin)
                .into_iter()
                .map(|segment| polygon_path(&segment, false)),
        )
    }

    pub fn validate(&self) -> Result<(), ChartwellSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "x0", len, self.x0.len())?;
        check_len(&self.name, "y0", len, self.y0.len())?;
        check_len(&self.name, "x1", len, self.x1.len())?;
        check_len(&self.name, "y1", len, self.y1.len())?;
        check_len(&self.name, "stroke", len, self.stroke.len())?;
        check_len(&self.name, "stroke_width", len, self.stroke_width.len())
    }
}

impl Default for SceneRuleMark {
    fn default() -> Self {
        Self {
            name: "rule_mark".to_string(),
            clip: true,
            len: 1,
            stroke_dash: None,
            x0: ScalarOrArray::Scalar(0.0),
            y0: ScalarOrArray::Scalar(0.0),
            x1: ScalarOrArray::Scalar(0.0),
            y1: ScalarOrArray::Scalar(0.0),
            stroke: ScalarOrArray::Scalar(ColorOrGradient::Color([0.0, 0.0, 0.0, 1.0])),
            stroke_width: ScalarOrArray::Scalar(1.0),
            stroke_cap: StrokeCap::Butt,
            zindex: None,
        }
    }
}

impl From<SceneRuleMark> for SceneMark {
    fn from(mark: SceneRuleMark) -> Self {
        SceneMark::Rule(mark)
    }
}
