use chartwell_common::shapes::{arc_path, ring_segment_path, ArcType};
use chartwell_common::types::ColorOrGradient;
use chartwell_common::value::ScalarOrArray;
use itertools::izip;
use lyon_path::Path;
use serde::{Deserialize, Serialize};

use super::mark::{check_len, SceneMark};
use crate::error::ChartwellSceneGraphError;

/// Circular arcs, pie sections and ring segments.
///
/// Angles are in degrees with zero at three o'clock and positive extents
/// sweeping counter-clockwise on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneArcMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub arc_type: ArcType,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub start_angle: ScalarOrArray<f32>,
    pub extent: ScalarOrArray<f32>,
    pub outer_radius: ScalarOrArray<f32>,
    pub inner_radius: ScalarOrArray<f32>,
    pub fill: ScalarOrArray<ColorOrGradient>,
    pub stroke: ScalarOrArray<ColorOrGradient>,
    pub stroke_width: f32,
    pub zindex: Option<i32>,
}

impl SceneArcMark {
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize)
    }
    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize)
    }
    pub fn start_angle_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.start_angle.as_iter(self.len as usize)
    }
    pub fn extent_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.extent.as_iter(self.len as usize)
    }
    pub fn outer_radius_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.outer_radius.as_iter(self.len as usize)
    }
    pub fn inner_radius_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.inner_radius.as_iter(self.len as usize)
    }
    pub fn validate(&self) -> Result<(), ChartwellSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "x", len, self.x.len())?;
        check_len(&self.name, "y", len, self.y.len())?;
        check_len(&self.name, "start_angle", len, self.start_angle.len())?;
        check_len(&self.name, "extent", len, self.extent.len())?;
        check_len(&self.name, "outer_radius", len, self.outer_radius.len())?;
        check_len(&self.name, "inner_radius", len, self.inner_radius.len())?;
        check_len(&self.name, "fill", len, self.fill.len())?;
        check_len(&self.name, "stroke", len, self.stroke.len())
    }

    pub fn transformed_path_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = Path> + '_> {
        let arc_type = self.arc_type;
        Box::new(
            izip!(
                self.x_iter(),
                self.y_iter(),
                self.start_angle_iter(),
                self.extent_iter(),
                self.outer_radius_iter(),
                self.inner_radius_iter()
            )
            .map(move |(x, y, start, extent, outer, inner)| {
                let cx = *x + origin[0];
                let cy = *y + origin[1];
                if *inner > 0.0 {
                    ring_segment_path(cx, cy, *inner, *outer, *start, *extent)
                } else {
                    arc_path(cx, cy, *outer, *outer, *start, *extent, arc_type)
                }
            }),
        )
    }
}

impl Default for SceneArcMark {
    fn default() -> Self {
        Self {
            name: "arc_mark".to_string(),
            clip: true,
            len: 1,
            arc_type: ArcType::Pie,
            x: ScalarOrArray::Scalar(0.0),
            y: ScalarOrArray::Scalar(0.0),
            start_angle: ScalarOrArray::Scalar(0.0),
            extent: ScalarOrArray::Scalar(0.0),
            outer_radius: ScalarOrArray::Scalar(0.0),
            inner_radius: ScalarOrArray::Scalar(0.0),
            fill: ScalarOrArray::Scalar(ColorOrGradient::Color([0.0, 0.0, 0.0, 1.0])),
            stroke: ScalarOrArray::Scalar(ColorOrGradient::Color([0.0, 0.0, 0.0, 0.0])),
            stroke_width: 0.0,
            zindex: None,
        }
    }
}

impl From<SceneArcMark> for SceneMark {
    fn from(mark: SceneArcMark) -> Self {
        SceneMark::Arc(mark)
    }
}
