use chartwell_common::shapes::polygon_path;
use chartwell_common::types::{ColorOrGradient, StrokeStyle};
use chartwell_common::value::ScalarOrArray;
use itertools::izip;
use lyon_path::Path;
use serde::{Deserialize, Serialize};

use super::mark::{check_len, SceneMark};
use crate::error::ChartwellSceneGraphError;

/// Filled region between an upper edge (`x`, `y`) and a lower edge (`x2`, `y2`).
///
/// The outline walks the upper edge forward and the lower edge in reverse.
/// Undefined points split the area into separate polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneAreaMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub x2: ScalarOrArray<f32>,
    pub y2: ScalarOrArray<f32>,
    pub defined: ScalarOrArray<bool>,
    pub fill: ColorOrGradient,
    pub stroke: ColorOrGradient,
    pub stroke_style: StrokeStyle,
    pub zindex: Option<i32>,
}

impl SceneAreaMark {
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize)
    }

    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize)
    }

    pub fn x2_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x2.as_iter(self.len as usize)
    }

    pub fn y2_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y2.as_iter(self.len as usize)
    }

    pub fn defined_iter(&self) -> Box<dyn Iterator<Item = &bool> + '_> {
        self.defined.as_iter(self.len as usize)
    }

    pub fn validate(&self) -> Result<(), ChartwellSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "x", len, self.x.len())?;
        check_len(&self.name, "y", len, self.y.len())?;
        check_len(&self.name, "x2", len, self.x2.len())?;
        check_len(&self.name, "y2", len, self.y2.len())?;
        check_len(&self.name, "defined", len, self.defined.len())
    }

    /// Outline polygons, one per run of defined points
    pub fn polygons(&self, origin: [f32; 2]) -> Vec<Vec<[f32; 2]>> {
        let mut polygons = Vec::new();
        let mut upper: Vec<[f32; 2]> = Vec::new();
        let mut lower: Vec<[f32; 2]> = Vec::new();

        let mut flush = |upper: &mut Vec<[f32; 2]>, lower: &mut Vec<[f32; 2]>| {
            if upper.len() >= 2 {
                let mut outline = std::mem::take(upper);
                outline.extend(lower.drain(..).rev());
                polygons.push(outline);
            }
            upper.clear();
            lower.clear();
        };

        for (x, y, x2, y2, defined) in izip!(
            self.x_iter(),
            self.y_iter(),
            self.x2_iter(),
            self.y2_iter(),
            self.defined_iter()
        ) {
            if *defined {
                upper.push([*x + origin[0], *y + origin[1]]);
                lower.push([*x2 + origin[0], *y2 + origin[1]]);
            } else {
                flush(&mut upper, &mut lower);
            }
        }
        flush(&mut upper, &mut lower);
        polygons
    }

    pub fn transformed_path(&self, origin: [f32; 2]) -> Path {
        let mut builder = Path::builder();
        for polygon in self.polygons(origin) {
            let path = polygon_path(&polygon, true);
            for evt in path.iter() {
                builder.path_event(evt);
            }
        }
        builder.build()
    }
}

impl Default for SceneAreaMark {
    fn default() -> Self {
        Self {
            name: "area_mark".to_string(),
            clip: true,
            len: 1,
            x: ScalarOrArray::Scalar(0.0),
            y: ScalarOrArray::Scalar(0.0),
            x2: ScalarOrArray::Scalar(0.0),
            y2: ScalarOrArray::Scalar(0.0),
            defined: ScalarOrArray::Scalar(true),
            fill: ColorOrGradient::Color([0.0, 0.0, 0.0, 0.0]),
            stroke: ColorOrGradient::Color([0.0, 0.0, 0.0, 0.0]),
            stroke_style: StrokeStyle::default(),
            zindex: None,
        }
    }
}

impl From<SceneAreaMark> for SceneMark {
    fn from(mark: SceneAreaMark) -> Self {
        SceneMark::Area(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_then_reverse_walk() {
        let mark = SceneAreaMark {
            len: 3,
            x: vec![0.0, 1.0, 2.0].into(),
            y: vec![5.0, 4.0, 3.0].into(),
            x2: vec![0.0, 1.0, 2.0].into(),
            y2: vec![10.0, 9.0, 8.0].into(),
            ..Default::default()
        };
        let polygons = mark.polygons([0.0, 0.0]);
        assert_eq!(polygons.len(), 1);
        assert_eq!(
            polygons[0],
            vec![
                [0.0, 5.0],
                [1.0, 4.0],
                [2.0, 3.0],
                [2.0, 8.0],
                [1.0, 9.0],
                [0.0, 10.0]
            ]
        );
    }

    #[test]
    fn test_undefined_splits_area() {
        let mark = SceneAreaMark {
            len: 5,
            x: vec![0.0, 1.0, 2.0, 3.0, 4.0].into(),
            y: vec![1.0; 5].into(),
            x2: vec![0.0, 1.0, 2.0, 3.0, 4.0].into(),
            y2: vec![0.0; 5].into(),
            defined: vec![true, true, false, true, true].into(),
            ..Default::default()
        };
        assert_eq!(mark.polygons([0.0, 0.0]).len(), 2);
    }
}
