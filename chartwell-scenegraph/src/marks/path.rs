use chartwell_common::lyon::paths_equal;
use chartwell_common::types::{ColorOrGradient, StrokeStyle};
use chartwell_common::value::ScalarOrArray;
use lyon_path::Path;
use serde::{Deserialize, Serialize};

use super::mark::{check_len, SceneMark};
use crate::error::ChartwellSceneGraphError;

/// Arbitrary lyon paths in absolute coordinates of the enclosing group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScenePathMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub path: ScalarOrArray<Path>,
    pub fill: ScalarOrArray<ColorOrGradient>,
    pub stroke: ScalarOrArray<ColorOrGradient>,
    pub stroke_style: StrokeStyle,
    pub zindex: Option<i32>,
}

impl PartialEq for ScenePathMark {
    fn eq(&self, other: &Self) -> bool {
        let paths_match = self.path.len() == other.path.len()
            && self
                .path_iter()
                .zip(other.path_iter())
                .all(|(a, b)| paths_equal(a, b));
        paths_match
            && self.name == other.name
            && self.clip == other.clip
            && self.len == other.len
            && self.fill == other.fill
            && self.stroke == other.stroke
            && self.stroke_style == other.stroke_style
            && self.zindex == other.zindex
    }
}

impl ScenePathMark {
    pub fn from_paths(
        name: &str,
        paths: Vec<Path>,
        fill: ScalarOrArray<ColorOrGradient>,
        stroke: ScalarOrArray<ColorOrGradient>,
        stroke_style: StrokeStyle,
    ) -> Self {
        Self {
            name: name.to_string(),
            len: paths.len() as u32,
            path: ScalarOrArray::Array(paths),
            fill,
            stroke,
            stroke_style,
            ..Default::default()
        }
    }

    pub fn path_iter(&self) -> Box<dyn Iterator<Item = &Path> + '_> {
        self.path.as_iter(self.len as usize)
    }

    pub fn transformed_path_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = Path> + '_> {
        let transform = lyon_path::geom::euclid::Transform2D::translation(origin[0], origin[1]);
        Box::new(
            self.path_iter()
                .map(move |path| path.clone().transformed(&transform)),
        )
    }

    pub fn validate(&self) -> Result<(), ChartwellSceneGraphError> {
        let len = self.len as usize;
        check_len(&self.name, "path", len, self.path.len())?;
        check_len(&self.name, "fill", len, self.fill.len())?;
        check_len(&self.name, "stroke", len, self.stroke.len())
    }
}

impl Default for ScenePathMark {
    fn default() -> Self {
        Self {
            name: "path_mark".to_string(),
            clip: true,
            len: 1,
            path: ScalarOrArray::Scalar(Path::default()),
            fill: ScalarOrArray::Scalar(ColorOrGradient::Color([0.0, 0.0, 0.0, 0.0])),
            stroke: ScalarOrArray::Scalar(ColorOrGradient::Color([0.0, 0.0, 0.0, 0.0])),
            stroke_style: StrokeStyle::default(),
            zindex: None,
        }
    }
}

impl From<ScenePathMark> for SceneMark {
    fn from(mark: ScenePathMark) -> Self {
        SceneMark::Path(mark)
    }
}
