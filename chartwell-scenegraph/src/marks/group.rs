use chartwell_common::layout::Bounds;
use chartwell_common::types::ColorOrGradient;
use serde::{Deserialize, Serialize};

use crate::marks::mark::SceneMark;

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clip {
    #[default]
    None,
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

impl Clip {
    pub fn from_bounds(bounds: &Bounds) -> Self {
        Clip::Rect {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
        }
    }

    pub fn translate(&self, translate_x: f32, translate_y: f32) -> Self {
        match self {
            Clip::None => Clip::None,
            Clip::Rect {
                x,
                y,
                width,
                height,
            } => Clip::Rect {
                x: *x + translate_x,
                y: *y + translate_y,
                width: *width,
                height: *height,
            },
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        match self {
            Clip::None => true,
            Clip::Rect {
                x: cx,
                y: cy,
                width,
                height,
            } => Bounds::new(*cx, *cy, *width, *height).contains(x, y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneGroup {
    pub name: String,
    pub origin: [f32; 2],
    pub clip: Clip,
    pub marks: Vec<SceneMark>,
    pub fill: Option<ColorOrGradient>,
    pub stroke: Option<ColorOrGradient>,
    pub stroke_width: Option<f32>,
    pub zindex: Option<i32>,
}

impl SceneGroup {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_origin(mut self, origin: [f32; 2]) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_clip(mut self, clip: Clip) -> Self {
        self.clip = clip;
        self
    }

    pub fn push(&mut self, mark: impl Into<SceneMark>) {
        self.marks.push(mark.into());
    }

    pub fn extend<I: IntoIterator<Item = SceneMark>>(&mut self, marks: I) {
        self.marks.extend(marks);
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Child marks ordered by zindex, stable for equal zindex
    pub fn sorted_marks(&self) -> Vec<&SceneMark> {
        let mut marks: Vec<&SceneMark> = self.marks.iter().collect();
        marks.sort_by_key(|m| m.zindex().unwrap_or(0));
        marks
    }
}

impl Default for SceneGroup {
    fn default() -> Self {
        Self {
            name: "group".to_string(),
            origin: [0.0, 0.0],
            clip: Clip::None,
            marks: vec![],
            fill: None,
            stroke: None,
            stroke_width: None,
            zindex: None,
        }
    }
}

impl From<SceneGroup> for SceneMark {
    fn from(mark: SceneGroup) -> Self {
        SceneMark::Group(mark)
    }
}
