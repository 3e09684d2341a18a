use crate::error::ChartwellSceneGraphError;
use crate::marks::arc::SceneArcMark;
use crate::marks::area::SceneAreaMark;
use crate::marks::group::SceneGroup;
use crate::marks::line::SceneLineMark;
use crate::marks::path::ScenePathMark;
use crate::marks::rect::SceneRectMark;
use crate::marks::rule::SceneRuleMark;
use crate::marks::symbol::SceneSymbolMark;
use crate::marks::text::SceneTextMark;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneMark {
    Arc(SceneArcMark),
    Area(SceneAreaMark),
    Path(ScenePathMark),
    Symbol(SceneSymbolMark),
    Line(SceneLineMark),
    Rect(SceneRectMark),
    Rule(SceneRuleMark),
    Text(SceneTextMark),
    Group(SceneGroup),
}

impl SceneMark {
    pub fn zindex(&self) -> Option<i32> {
        match self {
            Self::Arc(mark) => mark.zindex,
            Self::Area(mark) => mark.zindex,
            Self::Path(mark) => mark.zindex,
            Self::Symbol(mark) => mark.zindex,
            Self::Line(mark) => mark.zindex,
            Self::Rect(mark) => mark.zindex,
            Self::Rule(mark) => mark.zindex,
            Self::Text(mark) => mark.zindex,
            Self::Group(mark) => mark.zindex,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Arc(mark) => &mark.name,
            Self::Area(mark) => &mark.name,
            Self::Path(mark) => &mark.name,
            Self::Symbol(mark) => &mark.name,
            Self::Line(mark) => &mark.name,
            Self::Rect(mark) => &mark.name,
            Self::Rule(mark) => &mark.name,
            Self::Text(mark) => &mark.name,
            Self::Group(mark) => &mark.name,
        }
    }

    pub fn children(&self) -> &[SceneMark] {
        match self {
            Self::Group(mark) => &mark.marks,
            _ => &[],
        }
    }

    /// Number of drawable instances, recursing into groups
    pub fn instance_count(&self) -> usize {
        match self {
            Self::Arc(mark) => mark.len as usize,
            Self::Area(_) => 1,
            Self::Path(mark) => mark.len as usize,
            Self::Symbol(mark) => mark.len as usize,
            Self::Line(_) => 1,
            Self::Rect(mark) => mark.len as usize,
            Self::Rule(mark) => mark.len as usize,
            Self::Text(mark) => mark.len as usize,
            Self::Group(group) => group.marks.iter().map(|m| m.instance_count()).sum(),
        }
    }

    /// Checks that every array-valued attribute matches the mark length
    pub fn validate(&self) -> Result<(), ChartwellSceneGraphError> {
        match self {
            Self::Arc(mark) => mark.validate(),
            Self::Area(mark) => mark.validate(),
            Self::Path(mark) => mark.validate(),
            Self::Symbol(mark) => mark.validate(),
            Self::Line(mark) => mark.validate(),
            Self::Rect(mark) => mark.validate(),
            Self::Rule(mark) => mark.validate(),
            Self::Text(mark) => mark.validate(),
            Self::Group(group) => group.marks.iter().try_for_each(|m| m.validate()),
        }
    }
}

/// Array attributes must have `expected` entries; scalars always pass
pub(crate) fn check_len(
    name: &str,
    field: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), ChartwellSceneGraphError> {
    if actual == 1 || actual == expected {
        Ok(())
    } else {
        Err(ChartwellSceneGraphError::LengthMismatch {
            name: name.to_string(),
            field,
            expected,
            actual,
        })
    }
}
