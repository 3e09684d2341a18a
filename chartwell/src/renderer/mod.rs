//! Renderers turn dataset items into marks.
//!
//! A plot owns one renderer per dataset. For every pass the renderer reports,
//! the plot calls `draw_item` once per visible item, handing it a
//! [`RendererState`] that collects marks, entities and the crosshair point
//! for the whole dataset. Styles are composed from a [`styles::SeriesStyles`]
//! and the plot's drawing supplier rather than inherited.

pub mod buffer;
pub mod category;
pub mod styles;
pub mod xy;

use chartwell_common::layout::{Bounds, PlotOrientation};
use chartwell_common::types::{ColorOrGradient, StrokeStyle};
use chartwell_scenegraph::marks::line::SceneLineMark;
use chartwell_scenegraph::marks::mark::SceneMark;
use chartwell_scenegraph::marks::text::{TextAlign, TextBaseline};
use lyon_path::Path;
use serde::{Deserialize, Serialize};

use crate::entity::{ChartEntity, EntityCollection, EntityKind};
use crate::labels::{CategoryLabelGenerator, XYLabelGenerator};
use crate::plot::crosshair::CrosshairState;
use crate::urls::{CategoryUrlGenerator, XYUrlGenerator};
use buffer::{MarkBuffer, TextItem};
use styles::SeriesStyles;

pub use category::{CategoryItemContext, CategoryItemRenderer, CategoryRendererKind};
pub use xy::{XYItemContext, XYItemRenderer, XYRendererKind};

/// Gap between an item and its label
const ITEM_LABEL_OFFSET: f32 = 4.0;

/// Tooltip, URL and item label generators attached to a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemGenerators<L, U> {
    pub tooltip: Option<L>,
    pub url: Option<U>,
    pub item_label: Option<L>,
}

impl<L, U> Default for ItemGenerators<L, U> {
    fn default() -> Self {
        Self {
            tooltip: None,
            url: None,
            item_label: None,
        }
    }
}

pub type XYGenerators = ItemGenerators<XYLabelGenerator, XYUrlGenerator>;
pub type CategoryGenerators = ItemGenerators<CategoryLabelGenerator, CategoryUrlGenerator>;

/// Hit area of an item
#[derive(Debug, Clone)]
pub(crate) enum EntityShape {
    Rect(Bounds),
    Path(Path),
}

impl EntityShape {
    pub(crate) fn into_entity(self, kind: EntityKind) -> ChartEntity {
        match self {
            EntityShape::Rect(bounds) => ChartEntity::rect(bounds, kind),
            EntityShape::Path(path) => ChartEntity::from_path(path, kind),
        }
    }
}

/// Points of one series polyline, with gaps where items are missing
#[derive(Debug, Clone, Default)]
pub(crate) struct LineBuffer {
    x: Vec<f32>,
    y: Vec<f32>,
    defined: Vec<bool>,
}

impl LineBuffer {
    pub(crate) fn push(&mut self, point: Option<[f32; 2]>) {
        let [x, y] = point.unwrap_or([0.0, 0.0]);
        self.x.push(x);
        self.y.push(y);
        self.defined.push(point.is_some());
    }

    /// Line mark for the buffered points, `None` if fewer than two are defined
    pub(crate) fn take_mark(
        &mut self,
        name: &str,
        stroke: ColorOrGradient,
        stroke_style: StrokeStyle,
    ) -> Option<SceneLineMark> {
        let line = std::mem::take(self);
        if line.defined.iter().filter(|d| **d).count() < 2 {
            return None;
        }
        Some(SceneLineMark {
            name: name.to_string(),
            len: line.x.len() as u32,
            x: line.x.into(),
            y: line.y.into(),
            defined: line.defined.into(),
            stroke,
            stroke_style,
            ..Default::default()
        })
    }
}

/// Everything a renderer accumulates while drawing one dataset
#[derive(Debug, Clone, Default)]
pub struct RendererState {
    pub marks: MarkBuffer,
    /// `None` when the caller did not ask for rendering info
    pub entities: Option<EntityCollection>,
    pub crosshair: CrosshairState,
    /// Bar width worked out by bar renderers in `initialise`
    pub bar_width: f32,
    pub(crate) line: LineBuffer,
}

impl RendererState {
    pub fn new(collect_entities: bool, anchor: Option<[f32; 2]>) -> Self {
        Self {
            entities: collect_entities.then(EntityCollection::new),
            crosshair: CrosshairState::new(anchor),
            ..Default::default()
        }
    }

    pub fn add_entity(&mut self, entity: ChartEntity) {
        if let Some(entities) = self.entities.as_mut() {
            entities.add(entity);
        }
    }

    pub fn collects_entities(&self) -> bool {
        self.entities.is_some()
    }

    pub fn into_marks(self) -> (Vec<SceneMark>, Option<EntityCollection>, CrosshairState) {
        (self.marks.into_marks(), self.entities, self.crosshair)
    }

    /// Places `text` next to `anchor`, on the side away from the base value
    pub(crate) fn item_label(
        &mut self,
        name: &str,
        text: String,
        anchor: [f32; 2],
        positive: bool,
        orientation: PlotOrientation,
        styles: &SeriesStyles,
    ) {
        let (position, align, baseline) = match (orientation, positive) {
            (PlotOrientation::Vertical, true) => (
                [anchor[0], anchor[1] - ITEM_LABEL_OFFSET],
                TextAlign::Center,
                TextBaseline::Bottom,
            ),
            (PlotOrientation::Vertical, false) => (
                [anchor[0], anchor[1] + ITEM_LABEL_OFFSET],
                TextAlign::Center,
                TextBaseline::Top,
            ),
            (PlotOrientation::Horizontal, true) => (
                [anchor[0] + ITEM_LABEL_OFFSET, anchor[1]],
                TextAlign::Left,
                TextBaseline::Middle,
            ),
            (PlotOrientation::Horizontal, false) => (
                [anchor[0] - ITEM_LABEL_OFFSET, anchor[1]],
                TextAlign::Right,
                TextBaseline::Middle,
            ),
        };
        self.marks.text(
            name,
            TextItem {
                text,
                position,
                align,
                baseline,
                color: styles.item_label_paint.clone(),
            },
            &styles.item_label_font,
        );
    }
}

/// Screen rectangle spanning a value interval along the range axis and a
/// band along the domain or category axis
pub(crate) fn oriented_bar(
    orientation: PlotOrientation,
    domain_start: f32,
    domain_width: f32,
    range_a: f32,
    range_b: f32,
) -> Bounds {
    let (lo, hi) = (range_a.min(range_b), range_a.max(range_b));
    match orientation {
        PlotOrientation::Vertical => Bounds::new(domain_start, lo, domain_width, hi - lo),
        PlotOrientation::Horizontal => Bounds::new(lo, domain_start, hi - lo, domain_width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartwell_common::types::colors;

    #[test]
    fn test_line_buffer_needs_two_points() {
        let mut line = LineBuffer::default();
        line.push(Some([0.0, 0.0]));
        line.push(None);
        assert!(line
            .take_mark("l", ColorOrGradient::Color(colors::RED), StrokeStyle::new(1.0))
            .is_none());

        line.push(Some([0.0, 0.0]));
        line.push(None);
        line.push(Some([2.0, 1.0]));
        let mark = line
            .take_mark("l", ColorOrGradient::Color(colors::RED), StrokeStyle::new(1.0))
            .unwrap();
        assert_eq!(mark.len, 3);
        assert_eq!(mark.defined.as_vec(3), vec![true, false, true]);
    }

    #[test]
    fn test_oriented_bar() {
        let bar = oriented_bar(PlotOrientation::Vertical, 10.0, 5.0, 80.0, 20.0);
        assert_eq!(bar, Bounds::new(10.0, 20.0, 5.0, 60.0));
        let bar = oriented_bar(PlotOrientation::Horizontal, 10.0, 5.0, 80.0, 20.0);
        assert_eq!(bar, Bounds::new(20.0, 10.0, 60.0, 5.0));
    }

    #[test]
    fn test_entities_only_when_requested() {
        let mut state = RendererState::new(false, None);
        state.add_entity(ChartEntity::rect(Bounds::default(), EntityKind::Plot));
        assert!(state.entities.is_none());

        let mut state = RendererState::new(true, None);
        state.add_entity(ChartEntity::rect(Bounds::default(), EntityKind::Plot));
        assert_eq!(state.entities.map(|e| e.len()), Some(1));
    }
}
