//! Plots lay out axes around a data area and hand each dataset to its
//! renderer.
//!
//! Drawing never mutates a plot: auto ranged axes are configured on copies,
//! and crosshair values resolved against the anchor are reported through the
//! rendering info. [`XYPlot::handle_click`] and
//! [`CategoryPlot::handle_click`] are the only operations that move
//! crosshairs.

pub mod category;
pub mod crosshair;
pub mod meter;
pub mod pie;
pub mod xy;

pub use category::CategoryPlot;
pub use crosshair::{Crosshair, CrosshairState};
pub use meter::{DialShape, MeterInterval, MeterPlot};
pub use pie::{PieLayout, PiePlot, PieSection, Rotation};
pub use xy::XYPlot;

use chartwell_common::layout::{Bounds, RectangleEdge, RectangleInsets};
use chartwell_common::types::{colors, ColorOrGradient, FontSpec, StrokeStyle};
use chartwell_guides::axis::{make_gridlines, AxisMarks, GridlineConfig};
use chartwell_scales::numeric::ContinuousNumericScale;
use chartwell_scenegraph::marks::group::SceneGroup;
use chartwell_scenegraph::marks::rect::SceneRectMark;
use chartwell_scenegraph::marks::rule::SceneRuleMark;
use chartwell_scenegraph::marks::text::{SceneTextMark, TextAlign, TextBaseline};
use serde::{Deserialize, Serialize};

use crate::axis::ValueAxis;
use crate::entity::{ChartEntity, EntityKind};
use crate::error::ChartwellChartError;
use crate::info::ChartRenderingInfo;
use crate::supplier::DrawingSupplier;

/// Order in which the datasets of a plot are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetRenderingOrder {
    Forward,
    /// Last dataset first, so the primary dataset ends up on top
    #[default]
    Reverse,
}

impl DatasetRenderingOrder {
    pub(crate) fn indices(&self, count: usize) -> Vec<usize> {
        match self {
            DatasetRenderingOrder::Forward => (0..count).collect(),
            DatasetRenderingOrder::Reverse => (0..count).rev().collect(),
        }
    }
}

/// Lines across the data area at the ticks of one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gridlines {
    pub visible: bool,
    pub paint: ColorOrGradient,
    pub stroke: StrokeStyle,
}

impl Default for Gridlines {
    fn default() -> Self {
        let config = GridlineConfig::default();
        Self {
            visible: true,
            paint: config.paint,
            stroke: config.stroke,
        }
    }
}

impl Gridlines {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Default::default()
        }
    }

    pub(crate) fn marks(
        &self,
        name: &str,
        data_area: &Bounds,
        positions: &[f32],
        vertical: bool,
    ) -> Result<Option<SceneRuleMark>, ChartwellChartError> {
        if !self.visible || positions.is_empty() {
            return Ok(None);
        }
        let config = GridlineConfig {
            paint: self.paint.clone(),
            stroke: self.stroke.clone(),
        };
        Ok(Some(make_gridlines(name, data_area, positions, vertical, &config)?))
    }
}

/// Background, outline, insets and automatic styles shared by every plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub background: Option<ColorOrGradient>,
    pub outline: Option<(ColorOrGradient, f32)>,
    pub insets: RectangleInsets,
    /// Shown in place of the data when there is nothing to draw
    pub no_data_message: Option<String>,
    pub no_data_font: FontSpec,
    pub no_data_paint: ColorOrGradient,
    pub drawing_supplier: DrawingSupplier,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            background: Some(ColorOrGradient::Color(colors::WHITE)),
            outline: Some((ColorOrGradient::Color(colors::GRAY), 0.5)),
            insets: RectangleInsets::new(4.0, 8.0, 4.0, 8.0),
            no_data_message: None,
            no_data_font: FontSpec::new("SansSerif", 12.0, false),
            no_data_paint: ColorOrGradient::Color(colors::BLACK),
            drawing_supplier: DrawingSupplier::default(),
        }
    }
}

impl PlotStyle {
    pub(crate) fn background_mark(&self, area: &Bounds) -> Option<SceneRectMark> {
        let fill = self.background.clone()?;
        Some(SceneRectMark {
            name: "background".to_string(),
            clip: false,
            x: area.x.into(),
            y: area.y.into(),
            width: area.width.into(),
            height: area.height.into(),
            fill: fill.into(),
            ..Default::default()
        })
    }

    pub(crate) fn outline_mark(&self, area: &Bounds) -> Option<SceneRectMark> {
        let (paint, width) = self.outline.clone()?;
        Some(SceneRectMark {
            name: "outline".to_string(),
            clip: false,
            x: area.x.into(),
            y: area.y.into(),
            width: area.width.into(),
            height: area.height.into(),
            fill: ColorOrGradient::transparent().into(),
            stroke: paint.into(),
            stroke_width: width.into(),
            ..Default::default()
        })
    }

    pub(crate) fn no_data_mark(&self, area: &Bounds) -> Option<SceneTextMark> {
        let message = self.no_data_message.clone()?;
        Some(SceneTextMark {
            name: "no_data".to_string(),
            text: message.into(),
            x: area.center_x().into(),
            y: area.center_y().into(),
            align: TextAlign::Center.into(),
            baseline: TextBaseline::Middle.into(),
            color: self.no_data_paint.clone().into(),
            font: self.no_data_font.clone(),
            ..Default::default()
        })
    }
}

/// `area` less `space` on `edge`
pub(crate) fn trim_edge(area: &Bounds, edge: RectangleEdge, space: f32) -> Bounds {
    let space = space.clamp(
        0.0,
        if edge.is_top_or_bottom() {
            area.height
        } else {
            area.width
        },
    );
    match edge {
        RectangleEdge::Top => Bounds::new(area.x, area.y + space, area.width, area.height - space),
        RectangleEdge::Bottom => Bounds::new(area.x, area.y, area.width, area.height - space),
        RectangleEdge::Left => Bounds::new(area.x + space, area.y, area.width - space, area.height),
        RectangleEdge::Right => Bounds::new(area.x, area.y, area.width - space, area.height),
    }
}

/// Screen positions of the ticks of a value axis along `edge`
pub(crate) fn tick_positions(
    axis: &ValueAxis,
    data_area: &Bounds,
    edge: RectangleEdge,
) -> Result<Vec<f32>, ChartwellChartError> {
    let scale = axis.scale(data_area, edge)?;
    Ok(axis
        .refresh_ticks(data_area, edge)?
        .iter()
        .map(|t| scale.scale(t.value) as f32)
        .filter(|p| p.is_finite())
        .collect())
}

/// Adds the axis group to `group` and its entity to the rendering info
pub(crate) fn push_axis(
    group: &mut SceneGroup,
    marks: Option<AxisMarks>,
    info: Option<&mut ChartRenderingInfo>,
) {
    let Some(marks) = marks else {
        return;
    };
    if let Some(info) = info {
        info.entities
            .add(ChartEntity::rect(marks.bounds, EntityKind::Axis));
    }
    group.push(marks.group);
}

/// Line across the data area at `coordinate`, perpendicular to an axis on
/// `edge`
pub(crate) fn crosshair_rule(
    name: &str,
    crosshair: &Crosshair,
    coordinate: f32,
    data_area: &Bounds,
    edge: RectangleEdge,
) -> Option<SceneRuleMark> {
    if !coordinate.is_finite() {
        return None;
    }
    let (x0, y0, x1, y1) = if edge.is_top_or_bottom() {
        (coordinate, data_area.min_y(), coordinate, data_area.max_y())
    } else {
        (data_area.min_x(), coordinate, data_area.max_x(), coordinate)
    };
    if !(data_area.contains(x0, y0) && data_area.contains(x1, y1)) {
        return None;
    }
    Some(SceneRuleMark {
        name: name.to_string(),
        clip: true,
        stroke_dash: crosshair.stroke.dash.clone(),
        x0: x0.into(),
        y0: y0.into(),
        x1: x1.into(),
        y1: y1.into(),
        stroke: crosshair.paint.clone().into(),
        stroke_width: crosshair.stroke.width.into(),
        ..Default::default()
    })
}

/// Crosshair value: the nearest item when locked on data, otherwise the value
/// under the anchor, falling back to the current value
pub(crate) fn resolve_crosshair(
    crosshair: &Crosshair,
    anchor_value: Option<f64>,
    data_value: Option<f64>,
) -> f64 {
    let value = if crosshair.locked_on_data {
        data_value
    } else {
        anchor_value
    };
    value.filter(|v| v.is_finite()).unwrap_or(crosshair.value)
}

/// Coordinate of `point` along an axis on `edge`
pub(crate) fn along_edge(point: [f32; 2], edge: RectangleEdge) -> f32 {
    if edge.is_top_or_bottom() {
        point[0]
    } else {
        point[1]
    }
}
