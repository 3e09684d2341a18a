pub mod category;
pub mod value;

use chartwell_common::layout::{Bounds, RectangleEdge};
use chartwell_common::types::{colors, ColorOrGradient, FontSpec};
use chartwell_guides::axis::AxisMarksConfig;
use serde::{Deserialize, Serialize};

pub use category::CategoryAxis;
pub use value::{Tick, ValueAxis, ValueAxisKind};

/// Appearance shared by value and category axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisStyle {
    pub visible: bool,
    pub line_visible: bool,
    pub line_paint: ColorOrGradient,
    pub line_width: f32,
    pub label_font: FontSpec,
    pub label_paint: ColorOrGradient,
    pub tick_labels_visible: bool,
    pub tick_label_font: FontSpec,
    pub tick_label_paint: ColorOrGradient,
    pub tick_marks_visible: bool,
    pub tick_mark_inside_length: f32,
    pub tick_mark_outside_length: f32,
    pub tick_mark_paint: ColorOrGradient,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            visible: true,
            line_visible: true,
            line_paint: ColorOrGradient::Color(colors::GRAY),
            line_width: 0.5,
            label_font: FontSpec::new("SansSerif", 12.0, false),
            label_paint: ColorOrGradient::Color(colors::DARK_GRAY),
            tick_labels_visible: true,
            tick_label_font: FontSpec::new("SansSerif", 10.0, false),
            tick_label_paint: ColorOrGradient::Color(colors::DARK_GRAY),
            tick_marks_visible: true,
            tick_mark_inside_length: 0.0,
            tick_mark_outside_length: 2.0,
            tick_mark_paint: ColorOrGradient::Color(colors::GRAY),
        }
    }
}

impl AxisStyle {
    pub(crate) fn marks_config(
        &self,
        edge: RectangleEdge,
        data_area: &Bounds,
        label: Option<&str>,
        tick_positions: Vec<f32>,
        tick_labels: Vec<String>,
    ) -> AxisMarksConfig {
        AxisMarksConfig {
            edge,
            data_area: *data_area,
            cursor: axis_cursor(data_area, edge),
            tick_positions,
            tick_labels,
            label: label.map(str::to_string),
            label_font: self.label_font.clone(),
            label_paint: self.label_paint.clone(),
            line_visible: self.line_visible,
            line_paint: self.line_paint.clone(),
            line_width: self.line_width,
            tick_marks_visible: self.tick_marks_visible,
            tick_mark_inside_length: self.tick_mark_inside_length,
            tick_mark_outside_length: self.tick_mark_outside_length,
            tick_mark_paint: self.tick_mark_paint.clone(),
            tick_labels_visible: self.tick_labels_visible,
            tick_label_font: self.tick_label_font.clone(),
            tick_label_paint: self.tick_label_paint.clone(),
            ..Default::default()
        }
    }
}

/// Coordinate of the data area side an axis on `edge` is drawn along
pub fn axis_cursor(data_area: &Bounds, edge: RectangleEdge) -> f32 {
    match edge {
        RectangleEdge::Top => data_area.min_y(),
        RectangleEdge::Bottom => data_area.max_y(),
        RectangleEdge::Left => data_area.min_x(),
        RectangleEdge::Right => data_area.max_x(),
    }
}

/// Length of the data area along an axis drawn on `edge`
pub fn axis_length(data_area: &Bounds, edge: RectangleEdge) -> f32 {
    if edge.is_top_or_bottom() {
        data_area.width
    } else {
        data_area.height
    }
}
