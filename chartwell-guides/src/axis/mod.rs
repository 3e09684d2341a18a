pub mod grid;

use chartwell_common::layout::{Bounds, RectangleEdge, RectangleInsets};
use chartwell_common::text::{TextBounds, TextMeasurer};
use chartwell_common::types::{colors, ColorOrGradient, FontSpec};
use chartwell_common::value::ScalarOrArray;
use chartwell_scenegraph::marks::group::SceneGroup;
use chartwell_scenegraph::marks::rule::SceneRuleMark;
use chartwell_scenegraph::marks::text::{SceneTextMark, TextAlign, TextBaseline};

use crate::error::ChartwellGuidesError;
use crate::legend::compute_encoding_length;

pub use grid::{make_gridlines, GridlineConfig};

/// Everything needed to draw one axis along an edge of the data area.
///
/// `tick_positions` are pixel coordinates along the axis (x for top and bottom
/// edges, y for left and right edges) and must pair up with `tick_labels`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisMarksConfig {
    pub edge: RectangleEdge,
    pub data_area: Bounds,
    /// Coordinate of the axis line perpendicular to the axis
    pub cursor: f32,
    pub tick_positions: Vec<f32>,
    pub tick_labels: Vec<String>,
    pub label: Option<String>,
    pub label_font: FontSpec,
    pub label_paint: ColorOrGradient,
    pub label_insets: RectangleInsets,
    pub line_visible: bool,
    pub line_paint: ColorOrGradient,
    pub line_width: f32,
    pub tick_marks_visible: bool,
    pub tick_mark_inside_length: f32,
    pub tick_mark_outside_length: f32,
    pub tick_mark_paint: ColorOrGradient,
    pub tick_labels_visible: bool,
    pub tick_label_font: FontSpec,
    pub tick_label_paint: ColorOrGradient,
    pub tick_label_insets: RectangleInsets,
}

impl Default for AxisMarksConfig {
    fn default() -> Self {
        Self {
            edge: RectangleEdge::Bottom,
            data_area: Bounds::new(0.0, 0.0, 100.0, 100.0),
            cursor: 100.0,
            tick_positions: vec![],
            tick_labels: vec![],
            label: None,
            label_font: FontSpec::new("SansSerif", 12.0, false),
            label_paint: ColorOrGradient::Color(colors::DARK_GRAY),
            label_insets: RectangleInsets::uniform(3.0),
            line_visible: true,
            line_paint: ColorOrGradient::Color(colors::GRAY),
            line_width: 0.5,
            tick_marks_visible: true,
            tick_mark_inside_length: 0.0,
            tick_mark_outside_length: 2.0,
            tick_mark_paint: ColorOrGradient::Color(colors::GRAY),
            tick_labels_visible: true,
            tick_label_font: FontSpec::new("SansSerif", 10.0, false),
            tick_label_paint: ColorOrGradient::Color(colors::DARK_GRAY),
            tick_label_insets: RectangleInsets::new(2.0, 4.0, 2.0, 4.0),
        }
    }
}

/// Axis marks plus the space they occupy outside the data area
#[derive(Debug, Clone, PartialEq)]
pub struct AxisMarks {
    pub group: SceneGroup,
    /// Distance from the axis line to the far side of the axis label
    pub extent: f32,
    /// Region covered by the axis, for entity creation
    pub bounds: Bounds,
}

/// Largest tick label extent perpendicular to the axis
fn tick_label_depth(config: &AxisMarksConfig, measurer: &dyn TextMeasurer) -> f32 {
    if !config.tick_labels_visible || config.tick_labels.is_empty() {
        return 0.0;
    }
    let horizontal = config.edge.is_top_or_bottom();
    let depth = config
        .tick_labels
        .iter()
        .map(|text| measurer.measure_text_bounds(text, &config.tick_label_font))
        .map(|b| if horizontal { b.height } else { b.width })
        .fold(0.0f32, f32::max);
    let insets = &config.tick_label_insets;
    if horizontal {
        depth + insets.top + insets.bottom
    } else {
        depth + insets.left + insets.right
    }
}

fn label_size(config: &AxisMarksConfig, measurer: &dyn TextMeasurer) -> Option<TextBounds> {
    config
        .label
        .as_deref()
        .filter(|text| !text.is_empty())
        .map(|text| measurer.measure_text_bounds(text, &config.label_font))
}

fn label_depth(config: &AxisMarksConfig, measurer: &dyn TextMeasurer) -> f32 {
    match label_size(config, measurer) {
        Some(size) => {
            // the label is rotated on vertical edges, so its height is the depth
            if config.edge.is_top_or_bottom() {
                size.height + config.label_insets.top + config.label_insets.bottom
            } else {
                size.height + config.label_insets.left + config.label_insets.right
            }
        }
        None => 0.0,
    }
}

/// Space the axis needs outside the data area for the given tick labels
pub fn required_space(config: &AxisMarksConfig, measurer: &dyn TextMeasurer) -> f32 {
    let ticks = if config.tick_marks_visible {
        config.tick_mark_outside_length
    } else {
        0.0
    };
    ticks + tick_label_depth(config, measurer) + label_depth(config, measurer)
}

/// Sign of the direction pointing away from the data area
fn outward(edge: RectangleEdge) -> f32 {
    match edge {
        RectangleEdge::Top | RectangleEdge::Left => -1.0,
        RectangleEdge::Bottom | RectangleEdge::Right => 1.0,
    }
}

pub fn make_axis_marks(
    config: &AxisMarksConfig,
    measurer: &dyn TextMeasurer,
) -> Result<AxisMarks, ChartwellGuidesError> {
    let len = compute_encoding_length(&[config.tick_positions.len(), config.tick_labels.len()])?;
    let len = if config.tick_positions.is_empty() { 0 } else { len };
    let horizontal = config.edge.is_top_or_bottom();
    let dir = outward(config.edge);
    let area = &config.data_area;
    let cursor = config.cursor;

    let mut group = SceneGroup::new("axis");
    group.zindex = Some(1);

    if config.line_visible {
        let (x0, y0, x1, y1) = if horizontal {
            (area.min_x(), cursor, area.max_x(), cursor)
        } else {
            (cursor, area.min_y(), cursor, area.max_y())
        };
        group.push(SceneRuleMark {
            name: "axis_line".to_string(),
            clip: false,
            x0: x0.into(),
            y0: y0.into(),
            x1: x1.into(),
            y1: y1.into(),
            stroke: config.line_paint.clone().into(),
            stroke_width: config.line_width.into(),
            ..Default::default()
        });
    }

    let mut offset = 0.0;
    if config.tick_marks_visible && len > 0 {
        let inner = cursor - dir * config.tick_mark_inside_length;
        let outer = cursor + dir * config.tick_mark_outside_length;
        let positions = ScalarOrArray::new_array(config.tick_positions.clone());
        let (x0, y0, x1, y1) = if horizontal {
            (positions.clone(), inner.into(), positions, outer.into())
        } else {
            (inner.into(), positions.clone(), outer.into(), positions)
        };
        let ticks = SceneRuleMark {
            name: "tick_marks".to_string(),
            clip: false,
            len: len as u32,
            x0,
            y0,
            x1,
            y1,
            stroke: config.tick_mark_paint.clone().into(),
            stroke_width: ScalarOrArray::new_scalar(0.5),
            ..Default::default()
        };
        ticks.validate()?;
        group.push(ticks);
        offset += config.tick_mark_outside_length;
    }

    if config.tick_labels_visible && len > 0 {
        let insets = &config.tick_label_insets;
        let (x, y, align, baseline) = match config.edge {
            RectangleEdge::Bottom => (
                ScalarOrArray::new_array(config.tick_positions.clone()),
                (cursor + offset + insets.top).into(),
                TextAlign::Center,
                TextBaseline::Top,
            ),
            RectangleEdge::Top => (
                ScalarOrArray::new_array(config.tick_positions.clone()),
                (cursor - offset - insets.bottom).into(),
                TextAlign::Center,
                TextBaseline::Bottom,
            ),
            RectangleEdge::Left => (
                (cursor - offset - insets.right).into(),
                ScalarOrArray::new_array(config.tick_positions.clone()),
                TextAlign::Right,
                TextBaseline::Middle,
            ),
            RectangleEdge::Right => (
                (cursor + offset + insets.left).into(),
                ScalarOrArray::new_array(config.tick_positions.clone()),
                TextAlign::Left,
                TextBaseline::Middle,
            ),
        };
        let labels = SceneTextMark {
            name: "tick_labels".to_string(),
            len: len as u32,
            text: ScalarOrArray::new_array(config.tick_labels.clone()),
            x,
            y,
            align: align.into(),
            baseline: baseline.into(),
            color: config.tick_label_paint.clone().into(),
            font: config.tick_label_font.clone(),
            ..Default::default()
        };
        labels.validate()?;
        group.push(labels);
        offset += tick_label_depth(config, measurer);
    }

    if let (Some(text), Some(size)) = (config.label.as_deref(), label_size(config, measurer)) {
        let insets = &config.label_insets;
        let (x, y, angle) = match config.edge {
            RectangleEdge::Bottom => (
                area.center_x(),
                cursor + offset + insets.top + size.height / 2.0,
                0.0f32,
            ),
            RectangleEdge::Top => (
                area.center_x(),
                cursor - offset - insets.bottom - size.height / 2.0,
                0.0,
            ),
            RectangleEdge::Left => (
                cursor - offset - insets.right - size.height / 2.0,
                area.center_y(),
                -90.0,
            ),
            RectangleEdge::Right => (
                cursor + offset + insets.left + size.height / 2.0,
                area.center_y(),
                90.0,
            ),
        };
        group.push(SceneTextMark {
            name: "axis_label".to_string(),
            text: text.to_string().into(),
            x: x.into(),
            y: y.into(),
            align: TextAlign::Center.into(),
            baseline: TextBaseline::Middle.into(),
            angle: angle.into(),
            color: config.label_paint.clone().into(),
            font: config.label_font.clone(),
            ..Default::default()
        });
    }

    let extent = required_space(config, measurer);
    let bounds = match config.edge {
        RectangleEdge::Bottom => Bounds::new(area.x, cursor, area.width, extent),
        RectangleEdge::Top => Bounds::new(area.x, cursor - extent, area.width, extent),
        RectangleEdge::Left => Bounds::new(cursor - extent, area.y, extent, area.height),
        RectangleEdge::Right => Bounds::new(cursor, area.y, extent, area.height),
    };

    Ok(AxisMarks {
        group,
        extent,
        bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartwell_common::text::ApproximateTextMeasurer;
    use chartwell_scenegraph::marks::mark::SceneMark;
    use float_cmp::assert_approx_eq;

    fn config(edge: RectangleEdge) -> AxisMarksConfig {
        let data_area = Bounds::new(50.0, 10.0, 200.0, 100.0);
        let cursor = match edge {
            RectangleEdge::Bottom => data_area.max_y(),
            RectangleEdge::Top => data_area.min_y(),
            RectangleEdge::Left => data_area.min_x(),
            RectangleEdge::Right => data_area.max_x(),
        };
        AxisMarksConfig {
            edge,
            data_area,
            cursor,
            tick_positions: vec![60.0, 150.0, 240.0],
            tick_labels: vec!["0".into(), "50".into(), "100".into()],
            label: Some("Value".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_bottom_axis_layout() {
        let measurer = ApproximateTextMeasurer;
        let axis = make_axis_marks(&config(RectangleEdge::Bottom), &measurer).unwrap();
        let names: Vec<&str> = axis.group.marks.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["axis_line", "tick_marks", "tick_labels", "axis_label"]);

        // 2 outside ticks + (12 + 4) tick labels + (14.4 + 6) label
        assert_approx_eq!(f32, axis.extent, 2.0 + 16.0 + 20.4, epsilon = 1e-4);
        assert_approx_eq!(f32, axis.bounds.y, 110.0);

        let SceneMark::Text(labels) = &axis.group.marks[2] else {
            panic!("expected tick labels")
        };
        assert_eq!(labels.y, ScalarOrArray::new_scalar(114.0));
    }

    #[test]
    fn test_left_axis_label_rotated() {
        let measurer = ApproximateTextMeasurer;
        let axis = make_axis_marks(&config(RectangleEdge::Left), &measurer).unwrap();
        let SceneMark::Text(label) = axis.group.marks.last().unwrap() else {
            panic!("expected axis label")
        };
        assert_eq!(label.angle, ScalarOrArray::new_scalar(-90.0));
        assert!(axis.bounds.max_x() <= 50.0 + 1e-4);
    }

    #[test]
    fn test_mismatched_ticks() {
        let mut config = config(RectangleEdge::Bottom);
        config.tick_labels.pop();
        assert!(matches!(
            make_axis_marks(&config, &ApproximateTextMeasurer),
            Err(ChartwellGuidesError::InvalidEncodingLength(_))
        ));
    }
}
