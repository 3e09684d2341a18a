use chartwell_common::layout::Bounds;
use chartwell_common::text::TextMeasurer;
use chartwell_common::types::{colors, ColorOrGradient, FontSpec, StrokeStyle, SymbolShape};
use chartwell_geometry::marks::MarkGeometryUtils;
use chartwell_scenegraph::marks::group::SceneGroup;
use chartwell_scenegraph::marks::rect::SceneRectMark;
use chartwell_scenegraph::marks::rule::SceneRuleMark;
use chartwell_scenegraph::marks::symbol::SceneSymbolMark;
use chartwell_scenegraph::marks::text::{SceneTextMark, TextAlign, TextBaseline};
use rstar::{Envelope, AABB};
use serde::{Deserialize, Serialize};

use crate::error::ChartwellGuidesError;

/// Graphic and label of one legend entry
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItemSpec {
    pub label: String,
    pub shape: Option<SymbolShape>,
    pub fill: ColorOrGradient,
    pub outline: Option<(ColorOrGradient, f32)>,
    /// Line drawn through the swatch, for line renderers
    pub line: Option<(ColorOrGradient, StrokeStyle)>,
}

impl LegendItemSpec {
    pub fn new(label: &str, fill: ColorOrGradient) -> Self {
        Self {
            label: label.to_string(),
            shape: Some(SymbolShape::Square),
            fill,
            outline: None,
            line: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendArrangement {
    /// Items in rows, wrapping at `max_width`
    Horizontal { max_width: f32 },
    Vertical,
}

impl Default for LegendArrangement {
    fn default() -> Self {
        LegendArrangement::Horizontal { max_width: f32::MAX }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendLayout {
    pub arrangement: LegendArrangement,
    pub font: FontSpec,
    pub text_color: ColorOrGradient,
    /// Space around each item
    pub item_padding: f32,
    pub swatch_size: f32,
    /// Space between swatch and label
    pub gap: f32,
    pub background: Option<ColorOrGradient>,
    pub frame: Option<(ColorOrGradient, f32)>,
}

impl Default for LegendLayout {
    fn default() -> Self {
        Self {
            arrangement: Default::default(),
            font: FontSpec::new("SansSerif", 12.0, false),
            text_color: ColorOrGradient::Color(colors::BLACK),
            item_padding: 2.0,
            swatch_size: 8.0,
            gap: 4.0,
            background: Some(ColorOrGradient::Color(colors::WHITE)),
            frame: Some((ColorOrGradient::Color(colors::GRAY), 0.5)),
        }
    }
}

/// Legend group positioned at the origin, with item bounds relative to it
#[derive(Debug, Clone, PartialEq)]
pub struct LegendMarks {
    pub group: SceneGroup,
    pub item_bounds: Vec<Bounds>,
    pub width: f32,
    pub height: f32,
}

pub fn make_legend_marks(
    items: &[LegendItemSpec],
    layout: &LegendLayout,
    measurer: &dyn TextMeasurer,
) -> Result<LegendMarks, ChartwellGuidesError> {
    let mut groups = Vec::with_capacity(items.len());
    let mut item_bounds = Vec::with_capacity(items.len());
    let (mut x, mut y) = (0.0f32, 0.0f32);
    let mut row_height = 0.0f32;
    let (mut width, mut height) = (0.0f32, 0.0f32);

    for (index, item) in items.iter().enumerate() {
        let group = make_item_group(item, layout, measurer, index)?;
        let bbox = group_extent(&group);
        let (w, h) = (bbox.upper()[0], bbox.upper()[1]);

        match layout.arrangement {
            LegendArrangement::Vertical => {
                x = 0.0;
                if index > 0 {
                    y += row_height;
                }
                row_height = h;
            }
            LegendArrangement::Horizontal { max_width } => {
                if index > 0 && x + w > max_width {
                    x = 0.0;
                    y += row_height;
                    row_height = 0.0;
                }
                row_height = row_height.max(h);
            }
        }

        item_bounds.push(Bounds::new(x, y, w, h));
        groups.push(group.with_origin([x, y]));
        width = width.max(x + w);
        height = height.max(y + h);
        if matches!(layout.arrangement, LegendArrangement::Horizontal { .. }) {
            x += w;
        }
    }

    let mut legend = SceneGroup::new("legend");
    if layout.background.is_some() || layout.frame.is_some() {
        let (stroke, stroke_width) = layout
            .frame
            .clone()
            .unwrap_or((ColorOrGradient::transparent(), 0.0));
        legend.push(SceneRectMark {
            name: "legend_background".to_string(),
            clip: false,
            width: width.into(),
            height: height.into(),
            fill: layout
                .background
                .clone()
                .unwrap_or_else(ColorOrGradient::transparent)
                .into(),
            stroke: stroke.into(),
            stroke_width: stroke_width.into(),
            zindex: Some(-1),
            ..Default::default()
        });
    }
    legend.extend(groups.into_iter().map(Into::into));

    Ok(LegendMarks {
        group: legend,
        item_bounds,
        width,
        height,
    })
}

fn group_extent(group: &SceneGroup) -> AABB<[f32; 2]> {
    group
        .marks
        .iter()
        .filter_map(|mark| mark.bounding_box())
        .reduce(|a, b| a.merged(&b))
        .unwrap_or_else(|| AABB::from_point([0.0, 0.0]))
}

fn make_item_group(
    item: &LegendItemSpec,
    layout: &LegendLayout,
    measurer: &dyn TextMeasurer,
    index: usize,
) -> Result<SceneGroup, ChartwellGuidesError> {
    let pad = layout.item_padding;
    let swatch = layout.swatch_size;
    let text_size = measurer.measure_text_bounds(&item.label, &layout.font);
    // lines get a wider swatch so the stroke is visible either side of the shape
    let swatch_width = if item.line.is_some() { swatch * 2.0 } else { swatch };
    let height = swatch.max(text_size.height) + pad * 2.0;
    let width = pad * 2.0 + swatch_width + layout.gap + text_size.width;
    let center_y = height / 2.0;
    let center_x = pad + swatch_width / 2.0;

    let mut group = SceneGroup::new(&format!("legend_item_{index}"));

    // transparent rect so the group bounding box covers the padding
    group.push(SceneRectMark {
        name: "legend_item_area".to_string(),
        clip: false,
        width: width.into(),
        height: height.into(),
        ..Default::default()
    });

    if let Some((stroke, style)) = &item.line {
        group.push(SceneRuleMark {
            name: "legend_line".to_string(),
            clip: false,
            stroke_dash: style.dash.clone(),
            x0: pad.into(),
            y0: center_y.into(),
            x1: (pad + swatch_width).into(),
            y1: center_y.into(),
            stroke: stroke.clone().into(),
            stroke_width: style.width.into(),
            stroke_cap: style.cap,
            ..Default::default()
        });
    }

    if let Some(shape) = item.shape {
        let (stroke, stroke_width) = match &item.outline {
            Some((paint, width)) => (paint.clone(), Some(*width)),
            None => (ColorOrGradient::transparent(), None),
        };
        let symbol = SceneSymbolMark {
            name: "legend_symbol".to_string(),
            clip: false,
            shape: shape.into(),
            x: center_x.into(),
            y: center_y.into(),
            size: swatch.into(),
            fill: item.fill.clone().into(),
            stroke: stroke.into(),
            stroke_width,
            ..Default::default()
        };
        symbol.validate()?;
        group.push(symbol);
    }

    group.push(SceneTextMark {
        name: "legend_label".to_string(),
        text: item.label.clone().into(),
        x: (pad + swatch_width + layout.gap).into(),
        y: center_y.into(),
        align: TextAlign::Left.into(),
        baseline: TextBaseline::Middle.into(),
        color: layout.text_color.clone().into(),
        font: layout.font.clone(),
        ..Default::default()
    });

    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartwell_common::text::ApproximateTextMeasurer;
    use chartwell_scenegraph::marks::mark::SceneMark;
    use float_cmp::assert_approx_eq;

    fn items() -> Vec<LegendItemSpec> {
        vec![
            LegendItemSpec::new("First", ColorOrGradient::Color(colors::RED)),
            LegendItemSpec::new("Second", ColorOrGradient::Color(colors::BLUE)),
            LegendItemSpec::new("Third", ColorOrGradient::Color(colors::GREEN)),
        ]
    }

    #[test]
    fn test_vertical_stacks_items() {
        let layout = LegendLayout {
            arrangement: LegendArrangement::Vertical,
            ..Default::default()
        };
        let legend = make_legend_marks(&items(), &layout, &ApproximateTextMeasurer).unwrap();
        assert_eq!(legend.item_bounds.len(), 3);
        // text height 14.4 + 2 * 2 padding
        assert_approx_eq!(f32, legend.item_bounds[1].y, 18.4, epsilon = 1e-4);
        assert_approx_eq!(f32, legend.height, 3.0 * 18.4, epsilon = 1e-4);
        assert!(legend.item_bounds.iter().all(|b| b.x == 0.0));
    }

    #[test]
    fn test_horizontal_wraps() {
        // each item is 4 + 8 + 4 + 7.2 * chars wide, "Second" is 59.2
        let layout = LegendLayout {
            arrangement: LegendArrangement::Horizontal { max_width: 120.0 },
            ..Default::default()
        };
        let legend = make_legend_marks(&items(), &layout, &ApproximateTextMeasurer).unwrap();
        assert_approx_eq!(f32, legend.item_bounds[0].y, 0.0);
        assert_approx_eq!(f32, legend.item_bounds[1].x, 52.0, epsilon = 1e-4);
        assert_approx_eq!(f32, legend.item_bounds[2].x, 0.0);
        assert_approx_eq!(f32, legend.item_bounds[2].y, 18.4, epsilon = 1e-4);
    }

    #[test]
    fn test_line_swatch() {
        let mut item = LegendItemSpec::new("Line", ColorOrGradient::Color(colors::RED));
        item.line = Some((ColorOrGradient::Color(colors::RED), StrokeStyle::new(2.0)));
        let legend =
            make_legend_marks(&[item], &LegendLayout::default(), &ApproximateTextMeasurer).unwrap();
        let SceneMark::Group(group) = &legend.group.marks[1] else {
            panic!("expected item group")
        };
        let names: Vec<&str> = group.marks.iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec!["legend_item_area", "legend_line", "legend_symbol", "legend_label"]
        );
    }
}
