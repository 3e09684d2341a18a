use chartwell_common::layout::{Bounds, RectangleInsets, TitlePosition};
use chartwell_common::text::TextMeasurer;
use chartwell_common::types::{colors, ColorOrGradient, FontSpec, StrokeStyle, SymbolShape};
use chartwell_guides::legend::{make_legend_marks, LegendArrangement, LegendItemSpec, LegendLayout};
use chartwell_scenegraph::marks::group::SceneGroup;
use serde::{Deserialize, Serialize};

use crate::entity::{ChartEntity, EntityCollection, EntityKind};
use crate::error::ChartwellChartError;
use crate::title::place_block;

/// One entry in a chart legend, usually describing a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    pub label: String,
    pub description: Option<String>,
    pub tooltip: Option<String>,
    pub url: Option<String>,
    /// `None` hides the shape
    pub shape: Option<SymbolShape>,
    pub shape_filled: bool,
    pub fill: ColorOrGradient,
    pub outline: Option<(ColorOrGradient, f32)>,
    pub line_visible: bool,
    pub line_paint: ColorOrGradient,
    pub line_stroke: StrokeStyle,
    pub series_key: String,
    pub dataset_index: usize,
    pub series_index: usize,
}

impl LegendItem {
    pub fn new(label: &str, fill: ColorOrGradient) -> Self {
        Self {
            label: label.to_string(),
            description: None,
            tooltip: None,
            url: None,
            shape: Some(SymbolShape::Square),
            shape_filled: true,
            line_paint: fill.clone(),
            fill,
            outline: None,
            line_visible: false,
            line_stroke: StrokeStyle::default(),
            series_key: label.to_string(),
            dataset_index: 0,
            series_index: 0,
        }
    }

    pub fn with_series(mut self, dataset_index: usize, series_index: usize) -> Self {
        self.dataset_index = dataset_index;
        self.series_index = series_index;
        self
    }

    pub fn with_shape(mut self, shape: Option<SymbolShape>, filled: bool) -> Self {
        self.shape = shape;
        self.shape_filled = filled;
        self
    }

    pub fn with_outline(mut self, outline: Option<(ColorOrGradient, f32)>) -> Self {
        self.outline = outline;
        self
    }

    pub fn with_line(mut self, paint: ColorOrGradient, stroke: StrokeStyle) -> Self {
        self.line_visible = true;
        self.line_paint = paint;
        self.line_stroke = stroke;
        self
    }

    pub fn to_spec(&self) -> LegendItemSpec {
        let fill = if self.shape_filled {
            self.fill.clone()
        } else {
            ColorOrGradient::transparent()
        };
        let outline = match (&self.outline, self.shape_filled) {
            (Some(outline), _) => Some(outline.clone()),
            // unfilled shapes are drawn as outlines in the series paint
            (None, false) => Some((self.fill.clone(), 1.0)),
            (None, true) => None,
        };
        LegendItemSpec {
            label: self.label.clone(),
            shape: self.shape,
            fill,
            outline,
            line: self
                .line_visible
                .then(|| (self.line_paint.clone(), self.line_stroke.clone())),
        }
    }
}

/// Legend block placed on one side of the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendTitle {
    pub visible: bool,
    pub position: TitlePosition,
    pub item_font: FontSpec,
    pub item_paint: ColorOrGradient,
    pub background: Option<ColorOrGradient>,
    pub frame: Option<(ColorOrGradient, f32)>,
    pub padding: RectangleInsets,
    /// Space between the legend and the rest of the chart
    pub margin: RectangleInsets,
}

impl Default for LegendTitle {
    fn default() -> Self {
        Self {
            visible: true,
            position: TitlePosition::Bottom,
            item_font: FontSpec::new("SansSerif", 12.0, false),
            item_paint: ColorOrGradient::Color(colors::BLACK),
            background: Some(ColorOrGradient::Color(colors::WHITE)),
            frame: Some((ColorOrGradient::Color(colors::GRAY), 0.5)),
            padding: RectangleInsets::uniform(1.0),
            margin: RectangleInsets::uniform(1.0),
        }
    }
}

impl LegendTitle {
    fn layout(&self, area: &Bounds) -> LegendLayout {
        let arrangement = match self.position {
            TitlePosition::Top | TitlePosition::Bottom => LegendArrangement::Horizontal {
                max_width: (area.width - self.padding.left - self.padding.right).max(0.0),
            },
            TitlePosition::Left | TitlePosition::Right => LegendArrangement::Vertical,
        };
        LegendLayout {
            arrangement,
            font: self.item_font.clone(),
            text_color: self.item_paint.clone(),
            background: self.background.clone(),
            frame: self.frame.clone(),
            ..Default::default()
        }
    }

    /// Draws the legend inside `area` and returns the group with the area left
    /// over for the rest of the chart
    pub fn draw(
        &self,
        items: &[LegendItem],
        area: &Bounds,
        entities: Option<&mut EntityCollection>,
        measurer: &dyn TextMeasurer,
    ) -> Result<(Option<SceneGroup>, Bounds), ChartwellChartError> {
        if !self.visible || items.is_empty() {
            return Ok((None, *area));
        }
        let specs: Vec<LegendItemSpec> = items.iter().map(LegendItem::to_spec).collect();
        let marks = make_legend_marks(&specs, &self.layout(area), measurer)?;

        let outer = RectangleInsets::new(
            self.padding.top + self.margin.top,
            self.padding.left + self.margin.left,
            self.padding.bottom + self.margin.bottom,
            self.padding.right + self.margin.right,
        );
        let (origin, remaining) = place_block(
            area,
            self.position,
            marks.width + outer.left + outer.right,
            marks.height + outer.top + outer.bottom,
        );
        let origin = [origin[0] + outer.left, origin[1] + outer.top];

        if let Some(entities) = entities {
            for (item, bounds) in items.iter().zip(&marks.item_bounds) {
                let bounds = Bounds::new(
                    bounds.x + origin[0],
                    bounds.y + origin[1],
                    bounds.width,
                    bounds.height,
                );
                entities.add(
                    ChartEntity::rect(
                        bounds,
                        EntityKind::Legend {
                            series_key: item.series_key.clone(),
                        },
                    )
                    .with_tooltip(item.tooltip.clone())
                    .with_url(item.url.clone()),
                );
            }
        }

        let mut group = marks.group.with_origin(origin);
        group.name = "legend".to_string();
        Ok((Some(group), remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartwell_common::text::default_text_measurer;

    fn items() -> Vec<LegendItem> {
        vec![
            LegendItem::new("First", ColorOrGradient::Color(colors::RED)),
            LegendItem::new("Second", ColorOrGradient::Color(colors::BLUE))
                .with_line(ColorOrGradient::Color(colors::BLUE), StrokeStyle::new(2.0))
                .with_series(0, 1),
        ]
    }

    #[test]
    fn test_spec_for_unfilled_shape() {
        let item = LegendItem::new("A", ColorOrGradient::Color(colors::RED))
            .with_shape(Some(SymbolShape::Circle), false);
        let spec = item.to_spec();
        assert!(spec.fill.is_transparent());
        assert_eq!(spec.outline, Some((ColorOrGradient::Color(colors::RED), 1.0)));
        assert!(spec.line.is_none());
    }

    #[test]
    fn test_bottom_legend_takes_space_and_adds_entities() {
        let legend = LegendTitle::default();
        let area = Bounds::new(0.0, 0.0, 400.0, 300.0);
        let mut entities = EntityCollection::new();
        let (group, remaining) = legend
            .draw(&items(), &area, Some(&mut entities), &default_text_measurer())
            .unwrap();
        let group = group.unwrap();
        assert!(remaining.height < 300.0);
        assert_eq!(remaining.y, 0.0);
        assert!(group.origin[1] >= remaining.max_y());
        assert_eq!(entities.len(), 2);
        let second = entities.get(1).unwrap();
        assert_eq!(
            second.kind,
            EntityKind::Legend {
                series_key: "Second".to_string()
            }
        );
    }

    #[test]
    fn test_hidden_legend() {
        let legend = LegendTitle {
            visible: false,
            ..Default::default()
        };
        let area = Bounds::new(0.0, 0.0, 400.0, 300.0);
        let (group, remaining) = legend
            .draw(&items(), &area, None, &default_text_measurer())
            .unwrap();
        assert!(group.is_none());
        assert_eq!(remaining, area);
    }
}
