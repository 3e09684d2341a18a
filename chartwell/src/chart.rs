//! A chart is a plot framed by titles, a legend and a background.

use chartwell_common::layout::{Bounds, RectangleInsets};
use chartwell_common::text::{default_text_measurer, TextMeasurer};
use chartwell_common::types::{colors, ColorOrGradient};
use chartwell_scenegraph::marks::group::SceneGroup;
use chartwell_scenegraph::marks::rect::SceneRectMark;
use chartwell_scenegraph::scene_graph::SceneGraph;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::{ChartEntity, EntityKind};
use crate::error::ChartwellChartError;
use crate::info::{ChartRenderingInfo, PlotRenderingInfo};
use crate::legend::{LegendItem, LegendTitle};
use crate::plot::{CategoryPlot, MeterPlot, PiePlot, PlotStyle, XYPlot};
use crate::title::TextTitle;

/// The plot a chart draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Plot {
    Xy(XYPlot),
    Category(CategoryPlot),
    Pie(PiePlot),
    Meter(MeterPlot),
}

impl Plot {
    pub fn legend_items(&self) -> Vec<LegendItem> {
        match self {
            Plot::Xy(p) => p.legend_items(),
            Plot::Category(p) => p.legend_items(),
            Plot::Pie(p) => p.legend_items(),
            Plot::Meter(p) => p.legend_items(),
        }
    }

    pub fn style(&self) -> &PlotStyle {
        match self {
            Plot::Xy(p) => &p.style,
            Plot::Category(p) => &p.style,
            Plot::Pie(p) => &p.style,
            Plot::Meter(p) => &p.style,
        }
    }

    pub fn style_mut(&mut self) -> &mut PlotStyle {
        match self {
            Plot::Xy(p) => &mut p.style,
            Plot::Category(p) => &mut p.style,
            Plot::Pie(p) => &mut p.style,
            Plot::Meter(p) => &mut p.style,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Plot::Xy(_) => "xy",
            Plot::Category(_) => "category",
            Plot::Pie(_) => "pie",
            Plot::Meter(_) => "meter",
        }
    }

    pub fn draw(
        &self,
        area: &Bounds,
        anchor: Option<[f32; 2]>,
        info: Option<&mut ChartRenderingInfo>,
        measurer: &dyn TextMeasurer,
    ) -> Result<SceneGroup, ChartwellChartError> {
        match self {
            Plot::Xy(p) => p.draw(area, anchor, info, measurer),
            Plot::Category(p) => p.draw(area, anchor, info, measurer),
            Plot::Pie(p) => p.draw(area, info, measurer),
            Plot::Meter(p) => p.draw(area, info, measurer),
        }
    }

    /// Moves the crosshairs of XY and category plots, other plots ignore
    /// clicks
    pub fn handle_click(&mut self, x: f32, y: f32, info: &PlotRenderingInfo) {
        match self {
            Plot::Xy(p) => p.handle_click(x, y, info),
            Plot::Category(p) => p.handle_click(x, y, info),
            Plot::Pie(_) | Plot::Meter(_) => {}
        }
    }
}

impl From<XYPlot> for Plot {
    fn from(value: XYPlot) -> Self {
        Plot::Xy(value)
    }
}

impl From<CategoryPlot> for Plot {
    fn from(value: CategoryPlot) -> Self {
        Plot::Category(value)
    }
}

impl From<PiePlot> for Plot {
    fn from(value: PiePlot) -> Self {
        Plot::Pie(value)
    }
}

impl From<MeterPlot> for Plot {
    fn from(value: MeterPlot) -> Self {
        Plot::Meter(value)
    }
}

/// Scene graph of one render along with the areas and entities recorded
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub scene: SceneGraph,
    pub info: ChartRenderingInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chart {
    pub title: Option<TextTitle>,
    pub subtitles: Vec<TextTitle>,
    pub plot: Plot,
    pub legend: Option<LegendTitle>,
    pub background: Option<ColorOrGradient>,
    pub border: Option<(ColorOrGradient, f32)>,
    pub padding: RectangleInsets,
}

impl Default for Chart {
    fn default() -> Self {
        Self {
            title: None,
            subtitles: Vec::new(),
            plot: Plot::Xy(XYPlot::default()),
            legend: Some(LegendTitle::default()),
            background: Some(ColorOrGradient::Color(colors::WHITE)),
            border: None,
            padding: RectangleInsets::uniform(5.0),
        }
    }
}

impl Chart {
    pub fn new(title: Option<&str>, plot: impl Into<Plot>, create_legend: bool) -> Self {
        Self {
            title: title.map(TextTitle::main),
            plot: plot.into(),
            legend: create_legend.then(LegendTitle::default),
            ..Default::default()
        }
    }

    pub fn add_subtitle(&mut self, subtitle: TextTitle) {
        self.subtitles.push(subtitle);
    }

    /// Renders with the approximate text measurer
    pub fn draw(
        &self,
        width: f32,
        height: f32,
        anchor: Option<[f32; 2]>,
    ) -> Result<RenderedChart, ChartwellChartError> {
        self.draw_with(width, height, anchor, &default_text_measurer())
    }

    /// Lays out the title, legend and subtitles around the plot and renders
    /// everything into a `width` x `height` scene.
    ///
    /// The chart entity comes first in the rendering info, followed by
    /// titles, legend items, the plot and its items.
    pub fn draw_with(
        &self,
        width: f32,
        height: f32,
        anchor: Option<[f32; 2]>,
        measurer: &dyn TextMeasurer,
    ) -> Result<RenderedChart, ChartwellChartError> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(ChartwellChartError::InvalidArgument(format!(
                "chart size {width} x {height} must be positive"
            )));
        }
        let chart_area = Bounds::new(0.0, 0.0, width, height);
        let mut info = ChartRenderingInfo::new(chart_area);
        info.entities
            .add(ChartEntity::rect(chart_area, EntityKind::Chart));

        let mut scene = SceneGraph::new(width, height);
        if let Some(fill) = self.background.clone() {
            scene.marks.push(
                SceneRectMark {
                    name: "chart_background".to_string(),
                    x: 0.0f32.into(),
                    y: 0.0f32.into(),
                    width: width.into(),
                    height: height.into(),
                    fill: fill.into(),
                    ..Default::default()
                }
                .into(),
            );
        }

        let mut area = chart_area.shrink(&self.padding);
        if let Some(title) = &self.title {
            let (group, remaining) = title.draw(&area, Some(&mut info.entities), measurer);
            if let Some(group) = group {
                scene.marks.push(group.into());
            }
            area = remaining;
        }
        if let Some(legend) = &self.legend {
            let items = self.plot.legend_items();
            let (group, remaining) =
                legend.draw(&items, &area, Some(&mut info.entities), measurer)?;
            if let Some(group) = group {
                scene.marks.push(group.into());
            }
            area = remaining;
        }
        for subtitle in &self.subtitles {
            let (group, remaining) = subtitle.draw(&area, Some(&mut info.entities), measurer);
            if let Some(mut group) = group {
                group.name = "subtitle".to_string();
                scene.marks.push(group.into());
            }
            area = remaining;
        }
        debug!(
            "drawing {} plot in {}x{} at ({}, {})",
            self.plot.type_name(),
            area.width,
            area.height,
            area.x,
            area.y
        );

        let plot = self.plot.draw(&area, anchor, Some(&mut info), measurer)?;
        scene.marks.push(plot.into());

        if let Some((paint, stroke_width)) = self.border.clone() {
            scene.marks.push(
                SceneRectMark {
                    name: "chart_border".to_string(),
                    x: (stroke_width / 2.0).into(),
                    y: (stroke_width / 2.0).into(),
                    width: (width - stroke_width).into(),
                    height: (height - stroke_width).into(),
                    fill: ColorOrGradient::transparent().into(),
                    stroke: paint.into(),
                    stroke_width: stroke_width.into(),
                    ..Default::default()
                }
                .into(),
            );
        }
        scene.validate()?;
        Ok(RenderedChart { scene, info })
    }

    /// Forwards a click to the plot, using the plot info of the last render
    pub fn handle_click(&mut self, x: f32, y: f32, info: &ChartRenderingInfo) {
        self.plot.handle_click(x, y, &info.plot_info);
    }

    pub fn to_json(&self) -> Result<String, ChartwellChartError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ChartwellChartError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{CategoryAxis, ValueAxis};
    use crate::renderer::category::BarRenderer;
    use chartwell_data::category::DefaultCategoryDataset;
    use chartwell_data::pie::DefaultPieDataset;

    fn bar_chart() -> Chart {
        let mut data = DefaultCategoryDataset::new();
        data.add_value(Some(1.0), "S1", "A");
        data.add_value(Some(3.0), "S1", "B");
        data.add_value(Some(2.0), "S2", "A");
        let plot = CategoryPlot::new(
            data,
            CategoryAxis::new(Some("Category")),
            ValueAxis::new(Some("Value")),
            BarRenderer::default(),
        );
        Chart::new(Some("Bars"), plot, true)
    }

    #[test]
    fn test_draw_orders_entities() {
        let rendered = bar_chart().draw(500.0, 300.0, None).unwrap();
        let kinds: Vec<_> = rendered.info.entities.iter().map(|e| &e.kind).collect();
        assert_eq!(kinds[0], &EntityKind::Chart);
        assert_eq!(kinds[1], &EntityKind::Title);
        assert!(matches!(kinds[2], EntityKind::Legend { series_key } if series_key == "S1"));
        assert!(kinds.contains(&&EntityKind::Plot));
        assert_eq!(
            kinds
                .iter()
                .filter(|k| matches!(k, EntityKind::CategoryItem { .. }))
                .count(),
            3
        );
        assert!(rendered.scene.find_group("legend").is_some());
        assert!(rendered.scene.find_group("category_plot").is_some());
    }

    #[test]
    fn test_plot_area_below_title_and_above_legend() {
        let rendered = bar_chart().draw(500.0, 300.0, None).unwrap();
        let plot_area = rendered.info.plot_info.plot_area;
        assert!(plot_area.y > 5.0);
        assert!(plot_area.max_y() < 295.0);
        assert_eq!(rendered.info.chart_area, Bounds::new(0.0, 0.0, 500.0, 300.0));
    }

    #[test]
    fn test_invalid_size() {
        assert!(matches!(
            bar_chart().draw(0.0, 100.0, None),
            Err(ChartwellChartError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_json_round_trip_and_independent_clone() {
        let chart = Chart::new(
            Some("Shares"),
            PiePlot::new(DefaultPieDataset::from_pairs([("A", 1.0), ("B", 2.0)])),
            true,
        );
        let restored = Chart::from_json(&chart.to_json().unwrap()).unwrap();
        assert_eq!(restored, chart);

        let mut copy = chart.clone();
        if let Plot::Pie(pie) = &mut copy.plot {
            pie.dataset.set_value("A", Some(10.0));
        }
        assert_ne!(copy, chart);
    }

    #[test]
    fn test_handle_click_moves_crosshair() {
        let mut chart = bar_chart();
        let rendered = chart.draw(500.0, 300.0, None).unwrap();
        let data_area = rendered.info.plot_info.data_area;
        chart.handle_click(data_area.center_x(), data_area.min_y() + 1.0, &rendered.info);
        let Plot::Category(plot) = &chart.plot else {
            unreachable!()
        };
        assert!(plot.range_crosshair.value > 2.5);
    }
}
