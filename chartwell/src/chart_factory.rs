//! Ready-made charts with sensible defaults for the common chart types.
//!
//! Every function builds the axes, renderer and plot for one kind of chart
//! and wires in tooltip and URL generators when `ChartOptions` asks for them.

use chartwell_common::layout::PlotOrientation;
use chartwell_data::box_whisker::DefaultBoxAndWhiskerCategoryDataset;
use chartwell_data::gantt::TaskSeriesCollection;
use chartwell_data::interval::XYIntervalSeriesCollection;
use chartwell_data::pie::DefaultPieDataset;
use chartwell_data::statistical::DefaultStatisticalCategoryDataset;
use chartwell_data::table::DefaultTableXYDataset;
use chartwell_data::time::TimeSeriesCollection;
use chartwell_data::value::DefaultValueDataset;
use chartwell_data::xyz::DefaultXYZDataset;
use chartwell_data::{CategoryDatasetKind, XYDatasetKind};
use serde::{Deserialize, Serialize};

use crate::axis::{CategoryAxis, ValueAxis};
use crate::chart::Chart;
use crate::labels::{CategoryLabelGenerator, PieLabelGenerator, XYLabelGenerator};
use crate::plot::{CategoryPlot, MeterPlot, PiePlot, XYPlot};
use crate::renderer::category::{
    AreaEndType, AreaRenderer, BarRenderer, BoxAndWhiskerRenderer, GanttRenderer,
    LineAndShapeRenderer, StackedBarRenderer, StatisticalBarRenderer,
};
use crate::renderer::xy::{
    BubbleScale, StackedXYAreaRenderer, XYAreaRenderer, XYBubbleRenderer, XYErrorRenderer,
    XYLineAndShapeRenderer,
};
use crate::renderer::{CategoryGenerators, CategoryRendererKind, XYGenerators, XYRendererKind};
use crate::urls::{
    CategoryUrlGenerator, PieUrlGenerator, StandardCategoryUrlGenerator, StandardPieUrlGenerator,
    StandardXYUrlGenerator, XYUrlGenerator,
};

/// Flags shared by every factory function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub orientation: PlotOrientation,
    pub legend: bool,
    pub tooltips: bool,
    pub urls: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            orientation: PlotOrientation::Vertical,
            legend: true,
            tooltips: true,
            urls: false,
        }
    }
}

impl ChartOptions {
    pub fn with_orientation(mut self, orientation: PlotOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_urls(mut self, urls: bool) -> Self {
        self.urls = urls;
        self
    }
}

fn category_chart(
    title: Option<&str>,
    dataset: impl Into<CategoryDatasetKind>,
    domain_axis: CategoryAxis,
    range_axis: ValueAxis,
    renderer: impl Into<CategoryRendererKind>,
    tooltip: CategoryLabelGenerator,
    options: ChartOptions,
) -> Chart {
    let mut renderer = renderer.into();
    *renderer.generators_mut() = CategoryGenerators {
        tooltip: options.tooltips.then_some(tooltip),
        url: options
            .urls
            .then(|| CategoryUrlGenerator::Standard(StandardCategoryUrlGenerator::default())),
        item_label: None,
    };
    let plot = CategoryPlot::new(dataset, domain_axis, range_axis, renderer)
        .with_orientation(options.orientation);
    Chart::new(title, plot, options.legend)
}

fn xy_chart(
    title: Option<&str>,
    dataset: impl Into<XYDatasetKind>,
    domain_axis: ValueAxis,
    range_axis: ValueAxis,
    renderer: impl Into<XYRendererKind>,
    tooltip: XYLabelGenerator,
    options: ChartOptions,
) -> Chart {
    let mut renderer = renderer.into();
    *renderer.generators_mut() = XYGenerators {
        tooltip: options.tooltips.then_some(tooltip),
        url: options
            .urls
            .then(|| XYUrlGenerator::Standard(StandardXYUrlGenerator::default())),
        item_label: None,
    };
    let plot = XYPlot::new(dataset, domain_axis, range_axis, renderer)
        .with_orientation(options.orientation);
    Chart::new(title, plot, options.legend)
}

fn pie_chart(title: Option<&str>, mut plot: PiePlot, options: ChartOptions) -> Chart {
    plot.tooltip_generator = options
        .tooltips
        .then(PieLabelGenerator::standard_tooltip);
    plot.url_generator = options
        .urls
        .then(|| PieUrlGenerator::Standard(StandardPieUrlGenerator::default()));
    Chart::new(title, plot, options.legend)
}

/// Lines joining the values of each series across the categories
pub fn create_line_chart(
    title: Option<&str>,
    category_axis_label: Option<&str>,
    value_axis_label: Option<&str>,
    dataset: impl Into<CategoryDatasetKind>,
    options: ChartOptions,
) -> Chart {
    category_chart(
        title,
        dataset,
        CategoryAxis::new(category_axis_label),
        ValueAxis::new(value_axis_label),
        LineAndShapeRenderer::new(true, false),
        CategoryLabelGenerator::standard_tooltip(),
        options,
    )
}

pub fn create_bar_chart(
    title: Option<&str>,
    category_axis_label: Option<&str>,
    value_axis_label: Option<&str>,
    dataset: impl Into<CategoryDatasetKind>,
    options: ChartOptions,
) -> Chart {
    category_chart(
        title,
        dataset,
        CategoryAxis::new(category_axis_label),
        ValueAxis::new(value_axis_label),
        BarRenderer::default(),
        CategoryLabelGenerator::standard_tooltip(),
        options,
    )
}

pub fn create_stacked_bar_chart(
    title: Option<&str>,
    category_axis_label: Option<&str>,
    value_axis_label: Option<&str>,
    dataset: impl Into<CategoryDatasetKind>,
    options: ChartOptions,
) -> Chart {
    category_chart(
        title,
        dataset,
        CategoryAxis::new(category_axis_label),
        ValueAxis::new(value_axis_label),
        StackedBarRenderer::new(false),
        CategoryLabelGenerator::standard_tooltip(),
        options,
    )
}

/// Areas run edge to edge, so the category margin is dropped
pub fn create_area_chart(
    title: Option<&str>,
    category_axis_label: Option<&str>,
    value_axis_label: Option<&str>,
    dataset: impl Into<CategoryDatasetKind>,
    options: ChartOptions,
) -> Chart {
    category_chart(
        title,
        dataset,
        CategoryAxis::new(category_axis_label).with_margins(0.05, 0.05, 0.0),
        ValueAxis::new(value_axis_label),
        AreaRenderer::new(AreaEndType::Taper),
        CategoryLabelGenerator::standard_tooltip(),
        options,
    )
}

pub fn create_xy_line_chart(
    title: Option<&str>,
    x_axis_label: Option<&str>,
    y_axis_label: Option<&str>,
    dataset: impl Into<XYDatasetKind>,
    options: ChartOptions,
) -> Chart {
    xy_chart(
        title,
        dataset,
        ValueAxis::new(x_axis_label).with_auto_range_include_zero(false),
        ValueAxis::new(y_axis_label),
        XYLineAndShapeRenderer::new(true, false),
        XYLabelGenerator::standard_tooltip(),
        options,
    )
}

pub fn create_xy_area_chart(
    title: Option<&str>,
    x_axis_label: Option<&str>,
    y_axis_label: Option<&str>,
    dataset: impl Into<XYDatasetKind>,
    options: ChartOptions,
) -> Chart {
    xy_chart(
        title,
        dataset,
        ValueAxis::new(x_axis_label).with_auto_range_include_zero(false),
        ValueAxis::new(y_axis_label),
        XYAreaRenderer::default(),
        XYLabelGenerator::standard_tooltip(),
        options,
    )
}

/// Stacked areas need every series to share the same x values
pub fn create_stacked_xy_area_chart(
    title: Option<&str>,
    x_axis_label: Option<&str>,
    y_axis_label: Option<&str>,
    dataset: DefaultTableXYDataset,
    options: ChartOptions,
) -> Chart {
    xy_chart(
        title,
        dataset,
        ValueAxis::new(x_axis_label)
            .with_auto_range_include_zero(false)
            .with_margins(0.0, 0.0),
        ValueAxis::new(y_axis_label),
        StackedXYAreaRenderer::default(),
        XYLabelGenerator::standard_tooltip(),
        options,
    )
}

pub fn create_scatter_plot(
    title: Option<&str>,
    x_axis_label: Option<&str>,
    y_axis_label: Option<&str>,
    dataset: impl Into<XYDatasetKind>,
    options: ChartOptions,
) -> Chart {
    xy_chart(
        title,
        dataset,
        ValueAxis::new(x_axis_label).with_auto_range_include_zero(false),
        ValueAxis::new(y_axis_label).with_auto_range_include_zero(false),
        XYLineAndShapeRenderer::new(false, true),
        XYLabelGenerator::standard_tooltip(),
        options,
    )
}

/// Bubbles are sized in range axis units
pub fn create_bubble_chart(
    title: Option<&str>,
    x_axis_label: Option<&str>,
    y_axis_label: Option<&str>,
    dataset: DefaultXYZDataset,
    options: ChartOptions,
) -> Chart {
    xy_chart(
        title,
        dataset,
        ValueAxis::new(x_axis_label).with_auto_range_include_zero(false),
        ValueAxis::new(y_axis_label).with_auto_range_include_zero(false),
        XYBubbleRenderer::new(BubbleScale::RangeAxis),
        XYLabelGenerator::standard_tooltip(),
        options,
    )
}

/// Lines over a date axis, always vertical
pub fn create_time_series_chart(
    title: Option<&str>,
    time_axis_label: Option<&str>,
    value_axis_label: Option<&str>,
    dataset: TimeSeriesCollection,
    options: ChartOptions,
) -> Chart {
    xy_chart(
        title,
        dataset,
        ValueAxis::date(time_axis_label),
        ValueAxis::new(value_axis_label).with_auto_range_include_zero(false),
        XYLineAndShapeRenderer::new(true, false),
        XYLabelGenerator::time_series_tooltip(),
        options.with_orientation(PlotOrientation::Vertical),
    )
}

pub fn create_pie_chart(
    title: Option<&str>,
    dataset: DefaultPieDataset,
    options: ChartOptions,
) -> Chart {
    pie_chart(title, PiePlot::new(dataset), options)
}

/// A pie with a hole, the ring taking `section_depth` of the radius
pub fn create_ring_chart(
    title: Option<&str>,
    dataset: DefaultPieDataset,
    section_depth: f64,
    options: ChartOptions,
) -> Chart {
    pie_chart(title, PiePlot::ring(dataset, section_depth), options)
}

/// Task bars along a horizontal date axis
pub fn create_gantt_chart(
    title: Option<&str>,
    category_axis_label: Option<&str>,
    date_axis_label: Option<&str>,
    dataset: TaskSeriesCollection,
    options: ChartOptions,
) -> Chart {
    category_chart(
        title,
        dataset,
        CategoryAxis::new(category_axis_label),
        ValueAxis::date(date_axis_label),
        GanttRenderer::default(),
        CategoryLabelGenerator::interval_tooltip(),
        options.with_orientation(PlotOrientation::Horizontal),
    )
}

pub fn create_box_and_whisker_chart(
    title: Option<&str>,
    category_axis_label: Option<&str>,
    value_axis_label: Option<&str>,
    dataset: DefaultBoxAndWhiskerCategoryDataset,
    options: ChartOptions,
) -> Chart {
    category_chart(
        title,
        dataset,
        CategoryAxis::new(category_axis_label),
        ValueAxis::new(value_axis_label).with_auto_range_include_zero(false),
        BoxAndWhiskerRenderer::default(),
        CategoryLabelGenerator::new("({0}, {1}) Q1 {4} Q3 {5}"),
        options,
    )
}

pub fn create_statistical_bar_chart(
    title: Option<&str>,
    category_axis_label: Option<&str>,
    value_axis_label: Option<&str>,
    dataset: DefaultStatisticalCategoryDataset,
    options: ChartOptions,
) -> Chart {
    category_chart(
        title,
        dataset,
        CategoryAxis::new(category_axis_label),
        ValueAxis::new(value_axis_label),
        StatisticalBarRenderer::default(),
        CategoryLabelGenerator::standard_tooltip(),
        options,
    )
}

/// Points with error bars spanning the x and y intervals of each item
pub fn create_xy_error_chart(
    title: Option<&str>,
    x_axis_label: Option<&str>,
    y_axis_label: Option<&str>,
    dataset: XYIntervalSeriesCollection,
    options: ChartOptions,
) -> Chart {
    xy_chart(
        title,
        dataset,
        ValueAxis::new(x_axis_label).with_auto_range_include_zero(false),
        ValueAxis::new(y_axis_label).with_auto_range_include_zero(false),
        XYErrorRenderer::default(),
        XYLabelGenerator::standard_tooltip(),
        options,
    )
}

/// A dial with the default range and no intervals; tooltips and URLs do
/// not apply
pub fn create_meter_chart(
    title: Option<&str>,
    dataset: DefaultValueDataset,
    options: ChartOptions,
) -> Chart {
    Chart::new(title, MeterPlot::new(dataset), options.legend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Plot;
    use crate::entity::EntityKind;
    use chartwell_data::category::DefaultCategoryDataset;
    use chartwell_data::gantt::{Task, TaskSeries};
    use chartwell_data::interval::XYIntervalSeries;
    use chartwell_data::time::{RegularTimePeriod, SimpleTimePeriod, TimeSeries};
    use chartwell_data::xy::{XYSeries, XYSeriesCollection};
    use chrono::NaiveDate;

    fn category_data() -> DefaultCategoryDataset {
        let mut data = DefaultCategoryDataset::new();
        for (row, column, value) in [("S1", "A", 1.0), ("S1", "B", 4.0), ("S2", "A", 2.5)] {
            data.add_value(Some(value), row, column);
        }
        data
    }

    fn xy_data() -> XYSeriesCollection {
        XYSeriesCollection::from_series(vec![
            XYSeries::from_points("S1", [(1.0, 2.0), (2.0, 5.0), (3.0, 3.0)]).unwrap(),
        ])
        .unwrap()
    }

    fn category_renderer(chart: &Chart) -> &CategoryRendererKind {
        let Plot::Category(plot) = &chart.plot else {
            panic!("expected a category plot")
        };
        plot.renderer_for(0).unwrap()
    }

    fn xy_renderer(chart: &Chart) -> &XYRendererKind {
        let Plot::Xy(plot) = &chart.plot else {
            panic!("expected an xy plot")
        };
        plot.renderer_for(0).unwrap()
    }

    #[test]
    fn test_category_charts_use_matching_renderers() {
        let options = ChartOptions::default();
        let cases = [
            (create_line_chart(None, None, None, category_data(), options), "line_and_shape"),
            (create_bar_chart(None, None, None, category_data(), options), "bar"),
            (create_stacked_bar_chart(None, None, None, category_data(), options), "stacked_bar"),
            (create_area_chart(None, None, None, category_data(), options), "area"),
        ];
        for (chart, renderer) in cases {
            assert_eq!(category_renderer(&chart).type_name(), renderer);
            assert!(chart.draw(400.0, 300.0, None).is_ok());
        }
    }

    #[test]
    fn test_xy_charts_use_matching_renderers() {
        let options = ChartOptions::default();
        let cases = [
            (create_xy_line_chart(None, None, None, xy_data(), options), "line_and_shape"),
            (create_xy_area_chart(None, None, None, xy_data(), options), "area"),
            (create_scatter_plot(None, None, None, xy_data(), options), "line_and_shape"),
        ];
        for (chart, renderer) in cases {
            assert_eq!(xy_renderer(&chart).type_name(), renderer);
            assert!(chart.draw(400.0, 300.0, None).is_ok());
        }
    }

    #[test]
    fn test_generators_follow_options() {
        let with_urls = create_bar_chart(
            None,
            None,
            None,
            category_data(),
            ChartOptions::default().with_urls(true),
        );
        let rendered = with_urls.draw(400.0, 300.0, None).unwrap();
        let item = rendered
            .info
            .entities
            .iter()
            .find(|e| {
                matches!(&e.kind, EntityKind::CategoryItem { row_key, column_key, .. }
                    if row_key == "S1" && column_key == "A")
            })
            .unwrap();
        assert!(item.tooltip.as_deref().unwrap().starts_with("(S1, A) = "));
        assert!(item.url.as_deref().unwrap().contains("series=S1"));

        let bare = create_bar_chart(
            None,
            None,
            None,
            category_data(),
            ChartOptions {
                tooltips: false,
                ..Default::default()
            },
        );
        let rendered = bare.draw(400.0, 300.0, None).unwrap();
        assert!(rendered
            .info
            .entities
            .iter()
            .all(|e| e.tooltip.is_none() && e.url.is_none()));
    }

    #[test]
    fn test_pie_and_ring_charts() {
        let data = DefaultPieDataset::from_pairs([("One", 10.0), ("Two", 30.0)]);
        let pie = create_pie_chart(Some("Pie"), data.clone(), ChartOptions::default());
        let Plot::Pie(plot) = &pie.plot else {
            unreachable!()
        };
        assert!(plot.tooltip_generator.is_some());
        assert!(plot.url_generator.is_none());
        assert!(plot.section_depth.is_none());

        let ring = create_ring_chart(None, data, 0.3, ChartOptions::default());
        let Plot::Pie(plot) = &ring.plot else {
            unreachable!()
        };
        assert_eq!(plot.section_depth, Some(0.3));
        assert!(ring.draw(300.0, 300.0, None).is_ok());
    }

    #[test]
    fn test_time_series_chart_uses_date_axis() {
        let mut series = TimeSeries::new("Sales");
        for day in 1..=3 {
            series
                .add(RegularTimePeriod::day(2024, 1, day).unwrap(), Some(day as f64))
                .unwrap();
        }
        let chart = create_time_series_chart(
            Some("Sales"),
            Some("Date"),
            Some("Units"),
            TimeSeriesCollection::from_series(vec![series]).unwrap(),
            ChartOptions::default().with_orientation(PlotOrientation::Horizontal),
        );
        let Plot::Xy(plot) = &chart.plot else {
            unreachable!()
        };
        assert!(plot.domain_axis.is_date());
        assert_eq!(plot.orientation, PlotOrientation::Vertical);
        assert!(chart.draw(500.0, 300.0, None).is_ok());
    }

    #[test]
    fn test_gantt_chart_is_horizontal() {
        let date = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        let mut scheduled = TaskSeries::new("Scheduled");
        scheduled.add(Task::new(
            "Design",
            Some(SimpleTimePeriod::from_dates(date(1), date(5)).unwrap()),
        ));
        scheduled.add(Task::new(
            "Build",
            Some(SimpleTimePeriod::from_dates(date(4), date(20)).unwrap()),
        ));
        let mut tasks = TaskSeriesCollection::new();
        tasks.add(scheduled).unwrap();

        let chart = create_gantt_chart(None, Some("Task"), Some("Date"), tasks, ChartOptions::default());
        let Plot::Category(plot) = &chart.plot else {
            unreachable!()
        };
        assert_eq!(plot.orientation, PlotOrientation::Horizontal);
        assert!(plot.range_axis.is_date());
        assert_eq!(category_renderer(&chart).type_name(), "gantt");
        assert!(chart.draw(500.0, 300.0, None).is_ok());
    }

    #[test]
    fn test_statistical_and_box_charts_draw() {
        let mut stats = DefaultStatisticalCategoryDataset::new();
        stats.add(Some(5.0), Some(1.0), "S1", "A");
        stats.add(Some(7.0), Some(0.5), "S1", "B");
        let chart = create_statistical_bar_chart(None, None, None, stats, ChartOptions::default());
        assert_eq!(category_renderer(&chart).type_name(), "statistical_bar");
        assert!(chart.draw(400.0, 300.0, None).is_ok());

        let mut boxes = DefaultBoxAndWhiskerCategoryDataset::new();
        boxes
            .add_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 12.0], "S1", "A")
            .unwrap();
        let chart = create_box_and_whisker_chart(None, None, None, boxes, ChartOptions::default());
        assert_eq!(category_renderer(&chart).type_name(), "box_and_whisker");
        assert!(chart.draw(400.0, 300.0, None).is_ok());
    }

    #[test]
    fn test_bubble_stacked_and_error_charts_draw() {
        let mut xyz = DefaultXYZDataset::new();
        xyz.add_series("B", vec![1.0, 2.0], vec![3.0, 4.0], vec![0.5, 1.0])
            .unwrap();
        let chart = create_bubble_chart(None, None, None, xyz, ChartOptions::default());
        assert_eq!(xy_renderer(&chart).type_name(), "bubble");
        assert!(chart.draw(400.0, 300.0, None).is_ok());

        let mut table = DefaultTableXYDataset::new();
        for (key, points) in [("Lower", [(1.0, 1.0), (2.0, 2.0)]), ("Upper", [(1.0, 3.0), (2.0, 1.0)])] {
            let mut series = XYSeries::with_options(key, true, false);
            for (x, y) in points {
                series.add(x, Some(y)).unwrap();
            }
            table.add_series(series).unwrap();
        }
        assert!(table
            .add_series(XYSeries::from_points("Duplicates", [(1.0, 1.0)]).unwrap())
            .is_err());
        let chart = create_stacked_xy_area_chart(None, None, None, table, ChartOptions::default());
        assert_eq!(xy_renderer(&chart).type_name(), "stacked_area");
        assert!(chart.draw(400.0, 300.0, None).is_ok());

        let mut series = XYIntervalSeries::new("E");
        series.add(1.0, 0.8, 1.2, 5.0, 4.0, 6.0).unwrap();
        series.add(2.0, 1.8, 2.2, 7.0, 6.5, 7.5).unwrap();
        let mut intervals = XYIntervalSeriesCollection::new();
        intervals.add_series(series).unwrap();
        let chart = create_xy_error_chart(None, None, None, intervals, ChartOptions::default());
        assert_eq!(xy_renderer(&chart).type_name(), "error");
        assert!(chart.draw(400.0, 300.0, None).is_ok());
    }

    #[test]
    fn test_meter_chart() {
        let chart = create_meter_chart(
            Some("Speed"),
            DefaultValueDataset::new(Some(42.0)),
            ChartOptions::default(),
        );
        assert_eq!(chart.plot.type_name(), "meter");
        let rendered = chart.draw(300.0, 300.0, None).unwrap();
        assert!(rendered.scene.find_group("meter_plot").is_some());
    }
}
