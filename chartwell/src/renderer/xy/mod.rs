//! Renderers for XY plots.

mod area;
mod bubble;
mod error;
mod line_shape;
mod stacked_area;

pub use area::XYAreaRenderer;
pub use bubble::{BubbleScale, XYBubbleRenderer};
pub use error::XYErrorRenderer;
pub use line_shape::XYLineAndShapeRenderer;
pub use stacked_area::StackedXYAreaRenderer;

use chartwell_common::layout::{Bounds, PlotOrientation, RectangleEdge};
use chartwell_common::range::Range;
use chartwell_data::dataset_utils::{find_domain_bounds, find_range_bounds};
use chartwell_data::traits::{SeriesDataset, XYDataset};
use chartwell_data::XYDatasetKind;
use chartwell_scales::numeric::ContinuousNumericScale;
use chartwell_scales::NumericScale;
use serde::{Deserialize, Serialize};

use super::styles::{SeriesStyles, StyleContext};
use super::{EntityShape, RendererState, XYGenerators};
use crate::axis::ValueAxis;
use crate::entity::EntityKind;
use crate::error::ChartwellChartError;
use crate::legend::LegendItem;

/// Order in which series are drawn within each pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesRenderingOrder {
    Forward,
    /// Last series first, so the first series ends up on top
    #[default]
    Reverse,
}

/// Axes, scales and dataset shared by every item of one XY dataset
#[derive(Debug, Clone)]
pub struct XYItemContext<'a> {
    pub data_area: Bounds,
    pub orientation: PlotOrientation,
    pub domain_axis: &'a ValueAxis,
    pub domain_edge: RectangleEdge,
    pub domain_scale: NumericScale,
    pub range_axis: &'a ValueAxis,
    pub range_edge: RectangleEdge,
    pub range_scale: NumericScale,
    pub dataset: &'a XYDatasetKind,
    pub dataset_index: usize,
    pub styles: StyleContext<'a>,
}

impl<'a> XYItemContext<'a> {
    pub fn new(
        data_area: Bounds,
        orientation: PlotOrientation,
        domain: (&'a ValueAxis, RectangleEdge),
        range: (&'a ValueAxis, RectangleEdge),
        dataset: &'a XYDatasetKind,
        styles: StyleContext<'a>,
    ) -> Result<Self, ChartwellChartError> {
        Ok(Self {
            data_area,
            orientation,
            domain_axis: domain.0,
            domain_edge: domain.1,
            domain_scale: domain.0.scale(&data_area, domain.1)?,
            range_axis: range.0,
            range_edge: range.1,
            range_scale: range.0.scale(&data_area, range.1)?,
            dataset,
            dataset_index: 0,
            styles,
        })
    }

    pub fn with_dataset_index(mut self, dataset_index: usize) -> Self {
        self.dataset_index = dataset_index;
        self
    }

    /// Screen coordinate of `x` along the domain axis
    pub fn trans_x(&self, x: f64) -> f32 {
        self.domain_scale.scale(x) as f32
    }

    /// Screen coordinate of `y` along the range axis
    pub fn trans_y(&self, y: f64) -> f32 {
        self.range_scale.scale(y) as f32
    }

    /// Screen point for a domain and a range coordinate
    pub fn point(&self, trans_x: f32, trans_y: f32) -> [f32; 2] {
        match self.orientation {
            PlotOrientation::Vertical => [trans_x, trans_y],
            PlotOrientation::Horizontal => [trans_y, trans_x],
        }
    }

    /// Data and screen coordinates of an item, `None` when it cannot be placed
    pub fn item_point(&self, series: usize, item: usize) -> Option<(f64, f64, [f32; 2])> {
        let x = self.dataset.x(series, item);
        let y = self.dataset.y(series, item);
        let (tx, ty) = (self.trans_x(x), self.trans_y(y));
        if !(tx.is_finite() && ty.is_finite()) {
            return None;
        }
        Some((x, y, self.point(tx, ty)))
    }

    pub(crate) fn entity_kind(&self, series: usize, item: usize) -> EntityKind {
        EntityKind::XYItem {
            dataset: self.dataset_index,
            series,
            item,
        }
    }
}

/// A renderer for one XY dataset
pub trait XYItemRenderer {
    fn styles(&self) -> &SeriesStyles;

    fn pass_count(&self) -> usize {
        1
    }

    /// Called once before the first item, rejects unsuitable datasets
    fn initialise(
        &self,
        _state: &mut RendererState,
        _ctx: &XYItemContext,
    ) -> Result<(), ChartwellChartError> {
        Ok(())
    }

    fn draw_item(
        &self,
        state: &mut RendererState,
        ctx: &XYItemContext,
        series: usize,
        item: usize,
        pass: usize,
    ) -> Result<(), ChartwellChartError>;

    fn find_domain_bounds(&self, dataset: &XYDatasetKind) -> Option<Range> {
        find_domain_bounds(dataset, false)
    }

    fn find_range_bounds(&self, dataset: &XYDatasetKind) -> Option<Range> {
        find_range_bounds(dataset, false)
    }

    fn legend_item(
        &self,
        dataset: &XYDatasetKind,
        dataset_index: usize,
        series: usize,
        ctx: &StyleContext,
    ) -> Option<LegendItem>;
}

/// The XY renderers a plot can be configured with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum XYRendererKind {
    LineAndShape(XYLineAndShapeRenderer),
    Area(XYAreaRenderer),
    StackedArea(StackedXYAreaRenderer),
    Bubble(XYBubbleRenderer),
    Error(XYErrorRenderer),
}

impl Default for XYRendererKind {
    fn default() -> Self {
        XYRendererKind::LineAndShape(XYLineAndShapeRenderer::default())
    }
}

impl XYRendererKind {
    pub fn as_renderer(&self) -> &dyn XYItemRenderer {
        match self {
            XYRendererKind::LineAndShape(r) => r,
            XYRendererKind::Area(r) => r,
            XYRendererKind::StackedArea(r) => r,
            XYRendererKind::Bubble(r) => r,
            XYRendererKind::Error(r) => r,
        }
    }

    pub fn styles_mut(&mut self) -> &mut SeriesStyles {
        match self {
            XYRendererKind::LineAndShape(r) => &mut r.styles,
            XYRendererKind::Area(r) => &mut r.styles,
            XYRendererKind::StackedArea(r) => &mut r.styles,
            XYRendererKind::Bubble(r) => &mut r.styles,
            XYRendererKind::Error(r) => &mut r.inner.styles,
        }
    }

    pub fn generators_mut(&mut self) -> &mut XYGenerators {
        match self {
            XYRendererKind::LineAndShape(r) => &mut r.generators,
            XYRendererKind::Area(r) => &mut r.generators,
            XYRendererKind::StackedArea(r) => &mut r.generators,
            XYRendererKind::Bubble(r) => &mut r.generators,
            XYRendererKind::Error(r) => &mut r.inner.generators,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            XYRendererKind::LineAndShape(_) => "line_and_shape",
            XYRendererKind::Area(_) => "area",
            XYRendererKind::StackedArea(_) => "stacked_area",
            XYRendererKind::Bubble(_) => "bubble",
            XYRendererKind::Error(_) => "error",
        }
    }
}

impl From<XYLineAndShapeRenderer> for XYRendererKind {
    fn from(value: XYLineAndShapeRenderer) -> Self {
        XYRendererKind::LineAndShape(value)
    }
}

impl From<XYAreaRenderer> for XYRendererKind {
    fn from(value: XYAreaRenderer) -> Self {
        XYRendererKind::Area(value)
    }
}

impl From<StackedXYAreaRenderer> for XYRendererKind {
    fn from(value: StackedXYAreaRenderer) -> Self {
        XYRendererKind::StackedArea(value)
    }
}

impl From<XYBubbleRenderer> for XYRendererKind {
    fn from(value: XYBubbleRenderer) -> Self {
        XYRendererKind::Bubble(value)
    }
}

impl From<XYErrorRenderer> for XYRendererKind {
    fn from(value: XYErrorRenderer) -> Self {
        XYRendererKind::Error(value)
    }
}

/// Runs every pass of `renderer` over the visible series of the dataset
pub fn draw_dataset(
    renderer: &dyn XYItemRenderer,
    state: &mut RendererState,
    ctx: &XYItemContext,
    order: SeriesRenderingOrder,
) -> Result<(), ChartwellChartError> {
    renderer.initialise(state, ctx)?;
    let series_count = ctx.dataset.series_count();
    let series_order: Vec<usize> = match order {
        SeriesRenderingOrder::Forward => (0..series_count).collect(),
        SeriesRenderingOrder::Reverse => (0..series_count).rev().collect(),
    };
    for pass in 0..renderer.pass_count() {
        for &series in &series_order {
            if !renderer.styles().is_visible(series) {
                continue;
            }
            for item in 0..ctx.dataset.item_count(series) {
                renderer.draw_item(state, ctx, series, item, pass)?;
            }
        }
    }
    Ok(())
}

/// Adds the hit area of an item with its tooltip and URL
pub(crate) fn add_item_entity(
    state: &mut RendererState,
    ctx: &XYItemContext,
    generators: &XYGenerators,
    shape: EntityShape,
    series: usize,
    item: usize,
) {
    if !state.collects_entities() {
        return;
    }
    let tooltip = generators
        .tooltip
        .as_ref()
        .map(|g| g.generate(ctx.dataset, series, item));
    let url = generators.url.as_ref().and_then(|g| g.generate(series, item));
    state.add_entity(
        shape
            .into_entity(ctx.entity_kind(series, item))
            .with_tooltip(tooltip)
            .with_url(url),
    );
}

pub(crate) fn draw_item_label(
    state: &mut RendererState,
    ctx: &XYItemContext,
    generators: &XYGenerators,
    styles: &SeriesStyles,
    series: usize,
    item: usize,
    anchor: [f32; 2],
) {
    if !styles.item_labels_visible(series) {
        return;
    }
    let Some(generator) = generators.item_label.as_ref() else {
        return;
    };
    let text = generator.generate(ctx.dataset, series, item);
    let positive = ctx.dataset.y(series, item) >= 0.0;
    state.item_label("item_labels", text, anchor, positive, ctx.orientation, styles);
}

pub(crate) fn update_crosshair(
    state: &mut RendererState,
    ctx: &XYItemContext,
    x: f64,
    y: f64,
) {
    let (tx, ty) = (ctx.trans_x(x), ctx.trans_y(y));
    state
        .crosshair
        .update_crosshair_point(x, y, ctx.dataset_index, tx, ty, ctx.orientation);
}

/// Legend entry coloured like the series, `None` for hidden series
pub(crate) fn series_legend_item(
    styles: &SeriesStyles,
    dataset: &XYDatasetKind,
    dataset_index: usize,
    series: usize,
    ctx: &StyleContext,
) -> Option<LegendItem> {
    if !styles.is_visible_in_legend(series) {
        return None;
    }
    let key = dataset.series_key(series)?;
    Some(LegendItem::new(key, styles.paint(series, ctx)).with_series(dataset_index, series))
}

#[cfg(test)]
pub(crate) mod test_support {
    use chartwell_common::layout::{Bounds, PlotOrientation, RectangleEdge};
    use chartwell_common::range::Range;
    use chartwell_data::xy::{XYSeries, XYSeriesCollection};
    use chartwell_data::XYDatasetKind;

    use crate::axis::ValueAxis;

    pub fn area() -> Bounds {
        Bounds::new(0.0, 0.0, 100.0, 100.0)
    }

    /// Axes over [0, 10] on both sides so one unit is ten pixels
    pub fn axes() -> (ValueAxis, ValueAxis) {
        let range = Range::try_new(0.0, 10.0).unwrap();
        (
            ValueAxis::new(None).with_range(range),
            ValueAxis::new(None).with_range(range),
        )
    }

    pub fn edges(orientation: PlotOrientation) -> (RectangleEdge, RectangleEdge) {
        match orientation {
            PlotOrientation::Vertical => (RectangleEdge::Bottom, RectangleEdge::Left),
            PlotOrientation::Horizontal => (RectangleEdge::Left, RectangleEdge::Bottom),
        }
    }

    pub fn series(key: &str, points: &[(f64, Option<f64>)]) -> XYSeries {
        let mut series = XYSeries::new(key);
        for (x, y) in points {
            series.add(*x, *y).unwrap();
        }
        series
    }

    pub fn dataset(series: Vec<XYSeries>) -> XYDatasetKind {
        XYSeriesCollection::from_series(series).unwrap().into()
    }
}
