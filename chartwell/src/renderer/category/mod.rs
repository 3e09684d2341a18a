//! Renderers for category plots.

mod area;
mod bar;
mod box_whisker;
mod gantt;
mod line_shape;
mod stacked_bar;
mod statistical;

pub use area::{AreaEndType, AreaRenderer};
pub use bar::BarRenderer;
pub use box_whisker::BoxAndWhiskerRenderer;
pub use gantt::GanttRenderer;
pub use line_shape::LineAndShapeRenderer;
pub use stacked_bar::StackedBarRenderer;
pub use statistical::StatisticalBarRenderer;

use chartwell_common::layout::{Bounds, PlotOrientation, RectangleEdge};
use chartwell_common::range::Range;
use chartwell_data::dataset_utils::find_category_range_bounds;
use chartwell_data::traits::CategoryDataset;
use chartwell_data::CategoryDatasetKind;
use chartwell_scales::numeric::ContinuousNumericScale;
use chartwell_scales::{BandScale, NumericScale};
use serde::{Deserialize, Serialize};

use super::styles::{SeriesStyles, StyleContext};
use super::{CategoryGenerators, EntityShape, RendererState};
use crate::axis::{CategoryAxis, ValueAxis};
use crate::entity::EntityKind;
use crate::error::ChartwellChartError;
use crate::legend::LegendItem;

/// Axes, scales and dataset shared by every item of one category dataset
#[derive(Debug, Clone)]
pub struct CategoryItemContext<'a> {
    pub data_area: Bounds,
    pub orientation: PlotOrientation,
    pub domain_axis: &'a CategoryAxis,
    pub domain_edge: RectangleEdge,
    pub domain_scale: BandScale,
    pub range_axis: &'a ValueAxis,
    pub range_edge: RectangleEdge,
    pub range_scale: NumericScale,
    pub dataset: &'a CategoryDatasetKind,
    pub dataset_index: usize,
    pub styles: StyleContext<'a>,
}

impl<'a> CategoryItemContext<'a> {
    pub fn new(
        data_area: Bounds,
        orientation: PlotOrientation,
        domain: (&'a CategoryAxis, RectangleEdge),
        range: (&'a ValueAxis, RectangleEdge),
        dataset: &'a CategoryDatasetKind,
        styles: StyleContext<'a>,
    ) -> Result<Self, ChartwellChartError> {
        let columns = dataset.column_count().max(1);
        Ok(Self {
            data_area,
            orientation,
            domain_axis: domain.0,
            domain_edge: domain.1,
            domain_scale: domain.0.scale(columns, &data_area, domain.1)?,
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

    /// Screen coordinate of `value` along the range axis
    pub fn trans_value(&self, value: f64) -> f32 {
        self.range_scale.scale(value) as f32
    }

    /// Screen point for a category coordinate and a range coordinate
    pub fn point(&self, category: f32, value: f32) -> [f32; 2] {
        match self.orientation {
            PlotOrientation::Vertical => [category, value],
            PlotOrientation::Horizontal => [value, category],
        }
    }

    pub fn category_start(&self, column: usize) -> f32 {
        self.domain_scale.start(column) as f32
    }

    pub fn category_middle(&self, column: usize) -> f32 {
        self.domain_scale.middle(column) as f32
    }

    pub fn category_end(&self, column: usize) -> f32 {
        self.domain_scale.end(column) as f32
    }

    /// Length of the data area along the category axis
    pub fn category_space(&self) -> f32 {
        match self.orientation {
            PlotOrientation::Vertical => self.data_area.width,
            PlotOrientation::Horizontal => self.data_area.height,
        }
    }

    /// Value and screen point of an item at its category middle
    pub fn item_point(&self, row: usize, column: usize) -> Option<(f64, [f32; 2])> {
        let value = self.dataset.value(row, column)?;
        let tv = self.trans_value(value);
        if !tv.is_finite() {
            return None;
        }
        Some((value, self.point(self.category_middle(column), tv)))
    }

    /// Rows drawn by the renderer, with their position among visible rows
    pub fn visible_rows(&self, styles: &SeriesStyles) -> Vec<usize> {
        (0..self.dataset.row_count())
            .filter(|r| styles.is_visible(*r))
            .collect()
    }

    pub(crate) fn entity_kind(&self, row: usize, column: usize) -> EntityKind {
        EntityKind::CategoryItem {
            dataset: self.dataset_index,
            row_key: self.dataset.row_key(row).unwrap_or_default().to_string(),
            column_key: self.dataset.column_key(column).unwrap_or_default().to_string(),
        }
    }
}

/// A renderer for one category dataset
pub trait CategoryItemRenderer {
    fn styles(&self) -> &SeriesStyles;

    fn pass_count(&self) -> usize {
        1
    }

    /// Called once before the first item, rejects unsuitable datasets and
    /// works out shared geometry such as the bar width
    fn initialise(
        &self,
        _state: &mut RendererState,
        _ctx: &CategoryItemContext,
    ) -> Result<(), ChartwellChartError> {
        Ok(())
    }

    fn draw_item(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
        row: usize,
        column: usize,
        pass: usize,
    ) -> Result<(), ChartwellChartError>;

    fn find_range_bounds(&self, dataset: &CategoryDatasetKind) -> Option<Range> {
        find_category_range_bounds(dataset, false)
    }

    fn legend_item(
        &self,
        dataset: &CategoryDatasetKind,
        dataset_index: usize,
        row: usize,
        ctx: &StyleContext,
    ) -> Option<LegendItem>;
}

/// The category renderers a plot can be configured with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CategoryRendererKind {
    Bar(BarRenderer),
    StackedBar(StackedBarRenderer),
    LineAndShape(LineAndShapeRenderer),
    Area(AreaRenderer),
    StatisticalBar(StatisticalBarRenderer),
    BoxAndWhisker(BoxAndWhiskerRenderer),
    Gantt(GanttRenderer),
}

impl Default for CategoryRendererKind {
    fn default() -> Self {
        CategoryRendererKind::Bar(BarRenderer::default())
    }
}

impl CategoryRendererKind {
    pub fn as_renderer(&self) -> &dyn CategoryItemRenderer {
        match self {
            CategoryRendererKind::Bar(r) => r,
            CategoryRendererKind::StackedBar(r) => r,
            CategoryRendererKind::LineAndShape(r) => r,
            CategoryRendererKind::Area(r) => r,
            CategoryRendererKind::StatisticalBar(r) => r,
            CategoryRendererKind::BoxAndWhisker(r) => r,
            CategoryRendererKind::Gantt(r) => r,
        }
    }

    pub fn styles_mut(&mut self) -> &mut SeriesStyles {
        match self {
            CategoryRendererKind::Bar(r) => &mut r.styles,
            CategoryRendererKind::StackedBar(r) => &mut r.bar.styles,
            CategoryRendererKind::LineAndShape(r) => &mut r.styles,
            CategoryRendererKind::Area(r) => &mut r.styles,
            CategoryRendererKind::StatisticalBar(r) => &mut r.bar.styles,
            CategoryRendererKind::BoxAndWhisker(r) => &mut r.styles,
            CategoryRendererKind::Gantt(r) => &mut r.bar.styles,
        }
    }

    pub fn generators_mut(&mut self) -> &mut CategoryGenerators {
        match self {
            CategoryRendererKind::Bar(r) => &mut r.generators,
            CategoryRendererKind::StackedBar(r) => &mut r.bar.generators,
            CategoryRendererKind::LineAndShape(r) => &mut r.generators,
            CategoryRendererKind::Area(r) => &mut r.generators,
            CategoryRendererKind::StatisticalBar(r) => &mut r.bar.generators,
            CategoryRendererKind::BoxAndWhisker(r) => &mut r.generators,
            CategoryRendererKind::Gantt(r) => &mut r.bar.generators,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            CategoryRendererKind::Bar(_) => "bar",
            CategoryRendererKind::StackedBar(_) => "stacked_bar",
            CategoryRendererKind::LineAndShape(_) => "line_and_shape",
            CategoryRendererKind::Area(_) => "area",
            CategoryRendererKind::StatisticalBar(_) => "statistical_bar",
            CategoryRendererKind::BoxAndWhisker(_) => "box_and_whisker",
            CategoryRendererKind::Gantt(_) => "gantt",
        }
    }
}

impl From<BarRenderer> for CategoryRendererKind {
    fn from(value: BarRenderer) -> Self {
        CategoryRendererKind::Bar(value)
    }
}

impl From<StackedBarRenderer> for CategoryRendererKind {
    fn from(value: StackedBarRenderer) -> Self {
        CategoryRendererKind::StackedBar(value)
    }
}

impl From<LineAndShapeRenderer> for CategoryRendererKind {
    fn from(value: LineAndShapeRenderer) -> Self {
        CategoryRendererKind::LineAndShape(value)
    }
}

impl From<AreaRenderer> for CategoryRendererKind {
    fn from(value: AreaRenderer) -> Self {
        CategoryRendererKind::Area(value)
    }
}

impl From<StatisticalBarRenderer> for CategoryRendererKind {
    fn from(value: StatisticalBarRenderer) -> Self {
        CategoryRendererKind::StatisticalBar(value)
    }
}

impl From<BoxAndWhiskerRenderer> for CategoryRendererKind {
    fn from(value: BoxAndWhiskerRenderer) -> Self {
        CategoryRendererKind::BoxAndWhisker(value)
    }
}

impl From<GanttRenderer> for CategoryRendererKind {
    fn from(value: GanttRenderer) -> Self {
        CategoryRendererKind::Gantt(value)
    }
}

/// Runs every pass of `renderer` over the visible rows, column by column
pub fn draw_dataset(
    renderer: &dyn CategoryItemRenderer,
    state: &mut RendererState,
    ctx: &CategoryItemContext,
) -> Result<(), ChartwellChartError> {
    renderer.initialise(state, ctx)?;
    let rows = ctx.visible_rows(renderer.styles());
    for pass in 0..renderer.pass_count() {
        for &row in &rows {
            for column in 0..ctx.dataset.column_count() {
                renderer.draw_item(state, ctx, row, column, pass)?;
            }
        }
    }
    Ok(())
}

/// Adds the hit area of an item with its tooltip and URL
pub(crate) fn add_item_entity(
    state: &mut RendererState,
    ctx: &CategoryItemContext,
    generators: &CategoryGenerators,
    shape: EntityShape,
    kind: EntityKind,
    (row, column): (usize, usize),
) {
    if !state.collects_entities() {
        return;
    }
    let tooltip = generators
        .tooltip
        .as_ref()
        .map(|g| g.generate(ctx.dataset, row, column));
    let url = generators.url.as_ref().and_then(|g| {
        g.generate(
            row,
            column,
            ctx.dataset.row_key(row).unwrap_or_default(),
            ctx.dataset.column_key(column).unwrap_or_default(),
        )
    });
    state.add_entity(shape.into_entity(kind).with_tooltip(tooltip).with_url(url));
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_item_label(
    state: &mut RendererState,
    ctx: &CategoryItemContext,
    generators: &CategoryGenerators,
    styles: &SeriesStyles,
    row: usize,
    column: usize,
    anchor: [f32; 2],
    positive: bool,
) {
    if !styles.item_labels_visible(row) {
        return;
    }
    let Some(generator) = generators.item_label.as_ref() else {
        return;
    };
    let text = generator.generate(ctx.dataset, row, column);
    state.item_label("item_labels", text, anchor, positive, ctx.orientation, styles);
}

/// Records the item as a crosshair candidate, with the column index as its
/// domain value
pub(crate) fn update_crosshair(
    state: &mut RendererState,
    ctx: &CategoryItemContext,
    column: usize,
    value: f64,
    category: f32,
) {
    state.crosshair.update_crosshair_point(
        column as f64,
        value,
        ctx.dataset_index,
        category,
        ctx.trans_value(value),
        ctx.orientation,
    );
}

/// Legend entry coloured like the row, `None` for hidden rows
pub(crate) fn series_legend_item(
    styles: &SeriesStyles,
    dataset: &CategoryDatasetKind,
    dataset_index: usize,
    row: usize,
    ctx: &StyleContext,
) -> Option<LegendItem> {
    if !styles.is_visible_in_legend(row) {
        return None;
    }
    let key = dataset.row_key(row)?;
    Some(LegendItem::new(key, styles.paint(row, ctx)).with_series(dataset_index, row))
}

#[cfg(test)]
pub(crate) mod test_support {
    use chartwell_common::layout::{Bounds, PlotOrientation, RectangleEdge};
    use chartwell_common::range::Range;
    use chartwell_data::category::DefaultCategoryDataset;
    use chartwell_data::CategoryDatasetKind;

    use crate::axis::{CategoryAxis, ValueAxis};

    pub fn area() -> Bounds {
        Bounds::new(0.0, 0.0, 100.0, 100.0)
    }

    /// Category axis without margins and a range axis over [0, 10]
    pub fn axes() -> (CategoryAxis, ValueAxis) {
        (
            CategoryAxis::new(None).with_margins(0.0, 0.0, 0.0),
            ValueAxis::new(None).with_range(Range::try_new(0.0, 10.0).unwrap()),
        )
    }

    pub fn edges(orientation: PlotOrientation) -> (RectangleEdge, RectangleEdge) {
        match orientation {
            PlotOrientation::Vertical => (RectangleEdge::Bottom, RectangleEdge::Left),
            PlotOrientation::Horizontal => (RectangleEdge::Left, RectangleEdge::Bottom),
        }
    }

    /// Dataset from `(row, column, value)` triples
    pub fn dataset(values: &[(&str, &str, Option<f64>)]) -> CategoryDatasetKind {
        let mut data = DefaultCategoryDataset::new();
        for (row, column, value) in values {
            data.add_value(*value, row, column);
        }
        data.into()
    }
}
