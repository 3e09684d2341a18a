use chartwell_common::layout::Bounds;
use chartwell_common::range::Range;
use chartwell_data::dataset_utils::find_category_range_bounds;
use chartwell_data::traits::CategoryDataset;
use chartwell_data::CategoryDatasetKind;
use serde::{Deserialize, Serialize};

use super::{
    add_item_entity, draw_item_label, series_legend_item, update_crosshair, CategoryItemContext,
    CategoryItemRenderer,
};
use crate::entity::EntityKind;
use crate::error::ChartwellChartError;
use crate::legend::LegendItem;
use crate::renderer::styles::{SeriesStyles, StyleContext};
use crate::renderer::{oriented_bar, CategoryGenerators, EntityShape, RendererState};

/// Share of the category axis left for bars, split evenly between
/// `rows * columns` bars and capped at `max_bar_width` of the axis length
pub(crate) fn calculate_bar_width(
    ctx: &CategoryItemContext,
    item_margin: f64,
    max_bar_width: f64,
    rows: usize,
    columns: usize,
) -> f32 {
    let space = ctx.category_space() as f64;
    let margins = ctx.domain_axis.margins();
    let category_margin = if columns > 1 { margins.category } else { 0.0 };
    let item_margin = if rows > 1 { item_margin } else { 0.0 };
    let used = space * (1.0 - margins.lower - margins.upper - category_margin - item_margin);
    let n = rows * columns;
    let width = if n > 0 { used / n as f64 } else { used };
    width.min(space * max_bar_width) as f32
}

/// Draws each value as a bar from the base value.
///
/// Within a category the bars of the visible rows sit side by side, separated
/// by gaps that together take `item_margin` of the axis length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarRenderer {
    pub styles: SeriesStyles,
    pub generators: CategoryGenerators,
    pub item_margin: f64,
    /// Upper limit of the bar width as a fraction of the axis length
    pub max_bar_width: f64,
    pub base: f64,
    /// Bars shorter than this many pixels are lengthened
    pub minimum_bar_length: f32,
    pub draw_bar_outline: bool,
    pub include_base_in_range: bool,
}

impl Default for BarRenderer {
    fn default() -> Self {
        Self {
            styles: SeriesStyles::default(),
            generators: CategoryGenerators::default(),
            item_margin: 0.2,
            max_bar_width: 1.0,
            base: 0.0,
            minimum_bar_length: 0.0,
            draw_bar_outline: false,
            include_base_in_range: true,
        }
    }
}

impl BarRenderer {
    pub fn with_generators(mut self, generators: CategoryGenerators) -> Self {
        self.generators = generators;
        self
    }

    /// Width of each bar when `rows` bars share every one of `columns`
    /// categories
    pub(crate) fn bar_width(&self, ctx: &CategoryItemContext, rows: usize, columns: usize) -> f32 {
        calculate_bar_width(ctx, self.item_margin, self.max_bar_width, rows, columns)
    }

    /// Category axis coordinate where the bar of the `slot`th visible row
    /// starts
    pub(crate) fn bar_start(
        &self,
        ctx: &CategoryItemContext,
        slot: usize,
        rows: usize,
        column: usize,
        bar_width: f32,
    ) -> f32 {
        if rows <= 1 {
            return ctx.category_middle(column) - bar_width / 2.0;
        }
        let space = ctx.category_space() as f64;
        let columns = ctx.dataset.column_count().max(1) as f64;
        let margins = ctx.domain_axis.margins();
        let series_gap = space * self.item_margin / (columns * (rows as f64 - 1.0));
        let mut factor = 1.0 - self.item_margin - margins.lower - margins.upper;
        if columns > 1.0 {
            factor -= margins.category;
        }
        let series_width = space * factor / (columns * rows as f64);
        let offset = slot as f64 * (series_width + series_gap) + series_width / 2.0;
        ctx.category_start(column) + offset as f32 - bar_width / 2.0
    }

    /// Screen coordinates of `base` and `value` clipped to the axis range,
    /// `None` when the bar lies outside it
    pub(crate) fn value_span(
        &self,
        ctx: &CategoryItemContext,
        base: f64,
        value: f64,
    ) -> Option<(f32, f32)> {
        let axis = ctx.range_axis.range;
        let (lo, hi) = (base.min(value), base.max(value));
        if hi < axis.lower() || lo > axis.upper() {
            return None;
        }
        let clamp = |v: f64| v.clamp(axis.lower(), axis.upper());
        let tb = ctx.trans_value(clamp(base));
        let mut tv = ctx.trans_value(clamp(value));
        if !(tb.is_finite() && tv.is_finite()) {
            return None;
        }
        if (tv - tb).abs() < self.minimum_bar_length {
            let upward = ctx.trans_value(axis.upper()) - ctx.trans_value(axis.lower());
            let direction = if value >= base { upward.signum() } else { -upward.signum() };
            tv = tb + self.minimum_bar_length * direction;
        }
        Some((tb, tv))
    }

    /// Fills `bar` in the row paint and records its entity
    pub(crate) fn fill_bar(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
        bar: Bounds,
        kind: EntityKind,
        (row, column): (usize, usize),
    ) {
        let outline = self.draw_bar_outline.then(|| {
            (
                self.styles.outline_paint(row, &ctx.styles),
                self.styles.outline_stroke(row, &ctx.styles).width,
            )
        });
        state.marks.rect(
            &format!("cat_{}_bars", ctx.dataset_index),
            bar,
            self.styles.paint(row, &ctx.styles),
            outline,
        );
        add_item_entity(state, ctx, &self.generators, EntityShape::Rect(bar), kind, (row, column));
    }

    pub(crate) fn bar_legend_item(
        &self,
        dataset: &CategoryDatasetKind,
        dataset_index: usize,
        row: usize,
        ctx: &StyleContext,
    ) -> Option<LegendItem> {
        let outline = self.draw_bar_outline.then(|| {
            (
                self.styles.outline_paint(row, ctx),
                self.styles.outline_stroke(row, ctx).width,
            )
        });
        Some(
            series_legend_item(&self.styles, dataset, dataset_index, row, ctx)?
                .with_outline(outline),
        )
    }
}

impl CategoryItemRenderer for BarRenderer {
    fn styles(&self) -> &SeriesStyles {
        &self.styles
    }

    fn initialise(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
    ) -> Result<(), ChartwellChartError> {
        let rows = ctx.visible_rows(&self.styles).len();
        state.bar_width = self.bar_width(ctx, rows, ctx.dataset.column_count());
        Ok(())
    }

    fn draw_item(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
        row: usize,
        column: usize,
        _pass: usize,
    ) -> Result<(), ChartwellChartError> {
        let Some(value) = ctx.dataset.value(row, column) else {
            return Ok(());
        };
        let rows = ctx.visible_rows(&self.styles);
        let Some(slot) = rows.iter().position(|r| *r == row) else {
            return Ok(());
        };
        let Some((tb, tv)) = self.value_span(ctx, self.base, value) else {
            return Ok(());
        };
        let width = state.bar_width;
        let start = self.bar_start(ctx, slot, rows.len(), column, width);
        let bar = oriented_bar(ctx.orientation, start, width, tb, tv);
        self.fill_bar(state, ctx, bar, ctx.entity_kind(row, column), (row, column));

        let middle = start + width / 2.0;
        update_crosshair(state, ctx, column, value, middle);
        let anchor = ctx.point(middle, tv);
        let positive = value >= self.base;
        draw_item_label(state, ctx, &self.generators, &self.styles, row, column, anchor, positive);
        Ok(())
    }

    fn find_range_bounds(&self, dataset: &CategoryDatasetKind) -> Option<Range> {
        let range = find_category_range_bounds(dataset, false);
        if self.include_base_in_range && range.is_some() {
            Range::expand_to_include(range, self.base)
        } else {
            range
        }
    }

    fn legend_item(
        &self,
        dataset: &CategoryDatasetKind,
        dataset_index: usize,
        row: usize,
        ctx: &StyleContext,
    ) -> Option<LegendItem> {
        self.bar_legend_item(dataset, dataset_index, row, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::CategoryLabelGenerator;
    use crate::renderer::category::draw_dataset;
    use crate::renderer::category::test_support::*;
    use crate::supplier::DrawingSupplier;
    use chartwell_common::layout::PlotOrientation;
    use chartwell_scenegraph::marks::mark::SceneMark;
    use float_cmp::assert_approx_eq;

    fn render(
        renderer: &BarRenderer,
        data: &CategoryDatasetKind,
        orientation: PlotOrientation,
    ) -> RendererState {
        let (domain, range) = axes();
        let supplier = DrawingSupplier::default();
        let (de, re) = edges(orientation);
        let ctx = CategoryItemContext::new(
            area(),
            orientation,
            (&domain, de),
            (&range, re),
            data,
            StyleContext::new(&supplier),
        )
        .unwrap();
        let mut state = RendererState::new(true, None);
        draw_dataset(renderer, &mut state, &ctx).unwrap();
        state
    }

    fn bar_bounds(state: RendererState) -> Vec<[f32; 4]> {
        let marks = state.marks.into_marks();
        let SceneMark::Rect(rects) = &marks[0] else {
            panic!("expected bars");
        };
        let n = rects.len as usize;
        (0..n)
            .map(|i| {
                [
                    rects.x.as_vec(n)[i],
                    rects.y.as_vec(n)[i],
                    rects.width.as_vec(n)[i],
                    rects.height.as_vec(n)[i],
                ]
            })
            .collect()
    }

    #[test]
    fn test_series_bars_side_by_side() {
        let data = dataset(&[
            ("R1", "A", Some(5.0)),
            ("R2", "A", Some(2.0)),
            ("R1", "B", Some(1.0)),
            ("R2", "B", Some(10.0)),
        ]);
        let state = render(&BarRenderer::default(), &data, PlotOrientation::Vertical);
        assert_approx_eq!(f32, state.bar_width, 20.0, epsilon = 1e-4);
        let bars = bar_bounds(state);
        // rows are drawn first to last, column by column
        let expected = [
            [0.0, 50.0, 20.0, 50.0],
            [50.0, 90.0, 20.0, 10.0],
            [30.0, 80.0, 20.0, 20.0],
            [80.0, 0.0, 20.0, 100.0],
        ];
        for (bar, want) in bars.iter().zip(expected.iter()) {
            for k in 0..4 {
                assert_approx_eq!(f32, bar[k], want[k], epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_single_row_centred_on_category() {
        let data = dataset(&[("R", "A", Some(4.0)), ("R", "B", Some(6.0))]);
        let renderer = BarRenderer {
            max_bar_width: 0.1,
            ..Default::default()
        };
        let bars = bar_bounds(render(&renderer, &data, PlotOrientation::Horizontal));
        // horizontal bars grow right from x = 0, capped at 10 px thick
        assert_approx_eq!(f32, bars[0][0], 0.0);
        assert_approx_eq!(f32, bars[0][1], 20.0, epsilon = 1e-4);
        assert_approx_eq!(f32, bars[0][2], 40.0, epsilon = 1e-4);
        assert_approx_eq!(f32, bars[0][3], 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_bars_clip_to_axis_range() {
        let data = dataset(&[("R", "A", Some(15.0)), ("R", "B", Some(-3.0))]);
        let state = render(&BarRenderer::default(), &data, PlotOrientation::Vertical);
        let bars = bar_bounds(state);
        assert_approx_eq!(f32, bars[0][1], 0.0);
        assert_approx_eq!(f32, bars[0][3], 100.0);
        // the negative bar collapses onto the lower edge of the axis
        assert_approx_eq!(f32, bars[1][1], 100.0);
        assert_approx_eq!(f32, bars[1][3], 0.0);
    }

    #[test]
    fn test_minimum_bar_length() {
        let data = dataset(&[("R", "A", Some(0.0))]);
        let renderer = BarRenderer {
            minimum_bar_length: 3.0,
            ..Default::default()
        };
        let bars = bar_bounds(render(&renderer, &data, PlotOrientation::Vertical));
        // lengthened upward from the base
        assert_approx_eq!(f32, bars[0][1], 97.0);
        assert_approx_eq!(f32, bars[0][3], 3.0);
    }

    #[test]
    fn test_entities_and_labels() {
        let data = dataset(&[("R", "A", Some(4.0))]);
        let mut renderer = BarRenderer::default().with_generators(CategoryGenerators {
            tooltip: Some(CategoryLabelGenerator::standard_tooltip()),
            item_label: Some(CategoryLabelGenerator::standard_item_label()),
            ..Default::default()
        });
        renderer.styles.base.item_labels_visible = Some(true);
        let state = render(&renderer, &data, PlotOrientation::Vertical);
        let entities = state.entities.clone().unwrap();
        let entity = entities.entity_at(50.0, 80.0).unwrap();
        assert_eq!(entity.tooltip.as_deref(), Some("(R, A) = 4"));
        assert_eq!(
            entity.kind,
            EntityKind::CategoryItem {
                dataset: 0,
                row_key: "R".to_string(),
                column_key: "A".to_string()
            }
        );
        let marks = state.marks.into_marks();
        let SceneMark::Text(label) = &marks[1] else {
            panic!("expected an item label");
        };
        assert_eq!(label.text.as_vec(1), vec!["4".to_string()]);
        assert_approx_eq!(f32, label.y.as_vec(1)[0], 56.0);
    }

    #[test]
    fn test_range_includes_base() {
        let data = dataset(&[("R", "A", Some(3.0)), ("R", "B", Some(5.0))]);
        let range = BarRenderer::default().find_range_bounds(&data).unwrap();
        assert_eq!((range.lower(), range.upper()), (0.0, 5.0));
        let renderer = BarRenderer {
            include_base_in_range: false,
            ..Default::default()
        };
        let range = renderer.find_range_bounds(&data).unwrap();
        assert_eq!((range.lower(), range.upper()), (3.0, 5.0));
    }
}
