use chartwell_common::range::Range;
use chartwell_data::dataset_utils::find_stacked_range_bounds;
use chartwell_data::traits::CategoryDataset;
use chartwell_data::CategoryDatasetKind;
use serde::{Deserialize, Serialize};

use super::{draw_item_label, update_crosshair, BarRenderer, CategoryItemContext, CategoryItemRenderer};
use crate::error::ChartwellChartError;
use crate::legend::LegendItem;
use crate::renderer::styles::{SeriesStyles, StyleContext};
use crate::renderer::{oriented_bar, RendererState};

/// Stacks the values of each category into one bar.
///
/// Positive values stack upward from the base and negative values downward,
/// so a row sits on the total of the earlier visible rows with the same sign.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StackedBarRenderer {
    pub bar: BarRenderer,
    /// Show each value as a fraction of its column total
    pub render_as_percentages: bool,
}

impl StackedBarRenderer {
    pub fn new(render_as_percentages: bool) -> Self {
        Self {
            render_as_percentages,
            ..Default::default()
        }
    }

    fn column_total(dataset: &dyn CategoryDataset, column: usize) -> f64 {
        (0..dataset.row_count())
            .filter_map(|r| dataset.value(r, column))
            .sum()
    }

    /// Base the value of `row` stacks on
    fn stack_base(&self, ctx: &CategoryItemContext, row: usize, column: usize, value: f64) -> f64 {
        let total = Self::column_total(ctx.dataset, column);
        let mut base = self.bar.base;
        for r in 0..row {
            if !self.bar.styles.is_visible(r) {
                continue;
            }
            let Some(mut v) = ctx.dataset.value(r, column) else {
                continue;
            };
            if self.render_as_percentages {
                v /= total;
            }
            if (value > 0.0 && v > 0.0) || (value < 0.0 && v < 0.0) {
                base += v;
            }
        }
        base
    }
}

impl CategoryItemRenderer for StackedBarRenderer {
    fn styles(&self) -> &SeriesStyles {
        &self.bar.styles
    }

    fn initialise(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
    ) -> Result<(), ChartwellChartError> {
        // one bar per category, whatever the number of rows
        state.bar_width = self.bar.bar_width(ctx, 1, ctx.dataset.column_count());
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
        let Some(mut value) = ctx.dataset.value(row, column) else {
            return Ok(());
        };
        if self.render_as_percentages {
            value /= Self::column_total(ctx.dataset, column);
        }
        if !value.is_finite() {
            return Ok(());
        }
        let base = self.stack_base(ctx, row, column, value);
        let Some((tb, tv)) = self.bar.value_span(ctx, base, base + value) else {
            return Ok(());
        };
        let width = state.bar_width;
        let start = ctx.category_middle(column) - width / 2.0;
        let bar = oriented_bar(ctx.orientation, start, width, tb, tv);
        self.bar
            .fill_bar(state, ctx, bar, ctx.entity_kind(row, column), (row, column));

        let middle = start + width / 2.0;
        update_crosshair(state, ctx, column, base + value, middle);
        let anchor = ctx.point(middle, tv);
        draw_item_label(
            state,
            ctx,
            &self.bar.generators,
            &self.bar.styles,
            row,
            column,
            anchor,
            value >= 0.0,
        );
        Ok(())
    }

    fn find_range_bounds(&self, dataset: &CategoryDatasetKind) -> Option<Range> {
        if self.render_as_percentages {
            return Range::try_new(0.0, 1.0).ok();
        }
        find_stacked_range_bounds(dataset.as_category(), self.bar.base)
    }

    fn legend_item(
        &self,
        dataset: &CategoryDatasetKind,
        dataset_index: usize,
        row: usize,
        ctx: &StyleContext,
    ) -> Option<LegendItem> {
        self.bar.bar_legend_item(dataset, dataset_index, row, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::ValueAxis;
    use crate::renderer::category::draw_dataset;
    use crate::renderer::category::test_support::*;
    use crate::supplier::DrawingSupplier;
    use chartwell_common::layout::{PlotOrientation, RectangleEdge};
    use chartwell_scenegraph::marks::mark::SceneMark;
    use float_cmp::assert_approx_eq;

    fn data() -> CategoryDatasetKind {
        dataset(&[
            ("R1", "A", Some(2.0)),
            ("R1", "B", Some(-1.0)),
            ("R2", "A", Some(3.0)),
            ("R2", "B", Some(4.0)),
        ])
    }

    #[test]
    fn test_positive_and_negative_stacks() {
        let (domain, _) = axes();
        let range = ValueAxis::new(None).with_range(Range::try_new(-10.0, 10.0).unwrap());
        let data = data();
        let supplier = DrawingSupplier::default();
        let ctx = CategoryItemContext::new(
            area(),
            PlotOrientation::Vertical,
            (&domain, RectangleEdge::Bottom),
            (&range, RectangleEdge::Left),
            &data,
            StyleContext::new(&supplier),
        )
        .unwrap();
        let mut state = RendererState::new(false, None);
        draw_dataset(&StackedBarRenderer::default(), &mut state, &ctx).unwrap();
        let marks = state.marks.into_marks();
        let SceneMark::Rect(rects) = &marks[0] else {
            panic!("expected bars");
        };
        assert_eq!(rects.len, 4);
        let y = rects.y.as_vec(4);
        let height = rects.height.as_vec(4);
        let expected = [(40.0, 10.0), (50.0, 5.0), (25.0, 15.0), (30.0, 20.0)];
        for (i, (ey, eh)) in expected.iter().enumerate() {
            assert_approx_eq!(f32, y[i], *ey, epsilon = 1e-4);
            assert_approx_eq!(f32, height[i], *eh, epsilon = 1e-4);
        }
        assert_approx_eq!(f32, rects.width.as_vec(4)[0], 50.0);
    }

    #[test]
    fn test_stacked_range_bounds() {
        let range = StackedBarRenderer::default().find_range_bounds(&data()).unwrap();
        assert_eq!((range.lower(), range.upper()), (-1.0, 5.0));
        let range = StackedBarRenderer::new(true)
            .find_range_bounds(&data())
            .unwrap();
        assert_eq!((range.lower(), range.upper()), (0.0, 1.0));
    }

    #[test]
    fn test_hidden_rows_do_not_lift_later_rows() {
        let (domain, range) = axes();
        let data = data();
        let supplier = DrawingSupplier::default();
        let ctx = CategoryItemContext::new(
            area(),
            PlotOrientation::Vertical,
            (&domain, RectangleEdge::Bottom),
            (&range, RectangleEdge::Left),
            &data,
            StyleContext::new(&supplier),
        )
        .unwrap();
        let mut renderer = StackedBarRenderer::default();
        renderer.bar.styles.set_series_visible(0, false);
        let mut state = RendererState::new(false, None);
        draw_dataset(&renderer, &mut state, &ctx).unwrap();
        let marks = state.marks.into_marks();
        let SceneMark::Rect(rects) = &marks[0] else {
            panic!("expected bars");
        };
        // R2 in column A starts from zero
        assert_approx_eq!(f32, rects.y.as_vec(2)[0], 70.0);
        assert_approx_eq!(f32, rects.height.as_vec(2)[0], 30.0);
    }
}
