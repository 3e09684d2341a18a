use chartwell_common::range::Range;
use chartwell_common::types::{ColorOrGradient, StrokeStyle};
use chartwell_data::dataset_utils::find_category_range_bounds;
use chartwell_data::traits::StatisticalCategoryDataset;
use chartwell_data::CategoryDatasetKind;
use serde::{Deserialize, Serialize};

use super::{draw_item_label, update_crosshair, BarRenderer, CategoryItemContext, CategoryItemRenderer};
use crate::error::ChartwellChartError;
use crate::legend::LegendItem;
use crate::renderer::styles::{SeriesStyles, StyleContext};
use crate::renderer::{oriented_bar, RendererState};

/// Bars to the mean of each cell with an indicator spanning one standard
/// deviation either side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticalBarRenderer {
    pub bar: BarRenderer,
    /// Defaults to the series outline paint
    pub error_indicator_paint: Option<ColorOrGradient>,
    pub error_indicator_stroke: StrokeStyle,
}

impl Default for StatisticalBarRenderer {
    fn default() -> Self {
        Self {
            bar: BarRenderer::default(),
            error_indicator_paint: None,
            error_indicator_stroke: StrokeStyle::new(0.5),
        }
    }
}

impl StatisticalBarRenderer {
    fn statistical<'a>(
        &self,
        dataset: &'a CategoryDatasetKind,
    ) -> Result<&'a dyn StatisticalCategoryDataset, ChartwellChartError> {
        dataset
            .as_statistical()
            .ok_or(ChartwellChartError::IncompatibleDataset {
                renderer: "statistical_bar",
                dataset: dataset.type_name(),
            })
    }

    /// Vertical line through the bar middle with caps across the middle half
    /// of the bar
    #[allow(clippy::too_many_arguments)]
    fn draw_error_indicator(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
        row: usize,
        start: f32,
        width: f32,
        mean: f64,
        std_dev: f64,
    ) {
        let axis = ctx.range_axis.range;
        let high = ctx.trans_value(axis.constrain(mean + std_dev));
        let low = ctx.trans_value(axis.constrain(mean - std_dev));
        if !(high.is_finite() && low.is_finite()) {
            return;
        }
        let paint = self
            .error_indicator_paint
            .clone()
            .unwrap_or_else(|| self.bar.styles.outline_paint(row, &ctx.styles));
        let name = format!("cat_{}_error_indicators", ctx.dataset_index);
        let middle = start + width / 2.0;
        let (cap_start, cap_end) = (start + width * 0.25, start + width * 0.75);
        let stroke = &self.error_indicator_stroke;
        state
            .marks
            .rule(&name, ctx.point(middle, low), ctx.point(middle, high), paint.clone(), stroke);
        for v in [high, low] {
            state
                .marks
                .rule(&name, ctx.point(cap_start, v), ctx.point(cap_end, v), paint.clone(), stroke);
        }
    }
}

impl CategoryItemRenderer for StatisticalBarRenderer {
    fn styles(&self) -> &SeriesStyles {
        &self.bar.styles
    }

    fn initialise(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
    ) -> Result<(), ChartwellChartError> {
        self.statistical(ctx.dataset)?;
        self.bar.initialise(state, ctx)
    }

    fn draw_item(
        &self,
        state: &mut RendererState,
        ctx: &CategoryItemContext,
        row: usize,
        column: usize,
        _pass: usize,
    ) -> Result<(), ChartwellChartError> {
        let data = self.statistical(ctx.dataset)?;
        let Some(mean) = data.mean_value(row, column) else {
            return Ok(());
        };
        let rows = ctx.visible_rows(&self.bar.styles);
        let Some(slot) = rows.iter().position(|r| *r == row) else {
            return Ok(());
        };
        let Some((tb, tv)) = self.bar.value_span(ctx, self.bar.base, mean) else {
            return Ok(());
        };
        let width = state.bar_width;
        let start = self.bar.bar_start(ctx, slot, rows.len(), column, width);
        let bar = oriented_bar(ctx.orientation, start, width, tb, tv);
        self.bar
            .fill_bar(state, ctx, bar, ctx.entity_kind(row, column), (row, column));

        if let Some(std_dev) = data.std_dev_value(row, column) {
            self.draw_error_indicator(state, ctx, row, start, width, mean, std_dev);
        }
        let middle = start + width / 2.0;
        update_crosshair(state, ctx, column, mean, middle);
        draw_item_label(
            state,
            ctx,
            &self.bar.generators,
            &self.bar.styles,
            row,
            column,
            ctx.point(middle, tv),
            mean >= self.bar.base,
        );
        Ok(())
    }

    fn find_range_bounds(&self, dataset: &CategoryDatasetKind) -> Option<Range> {
        let range = find_category_range_bounds(dataset, true);
        if self.bar.include_base_in_range && range.is_some() {
            Range::expand_to_include(range, self.bar.base)
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
        self.bar.bar_legend_item(dataset, dataset_index, row, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::category::draw_dataset;
    use crate::renderer::category::test_support::*;
    use crate::supplier::DrawingSupplier;
    use chartwell_common::layout::{PlotOrientation, RectangleEdge};
    use chartwell_data::statistical::DefaultStatisticalCategoryDataset;
    use chartwell_scenegraph::marks::mark::SceneMark;
    use float_cmp::assert_approx_eq;

    fn data() -> CategoryDatasetKind {
        let mut data = DefaultStatisticalCategoryDataset::new();
        data.add(Some(5.0), Some(2.0), "R", "A");
        data.into()
    }

    #[test]
    fn test_bar_with_error_indicator() {
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
        let mut state = RendererState::new(false, None);
        draw_dataset(&StatisticalBarRenderer::default(), &mut state, &ctx).unwrap();
        let marks = state.marks.into_marks();
        let SceneMark::Rect(bars) = &marks[0] else {
            panic!("expected the bar first");
        };
        assert_approx_eq!(f32, bars.y.as_vec(1)[0], 50.0);
        let SceneMark::Rule(rules) = &marks[1] else {
            panic!("expected the error indicator");
        };
        assert_eq!(rules.len, 3);
        let (y0, y1) = (rules.y0.as_vec(3), rules.y1.as_vec(3));
        assert_approx_eq!(f32, y0[0], 70.0);
        assert_approx_eq!(f32, y1[0], 30.0);
        // caps span the middle half of the 100 px bar
        assert_approx_eq!(f32, rules.x0.as_vec(3)[1], 25.0);
        assert_approx_eq!(f32, rules.x1.as_vec(3)[1], 75.0);
    }

    #[test]
    fn test_range_includes_deviation() {
        let range = StatisticalBarRenderer::default()
            .find_range_bounds(&data())
            .unwrap();
        assert_eq!((range.lower(), range.upper()), (0.0, 7.0));
    }

    #[test]
    fn test_rejects_plain_category_data() {
        let (domain, range) = axes();
        let data = dataset(&[("R", "A", Some(1.0))]);
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
        assert!(matches!(
            draw_dataset(&StatisticalBarRenderer::default(), &mut state, &ctx),
            Err(ChartwellChartError::IncompatibleDataset {
                renderer: "statistical_bar",
                ..
            })
        ));
    }
}
