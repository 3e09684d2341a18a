use chartwell_common::layout::Bounds;
use chartwell_common::range::Range;
use chartwell_data::dataset_utils::{find_range_bounds, find_stacked_table_range_bounds};
use chartwell_data::traits::TableXYDataset;
use chartwell_data::XYDatasetKind;
use chartwell_scenegraph::marks::area::SceneAreaMark;
use serde::{Deserialize, Serialize};

use super::{add_item_entity, draw_item_label, series_legend_item, XYItemContext, XYItemRenderer};
use crate::error::ChartwellChartError;
use crate::legend::LegendItem;
use crate::renderer::styles::{SeriesStyles, StyleContext};
use crate::renderer::{EntityShape, RendererState, XYGenerators};

/// Sum of the values of series `0..=series` at `item`, missing values
/// counting as zero
fn stacked_value(dataset: &dyn TableXYDataset, series: usize, item: usize) -> f64 {
    (0..=series)
        .map(|s| dataset.y(s, item))
        .filter(|v| !v.is_nan())
        .sum()
}

/// Stacks the series of a table dataset on top of each other.
///
/// The area of series `s` runs forward along its stacked values and back
/// along those of series `s - 1`, or along zero for the first series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackedXYAreaRenderer {
    pub styles: SeriesStyles,
    pub generators: XYGenerators,
    pub shapes_visible: bool,
    pub shape_size: f32,
}

impl Default for StackedXYAreaRenderer {
    fn default() -> Self {
        Self {
            styles: SeriesStyles::default(),
            generators: XYGenerators::default(),
            shapes_visible: false,
            shape_size: 6.0,
        }
    }
}

impl StackedXYAreaRenderer {
    fn table<'a>(
        &self,
        dataset: &'a XYDatasetKind,
    ) -> Result<&'a dyn TableXYDataset, ChartwellChartError> {
        dataset
            .as_table()
            .ok_or(ChartwellChartError::IncompatibleDataset {
                renderer: "stacked_area",
                dataset: dataset.type_name(),
            })
    }

    fn draw_series_area(
        &self,
        state: &mut RendererState,
        ctx: &XYItemContext,
        table: &dyn TableXYDataset,
        series: usize,
    ) {
        let count = table.item_count(series);
        let mut upper = Vec::with_capacity(count);
        let mut lower = Vec::with_capacity(count);
        for item in 0..count {
            let tx = ctx.trans_x(table.x(series, item));
            let top = stacked_value(table, series, item);
            let bottom = match series.checked_sub(1) {
                Some(previous) => stacked_value(table, previous, item),
                None => 0.0,
            };
            upper.push(ctx.point(tx, ctx.trans_y(top)));
            lower.push(ctx.point(tx, ctx.trans_y(bottom)));
        }
        let defined: Vec<bool> = upper
            .iter()
            .zip(lower.iter())
            .map(|(u, l)| u.iter().chain(l.iter()).all(|v| v.is_finite()))
            .collect();
        state.marks.mark(SceneAreaMark {
            name: format!("xy_{}_series_{series}_area", ctx.dataset_index),
            len: count as u32,
            x: upper.iter().map(|p| p[0]).collect::<Vec<_>>().into(),
            y: upper.iter().map(|p| p[1]).collect::<Vec<_>>().into(),
            x2: lower.iter().map(|p| p[0]).collect::<Vec<_>>().into(),
            y2: lower.iter().map(|p| p[1]).collect::<Vec<_>>().into(),
            defined: defined.into(),
            fill: self.styles.paint(series, &ctx.styles),
            ..Default::default()
        });
    }
}

impl XYItemRenderer for StackedXYAreaRenderer {
    fn styles(&self) -> &SeriesStyles {
        &self.styles
    }

    fn initialise(
        &self,
        _state: &mut RendererState,
        ctx: &XYItemContext,
    ) -> Result<(), ChartwellChartError> {
        self.table(ctx.dataset).map(|_| ())
    }

    fn draw_item(
        &self,
        state: &mut RendererState,
        ctx: &XYItemContext,
        series: usize,
        item: usize,
        _pass: usize,
    ) -> Result<(), ChartwellChartError> {
        let table = self.table(ctx.dataset)?;
        if item == 0 {
            self.draw_series_area(state, ctx, table, series);
        }
        if table.y(series, item).is_nan() {
            return Ok(());
        }
        let x = table.x(series, item);
        let y = stacked_value(table, series, item);
        let (tx, ty) = (ctx.trans_x(x), ctx.trans_y(y));
        if !(tx.is_finite() && ty.is_finite()) {
            return Ok(());
        }
        let point = ctx.point(tx, ty);
        let half = self.shape_size / 2.0;
        if self.shapes_visible {
            state.marks.symbol(
                &format!("xy_{}_shapes", ctx.dataset_index),
                self.styles.shape(series, &ctx.styles),
                point,
                self.shape_size,
                self.styles.paint(series, &ctx.styles),
                None,
            );
        }
        let hit = Bounds::new(point[0] - half, point[1] - half, half * 2.0, half * 2.0);
        add_item_entity(state, ctx, &self.generators, EntityShape::Rect(hit), series, item);
        state
            .crosshair
            .update_crosshair_point(x, y, ctx.dataset_index, tx, ty, ctx.orientation);
        draw_item_label(state, ctx, &self.generators, &self.styles, series, item, point);
        Ok(())
    }

    fn find_range_bounds(&self, dataset: &XYDatasetKind) -> Option<Range> {
        match dataset.as_table() {
            Some(table) => find_stacked_table_range_bounds(table, 0.0),
            None => find_range_bounds(dataset, false),
        }
    }

    fn legend_item(
        &self,
        dataset: &XYDatasetKind,
        dataset_index: usize,
        series: usize,
        ctx: &StyleContext,
    ) -> Option<LegendItem> {
        series_legend_item(&self.styles, dataset, dataset_index, series, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::xy::test_support::*;
    use crate::renderer::xy::{draw_dataset, SeriesRenderingOrder};
    use crate::supplier::DrawingSupplier;
    use chartwell_common::layout::{PlotOrientation, RectangleEdge};
    use chartwell_data::table::DefaultTableXYDataset;
    use chartwell_scenegraph::marks::mark::SceneMark;

    fn table() -> XYDatasetKind {
        let mut table = DefaultTableXYDataset::new();
        table.add_empty_series("A").unwrap();
        table.add_empty_series("B").unwrap();
        table.add(0, 1.0, Some(2.0)).unwrap();
        table.add(0, 3.0, Some(1.0)).unwrap();
        table.add(1, 1.0, Some(3.0)).unwrap();
        table.add(1, 3.0, Some(4.0)).unwrap();
        table.into()
    }

    #[test]
    fn test_second_series_sits_on_first() {
        let (domain, range) = axes();
        let data = table();
        let supplier = DrawingSupplier::default();
        let ctx = XYItemContext::new(
            area(),
            PlotOrientation::Vertical,
            (&domain, RectangleEdge::Bottom),
            (&range, RectangleEdge::Left),
            &data,
            StyleContext::new(&supplier),
        )
        .unwrap();
        let mut state = RendererState::new(false, None);
        draw_dataset(
            &StackedXYAreaRenderer::default(),
            &mut state,
            &ctx,
            SeriesRenderingOrder::Forward,
        )
        .unwrap();
        let marks = state.marks.into_marks();
        let SceneMark::Area(second) = &marks[1] else {
            panic!("expected an area per series");
        };
        // upper run at 2+3 and 1+4, lower run back along series A
        assert_eq!(
            second.polygons([0.0, 0.0]),
            vec![vec![[10.0, 50.0], [30.0, 50.0], [30.0, 90.0], [10.0, 80.0]]]
        );
    }

    #[test]
    fn test_range_bounds_are_stacked() {
        let bounds = StackedXYAreaRenderer::default()
            .find_range_bounds(&table())
            .unwrap();
        assert_eq!((bounds.lower(), bounds.upper()), (0.0, 5.0));
    }

    #[test]
    fn test_rejects_non_table_data() {
        let (domain, range) = axes();
        let data = dataset(vec![series("S", &[(1.0, Some(1.0))])]);
        let supplier = DrawingSupplier::default();
        let ctx = XYItemContext::new(
            area(),
            PlotOrientation::Vertical,
            (&domain, RectangleEdge::Bottom),
            (&range, RectangleEdge::Left),
            &data,
            StyleContext::new(&supplier),
        )
        .unwrap();
        let mut state = RendererState::new(false, None);
        let result = draw_dataset(
            &StackedXYAreaRenderer::default(),
            &mut state,
            &ctx,
            SeriesRenderingOrder::Forward,
        );
        assert!(matches!(
            result,
            Err(ChartwellChartError::IncompatibleDataset {
                dataset: "series",
                ..
            })
        ));
    }
}
