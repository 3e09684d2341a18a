use chartwell_common::layout::PlotOrientation;
use chartwell_common::shapes::polygon_path;
use chartwell_common::types::ColorOrGradient;
use chartwell_data::traits::XYDataset;
use chartwell_data::XYDatasetKind;
use chartwell_scenegraph::marks::area::SceneAreaMark;
use serde::{Deserialize, Serialize};

use super::{
    add_item_entity, draw_item_label, series_legend_item, update_crosshair, XYItemContext,
    XYItemRenderer,
};
use crate::error::ChartwellChartError;
use crate::legend::LegendItem;
use crate::renderer::styles::{SeriesStyles, StyleContext};
use crate::renderer::{EntityShape, RendererState, XYGenerators};

/// Screen coordinate of the zero baseline along the range axis, or the
/// lower end of the axis when zero cannot be shown (log axes)
pub(crate) fn baseline(ctx: &XYItemContext) -> f32 {
    let zero = ctx.trans_y(0.0);
    if zero.is_finite() {
        zero
    } else {
        ctx.trans_y(ctx.range_axis.range.lower())
    }
}

/// Fills the region between each series and the zero baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XYAreaRenderer {
    pub styles: SeriesStyles,
    pub generators: XYGenerators,
    /// Stroke the area boundary in the series outline paint
    pub outline: bool,
    pub shapes_visible: bool,
    pub shape_size: f32,
}

impl Default for XYAreaRenderer {
    fn default() -> Self {
        Self {
            styles: SeriesStyles::default(),
            generators: XYGenerators::default(),
            outline: false,
            shapes_visible: false,
            shape_size: 6.0,
        }
    }
}

impl XYAreaRenderer {
    fn draw_series_area(&self, state: &mut RendererState, ctx: &XYItemContext, series: usize) {
        let base = baseline(ctx);
        let count = ctx.dataset.item_count(series);
        let (mut x, mut y, mut x2, mut y2, mut defined) = (
            Vec::with_capacity(count),
            Vec::with_capacity(count),
            Vec::with_capacity(count),
            Vec::with_capacity(count),
            Vec::with_capacity(count),
        );
        for item in 0..count {
            let tx = ctx.trans_x(ctx.dataset.x(series, item));
            let upper = ctx.item_point(series, item);
            let lower = ctx.point(tx, base);
            let [ux, uy] = upper.map(|(_, _, p)| p).unwrap_or(lower);
            x.push(ux);
            y.push(uy);
            x2.push(lower[0]);
            y2.push(lower[1]);
            defined.push(upper.is_some());
        }

        let stroke = if self.outline {
            self.styles.outline_paint(series, &ctx.styles)
        } else {
            ColorOrGradient::transparent()
        };
        state.marks.mark(SceneAreaMark {
            name: format!("xy_{}_series_{series}_area", ctx.dataset_index),
            len: count as u32,
            x: x.into(),
            y: y.into(),
            x2: x2.into(),
            y2: y2.into(),
            defined: defined.into(),
            fill: self.styles.paint(series, &ctx.styles),
            stroke,
            stroke_style: self.styles.outline_stroke(series, &ctx.styles),
            ..Default::default()
        });
    }

    /// Hit area of an item: the slice of area between the midpoints to its
    /// neighbours
    fn item_hotspot(
        &self,
        ctx: &XYItemContext,
        series: usize,
        item: usize,
    ) -> Option<Vec<[f32; 2]>> {
        let (_, _, point) = ctx.item_point(series, item)?;
        let neighbour = |i: Option<usize>| {
            i.and_then(|i| ctx.item_point(series, i))
                .map(|(_, _, p)| [(p[0] + point[0]) / 2.0, (p[1] + point[1]) / 2.0])
                .unwrap_or(point)
        };
        let count = ctx.dataset.item_count(series);
        let prev = neighbour(item.checked_sub(1));
        let next = neighbour((item + 1 < count).then_some(item + 1));

        let base = baseline(ctx);
        let on_base = |p: [f32; 2]| match ctx.orientation {
            PlotOrientation::Vertical => [p[0], base],
            PlotOrientation::Horizontal => [base, p[1]],
        };
        Some(vec![on_base(prev), prev, point, next, on_base(next)])
    }
}

impl XYItemRenderer for XYAreaRenderer {
    fn styles(&self) -> &SeriesStyles {
        &self.styles
    }

    fn draw_item(
        &self,
        state: &mut RendererState,
        ctx: &XYItemContext,
        series: usize,
        item: usize,
        _pass: usize,
    ) -> Result<(), ChartwellChartError> {
        if item == 0 {
            self.draw_series_area(state, ctx, series);
        }
        let Some((x, y, point)) = ctx.item_point(series, item) else {
            return Ok(());
        };
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
        if let Some(hotspot) = self.item_hotspot(ctx, series, item) {
            let shape = EntityShape::Path(polygon_path(&hotspot, true));
            add_item_entity(state, ctx, &self.generators, shape, series, item);
        }
        update_crosshair(state, ctx, x, y);
        draw_item_label(state, ctx, &self.generators, &self.styles, series, item, point);
        Ok(())
    }

    fn legend_item(
        &self,
        dataset: &XYDatasetKind,
        dataset_index: usize,
        series: usize,
        ctx: &StyleContext,
    ) -> Option<LegendItem> {
        let outline = self.outline.then(|| {
            (
                self.styles.outline_paint(series, ctx),
                self.styles.outline_stroke(series, ctx).width,
            )
        });
        Some(
            series_legend_item(&self.styles, dataset, dataset_index, series, ctx)?
                .with_outline(outline),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::xy::test_support::*;
    use crate::renderer::xy::{draw_dataset, SeriesRenderingOrder};
    use crate::supplier::DrawingSupplier;
    use chartwell_common::layout::RectangleEdge;
    use chartwell_scenegraph::marks::mark::SceneMark;

    #[test]
    fn test_area_closes_on_zero_baseline() {
        let (domain, range) = axes();
        let data = dataset(vec![series("S1", &[(1.0, Some(4.0)), (3.0, Some(6.0))])]);
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
        let mut state = RendererState::new(true, None);
        draw_dataset(&XYAreaRenderer::default(), &mut state, &ctx, SeriesRenderingOrder::Forward)
            .unwrap();

        // hotspot of the first item runs from the item to the midpoint with the next
        let entities = state.entities.clone().unwrap();
        assert!(entities.entity_at(15.0, 90.0).is_some());
        assert!(entities.entity_at(5.0, 90.0).is_none());

        let marks = state.marks.into_marks();
        let SceneMark::Area(area_mark) = &marks[0] else {
            panic!("expected an area mark");
        };
        let polygons = area_mark.polygons([0.0, 0.0]);
        assert_eq!(
            polygons,
            vec![vec![[10.0, 60.0], [30.0, 40.0], [30.0, 100.0], [10.0, 100.0]]]
        );
    }
}
