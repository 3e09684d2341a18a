use chartwell_common::layout::PlotOrientation;
use chartwell_common::range::Range;
use chartwell_common::shapes::ellipse_path;
use chartwell_common::types::SymbolShape;
use chartwell_data::dataset_utils::{find_domain_bounds, find_range_bounds};
use chartwell_data::traits::XYZDataset;
use chartwell_data::XYDatasetKind;
use serde::{Deserialize, Serialize};

use super::{
    add_item_entity, draw_item_label, series_legend_item, update_crosshair, XYItemContext,
    XYItemRenderer,
};
use crate::error::ChartwellChartError;
use crate::legend::LegendItem;
use crate::renderer::styles::{SeriesStyles, StyleContext};
use crate::renderer::{EntityShape, RendererState, XYGenerators};

/// Axes the bubble diameter `z` is measured against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BubbleScale {
    /// Width in domain units and height in range units
    #[default]
    Both,
    /// Circles sized in domain units
    DomainAxis,
    /// Circles sized in range units
    RangeAxis,
}

/// Draws each XYZ item as an ellipse centred on (x, y) with diameter z
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XYBubbleRenderer {
    pub styles: SeriesStyles,
    pub generators: XYGenerators,
    pub scale: BubbleScale,
}

impl Default for XYBubbleRenderer {
    fn default() -> Self {
        Self {
            styles: SeriesStyles::default(),
            generators: XYGenerators::default(),
            scale: BubbleScale::Both,
        }
    }
}

impl XYBubbleRenderer {
    pub fn new(scale: BubbleScale) -> Self {
        Self {
            scale,
            ..Default::default()
        }
    }

    fn xyz<'a>(
        &self,
        dataset: &'a XYDatasetKind,
    ) -> Result<&'a dyn XYZDataset, ChartwellChartError> {
        dataset.as_xyz().ok_or(ChartwellChartError::IncompatibleDataset {
            renderer: "bubble",
            dataset: dataset.type_name(),
        })
    }

    /// Screen extent of a bubble along the domain and range axes
    fn bubble_size(&self, ctx: &XYItemContext, z: f64) -> (f32, f32) {
        let along_domain = || {
            ctx.domain_axis
                .length_to_java2d(z, &ctx.data_area, ctx.domain_edge)
        };
        let along_range = || {
            ctx.range_axis
                .length_to_java2d(z, &ctx.data_area, ctx.range_edge)
        };
        match self.scale {
            BubbleScale::Both => (along_domain(), along_range()),
            BubbleScale::DomainAxis => {
                let d = along_domain();
                (d, d)
            }
            BubbleScale::RangeAxis => {
                let r = along_range();
                (r, r)
            }
        }
    }

    /// Widens data bounds by half the largest bubble at either end
    fn bounds_with_bubbles(
        dataset: &XYDatasetKind,
        value: impl Fn(&dyn XYZDataset, usize, usize) -> f64,
    ) -> Option<Range> {
        let xyz = dataset.as_xyz()?;
        let mut range: Option<Range> = None;
        for series in 0..xyz.series_count() {
            for item in 0..xyz.item_count(series) {
                let v = value(xyz, series, item);
                let z = xyz.z(series, item);
                if v.is_nan() {
                    continue;
                }
                let half = if z.is_nan() { 0.0 } else { z.abs() / 2.0 };
                range = Range::expand_to_include(range, v - half);
                range = Range::expand_to_include(range, v + half);
            }
        }
        range
    }
}

impl XYItemRenderer for XYBubbleRenderer {
    fn styles(&self) -> &SeriesStyles {
        &self.styles
    }

    fn initialise(
        &self,
        _state: &mut RendererState,
        ctx: &XYItemContext,
    ) -> Result<(), ChartwellChartError> {
        self.xyz(ctx.dataset).map(|_| ())
    }

    fn draw_item(
        &self,
        state: &mut RendererState,
        ctx: &XYItemContext,
        series: usize,
        item: usize,
        _pass: usize,
    ) -> Result<(), ChartwellChartError> {
        let xyz = self.xyz(ctx.dataset)?;
        let z = xyz.z(series, item);
        if z.is_nan() {
            return Ok(());
        }
        let Some((x, y, point)) = ctx.item_point(series, item) else {
            return Ok(());
        };
        let (along_domain, along_range) = self.bubble_size(ctx, z);
        let (width, height) = match ctx.orientation {
            PlotOrientation::Vertical => (along_domain, along_range),
            PlotOrientation::Horizontal => (along_range, along_domain),
        };
        let ellipse = ellipse_path(point[0], point[1], width, height);
        let outline = (
            self.styles.outline_paint(series, &ctx.styles),
            self.styles.outline_stroke(series, &ctx.styles),
        );
        state.marks.path(
            &format!("xy_{}_bubbles", ctx.dataset_index),
            ellipse.clone(),
            self.styles.paint(series, &ctx.styles),
            Some(outline),
        );
        add_item_entity(state, ctx, &self.generators, EntityShape::Path(ellipse), series, item);
        update_crosshair(state, ctx, x, y);
        draw_item_label(state, ctx, &self.generators, &self.styles, series, item, point);
        Ok(())
    }

    fn find_domain_bounds(&self, dataset: &XYDatasetKind) -> Option<Range> {
        match self.scale {
            BubbleScale::Both | BubbleScale::DomainAxis => {
                Self::bounds_with_bubbles(dataset, |d, s, i| d.x(s, i))
                    .or_else(|| find_domain_bounds(dataset, false))
            }
            BubbleScale::RangeAxis => find_domain_bounds(dataset, false),
        }
    }

    fn find_range_bounds(&self, dataset: &XYDatasetKind) -> Option<Range> {
        match self.scale {
            BubbleScale::Both | BubbleScale::RangeAxis => {
                Self::bounds_with_bubbles(dataset, |d, s, i| d.y(s, i))
                    .or_else(|| find_range_bounds(dataset, false))
            }
            BubbleScale::DomainAxis => find_range_bounds(dataset, false),
        }
    }

    fn legend_item(
        &self,
        dataset: &XYDatasetKind,
        dataset_index: usize,
        series: usize,
        ctx: &StyleContext,
    ) -> Option<LegendItem> {
        Some(
            series_legend_item(&self.styles, dataset, dataset_index, series, ctx)?
                .with_shape(Some(SymbolShape::Circle), true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::xy::test_support::*;
    use crate::renderer::xy::{draw_dataset, SeriesRenderingOrder};
    use crate::supplier::DrawingSupplier;
    use crate::axis::ValueAxis;
    use chartwell_common::layout::RectangleEdge;
    use chartwell_data::xyz::DefaultXYZDataset;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    fn bubbles() -> XYDatasetKind {
        let mut data = DefaultXYZDataset::new();
        data.add_series("B", vec![5.0], vec![5.0], vec![2.0]).unwrap();
        data.into()
    }

    #[rstest]
    #[case(BubbleScale::Both, 20.0, 10.0)]
    #[case(BubbleScale::DomainAxis, 20.0, 20.0)]
    #[case(BubbleScale::RangeAxis, 10.0, 10.0)]
    fn test_bubble_extent(#[case] scale: BubbleScale, #[case] width: f32, #[case] height: f32) {
        // domain spans 10 units over 100 px, range 20 units over 100 px
        let domain = ValueAxis::new(None).with_range(Range::try_new(0.0, 10.0).unwrap());
        let range = ValueAxis::new(None).with_range(Range::try_new(0.0, 20.0).unwrap());
        let data = bubbles();
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
        let renderer = XYBubbleRenderer::new(scale);
        let (w, h) = renderer.bubble_size(&ctx, 2.0);
        assert_approx_eq!(f32, w, width, epsilon = 1e-4);
        assert_approx_eq!(f32, h, height, epsilon = 1e-4);

        let mut state = RendererState::new(true, None);
        draw_dataset(&renderer, &mut state, &ctx, SeriesRenderingOrder::Forward).unwrap();
        let entities = state.entities.unwrap();
        assert!(entities.entity_at(50.0, 75.0).is_some());
    }

    #[test]
    fn test_bounds_include_bubble_radius() {
        let renderer = XYBubbleRenderer::default();
        let domain = renderer.find_domain_bounds(&bubbles()).unwrap();
        assert_eq!((domain.lower(), domain.upper()), (4.0, 6.0));
        let range = XYBubbleRenderer::new(BubbleScale::DomainAxis)
            .find_range_bounds(&bubbles())
            .unwrap();
        assert_eq!((range.lower(), range.upper()), (5.0, 5.0));
    }

    #[test]
    fn test_rejects_plain_xy_data() {
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
        assert!(draw_dataset(
            &XYBubbleRenderer::default(),
            &mut state,
            &ctx,
            SeriesRenderingOrder::Forward
        )
        .is_err());
    }
}
