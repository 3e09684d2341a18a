use chartwell_common::range::Range;
use chartwell_common::types::{ColorOrGradient, StrokeStyle};
use chartwell_data::dataset_utils::{find_domain_bounds, find_range_bounds};
use chartwell_data::traits::IntervalXYDataset;
use chartwell_data::XYDatasetKind;
use serde::{Deserialize, Serialize};

use super::{XYItemContext, XYItemRenderer, XYLineAndShapeRenderer};
use crate::error::ChartwellChartError;
use crate::legend::LegendItem;
use crate::renderer::styles::{SeriesStyles, StyleContext};
use crate::renderer::RendererState;

/// Line and shape rendering with error bars from interval data.
///
/// Error bars span the start and end x and y values of each item and end in
/// caps `cap_length` pixels wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XYErrorRenderer {
    pub inner: XYLineAndShapeRenderer,
    pub draw_x_error: bool,
    pub draw_y_error: bool,
    pub cap_length: f32,
    /// Defaults to the series paint
    pub error_paint: Option<ColorOrGradient>,
    /// Defaults to the series stroke
    pub error_stroke: Option<StrokeStyle>,
}

impl Default for XYErrorRenderer {
    fn default() -> Self {
        Self {
            inner: XYLineAndShapeRenderer::new(false, true),
            draw_x_error: true,
            draw_y_error: true,
            cap_length: 4.0,
            error_paint: None,
            error_stroke: None,
        }
    }
}

impl XYErrorRenderer {
    fn interval<'a>(
        &self,
        dataset: &'a XYDatasetKind,
    ) -> Result<&'a dyn IntervalXYDataset, ChartwellChartError> {
        dataset
            .as_interval()
            .ok_or(ChartwellChartError::IncompatibleDataset {
                renderer: "error",
                dataset: dataset.type_name(),
            })
    }

    fn draw_error_bars(
        &self,
        state: &mut RendererState,
        ctx: &XYItemContext,
        data: &dyn IntervalXYDataset,
        series: usize,
        item: usize,
    ) {
        let paint = self
            .error_paint
            .clone()
            .unwrap_or_else(|| self.inner.styles.paint(series, &ctx.styles));
        let stroke = self
            .error_stroke
            .clone()
            .unwrap_or_else(|| self.inner.styles.stroke(series, &ctx.styles));
        let name = format!("xy_{}_error_bars", ctx.dataset_index);
        let half_cap = self.cap_length / 2.0;
        let mut bar = |from: [f32; 2], to: [f32; 2]| {
            if from.iter().chain(to.iter()).all(|v| v.is_finite()) {
                state.marks.rule(&name, from, to, paint.clone(), &stroke);
            }
        };

        if self.draw_x_error {
            let (x0, x1) = (data.start_x(series, item), data.end_x(series, item));
            let y = data.y(series, item);
            if !(x0.is_nan() || x1.is_nan() || y.is_nan()) {
                let (tx0, tx1, ty) = (ctx.trans_x(x0), ctx.trans_x(x1), ctx.trans_y(y));
                bar(ctx.point(tx0, ty), ctx.point(tx1, ty));
                for tx in [tx0, tx1] {
                    bar(ctx.point(tx, ty - half_cap), ctx.point(tx, ty + half_cap));
                }
            }
        }
        if self.draw_y_error {
            let (y0, y1) = (data.start_y(series, item), data.end_y(series, item));
            let x = data.x(series, item);
            if !(y0.is_nan() || y1.is_nan() || x.is_nan()) {
                let (ty0, ty1, tx) = (ctx.trans_y(y0), ctx.trans_y(y1), ctx.trans_x(x));
                bar(ctx.point(tx, ty0), ctx.point(tx, ty1));
                for ty in [ty0, ty1] {
                    bar(ctx.point(tx - half_cap, ty), ctx.point(tx + half_cap, ty));
                }
            }
        }
    }
}

impl XYItemRenderer for XYErrorRenderer {
    fn styles(&self) -> &SeriesStyles {
        &self.inner.styles
    }

    fn pass_count(&self) -> usize {
        self.inner.pass_count()
    }

    fn initialise(
        &self,
        _state: &mut RendererState,
        ctx: &XYItemContext,
    ) -> Result<(), ChartwellChartError> {
        self.interval(ctx.dataset).map(|_| ())
    }

    fn draw_item(
        &self,
        state: &mut RendererState,
        ctx: &XYItemContext,
        series: usize,
        item: usize,
        pass: usize,
    ) -> Result<(), ChartwellChartError> {
        if pass == 0 {
            let data = self.interval(ctx.dataset)?;
            self.draw_error_bars(state, ctx, data, series, item);
        }
        self.inner.draw_item(state, ctx, series, item, pass)
    }

    fn find_domain_bounds(&self, dataset: &XYDatasetKind) -> Option<Range> {
        find_domain_bounds(dataset, self.draw_x_error)
    }

    fn find_range_bounds(&self, dataset: &XYDatasetKind) -> Option<Range> {
        find_range_bounds(dataset, self.draw_y_error)
    }

    fn legend_item(
        &self,
        dataset: &XYDatasetKind,
        dataset_index: usize,
        series: usize,
        ctx: &StyleContext,
    ) -> Option<LegendItem> {
        self.inner.legend_item(dataset, dataset_index, series, ctx)
    }
}
