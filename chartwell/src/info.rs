use chartwell_common::layout::Bounds;

use crate::entity::EntityCollection;
use crate::plot::crosshair::CrosshairState;

/// Areas of the plot computed while drawing
#[derive(Debug, Clone, Default)]
pub struct PlotRenderingInfo {
    pub plot_area: Bounds,
    pub data_area: Bounds,
    /// Crosshair resolved against the anchor, for XY and category plots
    pub crosshair: Option<CrosshairState>,
}

/// Everything recorded about one render of a chart
#[derive(Debug, Clone, Default)]
pub struct ChartRenderingInfo {
    pub chart_area: Bounds,
    pub plot_info: PlotRenderingInfo,
    pub entities: EntityCollection,
}

impl ChartRenderingInfo {
    pub fn new(chart_area: Bounds) -> Self {
        Self {
            chart_area,
            ..Default::default()
        }
    }
}
