use std::collections::BTreeMap;

use chartwell_common::layout::{
    resolve_domain_axis_location, resolve_range_axis_location, AxisLocation, Bounds,
    PlotOrientation, RectangleEdge,
};
use chartwell_common::range::Range;
use chartwell_common::text::TextMeasurer;
use chartwell_data::traits::{SeriesDataset, XYDataset};
use chartwell_data::XYDatasetKind;
use chartwell_scenegraph::marks::group::{Clip, SceneGroup};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    along_edge, crosshair_rule, push_axis, resolve_crosshair, tick_positions, trim_edge,
    Crosshair, CrosshairState, DatasetRenderingOrder, Gridlines, PlotStyle,
};
use crate::axis::ValueAxis;
use crate::entity::{ChartEntity, EntityKind};
use crate::error::ChartwellChartError;
use crate::info::{ChartRenderingInfo, PlotRenderingInfo};
use crate::legend::LegendItem;
use crate::renderer::styles::StyleContext;
use crate::renderer::xy::{draw_dataset, SeriesRenderingOrder};
use crate::renderer::{RendererState, XYItemContext, XYRendererKind};

/// Plots one or more XY datasets against a numeric domain and range axis.
///
/// Dataset `i` is drawn by renderer `i`, or by renderer 0 when it has none
/// of its own. Both axes are shared by every dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XYPlot {
    pub datasets: Vec<XYDatasetKind>,
    #[serde(with = "crate::usize_keys")]
    pub renderers: BTreeMap<usize, XYRendererKind>,
    pub domain_axis: ValueAxis,
    pub range_axis: ValueAxis,
    pub domain_axis_location: AxisLocation,
    pub range_axis_location: AxisLocation,
    pub orientation: PlotOrientation,
    pub series_rendering_order: SeriesRenderingOrder,
    pub dataset_rendering_order: DatasetRenderingOrder,
    pub domain_gridlines: Gridlines,
    pub range_gridlines: Gridlines,
    pub domain_crosshair: Crosshair,
    pub range_crosshair: Crosshair,
    pub style: PlotStyle,
}

impl Default for XYPlot {
    fn default() -> Self {
        Self {
            datasets: Vec::new(),
            renderers: BTreeMap::from([(0, XYRendererKind::default())]),
            domain_axis: ValueAxis::new(None).with_auto_range_include_zero(false),
            range_axis: ValueAxis::new(None),
            domain_axis_location: AxisLocation::BottomOrLeft,
            range_axis_location: AxisLocation::BottomOrLeft,
            orientation: PlotOrientation::Vertical,
            series_rendering_order: SeriesRenderingOrder::default(),
            dataset_rendering_order: DatasetRenderingOrder::default(),
            domain_gridlines: Gridlines::default(),
            range_gridlines: Gridlines::default(),
            domain_crosshair: Crosshair::default(),
            range_crosshair: Crosshair::default(),
            style: PlotStyle::default(),
        }
    }
}

impl XYPlot {
    pub fn new(
        dataset: impl Into<XYDatasetKind>,
        domain_axis: ValueAxis,
        range_axis: ValueAxis,
        renderer: impl Into<XYRendererKind>,
    ) -> Self {
        Self {
            datasets: vec![dataset.into()],
            renderers: BTreeMap::from([(0, renderer.into())]),
            domain_axis,
            range_axis,
            ..Default::default()
        }
    }

    pub fn with_orientation(mut self, orientation: PlotOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Adds a dataset after the existing ones and returns its index
    pub fn add_dataset(
        &mut self,
        dataset: impl Into<XYDatasetKind>,
        renderer: Option<XYRendererKind>,
    ) -> usize {
        let index = self.datasets.len();
        self.datasets.push(dataset.into());
        if let Some(renderer) = renderer {
            self.renderers.insert(index, renderer);
        }
        index
    }

    pub fn dataset(&self, index: usize) -> Option<&XYDatasetKind> {
        self.datasets.get(index)
    }

    /// Renderer drawing dataset `index`
    pub fn renderer_for(&self, index: usize) -> Option<&XYRendererKind> {
        self.renderers.get(&index).or_else(|| self.renderers.get(&0))
    }

    /// Renderer registered at `index`, created with defaults if missing
    pub fn renderer_mut(&mut self, index: usize) -> &mut XYRendererKind {
        self.renderers.entry(index).or_default()
    }

    pub fn set_renderer(&mut self, index: usize, renderer: impl Into<XYRendererKind>) {
        self.renderers.insert(index, renderer.into());
    }

    pub fn domain_edge(&self) -> RectangleEdge {
        resolve_domain_axis_location(self.domain_axis_location, self.orientation)
    }

    pub fn range_edge(&self) -> RectangleEdge {
        resolve_range_axis_location(self.range_axis_location, self.orientation)
    }

    /// Number of series in the datasets before `index`
    fn series_offset(&self, index: usize) -> usize {
        self.datasets[..index.min(self.datasets.len())]
            .iter()
            .map(|d| d.series_count())
            .sum()
    }

    /// Union of the domain and range bounds reported by each dataset's
    /// renderer
    pub fn data_bounds(&self) -> (Option<Range>, Option<Range>) {
        let mut domain = None;
        let mut range = None;
        for (i, dataset) in self.datasets.iter().enumerate() {
            let Some(renderer) = self.renderer_for(i) else {
                continue;
            };
            let renderer = renderer.as_renderer();
            domain = Range::combine(domain, renderer.find_domain_bounds(dataset));
            range = Range::combine(range, renderer.find_range_bounds(dataset));
        }
        (domain, range)
    }

    /// Copies of the axes with auto ranges fitted to the data
    pub fn configured_axes(&self) -> (ValueAxis, ValueAxis) {
        let (domain_bounds, range_bounds) = self.data_bounds();
        let mut domain = self.domain_axis.clone();
        let mut range = self.range_axis.clone();
        domain.configure(domain_bounds);
        range.configure(range_bounds);
        (domain, range)
    }

    fn is_empty(&self) -> bool {
        self.datasets
            .iter()
            .all(|d| (0..d.series_count()).all(|s| d.item_count(s) == 0))
    }

    /// One legend item per series, datasets in index order
    pub fn legend_items(&self) -> Vec<LegendItem> {
        let supplier = &self.style.drawing_supplier;
        let mut items = Vec::new();
        for (i, dataset) in self.datasets.iter().enumerate() {
            let Some(renderer) = self.renderer_for(i) else {
                continue;
            };
            let ctx = StyleContext {
                supplier,
                series_offset: self.series_offset(i),
            };
            items.extend((0..dataset.series_count()).filter_map(|series| {
                renderer.as_renderer().legend_item(dataset, i, series, &ctx)
            }));
        }
        items
    }

    /// Draws the plot into `area`.
    ///
    /// With `info`, the plot and data areas, axis and item entities, and the
    /// crosshair resolved against `anchor` are recorded.
    pub fn draw(
        &self,
        area: &Bounds,
        anchor: Option<[f32; 2]>,
        mut info: Option<&mut ChartRenderingInfo>,
        measurer: &dyn TextMeasurer,
    ) -> Result<SceneGroup, ChartwellChartError> {
        let mut group = SceneGroup::new("xy_plot");
        if let Some(info) = info.as_deref_mut() {
            info.entities.add(ChartEntity::rect(*area, EntityKind::Plot));
            info.plot_info.plot_area = *area;
        }

        let inner = area.shrink(&self.style.insets);
        let (domain_axis, range_axis) = self.configured_axes();
        let (domain_edge, range_edge) = (self.domain_edge(), self.range_edge());
        let domain_space = domain_axis.reserve_space(&inner, domain_edge, measurer)?;
        let range_space = range_axis.reserve_space(&inner, range_edge, measurer)?;
        let data_area = trim_edge(
            &trim_edge(&inner, domain_edge, domain_space),
            range_edge,
            range_space,
        );
        if let Some(info) = info.as_deref_mut() {
            info.plot_info.data_area = data_area;
        }

        if let Some(background) = self.style.background_mark(&data_area) {
            group.push(background);
        }
        let domain_ticks = tick_positions(&domain_axis, &data_area, domain_edge)?;
        if let Some(lines) = self.domain_gridlines.marks(
            "domain_gridlines",
            &data_area,
            &domain_ticks,
            domain_edge.is_top_or_bottom(),
        )? {
            group.push(lines);
        }
        let range_ticks = tick_positions(&range_axis, &data_area, range_edge)?;
        if let Some(lines) = self.range_gridlines.marks(
            "range_gridlines",
            &data_area,
            &range_ticks,
            range_edge.is_top_or_bottom(),
        )? {
            group.push(lines);
        }

        let collect = info.is_some();
        let mut crosshair = CrosshairState::new(anchor);
        if self.is_empty() {
            debug!("xy plot has no data to draw");
            if let Some(message) = self.style.no_data_mark(&data_area) {
                group.push(message);
            }
        }
        for index in self.dataset_rendering_order.indices(self.datasets.len()) {
            let dataset = &self.datasets[index];
            let Some(renderer) = self.renderer_for(index) else {
                warn!("no renderer for xy dataset {index}");
                continue;
            };
            let styles = StyleContext {
                supplier: &self.style.drawing_supplier,
                series_offset: self.series_offset(index),
            };
            let ctx = XYItemContext::new(
                data_area,
                self.orientation,
                (&domain_axis, domain_edge),
                (&range_axis, range_edge),
                dataset,
                styles,
            )?
            .with_dataset_index(index);
            let mut state = RendererState::new(collect, anchor);
            draw_dataset(
                renderer.as_renderer(),
                &mut state,
                &ctx,
                self.series_rendering_order,
            )?;
            let (marks, entities, state_crosshair) = state.into_marks();

            let mut dataset_group = SceneGroup::new(&format!("dataset_{index}"))
                .with_clip(Clip::from_bounds(&data_area));
            dataset_group.extend(marks);
            group.push(dataset_group);
            if let (Some(info), Some(entities)) = (info.as_deref_mut(), entities) {
                info.entities.append(entities);
            }
            if state_crosshair.distance < crosshair.distance {
                crosshair = state_crosshair;
            }
        }

        if let Some(outline) = self.style.outline_mark(&data_area) {
            group.push(outline);
        }
        push_axis(
            &mut group,
            domain_axis.draw(&data_area, domain_edge, measurer)?,
            info.as_deref_mut(),
        );
        push_axis(
            &mut group,
            range_axis.draw(&data_area, range_edge, measurer)?,
            info.as_deref_mut(),
        );

        let (x, y) = self.resolve_crosshairs(
            &crosshair,
            &data_area,
            (&domain_axis, domain_edge),
            (&range_axis, range_edge),
        );
        if self.domain_crosshair.visible {
            let coordinate = domain_axis.value_to_java2d(x, &data_area, domain_edge);
            if let Some(rule) = crosshair_rule(
                "domain_crosshair",
                &self.domain_crosshair,
                coordinate,
                &data_area,
                domain_edge,
            ) {
                group.push(rule);
            }
        }
        if self.range_crosshair.visible {
            let coordinate = range_axis.value_to_java2d(y, &data_area, range_edge);
            if let Some(rule) = crosshair_rule(
                "range_crosshair",
                &self.range_crosshair,
                coordinate,
                &data_area,
                range_edge,
            ) {
                group.push(rule);
            }
        }
        if let Some(info) = info {
            crosshair.crosshair_x = x;
            crosshair.crosshair_y = y;
            info.plot_info.crosshair = Some(crosshair);
        }
        Ok(group)
    }

    fn resolve_crosshairs(
        &self,
        state: &CrosshairState,
        data_area: &Bounds,
        (domain_axis, domain_edge): (&ValueAxis, RectangleEdge),
        (range_axis, range_edge): (&ValueAxis, RectangleEdge),
    ) -> (f64, f64) {
        let anchor = state.anchor.filter(|[x, y]| data_area.contains(*x, *y));
        let anchor_x = anchor.map(|a| {
            domain_axis.java2d_to_value(along_edge(a, domain_edge), data_area, domain_edge)
        });
        let anchor_y = anchor
            .map(|a| range_axis.java2d_to_value(along_edge(a, range_edge), data_area, range_edge));
        let has_point = state.has_point();
        (
            resolve_crosshair(
                &self.domain_crosshair,
                anchor_x,
                has_point.then_some(state.crosshair_x),
            ),
            resolve_crosshair(
                &self.range_crosshair,
                anchor_y,
                has_point.then_some(state.crosshair_y),
            ),
        )
    }

    /// Moves both crosshairs to the values under a click inside the data
    /// area recorded by the last draw
    pub fn handle_click(&mut self, x: f32, y: f32, info: &PlotRenderingInfo) {
        let data_area = info.data_area;
        if !data_area.contains(x, y) {
            return;
        }
        let (domain_axis, range_axis) = self.configured_axes();
        let (domain_edge, range_edge) = (self.domain_edge(), self.range_edge());
        let domain_value =
            domain_axis.java2d_to_value(along_edge([x, y], domain_edge), &data_area, domain_edge);
        let range_value =
            range_axis.java2d_to_value(along_edge([x, y], range_edge), &data_area, range_edge);
        if domain_value.is_finite() {
            self.domain_crosshair.value = domain_value;
        }
        if range_value.is_finite() {
            self.range_crosshair.value = range_value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::xy::test_support::{dataset, series};
    use crate::renderer::xy::{XYAreaRenderer, XYLineAndShapeRenderer};
    use chartwell_common::text::default_text_measurer;
    use chartwell_scenegraph::marks::mark::SceneMark;
    use float_cmp::assert_approx_eq;

    fn plot() -> XYPlot {
        let data = dataset(vec![
            series("A", &[(1.0, Some(2.0)), (2.0, Some(4.0)), (3.0, Some(3.0))]),
            series("B", &[(1.0, Some(1.0)), (3.0, Some(5.0))]),
        ]);
        XYPlot::new(
            data,
            ValueAxis::new(Some("X")).with_auto_range_include_zero(false),
            ValueAxis::new(Some("Y")),
            XYLineAndShapeRenderer::new(true, true),
        )
    }

    fn area() -> Bounds {
        Bounds::new(0.0, 0.0, 400.0, 300.0)
    }

    #[test]
    fn test_data_area_inside_plot_area() {
        let mut info = ChartRenderingInfo::new(area());
        let group = plot()
            .draw(&area(), None, Some(&mut info), &default_text_measurer())
            .unwrap();
        let data_area = info.plot_info.data_area;
        assert_eq!(info.plot_info.plot_area, area());
        assert!(data_area.width > 0.0 && data_area.width < 400.0);
        assert!(data_area.height > 0.0 && data_area.height < 300.0);
        // the domain axis sits below the data area, the range axis to its left
        assert!(data_area.x > 8.0);
        assert!(data_area.max_y() < 296.0);
        assert!(group.marks.iter().any(|m| matches!(
            m,
            SceneMark::Group(g) if g.name == "dataset_0"
        )));
    }

    #[test]
    fn test_entities_collected() {
        let mut info = ChartRenderingInfo::new(area());
        plot()
            .draw(&area(), None, Some(&mut info), &default_text_measurer())
            .unwrap();
        let items = info
            .entities
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::XYItem { .. }))
            .count();
        assert_eq!(items, 5);
        assert_eq!(info.entities.get(0).unwrap().kind, EntityKind::Plot);
        assert_eq!(
            info.entities
                .iter()
                .filter(|e| e.kind == EntityKind::Axis)
                .count(),
            2
        );
    }

    #[test]
    fn test_configured_axes_follow_data() {
        let (domain, range) = plot().configured_axes();
        assert!(domain.range.lower() <= 1.0 && domain.range.lower() > 0.0);
        assert!(domain.range.upper() >= 3.0);
        assert_eq!(range.range.lower(), 0.0);
        assert!(range.range.upper() >= 5.0);
    }

    #[test]
    fn test_crosshair_locks_on_nearest_item() {
        let mut plot = plot();
        plot.domain_crosshair.visible = true;
        plot.range_crosshair.visible = true;

        let mut info = ChartRenderingInfo::new(area());
        plot.draw(&area(), None, Some(&mut info), &default_text_measurer())
            .unwrap();
        let data_area = info.plot_info.data_area;
        let (domain, range) = plot.configured_axes();
        let anchor = [
            domain.value_to_java2d(2.1, &data_area, RectangleEdge::Bottom),
            range.value_to_java2d(3.9, &data_area, RectangleEdge::Left),
        ];

        let mut info = ChartRenderingInfo::new(area());
        let group = plot
            .draw(&area(), Some(anchor), Some(&mut info), &default_text_measurer())
            .unwrap();
        let crosshair = info.plot_info.crosshair.unwrap();
        assert_eq!(crosshair.crosshair_x, 2.0);
        assert_eq!(crosshair.crosshair_y, 4.0);
        assert_eq!(crosshair.dataset_index, Some(0));
        assert!(group.marks.iter().any(|m| matches!(
            m,
            SceneMark::Rule(r) if r.name == "domain_crosshair"
        )));
        // drawing leaves the plot untouched
        assert_eq!(plot.domain_crosshair.value, 0.0);
    }

    #[test]
    fn test_handle_click_sets_crosshair_values() {
        let mut plot = plot();
        let mut info = ChartRenderingInfo::new(area());
        plot.draw(&area(), None, Some(&mut info), &default_text_measurer())
            .unwrap();
        let data_area = info.plot_info.data_area;
        let (domain, range) = plot.configured_axes();
        let x = domain.value_to_java2d(2.5, &data_area, RectangleEdge::Bottom);
        let y = range.value_to_java2d(1.5, &data_area, RectangleEdge::Left);

        plot.handle_click(x, y, &info.plot_info);
        assert_approx_eq!(f64, plot.domain_crosshair.value, 2.5, epsilon = 1e-3);
        assert_approx_eq!(f64, plot.range_crosshair.value, 1.5, epsilon = 1e-3);

        // clicks outside the data area are ignored
        plot.handle_click(-10.0, -10.0, &info.plot_info);
        assert_approx_eq!(f64, plot.domain_crosshair.value, 2.5, epsilon = 1e-3);
    }

    #[test]
    fn test_secondary_dataset_uses_own_renderer_and_offset() {
        let mut plot = plot();
        let index = plot.add_dataset(
            dataset(vec![series("C", &[(1.0, Some(1.0)), (2.0, Some(2.0))])]),
            Some(XYAreaRenderer::default().into()),
        );
        assert_eq!(index, 1);
        assert_eq!(plot.renderer_for(1).unwrap().type_name(), "area");

        let items = plot.legend_items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].label, "C");
        // the third series takes the third paint of the supplier
        assert_eq!(items[2].fill, plot.style.drawing_supplier.paint(2));
    }

    #[test]
    fn test_empty_plot_shows_message() {
        let mut plot = XYPlot {
            datasets: vec![dataset(vec![])],
            ..Default::default()
        };
        plot.style.no_data_message = Some("No data".to_string());
        let group = plot
            .draw(&area(), None, None, &default_text_measurer())
            .unwrap();
        assert!(group.marks.iter().any(|m| matches!(
            m,
            SceneMark::Text(t) if t.name == "no_data"
        )));
    }

    #[test]
    fn test_horizontal_edges() {
        let plot = plot().with_orientation(PlotOrientation::Horizontal);
        assert_eq!(plot.domain_edge(), RectangleEdge::Left);
        assert_eq!(plot.range_edge(), RectangleEdge::Bottom);
    }
}
