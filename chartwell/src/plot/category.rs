use std::collections::BTreeMap;

use chartwell_common::layout::{
    resolve_domain_axis_location, resolve_range_axis_location, AxisLocation, Bounds,
    PlotOrientation, RectangleEdge,
};
use chartwell_common::range::Range;
use chartwell_common::text::TextMeasurer;
use chartwell_data::traits::CategoryDataset;
use chartwell_data::CategoryDatasetKind;
use chartwell_scenegraph::marks::group::{Clip, SceneGroup};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    along_edge, crosshair_rule, push_axis, resolve_crosshair, tick_positions, trim_edge,
    Crosshair, CrosshairState, DatasetRenderingOrder, Gridlines, PlotStyle,
};
use crate::axis::{CategoryAxis, ValueAxis};
use crate::entity::{ChartEntity, EntityKind};
use crate::error::ChartwellChartError;
use crate::info::{ChartRenderingInfo, PlotRenderingInfo};
use crate::legend::LegendItem;
use crate::renderer::category::draw_dataset;
use crate::renderer::styles::StyleContext;
use crate::renderer::{CategoryItemContext, CategoryRendererKind, RendererState};

/// Plots category datasets with categories along the domain axis and values
/// along the range axis.
///
/// The domain crosshair value is a column index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryPlot {
    pub datasets: Vec<CategoryDatasetKind>,
    #[serde(with = "crate::usize_keys")]
    pub renderers: BTreeMap<usize, CategoryRendererKind>,
    pub domain_axis: CategoryAxis,
    pub range_axis: ValueAxis,
    pub domain_axis_location: AxisLocation,
    pub range_axis_location: AxisLocation,
    pub orientation: PlotOrientation,
    pub dataset_rendering_order: DatasetRenderingOrder,
    pub domain_gridlines: Gridlines,
    pub range_gridlines: Gridlines,
    pub domain_crosshair: Crosshair,
    pub range_crosshair: Crosshair,
    pub style: PlotStyle,
}

impl Default for CategoryPlot {
    fn default() -> Self {
        Self {
            datasets: Vec::new(),
            renderers: BTreeMap::from([(0, CategoryRendererKind::default())]),
            domain_axis: CategoryAxis::default(),
            range_axis: ValueAxis::default(),
            domain_axis_location: AxisLocation::BottomOrLeft,
            range_axis_location: AxisLocation::BottomOrLeft,
            orientation: PlotOrientation::Vertical,
            dataset_rendering_order: DatasetRenderingOrder::default(),
            domain_gridlines: Gridlines::hidden(),
            range_gridlines: Gridlines::default(),
            domain_crosshair: Crosshair::default(),
            range_crosshair: Crosshair::default(),
            style: PlotStyle::default(),
        }
    }
}

impl CategoryPlot {
    pub fn new(
        dataset: impl Into<CategoryDatasetKind>,
        domain_axis: CategoryAxis,
        range_axis: ValueAxis,
        renderer: impl Into<CategoryRendererKind>,
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

    pub fn add_dataset(
        &mut self,
        dataset: impl Into<CategoryDatasetKind>,
        renderer: Option<CategoryRendererKind>,
    ) -> usize {
        let index = self.datasets.len();
        self.datasets.push(dataset.into());
        if let Some(renderer) = renderer {
            self.renderers.insert(index, renderer);
        }
        index
    }

    pub fn dataset(&self, index: usize) -> Option<&CategoryDatasetKind> {
        self.datasets.get(index)
    }

    pub fn renderer_for(&self, index: usize) -> Option<&CategoryRendererKind> {
        self.renderers.get(&index).or_else(|| self.renderers.get(&0))
    }

    pub fn renderer_mut(&mut self, index: usize) -> &mut CategoryRendererKind {
        self.renderers.entry(index).or_default()
    }

    pub fn set_renderer(&mut self, index: usize, renderer: impl Into<CategoryRendererKind>) {
        self.renderers.insert(index, renderer.into());
    }

    pub fn domain_edge(&self) -> RectangleEdge {
        resolve_domain_axis_location(self.domain_axis_location, self.orientation)
    }

    pub fn range_edge(&self) -> RectangleEdge {
        resolve_range_axis_location(self.range_axis_location, self.orientation)
    }

    /// Column keys of every dataset, in first seen order
    pub fn categories(&self) -> Vec<String> {
        let keys: IndexSet<String> = self
            .datasets
            .iter()
            .flat_map(|d| d.column_keys())
            .collect();
        keys.into_iter().collect()
    }

    fn series_offset(&self, index: usize) -> usize {
        self.datasets[..index.min(self.datasets.len())]
            .iter()
            .map(|d| d.row_count())
            .sum()
    }

    pub fn data_range(&self) -> Option<Range> {
        self.datasets
            .iter()
            .enumerate()
            .filter_map(|(i, d)| {
                self.renderer_for(i)
                    .and_then(|r| r.as_renderer().find_range_bounds(d))
            })
            .fold(None, |acc, r| Range::combine(acc, Some(r)))
    }

    /// Copy of the range axis with its auto range fitted to the data
    pub fn configured_range_axis(&self) -> ValueAxis {
        let mut axis = self.range_axis.clone();
        axis.configure(self.data_range());
        axis
    }

    fn is_empty(&self) -> bool {
        self.datasets
            .iter()
            .all(|d| d.row_count() == 0 || d.column_count() == 0)
    }

    /// One legend item per row, datasets in index order
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
            items.extend(
                (0..dataset.row_count())
                    .filter_map(|row| renderer.as_renderer().legend_item(dataset, i, row, &ctx)),
            );
        }
        items
    }

    pub fn draw(
        &self,
        area: &Bounds,
        anchor: Option<[f32; 2]>,
        mut info: Option<&mut ChartRenderingInfo>,
        measurer: &dyn TextMeasurer,
    ) -> Result<SceneGroup, ChartwellChartError> {
        let mut group = SceneGroup::new("category_plot");
        if let Some(info) = info.as_deref_mut() {
            info.entities.add(ChartEntity::rect(*area, EntityKind::Plot));
            info.plot_info.plot_area = *area;
        }

        let inner = area.shrink(&self.style.insets);
        let categories = self.categories();
        let range_axis = self.configured_range_axis();
        let (domain_edge, range_edge) = (self.domain_edge(), self.range_edge());
        let domain_space =
            self.domain_axis
                .reserve_space(&categories, &inner, domain_edge, measurer)?;
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
        let count = categories.len();
        let category_middles = (0..count)
            .map(|i| {
                self.domain_axis
                    .category_middle(i, count, &data_area, domain_edge)
            })
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(lines) = self.domain_gridlines.marks(
            "domain_gridlines",
            &data_area,
            &category_middles,
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

        if self.is_empty() {
            debug!("category plot has no data to draw");
            if let Some(message) = self.style.no_data_mark(&data_area) {
                group.push(message);
            }
        }
        let collect = info.is_some();
        let mut crosshair = CrosshairState::new(anchor);
        for index in self.dataset_rendering_order.indices(self.datasets.len()) {
            let dataset = &self.datasets[index];
            let Some(renderer) = self.renderer_for(index) else {
                warn!("no renderer for category dataset {index}");
                continue;
            };
            let styles = StyleContext {
                supplier: &self.style.drawing_supplier,
                series_offset: self.series_offset(index),
            };
            let ctx = CategoryItemContext::new(
                data_area,
                self.orientation,
                (&self.domain_axis, domain_edge),
                (&range_axis, range_edge),
                dataset,
                styles,
            )?
            .with_dataset_index(index);
            let mut state = RendererState::new(collect, anchor);
            draw_dataset(renderer.as_renderer(), &mut state, &ctx)?;
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
            self.domain_axis
                .draw(&categories, &data_area, domain_edge, measurer)?,
            info.as_deref_mut(),
        );
        push_axis(
            &mut group,
            range_axis.draw(&data_area, range_edge, measurer)?,
            info.as_deref_mut(),
        );

        let anchor = anchor.filter(|[x, y]| data_area.contains(*x, *y));
        let has_point = crosshair.has_point();
        let anchor_column = anchor
            .and_then(|a| self.column_at(along_edge(a, domain_edge), count, &data_area))
            .map(|c| c as f64);
        let column = resolve_crosshair(
            &self.domain_crosshair,
            anchor_column,
            has_point.then_some(crosshair.crosshair_x),
        );
        let anchor_value = anchor.map(|a| {
            range_axis.java2d_to_value(along_edge(a, range_edge), &data_area, range_edge)
        });
        let value = resolve_crosshair(
            &self.range_crosshair,
            anchor_value,
            has_point.then_some(crosshair.crosshair_y),
        );

        if self.domain_crosshair.visible && column >= 0.0 && (column as usize) < count {
            let coordinate =
                self.domain_axis
                    .category_middle(column as usize, count, &data_area, domain_edge)?;
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
            let coordinate = range_axis.value_to_java2d(value, &data_area, range_edge);
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
            crosshair.crosshair_x = column;
            crosshair.crosshair_y = value;
            info.plot_info.crosshair = Some(crosshair);
        }
        Ok(group)
    }

    /// Column whose band contains `coordinate` along the domain axis
    fn column_at(&self, coordinate: f32, count: usize, data_area: &Bounds) -> Option<usize> {
        let edge = self.domain_edge();
        (0..count).find(|i| {
            let start = self.domain_axis.category_start(*i, count, data_area, edge);
            let end = self.domain_axis.category_end(*i, count, data_area, edge);
            match (start, end) {
                (Ok(a), Ok(b)) => coordinate >= a.min(b) && coordinate <= a.max(b),
                _ => false,
            }
        })
    }

    /// Moves the crosshairs to the category and value under a click inside
    /// the data area recorded by the last draw
    pub fn handle_click(&mut self, x: f32, y: f32, info: &PlotRenderingInfo) {
        let data_area = info.data_area;
        if !data_area.contains(x, y) {
            return;
        }
        let (domain_edge, range_edge) = (self.domain_edge(), self.range_edge());
        let count = self.categories().len();
        if let Some(column) = self.column_at(along_edge([x, y], domain_edge), count, &data_area) {
            self.domain_crosshair.value = column as f64;
        }
        let value = self.configured_range_axis().java2d_to_value(
            along_edge([x, y], range_edge),
            &data_area,
            range_edge,
        );
        if value.is_finite() {
            self.range_crosshair.value = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::category::test_support::dataset;
    use crate::renderer::category::{BarRenderer, LineAndShapeRenderer};
    use chartwell_common::text::default_text_measurer;
    use chartwell_scenegraph::marks::mark::SceneMark;
    use float_cmp::assert_approx_eq;

    fn plot() -> CategoryPlot {
        let data = dataset(&[
            ("S1", "A", Some(1.0)),
            ("S1", "B", Some(4.0)),
            ("S2", "A", Some(2.0)),
            ("S2", "B", Some(3.0)),
        ]);
        CategoryPlot::new(
            data,
            CategoryAxis::new(Some("Category")),
            ValueAxis::new(Some("Value")),
            BarRenderer::default(),
        )
    }

    fn area() -> Bounds {
        Bounds::new(0.0, 0.0, 400.0, 300.0)
    }

    #[test]
    fn test_draw_collects_bar_entities() {
        let mut info = ChartRenderingInfo::new(area());
        let group = plot()
            .draw(&area(), None, Some(&mut info), &default_text_measurer())
            .unwrap();
        let bars = info
            .entities
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::CategoryItem { .. }))
            .count();
        assert_eq!(bars, 4);
        assert!(group.marks.iter().any(|m| matches!(
            m,
            SceneMark::Group(g) if g.name == "dataset_0"
        )));
        // domain gridlines are off by default
        assert!(!group.marks.iter().any(|m| matches!(
            m,
            SceneMark::Rule(r) if r.name == "domain_gridlines"
        )));
    }

    #[test]
    fn test_range_axis_includes_zero() {
        let axis = plot().configured_range_axis();
        assert_eq!(axis.range.lower(), 0.0);
        assert!(axis.range.upper() >= 4.0);
    }

    #[test]
    fn test_categories_union_in_first_seen_order() {
        let mut plot = plot();
        plot.add_dataset(
            dataset(&[("S3", "B", Some(1.0)), ("S3", "C", Some(2.0))]),
            Some(LineAndShapeRenderer::new(true, true).into()),
        );
        assert_eq!(plot.categories(), vec!["A", "B", "C"]);
        let items = plot.legend_items();
        assert_eq!(
            items.iter().map(|i| i.label.as_str()).collect::<Vec<_>>(),
            vec!["S1", "S2", "S3"]
        );
    }

    #[test]
    fn test_handle_click_picks_column() {
        let mut plot = plot();
        let mut info = ChartRenderingInfo::new(area());
        plot.draw(&area(), None, Some(&mut info), &default_text_measurer())
            .unwrap();
        let data_area = info.plot_info.data_area;
        let x = plot
            .domain_axis
            .category_middle(1, 2, &data_area, RectangleEdge::Bottom)
            .unwrap();
        let axis = plot.configured_range_axis();
        let y = axis.value_to_java2d(2.0, &data_area, RectangleEdge::Left);
        plot.handle_click(x, y, &info.plot_info);
        assert_eq!(plot.domain_crosshair.value, 1.0);
        assert_approx_eq!(f64, plot.range_crosshair.value, 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_crosshair_snaps_to_item() {
        let mut plot = plot();
        plot.range_crosshair.visible = true;
        let mut info = ChartRenderingInfo::new(area());
        plot.draw(&area(), None, Some(&mut info), &default_text_measurer())
            .unwrap();
        let data_area = info.plot_info.data_area;
        let axis = plot.configured_range_axis();
        // near the top of the S1 bar in column B
        let x = plot
            .domain_axis
            .category_middle(1, 2, &data_area, RectangleEdge::Bottom)
            .unwrap();
        let y = axis.value_to_java2d(3.9, &data_area, RectangleEdge::Left);

        let mut info = ChartRenderingInfo::new(area());
        let group = plot
            .draw(&area(), Some([x, y]), Some(&mut info), &default_text_measurer())
            .unwrap();
        let crosshair = info.plot_info.crosshair.unwrap();
        assert_eq!(crosshair.crosshair_y, 4.0);
        assert_eq!(crosshair.crosshair_x, 1.0);
        assert!(group.marks.iter().any(|m| matches!(
            m,
            SceneMark::Rule(r) if r.name == "range_crosshair"
        )));
    }

    #[test]
    fn test_horizontal_puts_categories_on_left() {
        let plot = plot().with_orientation(PlotOrientation::Horizontal);
        assert_eq!(plot.domain_edge(), RectangleEdge::Left);
        assert_eq!(plot.range_edge(), RectangleEdge::Bottom);
    }
}
