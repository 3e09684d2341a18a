use std::collections::BTreeMap;

use chartwell_common::layout::Bounds;
use chartwell_common::shapes::{arc_path, point_on_ellipse, ring_segment_path, ArcType};
use chartwell_common::text::TextMeasurer;
use chartwell_common::types::{colors, ColorOrGradient, FontSpec, StrokeStyle, SymbolShape};
use chartwell_data::dataset_utils::calculate_pie_total;
use chartwell_data::pie::DefaultPieDataset;
use chartwell_data::traits::PieDataset;
use chartwell_scenegraph::marks::arc::SceneArcMark;
use chartwell_scenegraph::marks::group::SceneGroup;
use chartwell_scenegraph::marks::text::{TextAlign, TextBaseline};
use lyon_path::Path;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PlotStyle;
use crate::entity::{ChartEntity, EntityKind};
use crate::error::ChartwellChartError;
use crate::info::ChartRenderingInfo;
use crate::labels::PieLabelGenerator;
use crate::legend::LegendItem;
use crate::renderer::buffer::{MarkBuffer, TextItem};
use crate::urls::PieUrlGenerator;

/// Gap between the link line end and its label
const LABEL_OFFSET: f32 = 4.0;

/// Direction sections are laid out in from the start angle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    #[default]
    Clockwise,
    Anticlockwise,
}

impl Rotation {
    fn factor(&self) -> f64 {
        match self {
            Rotation::Clockwise => -1.0,
            Rotation::Anticlockwise => 1.0,
        }
    }
}

/// Placement of one drawn section
#[derive(Debug, Clone, PartialEq)]
pub struct PieSection {
    pub key: String,
    pub index: usize,
    /// Centre after exploding
    pub center: [f32; 2],
    pub start_angle: f32,
    pub extent: f32,
    pub radius: [f32; 2],
    /// Zero for a full pie section
    pub inner_radius: [f32; 2],
}

impl PieSection {
    fn mid_angle(&self) -> f32 {
        self.start_angle + self.extent / 2.0
    }

    pub fn path(&self) -> Path {
        let [cx, cy] = self.center;
        if self.inner_radius[0] > 0.0 {
            ring_segment_path(
                cx,
                cy,
                self.inner_radius[0],
                self.radius[0],
                self.start_angle,
                self.extent,
            )
        } else {
            arc_path(
                cx,
                cy,
                self.radius[0],
                self.radius[1],
                self.start_angle,
                self.extent,
                ArcType::Pie,
            )
        }
    }
}

/// Where the pie sits within the plot area
#[derive(Debug, Clone, PartialEq)]
pub struct PieLayout {
    /// Area reached by fully exploded sections
    pub explode_area: Bounds,
    pub center: [f32; 2],
    pub radius: [f32; 2],
    pub sections: Vec<PieSection>,
}

/// Shows the share of each key of a pie dataset as a section of a circle.
///
/// With `section_depth` set, sections are drawn as ring segments whose
/// thickness is that fraction of the radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PiePlot {
    pub dataset: DefaultPieDataset,
    /// Angle of the first section's leading edge, degrees counter-clockwise
    /// from three o'clock
    pub start_angle: f64,
    pub direction: Rotation,
    /// Fraction of the plot area left around the pie
    pub interior_gap: f64,
    pub circular: bool,
    /// Fraction of the radius each keyed section is moved outward
    pub explode_percentages: BTreeMap<String, f64>,
    pub section_depth: Option<f64>,
    /// Keyed section paints, others come from the drawing supplier
    pub section_paints: BTreeMap<String, ColorOrGradient>,
    pub section_outline: Option<(ColorOrGradient, f32)>,
    pub shadow_paint: Option<ColorOrGradient>,
    pub label_generator: Option<PieLabelGenerator>,
    /// Labels inside the sections instead of beside the pie
    pub simple_labels: bool,
    pub label_font: FontSpec,
    pub label_paint: ColorOrGradient,
    pub label_links_visible: bool,
    pub label_link_paint: ColorOrGradient,
    pub label_link_stroke: StrokeStyle,
    /// Fraction of the plot width kept on each side for outside labels
    pub maximum_label_width: f64,
    pub tooltip_generator: Option<PieLabelGenerator>,
    pub url_generator: Option<PieUrlGenerator>,
    pub legend_label_generator: PieLabelGenerator,
    pub ignore_null_values: bool,
    pub ignore_zero_values: bool,
    /// Sections with a smaller extent in degrees are not drawn
    pub minimum_arc_angle_to_draw: f64,
    pub legend_item_shape: SymbolShape,
    pub style: PlotStyle,
}

impl Default for PiePlot {
    fn default() -> Self {
        Self {
            dataset: DefaultPieDataset::new(),
            start_angle: 90.0,
            direction: Rotation::Clockwise,
            interior_gap: 0.08,
            circular: true,
            explode_percentages: BTreeMap::new(),
            section_depth: None,
            section_paints: BTreeMap::new(),
            section_outline: Some((ColorOrGradient::Color(colors::GRAY), 0.5)),
            shadow_paint: None,
            label_generator: Some(PieLabelGenerator::standard_section_label()),
            simple_labels: false,
            label_font: FontSpec::new("SansSerif", 10.0, false),
            label_paint: ColorOrGradient::Color(colors::BLACK),
            label_links_visible: true,
            label_link_paint: ColorOrGradient::Color(colors::BLACK),
            label_link_stroke: StrokeStyle::new(0.5),
            maximum_label_width: 0.14,
            tooltip_generator: None,
            url_generator: None,
            legend_label_generator: PieLabelGenerator::standard_section_label(),
            ignore_null_values: false,
            ignore_zero_values: false,
            minimum_arc_angle_to_draw: 1e-5,
            legend_item_shape: SymbolShape::Circle,
            style: PlotStyle {
                outline: None,
                ..Default::default()
            },
        }
    }
}

const MAXIMUM_INTERIOR_GAP: f64 = 0.4;

fn check_fraction(name: &str, value: f64, max: f64) -> Result<(), ChartwellChartError> {
    if !(0.0..=max).contains(&value) {
        return Err(ChartwellChartError::InvalidArgument(format!(
            "{name} {value} is outside [0, {max}]"
        )));
    }
    Ok(())
}

fn check_explode_percent(key: &str, percent: f64) -> Result<(), ChartwellChartError> {
    if !(0.0..=1.0).contains(&percent) {
        return Err(ChartwellChartError::InvalidArgument(format!(
            "explode percent {percent} for {key} is outside [0, 1]"
        )));
    }
    Ok(())
}

impl PiePlot {
    pub fn new(dataset: DefaultPieDataset) -> Self {
        Self {
            dataset,
            ..Default::default()
        }
    }

    /// Pie drawn as a ring of the given thickness
    pub fn ring(dataset: DefaultPieDataset, section_depth: f64) -> Self {
        Self {
            section_depth: Some(section_depth),
            ..Self::new(dataset)
        }
    }

    pub fn set_explode_percent(
        &mut self,
        key: &str,
        percent: f64,
    ) -> Result<(), ChartwellChartError> {
        check_explode_percent(key, percent)?;
        self.explode_percentages.insert(key.to_string(), percent);
        Ok(())
    }

    pub fn set_interior_gap(&mut self, gap: f64) -> Result<(), ChartwellChartError> {
        check_fraction("interior gap", gap, MAXIMUM_INTERIOR_GAP)?;
        self.interior_gap = gap;
        Ok(())
    }

    /// Checks the fractions that size the pie, which deserialized plots
    /// may carry without going through the setters
    pub fn validate(&self) -> Result<(), ChartwellChartError> {
        check_fraction("interior gap", self.interior_gap, MAXIMUM_INTERIOR_GAP)?;
        check_fraction("maximum label width", self.maximum_label_width, 0.5)?;
        if let Some(depth) = self.section_depth {
            check_fraction("section depth", depth, 1.0)?;
        }
        for (key, percent) in &self.explode_percentages {
            check_explode_percent(key, *percent)?;
        }
        Ok(())
    }

    pub fn explode_percent(&self, key: &str) -> f64 {
        self.explode_percentages.get(key).copied().unwrap_or(0.0)
    }

    fn maximum_explode_percent(&self) -> f64 {
        (0..self.dataset.item_count())
            .filter_map(|i| self.dataset.key(i))
            .map(|k| self.explode_percent(k))
            .fold(0.0, f64::max)
    }

    pub fn section_paint(&self, key: &str, index: usize) -> ColorOrGradient {
        self.section_paints
            .get(key)
            .cloned()
            .unwrap_or_else(|| self.style.drawing_supplier.paint(index))
    }

    /// Whether a section gets a label and a legend item
    fn is_included(&self, value: Option<f64>) -> bool {
        match value {
            None => !self.ignore_null_values,
            Some(v) if v == 0.0 => !self.ignore_zero_values,
            Some(v) => v > 0.0,
        }
    }

    fn labels_outside(&self) -> bool {
        self.label_generator.is_some() && !self.simple_labels
    }

    /// Places the pie and its drawn sections in `area`
    pub fn layout(&self, area: &Bounds) -> PieLayout {
        let inner = area.shrink(&self.style.insets);
        let reserve = if self.labels_outside() {
            inner.width * self.maximum_label_width as f32
        } else {
            0.0
        };
        let link_area = Bounds::new(
            inner.x + reserve,
            inner.y,
            (inner.width - 2.0 * reserve).max(0.0),
            inner.height,
        );
        let gap_w = link_area.width * self.interior_gap as f32;
        let gap_h = link_area.height * self.interior_gap as f32;
        let mut explode_area = Bounds::new(
            link_area.x + gap_w / 2.0,
            link_area.y + gap_h / 2.0,
            link_area.width - gap_w,
            link_area.height - gap_h,
        );
        if self.circular {
            explode_area = explode_area.centered_square();
        }

        let full = [explode_area.width / 2.0, explode_area.height / 2.0];
        let shrink = 1.0 - self.maximum_explode_percent() as f32;
        let radius = [full[0] * shrink, full[1] * shrink];
        let center = [explode_area.center_x(), explode_area.center_y()];
        let depth = self.section_depth.map(|d| d.clamp(0.0, 1.0) as f32);
        let inner_radius = match depth {
            Some(d) => [radius[0] * (1.0 - d), radius[1] * (1.0 - d)],
            None => [0.0, 0.0],
        };

        let total = calculate_pie_total(&self.dataset);
        let mut sections = Vec::new();
        if total > 0.0 {
            let mut angle = self.start_angle;
            for index in 0..self.dataset.item_count() {
                let (Some(key), Some(value)) = (self.dataset.key(index), self.dataset.value(index))
                else {
                    continue;
                };
                if value <= 0.0 {
                    continue;
                }
                let extent = self.direction.factor() * value / total * 360.0;
                if extent.abs() >= self.minimum_arc_angle_to_draw {
                    let explode = self.explode_percent(key) as f32;
                    let mid = (angle + extent / 2.0) as f32;
                    let [dx, dy] =
                        point_on_ellipse(0.0, 0.0, full[0] * explode, full[1] * explode, mid);
                    sections.push(PieSection {
                        key: key.to_string(),
                        index,
                        center: [center[0] + dx, center[1] + dy],
                        start_angle: angle as f32,
                        extent: extent as f32,
                        radius,
                        inner_radius,
                    });
                }
                angle += extent;
            }
        }
        PieLayout {
            explode_area,
            center,
            radius,
            sections,
        }
    }

    pub fn legend_items(&self) -> Vec<LegendItem> {
        (0..self.dataset.item_count())
            .filter(|i| self.is_included(self.dataset.value(*i)))
            .filter_map(|i| {
                let key = self.dataset.key(i)?;
                let label = self.legend_label_generator.generate(&self.dataset, i);
                Some(
                    LegendItem::new(&label, self.section_paint(key, i))
                        .with_shape(Some(self.legend_item_shape), true)
                        .with_outline(self.section_outline.clone())
                        .with_series(0, i),
                )
            })
            .collect()
    }

    fn sections_mark(&self, layout: &PieLayout) -> Option<SceneArcMark> {
        if layout.sections.is_empty() {
            return None;
        }
        let sections = &layout.sections;
        let (stroke, stroke_width) = self
            .section_outline
            .clone()
            .unwrap_or((ColorOrGradient::transparent(), 0.0));
        Some(SceneArcMark {
            name: "pie_sections".to_string(),
            len: sections.len() as u32,
            arc_type: ArcType::Pie,
            x: sections.iter().map(|s| s.center[0]).collect::<Vec<_>>().into(),
            y: sections.iter().map(|s| s.center[1]).collect::<Vec<_>>().into(),
            start_angle: sections.iter().map(|s| s.start_angle).collect::<Vec<_>>().into(),
            extent: sections.iter().map(|s| s.extent).collect::<Vec<_>>().into(),
            outer_radius: layout.radius[0].into(),
            inner_radius: sections[0].inner_radius[0].into(),
            fill: sections
                .iter()
                .map(|s| self.section_paint(&s.key, s.index))
                .collect::<Vec<_>>()
                .into(),
            stroke: stroke.into(),
            stroke_width,
            ..Default::default()
        })
    }

    fn draw_labels(&self, buffer: &mut MarkBuffer, layout: &PieLayout) {
        let Some(generator) = self.label_generator.as_ref() else {
            return;
        };
        for section in &layout.sections {
            if !self.is_included(self.dataset.value(section.index)) {
                continue;
            }
            let text = generator.generate(&self.dataset, section.index);
            let mid = section.mid_angle();
            let [cx, cy] = section.center;
            if self.simple_labels {
                let [rx, ry] = [
                    (section.radius[0] + section.inner_radius[0]) / 2.0,
                    (section.radius[1] + section.inner_radius[1]) / 2.0,
                ];
                buffer.text(
                    "pie_labels",
                    TextItem {
                        text,
                        position: point_on_ellipse(cx, cy, rx, ry, mid),
                        align: TextAlign::Center,
                        baseline: TextBaseline::Middle,
                        color: self.label_paint.clone(),
                    },
                    &self.label_font,
                );
                continue;
            }
            let edge = point_on_ellipse(cx, cy, section.radius[0], section.radius[1], mid);
            let [ex, ey] = [
                layout.explode_area.width / 2.0,
                layout.explode_area.height / 2.0,
            ];
            let [lx, ly] = point_on_ellipse(
                layout.center[0],
                layout.center[1],
                ex + LABEL_OFFSET * 2.0,
                ey + LABEL_OFFSET * 2.0,
                mid,
            );
            let right = mid.to_radians().cos() >= 0.0;
            if self.label_links_visible {
                buffer.rule(
                    "pie_label_links",
                    edge,
                    [lx, ly],
                    self.label_link_paint.clone(),
                    &self.label_link_stroke,
                );
            }
            let (x, align) = if right {
                (lx + LABEL_OFFSET, TextAlign::Left)
            } else {
                (lx - LABEL_OFFSET, TextAlign::Right)
            };
            buffer.text(
                "pie_labels",
                TextItem {
                    text,
                    position: [x, ly],
                    align,
                    baseline: TextBaseline::Middle,
                    color: self.label_paint.clone(),
                },
                &self.label_font,
            );
        }
    }

    pub fn draw(
        &self,
        area: &Bounds,
        mut info: Option<&mut ChartRenderingInfo>,
        _measurer: &dyn TextMeasurer,
    ) -> Result<SceneGroup, ChartwellChartError> {
        self.validate()?;
        let mut group = SceneGroup::new("pie_plot");
        if let Some(info) = info.as_deref_mut() {
            info.entities.add(ChartEntity::rect(*area, EntityKind::Plot));
            info.plot_info.plot_area = *area;
        }
        let layout = self.layout(area);
        if let Some(info) = info.as_deref_mut() {
            info.plot_info.data_area = layout.explode_area;
        }
        if let Some(background) = self.style.background_mark(area) {
            group.push(background);
        }

        let Some(sections) = self.sections_mark(&layout) else {
            debug!("pie plot has no positive values to draw");
            if let Some(message) = self.style.no_data_mark(area) {
                group.push(message);
            }
            if let Some(outline) = self.style.outline_mark(area) {
                group.push(outline);
            }
            return Ok(group);
        };

        if let Some(shadow) = self.shadow_paint.clone() {
            let mut mark = sections.clone();
            mark.name = "pie_shadow".to_string();
            mark.x = layout.sections.iter().map(|s| s.center[0] + 4.0).collect::<Vec<_>>().into();
            mark.y = layout.sections.iter().map(|s| s.center[1] + 4.0).collect::<Vec<_>>().into();
            mark.fill = shadow.into();
            mark.stroke = ColorOrGradient::transparent().into();
            group.push(mark);
        }
        if !self.circular {
            // elliptical sections go out as paths
            let mut buffer = MarkBuffer::new();
            for section in &layout.sections {
                buffer.path(
                    "pie_sections",
                    section.path(),
                    self.section_paint(&section.key, section.index),
                    self.section_outline
                        .clone()
                        .map(|(paint, width)| (paint, StrokeStyle::new(width))),
                );
            }
            group.extend(buffer.into_marks());
        } else {
            group.push(sections);
        }

        if let Some(info) = info.as_deref_mut() {
            for section in &layout.sections {
                let tooltip = self
                    .tooltip_generator
                    .as_ref()
                    .map(|g| g.generate(&self.dataset, section.index));
                let url = self
                    .url_generator
                    .as_ref()
                    .and_then(|g| g.generate(section.index, &section.key));
                info.entities.add(
                    ChartEntity::from_path(
                        section.path(),
                        EntityKind::PieSection {
                            key: section.key.clone(),
                            index: section.index,
                        },
                    )
                    .with_tooltip(tooltip)
                    .with_url(url),
                );
            }
        }

        let mut labels = MarkBuffer::new();
        self.draw_labels(&mut labels, &layout);
        group.extend(labels.into_marks());
        if let Some(outline) = self.style.outline_mark(area) {
            group.push(outline);
        }
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartwell_common::text::default_text_measurer;
    use chartwell_scenegraph::marks::mark::SceneMark;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    fn data() -> DefaultPieDataset {
        DefaultPieDataset::from_pairs([("A", 1.0), ("B", 2.0), ("C", 1.0)])
    }

    fn area() -> Bounds {
        Bounds::new(0.0, 0.0, 200.0, 200.0)
    }

    fn plain(dataset: DefaultPieDataset) -> PiePlot {
        PiePlot {
            label_generator: None,
            interior_gap: 0.0,
            style: PlotStyle {
                insets: Default::default(),
                outline: None,
                ..Default::default()
            },
            ..PiePlot::new(dataset)
        }
    }

    #[test]
    fn test_sections_run_clockwise_from_top() {
        let layout = plain(data()).layout(&area());
        assert_eq!(layout.center, [100.0, 100.0]);
        assert_eq!(layout.radius, [100.0, 100.0]);
        let s = &layout.sections;
        assert_eq!(s.len(), 3);
        assert_approx_eq!(f32, s[0].start_angle, 90.0);
        assert_approx_eq!(f32, s[0].extent, -90.0);
        assert_approx_eq!(f32, s[1].start_angle, 0.0);
        assert_approx_eq!(f32, s[1].extent, -180.0);
        assert_approx_eq!(f32, s[2].start_angle, -180.0);
    }

    #[test]
    fn test_anticlockwise_and_start_angle() {
        let mut plot = plain(data());
        plot.direction = Rotation::Anticlockwise;
        plot.start_angle = 0.0;
        let s = plot.layout(&area()).sections;
        assert_approx_eq!(f32, s[0].extent, 90.0);
        assert_approx_eq!(f32, s[1].start_angle, 90.0);
    }

    #[test]
    fn test_explode_shrinks_pie_and_moves_section() {
        let mut plot = plain(data());
        plot.set_explode_percent("A", 0.2).unwrap();
        assert!(plot.set_explode_percent("A", 1.5).is_err());
        let layout = plot.layout(&area());
        assert_approx_eq!(f32, layout.radius[0], 80.0);
        // A spans 90 to 0 degrees, so it moves up and right along 45 degrees
        let a = &layout.sections[0];
        let offset = 20.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert_approx_eq!(f32, a.center[0], 100.0 + offset, epsilon = 1e-3);
        assert_approx_eq!(f32, a.center[1], 100.0 - offset, epsilon = 1e-3);
        assert_eq!(layout.sections[1].center, [100.0, 100.0]);
    }

    #[test]
    fn test_ring_inner_radius() {
        let mut plot = plain(data());
        plot.section_depth = Some(0.25);
        let layout = plot.layout(&area());
        assert_approx_eq!(f32, layout.sections[0].inner_radius[0], 75.0);
        let SceneMark::Arc(arcs) = plot
            .draw(&area(), None, &default_text_measurer())
            .unwrap()
            .marks
            .into_iter()
            .find(|m| matches!(m, SceneMark::Arc(_)))
            .unwrap()
        else {
            unreachable!()
        };
        assert_eq!(arcs.inner_radius.as_vec(3)[0], 75.0);
    }

    #[test]
    fn test_null_zero_and_negative_values() {
        let mut dataset = data();
        dataset.set_value("N", None);
        dataset.set_value("Z", Some(0.0));
        dataset.set_value("M", Some(-3.0));
        let mut plot = plain(dataset);
        assert_eq!(plot.layout(&area()).sections.len(), 3);
        let labels: Vec<_> = plot.legend_items().into_iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["A", "B", "C", "N", "Z"]);

        plot.ignore_null_values = true;
        plot.ignore_zero_values = true;
        assert_eq!(plot.legend_items().len(), 3);
    }

    #[test]
    fn test_minimum_arc_angle() {
        let mut plot = plain(DefaultPieDataset::from_pairs([("Big", 1e9), ("Tiny", 1e-3)]));
        plot.minimum_arc_angle_to_draw = 1.0;
        let layout = plot.layout(&area());
        assert_eq!(layout.sections.len(), 1);
        assert_eq!(layout.sections[0].key, "Big");
    }

    #[test]
    fn test_entities_hit_sections() {
        let mut plot = plain(data());
        plot.tooltip_generator = Some(PieLabelGenerator::standard_tooltip());
        let mut info = ChartRenderingInfo::new(area());
        plot.draw(&area(), Some(&mut info), &default_text_measurer())
            .unwrap();
        // upper right quadrant belongs to A
        let hit = info.entities.entity_at(150.0, 50.0).unwrap();
        assert_eq!(
            hit.kind,
            EntityKind::PieSection {
                key: "A".to_string(),
                index: 0
            }
        );
        assert_eq!(hit.tooltip.as_deref(), Some("A: (1, 25%)"));
        // lower half belongs to B
        let hit = info.entities.entity_at(100.0, 150.0).unwrap();
        assert!(matches!(&hit.kind, EntityKind::PieSection { key, .. } if key == "B"));
    }

    #[test]
    fn test_outside_labels_reserve_space() {
        let mut plot = plain(data());
        plot.label_generator = Some(PieLabelGenerator::standard_section_label());
        let layout = plot.layout(&area());
        assert!(layout.radius[0] < 100.0);
        let group = plot.draw(&area(), None, &default_text_measurer()).unwrap();
        let text = group
            .marks
            .iter()
            .find_map(|m| match m {
                SceneMark::Text(t) if t.name == "pie_labels" => Some(t),
                _ => None,
            })
            .unwrap();
        assert_eq!(text.len, 3);
        assert!(group.marks.iter().any(|m| matches!(
            m,
            SceneMark::Rule(r) if r.name == "pie_label_links"
        )));
    }

    #[test]
    fn test_empty_pie_shows_message() {
        let mut plot = plain(DefaultPieDataset::new());
        plot.style.no_data_message = Some("No data".to_string());
        let group = plot.draw(&area(), None, &default_text_measurer()).unwrap();
        assert!(group
            .marks
            .iter()
            .any(|m| matches!(m, SceneMark::Text(t) if t.name == "no_data")));
    }

    #[rstest]
    #[case::explode_beyond_radius(r#"{"explode_percentages": {"A": 1.5}}"#)]
    #[case::negative_explode(r#"{"explode_percentages": {"B": -0.1}}"#)]
    #[case::interior_gap(r#"{"interior_gap": 2.0}"#)]
    #[case::section_depth(r#"{"section_depth": 3.0}"#)]
    fn test_draw_rejects_invalid_deserialized_settings(#[case] json: &str) {
        let mut plot: PiePlot = serde_json::from_str(json).unwrap();
        plot.dataset = data();
        assert!(matches!(
            plot.draw(&area(), None, &default_text_measurer()),
            Err(ChartwellChartError::InvalidArgument(_))
        ));
        assert!(plot.set_interior_gap(0.5).is_err());
    }
}
