use chartwell_common::layout::{Bounds, RectangleInsets};
use chartwell_common::range::Range;
use chartwell_common::shapes::{point_on_ellipse, polygon_path, ArcType};
use chartwell_common::text::TextMeasurer;
use chartwell_common::types::{colors, ColorOrGradient, FontSpec, StrokeStyle, SymbolShape};
use chartwell_data::traits::ValueDataset;
use chartwell_data::value::DefaultValueDataset;
use chartwell_scales::NumberFormat;
use chartwell_scenegraph::marks::arc::SceneArcMark;
use chartwell_scenegraph::marks::group::SceneGroup;
use chartwell_scenegraph::marks::text::{TextAlign, TextBaseline};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PlotStyle;
use crate::entity::{ChartEntity, EntityKind};
use crate::error::ChartwellChartError;
use crate::info::ChartRenderingInfo;
use crate::legend::LegendItem;
use crate::renderer::buffer::{MarkBuffer, TextItem};

const BORDER_SIZE: f32 = 3.0;
const CIRCLE_SIZE: f32 = 10.0;
/// Ticks run inward from just outside the dial
const TICK_LENGTH: f32 = 15.0;

/// How the part of the dial outside the meter angle is closed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialShape {
    #[default]
    Circle,
    Pie,
    Chord,
}

/// A labelled band of the meter range, such as "normal" or "critical"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterInterval {
    pub label: String,
    pub range: Range,
    pub outline_paint: ColorOrGradient,
    pub outline_stroke: StrokeStyle,
    pub background_paint: Option<ColorOrGradient>,
}

impl Default for MeterInterval {
    fn default() -> Self {
        Self {
            label: String::new(),
            range: Range::default(),
            outline_paint: ColorOrGradient::Color(colors::YELLOW),
            outline_stroke: StrokeStyle::new(2.0),
            background_paint: None,
        }
    }
}

impl MeterInterval {
    pub fn new(label: &str, range: Range) -> Self {
        Self {
            label: label.to_string(),
            range,
            ..Default::default()
        }
    }

    pub fn with_background(mut self, paint: ColorOrGradient) -> Self {
        self.background_paint = Some(paint);
        self
    }

    pub fn with_outline(mut self, paint: ColorOrGradient, stroke: StrokeStyle) -> Self {
        self.outline_paint = paint;
        self.outline_stroke = stroke;
        self
    }
}

/// A dial with a needle pointing at the current value of a value dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterPlot {
    pub dataset: DefaultValueDataset,
    pub range: Range,
    pub units: String,
    /// Sweep of the dial in degrees
    pub meter_angle: f64,
    pub dial_shape: DialShape,
    pub dial_background_paint: ColorOrGradient,
    pub dial_outline_paint: ColorOrGradient,
    pub intervals: Vec<MeterInterval>,
    pub needle_paint: ColorOrGradient,
    pub value_paint: ColorOrGradient,
    pub value_font: FontSpec,
    pub tick_size: f64,
    pub tick_paint: ColorOrGradient,
    pub tick_labels_visible: bool,
    pub tick_label_font: FontSpec,
    pub tick_label_paint: ColorOrGradient,
    /// Defaults to just enough decimals for the tick size
    pub tick_label_format: Option<NumberFormat>,
    pub style: PlotStyle,
}

impl Default for MeterPlot {
    fn default() -> Self {
        Self {
            dataset: DefaultValueDataset::default(),
            range: Range::try_new(0.0, 100.0).unwrap_or_default(),
            units: "Units".to_string(),
            meter_angle: 270.0,
            dial_shape: DialShape::Circle,
            dial_background_paint: ColorOrGradient::Color(colors::BLACK),
            dial_outline_paint: ColorOrGradient::Color(colors::GRAY),
            intervals: Vec::new(),
            needle_paint: ColorOrGradient::Color(colors::GREEN),
            value_paint: ColorOrGradient::Color(colors::YELLOW),
            value_font: FontSpec::new("SansSerif", 12.0, true),
            tick_size: 10.0,
            tick_paint: ColorOrGradient::Color(colors::WHITE),
            tick_labels_visible: true,
            tick_label_font: FontSpec::new("SansSerif", 10.0, false),
            tick_label_paint: ColorOrGradient::Color(colors::WHITE),
            tick_label_format: None,
            style: PlotStyle {
                outline: None,
                ..Default::default()
            },
        }
    }
}

/// Upper limit on the ticks drawn around one dial
const MAXIMUM_TICK_COUNT: f64 = 1000.0;

fn check_range(range: &Range) -> Result<(), ChartwellChartError> {
    if range.length() <= 0.0 {
        return Err(ChartwellChartError::InvalidArgument(format!(
            "meter range [{}, {}] is empty",
            range.lower(),
            range.upper()
        )));
    }
    Ok(())
}

fn check_meter_angle(angle: f64) -> Result<(), ChartwellChartError> {
    if !(1.0..=360.0).contains(&angle) {
        return Err(ChartwellChartError::InvalidArgument(format!(
            "meter angle {angle} is outside [1, 360]"
        )));
    }
    Ok(())
}

fn check_tick_size(range: &Range, size: f64) -> Result<(), ChartwellChartError> {
    if size.is_nan() || size <= 0.0 {
        return Err(ChartwellChartError::InvalidArgument(format!(
            "tick size {size} must be positive"
        )));
    }
    if range.length() / size > MAXIMUM_TICK_COUNT {
        return Err(ChartwellChartError::InvalidArgument(format!(
            "tick size {size} gives more than {MAXIMUM_TICK_COUNT} ticks"
        )));
    }
    Ok(())
}

impl MeterPlot {
    pub fn new(dataset: DefaultValueDataset) -> Self {
        Self {
            dataset,
            ..Default::default()
        }
    }

    pub fn set_range(&mut self, range: Range) -> Result<(), ChartwellChartError> {
        check_range(&range)?;
        self.range = range;
        Ok(())
    }

    pub fn set_meter_angle(&mut self, angle: f64) -> Result<(), ChartwellChartError> {
        check_meter_angle(angle)?;
        self.meter_angle = angle;
        Ok(())
    }

    pub fn set_tick_size(&mut self, size: f64) -> Result<(), ChartwellChartError> {
        check_tick_size(&self.range, size)?;
        self.tick_size = size;
        Ok(())
    }

    /// Checks the dial settings, which deserialized plots may carry without
    /// going through the setters
    pub fn validate(&self) -> Result<(), ChartwellChartError> {
        check_range(&self.range)?;
        check_meter_angle(self.meter_angle)?;
        check_tick_size(&self.range, self.tick_size)
    }

    pub fn add_interval(&mut self, interval: MeterInterval) {
        self.intervals.push(interval);
    }

    /// Dial angle in degrees for `value`; the range lower bound sits at
    /// `180 + (meter_angle - 180) / 2` and values sweep clockwise
    pub fn value_to_angle(&self, value: f64) -> f64 {
        let base = 180.0 + (self.meter_angle - 180.0) / 2.0;
        base - (value - self.range.lower()) / self.range.length() * self.meter_angle
    }

    pub fn legend_items(&self) -> Vec<LegendItem> {
        self.intervals
            .iter()
            .enumerate()
            .map(|(i, interval)| {
                let fill = interval
                    .background_paint
                    .clone()
                    .unwrap_or_else(|| interval.outline_paint.clone());
                LegendItem::new(&interval.label, fill)
                    .with_shape(Some(SymbolShape::Square), true)
                    .with_outline(Some((
                        interval.outline_paint.clone(),
                        interval.outline_stroke.width,
                    )))
                    .with_series(0, i)
            })
            .collect()
    }

    /// Square the dial is drawn in
    pub fn meter_area(&self, area: &Bounds) -> Bounds {
        area.shrink(&self.style.insets)
            .shrink(&RectangleInsets::uniform(BORDER_SIZE))
            .centered_square()
    }

    fn arc_type(&self, dial: bool) -> ArcType {
        match self.dial_shape {
            DialShape::Chord if dial && self.meter_angle > 180.0 => ArcType::Chord,
            _ => ArcType::Pie,
        }
    }

    fn arc(
        &self,
        name: &str,
        meter_area: &Bounds,
        (start, extent): (f64, f64),
        arc_type: ArcType,
        fill: ColorOrGradient,
        stroke: Option<(ColorOrGradient, f32)>,
    ) -> SceneArcMark {
        let (stroke, stroke_width) = stroke.unwrap_or((ColorOrGradient::transparent(), 0.0));
        SceneArcMark {
            name: name.to_string(),
            arc_type,
            x: meter_area.center_x().into(),
            y: meter_area.center_y().into(),
            start_angle: (start as f32).into(),
            extent: (extent as f32).into(),
            outer_radius: (meter_area.width / 2.0).into(),
            fill: fill.into(),
            stroke: stroke.into(),
            stroke_width,
            ..Default::default()
        }
    }

    fn dial_span(&self) -> (f64, f64) {
        if self.dial_shape == DialShape::Circle {
            (0.0, 360.0)
        } else {
            let start = self.value_to_angle(self.range.lower());
            (start, self.value_to_angle(self.range.upper()) - start)
        }
    }

    fn interval_marks(&self, group: &mut SceneGroup, meter_area: &Bounds) {
        for (i, interval) in self.intervals.iter().enumerate() {
            let lower = self.range.constrain(interval.range.lower());
            let upper = self.range.constrain(interval.range.upper());
            let start = self.value_to_angle(lower);
            let extent = self.value_to_angle(upper) - start;
            if let Some(background) = interval.background_paint.clone() {
                group.push(self.arc(
                    &format!("interval_{i}"),
                    meter_area,
                    (start, extent),
                    self.arc_type(false),
                    background,
                    None,
                ));
            }
            group.push(self.arc(
                &format!("interval_{i}_outline"),
                meter_area,
                (start, extent),
                ArcType::Open,
                ColorOrGradient::transparent(),
                Some((
                    interval.outline_paint.clone(),
                    interval.outline_stroke.width,
                )),
            ));
        }
    }

    fn tick_marks(&self, buffer: &mut MarkBuffer, meter_area: &Bounds) {
        let format = self
            .tick_label_format
            .clone()
            .unwrap_or_else(|| NumberFormat::for_step(self.tick_size));
        let (cx, cy) = (meter_area.center_x(), meter_area.center_y());
        let outer = meter_area.width / 2.0 + BORDER_SIZE;
        let inner = outer - TICK_LENGTH;
        let stroke = StrokeStyle::new(1.0);
        let count = (self.range.length() / self.tick_size).floor() as usize;
        for i in 0..=count {
            let value = self.range.lower() + i as f64 * self.tick_size;
            let angle = self.value_to_angle(value) as f32;
            let from = point_on_ellipse(cx, cy, outer, outer, angle);
            let to = point_on_ellipse(cx, cy, inner, inner, angle);
            buffer.rule("ticks", from, to, self.tick_paint.clone(), &stroke);
            if self.tick_labels_visible {
                let label_radius = inner - self.tick_label_font.size;
                buffer.text(
                    "tick_labels",
                    TextItem {
                        text: format.format(value),
                        position: point_on_ellipse(cx, cy, label_radius, label_radius, angle),
                        align: TextAlign::Center,
                        baseline: TextBaseline::Middle,
                        color: self.tick_label_paint.clone(),
                    },
                    &self.tick_label_font,
                );
            }
        }
    }

    fn needle_marks(&self, buffer: &mut MarkBuffer, meter_area: &Bounds, value: f64) {
        let (cx, cy) = (meter_area.center_x(), meter_area.center_y());
        let angle = self.value_to_angle(value) as f32;
        let radius = meter_area.width / 2.0;
        let half = CIRCLE_SIZE / 4.0;
        let tip = point_on_ellipse(cx, cy, radius, radius, angle);
        let left = point_on_ellipse(cx, cy, half, half, angle + 90.0);
        let right = point_on_ellipse(cx, cy, half, half, angle - 90.0);
        buffer.path(
            "needle",
            polygon_path(&[left, tip, right], true),
            self.needle_paint.clone(),
            None,
        );
        buffer.symbol(
            "needle_hub",
            SymbolShape::Circle,
            [cx, cy],
            CIRCLE_SIZE,
            self.needle_paint.clone(),
            None,
        );
    }

    fn value_text(&self, value: Option<f64>) -> String {
        match value {
            Some(v) => {
                let format = self
                    .tick_label_format
                    .clone()
                    .unwrap_or_else(|| NumberFormat::for_step(self.tick_size));
                format!("{} {}", format.format(v), self.units)
                    .trim_end()
                    .to_string()
            }
            None => "No data".to_string(),
        }
    }

    pub fn draw(
        &self,
        area: &Bounds,
        mut info: Option<&mut ChartRenderingInfo>,
        _measurer: &dyn TextMeasurer,
    ) -> Result<SceneGroup, ChartwellChartError> {
        self.validate()?;
        let mut group = SceneGroup::new("meter_plot");
        let meter_area = self.meter_area(area);
        if let Some(info) = info.as_deref_mut() {
            info.entities.add(ChartEntity::rect(*area, EntityKind::Plot));
            info.plot_info.plot_area = *area;
            info.plot_info.data_area = meter_area;
        }
        if let Some(background) = self.style.background_mark(area) {
            group.push(background);
        }

        let dial_span = self.dial_span();
        group.push(self.arc(
            "dial_background",
            &meter_area,
            dial_span,
            self.arc_type(true),
            self.dial_background_paint.clone(),
            None,
        ));
        self.interval_marks(&mut group, &meter_area);

        let mut buffer = MarkBuffer::new();
        self.tick_marks(&mut buffer, &meter_area);
        let value = self.dataset.value().filter(|v| v.is_finite());
        match value {
            Some(v) if self.range.contains(v) => self.needle_marks(&mut buffer, &meter_area, v),
            Some(v) => debug!("meter value {v} is outside the dial range"),
            None => {}
        }
        buffer.text(
            "value_label",
            TextItem {
                text: self.value_text(value),
                position: [
                    meter_area.center_x(),
                    meter_area.center_y() + CIRCLE_SIZE + BORDER_SIZE,
                ],
                align: TextAlign::Center,
                baseline: TextBaseline::Top,
                color: self.value_paint.clone(),
            },
            &self.value_font,
        );
        group.extend(buffer.into_marks());

        group.push(self.arc(
            "dial_outline",
            &meter_area,
            dial_span,
            self.arc_type(true),
            ColorOrGradient::transparent(),
            Some((self.dial_outline_paint.clone(), 1.0)),
        ));
        if let Some(outline) = self.style.outline_mark(area) {
            group.push(outline);
        }
        Ok(group)
    }
}
