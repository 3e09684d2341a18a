//! Numeric, logarithmic and date axes.

use chartwell_common::layout::{Bounds, RectangleEdge};
use chartwell_common::range::Range;
use chartwell_common::text::TextMeasurer;
use chartwell_guides::axis::{make_axis_marks, required_space, AxisMarks, AxisMarksConfig};
use chartwell_scales::array::tick_step;
use chartwell_scales::numeric::ContinuousNumericScale;
use chartwell_scales::{
    date_ticks, DateFormat, LinearNumericScale, LogNumericScale, NumberFormat, NumericScale,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::{axis_length, AxisStyle};
use crate::error::ChartwellChartError;

const HORIZONTAL_PIXELS_PER_TICK: f32 = 80.0;
const VERTICAL_PIXELS_PER_TICK: f32 = 40.0;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueAxisKind {
    #[default]
    Number,
    Log {
        base: f64,
    },
    /// Values are milliseconds since the Unix epoch
    Date {
        format: Option<DateFormat>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// Axis mapping a continuous range of values onto one side of the data area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueAxis {
    pub label: Option<String>,
    pub kind: ValueAxisKind,
    /// Current range, recomputed from the data when `auto_range` is set
    pub range: Range,
    pub auto_range: bool,
    pub auto_range_include_zero: bool,
    pub auto_range_sticky_zero: bool,
    pub auto_range_minimum_size: f64,
    pub lower_margin: f64,
    pub upper_margin: f64,
    pub inverted: bool,
    pub tick_count: Option<usize>,
    pub tick_label_format: Option<NumberFormat>,
    pub style: AxisStyle,
}

impl Default for ValueAxis {
    fn default() -> Self {
        Self {
            label: None,
            kind: ValueAxisKind::Number,
            range: Range::default(),
            auto_range: true,
            auto_range_include_zero: true,
            auto_range_sticky_zero: true,
            auto_range_minimum_size: 1e-8,
            lower_margin: 0.05,
            upper_margin: 0.05,
            inverted: false,
            tick_count: None,
            tick_label_format: None,
            style: AxisStyle::default(),
        }
    }
}

impl ValueAxis {
    pub fn new(label: Option<&str>) -> Self {
        Self {
            label: label.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn log(label: Option<&str>) -> Self {
        Self {
            kind: ValueAxisKind::Log { base: 10.0 },
            auto_range_include_zero: false,
            range: Range::try_new(1.0, 10.0).unwrap_or_default(),
            ..Self::new(label)
        }
    }

    pub fn date(label: Option<&str>) -> Self {
        Self {
            kind: ValueAxisKind::Date { format: None },
            auto_range_include_zero: false,
            ..Self::new(label)
        }
    }

    pub fn with_kind(mut self, kind: ValueAxisKind) -> Self {
        self.kind = kind;
        self
    }

    /// Fixes the range and turns auto range off
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self.auto_range = false;
        self
    }

    pub fn with_auto_range_include_zero(mut self, include_zero: bool) -> Self {
        self.auto_range_include_zero = include_zero;
        self
    }

    pub fn with_auto_range_minimum_size(
        mut self,
        size: f64,
    ) -> Result<Self, ChartwellChartError> {
        if !(size > 0.0) {
            return Err(ChartwellChartError::InvalidArgument(format!(
                "auto range minimum size must be positive, got {size}"
            )));
        }
        self.auto_range_minimum_size = size;
        Ok(self)
    }

    pub fn with_margins(mut self, lower: f64, upper: f64) -> Self {
        self.lower_margin = lower;
        self.upper_margin = upper;
        self
    }

    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn with_tick_count(mut self, count: Option<usize>) -> Self {
        self.tick_count = count;
        self
    }

    pub fn with_tick_label_format(mut self, format: Option<NumberFormat>) -> Self {
        self.tick_label_format = format;
        self
    }

    pub fn is_log(&self) -> bool {
        matches!(self.kind, ValueAxisKind::Log { .. })
    }

    pub fn is_date(&self) -> bool {
        matches!(self.kind, ValueAxisKind::Date { .. })
    }

    fn pixel_range(&self, area: &Bounds, edge: RectangleEdge) -> (f64, f64) {
        let (start, end) = if edge.is_top_or_bottom() {
            (area.min_x() as f64, area.max_x() as f64)
        } else {
            (area.max_y() as f64, area.min_y() as f64)
        };
        if self.inverted {
            (end, start)
        } else {
            (start, end)
        }
    }

    /// Scale from the current range onto the side of `area` given by `edge`
    pub fn scale(
        &self,
        area: &Bounds,
        edge: RectangleEdge,
    ) -> Result<NumericScale, ChartwellChartError> {
        let domain = (self.range.lower(), self.range.upper());
        let range = self.pixel_range(area, edge);
        Ok(match self.kind {
            ValueAxisKind::Log { base } => LogNumericScale::try_new(domain, range)?
                .with_base(base)?
                .into(),
            _ => LinearNumericScale::new(domain, range).into(),
        })
    }

    /// Screen coordinate of `value`, NaN when it cannot be placed on the axis
    pub fn value_to_java2d(&self, value: f64, area: &Bounds, edge: RectangleEdge) -> f32 {
        match self.scale(area, edge) {
            Ok(scale) => scale.scale(value) as f32,
            Err(_) => f32::NAN,
        }
    }

    pub fn java2d_to_value(&self, coordinate: f32, area: &Bounds, edge: RectangleEdge) -> f64 {
        match self.scale(area, edge) {
            Ok(scale) => scale.invert(coordinate as f64),
            Err(_) => f64::NAN,
        }
    }

    /// Screen length of a span of `length` data units
    pub fn length_to_java2d(&self, length: f64, area: &Bounds, edge: RectangleEdge) -> f32 {
        let zero = self.value_to_java2d(0.0, area, edge);
        let l = self.value_to_java2d(length, area, edge);
        (l - zero).abs()
    }

    /// Recomputes the range from the data bounds when auto range is on
    pub fn configure(&mut self, data_range: Option<Range>) {
        if !self.auto_range {
            return;
        }
        self.range = match self.kind {
            ValueAxisKind::Log { base } => self.auto_log_range(data_range, base),
            _ => self.auto_linear_range(data_range),
        };
        debug!(
            "configured axis {:?} to [{}, {}]",
            self.label,
            self.range.lower(),
            self.range.upper()
        );
    }

    fn auto_linear_range(&self, data_range: Option<Range>) -> Range {
        let Some(data_range) = data_range else {
            return Range::default();
        };
        let mut lower = data_range.lower();
        let mut upper = data_range.upper();
        if self.auto_range_include_zero && !self.is_date() {
            lower = lower.min(0.0);
            upper = upper.max(0.0);
        }
        let length = upper - lower;
        if length < self.auto_range_minimum_size {
            let expand = (self.auto_range_minimum_size - length) / 2.0;
            lower -= expand;
            upper += expand;
        }
        let length = upper - lower;
        let sticky = self.auto_range_include_zero && self.auto_range_sticky_zero;
        if sticky && upper <= 0.0 {
            upper = (upper + self.upper_margin * length).min(0.0);
        } else {
            upper += self.upper_margin * length;
        }
        if sticky && lower >= 0.0 {
            lower = (lower - self.lower_margin * length).max(0.0);
        } else {
            lower -= self.lower_margin * length;
        }
        Range::try_new(lower, upper).unwrap_or_default()
    }

    fn auto_log_range(&self, data_range: Option<Range>, base: f64) -> Range {
        let Some(data_range) = data_range else {
            return Range::try_new(1.0, base).unwrap_or_default();
        };
        let upper = data_range.upper().max(f64::MIN_POSITIVE);
        let lower = if data_range.lower() > 0.0 {
            data_range.lower()
        } else if upper > 1.0 {
            1.0
        } else {
            upper / base
        };
        let log = |v: f64| v.ln() / base.ln();
        let mut log_lower = log(lower);
        let mut log_upper = log(upper);
        let log_length = log_upper - log_lower;
        if log_length < self.auto_range_minimum_size {
            log_lower -= 0.5;
            log_upper += 0.5;
        } else {
            log_upper += self.upper_margin * log_length;
            log_lower -= self.lower_margin * log_length;
        }
        Range::try_new(base.powf(log_lower), base.powf(log_upper)).unwrap_or_default()
    }

    fn default_tick_count(&self, area: &Bounds, edge: RectangleEdge) -> usize {
        self.tick_count.unwrap_or_else(|| {
            let per_tick = if edge.is_top_or_bottom() {
                HORIZONTAL_PIXELS_PER_TICK
            } else {
                VERTICAL_PIXELS_PER_TICK
            };
            ((axis_length(area, edge) / per_tick).floor() as usize).max(2)
        })
    }

    /// Tick values inside the current range with their labels
    pub fn refresh_ticks(
        &self,
        area: &Bounds,
        edge: RectangleEdge,
    ) -> Result<Vec<Tick>, ChartwellChartError> {
        let count = self.default_tick_count(area, edge);
        let (lower, upper) = (self.range.lower(), self.range.upper());
        match &self.kind {
            ValueAxisKind::Number => {
                let scale = LinearNumericScale::new((lower, upper), (0.0, 1.0));
                let format = self.tick_label_format.clone().unwrap_or_else(|| {
                    NumberFormat::for_step(tick_step(lower, upper, count as f64))
                });
                Ok(scale
                    .ticks(Some(count))
                    .into_iter()
                    .map(|value| Tick {
                        value,
                        label: format.format(value),
                    })
                    .collect())
            }
            ValueAxisKind::Log { base } => {
                let scale = LogNumericScale::try_new((lower, upper), (0.0, 1.0))?.with_base(*base)?;
                let format = self.tick_label_format.clone().unwrap_or_default();
                Ok(scale
                    .ticks(Some(count))
                    .into_iter()
                    .map(|value| {
                        let exponent = scale.log(value);
                        // only powers of the base are labelled
                        let label = if (exponent - exponent.round()).abs() < 1e-9 {
                            format.format(value)
                        } else {
                            String::new()
                        };
                        Tick { value, label }
                    })
                    .collect())
            }
            ValueAxisKind::Date { format } => {
                let (ticks, unit) = date_ticks(lower as i64, upper as i64, count)?;
                let format = format.clone().unwrap_or_else(|| unit.default_format());
                ticks
                    .into_iter()
                    .map(|t| -> Result<Tick, ChartwellChartError> {
                        Ok(Tick {
                            value: t as f64,
                            label: format.format(t)?,
                        })
                    })
                    .collect()
            }
        }
    }

    fn marks_config(
        &self,
        area: &Bounds,
        edge: RectangleEdge,
        ticks: &[Tick],
    ) -> Result<AxisMarksConfig, ChartwellChartError> {
        let scale = self.scale(area, edge)?;
        let positions = ticks.iter().map(|t| scale.scale(t.value) as f32).collect();
        let labels = ticks.iter().map(|t| t.label.clone()).collect();
        Ok(self
            .style
            .marks_config(edge, area, self.label.as_deref(), positions, labels))
    }

    /// Space the axis needs outside the data area
    pub fn reserve_space(
        &self,
        area: &Bounds,
        edge: RectangleEdge,
        measurer: &dyn TextMeasurer,
    ) -> Result<f32, ChartwellChartError> {
        if !self.style.visible {
            return Ok(0.0);
        }
        let ticks = self.refresh_ticks(area, edge)?;
        Ok(required_space(&self.marks_config(area, edge, &ticks)?, measurer))
    }

    /// Axis marks along `edge` of the data area, `None` when hidden
    pub fn draw(
        &self,
        area: &Bounds,
        edge: RectangleEdge,
        measurer: &dyn TextMeasurer,
    ) -> Result<Option<AxisMarks>, ChartwellChartError> {
        if !self.style.visible {
            return Ok(None);
        }
        let ticks = self.refresh_ticks(area, edge)?;
        let config = self.marks_config(area, edge, &ticks)?;
        Ok(Some(make_axis_marks(&config, measurer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn area() -> Bounds {
        Bounds::new(50.0, 20.0, 400.0, 200.0)
    }

    #[test]
    fn test_value_to_java2d_by_edge() {
        let axis = ValueAxis::new(None).with_range(Range::try_new(0.0, 10.0).unwrap());
        assert_approx_eq!(f32, axis.value_to_java2d(0.0, &area(), RectangleEdge::Bottom), 50.0);
        assert_approx_eq!(f32, axis.value_to_java2d(10.0, &area(), RectangleEdge::Bottom), 450.0);
        // vertical axes grow upward
        assert_approx_eq!(f32, axis.value_to_java2d(0.0, &area(), RectangleEdge::Left), 220.0);
        assert_approx_eq!(f32, axis.value_to_java2d(10.0, &area(), RectangleEdge::Left), 20.0);

        let inverted = axis.clone().with_inverted(true);
        assert_approx_eq!(f32, inverted.value_to_java2d(0.0, &area(), RectangleEdge::Left), 20.0);

        let v = axis.java2d_to_value(250.0, &area(), RectangleEdge::Bottom);
        assert_approx_eq!(f64, v, 5.0, epsilon = 1e-5);
        assert_approx_eq!(f32, axis.length_to_java2d(2.5, &area(), RectangleEdge::Left), 50.0);
    }

    #[test]
    fn test_auto_range_margins_and_zero() {
        let mut axis = ValueAxis::new(None);
        axis.configure(Some(Range::try_new(10.0, 20.0).unwrap()));
        // zero included, then 5% margins on a length of 20, lower sticks to zero
        assert_approx_eq!(f64, axis.range.lower(), 0.0);
        assert_approx_eq!(f64, axis.range.upper(), 21.0);

        let mut axis = ValueAxis::new(None).with_auto_range_include_zero(false);
        axis.configure(Some(Range::try_new(10.0, 20.0).unwrap()));
        assert_approx_eq!(f64, axis.range.lower(), 9.5);
        assert_approx_eq!(f64, axis.range.upper(), 20.5);

        let mut axis = ValueAxis::new(None);
        axis.configure(None);
        assert_eq!(axis.range, Range::default());
    }

    #[test]
    fn test_auto_range_minimum_size() {
        let mut axis = ValueAxis::new(None)
            .with_auto_range_include_zero(false)
            .with_auto_range_minimum_size(2.0)
            .unwrap()
            .with_margins(0.0, 0.0);
        axis.configure(Some(Range::try_new(5.0, 5.0).unwrap()));
        assert_approx_eq!(f64, axis.range.lower(), 4.0);
        assert_approx_eq!(f64, axis.range.upper(), 6.0);
        assert!(ValueAxis::new(None).with_auto_range_minimum_size(0.0).is_err());
    }

    #[test]
    fn test_fixed_range_ignores_data() {
        let mut axis = ValueAxis::new(None).with_range(Range::try_new(-1.0, 1.0).unwrap());
        axis.configure(Some(Range::try_new(10.0, 20.0).unwrap()));
        assert_eq!(axis.range, Range::try_new(-1.0, 1.0).unwrap());
    }

    #[test]
    fn test_number_ticks() {
        let axis = ValueAxis::new(None).with_range(Range::try_new(0.0, 100.0).unwrap());
        let ticks = axis
            .with_tick_count(Some(5))
            .refresh_ticks(&area(), RectangleEdge::Left)
            .unwrap();
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "20", "40", "60", "80", "100"]);
    }

    #[test]
    fn test_log_axis() {
        let mut axis = ValueAxis::log(None).with_margins(0.0, 0.0);
        axis.configure(Some(Range::try_new(1.0, 1000.0).unwrap()));
        assert_approx_eq!(f64, axis.range.upper(), 1000.0, epsilon = 1e-9);
        let y = axis.value_to_java2d(10.0, &area(), RectangleEdge::Bottom);
        assert_approx_eq!(f32, y, 50.0 + 400.0 / 3.0, epsilon = 1e-3);

        let axis = axis.with_range(Range::try_new(1.0, 1000.0).unwrap());
        let ticks = axis.refresh_ticks(&area(), RectangleEdge::Bottom).unwrap();
        let labelled: Vec<&str> = ticks
            .iter()
            .filter(|t| !t.label.is_empty())
            .map(|t| t.label.as_str())
            .collect();
        assert_eq!(labelled, vec!["1", "10", "100", "1000"]);

        // nonpositive data falls back to a positive lower bound
        let mut axis = ValueAxis::log(None);
        axis.configure(Some(Range::try_new(-5.0, 100.0).unwrap()));
        assert!(axis.range.lower() > 0.0);
    }

    #[test]
    fn test_date_ticks() {
        // 2024-01-01 to 2024-01-05 UTC
        let axis = ValueAxis::date(None)
            .with_range(Range::try_new(1_704_067_200_000.0, 1_704_412_800_000.0).unwrap())
            .with_tick_count(Some(4));
        let ticks = axis.refresh_ticks(&area(), RectangleEdge::Bottom).unwrap();
        assert_eq!(ticks[0].label, "01-Jan");
        assert_eq!(ticks.len(), 5);
    }

    #[test]
    fn test_hidden_axis_takes_no_space() {
        let mut axis = ValueAxis::new(Some("Value"));
        let measurer = chartwell_common::text::default_text_measurer();
        assert!(axis.reserve_space(&area(), RectangleEdge::Left, &measurer).unwrap() > 0.0);
        axis.style.visible = false;
        assert_eq!(axis.reserve_space(&area(), RectangleEdge::Left, &measurer).unwrap(), 0.0);
        assert!(axis.draw(&area(), RectangleEdge::Left, &measurer).unwrap().is_none());
    }
}
