use chartwell_common::layout::{Bounds, RectangleEdge};
use chartwell_common::text::TextMeasurer;
use chartwell_guides::axis::{make_axis_marks, required_space, AxisMarks, AxisMarksConfig};
use chartwell_scales::{BandScale, CategoryMargins};
use serde::{Deserialize, Serialize};

use crate::axis::AxisStyle;
use crate::error::ChartwellChartError;

/// Axis laying out categories as equal bands separated by gaps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryAxis {
    pub label: Option<String>,
    pub lower_margin: f64,
    pub upper_margin: f64,
    pub category_margin: f64,
    pub style: AxisStyle,
}

impl Default for CategoryAxis {
    fn default() -> Self {
        Self {
            label: None,
            lower_margin: 0.05,
            upper_margin: 0.05,
            category_margin: 0.2,
            style: AxisStyle {
                tick_marks_visible: false,
                ..Default::default()
            },
        }
    }
}

impl CategoryAxis {
    pub fn new(label: Option<&str>) -> Self {
        Self {
            label: label.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn with_margins(mut self, lower: f64, upper: f64, category: f64) -> Self {
        self.lower_margin = lower;
        self.upper_margin = upper;
        self.category_margin = category;
        self
    }

    pub fn margins(&self) -> CategoryMargins {
        CategoryMargins {
            lower: self.lower_margin,
            upper: self.upper_margin,
            category: self.category_margin,
        }
    }

    /// Band scale over `count` anonymous categories
    pub fn scale(
        &self,
        count: usize,
        area: &Bounds,
        edge: RectangleEdge,
    ) -> Result<BandScale, ChartwellChartError> {
        let keys = (0..count).map(|i| i.to_string()).collect();
        let range = if edge.is_top_or_bottom() {
            (area.min_x() as f64, area.max_x() as f64)
        } else {
            (area.min_y() as f64, area.max_y() as f64)
        };
        Ok(BandScale::try_new(keys)?
            .with_range(range)
            .with_margins(self.margins()))
    }

    fn check_index(index: usize, count: usize) -> Result<(), ChartwellChartError> {
        if index >= count {
            return Err(ChartwellChartError::IndexOutOfBounds { index, len: count });
        }
        Ok(())
    }

    pub fn category_start(
        &self,
        index: usize,
        count: usize,
        area: &Bounds,
        edge: RectangleEdge,
    ) -> Result<f32, ChartwellChartError> {
        Self::check_index(index, count)?;
        Ok(self.scale(count, area, edge)?.start(index) as f32)
    }

    pub fn category_middle(
        &self,
        index: usize,
        count: usize,
        area: &Bounds,
        edge: RectangleEdge,
    ) -> Result<f32, ChartwellChartError> {
        Self::check_index(index, count)?;
        Ok(self.scale(count, area, edge)?.middle(index) as f32)
    }

    pub fn category_end(
        &self,
        index: usize,
        count: usize,
        area: &Bounds,
        edge: RectangleEdge,
    ) -> Result<f32, ChartwellChartError> {
        Self::check_index(index, count)?;
        Ok(self.scale(count, area, edge)?.end(index) as f32)
    }

    fn marks_config(
        &self,
        keys: &[String],
        area: &Bounds,
        edge: RectangleEdge,
    ) -> Result<AxisMarksConfig, ChartwellChartError> {
        let positions = if keys.is_empty() {
            vec![]
        } else {
            let scale = self.scale(keys.len(), area, edge)?;
            (0..keys.len()).map(|i| scale.middle(i) as f32).collect()
        };
        Ok(self
            .style
            .marks_config(edge, area, self.label.as_deref(), positions, keys.to_vec()))
    }

    pub fn reserve_space(
        &self,
        keys: &[String],
        area: &Bounds,
        edge: RectangleEdge,
        measurer: &dyn TextMeasurer,
    ) -> Result<f32, ChartwellChartError> {
        if !self.style.visible {
            return Ok(0.0);
        }
        Ok(required_space(&self.marks_config(keys, area, edge)?, measurer))
    }

    /// Category labels centred on their bands, `None` when hidden
    pub fn draw(
        &self,
        keys: &[String],
        area: &Bounds,
        edge: RectangleEdge,
        measurer: &dyn TextMeasurer,
    ) -> Result<Option<AxisMarks>, ChartwellChartError> {
        if !self.style.visible {
            return Ok(None);
        }
        let config = self.marks_config(keys, area, edge)?;
        Ok(Some(make_axis_marks(&config, measurer)?))
    }
}
