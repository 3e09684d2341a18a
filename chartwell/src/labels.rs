//! Tooltip and item label text built from `{n}` templates.
//!
//! Each generator fills an argument list for an item and substitutes it into
//! its template. Placeholders without a matching argument are left untouched.
//!
//! | generator  | `{0}`      | `{1}`      | `{2}`   | `{3}`   | `{4}` | `{5}` |
//! |------------|------------|------------|---------|---------|-------|-------|
//! | XY         | series key | x          | y       |         |       |       |
//! | category   | row key    | column key | value   | percent | start | end   |
//! | pie        | key        | value      | percent |         |       |       |

use std::sync::OnceLock;

use chartwell_data::dataset_utils::calculate_pie_total;
use chartwell_data::traits::{PieDataset, XYDataset};
use chartwell_data::CategoryDatasetKind;
use chartwell_scales::{DateFormat, NumberFormat};
use regex::Regex;
use serde::{Deserialize, Serialize};

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{(\d+)\}").expect("placeholder regex"))
}

/// Substitutes `{n}` with `args[n]`
pub fn format_template(template: &str, args: &[String]) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &regex::Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn format_number(format: &NumberFormat, value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format.format(v),
        _ => "null".to_string(),
    }
}

fn format_date(format: &DateFormat, fallback: &NumberFormat, value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format
            .format(v as i64)
            .unwrap_or_else(|_| fallback.format(v)),
        _ => "null".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XYLabelGenerator {
    pub template: String,
    pub x_format: NumberFormat,
    pub y_format: NumberFormat,
    /// Formats x as a date when set
    pub x_date_format: Option<DateFormat>,
}

impl Default for XYLabelGenerator {
    fn default() -> Self {
        Self::standard_tooltip()
    }
}

impl XYLabelGenerator {
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
            x_format: NumberFormat::default(),
            y_format: NumberFormat::default(),
            x_date_format: None,
        }
    }

    pub fn standard_tooltip() -> Self {
        Self::new("{0}: ({1}, {2})")
    }

    pub fn standard_item_label() -> Self {
        Self::new("{2}")
    }

    /// Tooltip for time series, with x shown as a date
    pub fn time_series_tooltip() -> Self {
        Self {
            x_date_format: Some(DateFormat::parse("%d-%b-%Y").unwrap_or_default()),
            y_format: NumberFormat::parse(",.2f").unwrap_or_default(),
            ..Self::new("{0}: ({1}, {2})")
        }
    }

    pub fn with_x_format(mut self, format: NumberFormat) -> Self {
        self.x_format = format;
        self
    }

    pub fn with_y_format(mut self, format: NumberFormat) -> Self {
        self.y_format = format;
        self
    }

    pub fn with_x_date_format(mut self, format: Option<DateFormat>) -> Self {
        self.x_date_format = format;
        self
    }

    pub fn arguments(&self, dataset: &dyn XYDataset, series: usize, item: usize) -> Vec<String> {
        let key = dataset.series_key(series).unwrap_or_default().to_string();
        let x = Some(dataset.x(series, item));
        let x = match &self.x_date_format {
            Some(date_format) => format_date(date_format, &self.x_format, x),
            None => format_number(&self.x_format, x),
        };
        let y = format_number(&self.y_format, Some(dataset.y(series, item)));
        vec![key, x, y]
    }

    pub fn generate(&self, dataset: &dyn XYDataset, series: usize, item: usize) -> String {
        format_template(&self.template, &self.arguments(dataset, series, item))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryLabelGenerator {
    pub template: String,
    pub number_format: NumberFormat,
    pub percent_format: NumberFormat,
    /// Formats interval start and end as dates when set
    pub date_format: Option<DateFormat>,
}

impl Default for CategoryLabelGenerator {
    fn default() -> Self {
        Self::standard_tooltip()
    }
}

impl CategoryLabelGenerator {
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
            number_format: NumberFormat::default(),
            percent_format: NumberFormat::parse(".0%").unwrap_or_default(),
            date_format: None,
        }
    }

    pub fn standard_tooltip() -> Self {
        Self::new("({0}, {1}) = {2}")
    }

    pub fn standard_item_label() -> Self {
        Self::new("{2}")
    }

    /// Tooltip showing the start and end of an interval, such as a Gantt task
    pub fn interval_tooltip() -> Self {
        Self {
            date_format: Some(DateFormat::default()),
            ..Self::new("({0}, {1}) = {4} - {5}")
        }
    }

    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    pub fn with_date_format(mut self, format: Option<DateFormat>) -> Self {
        self.date_format = format;
        self
    }

    fn interval(
        dataset: &CategoryDatasetKind,
        row: usize,
        column: usize,
    ) -> (Option<f64>, Option<f64>) {
        if let Some(gantt) = dataset.as_gantt() {
            return (gantt.start_value(row, column), gantt.end_value(row, column));
        }
        if let Some(stat) = dataset.as_statistical() {
            let mean = stat.mean_value(row, column);
            let sd = stat.std_dev_value(row, column).unwrap_or(0.0);
            return (mean.map(|m| m - sd), mean.map(|m| m + sd));
        }
        if let Some(item) = dataset
            .as_box_and_whisker()
            .and_then(|bw| bw.item(row, column))
        {
            return (Some(item.q1), Some(item.q3));
        }
        let value = dataset.as_category().value(row, column);
        (value, value)
    }

    pub fn arguments(
        &self,
        dataset: &CategoryDatasetKind,
        row: usize,
        column: usize,
    ) -> Vec<String> {
        let data = dataset.as_category();
        let value = data.value(row, column);
        let column_total: f64 = (0..data.row_count())
            .filter_map(|r| data.value(r, column))
            .sum();
        let percent = value.map(|v| if column_total == 0.0 { 0.0 } else { v / column_total });
        let (start, end) = Self::interval(dataset, row, column);
        let format_bound = |v: Option<f64>| match &self.date_format {
            Some(date_format) => format_date(date_format, &self.number_format, v),
            None => format_number(&self.number_format, v),
        };
        vec![
            data.row_key(row).unwrap_or_default().to_string(),
            data.column_key(column).unwrap_or_default().to_string(),
            format_number(&self.number_format, value),
            format_number(&self.percent_format, percent),
            format_bound(start),
            format_bound(end),
        ]
    }

    pub fn generate(&self, dataset: &CategoryDatasetKind, row: usize, column: usize) -> String {
        format_template(&self.template, &self.arguments(dataset, row, column))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieLabelGenerator {
    pub template: String,
    pub number_format: NumberFormat,
    pub percent_format: NumberFormat,
}

impl Default for PieLabelGenerator {
    fn default() -> Self {
        Self::standard_tooltip()
    }
}

impl PieLabelGenerator {
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
            number_format: NumberFormat::default(),
            percent_format: NumberFormat::parse(".0%").unwrap_or_default(),
        }
    }

    pub fn standard_tooltip() -> Self {
        Self::new("{0}: ({1}, {2})")
    }

    pub fn standard_section_label() -> Self {
        Self::new("{0}")
    }

    pub fn arguments(&self, dataset: &dyn PieDataset, index: usize) -> Vec<String> {
        let total = calculate_pie_total(dataset);
        let value = dataset.value(index);
        let percent = value.map(|v| if total > 0.0 { v / total } else { 0.0 });
        vec![
            dataset.key(index).unwrap_or_default().to_string(),
            format_number(&self.number_format, value),
            format_number(&self.percent_format, percent),
        ]
    }

    pub fn generate(&self, dataset: &dyn PieDataset, index: usize) -> String {
        format_template(&self.template, &self.arguments(dataset, index))
    }
}
