//! Number formatting for tick labels and item labels.
//!
//! A pattern has the form `[,][.precision][type]`:
//!
//! * `,` groups the integer digits in thousands.
//! * `precision` is the number of digits after the decimal point for `f`, `%`
//!   and `e`, or the number of significant digits for `s`.
//! * `type` is one of
//!   * `f` fixed point (default precision 6)
//!   * `d` rounded to an integer
//!   * `%` multiplied by 100 with a percent sign (default precision 0)
//!   * `e` exponent notation (default precision 6)
//!   * `s` SI prefix (default precision 6 significant digits, trailing zeros trimmed)
//!   * empty for the shortest representation free of floating point noise
//!
//! ```
//! use chartwell_scales::NumberFormat;
//!
//! assert_eq!(NumberFormat::parse(",.2f").unwrap().format(1234.567), "1,234.57");
//! assert_eq!(NumberFormat::parse(".0%").unwrap().format(0.123), "12%");
//! assert_eq!(NumberFormat::parse(".2s").unwrap().format(42e6), "42M");
//! assert_eq!(NumberFormat::default().format(0.1 + 0.2), "0.3");
//! ```

use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ChartwellScaleError;

const PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    Fixed,
    Integer,
    Percent,
    Exponent,
    SiPrefix,
    Shortest,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NumberFormat {
    pattern: String,
    grouping: bool,
    precision: Option<usize>,
    format_type: FormatType,
}

fn pattern_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<comma>,)?(?:\.(?P<precision>\d+))?(?P<type>[fd%es])?$")
            .expect("number format pattern regex")
    })
}

impl NumberFormat {
    pub fn parse(pattern: &str) -> Result<Self, ChartwellScaleError> {
        let caps = pattern_regex()
            .captures(pattern)
            .ok_or_else(|| ChartwellScaleError::InvalidFormat(pattern.to_string()))?;

        let precision = match caps.name("precision") {
            Some(m) => Some(
                m.as_str()
                    .parse::<usize>()
                    .map_err(|_| ChartwellScaleError::InvalidFormat(pattern.to_string()))?,
            ),
            None => None,
        };
        if precision.is_some_and(|p| p > 20) {
            return Err(ChartwellScaleError::InvalidFormat(pattern.to_string()));
        }

        let format_type = match caps.name("type").map(|m| m.as_str()) {
            Some("f") => FormatType::Fixed,
            Some("d") => FormatType::Integer,
            Some("%") => FormatType::Percent,
            Some("e") => FormatType::Exponent,
            Some("s") => FormatType::SiPrefix,
            _ => FormatType::Shortest,
        };

        Ok(Self {
            pattern: pattern.to_string(),
            grouping: caps.name("comma").is_some(),
            precision,
            format_type,
        })
    }

    /// Fixed point format with just enough decimals to distinguish ticks `step` apart
    pub fn for_step(step: f64) -> Self {
        let mut decimals = 0;
        if step.is_finite() && step > 0.0 {
            while decimals < 15 {
                let scaled = step * 10f64.powi(decimals as i32);
                if (scaled - scaled.round()).abs() < 1e-6 * scaled.max(1.0) {
                    break;
                }
                decimals += 1;
            }
        }
        Self {
            pattern: format!(".{decimals}f"),
            grouping: false,
            precision: Some(decimals),
            format_type: FormatType::Fixed,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "∞" } else { "-∞" }.to_string();
        }

        let (body, suffix) = match self.format_type {
            FormatType::Fixed => (format!("{:.*}", self.precision.unwrap_or(6), value), ""),
            FormatType::Integer => (format!("{:.0}", value.round()), ""),
            FormatType::Percent => (
                format!("{:.*}", self.precision.unwrap_or(0), value * 100.0),
                "%",
            ),
            FormatType::Exponent => {
                return format!("{:.*e}", self.precision.unwrap_or(6), value);
            }
            FormatType::SiPrefix => return self.format_si(value),
            FormatType::Shortest => (shortest(value), ""),
        };

        let body = if self.grouping { group_thousands(&body) } else { body };
        format!("{body}{suffix}")
    }

    fn format_si(&self, value: f64) -> String {
        let significant = self.precision.unwrap_or(6).max(1) as i32;
        if value == 0.0 {
            return "0".to_string();
        }
        let exponent = value.abs().log10().floor() as i32;
        // round to the requested significant digits before choosing the prefix
        let decimals = significant - 1 - exponent;
        let factor = 10f64.powi(decimals);
        let rounded = (value * factor).round() / factor;
        let exponent = rounded.abs().log10().floor() as i32;
        let prefix_index = (exponent.div_euclid(3)).clamp(-8, 8);
        let scaled = rounded / 10f64.powi(prefix_index * 3);
        let decimals = (significant - 1 - (exponent - prefix_index * 3)).max(0) as usize;
        let body = trim_zeros(&format!("{scaled:.decimals$}"));
        let body = if self.grouping { group_thousands(&body) } else { body };
        format!("{body}{}", PREFIXES[(prefix_index + 8) as usize])
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            grouping: false,
            precision: None,
            format_type: FormatType::Shortest,
        }
    }
}

impl TryFrom<String> for NumberFormat {
    type Error = ChartwellScaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NumberFormat::parse(&value)
    }
}

impl From<NumberFormat> for String {
    fn from(value: NumberFormat) -> Self {
        value.pattern
    }
}

impl Display for NumberFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

/// Shortest decimal with at most 12 significant digits
fn shortest(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (11 - magnitude).clamp(0, 15) as usize;
    trim_zeros(&format!("{value:.decimals$}"))
}

fn trim_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    format!("{sign}{grouped}{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 0.30000000000000004, "0.3")]
    #[case("", 1500.0, "1500")]
    #[case("", -0.000001, "-0.000001")]
    #[case(",", 1234567.0, "1,234,567")]
    #[case(".2f", 3.14159, "3.14")]
    #[case(",.1f", -98765.43, "-98,765.4")]
    #[case("d", 2.6, "3")]
    #[case(".0%", 0.123, "12%")]
    #[case(".1%", 0.5, "50.0%")]
    #[case(".2e", 12345.0, "1.23e4")]
    #[case(".2s", 42e6, "42M")]
    #[case(".3s", 0.00123, "1.23m")]
    #[case("s", 1000.0, "1k")]
    fn test_format(#[case] pattern: &str, #[case] value: f64, #[case] expected: &str) {
        let format = NumberFormat::parse(pattern).unwrap();
        assert_eq!(format.format(value), expected);
    }

    #[rstest]
    #[case("x")]
    #[case(".f2")]
    #[case("0.00")]
    fn test_invalid_pattern(#[case] pattern: &str) {
        assert!(matches!(
            NumberFormat::parse(pattern),
            Err(ChartwellScaleError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_for_step() {
        assert_eq!(NumberFormat::for_step(0.25).format(1.5), "1.50");
        assert_eq!(NumberFormat::for_step(0.1).format(0.3), "0.3");
        assert_eq!(NumberFormat::for_step(10.0).format(20.0), "20");
    }

    #[test]
    fn test_serde_as_pattern() {
        let format = NumberFormat::parse(",.2f").unwrap();
        assert_eq!(serde_json::to_string(&format).unwrap(), r#"",.2f""#);
        assert!(serde_json::from_str::<NumberFormat>(r#""bogus""#).is_err());
    }
}
