//! Date axis support: timestamps are milliseconds since the Unix epoch, UTC.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChartwellScaleError;

const SECOND: i64 = 1000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// `strftime` style date pattern, validated on construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateFormat {
    pattern: String,
}

impl DateFormat {
    pub fn parse(pattern: &str) -> Result<Self, ChartwellScaleError> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(ChartwellScaleError::InvalidDatePattern(pattern.to_string()));
        }
        Ok(Self {
            pattern: pattern.to_string(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, millis: i64) -> Result<String, ChartwellScaleError> {
        let dt = DateTime::from_timestamp_millis(millis)
            .ok_or(ChartwellScaleError::TimestampOutOfRange(millis))?;
        Ok(dt.format(&self.pattern).to_string())
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: "%Y-%m-%d".to_string(),
        }
    }
}

impl TryFrom<String> for DateFormat {
    type Error = ChartwellScaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DateFormat::parse(&value)
    }
}

impl From<DateFormat> for String {
    fn from(value: DateFormat) -> Self {
        value.pattern
    }
}

/// Spacing between date ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateTickUnit {
    Second(u32),
    Minute(u32),
    Hour(u32),
    Day(u32),
    Month(u32),
    Year(u32),
}

const STANDARD_UNITS: [DateTickUnit; 27] = [
    DateTickUnit::Second(1),
    DateTickUnit::Second(5),
    DateTickUnit::Second(10),
    DateTickUnit::Second(30),
    DateTickUnit::Minute(1),
    DateTickUnit::Minute(2),
    DateTickUnit::Minute(5),
    DateTickUnit::Minute(10),
    DateTickUnit::Minute(15),
    DateTickUnit::Minute(30),
    DateTickUnit::Hour(1),
    DateTickUnit::Hour(2),
    DateTickUnit::Hour(4),
    DateTickUnit::Hour(6),
    DateTickUnit::Hour(12),
    DateTickUnit::Day(1),
    DateTickUnit::Day(2),
    DateTickUnit::Day(7),
    DateTickUnit::Day(15),
    DateTickUnit::Month(1),
    DateTickUnit::Month(2),
    DateTickUnit::Month(3),
    DateTickUnit::Month(6),
    DateTickUnit::Year(1),
    DateTickUnit::Year(2),
    DateTickUnit::Year(5),
    DateTickUnit::Year(10),
];

impl DateTickUnit {
    /// Nominal length of one step; months count as 30 days and years as 365
    pub fn approx_millis(&self) -> i64 {
        match *self {
            DateTickUnit::Second(n) => n as i64 * SECOND,
            DateTickUnit::Minute(n) => n as i64 * MINUTE,
            DateTickUnit::Hour(n) => n as i64 * HOUR,
            DateTickUnit::Day(n) => n as i64 * DAY,
            DateTickUnit::Month(n) => n as i64 * 30 * DAY,
            DateTickUnit::Year(n) => n as i64 * 365 * DAY,
        }
    }

    pub fn default_format(&self) -> DateFormat {
        let pattern = match self {
            DateTickUnit::Second(_) => "%H:%M:%S",
            DateTickUnit::Minute(_) | DateTickUnit::Hour(_) => "%H:%M",
            DateTickUnit::Day(_) => "%d-%b",
            DateTickUnit::Month(_) => "%b-%Y",
            DateTickUnit::Year(_) => "%Y",
        };
        DateFormat {
            pattern: pattern.to_string(),
        }
    }

    /// Smallest standard unit giving at most `count` ticks over `span` ms
    pub fn select(span: i64, count: usize) -> DateTickUnit {
        let count = count.max(1) as i64;
        STANDARD_UNITS
            .iter()
            .copied()
            .find(|unit| span / unit.approx_millis() <= count)
            .unwrap_or_else(|| {
                let years = (span / (365 * DAY) / count).max(1);
                let magnitude = 10i64.pow((years as f64).log10().ceil() as u32);
                DateTickUnit::Year(magnitude as u32)
            })
    }
}

/// Tick timestamps within `[start_ms, end_ms]` aligned to calendar boundaries
pub fn date_ticks(
    start_ms: i64,
    end_ms: i64,
    count: usize,
) -> Result<(Vec<i64>, DateTickUnit), ChartwellScaleError> {
    let (start_ms, end_ms) = (start_ms.min(end_ms), start_ms.max(end_ms));
    let unit = DateTickUnit::select(end_ms - start_ms, count);
    let start = DateTime::from_timestamp_millis(start_ms)
        .ok_or(ChartwellScaleError::TimestampOutOfRange(start_ms))?;

    let mut ticks = Vec::new();
    match unit {
        DateTickUnit::Second(_)
        | DateTickUnit::Minute(_)
        | DateTickUnit::Hour(_)
        | DateTickUnit::Day(_) => {
            let step = unit.approx_millis();
            let mut t = start_ms.div_euclid(step) * step;
            if t < start_ms {
                t += step;
            }
            while t <= end_ms {
                ticks.push(t);
                t += step;
            }
        }
        DateTickUnit::Month(n) => {
            let month0 = start.month0() / n * n;
            let mut date = first_of_month(start.year(), month0 + 1, start_ms)?;
            while let Some(t) = date_millis(date) {
                if t > end_ms {
                    break;
                }
                if t >= start_ms {
                    ticks.push(t);
                }
                date = match date.checked_add_months(Months::new(n)) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
        DateTickUnit::Year(n) => {
            let n = n as i32;
            let mut year = start.year().div_euclid(n) * n;
            loop {
                let date = first_of_month(year, 1, start_ms)?;
                let Some(t) = date_millis(date) else { break };
                if t > end_ms {
                    break;
                }
                if t >= start_ms {
                    ticks.push(t);
                }
                year += n;
            }
        }
    }
    Ok((ticks, unit))
}

fn first_of_month(year: i32, month: u32, millis: i64) -> Result<NaiveDate, ChartwellScaleError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(ChartwellScaleError::TimestampOutOfRange(millis))
}

fn date_millis(date: NaiveDate) -> Option<i64> {
    let dt = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&dt).timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(y: i32, m: u32, d: u32) -> i64 {
        date_millis(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(DateFormat::parse("%Y-%Q").is_err());
        assert_eq!(
            DateFormat::parse("%d %b %Y").unwrap().format(ms(2024, 3, 5)).unwrap(),
            "05 Mar 2024"
        );
    }

    #[test]
    fn test_unit_selection() {
        assert_eq!(DateTickUnit::select(10 * MINUTE, 10), DateTickUnit::Minute(1));
        assert_eq!(DateTickUnit::select(20 * DAY, 10), DateTickUnit::Day(2));
        assert_eq!(DateTickUnit::select(3 * 365 * DAY, 10), DateTickUnit::Month(6));
    }

    #[test]
    fn test_month_ticks_start_on_first_of_month() {
        let (ticks, unit) = date_ticks(ms(2024, 1, 15), ms(2024, 12, 20), 12).unwrap();
        assert_eq!(unit, DateTickUnit::Month(1));
        assert_eq!(ticks.first(), Some(&ms(2024, 2, 1)));
        assert_eq!(ticks.last(), Some(&ms(2024, 12, 1)));
        assert_eq!(ticks.len(), 11);
    }

    #[test]
    fn test_day_ticks_aligned_to_midnight() {
        let start = ms(2024, 5, 1) + 5 * HOUR;
        let (ticks, unit) = date_ticks(start, start + 4 * DAY, 5).unwrap();
        assert_eq!(unit, DateTickUnit::Day(1));
        assert_eq!(ticks[0], ms(2024, 5, 2));
        assert_eq!(ticks.len(), 4);
    }

    #[test]
    fn test_year_ticks() {
        let (ticks, unit) = date_ticks(ms(2001, 6, 1), ms(2019, 6, 1), 5).unwrap();
        assert_eq!(unit, DateTickUnit::Year(5));
        assert_eq!(ticks, vec![ms(2005, 1, 1), ms(2010, 1, 1), ms(2015, 1, 1)]);
    }
}
