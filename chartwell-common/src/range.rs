use serde::{Deserialize, Serialize};

use crate::error::ChartwellCommonError;

/// Closed interval of data values, `lower <= upper`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeRepr")]
pub struct Range {
    lower: f64,
    upper: f64,
}

#[derive(Deserialize)]
struct RangeRepr {
    lower: f64,
    upper: f64,
}

impl TryFrom<RangeRepr> for Range {
    type Error = ChartwellCommonError;

    fn try_from(value: RangeRepr) -> Result<Self, Self::Error> {
        Range::try_new(value.lower, value.upper)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
        }
    }
}

impl Range {
    pub fn try_new(lower: f64, upper: f64) -> Result<Self, ChartwellCommonError> {
        if lower.is_nan() || upper.is_nan() {
            return Err(ChartwellCommonError::NaNRangeBound);
        }
        if lower > upper {
            return Err(ChartwellCommonError::InvalidRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Builds a range from two values in any order
    pub fn spanning(a: f64, b: f64) -> Result<Self, ChartwellCommonError> {
        Self::try_new(a.min(b), a.max(b))
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn length(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn central_value(&self) -> f64 {
        self.lower / 2.0 + self.upper / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    pub fn intersects(&self, lower: f64, upper: f64) -> bool {
        if lower <= self.lower {
            upper > self.lower
        } else {
            lower < self.upper && upper >= lower
        }
    }

    /// Closest value to `value` that lies within the range
    pub fn constrain(&self, value: f64) -> f64 {
        if self.contains(value) {
            value
        } else if value > self.upper {
            self.upper
        } else if value < self.lower {
            self.lower
        } else {
            // NaN
            value
        }
    }

    /// Smallest range covering both arguments; `None` only if both are `None`
    pub fn combine(a: Option<Range>, b: Option<Range>) -> Option<Range> {
        match (a, b) {
            (None, None) => None,
            (Some(r), None) | (None, Some(r)) => Some(r),
            (Some(a), Some(b)) => Some(Range {
                lower: a.lower.min(b.lower),
                upper: a.upper.max(b.upper),
            }),
        }
    }

    pub fn expand_to_include(range: Option<Range>, value: f64) -> Option<Range> {
        if value.is_nan() {
            return range;
        }
        match range {
            None => Some(Range {
                lower: value,
                upper: value,
            }),
            Some(r) if value < r.lower => Some(Range {
                lower: value,
                upper: r.upper,
            }),
            Some(r) if value > r.upper => Some(Range {
                lower: r.lower,
                upper: value,
            }),
            Some(r) => Some(r),
        }
    }

    /// Grows the range by fractions of its length on each side. If the margins are
    /// negative enough to invert the range, it collapses to its midpoint.
    pub fn expand(&self, lower_margin: f64, upper_margin: f64) -> Range {
        let length = self.length();
        let mut lower = self.lower - length * lower_margin;
        let mut upper = self.upper + length * upper_margin;
        if lower > upper {
            let mid = lower / 2.0 + upper / 2.0;
            lower = mid;
            upper = mid;
        }
        Range { lower, upper }
    }

    /// Shifts the range, optionally letting it cross zero
    pub fn shift(&self, delta: f64, allow_zero_crossing: bool) -> Range {
        if allow_zero_crossing {
            Range {
                lower: self.lower + delta,
                upper: self.upper + delta,
            }
        } else {
            Range {
                lower: shift_with_no_zero_crossing(self.lower, delta),
                upper: shift_with_no_zero_crossing(self.upper, delta),
            }
        }
    }

    /// Multiplies both bounds by a non-negative factor
    pub fn scale(&self, factor: f64) -> Result<Range, ChartwellCommonError> {
        if factor < 0.0 {
            return Err(ChartwellCommonError::NegativeSize(factor as f32));
        }
        Ok(Range {
            lower: self.lower * factor,
            upper: self.upper * factor,
        })
    }

    /// Range of the given length centered on `central`
    pub fn centered(central: f64, length: f64) -> Result<Range, ChartwellCommonError> {
        Range::try_new(central - length / 2.0, central + length / 2.0)
    }
}

fn shift_with_no_zero_crossing(value: f64, delta: f64) -> f64 {
    if value > 0.0 {
        (value + delta).max(0.0)
    } else if value < 0.0 {
        (value + delta).min(0.0)
    } else {
        value + delta
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Range[{},{}]", self.lower, self.upper)
    }
}
