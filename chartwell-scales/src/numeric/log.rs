use crate::array;
use crate::error::ChartwellScaleError;

use super::linear::ordered;
use super::ContinuousNumericScale;

/// A logarithmic scale over a strictly positive domain
#[derive(Clone, Debug, PartialEq)]
pub struct LogNumericScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    base: f64,
    clamp: bool,
}

impl LogNumericScale {
    /// Creates a base 10 log scale. Both domain bounds must be positive.
    pub fn try_new(domain: (f64, f64), range: (f64, f64)) -> Result<Self, ChartwellScaleError> {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
            base: 10.0,
            clamp: false,
        }
        .validated()
    }

    fn validated(self) -> Result<Self, ChartwellScaleError> {
        if !(self.domain_start > 0.0 && self.domain_end > 0.0) {
            return Err(ChartwellScaleError::InvalidLogDomain {
                lower: self.domain_start,
                upper: self.domain_end,
            });
        }
        if !(self.base > 0.0) || self.base == 1.0 {
            return Err(ChartwellScaleError::InvalidLogBase(self.base));
        }
        Ok(self)
    }

    pub fn with_base(mut self, base: f64) -> Result<Self, ChartwellScaleError> {
        self.base = base;
        self.validated()
    }

    pub fn with_domain(mut self, domain: (f64, f64)) -> Result<Self, ChartwellScaleError> {
        self.domain_start = domain.0;
        self.domain_end = domain.1;
        self.validated()
    }

    pub fn with_range(mut self, range: (f64, f64)) -> Self {
        self.range_start = range.0;
        self.range_end = range.1;
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    /// Computes the logarithm of x in the current base
    pub fn log(&self, x: f64) -> f64 {
        if self.base == 10.0 {
            x.log10()
        } else if self.base == 2.0 {
            x.log2()
        } else {
            x.ln() / self.base.ln()
        }
    }

    /// Computes the current base raised to power x
    pub fn pow(&self, x: f64) -> f64 {
        self.base.powf(x)
    }

    /// Extends the domain outward to whole powers of the base
    pub fn nice(mut self) -> Self {
        let (lo, hi) = ordered(self.domain_start, self.domain_end);
        let nlo = self.pow(self.log(lo).floor());
        let nhi = self.pow(self.log(hi).ceil());
        if self.domain_start <= self.domain_end {
            self.domain_start = nlo;
            self.domain_end = nhi;
        } else {
            self.domain_start = nhi;
            self.domain_end = nlo;
        }
        self
    }
}

impl ContinuousNumericScale for LogNumericScale {
    fn domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    fn clamp(&self) -> bool {
        self.clamp
    }

    fn scale(&self, value: f64) -> f64 {
        let log_start = self.log(self.domain_start);
        let log_span = self.log(self.domain_end) - log_start;
        if log_span == 0.0 || log_span.is_nan() || self.range_start == self.range_end {
            return self.range_start;
        }
        let (range_min, range_max) = ordered(self.range_start, self.range_end);
        if value.is_nan() {
            return f64::NAN;
        }
        if value <= 0.0 {
            // below every representable value
            return if self.clamp {
                self.range_start
            } else {
                f64::NAN
            };
        }
        let v = self.range_start
            + (self.range_end - self.range_start) * (self.log(value) - log_start) / log_span;
        if self.clamp {
            v.clamp(range_min, range_max)
        } else {
            v
        }
    }

    fn invert(&self, value: f64) -> f64 {
        let log_start = self.log(self.domain_start);
        let log_span = self.log(self.domain_end) - log_start;
        if self.range_start == self.range_end || log_span == 0.0 {
            return self.domain_start;
        }
        let value = if self.clamp {
            let (range_min, range_max) = ordered(self.range_start, self.range_end);
            value.clamp(range_min, range_max)
        } else {
            value
        };
        let t = (value - self.range_start) / (self.range_end - self.range_start);
        self.pow(log_start + t * log_span)
    }

    /// Powers of the base and, when they fit, their integer multiples
    fn ticks(&self, count: Option<usize>) -> Vec<f64> {
        let count = count.unwrap_or(10) as f64;
        let (u, v) = ordered(self.domain_start, self.domain_end);
        let reverse = self.domain_end < self.domain_start;
        let i = self.log(u);
        let j = self.log(v);

        let mut ticks = Vec::new();
        if self.base.fract() == 0.0 && j - i < count {
            let base = self.base as i64;
            let mut exp = i.floor() as i64;
            let last = j.ceil() as i64;
            'outer: while exp <= last {
                for k in 1..base {
                    let t = k as f64 * self.pow(exp as f64);
                    if t < u {
                        continue;
                    }
                    if t > v {
                        break 'outer;
                    }
                    ticks.push(t);
                }
                exp += 1;
            }
            if (ticks.len() as f64) * 2.0 < count {
                ticks = array::ticks(u, v, count);
            }
        } else {
            ticks = array::ticks(i, j, (j - i).min(count))
                .into_iter()
                .map(|e| self.pow(e))
                .collect();
        }

        if reverse {
            ticks.reverse();
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_non_positive_domain_is_error() {
        assert!(matches!(
            LogNumericScale::try_new((0.0, 10.0), (0.0, 1.0)),
            Err(ChartwellScaleError::InvalidLogDomain { .. })
        ));
        assert!(LogNumericScale::try_new((1.0, 10.0), (0.0, 1.0))
            .unwrap()
            .with_base(1.0)
            .is_err());
    }

    #[test]
    fn test_scale_and_invert() {
        let scale = LogNumericScale::try_new((1.0, 1000.0), (0.0, 300.0)).unwrap();
        assert_approx_eq!(f64, scale.scale(10.0), 100.0, epsilon = 1e-9);
        assert_approx_eq!(f64, scale.scale(100.0), 200.0, epsilon = 1e-9);
        assert_approx_eq!(f64, scale.invert(200.0), 100.0, epsilon = 1e-9);
        assert!(scale.scale(-1.0).is_nan());
    }

    #[test]
    fn test_ticks_with_multiples() {
        let scale = LogNumericScale::try_new((1.0, 100.0), (0.0, 1.0)).unwrap();
        let ticks = scale.ticks(Some(10));
        assert_eq!(ticks.first(), Some(&1.0));
        assert_eq!(ticks.last(), Some(&100.0));
        assert!(ticks.contains(&20.0));
        assert_eq!(ticks.len(), 19);
    }

    #[test]
    fn test_ticks_wide_domain_uses_powers() {
        let scale = LogNumericScale::try_new((1.0, 1e20), (0.0, 1.0)).unwrap();
        let ticks = scale.ticks(Some(5));
        assert!(ticks.iter().all(|t| {
            let e = t.log10();
            (e - e.round()).abs() < 1e-9
        }));
    }

    #[test]
    fn test_nice() {
        let scale = LogNumericScale::try_new((3.0, 420.0), (0.0, 1.0)).unwrap().nice();
        assert_approx_eq!(f64, scale.domain().0, 1.0);
        assert_approx_eq!(f64, scale.domain().1, 1000.0);
    }
}
