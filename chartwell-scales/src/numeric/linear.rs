use crate::array;

use super::ContinuousNumericScale;

/// A linear scale that maps data values from a domain to a pixel range.
/// Supports clamping, domain niceing, and tick generation.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearNumericScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    clamp: bool,
}

impl Default for LinearNumericScale {
    fn default() -> Self {
        Self::new((0.0, 1.0), (0.0, 1.0))
    }
}

impl LinearNumericScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
            clamp: false,
        }
    }

    /// Extends the domain to nice round numbers for better tick selection
    pub fn nice(mut self, count: Option<usize>) -> Self {
        if self.domain_start == self.domain_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
        {
            return self;
        }

        let ascending = self.domain_start <= self.domain_end;
        let (mut start, mut stop) = if ascending {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };

        let count = count.unwrap_or(10) as f64;
        let mut prestep = 0.0;
        for _ in 0..10 {
            let step = array::tick_increment(start, stop, count);
            if step == prestep {
                break;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            prestep = step;
        }

        if ascending {
            self.domain_start = start;
            self.domain_end = stop;
        } else {
            self.domain_start = stop;
            self.domain_end = start;
        }
        self
    }

    pub fn with_domain(mut self, domain: (f64, f64)) -> Self {
        self.domain_start = domain.0;
        self.domain_end = domain.1;
        self
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

    fn is_degenerate(&self) -> bool {
        self.domain_start == self.domain_end
            || self.range_start == self.range_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
            || self.range_start.is_nan()
            || self.range_end.is_nan()
    }
}

impl ContinuousNumericScale for LinearNumericScale {
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
        if self.is_degenerate() {
            return self.range_start;
        }
        let scale = (self.range_end - self.range_start) / (self.domain_end - self.domain_start);
        let v = self.range_start + scale * (value - self.domain_start);
        if self.clamp {
            let (range_min, range_max) = ordered(self.range_start, self.range_end);
            v.clamp(range_min, range_max)
        } else {
            v
        }
    }

    fn invert(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return self.domain_start;
        }
        let value = if self.clamp {
            let (range_min, range_max) = ordered(self.range_start, self.range_end);
            value.clamp(range_min, range_max)
        } else {
            value
        };
        let scale = (self.domain_end - self.domain_start) / (self.range_end - self.range_start);
        self.domain_start + scale * (value - self.range_start)
    }

    /// Generates evenly spaced tick values within the domain
    fn ticks(&self, count: Option<usize>) -> Vec<f64> {
        let count = count.unwrap_or(10) as f64;
        array::ticks(self.domain_start, self.domain_end, count)
    }
}

pub(crate) fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_scale_clamped() {
        let scale = LinearNumericScale::new((10.0, 30.0), (0.0, 100.0)).with_clamp(true);
        let values = [0.0, 10.0, 15.0, 20.0, 30.0, 40.0];
        let result: Vec<f64> = values.iter().map(|v| scale.scale(*v)).collect();
        assert_approx_eq!(f64, result[0], 0.0);
        assert_approx_eq!(f64, result[1], 0.0);
        assert_approx_eq!(f64, result[2], 25.0);
        assert_approx_eq!(f64, result[3], 50.0);
        assert_approx_eq!(f64, result[4], 100.0);
        assert_approx_eq!(f64, result[5], 100.0);
    }

    #[test]
    fn test_inverted_pixel_range() {
        // vertical axes map larger values to smaller y
        let scale = LinearNumericScale::new((0.0, 10.0), (200.0, 0.0));
        assert_approx_eq!(f64, scale.scale(2.5), 150.0);
        assert_approx_eq!(f64, scale.invert(150.0), 2.5);
    }

    #[test]
    fn test_degenerate_domain() {
        let scale = LinearNumericScale::new((5.0, 5.0), (10.0, 20.0));
        assert_eq!(scale.scale(5.0), 10.0);
        assert_eq!(scale.scale(100.0), 10.0);
        assert_eq!(scale.invert(15.0), 5.0);
    }

    #[test]
    fn test_nice() {
        let scale = LinearNumericScale::new((0.201479, 0.996679), (0.0, 1.0)).nice(Some(10));
        assert_approx_eq!(f64, scale.domain().0, 0.2);
        assert_approx_eq!(f64, scale.domain().1, 1.0);

        let scale = LinearNumericScale::new((113.0, -2.0), (0.0, 1.0)).nice(Some(5));
        assert_eq!(scale.domain(), (120.0, -20.0));
    }

    #[test]
    fn test_ticks() {
        let scale = LinearNumericScale::new((0.0, 50.0), (0.0, 500.0));
        assert_eq!(
            scale.ticks(Some(5)),
            vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]
        );
    }
}
