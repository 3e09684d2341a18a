//! Nice tick generation on 1-2-5 steps.

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951;

/// Approximately `count + 1` evenly spaced, nicely rounded values covering
/// `[start, stop]`. The order follows the order of `start` and `stop`.
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if count <= 0.0 || count.is_nan() || start.is_nan() || stop.is_nan() {
        return vec![];
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if !(i2 >= i1) || !inc.is_finite() {
        return vec![];
    }

    let n = (i2 - i1 + 1.0) as usize;
    let value = |i: f64| if inc < 0.0 { i / -inc } else { i * inc };
    if reverse {
        (0..n).map(|i| value(i2 - i as f64)).collect()
    } else {
        (0..n).map(|i| value(i1 + i as f64)).collect()
    }
}

/// Returns `(first, last, increment)`, where a negative increment is the
/// reciprocal of the true step. This keeps sub-unit steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        inc = 10f64.powf(-power) / factor;
        i1 = (start * inc).round();
        i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        (i1, i2, -inc)
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        if i2 < i1 && (0.5..2.0).contains(&count) {
            return tick_spec(start, stop, count * 2.0);
        }
        (i1, i2, inc)
    }
}

fn step_factor(error: f64) -> f64 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Like `tick_step` but returns the reciprocal (negated) when the step is
/// below one.
pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    if !(count > 0.0) {
        return f64::NAN;
    }
    if start == stop {
        return f64::NEG_INFINITY;
    }
    let step = (stop - start) / count;
    if step == 0.0 || !step.is_finite() {
        return f64::NAN;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Nice step between ticks for `[start, stop]`, signed by direction
pub fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let reverse = stop < start;
    let inc = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse {
        -step
    } else {
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[test]
    fn test_ticks_unit_interval() {
        assert_eq!(
            ticks(0.0, 1.0, 10.0),
            vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]
        );
    }

    #[test]
    fn test_ticks_reversed() {
        assert_eq!(ticks(10.0, 0.0, 2.0), vec![10.0, 5.0, 0.0]);
    }

    #[test]
    fn test_ticks_degenerate() {
        assert_eq!(ticks(3.0, 3.0, 10.0), vec![3.0]);
        assert!(ticks(0.0, 1.0, 0.0).is_empty());
        assert!(ticks(f64::NAN, 1.0, 5.0).is_empty());
    }

    #[rstest]
    #[case(0.0, 1.0, 10.0, 0.1)]
    #[case(0.0, 100.0, 10.0, 10.0)]
    #[case(0.0, 100.0, 5.0, 20.0)]
    #[case(-7.0, 13.0, 4.0, 5.0)]
    #[case(100.0, 0.0, 10.0, -10.0)]
    fn test_tick_step(#[case] start: f64, #[case] stop: f64, #[case] count: f64, #[case] expected: f64) {
        assert_approx_eq!(f64, tick_step(start, stop, count), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_tick_increment_sub_unit() {
        assert_approx_eq!(f64, tick_increment(0.0, 1.0, 10.0), -10.0);
        assert_approx_eq!(f64, tick_increment(0.0, 100.0, 10.0), 10.0);
        assert_eq!(tick_increment(1.0, 1.0, 10.0), f64::NEG_INFINITY);
    }
}
