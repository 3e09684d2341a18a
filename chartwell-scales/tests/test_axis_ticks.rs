use chartwell_scales::array::tick_step;
use chartwell_scales::numeric::ContinuousNumericScale;
use chartwell_scales::{LinearNumericScale, LogNumericScale, NumberFormat, NumericScale};
use float_cmp::assert_approx_eq;

#[test]
fn test_nice_linear_ticks_with_labels() {
    let scale = LinearNumericScale::new((0.13, 9.7), (400.0, 0.0)).nice(Some(5));
    assert_eq!(scale.domain(), (0.0, 10.0));

    let ticks = scale.ticks(Some(5));
    let step = tick_step(0.0, 10.0, 5.0);
    let format = NumberFormat::for_step(step);
    let labels: Vec<String> = ticks.iter().map(|t| format.format(*t)).collect();
    assert_eq!(labels, vec!["0", "2", "4", "6", "8", "10"]);

    let pixels = scale.scale_values(&ticks);
    assert_approx_eq!(f64, pixels[0], 400.0);
    assert_approx_eq!(f64, pixels[5], 0.0);
}

#[test]
fn test_numeric_scale_dispatch() {
    let log: NumericScale = LogNumericScale::try_new((1.0, 100.0), (0.0, 200.0))
        .unwrap()
        .into();
    assert!(log.is_log());
    assert_approx_eq!(f64, log.scale(10.0), 100.0, epsilon = 1e-9);

    let linear: NumericScale = LinearNumericScale::new((0.0, 1.0), (0.0, 1.0)).into();
    let linear = linear.with_range((0.0, 50.0));
    assert_approx_eq!(f64, linear.scale(0.5), 25.0);
}
