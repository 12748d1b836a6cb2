use approx::assert_relative_eq;
use conversion_chart::core::{DEFAULT_Y_DOMAIN, ProcessedPoint, y_axis_domain};

fn points(values: &[(&str, f64, f64)]) -> Vec<ProcessedPoint> {
    values
        .iter()
        .map(|(label, a, b)| ProcessedPoint::new(*label).with_value("a", *a).with_value("b", *b))
        .collect()
}

#[test]
fn domain_pads_ten_percent_of_span() {
    let series = points(&[("01", 10.0, 100.0), ("02", 20.0, 90.0)]);
    let (lower, upper) = y_axis_domain(&series, &["a"]);

    assert_relative_eq!(lower, 9.0);
    assert_relative_eq!(upper, 21.0);
}

#[test]
fn unselected_series_do_not_stretch_domain() {
    let series = points(&[("01", 10.0, 100.0), ("02", 20.0, 0.0)]);

    let only_a = y_axis_domain(&series, &["a"]);
    let both = y_axis_domain(&series, &["a", "b"]);
    assert_eq!(only_a, (9.0, 21.0));
    assert_eq!(both, (0.0, 110.0));
}

#[test]
fn lower_bound_never_drops_below_zero() {
    let series = points(&[("01", 0.5, 0.0), ("02", 40.0, 0.0)]);
    let (lower, upper) = y_axis_domain(&series, &["a"]);

    assert_eq!(lower, 0.0);
    assert_relative_eq!(upper, 43.95);
}

#[test]
fn empty_inputs_use_default_domain() {
    let series = points(&[("01", 1.0, 2.0)]);
    let none: [&str; 0] = [];

    assert_eq!(y_axis_domain(&series, &none), DEFAULT_Y_DOMAIN);
    assert_eq!(y_axis_domain(&[], &["a"]), DEFAULT_Y_DOMAIN);
    assert_eq!(y_axis_domain(&series, &["missing"]), DEFAULT_Y_DOMAIN);
}

#[test]
fn flat_series_collapses_to_its_value() {
    let series = points(&[("01", 5.0, 0.0), ("02", 5.0, 0.0)]);
    assert_eq!(y_axis_domain(&series, &["a"]), (5.0, 5.0));
}
