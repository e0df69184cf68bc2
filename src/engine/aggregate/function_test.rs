use super::function::AggregateFunction;

#[test]
fn average_of_values() {
    assert_eq!(AggregateFunction::Avg.apply(&[1.0, 2.0, 6.0]), Some(3.0));
    assert_eq!(AggregateFunction::Avg.apply(&[]), None);
}

#[test]
fn sample_variance_and_deviation() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

    let var = AggregateFunction::Var.apply(&values).unwrap();
    let std = AggregateFunction::Std.apply(&values).unwrap();

    assert!((var - 32.0 / 7.0).abs() < 1e-12);
    assert!((std - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
}

#[test]
fn sample_statistics_need_two_values() {
    assert_eq!(AggregateFunction::Var.apply(&[3.0]), None);
    assert_eq!(AggregateFunction::Std.apply(&[3.0]), None);
}

#[test]
fn labels_and_sql_names() {
    assert_eq!(AggregateFunction::Std.label(), "std");
    assert_eq!(AggregateFunction::Std.sql_name(), "stddev");
    assert_eq!(AggregateFunction::Var.sql_name(), "variance");
    assert_eq!("VAR".parse::<AggregateFunction>().unwrap(), AggregateFunction::Var);
    assert!("median".parse::<AggregateFunction>().is_err());
    assert_eq!(AggregateFunction::default(), AggregateFunction::Avg);
}
