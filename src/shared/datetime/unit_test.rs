use super::errors::BucketError;
use super::unit::{Step, TimeUnit};
use chrono::Duration;

#[test]
fn parses_singular_plural_and_mixed_case() {
    assert_eq!("hour".parse::<TimeUnit>().unwrap(), TimeUnit::Hour);
    assert_eq!("Days".parse::<TimeUnit>().unwrap(), TimeUnit::Day);
    assert_eq!(" MONTH ".parse::<TimeUnit>().unwrap(), TimeUnit::Month);
    assert_eq!("years".parse::<TimeUnit>().unwrap(), TimeUnit::Year);
}

#[test]
fn rejects_unknown_units() {
    let err = "fortnight".parse::<TimeUnit>().unwrap_err();
    assert_eq!(err, BucketError::UnknownUnit("fortnight".to_string()));
}

#[test]
fn calendar_units_step_by_months() {
    assert_eq!(TimeUnit::Month.step(), Step::Calendar(1));
    assert_eq!(TimeUnit::Year.step(), Step::Calendar(12));
    assert_eq!(TimeUnit::Hour.step(), Step::Fixed(Duration::hours(1)));
    assert!(TimeUnit::Year.is_calendar());
    assert!(!TimeUnit::Week.is_calendar());
}

#[test]
fn ordering_runs_from_coarse_to_fine() {
    assert!(TimeUnit::Year < TimeUnit::Month);
    assert!(TimeUnit::Day < TimeUnit::Hour);
    assert!(TimeUnit::Minute < TimeUnit::Second);
}
