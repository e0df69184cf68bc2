use super::errors::BucketError;
use super::unit::{Step, TimeUnit};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Timelike};

/// Ordered boundaries covering `[start, end]` at `unit` granularity.
///
/// Boundaries are `start + k * unit` for every k where the result is still
/// `<= end`. Months and years are offset from `start` as a whole number of
/// calendar months so a start on the 31st does not drift after February.
/// When the last stepped boundary falls short of `end`, `end` closes the
/// final partial bucket. The first element is always `start` and the last is
/// always `end`.
pub fn generate_buckets(
    start: NaiveDateTime,
    end: NaiveDateTime,
    unit: TimeUnit,
) -> Result<Vec<NaiveDateTime>, BucketError> {
    if start > end {
        return Err(BucketError::InvertedRange { start, end });
    }

    let mut boundaries = Vec::new();
    let mut k: i32 = 0;
    loop {
        let current = advance(start, unit, k).ok_or_else(|| {
            BucketError::Overflow(boundaries.last().copied().unwrap_or(start))
        })?;
        if current > end {
            break;
        }
        boundaries.push(current);
        k += 1;
    }

    if boundaries.last().is_some_and(|last| *last < end) {
        boundaries.push(end);
    }
    Ok(boundaries)
}

fn advance(start: NaiveDateTime, unit: TimeUnit, k: i32) -> Option<NaiveDateTime> {
    match unit.step() {
        Step::Fixed(step) => start.checked_add_signed(step.checked_mul(k)?),
        Step::Calendar(months) => {
            start.checked_add_months(Months::new(months.checked_mul(k as u32)?))
        }
    }
}

#[derive(Clone, Copy)]
enum Component {
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Nanosecond,
}

impl Component {
    const ALL: [Component; 6] = [
        Component::Month,
        Component::Day,
        Component::Hour,
        Component::Minute,
        Component::Second,
        Component::Nanosecond,
    ];

    fn rank(&self) -> u8 {
        match self {
            Component::Month => 1,
            Component::Day => 2,
            Component::Hour => 3,
            Component::Minute => 4,
            Component::Second => 5,
            Component::Nanosecond => 6,
        }
    }

    fn zeroed(&self, dt: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Component::Month => dt.with_month(0),
            Component::Day => dt.with_day(0),
            Component::Hour => dt.with_hour(0),
            Component::Minute => dt.with_minute(0),
            Component::Second => dt.with_second(0),
            Component::Nanosecond => dt.with_nanosecond(0),
        }
    }
}

fn unit_rank(unit: TimeUnit) -> u8 {
    match unit {
        TimeUnit::Year => 0,
        TimeUnit::Month => 1,
        TimeUnit::Week | TimeUnit::Day => 2,
        TimeUnit::Hour => 3,
        TimeUnit::Minute => 4,
        TimeUnit::Second => 5,
    }
}

/// Zeroes every component finer than `unit`.
///
/// `hour` keeps the hour and clears minutes, seconds and nanoseconds.
/// Month and day have no zero value and are left alone, so any unit of a
/// day or coarser only clears the time of day.
pub fn zero_datetime(dt: NaiveDateTime, unit: TimeUnit) -> NaiveDateTime {
    let floor = unit_rank(unit);
    Component::ALL
        .iter()
        .filter(|c| c.rank() > floor)
        .fold(dt, |acc, c| c.zeroed(acc).unwrap_or(acc))
}

/// Start of the `unit` that contains `dt` (the `date_trunc` label).
pub fn truncate(dt: NaiveDateTime, unit: TimeUnit) -> NaiveDateTime {
    let date = dt.date();
    let midnight = |d: NaiveDate| d.and_hms_opt(0, 0, 0).unwrap_or(dt);
    match unit {
        TimeUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)
            .map(midnight)
            .unwrap_or(dt),
        TimeUnit::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
            .map(midnight)
            .unwrap_or(dt),
        TimeUnit::Week => {
            let back = Duration::days(date.weekday().num_days_from_monday() as i64);
            midnight(date - back)
        }
        TimeUnit::Day => midnight(date),
        TimeUnit::Hour | TimeUnit::Minute | TimeUnit::Second => zero_datetime(dt, unit),
    }
}

/// Renders a bucket boundary without timezone or sub-second suffix.
pub fn render_bucket_label(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}
