use chrono::{NaiveDate, NaiveDateTime};

pub struct TimestampFactory;

impl TimestampFactory {
    pub fn naive(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, min, sec))
            .expect("valid test timestamp")
    }

    pub fn naive_micros(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
        micros: u32,
    ) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_micro_opt(hour, min, sec, micros))
            .expect("valid test timestamp")
    }
}
