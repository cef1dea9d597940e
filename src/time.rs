//! Day-granularity clock. Scheduling works in whole epoch days.

use chrono::{Datelike, Local, NaiveDate};

/// Days from 0001-01-01 (CE day 1) to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

pub trait Clock {
    fn today_epoch_day(&self) -> i64;
}

/// Local calendar date of the machine
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today_epoch_day(&self) -> i64 {
        to_epoch_day(Local::now().date_naive())
    }
}

/// Always returns the same day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn today_epoch_day(&self) -> i64 {
        self.0
    }
}

pub fn to_epoch_day(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
}

pub fn from_epoch_day(epoch_day: i64) -> Option<NaiveDate> {
    let ce_days = i32::try_from(epoch_day + UNIX_EPOCH_DAYS_FROM_CE).ok()?;
    NaiveDate::from_num_days_from_ce_opt(ce_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_day_conversion() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(to_epoch_day(epoch), 0);

        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(to_epoch_day(date), 19_783);
        assert_eq!(from_epoch_day(19_783), Some(date));
        assert_eq!(from_epoch_day(-1), NaiveDate::from_ymd_opt(1969, 12, 31));
    }

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(100).today_epoch_day(), 100);
    }
}
