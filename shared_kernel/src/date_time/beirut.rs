use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Asia::Beirut;
use chrono_tz::Tz;

/// The calendars are published on Lebanese local time, so "this month" is
/// decided on the Beirut clock rather than in UTC.
pub fn now() -> DateTime<Tz> {
    Beirut.from_utc_datetime(&Utc::now().naive_utc())
}

/// The (year, month) pair one calendar document covers.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct MonthlyPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthlyPeriod {
    pub fn current() -> Self {
        Self::from(now())
    }
}

impl From<DateTime<Tz>> for MonthlyPeriod {
    fn from(date_time: DateTime<Tz>) -> Self {
        MonthlyPeriod {
            year: date_time.year(),
            month: date_time.month(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_period_is_a_real_calendar_month() {
        let period = MonthlyPeriod::current();
        assert!((1..=12).contains(&period.month));
        assert!(period.year >= 2024);
    }

    #[test]
    fn period_follows_the_beirut_clock() {
        let late_evening_utc = Utc.with_ymd_and_hms(2026, 1, 31, 23, 30, 0).unwrap();
        let period = MonthlyPeriod::from(Beirut.from_utc_datetime(&late_evening_utc.naive_utc()));
        // 23:30 UTC on the 31st is already February in Beirut.
        assert_eq!((period.year, period.month), (2026, 2));
    }
}
