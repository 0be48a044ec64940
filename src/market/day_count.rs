//! Day-count conventions used to turn a valuation/maturity date pair into a year fraction.

use chrono::{Datelike, NaiveDate};

/// Day-count convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DayCount {
    /// Actual/365 Fixed
    #[default]
    Actual365Fixed,
    /// Actual/360
    Actual360,
    /// Actual/365.25
    Actual36525,
    /// 30/360 (Bond Basis)
    Thirty360,
}

impl DayCount {
    /// Year fraction between `start` and `end`.
    ///
    /// Negative when `end` precedes `start`; callers decide whether that is an error.
    pub fn year_fraction(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        match self {
            DayCount::Actual365Fixed => actual_days(start, end) / 365.0,
            DayCount::Actual360 => actual_days(start, end) / 360.0,
            DayCount::Actual36525 => actual_days(start, end) / 365.25,
            DayCount::Thirty360 => thirty_360_days(start, end) / 360.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DayCount::Actual365Fixed => "Actual/365 (Fixed)",
            DayCount::Actual360 => "Actual/360",
            DayCount::Actual36525 => "Actual/365.25",
            DayCount::Thirty360 => "30/360 (Bond Basis)",
        }
    }
}

fn actual_days(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days() as f64
}

fn thirty_360_days(start: NaiveDate, end: NaiveDate) -> f64 {
    let (y1, m1, d1) = (start.year(), start.month() as i32, start.day() as i32);
    let (y2, m2, d2) = (end.year(), end.month() as i32, end.day() as i32);

    let d1 = d1.min(30);
    let d2 = if d1 == 30 { d2.min(30) } else { d2 };

    (360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_actual_365_fixed() {
        let yf = DayCount::Actual365Fixed.year_fraction(date(2023, 5, 16), date(2024, 5, 15));
        assert_eq!(yf, 1.0);

        // 2024 is a leap year, so a calendar year is 366 actual days
        let yf = DayCount::Actual365Fixed.year_fraction(date(2023, 5, 15), date(2024, 5, 15));
        assert!((yf - 366.0 / 365.0).abs() < 1e-15);
    }

    #[test]
    fn test_actual_360() {
        let yf = DayCount::Actual360.year_fraction(date(2026, 1, 1), date(2026, 4, 1));
        assert!((yf - 90.0 / 360.0).abs() < 1e-15);
    }

    #[test]
    fn test_actual_36525() {
        let yf = DayCount::Actual36525.year_fraction(date(2020, 1, 1), date(2024, 1, 1));
        assert!((yf - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_thirty_360_end_of_month() {
        let yf = DayCount::Thirty360.year_fraction(date(2024, 1, 31), date(2024, 3, 31));
        assert!((yf - 60.0 / 360.0).abs() < 1e-15);

        let yf = DayCount::Thirty360.year_fraction(date(2023, 2, 28), date(2024, 2, 28));
        assert_eq!(yf, 1.0);
    }

    #[test]
    fn test_reversed_dates_are_negative() {
        let yf = DayCount::Actual365Fixed.year_fraction(date(2024, 5, 15), date(2024, 5, 10));
        assert!(yf < 0.0);
        assert_eq!(
            DayCount::Actual365Fixed.year_fraction(date(2024, 5, 15), date(2024, 5, 15)),
            0.0
        );
    }
}
