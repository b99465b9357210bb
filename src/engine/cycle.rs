//! Billing-cycle date derivation.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::Period;
use crate::errors::DatasetError;

/// Cutoff and due dates derived for one expense cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDates {
    pub cutoff: NaiveDate,
    pub due: NaiveDate,
}

/// Derives the cycle dates for an expense from its anchor days and period.
///
/// Both dates are built with the rolling constructor, so a day past the end
/// of the period's month lands in the following month. When the cutoff day is
/// greater than the due day the due date belongs to the next cycle and its
/// month advances by one; the advance re-normalizes the day against the new
/// month, matching the rolling construction used everywhere else.
pub fn cycle_dates(
    cutoff_day: u32,
    due_day: u32,
    period: Period,
) -> Result<CycleDates, DatasetError> {
    if !period.is_valid_month() {
        return Err(DatasetError::MalformedPeriod(period.to_string()));
    }
    for day in [cutoff_day, due_day] {
        if !(1..=31).contains(&day) {
            return Err(DatasetError::InvalidCycleDay(day));
        }
    }

    let cutoff = rolling_date(period.year, period.month as i32, i64::from(cutoff_day));
    let mut due = rolling_date(period.year, period.month as i32, i64::from(due_day));
    if cutoff_day > due_day {
        due = add_months_rolling(due, 1);
    }
    Ok(CycleDates { cutoff, due })
}

/// Builds a date from components that may overflow the calendar. Months
/// outside 1-12 shift the year; days past the end of the month spill into the
/// following months. Day zero resolves to the last day of the previous month.
pub(crate) fn rolling_date(year: i32, month: i32, day: i64) -> NaiveDate {
    let (year, month) = normalize_month(year, month);
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    first + Duration::days(day - 1)
}

/// Shifts a date by whole months, letting day overflow roll forward.
pub fn add_months_rolling(date: NaiveDate, months: i32) -> NaiveDate {
    rolling_date(date.year(), date.month() as i32 + months, i64::from(date.day()))
}

fn normalize_month(mut year: i32, mut month: i32) -> (i32, u32) {
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    (year, month as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn cutoff_after_due_day_pushes_due_into_next_month() {
        let dates = cycle_dates(20, 10, Period::new(2024, 3)).expect("valid inputs");
        assert_eq!(dates.cutoff, date(2024, 3, 20));
        assert_eq!(dates.due, date(2024, 4, 10));
    }

    #[test]
    fn cutoff_at_or_before_due_day_stays_in_period_month() {
        let dates = cycle_dates(5, 25, Period::new(2024, 7)).expect("valid inputs");
        assert_eq!(dates.cutoff, date(2024, 7, 5));
        assert_eq!(dates.due, date(2024, 7, 25));
    }

    #[test]
    fn day_overflow_rolls_into_the_following_month() {
        // April has 30 days; day 31 becomes May 1.
        let dates = cycle_dates(15, 31, Period::new(2024, 4)).expect("valid inputs");
        assert_eq!(dates.due, date(2024, 5, 1));
        // February 2023 has 28 days; day 30 becomes March 2.
        let dates = cycle_dates(10, 30, Period::new(2023, 2)).expect("valid inputs");
        assert_eq!(dates.due, date(2023, 3, 2));
    }

    #[test]
    fn month_advance_renormalizes_rolled_days() {
        // Due day 30 in February 2023 rolls to March 2, then the
        // cutoff-greater rule advances it one month to April 2.
        let dates = cycle_dates(31, 30, Period::new(2023, 2)).expect("valid inputs");
        assert_eq!(dates.cutoff, date(2023, 3, 3));
        assert_eq!(dates.due, date(2023, 4, 2));
    }

    #[test]
    fn add_months_rolling_spills_long_days() {
        assert_eq!(add_months_rolling(date(2024, 1, 31), 1), date(2024, 3, 2));
        assert_eq!(add_months_rolling(date(2024, 12, 15), 1), date(2025, 1, 15));
    }

    #[test]
    fn rejects_out_of_range_inputs() {
        let err = cycle_dates(0, 10, Period::new(2024, 3)).expect_err("day 0 invalid");
        assert!(matches!(err, DatasetError::InvalidCycleDay(0)));
        let err = cycle_dates(10, 32, Period::new(2024, 3)).expect_err("day 32 invalid");
        assert!(matches!(err, DatasetError::InvalidCycleDay(32)));
        let err = cycle_dates(10, 20, Period::new(2024, 13)).expect_err("month 13 invalid");
        assert!(matches!(err, DatasetError::MalformedPeriod(_)));
    }
}
