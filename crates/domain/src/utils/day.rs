//! Pure calendar-day helpers for streak and summary calculations
//!
//! Streak rules compare calendar days, never raw timestamp differences:
//! a session at 23:59 followed by one at 00:01 the next day is consecutive,
//! while two sessions 25 hours apart on the same date are a same-day pair.
//! All days are UTC calendar dates derived from the stored timestamps.

use chrono::{Days, NaiveDate, Weekday};

use crate::constants::DAYS_PER_WEEK;

/// Check whether `day` is exactly the calendar day before `next`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use haven_domain::utils::day::is_previous_day;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert!(is_previous_day(monday, tuesday));
/// assert!(!is_previous_day(tuesday, monday));
/// assert!(!is_previous_day(monday, monday));
/// ```
#[must_use]
pub fn is_previous_day(day: NaiveDate, next: NaiveDate) -> bool {
    day.succ_opt() == Some(next)
}

/// Return the Sunday that starts the week containing `day`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use haven_domain::utils::day::week_start;
///
/// let wednesday = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
/// let sunday = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
/// assert_eq!(week_start(wednesday), sunday);
/// assert_eq!(week_start(sunday), sunday);
/// ```
#[must_use]
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day.week(Weekday::Sun).first_day()
}

/// Return the seven days of the week containing `day`, Sunday first.
#[must_use]
pub fn week_days(day: NaiveDate) -> Vec<NaiveDate> {
    let start = week_start(day);
    (0..DAYS_PER_WEEK as u64)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .collect()
}
