// Date utility functions
// Week windows, range labels, and day countdowns

use chrono::{Datelike, Duration, Local, NaiveDate};

/// The Sunday on or before `anchor` (the normalized week anchor).
pub fn start_of_week(anchor: NaiveDate) -> NaiveDate {
    anchor - Duration::days(anchor.weekday().num_days_from_sunday() as i64)
}

/// The 7 calendar days of the week containing `anchor`, Sunday through
/// Saturday in order. Correct across month and year boundaries.
pub fn week_days(anchor: NaiveDate) -> Vec<NaiveDate> {
    let sunday = start_of_week(anchor);
    (0..7).map(|offset| sunday + Duration::days(offset)).collect()
}

/// Render a week window as "Mar 1 - 7, 2024", or "Feb 25 - Mar 2, 2024" when
/// the window spans two months. The year shown is the start date's year.
pub fn week_range_label(week: &[NaiveDate]) -> String {
    let (Some(start), Some(end)) = (week.first(), week.last()) else {
        return String::new();
    };

    if start.month() == end.month() {
        format!(
            "{} {} - {}, {}",
            start.format("%b"),
            start.day(),
            end.day(),
            start.year()
        )
    } else {
        format!(
            "{} {} - {} {}, {}",
            start.format("%b"),
            start.day(),
            end.format("%b"),
            end.day(),
            start.year()
        )
    }
}

/// Whole calendar days between today and `target`, both truncated to
/// midnight. Same-day targets yield 0; past dates go negative.
pub fn days_until(target: NaiveDate) -> i64 {
    days_until_on(Local::now().date_naive(), target)
}

/// Day difference relative to an explicit `today`. Split out so the countdown
/// is testable without the wall clock.
pub fn days_until_on(today: NaiveDate, target: NaiveDate) -> i64 {
    (target - today).num_days()
}
