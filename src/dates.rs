//! The calendar-date contract for transaction dates.
//!
//! Transaction dates are plain calendar dates. Whenever two dates (or a date
//! and a point in time) are compared, the date is pinned to its UTC noon
//! instant so that no computation can shift it across a day boundary under a
//! local timezone offset. Every call site that buckets, filters, or compares
//! transaction dates goes through this module.

use time::{Date, Duration, Month, OffsetDateTime, Time, macros::time};

/// The hour that calendar dates are pinned to when a point in time is needed.
const NOON: Time = time!(12:00);

/// The UTC noon instant of a calendar date.
pub fn noon_utc(date: Date) -> OffsetDateTime {
    OffsetDateTime::new_utc(date, NOON)
}

/// Whether `date` falls in the same calendar month as `reference`.
pub fn in_month_of(date: Date, reference: Date) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

/// The first day of the calendar month immediately before the one containing
/// `date`.
pub fn previous_month(date: Date) -> Date {
    let (year, month) = match date.month() {
        Month::January => (date.year() - 1, Month::December),
        month => (date.year(), month.previous()),
    };

    // Day 1 exists in every month.
    Date::from_calendar_date(year, month, 1).unwrap_or(date)
}

/// The date `months` calendar months before `date`, with the day clamped to
/// the length of the target month.
pub fn months_back(date: Date, months: u32) -> Date {
    let mut year = date.year();
    let mut month = date.month();

    for _ in 0..months {
        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    let day = date.day().min(time::util::days_in_year_month(year, month));

    Date::from_calendar_date(year, month, day).unwrap_or(date)
}

/// Whether `date` falls in the inclusive rolling window
/// `[reference - days_back, reference + days_ahead]`.
pub fn in_rolling_window(date: Date, reference: Date, days_back: i64, days_ahead: i64) -> bool {
    let start = reference.saturating_sub(Duration::days(days_back));
    let end = reference.saturating_add(Duration::days(days_ahead));

    date >= start && date <= end
}

/// The three-letter Portuguese abbreviation of a month.
pub fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Fev",
        Month::March => "Mar",
        Month::April => "Abr",
        Month::May => "Mai",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Ago",
        Month::September => "Set",
        Month::October => "Out",
        Month::November => "Nov",
        Month::December => "Dez",
    }
}

/// A month bucket label such as "Mar 2024".
pub fn month_label(year: i32, month: Month) -> String {
    format!("{} {}", month_abbreviation(month), year)
}

/// The Portuguese weekday abbreviations, Sunday through Saturday.
pub const WEEKDAY_LABELS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

/// The slot index of `date` in a Sunday-first week, via its UTC noon instant.
pub fn weekday_slot(date: Date) -> usize {
    noon_utc(date).weekday().number_days_from_sunday() as usize
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn noon_utc_pins_date_to_midday() {
        let instant = noon_utc(date!(2024 - 03 - 15));

        assert_eq!(instant.date(), date!(2024 - 03 - 15));
        assert_eq!(instant.hour(), 12);
        assert_eq!(instant.offset(), time::UtcOffset::UTC);
    }

    #[test]
    fn in_month_of_matches_same_month_only() {
        let reference = date!(2024 - 03 - 15);

        assert!(in_month_of(date!(2024 - 03 - 01), reference));
        assert!(in_month_of(date!(2024 - 03 - 31), reference));
        assert!(!in_month_of(date!(2024 - 02 - 29), reference));
        assert!(!in_month_of(date!(2023 - 03 - 15), reference));
    }

    #[test]
    fn previous_month_wraps_january_to_december() {
        assert_eq!(previous_month(date!(2024 - 01 - 15)), date!(2023 - 12 - 01));
        assert_eq!(previous_month(date!(2024 - 03 - 31)), date!(2024 - 02 - 01));
    }

    #[test]
    fn months_back_clamps_day_to_month_length() {
        assert_eq!(months_back(date!(2024 - 03 - 31), 1), date!(2024 - 02 - 29));
        assert_eq!(months_back(date!(2024 - 07 - 15), 6), date!(2024 - 01 - 15));
        assert_eq!(months_back(date!(2024 - 02 - 15), 2), date!(2023 - 12 - 15));
    }

    #[test]
    fn rolling_window_is_inclusive_at_both_ends() {
        let reference = date!(2024 - 06 - 15);

        assert!(in_rolling_window(date!(2024 - 06 - 08), reference, 7, 7));
        assert!(in_rolling_window(date!(2024 - 06 - 22), reference, 7, 7));
        assert!(!in_rolling_window(date!(2024 - 06 - 07), reference, 7, 7));
        assert!(!in_rolling_window(date!(2024 - 06 - 23), reference, 7, 7));
    }

    #[test]
    fn month_label_is_locale_stable() {
        assert_eq!(month_label(2024, Month::March), "Mar 2024");
        assert_eq!(month_label(2025, Month::February), "Fev 2025");
    }

    #[test]
    fn weekday_slot_is_sunday_first() {
        // 2024-06-16 was a Sunday.
        assert_eq!(weekday_slot(date!(2024 - 06 - 16)), 0);
        assert_eq!(weekday_slot(date!(2024 - 06 - 22)), 6);
    }
}
