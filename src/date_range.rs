// Date range resolution for the named presets plus the small helpers the
// date selector needs. Everything is a pure function of its arguments; "now"
// is always passed in.
use crate::types::{DateRange, DateRangePreset};
use chrono::{Days, Months, NaiveDate, NaiveDateTime};

fn start_of_day(d: NaiveDate) -> Option<NaiveDateTime> {
    d.and_hms_milli_opt(0, 0, 0, 0)
}

fn end_of_day(d: NaiveDate) -> Option<NaiveDateTime> {
    d.and_hms_milli_opt(23, 59, 59, 999)
}

/// Resolve `preset` against `now`.
///
/// `to` is the end of `now`'s calendar day and `from` the start of the first
/// day in the window. Day presets count whole calendar days inclusively;
/// month presets step back calendar months, clamping to the end of a shorter
/// month. The clamping is deliberate: a month preset never rolls over into
/// the following month, so 31 May minus 3 months is 29 Feb, not 2 Mar.
/// `Custom` resolves to `None`: the caller owns custom bounds.
pub fn resolve(preset: DateRangePreset, now: NaiveDateTime) -> Option<DateRange> {
    let today = now.date();
    let first_day = match preset {
        DateRangePreset::Custom => return None,
        DateRangePreset::Last7Days => today.checked_sub_days(Days::new(6))?,
        DateRangePreset::Last30Days => today.checked_sub_days(Days::new(29))?,
        DateRangePreset::Last3Months => today.checked_sub_months(Months::new(3))?,
        DateRangePreset::Last6Months => today.checked_sub_months(Months::new(6))?,
    };
    Some(DateRange {
        from: start_of_day(first_day)?,
        to: end_of_day(today)?,
    })
}

/// String-keyed entry point; unknown keys resolve to `None` like `custom`.
pub fn get_date_range(key: &str, now: NaiveDateTime) -> Option<DateRange> {
    DateRangePreset::parse(key).and_then(|p| resolve(p, now))
}

pub fn is_valid(range: &DateRange) -> bool {
    range.from <= range.to
}

/// Inclusive on both ends; an inverted range contains nothing.
pub fn contains(range: &DateRange, instant: NaiveDateTime) -> bool {
    is_valid(range) && range.from <= instant && instant <= range.to
}

pub fn format_date_range(range: Option<&DateRange>) -> String {
    match range {
        Some(r) => format!(
            "{} - {}",
            r.from.date().format("%Y-%m-%d"),
            r.to.date().format("%Y-%m-%d")
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::at;
    use chrono::{Duration, NaiveTime, Timelike};

    fn midnight() -> NaiveTime {
        NaiveTime::from_hms_milli_opt(0, 0, 0, 0).unwrap()
    }

    fn last_milli() -> NaiveTime {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap()
    }

    #[test]
    fn seven_days_spans_seven_calendar_days() {
        let now = at(2024, 3, 15, 14, 20, 5);
        let r = resolve(DateRangePreset::Last7Days, now).unwrap();
        assert_eq!(r.from.date(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(r.to.date(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!((r.to.date() - r.from.date()).num_days(), 6);
        assert_eq!(r.from.time(), midnight());
        assert_eq!(r.to.time(), last_milli());
        assert_eq!(r.to.nanosecond(), 999_000_000);
    }

    #[test]
    fn thirty_days_starts_twenty_nine_days_back() {
        let now = at(2024, 3, 15, 0, 0, 1);
        let r = resolve(DateRangePreset::Last30Days, now).unwrap();
        assert_eq!(r.from, at(2024, 2, 15, 0, 0, 0));
        assert_eq!(r.to - r.from, Duration::days(30) - Duration::milliseconds(1));
    }

    #[test]
    fn month_presets_step_calendar_months() {
        let now = at(2024, 8, 20, 9, 0, 0);
        let three = resolve(DateRangePreset::Last3Months, now).unwrap();
        assert_eq!(three.from, at(2024, 5, 20, 0, 0, 0));
        let six = resolve(DateRangePreset::Last6Months, now).unwrap();
        assert_eq!(six.from, at(2024, 2, 20, 0, 0, 0));
        assert_eq!(six.to.date(), now.date());
    }

    #[test]
    fn month_presets_clamp_to_short_months() {
        let now = at(2024, 5, 31, 12, 0, 0);
        let r = resolve(DateRangePreset::Last3Months, now).unwrap();
        assert_eq!(r.from, at(2024, 2, 29, 0, 0, 0));
    }

    #[test]
    fn custom_and_unknown_resolve_to_none() {
        let now = at(2024, 3, 15, 12, 0, 0);
        assert_eq!(get_date_range("custom", now), None);
        assert_eq!(get_date_range("unrecognized", now), None);
        assert!(get_date_range("7days", now).is_some());
    }

    #[test]
    fn containment_is_inclusive() {
        let r = DateRange {
            from: at(2024, 1, 10, 0, 0, 0),
            to: at(2024, 1, 20, 0, 0, 0),
        };
        assert!(contains(&r, r.from));
        assert!(contains(&r, r.to));
        assert!(contains(&r, at(2024, 1, 15, 6, 0, 0)));
        assert!(!contains(&r, at(2024, 1, 9, 23, 59, 59)));
        assert!(!contains(&r, at(2024, 1, 20, 0, 0, 1)));
    }

    #[test]
    fn inverted_range_is_invalid_and_contains_nothing() {
        let r = DateRange {
            from: at(2024, 1, 20, 0, 0, 0),
            to: at(2024, 1, 10, 0, 0, 0),
        };
        assert!(!is_valid(&r));
        assert!(!contains(&r, at(2024, 1, 15, 0, 0, 0)));
    }

    #[test]
    fn formatting_and_labels() {
        let r = DateRange {
            from: at(2024, 1, 10, 0, 0, 0),
            to: at(2024, 1, 20, 23, 59, 59),
        };
        assert_eq!(format_date_range(Some(&r)), "2024-01-10 - 2024-01-20");
        assert_eq!(format_date_range(None), "");
        assert_eq!(DateRangePreset::Last7Days.label(), "Last 7 Days");
        assert_eq!(DateRangePreset::Custom.label(), "Custom");
    }
}
