//! Birthday calendar in the clan's local time (UTC+7).

use chrono::{Datelike, Duration, NaiveDate};

use crate::types::Timestamp;

/// Offset of Vietnam time from UTC, in hours.
pub const CLAN_UTC_OFFSET_HOURS: i32 = 7;

/// Prefix of the `app_settings` key marking a day's notifications as sent.
pub const SENT_MARKER_PREFIX: &str = "birthday_sent:";

/// The calendar date at `now` in UTC+7.
pub fn clan_today(now: Timestamp) -> NaiveDate {
    (now + Duration::hours(i64::from(CLAN_UTC_OFFSET_HOURS))).date_naive()
}

/// Whether a birthday (`month`/`day`) falls on `date`.
///
/// People born on 29 February celebrate on 28 February in common years.
pub fn is_birthday_on(month: u32, day: u32, date: NaiveDate) -> bool {
    if month == date.month() && day == date.day() {
        return true;
    }
    let leap = NaiveDate::from_ymd_opt(date.year(), 2, 29).is_some();
    !leap && month == 2 && day == 29 && date.month() == 2 && date.day() == 28
}

/// `app_settings` key for the given day's sent marker.
pub fn sent_marker_key(date: NaiveDate) -> String {
    format!("{SENT_MARKER_PREFIX}{}", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn clan_date_rolls_over_at_17_utc() {
        let before = Utc.with_ymd_and_hms(2025, 3, 9, 16, 59, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 3, 9, 17, 0, 0).unwrap();
        assert_eq!(clan_today(before), NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
        assert_eq!(clan_today(after), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }

    #[test]
    fn exact_match() {
        let d = NaiveDate::from_ymd_opt(2025, 7, 14).unwrap();
        assert!(is_birthday_on(7, 14, d));
        assert!(!is_birthday_on(7, 15, d));
    }

    #[test]
    fn leap_day_birthdays_fall_back_to_feb_28() {
        let common = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        let leap = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        assert!(is_birthday_on(2, 29, common));
        assert!(!is_birthday_on(2, 29, leap));
        assert!(is_birthday_on(2, 29, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
    }

    #[test]
    fn marker_key_uses_iso_date() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(sent_marker_key(d), "birthday_sent:2025-01-05");
    }
}
