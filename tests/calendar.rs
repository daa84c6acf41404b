#![forbid(unsafe_code)]
use chrono::Datelike;
use rotaplan::calendar::{all_dates_in_month, weekday_index, working_dates_in_month};

#[test]
fn all_dates_covers_whole_month() {
    let dates = all_dates_in_month(2024, 2).unwrap();
    assert_eq!(dates.len(), 29); // année bissextile
    assert_eq!(dates.first().unwrap().day(), 1);
    assert_eq!(dates.last().unwrap().day(), 29);
    for window in dates.windows(2) {
        assert!(window[0] < window[1]);
    }
}

#[test]
fn working_dates_are_weekdays_only_and_idempotent() {
    let first = working_dates_in_month(2025, 4).unwrap();
    let second = working_dates_in_month(2025, 4).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 22);
    assert!(first.iter().all(|d| weekday_index(*d) < 5));
}

#[test]
fn invalid_month_is_rejected() {
    assert!(all_dates_in_month(2025, 13).is_err());
    assert!(working_dates_in_month(2025, 0).is_err());
}
