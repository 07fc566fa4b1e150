//! Calendar helpers
//!
//! Weeks are Sunday-started calendar weeks throughout the engine.

use chrono::{Datelike, Duration, NaiveDate};

/// First day (Sunday) of the calendar week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// All seven dates of the calendar week containing `date`, Sunday first
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(date);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// First day of the calendar month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 is always valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use rstest::rstest;

    #[rstest]
    // 2024-06-09 is a Sunday
    #[case(2024, 6, 9, 2024, 6, 9)]
    #[case(2024, 6, 12, 2024, 6, 9)]
    #[case(2024, 6, 15, 2024, 6, 9)]
    // Week spanning a month boundary
    #[case(2024, 7, 2, 2024, 6, 30)]
    fn test_week_start(
        #[case] y: i32,
        #[case] m: u32,
        #[case] d: u32,
        #[case] ey: i32,
        #[case] em: u32,
        #[case] ed: u32,
    ) {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let expected = NaiveDate::from_ymd_opt(ey, em, ed).unwrap();
        assert_eq!(week_start(date), expected);
        assert_eq!(week_start(date).weekday(), Weekday::Sun);
    }

    #[test]
    fn test_week_dates_are_consecutive() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let dates = week_dates(date);
        assert_eq!(dates[0].weekday(), Weekday::Sun);
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        assert!(dates.contains(&date));
    }

    #[test]
    fn test_month_start() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(month_start(date), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
