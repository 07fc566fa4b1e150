//! Streak calculator
//!
//! Full recomputation of the consecutive-workout-day streak from the set of
//! distinct completed-workout dates. Not incrementally maintained; every
//! call derives the current streak from scratch.

use chrono::{Duration, NaiveDate};
use fittrack_shared::models::Streak;

/// Recompute the streak as of `today`.
///
/// The current streak counts backward from the most recent workout date,
/// but only when that date is today or yesterday; otherwise it is 0.
/// `longest` never decreases. An empty date set leaves the prior state
/// entirely untouched (deleting all history keeps a stale streak until an
/// explicit reset).
pub fn recalculate(prev: &Streak, today: NaiveDate) -> Streak {
    let Some(&last) = prev.workout_dates.iter().next_back() else {
        return prev.clone();
    };

    let current = if last == today || last == today - Duration::days(1) {
        let mut streak = 1u32;
        let mut cursor = last;
        while prev.workout_dates.contains(&(cursor - Duration::days(1))) {
            streak += 1;
            cursor = cursor - Duration::days(1);
        }
        streak
    } else {
        0
    };

    Streak {
        current,
        longest: prev.longest.max(current),
        last_workout_date: Some(last),
        workout_dates: prev.workout_dates.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn streak_with_dates(dates: &[NaiveDate]) -> Streak {
        Streak {
            workout_dates: dates.iter().copied().collect(),
            ..Streak::default()
        }
    }

    #[test]
    fn test_consecutive_days_ending_today() {
        let today = date(2024, 6, 12);
        let prev = streak_with_dates(&[date(2024, 6, 10), date(2024, 6, 11), today]);

        let streak = recalculate(&prev, today);
        assert_eq!(streak.current, 3);
        assert_eq!(streak.longest, 3);
        assert_eq!(streak.last_workout_date, Some(today));
    }

    #[test]
    fn test_last_workout_yesterday_keeps_streak_alive() {
        let today = date(2024, 6, 12);
        let prev = streak_with_dates(&[date(2024, 6, 10), date(2024, 6, 11)]);

        let streak = recalculate(&prev, today);
        assert_eq!(streak.current, 2);
    }

    #[test]
    fn test_gap_resets_current_but_not_longest() {
        let today = date(2024, 6, 12);
        let mut prev = streak_with_dates(&[date(2024, 6, 1), date(2024, 6, 2), date(2024, 6, 3)]);
        prev.longest = 3;

        let streak = recalculate(&prev, today);
        assert_eq!(streak.current, 0);
        assert_eq!(streak.longest, 3);
    }

    #[test]
    fn test_gap_within_run_stops_the_walk() {
        let today = date(2024, 6, 12);
        // 6/9 present, 6/10 missing, 6/11 and 6/12 present
        let prev = streak_with_dates(&[date(2024, 6, 9), date(2024, 6, 11), today]);

        let streak = recalculate(&prev, today);
        assert_eq!(streak.current, 2);
    }

    #[test]
    fn test_empty_log_set_leaves_state_untouched() {
        let prev = Streak {
            current: 5,
            longest: 9,
            last_workout_date: Some(date(2024, 5, 1)),
            workout_dates: BTreeSet::new(),
        };

        let streak = recalculate(&prev, date(2024, 6, 12));
        assert_eq!(streak.current, 5);
        assert_eq!(streak.longest, 9);
    }

    proptest! {
        #[test]
        fn longest_never_decreases(
            days in proptest::collection::btree_set(0i64..60, 0..40),
            prior_longest in 0u32..50,
        ) {
            let today = date(2024, 6, 30);
            let prev = Streak {
                current: 0,
                longest: prior_longest,
                last_workout_date: None,
                workout_dates: days
                    .iter()
                    .map(|offset| today - Duration::days(*offset))
                    .collect(),
            };

            let streak = recalculate(&prev, today);
            prop_assert!(streak.longest >= prior_longest);
            prop_assert!(streak.longest >= streak.current);
        }

        #[test]
        fn current_is_zero_when_last_workout_is_stale(gap in 2i64..365) {
            let today = date(2024, 6, 30);
            let prev = streak_with_dates(&[today - Duration::days(gap)]);
            let streak = recalculate(&prev, today);
            prop_assert_eq!(streak.current, 0);
        }
    }
}
