//! Streak calculation
//!
//! A streak is the count of consecutive calendar days a habit has been
//! completed, walking backward from today. A gap of one day continues the
//! streak, so a habit completed yesterday but not yet today is still live.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Compute the current streak for a completion set as of `today`.
///
/// Walks the de-duplicated dates newest-first with a running cursor seeded
/// at `today`; each date at most one day before the cursor extends the
/// streak and becomes the new cursor. The first gap greater than one day
/// ends the walk. Dates after `today` are ignored.
pub fn compute_streak(completions: &[NaiveDate], today: NaiveDate) -> u32 {
    let unique: BTreeSet<NaiveDate> = completions.iter().copied().collect();

    let mut streak = 0;
    let mut cursor = today;

    for date in unique.iter().rev() {
        let gap = (cursor - *date).num_days();

        if gap < 0 {
            continue;
        }
        if gap > 1 {
            break;
        }

        streak += 1;
        cursor = *date;
    }

    streak
}

/// Longest run of consecutive days anywhere in the completion history.
pub fn longest_streak(completions: &[NaiveDate]) -> u32 {
    let unique: BTreeSet<NaiveDate> = completions.iter().copied().collect();

    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for date in unique {
        run = match prev {
            Some(p) if (date - p).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_empty_completions() {
        assert_eq!(compute_streak(&[], d(2024, 5, 3)), 0);
    }

    #[test]
    fn test_three_consecutive_days() {
        let completions = [d(2024, 5, 1), d(2024, 5, 2), d(2024, 5, 3)];
        assert_eq!(compute_streak(&completions, d(2024, 5, 3)), 3);
    }

    #[test]
    fn test_gap_truncates_streak() {
        // Gap on 05-02: only the most recent day counts
        let completions = [d(2024, 5, 1), d(2024, 5, 3)];
        assert_eq!(compute_streak(&completions, d(2024, 5, 3)), 1);
    }

    #[test]
    fn test_completed_yesterday_is_still_live() {
        let completions = [d(2024, 5, 1), d(2024, 5, 2)];
        assert_eq!(compute_streak(&completions, d(2024, 5, 3)), 2);
    }

    #[test]
    fn test_two_day_old_completion_is_reset() {
        let completions = [d(2024, 5, 1)];
        assert_eq!(compute_streak(&completions, d(2024, 5, 3)), 0);
    }

    #[test]
    fn test_duplicates_do_not_inflate() {
        let completions = [d(2024, 5, 2), d(2024, 5, 2), d(2024, 5, 3)];
        assert_eq!(compute_streak(&completions, d(2024, 5, 3)), 2);
    }

    #[test]
    fn test_appending_today_increments_by_one() {
        // Streak monotonicity: a set forming a streak that ends yesterday
        // gains exactly one day when today is appended.
        let mut completions = vec![d(2024, 5, 1), d(2024, 5, 2)];
        let before = compute_streak(&completions, d(2024, 5, 3));

        completions.push(d(2024, 5, 3));
        let after = compute_streak(&completions, d(2024, 5, 3));

        assert_eq!(after, before + 1);
    }

    #[test]
    fn test_earlier_history_beyond_gap_is_ignored() {
        // A long run in April does not leak past the gap before it
        let completions = [
            d(2024, 4, 10),
            d(2024, 4, 11),
            d(2024, 4, 12),
            d(2024, 4, 13),
            d(2024, 5, 2),
            d(2024, 5, 3),
        ];
        assert_eq!(compute_streak(&completions, d(2024, 5, 3)), 2);
    }

    #[test]
    fn test_future_dates_are_ignored() {
        let completions = [d(2024, 5, 3), d(2024, 5, 10)];
        assert_eq!(compute_streak(&completions, d(2024, 5, 3)), 1);
    }

    #[test]
    fn test_longest_streak_spans_old_history() {
        let completions = [
            d(2024, 4, 10),
            d(2024, 4, 11),
            d(2024, 4, 12),
            d(2024, 5, 2),
            d(2024, 5, 3),
        ];
        assert_eq!(longest_streak(&completions), 3);
    }

    #[test]
    fn test_longest_streak_empty() {
        assert_eq!(longest_streak(&[]), 0);
    }
}
