//! Fixed-schedule spaced repetition.
//!
//! The schedule walks a fixed interval table instead of adapting to recall quality:
//! - On creation the first review is due 3 days after the solve date
//! - Completing review k (0-indexed) schedules the next one `REVIEW_INTERVALS[k]` days from today
//! - Completing a review once the table is exhausted marks the problem as mastered
//! - A problem logged as already mastered is never scheduled

use super::dates::{add_days, format_iso, parse_iso};
use super::interval::interval_for;
use super::{ProblemRecord, ReviewUpdate};
use crate::error::Result;
use chrono::NaiveDate;

/// Computes the first review date for a new problem.
/// Returns `None` when the problem is already mastered.
pub fn schedule_initial(solved_date: &str, mastery_achieved: bool) -> Result<Option<String>> {
    if mastery_achieved {
        return Ok(None);
    }

    let Some(interval) = interval_for(0) else {
        return Ok(None);
    };

    let solved = parse_iso(solved_date)?;
    Ok(Some(format_iso(add_days(solved, interval))))
}

/// Calculates the fields to update after a review is completed.
///
/// `current_review_count` is the count before this review. The interval is
/// looked up at that index, not at the incremented count, so the review
/// consuming `REVIEW_INTERVALS[k]` is event k just as creation consumes index 0.
/// Applying this twice advances the schedule twice.
pub fn review_update(current_review_count: u32, today: NaiveDate) -> ReviewUpdate {
    let review_count = current_review_count.saturating_add(1);

    match interval_for(current_review_count) {
        Some(interval) => ReviewUpdate {
            review_count,
            next_review_date: Some(format_iso(add_days(today, interval))),
            mastery_achieved: None,
        },
        None => ReviewUpdate {
            review_count,
            next_review_date: None,
            mastery_achieved: Some(true),
        },
    }
}

/// Where a problem sits in its review lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewState {
    Scheduled { review_count: u32 },
    Mastered,
}

impl ReviewState {
    pub fn of(record: &ProblemRecord) -> Self {
        if record.mastery_achieved {
            ReviewState::Mastered
        } else {
            ReviewState::Scheduled {
                review_count: record.review_count,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_initial_schedule() {
        let next = schedule_initial("2024-01-01", false).unwrap();
        assert_eq!(next.as_deref(), Some("2024-01-04"));
    }

    #[test]
    fn test_initial_schedule_mastered() {
        assert_eq!(schedule_initial("2024-01-01", true).unwrap(), None);
        // Nothing is parsed for mastered problems
        assert_eq!(schedule_initial("garbage", true).unwrap(), None);
    }

    #[test]
    fn test_initial_schedule_invalid_date() {
        assert!(schedule_initial("2024-02-30", false).is_err());
    }

    #[test]
    fn test_review_sequence_uses_current_count() {
        let today = date(2024, 6, 1);

        let first = review_update(0, today);
        assert_eq!(first.review_count, 1);
        assert_eq!(first.next_review_date.as_deref(), Some("2024-06-04"));
        assert_eq!(first.mastery_achieved, None);

        let second = review_update(first.review_count, today);
        assert_eq!(second.review_count, 2);
        assert_eq!(second.next_review_date.as_deref(), Some("2024-06-08"));
        assert_eq!(second.mastery_achieved, None);

        let third = review_update(second.review_count, today);
        assert_eq!(third.review_count, 3);
        assert_eq!(third.next_review_date.as_deref(), Some("2024-07-01"));
        assert_eq!(third.mastery_achieved, None);

        let fourth = review_update(third.review_count, today);
        assert_eq!(fourth.review_count, 4);
        assert_eq!(fourth.next_review_date, None);
        assert_eq!(fourth.mastery_achieved, Some(true));
    }

    #[test]
    fn test_mastered_record_stays_unscheduled() {
        let mut record = ProblemRecord {
            review_count: 3,
            ..Default::default()
        };
        record.apply_review(&review_update(record.review_count, date(2024, 6, 1)));
        assert_eq!(ReviewState::of(&record), ReviewState::Mastered);
        assert_eq!(record.next_review_date, None);
    }

    #[test]
    fn test_review_state() {
        let record = ProblemRecord {
            review_count: 2,
            ..Default::default()
        };
        assert_eq!(
            ReviewState::of(&record),
            ReviewState::Scheduled { review_count: 2 }
        );
    }
}
