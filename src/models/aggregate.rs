//! Derived views over a snapshot of problem records.
//!
//! Every function here borrows its input and returns a fresh value, so running
//! them twice over the same snapshot gives the same result. Records with
//! missing fields are treated as empty or false and never cause a failure.

use super::dates::{format_iso, sub_days};
use super::ProblemRecord;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const GRID_WEEKS: u32 = 52;
pub const DAYS_PER_WEEK: u32 = 7;

/// Solved date to number of problems solved that day. Days without a solve are absent.
pub type CalendarBuckets = BTreeMap<String, usize>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: String,
    pub count: usize,
}

/// Problems sharing one pattern label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternGroup<'a> {
    pub pattern: &'a str,
    pub problems: Vec<&'a ProblemRecord>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeStats {
    pub total_this_year: usize,
    pub solved_today: usize,
    pub active_days: usize,
}

pub fn calendar_buckets(problems: &[ProblemRecord]) -> CalendarBuckets {
    let mut buckets = CalendarBuckets::new();
    for problem in problems {
        *buckets.entry(problem.solved_date.clone()).or_insert(0) += 1;
    }
    buckets
}

/// Expands the buckets into 52 rows of 7 days covering the 364 days that end
/// with `today`. Rows run oldest first and the last cell of the last row is today.
pub fn week_grid(buckets: &CalendarBuckets, today: NaiveDate) -> Vec<Vec<CalendarDay>> {
    (0..GRID_WEEKS)
        .rev()
        .map(|weeks_back| {
            (0..DAYS_PER_WEEK)
                .map(|day| {
                    let offset = weeks_back * DAYS_PER_WEEK + (DAYS_PER_WEEK - 1 - day);
                    let date = format_iso(sub_days(today, offset));
                    let count = buckets.get(&date).copied().unwrap_or(0);
                    CalendarDay { date, count }
                })
                .collect()
        })
        .collect()
}

/// Unmastered problems whose review date is `today` or earlier, in input order.
///
/// Dates are compared as `YYYY-MM-DD` strings.
pub fn due_for_review<'a>(problems: &'a [ProblemRecord], today: &str) -> Vec<&'a ProblemRecord> {
    problems
        .iter()
        .filter(|p| !p.mastery_achieved)
        .filter(|p| p.next_review().is_some_and(|next| next <= today))
        .collect()
}

/// Groups unmastered problems by their exact pattern label. Groups appear in the
/// order their label is first seen; problems without a pattern are skipped.
pub fn group_by_pattern(problems: &[ProblemRecord]) -> Vec<PatternGroup<'_>> {
    let mut groups: Vec<PatternGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for problem in problems {
        if problem.pattern.is_empty() || problem.mastery_achieved {
            continue;
        }
        let slot = *index.entry(problem.pattern.as_str()).or_insert_with(|| {
            groups.push(PatternGroup {
                pattern: problem.pattern.as_str(),
                problems: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].problems.push(problem);
    }

    groups
}

pub fn practice_stats(problems: &[ProblemRecord], today: NaiveDate) -> PracticeStats {
    let today_str = format_iso(today);
    let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1)
        .map(format_iso)
        .unwrap_or_default();

    let total_this_year = problems
        .iter()
        .filter(|p| p.solved_date.as_str() >= year_start.as_str())
        .count();
    let solved_today = problems
        .iter()
        .filter(|p| p.solved_date == today_str)
        .count();
    let active_days = calendar_buckets(problems).len();

    PracticeStats {
        total_this_year,
        solved_today,
        active_days,
    }
}

/// All derived views for one snapshot and one "today", with owned data so it
/// can be cached alongside the snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeOverview {
    pub today: String,
    pub calendar: CalendarBuckets,
    pub weeks: Vec<Vec<CalendarDay>>,
    pub needs_review: Vec<ProblemRecord>,
    pub problems_by_pattern: Vec<(String, Vec<ProblemRecord>)>,
    pub stats: PracticeStats,
}

impl PracticeOverview {
    pub fn build(problems: &[ProblemRecord], today: NaiveDate) -> Self {
        let today_str = format_iso(today);
        let calendar = calendar_buckets(problems);
        let weeks = week_grid(&calendar, today);
        let needs_review = due_for_review(problems, &today_str)
            .into_iter()
            .cloned()
            .collect();
        let problems_by_pattern = group_by_pattern(problems)
            .into_iter()
            .map(|group| {
                (
                    group.pattern.to_string(),
                    group.problems.into_iter().cloned().collect(),
                )
            })
            .collect();
        let stats = practice_stats(problems, today);

        Self {
            today: today_str,
            calendar,
            weeks,
            needs_review,
            problems_by_pattern,
            stats,
        }
    }
}
