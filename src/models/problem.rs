//! A tracked practice problem and the inputs/patches that shape it.
use super::dates::format_iso;
use super::scheduler::schedule_initial;
use crate::error::{Result, SageError};
use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub type ProblemId = i64;

/// Reads an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One solved problem with its review schedule.
///
/// Every field has a serde default so partially populated documents (older
/// backups, rows written by other clients) still load: a missing
/// `reviewCount` is 0 and a missing `nextReviewDate` is null. Explicit nulls
/// are read as the default too.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProblemRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: ProblemId,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pattern: String,
    #[serde(deserialize_with = "null_as_default")]
    pub solved_date: String,
    #[serde(alias = "neuralPathwayCreated", deserialize_with = "null_as_default")]
    pub mastery_achieved: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub review_count: u32,
    pub next_review_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl ProblemRecord {
    /// Merges a review patch into this record.
    pub fn apply_review(&mut self, update: &ReviewUpdate) {
        self.review_count = update.review_count;
        self.next_review_date = update.next_review_date.clone();
        if let Some(mastered) = update.mastery_achieved {
            self.mastery_achieved = mastered;
        }
    }

    /// The scheduled review date, ignoring blank strings.
    pub fn next_review(&self) -> Option<&str> {
        self.next_review_date.as_deref().filter(|d| !d.is_empty())
    }
}

/// Fields supplied when logging a newly solved problem.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewProblem {
    pub url: String,
    pub title: String,
    pub notes: String,
    pub description: String,
    /// Defaults to today when absent or blank.
    pub solved_date: Option<String>,
    #[serde(alias = "neuralPathwayCreated")]
    pub mastery_achieved: bool,
    pub pattern: String,
}

impl NewProblem {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(SageError::MissingField("url"));
        }
        if self.title.trim().is_empty() {
            return Err(SageError::MissingField("title"));
        }
        Ok(())
    }

    /// Metadata is only looked up for a URL when no title was entered.
    pub fn needs_metadata(&self) -> bool {
        !self.url.trim().is_empty() && self.title.trim().is_empty()
    }

    /// Builds the record to persist, with review count 0 and the initial
    /// review scheduled from the solved date. The id is left for storage to assign.
    pub fn into_record(self, user_id: &str, today: NaiveDate) -> Result<ProblemRecord> {
        self.validate()?;

        let solved_date = self
            .solved_date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| format_iso(today));
        let next_review_date = schedule_initial(&solved_date, self.mastery_achieved)?;

        Ok(ProblemRecord {
            id: 0,
            user_id: user_id.to_string(),
            url: self.url.trim().to_string(),
            title: self.title.trim().to_string(),
            notes: self.notes,
            description: self.description,
            pattern: self.pattern,
            solved_date,
            mastery_achieved: self.mastery_achieved,
            review_count: 0,
            next_review_date,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

/// Partial field set produced by completing a review.
///
/// `mastery_achieved` is only present when the review exhausted the
/// interval table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    pub review_count: u32,
    pub next_review_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastery_achieved: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewProblem {
        NewProblem {
            url: "https://leetcode.com/problems/two-sum/".to_string(),
            title: "1. Two Sum".to_string(),
            pattern: "Hash Maps".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_into_record_schedules_first_review() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mut new_problem = form();
        new_problem.solved_date = Some("2024-01-01".to_string());

        let record = new_problem.into_record("alice", today).unwrap();
        assert_eq!(record.user_id, "alice");
        assert_eq!(record.solved_date, "2024-01-01");
        assert_eq!(record.review_count, 0);
        assert_eq!(record.next_review_date.as_deref(), Some("2024-01-04"));
        assert!(!record.created_at.is_empty());
    }

    #[test]
    fn test_solved_date_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let record = form().into_record("alice", today).unwrap();
        assert_eq!(record.solved_date, "2024-03-10");
        assert_eq!(record.next_review_date.as_deref(), Some("2024-03-13"));
    }

    #[test]
    fn test_mastered_at_creation_has_no_review() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mut new_problem = form();
        new_problem.mastery_achieved = true;

        let record = new_problem.into_record("alice", today).unwrap();
        assert!(record.mastery_achieved);
        assert_eq!(record.next_review_date, None);
    }

    #[test]
    fn test_needs_metadata_only_without_title() {
        let mut new_problem = form();
        assert!(!new_problem.needs_metadata());

        new_problem.title = " ".to_string();
        assert!(new_problem.needs_metadata());

        new_problem.url = String::new();
        assert!(!new_problem.needs_metadata());
    }

    #[test]
    fn test_blank_title_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mut new_problem = form();
        new_problem.title = "  ".to_string();

        let err = new_problem.into_record("alice", today).unwrap_err();
        assert!(matches!(err, SageError::MissingField("title")));
    }

    #[test]
    fn test_malformed_solved_date_reported() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mut new_problem = form();
        new_problem.solved_date = Some("yesterday".to_string());

        let err = new_problem.into_record("alice", today).unwrap_err();
        assert!(matches!(err, SageError::InvalidDate(_)));
    }

    #[test]
    fn test_apply_review_keeps_mastery_when_absent() {
        let mut record = ProblemRecord {
            review_count: 1,
            next_review_date: Some("2024-01-04".to_string()),
            ..Default::default()
        };
        record.apply_review(&ReviewUpdate {
            review_count: 2,
            next_review_date: Some("2024-02-01".to_string()),
            mastery_achieved: None,
        });
        assert_eq!(record.review_count, 2);
        assert!(!record.mastery_achieved);

        record.apply_review(&ReviewUpdate {
            review_count: 3,
            next_review_date: None,
            mastery_achieved: Some(true),
        });
        assert!(record.mastery_achieved);
        assert_eq!(record.next_review_date, None);
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let record: ProblemRecord =
            serde_json::from_str(r#"{"title": "Old", "neuralPathwayCreated": true}"#).unwrap();
        assert_eq!(record.title, "Old");
        assert!(record.mastery_achieved);
        assert_eq!(record.review_count, 0);
        assert_eq!(record.next_review_date, None);
        assert_eq!(record.pattern, "");
    }

    #[test]
    fn test_deserialize_treats_null_as_default() {
        let record: ProblemRecord = serde_json::from_str(
            r#"{"title": "T", "reviewCount": null, "pattern": null, "masteryAchieved": null}"#,
        )
        .unwrap();
        assert_eq!(record.title, "T");
        assert_eq!(record.review_count, 0);
        assert_eq!(record.pattern, "");
        assert!(!record.mastery_achieved);
    }

    #[test]
    fn test_review_update_omits_absent_mastery() {
        let update = ReviewUpdate {
            review_count: 1,
            next_review_date: Some("2024-01-08".to_string()),
            mastery_achieved: None,
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"reviewCount":1,"nextReviewDate":"2024-01-08"}"#);
    }
}
