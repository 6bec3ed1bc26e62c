//! Problem metadata lookup from a problem URL.
//!
//! Extraction is best effort: a failed lookup leaves the pattern and
//! description empty, and nothing in scheduling depends on them.

pub mod leetcode;

use crate::error::{Result, SageError};
use crate::models::NewProblem;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use leetcode::LeetCodeExtractor;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/problems/([^/?#]+)").expect("slug pattern is valid"));

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemMetadata {
    pub title: String,
    pub difficulty: String,
    /// Comma-separated topic names.
    pub patterns: String,
    pub description: String,
}

impl ProblemMetadata {
    /// Copies extracted values into the blank fields of a new problem.
    pub fn fill(self, problem: &mut NewProblem) {
        if problem.title.trim().is_empty() {
            problem.title = self.title;
        }
        if problem.pattern.trim().is_empty() {
            problem.pattern = self.patterns;
        }
        if problem.description.trim().is_empty() {
            problem.description = self.description;
        }
    }
}

pub trait MetadataExtractor {
    fn extract(&self, url: &str) -> Result<ProblemMetadata>;
}

/// The `<slug>` in `.../problems/<slug>/...`.
pub fn problem_slug(url: &str) -> Option<&str> {
    SLUG_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub(crate) fn require_slug(url: &str) -> Result<&str> {
    problem_slug(url).ok_or_else(|| SageError::Metadata(format!("not a problem URL: {}", url)))
}

/// Offline extractor that derives a title from the URL slug alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SlugExtractor;

impl MetadataExtractor for SlugExtractor {
    fn extract(&self, url: &str) -> Result<ProblemMetadata> {
        let slug = require_slug(url)?;
        let title = slug
            .split('-')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        Ok(ProblemMetadata {
            title,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_slug() {
        assert_eq!(
            problem_slug("https://leetcode.com/problems/two-sum/"),
            Some("two-sum")
        );
        assert_eq!(
            problem_slug("https://leetcode.com/problems/lru-cache?envType=daily"),
            Some("lru-cache")
        );
        assert_eq!(problem_slug("https://leetcode.com/contest/"), None);
    }

    #[test]
    fn test_slug_extractor_title() {
        let meta = SlugExtractor
            .extract("https://leetcode.com/problems/longest-common-subsequence/description/")
            .unwrap();
        assert_eq!(meta.title, "Longest Common Subsequence");
        assert!(meta.patterns.is_empty());
    }

    #[test]
    fn test_slug_extractor_rejects_other_urls() {
        let err = SlugExtractor.extract("https://example.com/").unwrap_err();
        assert!(matches!(err, SageError::Metadata(_)));
    }

    #[test]
    fn test_fill_only_blank_fields() {
        let mut problem = NewProblem {
            title: "My title".to_string(),
            ..Default::default()
        };
        ProblemMetadata {
            title: "1. Two Sum".to_string(),
            difficulty: "Easy".to_string(),
            patterns: "Array, Hash Table".to_string(),
            description: "Given an array".to_string(),
        }
        .fill(&mut problem);

        assert_eq!(problem.title, "My title");
        assert_eq!(problem.pattern, "Array, Hash Table");
        assert_eq!(problem.description, "Given an array");
    }
}
