//! Metadata lookup through LeetCode's GraphQL API.
use super::{MetadataExtractor, ProblemMetadata, require_slug};
use crate::error::{Result, SageError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

pub const LEETCODE_GRAPHQL_URL: &str = "https://leetcode.com/graphql";

const QUESTION_QUERY: &str = "
    query getQuestionDetail($titleSlug: String!) {
      question(titleSlug: $titleSlug) {
        questionId
        title
        difficulty
        topicTags {
          name
        }
        content
      }
    }";

const MAX_PATTERNS: usize = 3;
const MAX_DESCRIPTION_CHARS: usize = 200;

static FIRST_PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<p>([^<]+)</p>").expect("paragraph pattern is valid"));

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<QuestionData>,
}

#[derive(Deserialize)]
struct QuestionData {
    question: Option<Question>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Question {
    question_id: String,
    title: String,
    #[serde(default)]
    difficulty: String,
    #[serde(default)]
    topic_tags: Vec<TopicTag>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct TopicTag {
    name: String,
}

/// Turns a GraphQL response body into metadata.
///
/// The title is prefixed with the question number, patterns are the first
/// three topic tags and the description is the first plain-text paragraph.
pub fn parse_question_response(body: &str) -> Result<ProblemMetadata> {
    let response: GraphQlResponse = serde_json::from_str(body)?;
    let question = response
        .data
        .and_then(|d| d.question)
        .ok_or_else(|| SageError::Metadata("problem not found".to_string()))?;

    let patterns = question
        .topic_tags
        .iter()
        .take(MAX_PATTERNS)
        .map(|tag| tag.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let description: String = question
        .content
        .as_deref()
        .and_then(|content| FIRST_PARAGRAPH_RE.captures(content))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().chars().take(MAX_DESCRIPTION_CHARS).collect())
        .unwrap_or_default();

    Ok(ProblemMetadata {
        title: format!("{}. {}", question.question_id, question.title),
        difficulty: question.difficulty,
        patterns,
        description,
    })
}

pub struct LeetCodeExtractor {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl LeetCodeExtractor {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(LEETCODE_GRAPHQL_URL)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0")
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl MetadataExtractor for LeetCodeExtractor {
    fn extract(&self, url: &str) -> Result<ProblemMetadata> {
        let slug = require_slug(url)?;
        let body = json!({
            "query": QUESTION_QUERY,
            "variables": { "titleSlug": slug },
        });

        let response = self.client.post(&self.endpoint).json(&body).send()?;
        if !response.status().is_success() {
            log::warn!(
                "LeetCode request for {} failed with status {}",
                slug,
                response.status()
            );
            return Err(SageError::Metadata(format!(
                "LeetCode API returned {}",
                response.status()
            )));
        }

        let text = response.text()?;
        let metadata = parse_question_response(&text)?;
        log::debug!("Extracted metadata for {}: {}", slug, metadata.title);
        Ok(metadata)
    }
}
