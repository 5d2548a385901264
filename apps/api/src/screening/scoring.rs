//! Resume scoring: rates one resume 0–5 against each criterion.
//!
//! `score_resume` reports every failure as a `ScoringError`; the batch assembler
//! decides how to degrade. Scores are always normalised to one slot per criterion.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::llm_client::json_repair::{parse_lenient, LenientParseError};
use crate::llm_client::{CompletionClient, CompletionError};
use crate::screening::prompts::SCORING_PROMPT_TEMPLATE;

pub const UNKNOWN_CANDIDATE: &str = "Unknown";
pub const MAX_SCORE: u8 = 5;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("{0}")]
    Malformed(#[from] LenientParseError),

    #[error("response has no \"scores\" key")]
    MissingScores,

    #[error("\"scores\" must be a list or a mapping, got: {0}")]
    InvalidScores(String),
}

/// The model's verdict for one resume.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub name: String,
    /// One entry per criterion, same order as the criteria list.
    pub scores: Vec<u8>,
}

impl CandidateScore {
    /// Zero scores under the unknown name; used when a resume could not be scored.
    pub fn unscored(criteria_count: usize) -> Self {
        Self {
            name: UNKNOWN_CANDIDATE.to_string(),
            scores: vec![0; criteria_count],
        }
    }
}

pub async fn score_resume(
    resume_text: &str,
    criteria: &[String],
    completion: &dyn CompletionClient,
) -> Result<CandidateScore, ScoringError> {
    let prompt = SCORING_PROMPT_TEMPLATE
        .replace("{criteria}", &format_criteria(criteria))
        .replace("{n}", &criteria.len().to_string())
        .replace("{resume_text}", resume_text);

    let raw = completion.complete(&prompt).await?;
    candidate_from_response(&raw, criteria)
}

fn format_criteria(criteria: &[String]) -> String {
    serde_json::to_string(criteria).unwrap_or_else(|_| criteria.join(", "))
}

fn candidate_from_response(raw: &str, criteria: &[String]) -> Result<CandidateScore, ScoringError> {
    let parsed = parse_lenient(raw)?;

    let name = parsed
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_CANDIDATE)
        .to_string();

    let scores = match parsed.get("scores").ok_or(ScoringError::MissingScores)? {
        Value::Array(items) => positional_scores(items, criteria.len()),
        Value::Object(map) => keyed_scores(map, criteria),
        other => return Err(ScoringError::InvalidScores(other.to_string())),
    };

    Ok(CandidateScore { name, scores })
}

/// Pads missing positions with 0 and drops extras.
fn positional_scores(items: &[Value], criteria_count: usize) -> Vec<u8> {
    (0..criteria_count)
        .map(|idx| items.get(idx).map(normalize_score).unwrap_or(0))
        .collect()
}

/// Looks each criterion up by exact key, then case-insensitively.
fn keyed_scores(map: &Map<String, Value>, criteria: &[String]) -> Vec<u8> {
    criteria
        .iter()
        .map(|criterion| {
            map.get(criterion)
                .or_else(|| {
                    map.iter()
                        .find(|(key, _)| key.trim().eq_ignore_ascii_case(criterion.trim()))
                        .map(|(_, v)| v)
                })
                .map(normalize_score)
                .unwrap_or(0)
        })
        .collect()
}

/// Integers 0–5 (also as integral floats or numeric strings); anything else is 0.
fn normalize_score(value: &Value) -> u8 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.fract() == 0.0 && (0.0..=f64::from(MAX_SCORE)).contains(&n) => n as u8,
        _ => 0,
    }
}
