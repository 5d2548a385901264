//! Criteria extraction. Asks the model for the selection criteria of a job description.

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::llm_client::json_repair::{parse_lenient, LenientParseError};
use crate::llm_client::{CompletionClient, CompletionError};
use crate::screening::prompts::CRITERIA_PROMPT_TEMPLATE;

#[derive(Debug, Error)]
pub enum CriteriaExtractionError {
    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("{0}")]
    Malformed(#[from] LenientParseError),

    #[error("response has no \"Criteria\" key")]
    MissingKey,

    #[error("\"Criteria\" must be a list of strings, got: {0}")]
    InvalidShape(String),
}

/// Returns the criteria in the order the model listed them.
///
/// A bare string value such as "Not Mentioned" is passed through verbatim as
/// a one-element list rather than being treated as "no criteria".
pub async fn extract_criteria(
    jd_text: &str,
    completion: &dyn CompletionClient,
) -> Result<Vec<String>, CriteriaExtractionError> {
    let prompt = CRITERIA_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
    let raw = completion.complete(&prompt).await?;
    let criteria = criteria_from_response(&raw)?;
    info!(count = criteria.len(), "Extracted criteria");
    Ok(criteria)
}

fn criteria_from_response(raw: &str) -> Result<Vec<String>, CriteriaExtractionError> {
    let parsed = parse_lenient(raw)?;
    let value = parsed
        .get("Criteria")
        .or_else(|| parsed.get("criteria"))
        .ok_or(CriteriaExtractionError::MissingKey)?;

    match value {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(CriteriaExtractionError::InvalidShape(other.to_string())),
            })
            .collect(),
        other => Err(CriteriaExtractionError::InvalidShape(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubCompletion;

    #[tokio::test]
    async fn test_criteria_come_from_completion_output() {
        let stub = StubCompletion::fixed(r#"{"Criteria": ["3 years Java experience"]}"#);
        let criteria = extract_criteria("Requires 3 years Java experience", stub.as_ref())
            .await
            .unwrap();
        assert_eq!(criteria, vec!["3 years Java experience"]);

        let prompts = stub.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("```Requires 3 years Java experience```"));
    }

    #[test]
    fn test_literal_style_response_is_accepted() {
        let criteria =
            criteria_from_response("{'Criteria': ['Python', 'AWS certification',]}").unwrap();
        assert_eq!(criteria, vec!["Python", "AWS certification"]);
    }

    #[test]
    fn test_lowercase_key_is_accepted() {
        let criteria = criteria_from_response(r#"{"criteria": ["SQL"]}"#).unwrap();
        assert_eq!(criteria, vec!["SQL"]);
    }

    #[test]
    fn test_not_mentioned_is_passed_through() {
        let criteria = criteria_from_response(r#"{"Criteria": "Not Mentioned"}"#).unwrap();
        assert_eq!(criteria, vec!["Not Mentioned"]);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let err = criteria_from_response(r#"{"skills": ["Rust"]}"#).unwrap_err();
        assert!(matches!(err, CriteriaExtractionError::MissingKey));
    }

    #[test]
    fn test_non_string_entries_are_rejected() {
        let err = criteria_from_response(r#"{"Criteria": ["Rust", 5]}"#).unwrap_err();
        assert!(matches!(err, CriteriaExtractionError::InvalidShape(v) if v == "5"));
    }

    #[test]
    fn test_unparseable_response_is_an_error() {
        let err = criteria_from_response("I could not read the document.").unwrap_err();
        assert!(matches!(err, CriteriaExtractionError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_completion_failure_propagates() {
        let stub = StubCompletion::failing();
        let err = extract_criteria("any", stub.as_ref()).await.unwrap_err();
        assert!(matches!(err, CriteriaExtractionError::Completion(_)));
    }
}
