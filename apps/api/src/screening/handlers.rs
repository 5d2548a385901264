//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_text, Upload};
use crate::llm_client::json_repair::parse_lenient;
use crate::screening::criteria::extract_criteria;
use crate::screening::workbook::{render_workbook, score_batch, XLSX_CONTENT_TYPE};
use crate::state::AppState;

const SCORES_DISPOSITION: &str = "attachment; filename=scores.xlsx";

#[derive(Debug, Serialize)]
pub struct CriteriaResponse {
    pub criteria: Vec<String>,
}

/// Multipart fields split into plain values and file uploads, in arrival order.
#[derive(Debug, Default)]
struct FormFields {
    values: Vec<(String, String)>,
    files: Vec<(String, Upload)>,
}

impl FormFields {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = FormFields::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let content = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read upload '{filename}': {e}"))
                    })?;
                    form.files.push((name, Upload { filename, content }));
                }
                None => {
                    let value = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read form field '{name}': {e}"))
                    })?;
                    form.values.push((name, value));
                }
            }
        }

        Ok(form)
    }

    fn value(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn take_files(&mut self, name: &str) -> Vec<Upload> {
        let (matching, rest) = std::mem::take(&mut self.files)
            .into_iter()
            .partition(|(n, _)| n == name);
        self.files = rest;
        matching.into_iter().map(|(_, upload)| upload).collect()
    }
}

/// POST /extract-criteria
///
/// Reads the job description in form field `file` and returns its selection criteria.
pub async fn handle_extract_criteria(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CriteriaResponse>, AppError> {
    let mut form = FormFields::read(multipart).await?;
    let upload = form
        .take_files("file")
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Validation("Missing form field 'file'".to_string()))?;

    info!(filename = %upload.filename, "Extracting criteria");

    let text = extract_text(&upload).await?;
    let criteria = extract_criteria(&text, state.completion.as_ref()).await?;

    Ok(Json(CriteriaResponse { criteria }))
}

/// POST /score-resumes
///
/// Scores every resume in `files` against the `criteria` list and returns the
/// results as an xlsx attachment. The whole batch completes before any bytes are sent.
pub async fn handle_score_resumes(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = FormFields::read(multipart).await?;

    let raw_criteria = form
        .value("criteria")
        .ok_or_else(|| AppError::Validation("Missing form field 'criteria'".to_string()))?;
    let criteria = parse_criteria_field(raw_criteria)?;

    let uploads = form.take_files("files");
    if uploads.is_empty() {
        return Err(AppError::Validation(
            "At least one resume is required in form field 'files'".to_string(),
        ));
    }

    info!(
        criteria = criteria.len(),
        resumes = uploads.len(),
        "Scoring resumes"
    );

    let rows = score_batch(&uploads, &criteria, state.completion.as_ref()).await?;
    let workbook = render_workbook(&criteria, &rows)?;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, SCORES_DISPOSITION),
        ],
        workbook,
    ))
}

/// Decodes the `criteria` form value: a JSON or literal-style list of strings.
fn parse_criteria_field(raw: &str) -> Result<Vec<String>, AppError> {
    let value = parse_lenient(raw)
        .map_err(|_| AppError::Validation("Invalid criteria format".to_string()))?;
    let items = value
        .as_array()
        .ok_or_else(|| AppError::Validation("Criteria must be a list".to_string()))?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                AppError::Validation("Criteria must be a list of strings".to_string())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_field_accepts_json_and_literal_lists() {
        assert_eq!(
            parse_criteria_field(r#"["Python", "SQL"]"#).unwrap(),
            vec!["Python", "SQL"]
        );
        assert_eq!(
            parse_criteria_field("['Python', \"Bachelor's degree\"]").unwrap(),
            vec!["Python", "Bachelor's degree"]
        );
    }

    #[test]
    fn test_criteria_field_rejections() {
        let cases = [
            ("{'a': 1}", "Criteria must be a list"),
            ("\"Python\"", "Criteria must be a list"),
            ("[1, 2]", "Criteria must be a list of strings"),
            ("Python, SQL", "Invalid criteria format"),
        ];
        for (raw, expected) in cases {
            let err = parse_criteria_field(raw).unwrap_err();
            assert!(matches!(&err, AppError::Validation(_)), "{raw}: {err:?}");
            assert_eq!(err.to_string(), expected, "{raw}");
        }
    }
}
