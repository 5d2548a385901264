//! Spreadsheet assembly: scores a batch of resumes and renders one in-memory workbook.

use rust_xlsxwriter::{Workbook, XlsxError};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{extract_text, Upload};
use crate::llm_client::CompletionClient;
use crate::screening::scoring::{score_resume, CandidateScore, ScoringError};

pub const NAME_HEADER: &str = "Candidate Name";
pub const TOTAL_HEADER: &str = "Total Score";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// One spreadsheet row: the candidate, one score per criterion, and their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub name: String,
    pub scores: Vec<u8>,
    pub total: u32,
}

impl From<CandidateScore> for ScoreRow {
    fn from(candidate: CandidateScore) -> Self {
        let total = candidate.scores.iter().map(|&s| u32::from(s)).sum();
        Self {
            name: candidate.name,
            scores: candidate.scores,
            total,
        }
    }
}

impl ScoreRow {
    /// Maps a per-resume scoring outcome to a row. Failures degrade to a zero row
    /// so one bad resume never aborts the batch.
    pub fn from_outcome(
        filename: &str,
        outcome: Result<CandidateScore, ScoringError>,
        criteria_count: usize,
    ) -> Self {
        match outcome {
            Ok(candidate) => candidate.into(),
            Err(e) => {
                warn!(filename, error = %e, "Resume could not be scored; recording zero scores");
                CandidateScore::unscored(criteria_count).into()
            }
        }
    }
}

/// Extracts and scores each resume sequentially, in upload order.
/// Extraction failures abort the whole batch.
pub async fn score_batch(
    uploads: &[Upload],
    criteria: &[String],
    completion: &dyn CompletionClient,
) -> Result<Vec<ScoreRow>, AppError> {
    let mut rows = Vec::with_capacity(uploads.len());

    for upload in uploads {
        let text = extract_text(upload).await?;
        let outcome = score_resume(&text, criteria, completion).await;
        let row = ScoreRow::from_outcome(&upload.filename, outcome, criteria.len());
        info!(
            filename = %upload.filename,
            candidate = %row.name,
            total = row.total,
            "Scored resume"
        );
        rows.push(row);
    }

    Ok(rows)
}

/// Renders a single-sheet workbook: Candidate Name, each criterion, Total Score.
/// All values are literals; no formulas or styling.
pub fn render_workbook(criteria: &[String], rows: &[ScoreRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let total_col = (criteria.len() + 1) as u16;

    sheet.write_string(0, 0, NAME_HEADER)?;
    for (idx, criterion) in criteria.iter().enumerate() {
        sheet.write_string(0, (idx + 1) as u16, criterion)?;
    }
    sheet.write_string(0, total_col, TOTAL_HEADER)?;

    for (row_idx, row) in rows.iter().enumerate() {
        let r = (row_idx + 1) as u32;
        sheet.write_string(r, 0, &row.name)?;
        for (idx, score) in row.scores.iter().enumerate() {
            sheet.write_number(r, (idx + 1) as u16, f64::from(*score))?;
        }
        sheet.write_number(r, total_col, f64::from(row.total))?;
    }

    workbook.save_to_buffer()
}
