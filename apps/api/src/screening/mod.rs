// Screening: criteria extraction from a job description, resume scoring against
// those criteria, and the xlsx report for a scored batch.
// All model calls go through llm_client.

pub mod criteria;
pub mod handlers;
pub mod prompts;
pub mod scoring;
pub mod workbook;
