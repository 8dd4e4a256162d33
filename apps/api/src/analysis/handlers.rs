//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::extract::{build_job, build_resume};
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::models::job::JobPosting;
use crate::models::resume::ResumeDocument;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    #[serde(default)]
    pub resume_text: String,
    pub job_text: String,
    pub job_title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeTextResponse {
    pub resume: ResumeDocument,
    pub job: JobPosting,
    pub result: AnalysisResult,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeDocumentsRequest {
    pub resume: ResumeDocument,
    pub job: JobPosting,
}

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ParseJobRequest {
    pub text: String,
    pub title: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Builds both documents from raw text, then runs the full analysis.
/// An empty resume is allowed and simply scores low.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalyzeTextResponse>, AppError> {
    if request.job_text.trim().is_empty() {
        return Err(AppError::Validation("job_text cannot be empty".to_string()));
    }

    let vocabulary = state.scorer.vocabulary();
    let resume = build_resume(&request.resume_text, vocabulary);
    let job = build_job(&request.job_text, request.job_title.as_deref(), vocabulary);
    info!(
        "Analyzing text pair: resume {} chars, job '{}'",
        request.resume_text.chars().count(),
        job.title
    );

    let result = state.scorer.analyze(&resume, &job);

    Ok(Json(AnalyzeTextResponse { resume, job, result }))
}

/// POST /api/v1/analyze/documents
///
/// Scores records produced by an upstream extractor.
pub async fn handle_analyze_documents(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeDocumentsRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    if request.job.raw_text.trim().is_empty() {
        return Err(AppError::Validation("job.raw_text cannot be empty".to_string()));
    }

    Ok(Json(state.scorer.analyze(&request.resume, &request.job)))
}

/// POST /api/v1/parse/resume
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(request): Json<ParseResumeRequest>,
) -> Result<Json<ResumeDocument>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    Ok(Json(build_resume(&request.text, state.scorer.vocabulary())))
}

/// POST /api/v1/parse/job
pub async fn handle_parse_job(
    State(state): State<AppState>,
    Json(request): Json<ParseJobRequest>,
) -> Result<Json<JobPosting>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let job = build_job(&request.text, request.title.as_deref(), state.scorer.vocabulary());
    Ok(Json(job))
}
