//! Axum route handlers for recommendations and job search.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{extract_text, ExtractionError};
use crate::providers::fetcher::FALLBACK_KEYWORD;
use crate::providers::{Job, SearchQuery, TimeWindow};
use crate::ranking::form::{UploadForm, UploadedFile};
use crate::ranking::job_file::parse_jobs_file;
use crate::ranking::{CandidateProfile, Ranker, RecommendationResponse, SuppliedJobsResponse};
use crate::state::AppState;

const SEARCH_RESULT_LIMIT: usize = 10;
const DESCRIPTION_PREVIEW_CHARS: usize = 200;
const SEARCH_SUCCESS_THRESHOLD: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchJobsParams {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub time_filter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchJobsResponse {
    pub jobs: Vec<Job>,
    pub total_results: usize,
    pub search_query: String,
    pub api_status: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /recommend
///
/// Multipart: `resume` file (required), `skills`, `education`, `location`,
/// `time_filter`, `domain`, `profile_data` (JSON).
pub async fn handle_recommend(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RecommendationResponse>, AppError> {
    let mut form = UploadForm::collect(multipart).await?;
    let resume = form
        .take_file("resume")
        .ok_or_else(|| AppError::Validation("Resume file is required".to_string()))?;

    let mut profile = candidate_from_form(&form, &state.config.default_location)?;
    if let Some(raw) = form.text("profile_data") {
        merge_profile_data(&mut profile, raw, &state.config.default_location);
    }
    profile.resume_text = extract_resume(resume).await?;

    info!(
        "Recommending for domain={:?} location='{}' window={}",
        profile.domain, profile.location, profile.time_window
    );

    let response = Ranker::from_state(&state).recommend(&profile).await;
    Ok(Json(response))
}

/// POST /recommend_from_jobs
///
/// Multipart: `resume` and `jobs_file` (CSV or JSON), plus the optional
/// profile fields. Scores against the uploaded jobs only.
pub async fn handle_recommend_from_jobs(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SuppliedJobsResponse>, AppError> {
    let mut form = UploadForm::collect(multipart).await?;
    let resume = form
        .take_file("resume")
        .ok_or_else(|| AppError::Validation("Resume file is required".to_string()))?;
    let jobs_file = form
        .take_file("jobs_file")
        .ok_or_else(|| AppError::Validation("Jobs file is required".to_string()))?;

    let jobs = parse_jobs_file(&jobs_file.file_name, &jobs_file.bytes)?;
    info!("Parsed {} jobs from '{}'", jobs.len(), jobs_file.file_name);

    let mut profile = candidate_from_form(&form, &state.config.default_location)?;
    profile.resume_text = extract_resume(resume).await?;

    Ok(Json(Ranker::from_state(&state).rank_supplied(jobs, &profile)))
}

/// GET /search_jobs?keyword=&location=&time_filter=
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(params): Query<SearchJobsParams>,
) -> Result<Json<SearchJobsResponse>, AppError> {
    let keyword = non_blank(params.keyword).unwrap_or_else(|| FALLBACK_KEYWORD.to_string());
    let location =
        non_blank(params.location).unwrap_or_else(|| state.config.default_location.clone());
    let time_window = parse_time_window(params.time_filter.as_deref())?;

    let query = SearchQuery::new(keyword.as_str(), location.as_str(), time_window);
    let jobs: Vec<Job> = state
        .jobs
        .fetch_jobs(&query)
        .await
        .jobs
        .into_iter()
        .take(SEARCH_RESULT_LIMIT)
        .map(|mut job| {
            job.description = preview(&job.description);
            job
        })
        .collect();

    let total_results = jobs.len();
    Ok(Json(SearchJobsResponse {
        jobs,
        total_results,
        search_query: format!("{keyword} internships in {location}"),
        api_status: if total_results > SEARCH_SUCCESS_THRESHOLD {
            "success"
        } else {
            "limited_results"
        },
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn candidate_from_form(form: &UploadForm, default_location: &str) -> Result<CandidateProfile, AppError> {
    Ok(CandidateProfile {
        resume_text: String::new(),
        skills: form.text("skills").unwrap_or_default().to_string(),
        education: form.text("education").unwrap_or_default().to_string(),
        location: form.text("location").unwrap_or(default_location).to_string(),
        domain: form.text("domain").map(str::to_string),
        time_window: parse_time_window(form.text("time_filter"))?,
    })
}

/// Fills skills, education and location the form left blank. Location only
/// counts as blank when it fell back to the default.
fn merge_profile_data(profile: &mut CandidateProfile, raw: &str, default_location: &str) {
    let data = match serde_json::from_str::<Value>(raw) {
        Ok(data) if data.is_object() => data,
        _ => {
            warn!("Ignoring profile_data that is not a JSON object");
            return;
        }
    };

    if profile.skills.is_empty() {
        profile.skills = match data.get("skills") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            Some(Value::String(s)) => s.trim().to_string(),
            _ => String::new(),
        };
    }
    if profile.education.is_empty() {
        if let Some(education) = data.get("education").and_then(Value::as_str) {
            profile.education = education.trim().to_string();
        }
    }
    if profile.location == default_location {
        if let Some(location) = data
            .get("location")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|l| !l.is_empty())
        {
            profile.location = location.to_string();
        }
    }
}

fn parse_time_window(raw: Option<&str>) -> Result<TimeWindow, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => value.parse().map_err(AppError::Validation),
        None => Ok(TimeWindow::default()),
    }
}

/// Runs on the blocking pool. A parser panic surfaces as
/// `ExtractionError::Aborted`.
async fn extract_resume(file: UploadedFile) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || extract_text(&file.file_name, &file.bytes))
        .await
        .map_err(|e| ExtractionError::Aborted(e.to_string()))??;
    Ok(text)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn preview(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        let head: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        description.to_string()
    }
}
