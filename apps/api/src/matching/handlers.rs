//! Axum route handler for employee ↔ job matching.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::employees::models::EmployeeSkillRow;
use crate::employees::store::load_rows;
use crate::errors::AppError;
use crate::matching::matcher::{format_matches, match_employees};
use crate::matching::models::{MatchEmployeesResponse, DEFAULT_RATING};
use crate::skills::models::RequiredSkill;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEmployeesRequest {
    #[serde(default)]
    pub required_skills: Option<Vec<RequiredSkill>>,
    #[serde(default)]
    pub min_skill_rating: Option<f64>,
}

/// POST /api/match-employees
///
/// Matches every employee in the database against the given required skills.
/// Only skills rated at least `minSkillRating` (default 3) are reported, and
/// employees left with no such skill are omitted.
pub async fn handle_match_employees(
    State(state): State<AppState>,
    request: Result<Json<MatchEmployeesRequest>, JsonRejection>,
) -> Result<Json<MatchEmployeesResponse>, AppError> {
    let Json(request) = request?;
    let required_skills = request
        .required_skills
        .ok_or_else(|| AppError::Validation("No required skills provided".to_string()))?;
    let min_skill_rating = request.min_skill_rating.unwrap_or(DEFAULT_RATING);

    if required_skills.is_empty() {
        return Ok(Json(MatchEmployeesResponse { matches: Vec::new() }));
    }

    let rows = EmployeeSkillRow::parse_all(&load_rows(&state).await);
    let structured = state.anonymizer.structure_rows(&rows);
    if structured.is_empty() {
        return Err(AppError::Upstream("Failed to process employee data".to_string()));
    }

    let Some(llm) = state.llm.as_ref() else {
        warn!("Matching requested but no LLM is configured; returning no matches");
        return Ok(Json(MatchEmployeesResponse { matches: Vec::new() }));
    };

    info!(
        "Matching {} employees against {} required skills ({} IDs issued)",
        structured.len(),
        required_skills.len(),
        state.anonymizer.len()
    );
    let results = match_employees(
        llm.as_ref(),
        &required_skills,
        &structured,
        state.config.match_batch_size,
    )
    .await?;

    let matches = format_matches(&results, &state.anonymizer.reverse_mapping(), min_skill_rating);
    Ok(Json(MatchEmployeesResponse { matches }))
}
