//! Axum route handler for the analytics assistant.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::assistant::answer::{answer_question, DATABASE_APOLOGY};
use crate::assistant::charts::{build_visualizations, mentions_visualization, Visualization};
use crate::assistant::intent::classify;
use crate::assistant::query::scope_rows;
use crate::employees::models::EmployeeSkillRow;
use crate::employees::store::fetch_rows;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user_role: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AssistantData {
    pub employees: Vec<EmployeeSkillRow>,
}

#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub response: String,
    pub data: Option<AssistantData>,
    pub visualizations: Vec<Visualization>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handler
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/ai-assistant
///
/// Answers a free-form question about the skills table, limited to the rows
/// the caller may see. A database failure is answered with an apology rather
/// than an error status.
pub async fn handle_ai_assistant(
    State(state): State<AppState>,
    request: Result<Json<AssistantRequest>, JsonRejection>,
) -> Result<Json<AssistantResponse>, AppError> {
    let Json(request) = request?;
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }

    let raw_rows = match fetch_rows(&state).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Assistant could not read employee data: {e}");
            return Ok(Json(AssistantResponse {
                response: DATABASE_APOLOGY.to_string(),
                data: None,
                visualizations: Vec::new(),
            }));
        }
    };

    let rows = scope_rows(
        EmployeeSkillRow::parse_all(&raw_rows),
        request.user_role.as_deref(),
        request.user_email.as_deref(),
    );

    let llm = state.llm.as_deref();
    let spec = classify(llm, message).await;
    let selected = spec.select(&rows);
    let shown: Vec<EmployeeSkillRow> = selected.iter().take(spec.limit).cloned().collect();
    info!(
        "Assistant selected {} of {} visible rows ({} shown)",
        selected.len(),
        rows.len(),
        shown.len()
    );

    let visualizations = if spec.visualization || mentions_visualization(message) {
        build_visualizations(&selected, message, spec.chart_type)
    } else {
        Vec::new()
    };

    let response = answer_question(llm, message, &shown, selected.len()).await;

    Ok(Json(AssistantResponse {
        response,
        data: Some(AssistantData { employees: shown }),
        visualizations,
    }))
}
