use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub gemini_configured: bool,
    pub supabase_configured: bool,
    pub timestamp: String,
}

/// GET /api/health
/// Reports which external credentials are configured. Nothing is called.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        gemini_configured: state.config.gemini_configured(),
        supabase_configured: state.config.supabase_configured(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
