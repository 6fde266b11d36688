pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::assistant::handlers::handle_ai_assistant;
use crate::employees::handlers::handle_fetch_employees;
use crate::matching::handlers::handle_match_employees;
use crate::recommend::handlers::{handle_recommend_courses, handle_recommend_mentors, handle_recommend_skill_courses};
use crate::skills::handlers::handle_extract_skills;
use crate::state::AppState;

/// Largest accepted job-description upload.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Job intake and matching
        .route(
            "/api/extract-skills",
            post(handle_extract_skills).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/fetch-employees", get(handle_fetch_employees))
        .route("/api/match-employees", post(handle_match_employees))
        // Growth recommendations
        .route("/recommend/courses", post(handle_recommend_courses))
        .route("/recommend/mentors", post(handle_recommend_mentors))
        .route("/api/recommend-courses", post(handle_recommend_skill_courses))
        // Analytics assistant
        .route("/api/ai-assistant", post(handle_ai_assistant))
        .with_state(state)
}
