//! Axum route handlers for learning and mentoring recommendations.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::recommend::courses::{recommend_bio_and_courses, recommend_course_cards};
use crate::recommend::mentors::recommend_mentors;
use crate::recommend::models::{
    CourseRecommendation, CourseRequest, CourseResponse, MentorRequest, MentorResponse, SkillCourseRequest,
};
use crate::state::AppState;

/// POST /recommend/courses
///
/// Professional bio plus a course list for a profile's skills.
pub async fn handle_recommend_courses(
    State(state): State<AppState>,
    request: Result<Json<CourseRequest>, JsonRejection>,
) -> Result<Json<CourseResponse>, AppError> {
    let Json(request) = request?;
    if request.skills.is_empty() {
        return Err(AppError::Validation(
            "At least one skill must be provided".to_string(),
        ));
    }

    info!(
        "Recommending courses for '{}' from {} skills",
        request.employee_name,
        request.skills.len()
    );
    let response = recommend_bio_and_courses(state.llm.as_deref(), &request.employee_name, &request.skills).await;
    Ok(Json(response))
}

/// POST /recommend/mentors
///
/// Top three mentors from the catalog.
pub async fn handle_recommend_mentors(
    request: Result<Json<MentorRequest>, JsonRejection>,
) -> Result<Json<MentorResponse>, AppError> {
    let Json(request) = request?;
    info!("Recommending mentors for '{}'", request.employee_name);
    let mentors = recommend_mentors(&request.employee_domains, &request.employee_skills);
    Ok(Json(MentorResponse { mentors }))
}

/// POST /api/recommend-courses
///
/// Exactly three course cards for a single skill row.
pub async fn handle_recommend_skill_courses(
    State(state): State<AppState>,
    request: Result<Json<SkillCourseRequest>, JsonRejection>,
) -> Result<Json<Vec<CourseRecommendation>>, AppError> {
    let Json(skill) = request?;
    info!("Recommending course cards for '{}'", skill.sub_category);
    Ok(Json(recommend_course_cards(state.llm.as_deref(), &skill).await))
}
