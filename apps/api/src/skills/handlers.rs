//! Axum route handler for job-description skill extraction.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{error, info};

use crate::errors::AppError;
use crate::skills::extractor::extract_skills_from_jd;
use crate::skills::models::ExtractSkillsResponse;
use crate::skills::pdf::{detect_job_header, extract_text};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// POST /api/extract-skills
///
/// Multipart upload with a `file` field holding a job-description PDF.
/// Returns the scraped title/department and the LLM-extracted skill list.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractSkillsResponse>, AppError> {
    let (file_name, pdf) = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    if file_name.is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }
    if !file_name.to_ascii_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation(
            "Invalid file format. Only PDF files are accepted.".to_string(),
        ));
    }

    info!("Extracting skills from uploaded file '{file_name}' ({} bytes)", pdf.len());
    let jd_text = extract_text(pdf).await?;

    let llm = state.llm.as_ref().ok_or_else(|| {
        error!("Skill extraction requested but no LLM is configured");
        extraction_failed()
    })?;

    let required_skills = extract_skills_from_jd(llm.as_ref(), &jd_text)
        .await
        .map_err(|e| {
            error!("Error extracting skills: {e}");
            extraction_failed()
        })?;

    let header = detect_job_header(&jd_text);

    Ok(Json(ExtractSkillsResponse {
        job_title: header.job_title,
        department: header.department,
        required_skills,
    }))
}

fn extraction_failed() -> AppError {
    AppError::Upstream("Failed to extract skills from job description".to_string())
}

/// Reads the first `file` field. Other fields are skipped.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<(String, Bytes)>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;
        return Ok(Some((file_name, data)));
    }
    Ok(None)
}
