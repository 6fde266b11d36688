//! Skill extraction: turns job-description text into a validated list of `RequiredSkill`.

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::llm_client::prompts::render;
use crate::llm_client::{LlmBackend, LlmError, LlmRequest};
use crate::skills::models::{RequiredSkill, REQUIRED_SKILL_FIELDS};
use crate::skills::prompts::{SKILL_EXTRACT_PROMPT_TEMPLATE, SKILL_EXTRACT_SYSTEM};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Skills data not found in the response")]
    MissingSkills,

    #[error("No skills were extracted from the job description")]
    NoSkills,

    #[error("Invalid skill format at index {0}: missing required fields")]
    InvalidEntry(usize),
}

/// Asks the LLM for the skills a job description requires.
pub async fn extract_skills_from_jd(
    llm: &dyn LlmBackend,
    jd_text: &str,
) -> Result<Vec<RequiredSkill>, ExtractionError> {
    let prompt = render(SKILL_EXTRACT_PROMPT_TEMPLATE, &[("jd_text", jd_text)]);
    let answer = llm
        .generate_json(LlmRequest::new(SKILL_EXTRACT_SYSTEM, &prompt))
        .await?;

    let skills = validate_skills(&answer)?;
    info!("Extracted {} skills from job description", skills.len());
    Ok(skills)
}

/// Checks `{"Skills": [...]}` and that every entry carries all four fields.
pub fn validate_skills(answer: &Value) -> Result<Vec<RequiredSkill>, ExtractionError> {
    let entries = answer
        .get("Skills")
        .ok_or(ExtractionError::MissingSkills)?
        .as_array()
        .ok_or(ExtractionError::NoSkills)?;

    if entries.is_empty() {
        return Err(ExtractionError::NoSkills);
    }

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let object = entry.as_object().ok_or(ExtractionError::InvalidEntry(idx))?;
            if !REQUIRED_SKILL_FIELDS.iter().all(|f| object.contains_key(*f)) {
                return Err(ExtractionError::InvalidEntry(idx));
            }
            serde_json::from_value(entry.clone()).map_err(|_| ExtractionError::InvalidEntry(idx))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedLlm;
    use serde_json::json;

    const GOOD_ANSWER: &str = r#"```json
{
  "Skills": [
    {"Domain": "Cloud Computing", "Category": "Tools and Platforms", "Sub-category": "Azure", "Skill_Description": "Azure services."},
    {"Domain": "Data Engineering", "Category": "Practice and Technologies", "Sub-category": "Spark", "Skill_Description": "Distributed processing."}
  ]
}
```"#;

    #[tokio::test]
    async fn test_extracts_fenced_skill_list() {
        let llm = ScriptedLlm::replying(&[GOOD_ANSWER]);
        let skills = extract_skills_from_jd(&llm, "Job Title: Data Engineer").await.unwrap();
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].sub_category, "Azure");
        assert_eq!(skills[1].domain, "Data Engineering");
        assert!(llm.prompts.lock().unwrap()[0].contains("Job Title: Data Engineer"));
    }

    #[tokio::test]
    async fn test_unstructured_answer_is_an_error() {
        let llm = ScriptedLlm::replying(&["I cannot help with that."]);
        let err = extract_skills_from_jd(&llm, "jd").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Llm(LlmError::NoStructuredOutput)));
    }

    #[tokio::test]
    async fn test_llm_failure_is_an_error() {
        let llm = ScriptedLlm::failing(500);
        let err = extract_skills_from_jd(&llm, "jd").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Llm(LlmError::Api { status: 500, .. })));
    }

    #[test]
    fn test_missing_skills_key() {
        let err = validate_skills(&json!({"skills": []})).unwrap_err();
        assert!(matches!(err, ExtractionError::MissingSkills));
    }

    #[test]
    fn test_empty_or_non_list_skills() {
        assert!(matches!(
            validate_skills(&json!({"Skills": []})).unwrap_err(),
            ExtractionError::NoSkills
        ));
        assert!(matches!(
            validate_skills(&json!({"Skills": "Azure"})).unwrap_err(),
            ExtractionError::NoSkills
        ));
    }

    #[test]
    fn test_entry_missing_field_is_rejected() {
        let answer = json!({"Skills": [
            {"Domain": "Cloud", "Category": "Tools and Platforms", "Sub-category": "Azure", "Skill_Description": "x"},
            {"Domain": "Cloud", "Category": "Tools and Platforms", "Sub-category": "GCP"}
        ]});
        assert!(matches!(
            validate_skills(&answer).unwrap_err(),
            ExtractionError::InvalidEntry(1)
        ));
    }

    #[test]
    fn test_non_object_entry_is_rejected() {
        let answer = json!({"Skills": ["Azure"]});
        assert!(matches!(
            validate_skills(&answer).unwrap_err(),
            ExtractionError::InvalidEntry(0)
        ));
    }
}
