use tracing::warn;

use crate::assistant::prompts::{ANSWER_PROMPT_TEMPLATE, ANSWER_SYSTEM};
use crate::employees::models::EmployeeSkillRow;
use crate::llm_client::prompts::render;
use crate::llm_client::{LlmBackend, LlmRequest};

/// Reply used when the database cannot be read.
pub const DATABASE_APOLOGY: &str =
    "I'm sorry, I couldn't access the employee database right now. Please try again in a moment.";

/// Natural-language answer over the selected records. Falls back to a
/// record count when the model is missing or fails.
pub async fn answer_question(
    llm: Option<&dyn LlmBackend>,
    message: &str,
    records: &[EmployeeSkillRow],
    match_count: usize,
) -> String {
    let Some(llm) = llm else {
        return fallback_answer(match_count);
    };

    let records_json = serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string());
    let prompt = render(
        ANSWER_PROMPT_TEMPLATE,
        &[
            ("message", message),
            ("match_count", &match_count.to_string()),
            ("records_json", &records_json),
        ],
    );

    match llm.generate(LlmRequest::new(ANSWER_SYSTEM, &prompt).temperature(0.3)).await {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("Answer generation failed: {e}");
            fallback_answer(match_count)
        }
    }
}

pub fn fallback_answer(match_count: usize) -> String {
    match match_count {
        0 => "I couldn't find any employee records matching your question. Try a broader question.".to_string(),
        1 => "I found 1 matching employee record. The details are shown below.".to_string(),
        n => format!("I found {n} matching employee records. The details are shown below."),
    }
}
