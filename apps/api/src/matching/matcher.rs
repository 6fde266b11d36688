//! Employee matching: batches anonymized profiles through the matching model
//! and post-processes what comes back.
//!
//! Flow: split profiles into batches → one LLM call per batch (sequential) →
//! structured decode → fill in missing scores → sort by score.

use std::collections::{BTreeMap, HashMap};

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::employees::anonymize::{EmployeeProfile, StructuredEmployees};
use crate::errors::AppError;
use crate::llm_client::prompts::render;
use crate::llm_client::{LlmBackend, LlmRequest};
use crate::matching::models::{EmployeeMatch, FormattedSkill, MatchResult};
use crate::matching::prompts::{MATCH_PROMPT_TEMPLATE, MATCH_SYSTEM};
use crate::skills::models::RequiredSkill;

const SKILL_WEIGHT: f64 = 0.6;
const INTEREST_WEIGHT: f64 = 0.3;
const COVERAGE_WEIGHT: f64 = 0.1;
/// Best possible weighted sum: 0.6×5 + 0.3×5 + 0.1×1.
const MAX_WEIGHTED: f64 = 4.6;

/// Weighted match score (0–100) for a set of matched `(skill_rate, interest_rate)` pairs.
///
/// `(0.6 × avg skill + 0.3 × avg interest + 0.1 × coverage) / 4.6 × 100`, where
/// coverage is matched / required. No matches scores 0.
pub fn weighted_match_score(matched: &[(f64, f64)], total_required: usize) -> f64 {
    if matched.is_empty() || total_required == 0 {
        return 0.0;
    }
    let n = matched.len() as f64;
    let avg_skill = matched.iter().map(|(s, _)| s).sum::<f64>() / n;
    let avg_interest = matched.iter().map(|(_, i)| i).sum::<f64>() / n;
    let coverage = (n / total_required as f64).min(1.0);

    let weighted = SKILL_WEIGHT * avg_skill + INTEREST_WEIGHT * avg_interest + COVERAGE_WEIGHT * coverage;
    (weighted / MAX_WEIGHTED * 100.0 * 10.0).round() / 10.0
}

/// Matches every employee against the required skills.
///
/// A batch whose call fails or whose answer cannot be decoded contributes
/// nothing; the remaining batches still count. Results are sorted by score, best first.
/// Only a failure to build the prompt itself is an error.
pub async fn match_employees(
    llm: &dyn LlmBackend,
    required_skills: &[RequiredSkill],
    employees: &StructuredEmployees,
    batch_size: Option<usize>,
) -> Result<Vec<MatchResult>, AppError> {
    if required_skills.is_empty() || employees.is_empty() {
        warn!("Empty required skills or employee data; nothing to match");
        return Ok(Vec::new());
    }

    let entries: Vec<(&String, &EmployeeProfile)> = employees.iter().collect();
    let size = batch_size.unwrap_or(entries.len()).max(1);

    let mut results = Vec::new();
    for batch in entries.chunks(size) {
        let batch: BTreeMap<&String, &EmployeeProfile> = batch.iter().copied().collect();
        results.extend(process_batch(llm, required_skills, &batch).await?);
    }

    for result in &mut results {
        if result.match_score.is_none() {
            let ratings: Vec<(f64, f64)> = result.matching_skills.iter().map(|s| s.ratings()).collect();
            result.match_score = Some(weighted_match_score(&ratings, required_skills.len()));
        }
    }

    results.sort_by(|a, b| {
        b.match_score
            .unwrap_or(0.0)
            .total_cmp(&a.match_score.unwrap_or(0.0))
    });

    info!("Matched {} employees", results.len());
    Ok(results)
}

async fn process_batch(
    llm: &dyn LlmBackend,
    required_skills: &[RequiredSkill],
    batch: &BTreeMap<&String, &EmployeeProfile>,
) -> Result<Vec<MatchResult>, AppError> {
    let required_json = prompt_json(required_skills, "required skills")?;
    let employees_json = prompt_json(batch, "employee profiles")?;
    let prompt = render(
        MATCH_PROMPT_TEMPLATE,
        &[
            ("required_skills_json", &required_json),
            ("employees_json", &employees_json),
        ],
    );

    match llm.generate_json(LlmRequest::new(MATCH_SYSTEM, &prompt)).await {
        Ok(answer) => {
            let results = results_from_answer(answer);
            info!("Processed batch of {} employees: {} results", batch.len(), results.len());
            Ok(results)
        }
        Err(e) => {
            warn!("Error processing employee batch: {e}");
            Ok(Vec::new())
        }
    }
}

fn prompt_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String, AppError> {
    let json = serde_json::to_string(value).with_context(|| format!("Failed to serialize {what} for the matching prompt"))?;
    Ok(json)
}

/// Accepts an array of results, an object wrapping one under `matches`/`results`,
/// or a single result object. Entries that do not decode are skipped.
fn results_from_answer(answer: Value) -> Vec<MatchResult> {
    let items = match answer {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            match ["matches", "results"]
                .iter()
                .find_map(|k| map.remove(*k).filter(Value::is_array))
            {
                Some(Value::Array(items)) => items,
                _ => vec![Value::Object(map)],
            }
        }
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<MatchResult>(item).ok())
        .collect()
}

/// Shapes raw results for the frontend: real names, camelCase skills, and the
/// minimum-rating filter. Skills rated below `min_skill_rating` are dropped and
/// an employee with no surviving skill is dropped entirely.
pub fn format_matches(
    results: &[MatchResult],
    id_to_name: &HashMap<String, String>,
    min_skill_rating: f64,
) -> Vec<EmployeeMatch> {
    results
        .iter()
        .filter_map(|result| {
            let matched_skills: Vec<FormattedSkill> = result
                .matching_skills
                .iter()
                .map(|skill| {
                    let (rating, interest_rate) = skill.ratings();
                    FormattedSkill {
                        skill: skill.name().to_string(),
                        rating,
                        match_confidence: 1.0,
                        interest_rate,
                    }
                })
                .filter(|skill| skill.rating >= min_skill_rating)
                .collect();

            if matched_skills.is_empty() {
                return None;
            }

            Some(EmployeeMatch {
                name: id_to_name
                    .get(&result.employee_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                id: result.employee_id.clone(),
                matched_skills,
                missing_skills: result.missing_skills.clone(),
                overall_match: result.match_score.unwrap_or(0.0),
            })
        })
        .collect()
}
