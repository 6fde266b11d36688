//! Question → `QuerySpec`, via the LLM with a keyword fallback.

use serde_json::Value;
use tracing::{info, warn};

use crate::assistant::prompts::{INTENT_PROMPT_TEMPLATE, INTENT_SYSTEM};
use crate::assistant::query::{keyword_spec, QuerySpec};
use crate::llm_client::prompts::render;
use crate::llm_client::{LlmBackend, LlmRequest};

/// Classifies the question. Without a model, or when its answer is not a
/// usable spec, the keyword fallback decides.
pub async fn classify(llm: Option<&dyn LlmBackend>, message: &str) -> QuerySpec {
    let Some(llm) = llm else {
        return keyword_spec(message);
    };

    let prompt = render(INTENT_PROMPT_TEMPLATE, &[("message", message)]);
    let request = LlmRequest::new(INTENT_SYSTEM, &prompt).temperature(0.0);

    match llm.generate_json(request).await {
        Ok(answer) => match spec_from_answer(answer) {
            Some(spec) => {
                info!("Classified question as {:?} (limit {})", spec.category, spec.limit);
                spec
            }
            None => {
                warn!("Intent answer did not match the query schema; using keyword fallback");
                keyword_spec(message)
            }
        },
        Err(e) => {
            warn!("Intent classification failed: {e}; using keyword fallback");
            keyword_spec(message)
        }
    }
}

/// Top-level nulls are treated as absent fields.
fn spec_from_answer(answer: Value) -> Option<QuerySpec> {
    let Value::Object(mut map) = answer else {
        return None;
    };
    map.retain(|_, v| !v.is_null());
    serde_json::from_value(Value::Object(map)).ok()
}
