use std::sync::Arc;

use crate::config::Config;
use crate::employees::anonymize::Anonymizer;
use crate::employees::store::EmployeeStore;
use crate::llm_client::LlmBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no LLM key is configured; LLM-backed endpoints fall back.
    pub llm: Option<Arc<dyn LlmBackend>>,
    /// `None` when database credentials are missing; reads yield no rows.
    pub employees: Option<Arc<dyn EmployeeStore>>,
    /// Process-wide name ↔ ID map. Cleared on restart.
    pub anonymizer: Arc<Anonymizer>,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// State with default config whose credential flags mirror the given services.
    pub fn for_tests(
        llm: Option<Arc<dyn LlmBackend>>,
        employees: Option<Arc<dyn EmployeeStore>>,
    ) -> Self {
        let mut config = Config::from_lookup(|_| None).expect("default config");
        if llm.is_some() {
            config.gemini_api_key = Some("test-key".to_string());
        }
        if employees.is_some() {
            config.supabase_url = Some("http://localhost:54321".to_string());
            config.supabase_key = Some("test-key".to_string());
        }
        Self {
            llm,
            employees,
            anonymizer: Arc::new(Anonymizer::new()),
            config,
        }
    }
}
