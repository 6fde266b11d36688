use anyhow::{bail, Context, Result};

use crate::llm_client::DEFAULT_API_BASE;

const DEFAULT_EMPLOYEE_TABLE: &str = "skill_matrix";

/// Application configuration loaded from environment variables.
///
/// Credentials are optional: a missing LLM key or database key degrades the
/// affected endpoints to their static fallbacks. Set `REQUIRE_CREDENTIALS=true`
/// to refuse startup instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub employee_table: String,
    /// Employees per matching call; `None` sends everyone in one batch.
    pub match_batch_size: Option<usize>,
    pub require_credentials: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let first_of = |keys: &[&str]| keys.iter().find_map(|k| get(*k));

        let require_credentials = get("REQUIRE_CREDENTIALS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let match_batch_size = match get("MATCH_BATCH_SIZE") {
            Some(raw) => {
                let size = raw
                    .trim()
                    .parse::<usize>()
                    .context("MATCH_BATCH_SIZE must be a positive integer")?;
                if size == 0 {
                    bail!("MATCH_BATCH_SIZE must be a positive integer");
                }
                Some(size)
            }
            None => None,
        };

        let config = Config {
            gemini_api_key: first_of(&["GEMINI_API_KEY", "GOOGLE_API_KEY"]),
            gemini_api_base: get("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            supabase_url: first_of(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"]),
            supabase_key: first_of(&["SUPABASE_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"]),
            employee_table: get("EMPLOYEE_TABLE")
                .unwrap_or_else(|| DEFAULT_EMPLOYEE_TABLE.to_string()),
            match_batch_size,
            require_credentials,
            port: get("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        };

        if config.require_credentials {
            if !config.gemini_configured() {
                bail!("Required environment variable 'GEMINI_API_KEY' is not set");
            }
            if !config.supabase_configured() {
                bail!("Required environment variables 'SUPABASE_URL' and 'SUPABASE_KEY' are not set");
            }
        }

        Ok(config)
    }

    pub fn gemini_configured(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    pub fn supabase_configured(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_key.is_some()
    }
}
