mod assistant;
mod config;
mod employees;
mod errors;
mod llm_client;
mod matching;
mod recommend;
mod routes;
mod skills;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::employees::anonymize::Anonymizer;
use crate::employees::store::{EmployeeStore, SupabaseStore};
use crate::llm_client::{GeminiClient, LlmBackend};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on malformed values, or missing
    // credentials when REQUIRE_CREDENTIALS is set)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm: Option<Arc<dyn LlmBackend>> = match &config.gemini_api_key {
        Some(key) => {
            let client = GeminiClient::new(key.clone(), config.gemini_api_base.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client))
        }
        None => {
            warn!("GEMINI_API_KEY not set; LLM-backed endpoints will use fallbacks");
            None
        }
    };

    // Initialize employee database client
    let employees: Option<Arc<dyn EmployeeStore>> = match (&config.supabase_url, &config.supabase_key) {
        (Some(url), Some(key)) => {
            let store = SupabaseStore::new(url.clone(), key.clone(), config.employee_table.clone())?;
            info!("Employee store initialized (table: {})", config.employee_table);
            Some(Arc::new(store))
        }
        _ => {
            warn!("SUPABASE_URL / SUPABASE_KEY not set; employee data will be empty");
            None
        }
    };

    // Build app state
    let state = AppState {
        llm,
        employees,
        anonymizer: Arc::new(Anonymizer::new()),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
