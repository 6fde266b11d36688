//! Read access to the hosted employee-skills table.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::state::AppState;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response shape: expected a JSON array of rows")]
    Shape,

    #[error("Employee database is not configured")]
    NotConfigured,
}

/// Source of raw employee skill rows. Carried in `AppState` as `Arc<dyn EmployeeStore>`.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<Value>, StoreError>;
}

/// REST client for a Supabase/PostgREST table.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl SupabaseStore {
    pub fn new(base_url: String, api_key: String, table: String) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

#[async_trait]
impl EmployeeStore for SupabaseStore {
    async fn fetch_rows(&self) -> Result<Vec<Value>, StoreError> {
        let response = self
            .client
            .get(self.table_url())
            .query(&[("select", "*")])
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        match response.json::<Value>().await? {
            Value::Array(rows) => Ok(rows),
            _ => Err(StoreError::Shape),
        }
    }
}

/// Fetches all raw rows.
pub async fn fetch_rows(state: &AppState) -> Result<Vec<Value>, StoreError> {
    let store = state.employees.as_ref().ok_or(StoreError::NotConfigured)?;
    let rows = store.fetch_rows().await?;
    info!("Fetched {} employee skill records", rows.len());
    Ok(rows)
}

/// Fetches all raw rows, masking every failure as an empty list.
pub async fn load_rows(state: &AppState) -> Vec<Value> {
    fetch_rows(state).await.unwrap_or_else(|e| {
        warn!("Failed to fetch employee skills: {e}");
        Vec::new()
    })
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Serves a fixed set of rows, or fails every call.
    pub struct StaticStore(pub Result<Vec<Value>, u16>);

    impl StaticStore {
        pub fn rows(rows: Vec<Value>) -> Self {
            Self(Ok(rows))
        }

        pub fn failing(status: u16) -> Self {
            Self(Err(status))
        }
    }

    #[async_trait]
    impl EmployeeStore for StaticStore {
        async fn fetch_rows(&self) -> Result<Vec<Value>, StoreError> {
            self.0.clone().map_err(|status| StoreError::Api {
                status,
                message: "static failure".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::testing::StaticStore;
    use super::*;
    use crate::employees::models::fixtures::raw_row;
    use crate::state::AppState;

    #[test]
    fn test_table_url() {
        let store = SupabaseStore::new(
            "https://abc.supabase.co/".to_string(),
            "key".to_string(),
            "skill_matrix".to_string(),
        )
        .unwrap();
        assert_eq!(store.table_url(), "https://abc.supabase.co/rest/v1/skill_matrix");
    }

    #[tokio::test]
    async fn test_load_rows_without_store_is_empty() {
        let state = AppState::for_tests(None, None);
        assert!(load_rows(&state).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_rows_reports_missing_store() {
        let state = AppState::for_tests(None, None);
        assert!(matches!(fetch_rows(&state).await, Err(StoreError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_fetch_rows_reports_api_failure() {
        let state = AppState::for_tests(None, Some(Arc::new(StaticStore::failing(503))));
        assert!(matches!(
            fetch_rows(&state).await,
            Err(StoreError::Api { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_load_rows_masks_failures() {
        let state = AppState::for_tests(None, Some(Arc::new(StaticStore::failing(503))));
        assert!(load_rows(&state).await.is_empty());
    }

    #[tokio::test]
    async fn test_load_rows_passes_rows_through() {
        let rows = vec![raw_row("A", "Cloud", "Azure", 4.0, 5.0)];
        let state = AppState::for_tests(None, Some(Arc::new(StaticStore::rows(rows.clone()))));
        assert_eq!(load_rows(&state).await, rows);
    }
}
