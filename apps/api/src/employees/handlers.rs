use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::employees::store::load_rows;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EmployeesResponse {
    pub employees: Vec<Value>,
}

/// GET /api/fetch-employees
///
/// Returns every row of the skills table verbatim. Database failures are
/// masked as an empty list.
pub async fn handle_fetch_employees(State(state): State<AppState>) -> Json<EmployeesResponse> {
    Json(EmployeesResponse {
        employees: load_rows(&state).await,
    })
}
