use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use compliance_core::types::Query;

use crate::error::ApiError;
use crate::server::AppState;

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Answer one compliance question. `debug: true` adds the computed figures
/// and the retrieved chunks to the response.
pub async fn ask(State(state): State<Arc<AppState>>, Json(query): Json<Query>) -> Result<Json<Value>, ApiError> {
    let outcome = state.copilot.ask(&query).await?;
    if !query.debug {
        return Ok(Json(json!({ "answer": outcome.answer })));
    }
    Ok(Json(json!({
        "answer": outcome.answer,
        "calculated_data": outcome.calculation,
        "retrieval_debug": outcome.retrieval_debug,
    })))
}
