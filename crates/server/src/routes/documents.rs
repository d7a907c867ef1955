use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use common::types::Ack;
use serde_json::Value;
use service::Document;
use tracing::warn;

use crate::errors::ApiError;
use crate::state::AppState;

/// GET: the stored document, or its default. Never fails.
pub async fn load_document(State(state): State<AppState>, document: Document) -> Json<Value> {
    Json(state.documents.load(document).await)
}

/// POST: replace the document with the request body.
pub async fn save_document(
    State(state): State<AppState>,
    document: Document,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(value) = payload.map_err(|rejection| {
        warn!(event = "save_rejected", document = %document, error = %rejection, "request body is not JSON");
        ApiError::bad_request(document.save_failed_message())
    })?;

    state
        .documents
        .save(document, &value)
        .await
        .map_err(|_| ApiError::internal(document.save_failed_message()))?;
    Ok(Json(Ack::ok(document.saved_message())))
}

/// DELETE /api/clear-all
pub async fn clear_all(State(state): State<AppState>) -> Result<Json<Ack>, ApiError> {
    state
        .documents
        .clear_all()
        .await
        .map_err(|_| ApiError::internal("Failed to clear data"))?;
    Ok(Json(Ack::ok("All data cleared successfully")))
}
