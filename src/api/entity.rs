use crate::api::AppState;
use crate::state::Attributes;
use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// POST|PUT /entity/:id - Replace an entity and echo the stored attributes
pub(super) async fn set_entity(
    State(state): State<Arc<AppState>>,
    Path(entity_id): Path<String>,
    body: Body,
) -> Result<Json<Attributes>, ApiError> {
    let body = read_body(&entity_id, body, state.body_size_limit_bytes).await?;
    let attributes = parse_attributes(&entity_id, &body)?;
    Ok(Json(state.store.set_entity(&entity_id, attributes)))
}

/// PATCH /entity/:id - Merge keys into an entity and return the merged attributes
pub(super) async fn merge_entity(
    State(state): State<Arc<AppState>>,
    Path(entity_id): Path<String>,
    body: Body,
) -> Result<Json<Attributes>, ApiError> {
    let body = read_body(&entity_id, body, state.body_size_limit_bytes).await?;
    let attributes = parse_attributes(&entity_id, &body)?;
    Ok(Json(state.store.merge_entity(&entity_id, attributes)))
}

/// GET /entity/:id - Current attributes, `{}` if the entity does not exist
pub(super) async fn get_entity(
    State(state): State<Arc<AppState>>,
    Path(entity_id): Path<String>,
) -> Json<Attributes> {
    Json(state.store.get_entity(&entity_id))
}

/// Buffer at most `limit` bytes of the request body
///
/// The raw `Body` is taken instead of `Bytes` so axum's default extractor limit
/// does not override the configured one.
async fn read_body(entity_id: &str, body: Body, limit: usize) -> Result<Bytes, ApiError> {
    to_bytes(body, limit).await.map_err(|e| {
        warn!(entity_id = %entity_id, limit = limit, error = %e, "Entity payload too large");
        ApiError::PayloadTooLarge
    })
}

/// Decode an entity body regardless of Content-Type. Only JSON objects are accepted.
fn parse_attributes(entity_id: &str, body: &[u8]) -> Result<Attributes, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(attributes)) => Ok(attributes),
        Ok(_) => {
            warn!(entity_id = %entity_id, "Entity payload is not a JSON object");
            Err(ApiError::MalformedPayload)
        }
        Err(e) => {
            warn!(entity_id = %entity_id, error = %e, "Entity payload is not valid JSON");
            Err(ApiError::MalformedPayload)
        }
    }
}

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// Body is not a JSON object. Reported without detail.
    MalformedPayload,
    PayloadTooLarge,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MalformedPayload => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorResponse {
                    error: "payload too large".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
