use crate::api::AppState;
use crate::state::WorldView;
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// PUT|POST /listener/:id - Register (or re-seed) a listener, acknowledged with `{}`
///
/// Any request body is ignored.
pub(super) async fn register_listener(
    State(state): State<Arc<AppState>>,
    Path(listener_id): Path<String>,
) -> Json<Map<String, Value>> {
    state.store.register_listener(&listener_id);
    Json(Map::new())
}

/// GET /listener/:id - Drain the listener's pending changes
pub(super) async fn drain_listener(
    State(state): State<Arc<AppState>>,
    Path(listener_id): Path<String>,
) -> Json<WorldView> {
    Json(state.store.drain_listener(&listener_id))
}
