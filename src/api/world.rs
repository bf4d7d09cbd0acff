use crate::api::AppState;
use crate::state::WorldView;
use axum::{extract::State, response::Json};
use std::sync::Arc;

/// GET|POST /world - Whole world as `{entity_id: attributes}`
pub(super) async fn get_world(State(state): State<Arc<AppState>>) -> Json<WorldView> {
    Json(state.store.world())
}

/// GET|POST /clear - Empty the world and echo it back
pub(super) async fn clear(State(state): State<Arc<AppState>>) -> Json<WorldView> {
    let world = if state.clear_resets_listeners {
        state.store.reset()
    } else {
        state.store.clear_world()
    };
    Json(world)
}
