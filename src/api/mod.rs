// HTTP API over the shared world store

mod entity;
mod listener;
mod world;

pub use entity::ApiError;

use crate::config::WorldConfig;
use crate::state::WorldStore;
use axum::{response::Redirect, routing::get, Router};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<WorldStore>,
    /// Entity bodies larger than this are rejected with 413
    pub body_size_limit_bytes: usize,
    /// /clear also drops listeners when set
    pub clear_resets_listeners: bool,
    /// Directory mounted at /static
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn from_config(store: Arc<WorldStore>, config: &WorldConfig) -> Self {
        Self {
            store,
            body_size_limit_bytes: config.api.body_size_limit_bytes,
            clear_resets_listeners: config.world.clear_resets_listeners,
            static_dir: config.api.static_dir.clone(),
        }
    }
}

/// Create the API router
///
/// Routes:
/// - `GET /` redirects to the static index page
/// - `GET|POST|PUT|PATCH /entity/:id` read, replace or merge an entity
/// - `GET|POST /world` whole world
/// - `GET|POST /clear` empty the world
/// - `PUT|POST /listener/:id` register, `GET /listener/:id` drain
/// - `/static/*` files from the configured directory
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(index))
        .route(
            "/entity/:id",
            get(entity::get_entity)
                .post(entity::set_entity)
                .put(entity::set_entity)
                .patch(entity::merge_entity),
        )
        .route("/world", get(world::get_world).post(world::get_world))
        .route("/clear", get(world::clear).post(world::clear))
        .route(
            "/listener/:id",
            get(listener::drain_listener)
                .put(listener::register_listener)
                .post(listener::register_listener),
        )
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// GET / - Redirect to the bundled client page
async fn index() -> Redirect {
    Redirect::temporary("/static/index.html")
}
