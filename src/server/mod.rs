//! The HTTP surface of the controller.
//!
//! - `GET /health`
//! - `GET /sixteens/{*uri}`: a bulletin in the legacy layout
//! - `GET /{*uri}`: a bulletin, its JSON (`.../data`), or an ad hoc release

mod error;
mod handlers;
mod request;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::content::{ContentSource, TableRenderer};
use crate::locale::Localiser;
use crate::render::Renderer;
use crate::resolve::Resolver;

pub use error::HandlerError;
pub use request::RequestContext;

/// Everything a request handler needs, shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub content: Arc<dyn ContentSource>,
    pub tables: Arc<dyn TableRenderer>,
    pub renderer: Arc<Renderer>,
    pub localiser: Arc<Localiser>,
    pub resolver: Arc<Resolver>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/sixteens/{*uri}", get(handlers::sixteens_page))
        .route("/{*uri}", get(handlers::page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
