//! Axum router construction for the dashboard API.
//!
//! Assembles all routes (page, figures, control, `WebSocket`) into a
//! single [`Router`] with CORS middleware enabled so the figures can be
//! consumed cross-origin during development.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{control, handlers, ws};

/// Build the complete Axum router for the dashboard server.
///
/// The router includes:
/// - `GET /` -- the dashboard page
/// - `GET /ws/years` -- `WebSocket` year-change stream
/// - `GET /api/state` -- selection, playback, dataset bounds
/// - `GET /api/figures/map` -- filtered map points
/// - `GET /api/figures/evolution` -- per-country evolution segments
/// - `GET /api/figures/mean-gini` -- per-country party means
/// - `POST /api/control/*` -- selection and playback mutations
/// - `GET /api/control/status` -- playback status
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Dashboard page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/years", get(ws::ws_years))
        // Figures
        .route("/api/state", get(handlers::get_state))
        .route("/api/figures/map", get(handlers::map_figure))
        .route("/api/figures/evolution", get(handlers::evolution_figure))
        .route("/api/figures/mean-gini", get(handlers::mean_gini_figure))
        // Control
        .route("/api/control/parties", post(control::set_parties))
        .route("/api/control/year", post(control::set_year))
        .route("/api/control/hover", post(control::set_hover))
        .route("/api/control/playback", post(control::toggle_playback))
        .route("/api/control/speed", post(control::set_speed))
        .route("/api/control/status", get(control::status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
