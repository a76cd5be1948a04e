//! Control REST handlers: the mutating half of the dashboard API.
//!
//! Each endpoint maps one page interaction onto a controller
//! [`UiEvent`] and returns the updated selection plus the panels the
//! page should re-fetch.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/control/parties` | Replace the party checklist |
//! | `POST` | `/api/control/year` | Move the year slider |
//! | `POST` | `/api/control/hover` | Change the hovered country |
//! | `POST` | `/api/control/playback` | Toggle Start/Stop |
//! | `POST` | `/api/control/speed` | Set the tick interval (ms) |
//! | `GET` | `/api/control/status` | Current playback status |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use ginidash_core::controller::UiEvent;
use ginidash_types::Party;

use crate::error::DashboardError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/control/parties`.
#[derive(Debug, serde::Deserialize)]
pub struct SetPartiesRequest {
    /// The new party checklist; may be empty (empty map, not an error).
    pub parties: Vec<Party>,
}

/// Request body for `POST /api/control/year`.
#[derive(Debug, serde::Deserialize)]
pub struct SetYearRequest {
    /// The new slider year; clamped into the dataset range.
    pub year: i32,
}

/// Request body for `POST /api/control/hover`.
#[derive(Debug, serde::Deserialize)]
pub struct HoverRequest {
    /// The hovered country, or `None` to fall back to a random one.
    pub country: Option<String>,
}

/// Request body for `POST /api/control/speed`.
#[derive(Debug, serde::Deserialize)]
pub struct SetSpeedRequest {
    /// New tick interval in milliseconds (minimum 100).
    pub tick_interval_ms: u64,
}

// ---------------------------------------------------------------------------
// POST /api/control/parties
// ---------------------------------------------------------------------------

/// Replace the party checklist.
pub async fn set_parties(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetPartiesRequest>,
) -> Result<impl IntoResponse, DashboardError> {
    let event = UiEvent::SetParties(body.parties.into_iter().collect());
    let (panels, selection) = state.apply(event).await;

    Ok(Json(serde_json::json!({
        "selection": selection,
        "panels": panels,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/control/year
// ---------------------------------------------------------------------------

/// Move the year slider.
pub async fn set_year(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetYearRequest>,
) -> Result<impl IntoResponse, DashboardError> {
    let (panels, selection) = state.apply(UiEvent::SetYear(body.year)).await;

    Ok(Json(serde_json::json!({
        "selection": selection,
        "panels": panels,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/control/hover
// ---------------------------------------------------------------------------

/// Change the hovered country; `null` resolves to a random dataset
/// country so the detail figures always show something.
pub async fn set_hover(
    State(state): State<Arc<AppState>>,
    Json(body): Json<HoverRequest>,
) -> Result<impl IntoResponse, DashboardError> {
    let (panels, selection) = state.apply(UiEvent::Hover(body.country)).await;

    Ok(Json(serde_json::json!({
        "selection": selection,
        "panels": panels,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/control/playback
// ---------------------------------------------------------------------------

/// Toggle playback and wake the year stepper when it starts.
pub async fn toggle_playback(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, DashboardError> {
    let (panels, selection) = state.apply(UiEvent::ToggleButton).await;

    // Mirror the new mode into the stepper's control block.
    state.playback.set_mode(selection.playback);

    Ok(Json(serde_json::json!({
        "running": selection.playback.is_running(),
        "button_label": selection.playback.button_label(),
        "panels": panels,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/control/speed
// ---------------------------------------------------------------------------

/// Change the tick interval at runtime.
///
/// The new interval takes effect before the stepper's next sleep.
/// Minimum 100 ms to prevent runaway stepping.
pub async fn set_speed(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetSpeedRequest>,
) -> Result<impl IntoResponse, DashboardError> {
    state.playback.set_tick_interval_ms(body.tick_interval_ms).map_or_else(
        || {
            Err(DashboardError::InvalidQuery(
                "tick_interval_ms must be at least 100".to_owned(),
            ))
        },
        |prev| {
            Ok(Json(serde_json::json!({
                "ok": true,
                "message": format!(
                    "Tick interval changed from {}ms to {}ms",
                    prev, body.tick_interval_ms
                ),
                "previous_interval_ms": prev,
                "new_interval_ms": body.tick_interval_ms,
            })))
        },
    )
}

// ---------------------------------------------------------------------------
// GET /api/control/status
// ---------------------------------------------------------------------------

/// Return the current playback status including the derived button
/// label, interval, and elapsed time.
pub async fn status(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, DashboardError> {
    let year = state.selection.read().await.year;
    Ok(Json(state.playback.status(year)))
}
