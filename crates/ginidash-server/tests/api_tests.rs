//! Integration tests for the dashboard API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use ginidash_data::GiniStore;
use ginidash_server::router::build_router;
use ginidash_server::state::{AppState, YearBroadcast};
use ginidash_types::{GiniRecord, Party};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

fn record(country: &str, iso: &str, year: i32, party: Party, gini: Decimal) -> GiniRecord {
    GiniRecord {
        country: country.to_owned(),
        iso: iso.to_owned(),
        year,
        party,
        gini,
        marker_size: gini.checked_mul(dec!(100)).unwrap(),
    }
}

fn make_test_state() -> Arc<AppState> {
    let store = GiniStore::new(vec![
        record("France", "FRA", 2004, Party::Left, dec!(0.281)),
        record("France", "FRA", 2005, Party::Right, dec!(0.279)),
        record("France", "FRA", 2006, Party::Right, dec!(0.273)),
        record("Sweden", "SWE", 2004, Party::Left, dec!(0.230)),
        record("Sweden", "SWE", 2006, Party::Center, dec!(0.234)),
        record("Italy", "ITA", 2005, Party::Center, dec!(0.331)),
    ])
    .unwrap();

    Arc::new(AppState::new(store, 750, Some(42)))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(path: &str, body: &Value) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn test_get_state_reports_dataset_bounds() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/state").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    // The slider starts at the dataset's first year with playback off.
    assert_eq!(json["selection"]["year"], 2004);
    assert_eq!(json["selection"]["playback"], "Stopped");
    assert_eq!(json["playback"]["button_label"], "Start");
    assert_eq!(json["year_range"]["min"], 2004);
    assert_eq!(json["year_range"]["max"], 2006);
    assert_eq!(json["countries"].as_array().unwrap().len(), 3);
    assert_eq!(json["parties"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_map_figure_uses_the_current_selection_by_default() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/figures/map").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["year"], 2004);
    assert_eq!(json["count"], 2);
}

#[tokio::test]
async fn test_map_figure_with_explicit_params() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/figures/map?year=2005&parties=Right")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["points"][0]["country"], "France");
    assert_eq!(
        json["points"][0]["gini"],
        serde_json::to_value(dec!(0.279)).unwrap()
    );
}

#[tokio::test]
async fn test_map_figure_disjoint_parties_is_empty_not_an_error() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/figures/map?year=2004&parties=Center")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 0);
    assert!(json["points"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_map_figure_unknown_party_is_bad_request() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/figures/map?parties=Monarchist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_evolution_builds_party_colored_segments() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/figures/evolution?country=France")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["country"], "France");
    assert_eq!(json["count"], 3);

    // The first segment is anchored at the dataset's first year.
    assert_eq!(json["segments"][0]["from_year"], 2004);
    assert_eq!(json["segments"][0]["to_year"], 2004);
    assert_eq!(json["segments"][0]["party"], "Left");
    assert_eq!(json["segments"][2]["from_year"], 2005);
    assert_eq!(json["segments"][2]["to_year"], 2006);
    assert_eq!(json["segments"][2]["party"], "Right");

    // The y-span pads the observed min/max by 0.025.
    assert_eq!(
        json["span"]["min"],
        serde_json::to_value(dec!(0.248)).unwrap()
    );
    assert_eq!(
        json["span"]["max"],
        serde_json::to_value(dec!(0.306)).unwrap()
    );
}

#[tokio::test]
async fn test_evolution_unknown_country_degrades_to_empty() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/figures/evolution?country=Atlantis")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 0);
    assert!(json["span"].is_null());
}

#[tokio::test]
async fn test_mean_gini_groups_by_party() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/figures/mean-gini?country=France")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["country"], "France");

    let means = json["means"].as_array().unwrap();
    assert_eq!(means.len(), 2);
    assert_eq!(means[0]["party"], "Left");
    assert_eq!(means[0]["mean"], serde_json::to_value(dec!(0.281)).unwrap());
    assert_eq!(means[1]["party"], "Right");
    assert_eq!(means[1]["mean"], serde_json::to_value(dec!(0.276)).unwrap());
}

#[tokio::test]
async fn test_toggle_playback_flips_the_derived_label() {
    let state = make_test_state();
    let router = build_router(Arc::clone(&state));

    let response = router
        .clone()
        .oneshot(post_json("/api/control/playback", &serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["running"], true);
    assert_eq!(json["button_label"], "Stop");
    assert!(state.playback.is_running());

    let response = router
        .oneshot(post_json("/api/control/playback", &serde_json::json!({})))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["running"], false);
    assert_eq!(json["button_label"], "Start");
    assert!(!state.playback.is_running());
}

#[tokio::test]
async fn test_speed_below_the_floor_is_rejected() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(post_json(
            "/api/control/speed",
            &serde_json::json!({ "tick_interval_ms": 50 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_speed_change_reports_the_previous_interval() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(post_json(
            "/api/control/speed",
            &serde_json::json!({ "tick_interval_ms": 500 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["previous_interval_ms"], 750);
    assert_eq!(json["new_interval_ms"], 500);
}

#[tokio::test]
async fn test_status_reports_stopped_playback() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/control/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["running"], false);
    assert_eq!(json["button_label"], "Start");
    assert_eq!(json["tick_interval_ms"], 750);
    assert_eq!(json["year"], 2004);
}

#[tokio::test]
async fn test_hover_sets_the_country_and_names_the_detail_panels() {
    let state = make_test_state();
    let router = build_router(Arc::clone(&state));

    let response = router
        .oneshot(post_json(
            "/api/control/hover",
            &serde_json::json!({ "country": "Sweden" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["selection"]["hovered_country"], "Sweden");

    let panels = json["panels"].as_array().unwrap();
    assert!(panels.contains(&Value::from("country")));
    assert!(panels.contains(&Value::from("evolution")));
    assert!(panels.contains(&Value::from("mean_gini")));

    let hovered = state.selection.read().await.hovered_country.clone();
    assert_eq!(hovered.as_deref(), Some("Sweden"));
}

#[tokio::test]
async fn test_unset_hover_falls_back_to_a_dataset_country() {
    let state = make_test_state();
    let router = build_router(Arc::clone(&state));

    let response = router
        .oneshot(post_json(
            "/api/control/hover",
            &serde_json::json!({ "country": null }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    let hovered = json["selection"]["hovered_country"].as_str().unwrap();
    assert!(["France", "Sweden", "Italy"].contains(&hovered));
}

#[tokio::test]
async fn test_set_year_clamps_into_the_dataset_range() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(post_json(
            "/api/control/year",
            &serde_json::json!({ "year": 1900 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["selection"]["year"], 2004);
}

#[tokio::test]
async fn test_broadcast_channel() {
    let state = make_test_state();
    let mut rx = state.subscribe();

    let change = YearBroadcast {
        tick: 42,
        year: 2005,
        running: true,
    };

    let receivers = state.broadcast(&change);
    assert_eq!(receivers, 1);

    let received = rx.recv().await.unwrap();
    assert_eq!(received.tick, 42);
    assert_eq!(received.year, 2005);
    assert!(received.running);
}

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
