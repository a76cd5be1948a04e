//! Page and figure endpoint handlers for the dashboard server.
//!
//! All handlers read from the shared [`AppState`]; none of them mutate
//! the selection (mutations go through the control endpoints).
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | The dashboard page |
//! | `GET` | `/api/state` | Selection, playback, dataset bounds |
//! | `GET` | `/api/figures/map` | Filtered map points for one year |
//! | `GET` | `/api/figures/evolution` | Per-country Gini evolution segments |
//! | `GET` | `/api/figures/mean-gini` | Per-country mean Gini per party |

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use ginidash_core::controller;
use ginidash_types::{GiniRecord, Party};
use rust_decimal::Decimal;

use crate::error::DashboardError;
use crate::state::AppState;

/// Padding applied above and below the evolution figure's y-range.
const EVOLUTION_Y_PADDING: Decimal = Decimal::from_parts(25, 0, 0, false, 3);

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/figures/map`.
#[derive(Debug, serde::Deserialize)]
pub struct MapQuery {
    /// Year to show; defaults to the current slider year.
    pub year: Option<i32>,
    /// Comma-separated party names; defaults to the current checklist.
    pub parties: Option<String>,
}

/// Query parameters for the per-country figure endpoints.
#[derive(Debug, serde::Deserialize)]
pub struct CountryQuery {
    /// Country to detail; defaults to the hovered country, falling back
    /// to a random dataset country.
    pub country: Option<String>,
}

// ---------------------------------------------------------------------------
// GET / -- the dashboard page
// ---------------------------------------------------------------------------

/// Serve the dashboard page.
///
/// The page is fully static; every dynamic value is fetched from the
/// API, so nothing is templated server-side.
#[allow(clippy::unused_async)]
pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

// ---------------------------------------------------------------------------
// GET /api/state -- selection, playback, dataset bounds
// ---------------------------------------------------------------------------

/// Return the current selection, playback status, and the dataset
/// bounds the page needs to build its controls.
pub async fn get_state(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, DashboardError> {
    let selection = state.selection.read().await.clone();
    let status = state.playback.status(selection.year);

    Ok(Json(serde_json::json!({
        "selection": selection,
        "playback": status,
        "year_range": state.store.year_range(),
        "years": state.store.years(),
        "countries": state.store.countries(),
        "parties": Party::ALL,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/figures/map -- filtered map points
// ---------------------------------------------------------------------------

/// Return the map points for one year and party set.
///
/// No matching records is a valid answer: the response carries zero
/// points and the page renders an empty map.
pub async fn map_figure(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MapQuery>,
) -> Result<impl IntoResponse, DashboardError> {
    let selection = state.selection.read().await;

    let year = params.year.unwrap_or(selection.year);
    let parties = match params.parties.as_deref() {
        Some(list) => parse_parties(list)?,
        None => selection.parties.clone(),
    };

    let points: Vec<&GiniRecord> = controller::filter_records(&state.store, &parties, year);

    Ok(Json(serde_json::json!({
        "year": year,
        "count": points.len(),
        "points": points,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/figures/evolution -- per-country Gini evolution
// ---------------------------------------------------------------------------

/// Return the Gini evolution of one country as year segments colored by
/// the governing party.
///
/// Each segment runs from the previous observation to the current one;
/// the first segment is anchored at the dataset's first year. An
/// unknown country yields an empty segment list, not an error.
pub async fn evolution_figure(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountryQuery>,
) -> Result<impl IntoResponse, DashboardError> {
    let country = resolve_country(&state, params.country).await;
    let series = state.store.country_series(&country);
    let range = state.store.year_range();

    let mut segments = Vec::with_capacity(series.len());
    let mut prev: Option<&GiniRecord> = None;
    for record in series.iter().copied() {
        let (from_year, from_gini) =
            prev.map_or((range.min, record.gini), |p| (p.year, p.gini));
        segments.push(serde_json::json!({
            "from_year": from_year,
            "to_year": record.year,
            "from_gini": from_gini,
            "to_gini": record.gini,
            "party": record.party,
        }));
        prev = Some(record);
    }

    let span = gini_span(&series);

    Ok(Json(serde_json::json!({
        "country": country,
        "count": segments.len(),
        "segments": segments,
        "span": span,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/figures/mean-gini -- per-country mean Gini per party
// ---------------------------------------------------------------------------

/// Return the mean Gini per governing party for one country.
pub async fn mean_gini_figure(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountryQuery>,
) -> Result<impl IntoResponse, DashboardError> {
    let country = resolve_country(&state, params.country).await;

    let means = state
        .store
        .mean_gini_by_party(&country)
        .map_err(|e| DashboardError::Internal(e.to_string()))?;

    let bars: Vec<serde_json::Value> = means
        .iter()
        .map(|(party, mean)| {
            serde_json::json!({
                "party": party,
                "mean": mean,
            })
        })
        .collect();

    Ok(Json(serde_json::json!({
        "country": country,
        "means": bars,
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a comma-separated party list, rejecting unknown names.
fn parse_parties(list: &str) -> Result<BTreeSet<Party>, DashboardError> {
    let mut parties = BTreeSet::new();
    for name in list.split(',').filter(|s| !s.trim().is_empty()) {
        let party = Party::from_label(name)
            .ok_or_else(|| DashboardError::InvalidQuery(format!("unknown party {name:?}")))?;
        parties.insert(party);
    }
    Ok(parties)
}

/// Resolve the figure country: explicit parameter, then the hovered
/// country, then a random dataset country.
async fn resolve_country(state: &AppState, param: Option<String>) -> String {
    if let Some(country) = param {
        return country;
    }

    let hovered = state.selection.read().await.hovered_country.clone();
    if let Some(country) = hovered {
        return country;
    }

    let mut sampler = state.sampler.lock().await;
    controller::resolve_hovered_country(&state.store, None, &mut *sampler).unwrap_or_default()
}

/// Min/max Gini of a series padded for display, or `None` for an empty
/// series.
fn gini_span(series: &[&GiniRecord]) -> Option<serde_json::Value> {
    let mut bounds: Option<(Decimal, Decimal)> = None;
    for record in series {
        bounds = Some(bounds.map_or((record.gini, record.gini), |(lo, hi)| {
            (lo.min(record.gini), hi.max(record.gini))
        }));
    }

    bounds.map(|(lo, hi)| {
        let min = lo.checked_sub(EVOLUTION_Y_PADDING).unwrap_or(lo);
        let max = hi.checked_add(EVOLUTION_Y_PADDING).unwrap_or(hi);
        serde_json::json!({ "min": min, "max": max })
    })
}

/// The dashboard page: controls, the map, and the two detail figures,
/// wired to the JSON API and the year `WebSocket`. Chart rendering is
/// plotly.js from the CDN.
const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Ginidash</title>
    <script src="https://cdn.plot.ly/plotly-2.32.0.min.js"></script>
    <style>
        body {
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 1000px;
            margin: 0 auto;
        }
        h1 { color: #58a6ff; margin-bottom: 0.25rem; }
        .subtitle { color: #8b949e; margin-top: 0; }
        .controls {
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 1rem 0;
            display: flex;
            align-items: center;
            gap: 1.5rem;
            flex-wrap: wrap;
        }
        .controls label { margin-right: 0.75rem; }
        #year-slider { width: 260px; }
        #year-label { color: #58a6ff; font-weight: bold; min-width: 3.5rem; }
        button {
            background: #21262d;
            color: #58a6ff;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 0.4rem 1.2rem;
            font-family: inherit;
            cursor: pointer;
        }
        button:hover { border-color: #58a6ff; }
        #country { color: #7ee787; }
        .figures { display: flex; gap: 1rem; flex-wrap: wrap; }
        .figures > div { flex: 1; min-width: 420px; }
        hr { border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }
    </style>
</head>
<body>
    <h1>Ginidash</h1>
    <p class="subtitle">Gini inequality by governing party across Europe</p>

    <div class="controls">
        <span id="party-boxes"></span>
        <input type="range" id="year-slider" step="1">
        <span id="year-label"></span>
        <button id="playback">Start</button>
    </div>

    <div id="map" style="height:500px;"></div>
    <hr>
    <h2 id="country"></h2>
    <div class="figures">
        <div id="evolution" style="height:320px;"></div>
        <div id="mean-gini" style="height:320px;"></div>
    </div>

    <script>
        'use strict';

        const COLORS = { Left: 'indianred', Center: 'goldenrod', Right: 'darkcyan' };
        const DARK = {
            paper_bgcolor: '#0d1117',
            plot_bgcolor: '#0d1117',
            font: { color: '#c9d1d9' },
            margin: { r: 0, t: 10, l: 40, b: 30 },
            showlegend: false
        };

        const api = (path) => fetch(path).then((r) => r.json());
        const post = (path, body) => fetch(path, {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(body)
        }).then((r) => r.json());

        function selectedParties() {
            return Array.from(document.querySelectorAll('.party:checked'))
                .map((box) => box.value);
        }

        async function drawMap() {
            const year = document.getElementById('year-slider').value;
            const parties = selectedParties().join(',');
            const fig = await api(`/api/figures/map?year=${year}&parties=${parties}`);
            const byParty = {};
            for (const p of fig.points) {
                (byParty[p.party] = byParty[p.party] || []).push(p);
            }
            const traces = Object.entries(byParty).map(([party, pts]) => ({
                type: 'scattergeo',
                locations: pts.map((p) => p.iso),
                text: pts.map((p) => `${p.country}: ${p.gini}`),
                hoverinfo: 'text',
                customdata: pts.map((p) => p.country),
                marker: {
                    size: pts.map((p) => Number(p.marker_size)),
                    color: COLORS[party],
                    opacity: 0.95
                }
            }));
            const layout = Object.assign({}, DARK, {
                geo: {
                    scope: 'europe',
                    projection: { type: 'natural earth' },
                    bgcolor: '#0d1117',
                    showland: true, landcolor: 'mediumseagreen',
                    showocean: true, oceancolor: 'lightskyblue',
                    showcoastlines: true, coastlinecolor: 'rebeccapurple',
                    resolution: 50
                },
                margin: { r: 0, t: 0, l: 0, b: 0 }
            });
            await Plotly.react('map', traces, layout);
        }

        async function drawDetails() {
            const evo = await api('/api/figures/evolution');
            document.getElementById('country').textContent = evo.country;
            const traces = evo.segments.map((s) => ({
                x: [s.from_year, s.to_year],
                y: [Number(s.from_gini), Number(s.to_gini)],
                fill: 'tozeroy',
                fillcolor: COLORS[s.party],
                line: { color: COLORS[s.party] },
                mode: 'lines'
            }));
            const layout = Object.assign({}, DARK, evo.span ? {
                yaxis: { range: [Number(evo.span.min), Number(evo.span.max)] }
            } : {});
            await Plotly.react('evolution', traces, layout);

            const mean = await api(`/api/figures/mean-gini?country=${encodeURIComponent(evo.country)}`);
            await Plotly.react('mean-gini', [{
                type: 'bar',
                x: mean.means.map((m) => m.party),
                y: mean.means.map((m) => Number(m.mean)),
                marker: { color: mean.means.map((m) => COLORS[m.party]) }
            }], DARK);
        }

        let hoverInFlight = false;
        async function hover(country) {
            if (hoverInFlight) { return; }
            hoverInFlight = true;
            try {
                await post('/api/control/hover', { country: country });
                await drawDetails();
            } finally {
                hoverInFlight = false;
            }
        }

        function setYearLabel(year) {
            document.getElementById('year-label').textContent = year;
        }

        async function init() {
            const state = await api('/api/state');

            const boxes = document.getElementById('party-boxes');
            for (const party of state.parties) {
                const label = document.createElement('label');
                const box = document.createElement('input');
                box.type = 'checkbox';
                box.className = 'party';
                box.value = party;
                box.checked = state.selection.parties.includes(party);
                box.addEventListener('change', async () => {
                    await post('/api/control/parties', { parties: selectedParties() });
                    await drawMap();
                });
                label.appendChild(box);
                label.appendChild(document.createTextNode(' ' + party));
                boxes.appendChild(label);
            }

            const slider = document.getElementById('year-slider');
            slider.min = state.year_range.min;
            slider.max = state.year_range.max;
            slider.value = state.selection.year;
            setYearLabel(state.selection.year);
            slider.addEventListener('input', async () => {
                setYearLabel(slider.value);
                await post('/api/control/year', { year: Number(slider.value) });
                await drawMap();
            });

            const button = document.getElementById('playback');
            button.textContent = state.playback.button_label;
            button.addEventListener('click', async () => {
                const result = await post('/api/control/playback', {});
                button.textContent = result.button_label;
            });

            // Seed the detail figures with a (random) hovered country.
            await post('/api/control/hover', { country: null });
            await drawMap();
            await drawDetails();

            document.getElementById('map').on('plotly_hover', (ev) => {
                const country = ev.points[0] && ev.points[0].customdata;
                if (country) { hover(country); }
            });

            const proto = location.protocol === 'https:' ? 'wss' : 'ws';
            const socket = new WebSocket(`${proto}://${location.host}/ws/years`);
            socket.onmessage = async (msg) => {
                const change = JSON.parse(msg.data);
                slider.value = change.year;
                setYearLabel(change.year);
                await drawMap();
            };
        }

        init();
    </script>
</body>
</html>"##;
