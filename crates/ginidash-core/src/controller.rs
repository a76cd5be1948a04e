//! Selection-state controller for the dashboard.
//!
//! Every interaction the dashboard supports is one [`UiEvent`], and
//! [`dispatch`] is the single function that applies it: the event
//! mutates the [`SelectionState`] and the returned [`Panel`] set names
//! exactly the parts of the page that must re-render. Sequencing
//! between dependent updates (a hover changes the country label *and*
//! both detail figures; a tick moves the slider *and* the map) is
//! explicit here instead of being left to a UI framework's dependency
//! resolution.
//!
//! The handlers are pure over their inputs: the store is read-only, the
//! randomness source is injected, and nothing here performs I/O.

use std::collections::BTreeSet;

use ginidash_data::GiniStore;
use ginidash_types::{GiniRecord, Party, Playback, SelectionState, YearRange};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One discrete dashboard interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The party checklist changed.
    SetParties(BTreeSet<Party>),
    /// The year slider was dragged to a value.
    SetYear(i32),
    /// The Start/Stop button was clicked.
    ToggleButton,
    /// The playback interval fired.
    IntervalTick,
    /// The map hover changed; `None` means the cursor left the map
    /// (or the page just loaded).
    Hover(Option<String>),
}

/// A region of the page that re-renders after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    /// The scatter-geo map of Gini markers.
    Map,
    /// The year slider position.
    Slider,
    /// The Start/Stop button label.
    PlaybackButton,
    /// The hovered-country heading.
    Country,
    /// The per-country Gini evolution figure.
    Evolution,
    /// The per-country mean-Gini-per-party figure.
    MeanGini,
}

/// All records whose party is in `parties` and whose year matches.
///
/// An empty result is valid and renders as an empty figure.
pub fn filter_records<'a>(
    store: &'a GiniStore,
    parties: &BTreeSet<Party>,
    year: i32,
) -> Vec<&'a GiniRecord> {
    store.filter(parties, year)
}

/// Next slider year for one playback tick.
///
/// While running, advances one year and wraps to `range.min` once the
/// current year has reached `range.max`. While stopped, the year is
/// returned unchanged whatever its value.
pub const fn advance_year(playback: Playback, year: i32, range: YearRange) -> i32 {
    if !playback.is_running() {
        return year;
    }
    if year >= range.max {
        range.min
    } else {
        year.saturating_add(1)
    }
}

/// Resolve the hover target to a country name.
///
/// An unset hover picks a uniformly random country from the dataset so
/// the detail figures always have something to show.
pub fn resolve_hovered_country<R: Rng + ?Sized>(
    store: &GiniStore,
    hover: Option<&str>,
    rng: &mut R,
) -> Option<String> {
    hover.map_or_else(
        || store.random_country(rng).map(ToOwned::to_owned),
        |country| Some(country.to_owned()),
    )
}

/// Apply one event to the selection state.
///
/// Returns the set of panels invalidated by the event; an empty set
/// means nothing observable changed (e.g. an interval tick while
/// stopped).
pub fn dispatch<R: Rng + ?Sized>(
    store: &GiniStore,
    state: &mut SelectionState,
    event: UiEvent,
    rng: &mut R,
) -> BTreeSet<Panel> {
    let range = store.year_range();

    match event {
        UiEvent::SetParties(parties) => {
            state.parties = parties;
            [Panel::Map].into_iter().collect()
        }
        UiEvent::SetYear(year) => {
            // The slider cannot produce an out-of-range value, but the
            // invariant holds regardless of the caller.
            state.year = range.clamp(year);
            [Panel::Map].into_iter().collect()
        }
        UiEvent::ToggleButton => {
            state.playback = state.playback.toggled();
            [Panel::PlaybackButton].into_iter().collect()
        }
        UiEvent::IntervalTick => {
            let next = advance_year(state.playback, state.year, range);
            if next == state.year {
                return BTreeSet::new();
            }
            state.year = next;
            [Panel::Map, Panel::Slider].into_iter().collect()
        }
        UiEvent::Hover(hover) => {
            state.hovered_country = resolve_hovered_country(store, hover.as_deref(), rng);
            [Panel::Country, Panel::Evolution, Panel::MeanGini]
                .into_iter()
                .collect()
        }
    }
}
