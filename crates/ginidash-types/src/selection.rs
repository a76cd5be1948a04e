//! UI-observable selection state for the dashboard.
//!
//! [`SelectionState`] is the single mutable object behind the dashboard:
//! which parties are checked, which year the slider shows, whether
//! playback is running, and which country is hovered. It is only ever
//! mutated through the controller's dispatch function, one event at a
//! time.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Party;

/// Playback mode of the year-slider animation.
///
/// The Start/Stop button label is *derived* from this enum rather than
/// stored: the label names the next action, so a stopped animation shows
/// "Start" and a running one shows "Stop".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Playback {
    /// The year slider holds still; interval ticks are ignored.
    Stopped,
    /// The year slider advances one year per interval tick.
    Running,
}

impl Playback {
    /// The opposite mode. Applying this twice returns the original.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Stopped => Self::Running,
            Self::Running => Self::Stopped,
        }
    }

    /// Whether interval ticks should advance the year.
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Button label naming the *next* action.
    pub const fn button_label(self) -> &'static str {
        match self {
            Self::Stopped => "Start",
            Self::Running => "Stop",
        }
    }
}

/// The complete UI-observable state of one dashboard session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SelectionState {
    /// Parties currently checked in the filter.
    pub parties: BTreeSet<Party>,
    /// Year currently shown by the slider. Always within the dataset's
    /// year range.
    pub year: i32,
    /// Playback mode of the slider animation.
    pub playback: Playback,
    /// Country under the cursor on the map, when any.
    pub hovered_country: Option<String>,
}

impl SelectionState {
    /// Initial state: all parties checked, the given year, playback
    /// stopped, nothing hovered.
    pub fn initial(year: i32) -> Self {
        Self {
            parties: Party::ALL.into_iter().collect(),
            year,
            playback: Playback::Stopped,
            hovered_country: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Playback, SelectionState};
    use crate::enums::Party;

    #[test]
    fn toggled_twice_is_identity() {
        assert_eq!(Playback::Stopped.toggled(), Playback::Running);
        assert_eq!(Playback::Running.toggled(), Playback::Stopped);
        assert_eq!(Playback::Stopped.toggled().toggled(), Playback::Stopped);
    }

    #[test]
    fn button_label_names_next_action() {
        assert_eq!(Playback::Stopped.button_label(), "Start");
        assert_eq!(Playback::Running.button_label(), "Stop");
    }

    #[test]
    fn initial_state_selects_every_party() {
        let state = SelectionState::initial(1995);
        assert_eq!(state.parties.len(), Party::ALL.len());
        assert_eq!(state.year, 1995);
        assert!(!state.playback.is_running());
        assert!(state.hovered_country.is_none());
    }
}
