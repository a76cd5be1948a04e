//! Enumeration types for the inequality dashboard.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Political orientation of a country's governing party in a given year.
///
/// The source dataset labels parties in French (`Gauche`, `Centre`,
/// `Droite`); [`Party::from_label`] accepts both those and the English
/// names so either dataset edition loads cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Party {
    /// Left-leaning governing party.
    Left,
    /// Centrist governing party.
    Center,
    /// Right-leaning governing party.
    Right,
}

impl Party {
    /// All parties, in display order.
    pub const ALL: [Self; 3] = [Self::Left, Self::Center, Self::Right];

    /// Parse a dataset label into a party.
    ///
    /// Accepts English and French labels, case-insensitively. Returns
    /// `None` for anything else; the loader treats that as a malformed
    /// row rather than guessing.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "left" | "gauche" => Some(Self::Left),
            "center" | "centre" => Some(Self::Center),
            "right" | "droite" => Some(Self::Right),
            _ => None,
        }
    }

    /// English display name, as rendered in the dashboard legend.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Center => "Center",
            Self::Right => "Right",
        }
    }
}

impl core::fmt::Display for Party {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::Party;

    #[test]
    fn from_label_accepts_french_and_english() {
        assert_eq!(Party::from_label("Gauche"), Some(Party::Left));
        assert_eq!(Party::from_label("centre"), Some(Party::Center));
        assert_eq!(Party::from_label("DROITE"), Some(Party::Right));
        assert_eq!(Party::from_label("Left"), Some(Party::Left));
        assert_eq!(Party::from_label(" right "), Some(Party::Right));
    }

    #[test]
    fn from_label_rejects_unknown() {
        assert_eq!(Party::from_label("Monarchist"), None);
        assert_eq!(Party::from_label(""), None);
    }
}
