//! Saved roster templates and per-match team configuration.

use serde::{Deserialize, Serialize};

/// Kit colors, stored as CSS color strings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamColors {
    /// Shirt color.
    pub color: String,
    pub shorts_color: String,
    /// Color of the dorsal text on the chip.
    pub text_color: String,
}

impl TeamColors {
    pub fn home_default() -> Self {
        Self {
            color: "#58a6ff".to_string(),
            shorts_color: "#ffffff".to_string(),
            text_color: "#ffffff".to_string(),
        }
    }

    pub fn away_default() -> Self {
        Self {
            color: "#f0883e".to_string(),
            shorts_color: "#000000".to_string(),
            text_color: "#000000".to_string(),
        }
    }
}

/// One line of a saved roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub number: u32,
    pub name: String,
}

/// A reusable, named roster. Persisted as
/// `{ name, color, shortsColor, textColor, players: [{number, name}] }`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterTemplate {
    pub name: String,
    #[serde(flatten)]
    pub colors: TeamColors,
    #[serde(default)]
    pub players: Vec<RosterEntry>,
}

/// Display identity of a team in the current match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamSide {
    pub name: String,
    pub colors: TeamColors,
}

/// How one team is set up when a match is configured.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamConfig {
    pub side: TeamSide,
    /// Saved roster to use; `None` (or an empty roster) means default numbering.
    #[serde(default)]
    pub roster: Option<Vec<RosterEntry>>,
}

impl TeamConfig {
    /// Default-numbered team with the given name and colors.
    pub fn named(name: impl Into<String>, colors: TeamColors) -> Self {
        Self {
            side: TeamSide {
                name: name.into(),
                colors,
            },
            roster: None,
        }
    }

    /// Team built from a saved template: its name, colors, and players.
    pub fn from_template(template: &RosterTemplate) -> Self {
        Self {
            side: TeamSide {
                name: template.name.clone(),
                colors: template.colors.clone(),
            },
            roster: Some(template.players.clone()),
        }
    }
}
