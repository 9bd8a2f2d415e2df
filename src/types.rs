use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Table holding game sessions.
pub const GAMES_TABLE: &str = "games";
/// Table holding teams, keyed to a game by `game_id`.
pub const TEAMS_TABLE: &str = "teams";

/// A row from the `games` table.
///
/// Only `id` and `join_code` are read; other columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Game {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub join_code: Option<Value>,
}

impl Game {
    /// The identifier as used in an `eq.` filter.
    pub fn filter_id(&self) -> String {
        FieldDisplay(self.id.as_ref()).to_string()
    }
}

/// Teams returned for one game, kept as raw JSON for display.
#[derive(Debug, Clone)]
pub struct TeamListing {
    pub index: usize,
    pub game_id: String,
    pub teams: Value,
}

impl fmt::Display for TeamListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TEAMS IN GAME {} ({}): {}",
            self.index, self.game_id, self.teams
        )
    }
}

/// Renders an optional JSON field for humans: strings bare, other values as
/// compact JSON, absent fields as `None`.
pub struct FieldDisplay<'a>(pub Option<&'a Value>);

impl fmt::Display for FieldDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(Value::String(s)) => f.write_str(s),
            Some(other) => write!(f, "{}", other),
            None => f.write_str("None"),
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " - {} ({})",
            FieldDisplay(self.id.as_ref()),
            FieldDisplay(self.join_code.as_ref())
        )
    }
}
