//! Play request payloads

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const MAX_PLAYERS: usize = 32;
const MAX_NOTES_LENGTH: usize = 2000;

/// One participant in a recorded play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub win: bool,
}

/// Body for `POST /v1/plays`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlayRequest {
    pub game_id: i64,
    /// Calendar date of the session, `YYYY-MM-DD`.
    pub played_at: NaiveDate,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub players: Vec<PlayerEntry>,
}

impl CreatePlayRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.game_id < 1 {
            return Err("game_id must be positive".to_string());
        }
        if self.players.len() > MAX_PLAYERS {
            return Err(format!("at most {} players per play", MAX_PLAYERS));
        }
        for player in &self.players {
            if player.name.trim().is_empty() {
                return Err("player names must not be empty".to_string());
            }
        }
        if let Some(notes) = &self.notes {
            if notes.len() > MAX_NOTES_LENGTH {
                return Err(format!(
                    "notes must be at most {} characters",
                    MAX_NOTES_LENGTH
                ));
            }
        }
        Ok(())
    }
}
