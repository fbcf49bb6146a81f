//! Runtime configuration from environment variables.

use std::time::{SystemTime, UNIX_EPOCH};

pub const SEED_VAR: &str = "BLOCKTRIS_SEED";
pub const PLAYER_VAR: &str = "BLOCKTRIS_PLAYER";
pub const SCORES_PATH_VAR: &str = "BLOCKTRIS_SCORES_PATH";
pub const LOG_PATH_VAR: &str = "BLOCKTRIS_LOG_PATH";
pub const USER_ID_VAR: &str = "BLOCKTRIS_USER_ID";

const DEFAULT_USER_ID: &str = "local";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Piece sequence seed
    pub seed: u32,
    /// Name submitted to the leaderboard when a game ends
    pub player: Option<String>,
    /// JSON-lines leaderboard file
    pub scores_path: Option<String>,
    /// JSON-lines session event log
    pub log_path: Option<String>,
    pub user_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 1,
            player: None,
            scores_path: None,
            log_path: None,
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. Values are trimmed; empty means unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let seed = get(SEED_VAR)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(time_seed);

        Self {
            seed,
            player: get(PLAYER_VAR),
            scores_path: get(SCORES_PATH_VAR),
            log_path: get(LOG_PATH_VAR),
            user_id: get(USER_ID_VAR).unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
        }
    }

    /// Both a player name and a destination are needed to submit scores.
    pub fn submission_target(&self) -> Option<(&str, &str)> {
        match (&self.player, &self.scores_path) {
            (Some(player), Some(path)) => Some((player.as_str(), path.as_str())),
            _ => None,
        }
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
