//! Leaderboard entries and submission validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::GameSnapshot;

/// Longest accepted player name, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 20;

/// Scores above this are announced as a new high score.
pub const HIGH_SCORE_THRESHOLD: u32 = 50_000;

pub fn is_high_score(score: u32) -> bool {
    score > HIGH_SCORE_THRESHOLD
}

/// One leaderboard row as written to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub user_id: String,
    pub player_name: String,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    /// Milliseconds since the Unix epoch
    pub created_at: u64,
}

/// Rejected submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    EmptyName,
    NameTooLong,
    NothingToSubmit,
    NotGameOver,
    Sink(String),
}

impl SubmitError {
    pub fn code(&self) -> &'static str {
        match self {
            SubmitError::EmptyName | SubmitError::NameTooLong => "invalid_name",
            SubmitError::NothingToSubmit | SubmitError::NotGameOver => "invalid_score",
            SubmitError::Sink(_) => "sink_failed",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SubmitError::EmptyName => "player name is empty",
            SubmitError::NameTooLong => "player name is longer than 20 characters",
            SubmitError::NothingToSubmit => "score is zero",
            SubmitError::NotGameOver => "game is still in progress",
            SubmitError::Sink(reason) => reason,
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for SubmitError {}

/// A validated final score, ready to become a [`LeaderboardEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    player_name: String,
    score: u32,
    level: u32,
    lines_cleared: u32,
}

impl ScoreSubmission {
    /// Validate a finished game and a player name.
    ///
    /// The name is trimmed first; it must then hold 1..=20 characters.
    pub fn from_snapshot(snap: &GameSnapshot, player_name: &str) -> Result<Self, SubmitError> {
        if !snap.game_over {
            return Err(SubmitError::NotGameOver);
        }
        Self::new(player_name, snap.score, snap.level, snap.lines)
    }

    pub fn new(player_name: &str, score: u32, level: u32, lines_cleared: u32) -> Result<Self, SubmitError> {
        let name = player_name.trim();
        if name.is_empty() {
            return Err(SubmitError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(SubmitError::NameTooLong);
        }
        if score == 0 {
            return Err(SubmitError::NothingToSubmit);
        }
        Ok(Self {
            player_name: name.to_string(),
            score,
            level,
            lines_cleared,
        })
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn into_entry(self, user_id: &str, created_at: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            id: format!("score_{created_at}"),
            user_id: user_id.to_string(),
            player_name: self.player_name,
            score: self.score,
            level: self.level,
            lines_cleared: self.lines_cleared,
            created_at,
        }
    }
}
