//! Leaderboard submission.
//!
//! When a game ends the player may submit the final score under a name. The game only
//! writes entries; reading and ranking them is left to whatever consumes the sink.

pub mod entry;
pub mod sink;

pub use blocktris_core as core;

pub use entry::{
    is_high_score, LeaderboardEntry, ScoreSubmission, SubmitError, HIGH_SCORE_THRESHOLD,
    MAX_NAME_LEN,
};
pub use sink::{submit_score, JsonLinesSink, LeaderboardSink, MemorySink};
