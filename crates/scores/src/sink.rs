//! Destinations for leaderboard entries.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::entry::{LeaderboardEntry, ScoreSubmission, SubmitError};

/// Something that accepts finished scores.
pub trait LeaderboardSink {
    fn submit(&mut self, entry: &LeaderboardEntry) -> Result<()>;
}

/// Appends one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    out: W,
    buf: Vec<u8>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(256),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open leaderboard file {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> LeaderboardSink for JsonLinesSink<W> {
    fn submit(&mut self, entry: &LeaderboardEntry) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, entry).context("encode leaderboard entry")?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf).context("write leaderboard entry")?;
        self.out.flush().context("flush leaderboard entry")?;
        Ok(())
    }
}

/// Keeps entries in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub entries: Vec<LeaderboardEntry>,
}

impl LeaderboardSink for MemorySink {
    fn submit(&mut self, entry: &LeaderboardEntry) -> Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }
}

/// Turn a validated submission into an entry and hand it to `sink`.
pub fn submit_score(
    sink: &mut dyn LeaderboardSink,
    submission: ScoreSubmission,
    user_id: &str,
    created_at: u64,
) -> Result<LeaderboardEntry, SubmitError> {
    let entry = submission.into_entry(user_id, created_at);
    sink.submit(&entry)
        .map_err(|e| SubmitError::Sink(format!("{e:#}")))?;
    Ok(entry)
}
