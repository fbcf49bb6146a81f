//! Session event log.
//!
//! Each [`SessionEvent`] becomes one JSON object per line, stamped with the loop clock in
//! milliseconds. Human-readable summaries use the `[Session]` tag.
//!
//! Write failures disable the log; the first one is kept so the caller can report it once
//! the terminal is restored.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::SessionEvent;
use crate::scores::LeaderboardEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord<'a> {
    Started {
        ts: u64,
    },
    Settled {
        ts: u64,
        piece: &'static str,
        lines_cleared: u32,
        score_gained: u32,
        hard_drop_rows: u32,
    },
    GameOver {
        ts: u64,
        score: u32,
        level: u32,
        lines: u32,
    },
    ScoreSubmitted {
        ts: u64,
        id: &'a str,
        player_name: &'a str,
        score: u32,
    },
}

impl LogRecord<'static> {
    pub fn from_event(ts: u64, event: &SessionEvent) -> Self {
        match *event {
            SessionEvent::Started => LogRecord::Started { ts },
            SessionEvent::Settled {
                kind,
                lines_cleared,
                score_gained,
                hard_drop_rows,
            } => LogRecord::Settled {
                ts,
                piece: kind.as_str(),
                lines_cleared,
                score_gained,
                hard_drop_rows,
            },
            SessionEvent::GameOver { score, level, lines } => {
                LogRecord::GameOver { ts, score, level, lines }
            }
        }
    }
}

/// One-line description for the `[Session]` summary, or None for routine events.
pub fn describe(event: &SessionEvent) -> Option<String> {
    match *event {
        SessionEvent::Started => Some("[Session] New game".to_string()),
        SessionEvent::Settled { lines_cleared, .. } if lines_cleared == 4 => {
            Some("[Session] Four lines at once".to_string())
        }
        SessionEvent::Settled { .. } => None,
        SessionEvent::GameOver { score, level, lines } => Some(format!(
            "[Session] Game over: score {} level {} lines {}",
            score, level, lines
        )),
    }
}

pub struct EventLog<W: Write = BufWriter<File>> {
    out: Option<W>,
    buf: Vec<u8>,
    error: Option<String>,
}

impl EventLog<BufWriter<File>> {
    /// Append to `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }

    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
            error: None,
        }
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
            error: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record_event(&mut self, ts: u64, event: &SessionEvent) {
        self.write(&LogRecord::from_event(ts, event));
    }

    pub fn record_submission(&mut self, ts: u64, entry: &LeaderboardEntry) {
        self.write(&LogRecord::ScoreSubmitted {
            ts,
            id: &entry.id,
            player_name: &entry.player_name,
            score: entry.score,
        });
    }

    fn write(&mut self, record: &LogRecord<'_>) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        let result = serde_json::to_writer(&mut self.buf, record)
            .map_err(anyhow::Error::from)
            .and_then(|()| {
                self.buf.push(b'\n');
                out.write_all(&self.buf)?;
                out.flush()?;
                Ok(())
            });

        if let Err(e) = result {
            self.error = Some(format!("{e:#}"));
            self.out = None;
        }
    }

    /// The write error that disabled the log, if any.
    pub fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }

    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;
    use std::io;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "read-only"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_one_tagged_object_per_event() {
        let mut log = EventLog::new(Vec::new());
        log.record_event(0, &SessionEvent::Started);
        log.record_event(
            1016,
            &SessionEvent::Settled {
                kind: PieceKind::T,
                lines_cleared: 2,
                score_gained: 100,
                hard_drop_rows: 0,
            },
        );

        let out = String::from_utf8(log.into_inner().unwrap()).unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "started");
        assert_eq!(lines[1]["type"], "settled");
        assert_eq!(lines[1]["ts"], 1016);
        assert_eq!(lines[1]["piece"], "T");
        assert_eq!(lines[1]["lines_cleared"], 2);
    }

    #[test]
    fn write_failure_disables_log_and_keeps_first_error() {
        let mut log = EventLog::new(FailingWriter);
        log.record_event(0, &SessionEvent::Started);
        assert!(!log.is_enabled());
        log.record_event(1, &SessionEvent::Started);
        let err = log.take_error().unwrap();
        assert!(err.contains("read-only"), "{err}");
        assert_eq!(log.take_error(), None);
    }

    #[test]
    fn disabled_log_ignores_records() {
        let mut log = EventLog::disabled();
        log.record_event(0, &SessionEvent::Started);
        assert!(!log.is_enabled());
        assert_eq!(log.take_error(), None);
    }

    #[test]
    fn describe_skips_routine_settles() {
        let settled = SessionEvent::Settled {
            kind: PieceKind::O,
            lines_cleared: 1,
            score_gained: 40,
            hard_drop_rows: 0,
        };
        assert_eq!(describe(&settled), None);
        assert_eq!(
            describe(&SessionEvent::GameOver {
                score: 10,
                level: 0,
                lines: 0
            })
            .as_deref(),
            Some("[Session] Game over: score 10 level 0 lines 0")
        );
    }
}
