//! JSONL action journal: one line per dispatched message.
//!
//! Each line is a self-contained JSON object assembled in memory and written
//! with a single `write_all`, so a tailing reader never sees half a line.
//!
//! Three-level fallback chain:
//! 1. Journal file
//! 2. stderr with `[PDASH-JSONL]` prefix
//! 3. Silent discard (the session must never fail because journaling did)

#![allow(missing_docs)]

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{DashError, Result};

/// Result of applying one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The model changed.
    Applied,
    /// The message was valid but changed nothing.
    Unchanged,
}

/// A single journal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// RFC 3339 UTC timestamp.
    pub ts: String,
    /// Message kind, e.g. `toggle`.
    pub event: String,
    /// Message argument, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub outcome: Outcome,
}

impl JournalEntry {
    /// Create an entry stamped with the current UTC time.
    pub fn new(event: impl Into<String>, detail: Option<String>, outcome: Outcome) -> Self {
        Self {
            ts: format_utc_now(),
            event: event.into(),
            detail,
            outcome,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Normal,
    Stderr,
    Discard,
}

/// Append-only journal writer with degradation to stderr.
pub struct JournalWriter {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    state: WriterState,
    lines_written: u64,
}

impl JournalWriter {
    /// Open (or create) the journal. Falls through the chain on failure.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut w = Self {
            path,
            writer: None,
            state: WriterState::Discard,
            lines_written: 0,
        };
        match open_append(&w.path) {
            Ok(file) => {
                w.writer = Some(BufWriter::new(file));
                w.state = WriterState::Normal;
            }
            Err(e) => {
                let _ = writeln!(io::stderr(), "[PDASH-JSONL] {e}, using stderr");
                w.state = WriterState::Stderr;
            }
        }
        w
    }

    /// Write one entry as one JSONL line and flush it.
    pub fn write_entry(&mut self, entry: &JournalEntry) {
        let line = match serde_json::to_string(entry) {
            Ok(json) => format!("{json}\n"),
            Err(e) => {
                let _ = writeln!(io::stderr(), "[PDASH-JSONL] serialize error: {e}");
                return;
            }
        };
        self.write_line(&line);
    }

    pub fn flush(&mut self) {
        if let Some(w) = self.writer.as_mut() {
            let _ = w.flush();
        }
    }

    /// Current degradation state.
    pub fn state(&self) -> &str {
        match self.state {
            WriterState::Normal => "normal",
            WriterState::Stderr => "stderr",
            WriterState::Discard => "discard",
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines accepted since open, in any state but `discard`.
    pub const fn lines_written(&self) -> u64 {
        self.lines_written
    }

    // ──────────────────────── internals ────────────────────────

    fn write_line(&mut self, line: &str) {
        match self.state {
            WriterState::Normal => {
                let ok = self
                    .writer
                    .as_mut()
                    .is_some_and(|w| w.write_all(line.as_bytes()).and_then(|()| w.flush()).is_ok());
                if ok {
                    self.lines_written += 1;
                } else {
                    self.degrade();
                    self.write_line(line);
                }
            }
            WriterState::Stderr => {
                if write!(io::stderr(), "[PDASH-JSONL] {line}").is_ok() {
                    self.lines_written += 1;
                } else {
                    self.degrade();
                }
            }
            WriterState::Discard => {}
        }
    }

    fn degrade(&mut self) {
        self.writer = None;
        self.state = match self.state {
            WriterState::Normal => {
                let _ = writeln!(io::stderr(), "[PDASH-JSONL] journal write failed, using stderr");
                WriterState::Stderr
            }
            WriterState::Stderr | WriterState::Discard => WriterState::Discard,
        };
    }
}

impl Drop for JournalWriter {
    fn drop(&mut self) {
        self.flush();
    }
}

// ──────────────────────── helpers ────────────────────────

/// Open or create a file for appending, creating parent directories.
fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DashError::io(parent, source))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| DashError::io(path, source))
}

/// Read every entry back from a journal file.
pub fn read_entries(path: &Path) -> Result<Vec<JournalEntry>> {
    let raw = fs::read_to_string(path).map_err(|source| DashError::io(path, source))?;
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(DashError::from))
        .collect()
}

fn format_utc_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

// ──────────────────────── tests ────────────────────────
