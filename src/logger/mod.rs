//! Action journal for dashboard sessions.

pub mod jsonl;
