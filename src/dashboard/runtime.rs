//! Session driver: owns a model and journals every dispatched message.

#![allow(missing_docs)]

use crate::core::config::Config;
use crate::core::errors::Result;
use crate::logger::jsonl::{JournalEntry, JournalWriter, Outcome};

use super::data::ReferenceDataProvider;
use super::model::{DashboardCmd, DashboardModel, DashboardMsg};
use super::snapshot::DashboardSnapshot;
use super::update::update;

/// One running dashboard session.
pub struct DashboardSession {
    model: DashboardModel,
    journal: Option<JournalWriter>,
}

impl DashboardSession {
    /// Build a session; opens the journal when `paths.journal` is set.
    pub fn new(provider: &impl ReferenceDataProvider, config: &Config) -> Result<Self> {
        let model = DashboardModel::new(provider, config)?;
        let journal = config.paths.journal.as_ref().map(JournalWriter::open);
        Ok(Self { model, journal })
    }

    /// Wrap an existing model without a journal.
    #[must_use]
    pub const fn from_model(model: DashboardModel) -> Self {
        Self {
            model,
            journal: None,
        }
    }

    #[must_use]
    pub fn with_journal(mut self, journal: JournalWriter) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Apply `msg` and record it.
    pub fn dispatch(&mut self, msg: DashboardMsg) -> DashboardCmd {
        let event = msg.kind();
        let detail = msg.detail();
        let cmd = update(&mut self.model, msg);
        if let Some(journal) = self.journal.as_mut() {
            let outcome = if cmd.is_noop() {
                Outcome::Unchanged
            } else {
                Outcome::Applied
            };
            journal.write_entry(&JournalEntry::new(event, detail, outcome));
        }
        cmd
    }

    /// Apply messages in order, returning every command.
    pub fn dispatch_all(&mut self, msgs: impl IntoIterator<Item = DashboardMsg>) -> Vec<DashboardCmd> {
        msgs.into_iter().map(|msg| self.dispatch(msg)).collect()
    }

    #[must_use]
    pub const fn model(&self) -> &DashboardModel {
        &self.model
    }

    #[must_use]
    pub fn snapshot(&self, hour: u32) -> DashboardSnapshot {
        self.model.snapshot(hour)
    }

    #[must_use]
    pub fn journal_state(&self) -> Option<&str> {
        self.journal.as_ref().map(JournalWriter::state)
    }
}
