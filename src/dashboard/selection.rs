//! Detail flows: what is currently open in the stock, media, day, and
//! condition sheets.
//!
//! Each flow keeps at most one selected entity. Opening a new item replaces
//! the previous selection. Dismissing only hides the sheet; the last
//! selection stays readable until the next `select`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::data::EntityId;

/// The analogous selection → detail → dismiss cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailFlow {
    Stock,
    Media,
    Day,
    /// Weather metric cards (feels like, humidity, UV).
    Condition,
}

impl DetailFlow {
    pub const ALL: [Self; 4] = [Self::Stock, Self::Media, Self::Day, Self::Condition];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Media => "media",
            Self::Day => "day",
            Self::Condition => "condition",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

impl fmt::Display for DetailFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a `select` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectOutcome {
    /// Selection changed to the requested item.
    Selected,
    /// The item was already selected (sheet re-shown if hidden).
    Unchanged,
    /// The item is not in the flow's collection; nothing changed.
    Rejected,
}

/// Selected item per flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    stock: Option<EntityId>,
    media: Option<EntityId>,
    day: Option<EntityId>,
    condition: Option<EntityId>,
}

impl Selections {
    #[must_use]
    pub fn get(&self, flow: DetailFlow) -> Option<EntityId> {
        match flow {
            DetailFlow::Stock => self.stock,
            DetailFlow::Media => self.media,
            DetailFlow::Day => self.day,
            DetailFlow::Condition => self.condition,
        }
    }

    fn slot(&mut self, flow: DetailFlow) -> &mut Option<EntityId> {
        match flow {
            DetailFlow::Stock => &mut self.stock,
            DetailFlow::Media => &mut self.media,
            DetailFlow::Day => &mut self.day,
            DetailFlow::Condition => &mut self.condition,
        }
    }

    /// Replace the selection for `flow`. Membership must be checked by the
    /// caller; this type only stores ids.
    pub fn set(&mut self, flow: DetailFlow, id: EntityId) -> SelectOutcome {
        let slot = self.slot(flow);
        if *slot == Some(id) {
            SelectOutcome::Unchanged
        } else {
            *slot = Some(id);
            SelectOutcome::Selected
        }
    }

    /// Drop the selection for `flow`. Only used when the backing collection
    /// changes underneath it (location switch), never on dismiss.
    pub fn clear(&mut self, flow: DetailFlow) {
        *self.slot(flow) = None;
    }
}
