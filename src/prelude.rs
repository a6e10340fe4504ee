//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use pocket_dashboard::prelude::*;
//! ```

// Core
pub use crate::core::config::{Config, DashboardVariant, VariantConfig};
pub use crate::core::errors::{DashError, Result};

// Reference data
pub use crate::dashboard::data::{
    EntityId, InfoCard, ReferenceData, ReferenceDataBuilder, ReferenceDataProvider, SampleData,
};

// Session
pub use crate::dashboard::model::{DashboardCmd, DashboardModel, DashboardMsg};
pub use crate::dashboard::panels::{PanelId, PanelState};
pub use crate::dashboard::runtime::DashboardSession;
pub use crate::dashboard::selection::{DetailFlow, SelectOutcome};
pub use crate::dashboard::snapshot::DashboardSnapshot;
pub use crate::dashboard::update::update;

// Derived views
pub use crate::dashboard::forecast::{DailyProjection, full_view, summary_view};
pub use crate::dashboard::greeting::Greeting;
pub use crate::dashboard::sparkline::{Point, SparklineGeometry, sparkline_path};
pub use crate::dashboard::theme::{MarketSentiment, SentimentPalette};

// Journal
pub use crate::logger::jsonl::{JournalEntry, JournalWriter};
