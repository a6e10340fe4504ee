//! Time-of-day greeting.
//!
//! Recomputed on every render; the clock moves independently of any event
//! the model sees, so nothing here is cached.

use chrono::{Local, Timelike};
use serde::Serialize;

/// One of four fixed day-part buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Greeting {
    /// Bucket an hour-of-day using half-open intervals:
    /// `[5,12)` morning, `[12,18)` afternoon, `[18,22)` evening, else night.
    #[must_use]
    pub const fn for_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            18..=21 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Bucket any chrono time-bearing value by its hour.
    #[must_use]
    pub fn at(time: &impl Timelike) -> Self {
        Self::for_hour(time.hour())
    }

    /// Bucket the caller's local clock.
    #[must_use]
    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }

    /// Full header text, e.g. `Good Morning!`.
    #[must_use]
    pub fn salutation(self) -> String {
        format!("Good {}!", self.label())
    }
}
