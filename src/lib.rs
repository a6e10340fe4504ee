#![forbid(unsafe_code)]

//! Pocket Dashboard (pdash): presentation-state core for a family of mobile
//! dashboards: weather, stock market, and media browsing.
//!
//! The core owns panel visibility, detail selections, and session toggles,
//! and derives view-models (forecast summaries, sparkline coordinates,
//! greetings, palettes) from immutable reference data. Rendering is left to
//! an external view layer that dispatches messages and reads snapshots.
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use pocket_dashboard::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use pocket_dashboard::core::config::Config;
//! use pocket_dashboard::dashboard::sparkline::SparklineGeometry;
//! ```

pub mod prelude;

pub mod core;
pub mod dashboard;
pub mod logger;
