//! DASH-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, DashError>;

/// Top-level error type for the dashboard core.
///
/// Model transitions are total and never produce one of these; errors only
/// arise at the edges (configuration, reference-data loading, action parsing).
#[derive(Debug, Error)]
pub enum DashError {
    #[error("[DASH-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[DASH-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[DASH-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[DASH-2001] invalid reference data: {details}")]
    InvalidReferenceData { details: String },

    #[error("[DASH-2002] unknown {collection} item: {key}")]
    UnknownItem {
        collection: &'static str,
        key: String,
    },

    #[error("[DASH-2003] unknown location: {name}")]
    UnknownLocation { name: String },

    #[error("[DASH-2004] invalid action {raw:?}: {details}")]
    InvalidAction { raw: String, details: String },

    #[error("[DASH-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[DASH-3001] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DashError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "DASH-1001",
            Self::MissingConfig { .. } => "DASH-1002",
            Self::ConfigParse { .. } => "DASH-1003",
            Self::InvalidReferenceData { .. } => "DASH-2001",
            Self::UnknownItem { .. } => "DASH-2002",
            Self::UnknownLocation { .. } => "DASH-2003",
            Self::InvalidAction { .. } => "DASH-2004",
            Self::Serialization { .. } => "DASH-2101",
            Self::Io { .. } => "DASH-3001",
        }
    }

    /// Whether the failure came from user-supplied input (config, actions)
    /// rather than the environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. }
                | Self::MissingConfig { .. }
                | Self::ConfigParse { .. }
                | Self::UnknownItem { .. }
                | Self::UnknownLocation { .. }
                | Self::InvalidAction { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for DashError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for DashError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DashError {
    fn from(value: toml::ser::Error) -> Self {
        Self::Serialization {
            context: "toml",
            details: value.to_string(),
        }
    }
}
