//! Error and warning types.
//!
//! Nothing in the engine is fatal: construction problems become
//! [`Warning`]s with a safe fallback, and the only dispatch-time error is
//! naming a method that was never installed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::registry::RegistrationOrigin;

/// Failure to read or parse a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML or has the wrong shape.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure to load an icon pack.
#[derive(Debug, Error)]
pub enum IconPackError {
    #[error("failed to read icon pack {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid TOML icon pack: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON icon pack: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported icon pack format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Reported by custom providers that have nothing to offer.
    #[error("icon pack unavailable: {0}")]
    Unavailable(String),
}

/// Error returned when dispatching through a surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("no logging method named `{0}` is installed")]
    UnknownMethod(String),

    #[error("no engine is bound")]
    NotBound,
}

/// A non-fatal anomaly detected while building an engine.
///
/// Warnings are written to the sink's warning channel and kept on the
/// engine for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    #[error("icon pack could not be loaded, falling back to defaults: {reason}")]
    IconPackUnavailable { reason: String },
    #[error("icon pack requested but no provider was supplied")]
    IconPackNotProvided,
    #[error("custom method `{id}` replaces an existing {previous} method")]
    MethodCollision {
        id: String,
        previous: RegistrationOrigin,
    },
    #[error("custom method `{id}` has no callable handler and was not installed")]
    HandlerNotCallable { id: String },
}
