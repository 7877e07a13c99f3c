//! Bridges from the `log` and `tracing` ecosystems into an engine.
//!
//! - [`GlyphLogger`] - a `log` crate logger
//! - [`GlyphLayer`] / [`GlyphSubscriberBuilder`] - a tracing layer and subscriber builder
//!
//! Both route by level onto the built-in methods:
//!
//! | Level | Method |
//! |-------|--------|
//! | Error | `error` |
//! | Warn | `warn` |
//! | Info | `info` |
//! | Debug, Trace | `log`, through the developer-mode gate |
//!
//! Records whose target belongs to glyphlog itself are never routed, so the
//! engine's own diagnostics cannot feed back into it.

mod logger;
mod subscriber;

use std::sync::Arc;

use glyphlog_core::logging::is_internal;
use glyphlog_core::{Dispatch, Engine, LogValue};
use log::Level;

pub use logger::{GlyphLogger, GlyphLoggerBuilder};
pub use subscriber::{GlyphLayer, GlyphSubscriberBuilder};

/// Which engine a bridge writes to.
#[derive(Debug, Clone, Default)]
pub enum EngineHandle {
    /// Whatever engine is globally bound at the time of the record.
    #[default]
    Global,
    /// A specific engine.
    Fixed(Arc<Engine>),
}

impl EngineHandle {
    fn get(&self) -> Option<Arc<Engine>> {
        match self {
            Self::Global => crate::global::engine(),
            Self::Fixed(engine) => Some(Arc::clone(engine)),
        }
    }
}

/// Sends one record's parts to the method matching `level`.
pub fn route(engine: &Engine, level: Level, parts: &[LogValue]) {
    match level {
        Level::Error => engine.error(parts),
        Level::Warn => engine.warn(parts),
        Level::Info => engine.info(parts),
        Level::Debug | Level::Trace => engine.dev().log(parts),
    }
}

/// Whether a record from `target` may be routed.
#[must_use]
pub fn is_routable(target: &str) -> bool {
    !is_internal(target)
}
