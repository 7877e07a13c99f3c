//! Core engine for glyphlog.
//!
//! This crate turns a [`LoggerConfig`] into an [`Engine`]: a fixed set of
//! named logging methods, each with a prefix resolved once at startup, all
//! writing through a single [`Sink`].
//!
//! - [`Registry`] holds the built-in and custom method identifiers
//! - [`resolve`] computes the [`PrefixMap`] from layered configuration
//! - [`CustomHandler`] adapts user functions into dispatchable methods
//! - [`Surface`] is the dispatch surface, with [`Surface::dev`] and
//!   [`Surface::no_prefix`] decorators
//!
//! # Example
//!
//! ```ignore
//! use glyphlog_core::{Dispatch, Engine, LoggerConfig, parts};
//! use glyphlog_core::testing::RecordingSink;
//!
//! let sink = RecordingSink::new();
//! let engine = Engine::new(LoggerConfig::new(), sink.clone());
//!
//! engine.log(&parts!["hi"]);
//! engine.no_prefix().warn(&parts!["bare"]);
//! engine.dev().info(&parts!["only in dev mode"]);
//! ```

#![forbid(unsafe_code)]

mod config;
mod custom;
mod engine;
mod error;
mod icons;
pub mod logging;
mod registry;
mod resolver;
pub mod runtime;
mod sink;
mod surface;
pub mod testing;
mod value;

pub use config::{CustomMethodDefinition, LoggerConfig, dev_mode_from_env};
pub use custom::{CustomHandler, HandlerOutput};
pub use engine::Engine;
pub use error::{ConfigError, DispatchError, IconPackError, Warning};
pub use icons::{EmojiIcons, FileIcons, IconFuture, IconPack, IconProvider, StaticIcons, icon_name};
pub use registry::{BUILTIN_METHODS, MethodKind, Registry, RegistrationOrigin};
pub use resolver::{PrefixMap, ResolvedConfig, builtin_default_prefix, resolve};
pub use runtime::block_on;
pub use sink::{Channel, Sink};
pub use surface::{Dispatch, Gate, Method, Prefixing, Surface};
pub use value::LogValue;
