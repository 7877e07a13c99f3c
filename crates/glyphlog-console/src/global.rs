//! Process-wide engine binding.
//!
//! One engine can be bound per process. [`install`] walks the lifecycle
//! `Constructed -> Initializing -> Bound`; calling it again re-resolves the
//! configuration and swaps the bound engine. Engines taken with [`engine`]
//! before a re-bind keep working; they just stop being the bound one.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use glyphlog_core::logging::targets;
use glyphlog_core::{
    Dispatch, DispatchError, Engine, IconProvider, LogValue, LoggerConfig, Sink,
};

/// Where the global binding is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Nothing has been installed.
    Constructed,
    /// An install is loading its icon pack.
    Initializing,
    /// An engine is bound and callable.
    Bound,
}

struct Slot {
    lifecycle: Lifecycle,
    engine: Option<Arc<Engine>>,
}

static SLOT: RwLock<Slot> = RwLock::new(Slot {
    lifecycle: Lifecycle::Constructed,
    engine: None,
});

fn read() -> RwLockReadGuard<'static, Slot> {
    SLOT.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, Slot> {
    SLOT.write().unwrap_or_else(PoisonError::into_inner)
}

/// Builds an engine from `config` and binds it.
///
/// While the icon pack loads, [`lifecycle`] reports
/// [`Lifecycle::Initializing`] and [`engine`] returns `None`. If the
/// install is abandoned before binding, the previous state comes back.
pub async fn install(
    config: LoggerConfig,
    sink: impl Sink + 'static,
    provider: Option<&dyn IconProvider>,
) -> Arc<Engine> {
    {
        let mut slot = write();
        slot.lifecycle = Lifecycle::Initializing;
    }
    log::debug!(target: targets::GLOBAL, "initializing global engine");

    let guard = InitializingGuard;
    let engine = Engine::initialize(config, sink, provider).await;
    let engine = bind(engine);
    drop(guard);
    engine
}

/// Leaves `Initializing` if an install never reaches [`bind`], because its
/// future was dropped or its provider panicked. The previous engine, if
/// any, becomes callable again.
struct InitializingGuard;

impl Drop for InitializingGuard {
    fn drop(&mut self) {
        let mut slot = write();
        if slot.lifecycle != Lifecycle::Initializing {
            return;
        }
        slot.lifecycle = if slot.engine.is_some() {
            Lifecycle::Bound
        } else {
            Lifecycle::Constructed
        };
        log::debug!(
            target: targets::GLOBAL,
            "install abandoned, lifecycle restored to {:?}",
            slot.lifecycle
        );
    }
}

/// Binds a prepared engine, replacing any previous one.
pub fn bind(engine: Engine) -> Arc<Engine> {
    let engine = Arc::new(engine);
    let previous = {
        let mut slot = write();
        slot.lifecycle = Lifecycle::Bound;
        slot.engine.replace(Arc::clone(&engine))
    };
    log::debug!(
        target: targets::GLOBAL,
        "engine bound ({} methods, replaced previous: {})",
        engine.registry().len(),
        previous.is_some()
    );
    engine
}

/// Drops the bound engine and returns to [`Lifecycle::Constructed`].
pub fn unbind() -> Option<Arc<Engine>> {
    let mut slot = write();
    slot.lifecycle = Lifecycle::Constructed;
    slot.engine.take()
}

/// Current lifecycle state.
#[must_use]
pub fn lifecycle() -> Lifecycle {
    read().lifecycle
}

/// The bound engine, if the binding is in [`Lifecycle::Bound`].
#[must_use]
pub fn engine() -> Option<Arc<Engine>> {
    let slot = read();
    match slot.lifecycle {
        Lifecycle::Bound => slot.engine.clone(),
        Lifecycle::Constructed | Lifecycle::Initializing => None,
    }
}

/// Calls method `id` on the bound engine.
pub fn call(id: &str, args: &[LogValue]) -> Result<(), DispatchError> {
    engine().ok_or(DispatchError::NotBound)?.call(id, args)
}

/// Calls method `id` through the bound engine's developer-mode gate.
pub fn dev(id: &str, args: &[LogValue]) -> Result<(), DispatchError> {
    engine().ok_or(DispatchError::NotBound)?.dev().call(id, args)
}

/// Calls method `id` on the bound engine with its prefix suppressed.
pub fn no_prefix(id: &str, args: &[LogValue]) -> Result<(), DispatchError> {
    engine()
        .ok_or(DispatchError::NotBound)?
        .no_prefix()
        .call(id, args)
}

/// Calls a method on the bound engine.
///
/// Dispatch failures (no engine bound, unknown method) are dropped;
/// use [`global::call`](crate::global::call) to observe them.
///
/// ```ignore
/// glyph!(success, "deployed", 3);
/// glyph!(dev, info, "cache warm");
/// glyph!(no_prefix, warn, "bare");
/// ```
#[macro_export]
macro_rules! glyph {
    (dev, $method:ident $(, $arg:expr)* $(,)?) => {{
        let _ = $crate::global::dev(
            stringify!($method),
            &$crate::__private::parts![$($arg),*],
        );
    }};
    (no_prefix, $method:ident $(, $arg:expr)* $(,)?) => {{
        let _ = $crate::global::no_prefix(
            stringify!($method),
            &$crate::__private::parts![$($arg),*],
        );
    }};
    ($method:ident $(, $arg:expr)* $(,)?) => {{
        let _ = $crate::global::call(
            stringify!($method),
            &$crate::__private::parts![$($arg),*],
        );
    }};
}
