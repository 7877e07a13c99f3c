//! Dispatch surfaces.
//!
//! A [`Surface`] is a view of an [`Engine`] that maps every registered
//! method identifier to a callable. Surfaces are cheap `Copy` values; the
//! gated and unprefixed variants are derived from the same engine rather
//! than kept as separate registries, and they compose in either order:
//!
//! ```ignore
//! engine.dev().no_prefix().info(&parts!["raw dev output"]);
//! engine.no_prefix().dev().info(&parts!["same thing"]);
//! ```
//!
//! Prefix suppression travels with the surface as a [`Prefixing`] value
//! instead of a flag on the engine, so a suppressed call can never leak
//! into the next one, even across threads or when a handler panics.

use crate::engine::Engine;
use crate::error::DispatchError;
use crate::logging::targets;
use crate::registry::MethodKind;
use crate::value::LogValue;

/// Whether calls reach the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Calls are dispatched.
    Live,
    /// Calls do nothing.
    Inert,
}

/// Which prefix a call carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefixing {
    /// The method's resolved prefix.
    Resolved,
    /// No prefix for this call.
    Suppressed,
}

/// A callable view of an engine.
#[derive(Debug, Clone, Copy)]
pub struct Surface<'e> {
    engine: &'e Engine,
    gate: Gate,
    prefixing: Prefixing,
}

impl<'e> Surface<'e> {
    pub(crate) fn new(engine: &'e Engine) -> Self {
        Self {
            engine,
            gate: Gate::Live,
            prefixing: Prefixing::Resolved,
        }
    }

    /// Developer-mode gate.
    ///
    /// Evaluated on every call: inert unless the engine is in developer
    /// mode, otherwise identical to `self`.
    #[must_use]
    pub fn dev(&self) -> Self {
        let gate = if self.engine.is_dev_mode() {
            self.gate
        } else {
            Gate::Inert
        };
        Self { gate, ..*self }
    }

    /// Same surface, with the prefix suppressed for each call made on it.
    #[must_use]
    pub fn no_prefix(&self) -> Self {
        Self {
            prefixing: Prefixing::Suppressed,
            ..*self
        }
    }

    #[must_use]
    pub fn gate(&self) -> Gate {
        self.gate
    }

    #[must_use]
    pub fn prefixing(&self) -> Prefixing {
        self.prefixing
    }

    #[must_use]
    pub fn engine(&self) -> &'e Engine {
        self.engine
    }

    /// Every method identifier this surface answers to.
    pub fn ids(&self) -> impl Iterator<Item = &'e str> + use<'e> {
        self.engine.registry().ids()
    }

    /// Looks up a method. `None` means it was never installed.
    #[must_use]
    pub fn method(&self, id: &str) -> Option<Method<'e>> {
        let (id, kind) = self.engine.registry().entry(id)?;
        Some(Method {
            surface: *self,
            id,
            kind,
        })
    }
}

impl Dispatch for Surface<'_> {
    fn call(&self, id: &str, args: &[LogValue]) -> Result<(), DispatchError> {
        match self.gate {
            Gate::Live => self.engine.dispatch(id, args, self.prefixing),
            Gate::Inert if self.engine.registry().contains(id) => Ok(()),
            Gate::Inert => Err(DispatchError::UnknownMethod(id.to_string())),
        }
    }
}

/// One method bound to a surface.
#[derive(Debug, Clone, Copy)]
pub struct Method<'e> {
    surface: Surface<'e>,
    id: &'e str,
    kind: &'e MethodKind,
}

impl<'e> Method<'e> {
    #[must_use]
    pub fn id(&self) -> &'e str {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> &'e MethodKind {
        self.kind
    }

    /// Invokes the method with `args`.
    pub fn call(&self, args: &[LogValue]) {
        if self.surface.gate == Gate::Live {
            self.surface
                .engine
                .dispatch_kind(self.id, self.kind, args, self.surface.prefixing);
        }
    }
}

/// Calling convention shared by engines and surfaces.
///
/// `call` dispatches any registered identifier. The named methods are
/// shorthands for the built-ins; if a custom method replaced a built-in,
/// the shorthand runs the replacement.
pub trait Dispatch {
    fn call(&self, id: &str, args: &[LogValue]) -> Result<(), DispatchError>;

    fn log(&self, args: &[LogValue]) {
        call_builtin(self, "log", args);
    }

    fn warn(&self, args: &[LogValue]) {
        call_builtin(self, "warn", args);
    }

    fn error(&self, args: &[LogValue]) {
        call_builtin(self, "error", args);
    }

    fn info(&self, args: &[LogValue]) {
        call_builtin(self, "info", args);
    }

    fn success(&self, args: &[LogValue]) {
        call_builtin(self, "success", args);
    }

    fn check(&self, args: &[LogValue]) {
        call_builtin(self, "check", args);
    }

    fn skip(&self, args: &[LogValue]) {
        call_builtin(self, "skip", args);
    }

    fn connect(&self, args: &[LogValue]) {
        call_builtin(self, "connect", args);
    }

    fn disconnect(&self, args: &[LogValue]) {
        call_builtin(self, "disconnect", args);
    }
}

// Built-in identifiers are always registered, so this only fails if a
// caller-supplied `Dispatch` impl has a different method set.
fn call_builtin<D: Dispatch + ?Sized>(target: &D, id: &str, args: &[LogValue]) {
    if let Err(err) = target.call(id, args) {
        log::trace!(target: targets::ENGINE, "{err}");
    }
}
