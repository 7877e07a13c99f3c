//! Internal diagnostics for glyphlog.
//!
//! The engine reports what it does through the standard [`log`] facade at
//! debug and trace level. These records are about glyphlog itself and are
//! separate from the output the engine produces through its [`Sink`].
//!
//! # Log Targets
//!
//! - `glyphlog`: Root target for all glyphlog diagnostics
//! - `glyphlog::registry`: Method registration and collisions
//! - `glyphlog::resolver`: Prefix resolution
//! - `glyphlog::icons`: Icon pack loading
//! - `glyphlog::engine`: Engine construction
//! - `glyphlog::global`: Global binding
//!
//! Bridges that feed the `log` facade back into an engine must skip every
//! record whose target is under `glyphlog` (see [`is_internal`]).
//!
//! Example filter: `RUST_LOG=glyphlog::resolver=debug`
//!
//! [`Sink`]: crate::Sink

/// Log targets used by glyphlog components.
pub mod targets {
    /// Root target for all glyphlog logs.
    pub const GLYPHLOG: &str = "glyphlog";

    /// Method registration.
    pub const REGISTRY: &str = "glyphlog::registry";

    /// Prefix resolution.
    pub const RESOLVER: &str = "glyphlog::resolver";

    /// Icon pack loading.
    pub const ICONS: &str = "glyphlog::icons";

    /// Engine construction and warnings.
    pub const ENGINE: &str = "glyphlog::engine";

    /// Global binding.
    pub const GLOBAL: &str = "glyphlog::global";
}

/// Returns whether a record target belongs to glyphlog's own diagnostics.
#[inline]
#[must_use]
pub fn is_internal(target: &str) -> bool {
    target
        .strip_prefix(targets::GLYPHLOG)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_targets_are_hierarchical() {
        assert!(targets::REGISTRY.starts_with(targets::GLYPHLOG));
        assert!(targets::RESOLVER.starts_with(targets::GLYPHLOG));
        assert!(targets::ICONS.starts_with(targets::GLYPHLOG));
        assert!(targets::ENGINE.starts_with(targets::GLYPHLOG));
        assert!(targets::GLOBAL.starts_with(targets::GLYPHLOG));
    }

    #[test]
    fn internal_targets() {
        assert!(is_internal("glyphlog"));
        assert!(is_internal(targets::RESOLVER));
        assert!(!is_internal("glyphlogger"));
        assert!(!is_internal("my_app::server"));
    }

    #[test]
    fn sibling_crates_are_not_internal() {
        assert!(!is_internal("glyphlog_app"));
        assert!(!is_internal("glyphlog_console::logging::subscriber::tests"));
    }
}
