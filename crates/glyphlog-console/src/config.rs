//! Configuration for the terminal sink.
//!
//! `ConsoleConfig` controls how [`ConsoleSink`](crate::ConsoleSink) renders
//! and routes lines, supporting both programmatic and environment
//! variable-based configuration.

use std::env;

use crate::detection::DisplayContext;

/// Configuration for console output
#[derive(Debug, Clone, Default)]
pub struct ConsoleConfig {
    /// Override display context (None = auto-detect)
    pub context: Option<DisplayContext>,
    /// Force color output even in non-TTY
    pub force_color: Option<bool>,
    /// Force plain text mode (no styling)
    pub force_plain: bool,
    /// Prefix each line with `[HH:MM:SS]`
    pub timestamps: bool,
    /// Send every channel to stderr, keeping stdout free
    pub all_to_stderr: bool,
}

impl ConsoleConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables
    ///
    /// # Environment Variables
    ///
    /// | Variable | Values | Description |
    /// |----------|--------|-------------|
    /// | `GLYPHLOG_FORCE_COLOR` | (set) | Force styled output |
    /// | `GLYPHLOG_PLAIN` | (set) | Force plain output |
    /// | `NO_COLOR` | (set) | Disable colors (standard) |
    /// | `GLYPHLOG_TIMESTAMPS` | 0/1 | Show timestamps |
    /// | `GLYPHLOG_STDERR` | 0/1 | Route everything to stderr |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if env::var("GLYPHLOG_FORCE_COLOR").is_ok() {
            config.force_color = Some(true);
        }
        if env::var("GLYPHLOG_PLAIN").is_ok() || env::var("NO_COLOR").is_ok() {
            config.force_plain = true;
        }
        if env::var("GLYPHLOG_TIMESTAMPS")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
        {
            config.timestamps = true;
        }
        if env::var("GLYPHLOG_STDERR")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
        {
            config.all_to_stderr = true;
        }

        config
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    /// Force color output
    #[must_use]
    pub fn force_color(mut self, force: bool) -> Self {
        self.force_color = Some(force);
        self
    }

    /// Enable plain text mode (no styling)
    #[must_use]
    pub fn plain_mode(mut self) -> Self {
        self.force_plain = true;
        self
    }

    /// Show timestamps
    #[must_use]
    pub fn with_timestamps(mut self, show: bool) -> Self {
        self.timestamps = show;
        self
    }

    /// Route every channel to stderr
    #[must_use]
    pub fn all_to_stderr(mut self) -> Self {
        self.all_to_stderr = true;
        self
    }

    /// Set display context explicitly
    #[must_use]
    pub fn with_context(mut self, context: DisplayContext) -> Self {
        self.context = Some(context);
        self
    }

    // ─────────────────────────────────────────────────
    // Resolution Methods
    // ─────────────────────────────────────────────────

    /// Resolve the display context based on config and environment
    #[must_use]
    pub fn resolve_context(&self) -> DisplayContext {
        if self.force_plain {
            return DisplayContext::Plain;
        }
        if let Some(true) = self.force_color {
            return DisplayContext::Styled;
        }
        self.context.unwrap_or_else(DisplayContext::detect)
    }

    /// Check if styled output should be used based on resolved context
    #[must_use]
    pub fn should_style(&self) -> bool {
        self.resolve_context().is_styled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::new();
        assert!(!config.force_plain);
        assert!(!config.timestamps);
        assert!(!config.all_to_stderr);
        assert_eq!(config.force_color, None);
    }

    #[test]
    fn test_plain_mode() {
        let config = ConsoleConfig::new().plain_mode().force_color(true);
        assert_eq!(config.resolve_context(), DisplayContext::Plain);
        assert!(!config.should_style());
    }

    #[test]
    fn test_force_color() {
        let config = ConsoleConfig::new().force_color(true);
        assert_eq!(config.resolve_context(), DisplayContext::Styled);
    }

    #[test]
    fn test_explicit_context() {
        let config = ConsoleConfig::new().with_context(DisplayContext::Plain);
        assert_eq!(config.resolve_context(), DisplayContext::Plain);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ConsoleConfig::new().with_timestamps(true).all_to_stderr();
        assert!(config.timestamps);
        assert!(config.all_to_stderr);
    }
}
