//! Styled/plain output detection
//!
//! Determines whether console output should carry ANSI styling.

/// Display context representing the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayContext {
    /// Plain text, no escape codes
    Plain,
    /// Colored output
    #[default]
    Styled,
}

impl DisplayContext {
    /// Auto-detect the display context from environment
    #[must_use]
    pub fn detect() -> Self {
        if should_enable_color() {
            Self::Styled
        } else {
            Self::Plain
        }
    }

    /// Check if output should be styled
    #[must_use]
    pub fn is_styled(&self) -> bool {
        matches!(self, Self::Styled)
    }

    /// Check if output should be plain
    #[must_use]
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Plain)
    }
}

/// Determine if the environment asks for plain output
#[must_use]
pub fn is_plain_context() -> bool {
    std::env::var("NO_COLOR").is_ok()
        || std::env::var("GLYPHLOG_PLAIN").is_ok()
        // CI logs are read back as text
        || std::env::var("CI").is_ok()
}

/// Determine if colored output should be enabled
#[must_use]
pub fn should_enable_color() -> bool {
    // Explicit enable always wins
    if std::env::var("GLYPHLOG_FORCE_COLOR").is_ok() {
        return true;
    }

    if is_plain_context() {
        return false;
    }

    ::console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_context_default_is_styled() {
        assert!(DisplayContext::default().is_styled());
    }

    #[test]
    fn test_display_context_predicates() {
        assert!(DisplayContext::Plain.is_plain());
        assert!(!DisplayContext::Plain.is_styled());
        assert!(DisplayContext::Styled.is_styled());
        assert!(!DisplayContext::Styled.is_plain());
    }

    #[test]
    fn test_display_context_equality() {
        assert_eq!(DisplayContext::Plain, DisplayContext::Plain);
        assert_ne!(DisplayContext::Plain, DisplayContext::Styled);
    }
}
