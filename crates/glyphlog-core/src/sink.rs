//! The ambient sink the engine writes through.

use crate::value::LogValue;

/// Output channel of a [`Sink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Ordinary output
    Plain,
    /// Warnings
    Warning,
    /// Errors
    Error,
    /// Informational output
    Info,
}

impl Channel {
    /// Lowercase name, for display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// The underlying logging facility.
///
/// Every dispatched call ends in exactly one `emit`. Implementations decide
/// how parts are rendered and where they go.
pub trait Sink: Send + Sync {
    /// Writes one call's parts to `channel`.
    fn emit(&self, channel: Channel, parts: &[LogValue]);
}

impl<F> Sink for F
where
    F: Fn(Channel, &[LogValue]) + Send + Sync,
{
    fn emit(&self, channel: Channel, parts: &[LogValue]) {
        self(channel, parts);
    }
}
