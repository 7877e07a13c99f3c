//! Terminal sink

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Mutex;

use ::console::style;
use glyphlog_core::{Channel, LogValue, Sink};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::config::ConsoleConfig;

type Writer = Mutex<Box<dyn Write + Send>>;

/// Sink that writes one line per emission to stdout/stderr
pub struct ConsoleSink {
    out: Writer,
    err: Writer,
    styled: bool,
    timestamps: bool,
    all_to_stderr: bool,
}

impl ConsoleSink {
    /// Create with automatic detection
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&ConsoleConfig::from_env())
    }

    /// Create with explicit styling on or off
    #[must_use]
    pub fn with_enabled(styled: bool) -> Self {
        Self::with_writers(io::stdout(), io::stderr(), styled)
    }

    /// Create from a [`ConsoleConfig`]
    #[must_use]
    pub fn from_config(config: &ConsoleConfig) -> Self {
        let mut sink = Self::with_enabled(config.should_style());
        sink.timestamps = config.timestamps;
        sink.all_to_stderr = config.all_to_stderr;
        sink
    }

    /// Create with custom writers (for testing)
    #[must_use]
    pub fn with_writers<O, E>(out: O, err: E, styled: bool) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            out: Mutex::new(Box::new(out)),
            err: Mutex::new(Box::new(err)),
            styled,
            timestamps: false,
            all_to_stderr: false,
        }
    }

    /// Show `[HH:MM:SS]` before each line
    #[must_use]
    pub fn with_timestamps(mut self, show: bool) -> Self {
        self.timestamps = show;
        self
    }

    /// Route every channel to stderr
    #[must_use]
    pub fn all_to_stderr(mut self, enabled: bool) -> Self {
        self.all_to_stderr = enabled;
        self
    }

    // ─────────────────────────────────────────────────
    // State Queries
    // ─────────────────────────────────────────────────

    /// Check if styled output is enabled
    #[must_use]
    pub fn is_styled(&self) -> bool {
        self.styled
    }

    /// Whether `channel` is written to stderr
    #[must_use]
    pub fn uses_stderr(&self, channel: Channel) -> bool {
        self.all_to_stderr || matches!(channel, Channel::Warning | Channel::Error)
    }

    // ─────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────

    /// Renders one emission as it will be written, without the newline.
    #[must_use]
    pub fn render(&self, channel: Channel, parts: &[LogValue]) -> String {
        let body = join_parts(parts);
        let body = if self.styled {
            paint(channel, body)
        } else {
            body
        };

        match self.timestamp() {
            Some(ts) if self.styled => {
                let ts = style(format!("[{ts}]")).dim().force_styling(true);
                format!("{ts} {body}")
            }
            Some(ts) => format!("[{ts}] {body}"),
            None => body,
        }
    }

    fn timestamp(&self) -> Option<String> {
        if !self.timestamps {
            return None;
        }
        OffsetDateTime::now_utc()
            .format(format_description!("[hour]:[minute]:[second]"))
            .ok()
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("styled", &self.styled)
            .field("timestamps", &self.timestamps)
            .field("all_to_stderr", &self.all_to_stderr)
            .finish_non_exhaustive()
    }
}

impl Sink for ConsoleSink {
    fn emit(&self, channel: Channel, parts: &[LogValue]) {
        let line = self.render(channel, parts);
        let writer = if self.uses_stderr(channel) {
            &self.err
        } else {
            &self.out
        };

        // A poisoned writer only means another thread panicked mid-line.
        let mut writer = match writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(writer, "{line}");
        let _ = writer.flush();
    }
}

// ─────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────

/// Joins parts with single spaces.
///
/// No separator follows a part that already ends in whitespace, so a
/// `"> "` prefix part renders as `> hi`, not `>  hi`.
#[must_use]
pub fn join_parts(parts: &[LogValue]) -> String {
    let mut line = String::new();
    for part in parts {
        if !line.is_empty() && !line.ends_with(char::is_whitespace) {
            line.push(' ');
        }
        let _ = write!(line, "{part}");
    }
    line
}

fn paint(channel: Channel, body: String) -> String {
    let styled = match channel {
        Channel::Plain => return body,
        Channel::Warning => style(body).yellow(),
        Channel::Error => style(body).red(),
        Channel::Info => style(body).cyan(),
    };
    styled.force_styling(true).to_string()
}
