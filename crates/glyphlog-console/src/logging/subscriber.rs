//! Tracing subscriber integration.
//!
//! Provides a tracing `Layer` and builder that route events into an engine.

use std::fmt;
use std::sync::Arc;

use glyphlog_core::{Engine, LogValue};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

use super::{EngineHandle, is_routable, route};

/// A tracing layer that forwards events to an engine.
#[derive(Debug, Default)]
pub struct GlyphLayer {
    handle: EngineHandle,
}

impl GlyphLayer {
    /// Layer writing to the globally bound engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer writing to `engine`.
    #[must_use]
    pub fn with_engine(engine: Arc<Engine>) -> Self {
        Self {
            handle: EngineHandle::Fixed(engine),
        }
    }
}

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl FieldCollector {
    fn record_value(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            if self.message.is_none() {
                self.message = Some(value);
            }
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }

    fn into_parts(self, fallback: &str) -> Vec<LogValue> {
        let message = self.message.unwrap_or_else(|| fallback.to_string());
        std::iter::once(LogValue::from(message))
            .chain(
                self.fields
                    .into_iter()
                    .map(|(key, value)| LogValue::from(format!("{key}={value}"))),
            )
            .collect()
    }
}

impl Visit for FieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_value(field, value.to_string());
    }
}

fn log_level(level: tracing::Level) -> log::Level {
    match level {
        tracing::Level::ERROR => log::Level::Error,
        tracing::Level::WARN => log::Level::Warn,
        tracing::Level::INFO => log::Level::Info,
        tracing::Level::DEBUG => log::Level::Debug,
        _ => log::Level::Trace,
    }
}

impl<S> Layer<S> for GlyphLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !is_routable(metadata.target()) {
            return;
        }
        let Some(engine) = self.handle.get() else {
            return;
        };

        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<String> = scope.from_root().map(|span| span.name().to_string()).collect();
            if !spans.is_empty() {
                collector
                    .fields
                    .push(("span".to_string(), spans.join("::")));
            }
        }

        let parts = collector.into_parts(metadata.name());
        route(&engine, log_level(*metadata.level()), &parts);
    }
}

/// Builder for a tracing subscriber that feeds an engine.
#[derive(Debug)]
pub struct GlyphSubscriberBuilder {
    handle: EngineHandle,
    level_filter: LevelFilter,
}

impl Default for GlyphSubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphSubscriberBuilder {
    /// Create a new builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handle: EngineHandle::Global,
            level_filter: LevelFilter::INFO,
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn with_level_filter(mut self, filter: LevelFilter) -> Self {
        self.level_filter = filter;
        self
    }

    /// Write to `engine` instead of the globally bound one.
    #[must_use]
    pub fn with_engine(mut self, engine: Arc<Engine>) -> Self {
        self.handle = EngineHandle::Fixed(engine);
        self
    }

    /// Build the subscriber without installing it.
    #[must_use]
    pub fn build(self) -> impl Subscriber + Send + Sync {
        tracing_subscriber::registry()
            .with(self.level_filter)
            .with(GlyphLayer {
                handle: self.handle,
            })
    }

    /// Build and install as the global subscriber.
    pub fn init(self) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
        let subscriber = self.build();
        tracing::subscriber::set_global_default(subscriber)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphlog_core::testing::RecordingSink;
    use glyphlog_core::{Channel, LoggerConfig};

    fn engine(dev_mode: bool) -> (Arc<Engine>, RecordingSink) {
        let sink = RecordingSink::new();
        let config = LoggerConfig::new().with_dev_mode(dev_mode);
        (Arc::new(Engine::new(config, sink.clone())), sink)
    }

    #[test]
    fn test_builder_defaults() {
        let builder = GlyphSubscriberBuilder::default();
        assert_eq!(builder.level_filter, LevelFilter::INFO);
        assert!(matches!(builder.handle, EngineHandle::Global));
    }

    #[test]
    fn test_event_routes_with_fields() {
        let (engine, sink) = engine(false);
        let subscriber = GlyphSubscriberBuilder::new().with_engine(engine).build();

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(code = 42, "request failed");
        });

        assert_eq!(sink.on(Channel::Error).len(), 1);
        assert_eq!(sink.texts(), vec![vec!["✗ ", "request failed", "code=42"]]);
    }

    #[test]
    fn test_span_names_are_collected() {
        let (engine, sink) = engine(false);
        let subscriber = GlyphSubscriberBuilder::new().with_engine(engine).build();

        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("handshake");
            let _guard = span.enter();
            tracing::info!("connected");
        });

        assert_eq!(sink.texts(), vec![vec!["ℹ ", "connected", "span=handshake"]]);
    }

    #[test]
    fn test_level_filter_applies() {
        let (engine, sink) = engine(true);
        let subscriber = GlyphSubscriberBuilder::new().with_engine(engine).build();

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("filtered");
        });

        assert!(sink.is_empty());
    }

    #[test]
    fn test_debug_goes_through_dev_gate() {
        let (engine, sink) = engine(true);
        let subscriber = GlyphSubscriberBuilder::new()
            .with_engine(engine)
            .with_level_filter(LevelFilter::TRACE)
            .build();

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("visible in dev");
        });

        assert_eq!(sink.texts(), vec![vec!["> ", "visible in dev"]]);
    }

    #[test]
    fn test_internal_target_is_skipped() {
        let (engine, sink) = engine(false);
        let subscriber = GlyphSubscriberBuilder::new().with_engine(engine).build();

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "glyphlog::engine", "loop");
            tracing::warn!(target: "glyphlog_app", "kept");
        });

        assert_eq!(sink.texts(), vec![vec!["⚠ ", "kept"]]);
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(log_level(tracing::Level::WARN), log::Level::Warn);
        assert_eq!(log_level(tracing::Level::TRACE), log::Level::Trace);
    }
}
