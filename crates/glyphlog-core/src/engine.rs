//! The prefix-resolution and dispatch engine.

use crate::config::{CustomMethodDefinition, LoggerConfig};
use crate::error::{DispatchError, Warning};
use crate::icons::{IconPack, IconProvider};
use crate::logging::targets;
use crate::registry::{MethodKind, Registry};
use crate::resolver::{PrefixMap, ResolvedConfig, resolve};
use crate::sink::{Channel, Sink};
use crate::surface::{Dispatch, Prefixing, Surface};
use crate::value::LogValue;

/// Text placed before warnings the engine writes to its sink.
pub const WARNING_TAG: &str = "[glyphlog]";

/// A configured logging engine.
///
/// The registry and prefixes are fixed at construction. Calls go through a
/// [`Surface`]: [`Engine::surface`] for normal output, [`Engine::dev`] for
/// output that only appears in developer mode, and [`Engine::no_prefix`]
/// for a single unprefixed call.
pub struct Engine {
    registry: Registry,
    resolved: ResolvedConfig,
    sink: Box<dyn Sink>,
    warnings: Vec<Warning>,
}

impl Engine {
    /// Builds an engine without an icon provider.
    ///
    /// If the config requests an icon pack, a warning is emitted and the
    /// icon tier is skipped.
    pub fn new(config: LoggerConfig, sink: impl Sink + 'static) -> Self {
        let mut warnings = Vec::new();
        if config.use_icon_pack {
            warnings.push(Warning::IconPackNotProvided);
        }
        Self::assemble(&config, Box::new(sink), None, warnings)
    }

    /// Builds an engine, first loading the icon pack when one is requested.
    ///
    /// A failed load is reported as a warning and resolution continues as
    /// if no pack had been requested.
    pub async fn initialize(
        config: LoggerConfig,
        sink: impl Sink + 'static,
        provider: Option<&dyn IconProvider>,
    ) -> Self {
        let mut warnings = Vec::new();
        let icons = if config.use_icon_pack {
            load_icons(provider, &mut warnings).await
        } else {
            None
        };
        Self::assemble(&config, Box::new(sink), icons.as_ref(), warnings)
    }

    /// Blocking form of [`Engine::initialize`].
    ///
    /// Fails when called from inside a tokio runtime; `.await`
    /// [`Engine::initialize`] there instead.
    pub fn initialize_blocking(
        config: LoggerConfig,
        sink: impl Sink + 'static,
        provider: Option<&dyn IconProvider>,
    ) -> std::io::Result<Self> {
        crate::runtime::block_on(Self::initialize(config, sink, provider))
    }

    fn assemble(
        config: &LoggerConfig,
        sink: Box<dyn Sink>,
        icons: Option<&IconPack>,
        mut warnings: Vec<Warning>,
    ) -> Self {
        let registry = build_registry(&config.custom_methods, &mut warnings);
        let prefixes = resolve(config, &registry, icons);

        for warning in &warnings {
            log::warn!(target: targets::ENGINE, "{warning}");
            sink.emit(
                Channel::Warning,
                &[LogValue::Text(format!("{WARNING_TAG} {warning}"))],
            );
        }

        log::debug!(
            target: targets::ENGINE,
            "engine ready with {} methods, dev mode {}",
            registry.len(),
            config.dev_mode
        );

        Self {
            registry,
            resolved: ResolvedConfig::new(config, prefixes),
            sink,
            warnings,
        }
    }

    // ─────────────────────────────────────────────────
    // Surfaces
    // ─────────────────────────────────────────────────

    /// The normal dispatch surface.
    #[must_use]
    pub fn surface(&self) -> Surface<'_> {
        Surface::new(self)
    }

    /// A surface that is live in developer mode and inert otherwise.
    #[must_use]
    pub fn dev(&self) -> Surface<'_> {
        self.surface().dev()
    }

    /// A surface whose calls carry no prefix.
    #[must_use]
    pub fn no_prefix(&self) -> Surface<'_> {
        self.surface().no_prefix()
    }

    // ─────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn resolved(&self) -> &ResolvedConfig {
        &self.resolved
    }

    #[must_use]
    pub fn prefixes(&self) -> &PrefixMap {
        &self.resolved.prefixes
    }

    #[must_use]
    pub fn is_dev_mode(&self) -> bool {
        self.resolved.dev_mode
    }

    /// Warnings raised during construction, in emission order.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    // ─────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────

    pub(crate) fn dispatch(
        &self,
        id: &str,
        args: &[LogValue],
        prefixing: Prefixing,
    ) -> Result<(), DispatchError> {
        let (id, kind) = self
            .registry
            .entry(id)
            .ok_or_else(|| DispatchError::UnknownMethod(id.to_string()))?;
        self.dispatch_kind(id, kind, args, prefixing);
        Ok(())
    }

    pub(crate) fn dispatch_kind(
        &self,
        id: &str,
        kind: &MethodKind,
        args: &[LogValue],
        prefixing: Prefixing,
    ) {
        let prefix = match prefixing {
            Prefixing::Suppressed => "",
            Prefixing::Resolved => self.resolved.prefixes.get(id).unwrap_or_default(),
        };

        match kind {
            MethodKind::Builtin(channel) => self.emit(*channel, prefix, args.to_vec()),
            MethodKind::Custom(handler) => self.emit(Channel::Plain, prefix, handler.invoke(args)),
        }
    }

    fn emit(&self, channel: Channel, prefix: &str, parts: Vec<LogValue>) {
        if prefix.is_empty() {
            self.sink.emit(channel, &parts);
            return;
        }

        let mut combined = Vec::with_capacity(parts.len() + 1);
        combined.push(LogValue::Text(format!("{prefix} ")));
        combined.extend(parts);
        self.sink.emit(channel, &combined);
    }
}

impl Dispatch for Engine {
    fn call(&self, id: &str, args: &[LogValue]) -> Result<(), DispatchError> {
        self.surface().call(id, args)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("registry", &self.registry)
            .field("resolved", &self.resolved)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

async fn load_icons(
    provider: Option<&dyn IconProvider>,
    warnings: &mut Vec<Warning>,
) -> Option<IconPack> {
    let Some(provider) = provider else {
        warnings.push(Warning::IconPackNotProvided);
        return None;
    };

    match provider.load().await {
        Ok(pack) => {
            log::debug!(target: targets::ICONS, "icon pack loaded with {} icons", pack.len());
            Some(pack)
        }
        Err(err) => {
            warnings.push(Warning::IconPackUnavailable {
                reason: err.to_string(),
            });
            None
        }
    }
}

fn build_registry(custom: &[CustomMethodDefinition], warnings: &mut Vec<Warning>) -> Registry {
    let mut registry = Registry::with_builtins();

    for definition in custom {
        let Some(handler) = &definition.handler else {
            warnings.push(Warning::HandlerNotCallable {
                id: definition.id.clone(),
            });
            continue;
        };

        if let Some(previous) = registry.register_custom(definition.id.clone(), handler.clone()) {
            warnings.push(Warning::MethodCollision {
                id: definition.id.clone(),
                previous,
            });
        }
    }

    registry
}
