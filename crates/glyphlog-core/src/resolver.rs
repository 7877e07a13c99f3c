//! Prefix resolution.
//!
//! Every registered method gets exactly one prefix, computed once from the
//! configuration. The first matching tier wins:
//!
//! 1. `use_prefix = false` empties every prefix
//! 2. an explicit per-method override (an empty string counts)
//! 3. the loaded icon pack, by the method's icon name
//! 4. the bundled default, when defaults are enabled
//! 5. the global fallback string

use std::collections::BTreeMap;

use crate::config::LoggerConfig;
use crate::icons::{IconPack, icon_name};
use crate::logging::targets;
use crate::registry::Registry;

/// Resolved prefix per method identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMap {
    prefixes: BTreeMap<String, String>,
}

impl PrefixMap {
    /// The resolved prefix for `id`, if it is registered.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.prefixes.get(id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(id, prefix)| (id.as_str(), prefix.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

/// The bundled default prefix of a built-in method.
#[must_use]
pub fn builtin_default_prefix(id: &str) -> Option<&'static str> {
    Some(match id {
        "log" => ">",
        "warn" => "⚠",
        "error" => "✗",
        "info" => "ℹ",
        "success" => "✓",
        "check" => "✔",
        "skip" => "⊘",
        "connect" => "◉",
        "disconnect" => "○",
        _ => return None,
    })
}

/// Computes the prefix of every method in `registry`.
///
/// `icons` is the pack that actually loaded; pass `None` when none was
/// requested or loading failed.
#[must_use]
pub fn resolve(config: &LoggerConfig, registry: &Registry, icons: Option<&IconPack>) -> PrefixMap {
    let prefixes: BTreeMap<String, String> = registry
        .ids()
        .map(|id| (id.to_string(), resolve_one(config, icons, id)))
        .collect();

    log::debug!(
        target: targets::RESOLVER,
        "resolved {} prefixes (prefixing {}, icons {})",
        prefixes.len(),
        if config.use_prefix { "on" } else { "off" },
        if icons.is_some() { "loaded" } else { "absent" }
    );

    PrefixMap { prefixes }
}

fn resolve_one(config: &LoggerConfig, icons: Option<&IconPack>, id: &str) -> String {
    if !config.use_prefix {
        return String::new();
    }
    if let Some(prefix) = config.prefix.get(id) {
        return prefix.clone();
    }
    if let Some(icon) = icons.and_then(|pack| pack.get(icon_name(id))) {
        return icon.to_string();
    }
    if config.use_default_prefixes {
        if let Some(prefix) = builtin_default_prefix(id) {
            return prefix.to_string();
        }
    }
    config.default_prefix.clone()
}

/// Settings derived once from a [`LoggerConfig`], plus its prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub use_prefix: bool,
    pub use_default_prefixes: bool,
    pub default_prefix: String,
    pub dev_mode: bool,
    pub prefixes: PrefixMap,
}

impl ResolvedConfig {
    #[must_use]
    pub fn new(config: &LoggerConfig, prefixes: PrefixMap) -> Self {
        Self {
            use_prefix: config.use_prefix,
            use_default_prefixes: config.use_default_prefixes,
            default_prefix: config.default_prefix.clone(),
            dev_mode: config.dev_mode,
            prefixes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom::CustomHandler;
    use crate::registry::BUILTIN_METHODS;

    fn registry_with(custom: &[&str]) -> Registry {
        let mut registry = Registry::with_builtins();
        for id in custom {
            registry.register_custom(*id, CustomHandler::template(""));
        }
        registry
    }

    fn full_icons() -> IconPack {
        crate::icons::EmojiIcons::pack().with("audit", "🛡️")
    }

    #[test]
    fn one_entry_per_registered_method() {
        let registry = registry_with(&["audit"]);
        let map = resolve(&LoggerConfig::new(), &registry, None);
        assert_eq!(map.len(), registry.len());
        assert!(registry.ids().all(|id| map.get(id).is_some()));
    }

    #[test]
    fn defaults_apply_to_builtins() {
        let map = resolve(&LoggerConfig::new(), &Registry::with_builtins(), None);
        assert_eq!(map.get("log"), Some(">"));
        assert_eq!(map.get("warn"), Some("⚠"));
        for (id, _) in BUILTIN_METHODS {
            assert_eq!(map.get(id), builtin_default_prefix(id));
        }
    }

    #[test]
    fn global_disable_empties_everything() {
        let config = LoggerConfig::new()
            .without_prefix()
            .with_prefix("log", "[LOG]")
            .with_default_prefix("*");
        let icons = full_icons();
        let map = resolve(&config, &registry_with(&["audit"]), Some(&icons));
        assert!(map.iter().all(|(_, prefix)| prefix.is_empty()));
    }

    #[test]
    fn override_beats_icons_and_defaults() {
        let config = LoggerConfig::new().with_prefix("log", "[LOG]");
        let icons = full_icons();
        let map = resolve(&config, &Registry::with_builtins(), Some(&icons));
        assert_eq!(map.get("log"), Some("[LOG]"));
    }

    #[test]
    fn explicit_empty_override_is_final() {
        let config = LoggerConfig::new()
            .with_prefix("warn", "")
            .with_default_prefix("*");
        let icons = full_icons();
        let map = resolve(&config, &Registry::with_builtins(), Some(&icons));
        assert_eq!(map.get("warn"), Some(""));
    }

    #[test]
    fn icons_beat_defaults() {
        let icons = full_icons();
        let map = resolve(&LoggerConfig::new(), &registry_with(&["audit"]), Some(&icons));
        assert_eq!(map.get("log"), Some("📌"));
        assert_eq!(map.get("error"), Some("❌"));
        assert_eq!(map.get("audit"), Some("🛡️"));
    }

    #[test]
    fn missing_icon_falls_through_to_defaults() {
        let icons = IconPack::new().with("pin", "#");
        let map = resolve(&LoggerConfig::new(), &Registry::with_builtins(), Some(&icons));
        assert_eq!(map.get("log"), Some("#"));
        assert_eq!(map.get("warn"), Some("⚠"));
    }

    #[test]
    fn fallback_when_defaults_disabled() {
        let config = LoggerConfig::new()
            .without_default_prefixes()
            .with_default_prefix("*");
        let map = resolve(&config, &registry_with(&["audit"]), None);
        assert_eq!(map.get("log"), Some("*"));
        assert_eq!(map.get("audit"), Some("*"));
    }

    #[test]
    fn custom_without_default_gets_fallback() {
        let map = resolve(&LoggerConfig::new(), &registry_with(&["audit"]), None);
        assert_eq!(map.get("audit"), Some(""));
        assert_eq!(map.get("log"), Some(">"));
    }

    #[test]
    fn resolution_is_idempotent() {
        let config = LoggerConfig::new().with_prefix("audit", "A").with_default_prefix("-");
        let registry = registry_with(&["audit", "deploy"]);
        let icons = full_icons();
        assert_eq!(
            resolve(&config, &registry, Some(&icons)),
            resolve(&config, &registry, Some(&icons))
        );
    }

    #[test]
    fn resolved_config_copies_flags() {
        let config = LoggerConfig::new().with_dev_mode(true).with_default_prefix("-");
        let resolved = ResolvedConfig::new(&config, PrefixMap::default());
        assert!(resolved.use_prefix);
        assert!(resolved.dev_mode);
        assert_eq!(resolved.default_prefix, "-");
    }
}
