//! Raw engine configuration.
//!
//! `LoggerConfig` is consumed once when an engine is built. It can be
//! assembled programmatically, from environment variables, or from a TOML
//! file.

use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use serde::Deserialize;

use crate::custom::CustomHandler;
use crate::error::ConfigError;

/// A custom method declaration.
///
/// `handler` is `None` when the declaration has nothing callable behind it
/// (for example a non-string entry in a config file). Such methods are
/// reported and skipped at engine construction.
#[derive(Debug, Clone)]
pub struct CustomMethodDefinition {
    pub id: String,
    pub handler: Option<CustomHandler>,
}

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Master switch; when false every prefix is empty
    pub use_prefix: bool,
    /// Use the bundled per-method default prefixes
    pub use_default_prefixes: bool,
    /// Fallback prefix for methods nothing else matches
    pub default_prefix: String,
    /// Per-method overrides, used verbatim (an empty string is an override)
    pub prefix: BTreeMap<String, String>,
    /// Consult an icon provider during initialization
    pub use_icon_pack: bool,
    /// Whether the `dev()` surface is live
    pub dev_mode: bool,
    /// Custom methods in declaration order; later entries win
    pub custom_methods: Vec<CustomMethodDefinition>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            use_prefix: true,
            use_default_prefixes: true,
            default_prefix: String::new(),
            prefix: BTreeMap::new(),
            use_icon_pack: false,
            dev_mode: dev_mode_from_env(),
            custom_methods: Vec::new(),
        }
    }
}

/// Default developer-mode flag.
///
/// `GLYPHLOG_ENV`, then `APP_ENV`: `development` or `dev` means true, any
/// other value false. With neither set, debug builds are in dev mode.
#[must_use]
pub fn dev_mode_from_env() -> bool {
    env::var("GLYPHLOG_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .map(|value| matches!(value.to_lowercase().as_str(), "development" | "dev"))
        .unwrap_or(cfg!(debug_assertions))
}

fn env_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl LoggerConfig {
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
    /// | `GLYPHLOG_PREFIX` | 0/1 | Master prefix switch |
    /// | `GLYPHLOG_DEFAULT_PREFIXES` | 0/1 | Bundled default prefixes |
    /// | `GLYPHLOG_DEFAULT_PREFIX` | string | Fallback prefix |
    /// | `GLYPHLOG_ICONS` | 0/1 | Use an icon pack |
    /// | `GLYPHLOG_DEV` | 0/1 | Developer mode |
    /// | `GLYPHLOG_ENV`, `APP_ENV` | development/... | Developer mode default |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(flag) = env_flag("GLYPHLOG_PREFIX") {
            config.use_prefix = flag;
        }
        if let Some(flag) = env_flag("GLYPHLOG_DEFAULT_PREFIXES") {
            config.use_default_prefixes = flag;
        }
        if let Ok(fallback) = env::var("GLYPHLOG_DEFAULT_PREFIX") {
            config.default_prefix = fallback;
        }
        if let Some(flag) = env_flag("GLYPHLOG_ICONS") {
            config.use_icon_pack = flag;
        }
        if let Some(flag) = env_flag("GLYPHLOG_DEV") {
            config.dev_mode = flag;
        }

        config
    }

    /// Parse a TOML config document.
    ///
    /// ```toml
    /// use_prefix = true
    /// default_prefix = "-"
    /// dev_mode = false
    ///
    /// [prefix]
    /// log = "[LOG]"
    ///
    /// [custom_methods]
    /// audit = "User {0} did {1}"
    /// ```
    ///
    /// Prefix values are opaque: non-string values are used in their TOML
    /// text form. Custom method values are format templates (see
    /// [`CustomHandler::template`]); anything other than a string is
    /// declared without a handler.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        Ok(file.into_config())
    }

    /// Read and parse a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    /// Disable every prefix
    #[must_use]
    pub fn without_prefix(mut self) -> Self {
        self.use_prefix = false;
        self
    }

    /// Disable the bundled default prefixes
    #[must_use]
    pub fn without_default_prefixes(mut self) -> Self {
        self.use_default_prefixes = false;
        self
    }

    /// Set the fallback prefix
    #[must_use]
    pub fn with_default_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.default_prefix = prefix.into();
        self
    }

    /// Override the prefix of one method
    #[must_use]
    pub fn with_prefix(mut self, id: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.prefix.insert(id.into(), prefix.into());
        self
    }

    /// Request an icon pack
    #[must_use]
    pub fn with_icon_pack(mut self, enabled: bool) -> Self {
        self.use_icon_pack = enabled;
        self
    }

    /// Set developer mode
    #[must_use]
    pub fn with_dev_mode(mut self, enabled: bool) -> Self {
        self.dev_mode = enabled;
        self
    }

    /// Declare a custom method
    #[must_use]
    pub fn with_custom_method(mut self, id: impl Into<String>, handler: CustomHandler) -> Self {
        self.custom_methods.push(CustomMethodDefinition {
            id: id.into(),
            handler: Some(handler),
        });
        self
    }

    /// Declare a custom method backed by a format template
    #[must_use]
    pub fn with_custom_template(self, id: impl Into<String>, template: impl Into<String>) -> Self {
        self.with_custom_method(id, CustomHandler::template(template))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    use_prefix: Option<bool>,
    use_default_prefixes: Option<bool>,
    default_prefix: Option<String>,
    use_icon_pack: Option<bool>,
    dev_mode: Option<bool>,
    prefix: BTreeMap<String, toml::Value>,
    custom_methods: BTreeMap<String, toml::Value>,
}

impl ConfigFile {
    fn into_config(self) -> LoggerConfig {
        let mut config = LoggerConfig::default();

        if let Some(flag) = self.use_prefix {
            config.use_prefix = flag;
        }
        if let Some(flag) = self.use_default_prefixes {
            config.use_default_prefixes = flag;
        }
        if let Some(fallback) = self.default_prefix {
            config.default_prefix = fallback;
        }
        if let Some(flag) = self.use_icon_pack {
            config.use_icon_pack = flag;
        }
        if let Some(flag) = self.dev_mode {
            config.dev_mode = flag;
        }

        config.prefix = self
            .prefix
            .into_iter()
            .map(|(id, value)| {
                let text = match value {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                (id, text)
            })
            .collect();

        config.custom_methods = self
            .custom_methods
            .into_iter()
            .map(|(id, value)| CustomMethodDefinition {
                id,
                handler: match value {
                    toml::Value::String(template) => Some(CustomHandler::template(template)),
                    _ => None,
                },
            })
            .collect();

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::new();
        assert!(config.use_prefix);
        assert!(config.use_default_prefixes);
        assert!(config.default_prefix.is_empty());
        assert!(config.prefix.is_empty());
        assert!(!config.use_icon_pack);
        assert!(config.custom_methods.is_empty());
    }

    #[test]
    fn test_builder_pattern() {
        let config = LoggerConfig::new()
            .without_default_prefixes()
            .with_default_prefix("*")
            .with_prefix("log", "[LOG]")
            .with_icon_pack(true)
            .with_dev_mode(false)
            .with_custom_template("audit", "{0}");

        assert!(!config.use_default_prefixes);
        assert_eq!(config.default_prefix, "*");
        assert_eq!(config.prefix.get("log").map(String::as_str), Some("[LOG]"));
        assert!(config.use_icon_pack);
        assert!(!config.dev_mode);
        assert_eq!(config.custom_methods.len(), 1);
        assert_eq!(config.custom_methods[0].id, "audit");
    }

    #[test]
    fn test_without_prefix() {
        assert!(!LoggerConfig::new().without_prefix().use_prefix);
    }

    #[test]
    fn test_from_toml() {
        let config = LoggerConfig::from_toml_str(
            r#"
            use_prefix = true
            use_default_prefixes = false
            default_prefix = "-"
            dev_mode = true

            [prefix]
            log = "[LOG]"
            warn = ""

            [custom_methods]
            audit = "User {0} did {1}"
            "#,
        )
        .unwrap();

        assert!(!config.use_default_prefixes);
        assert_eq!(config.default_prefix, "-");
        assert!(config.dev_mode);
        assert_eq!(config.prefix.get("log").map(String::as_str), Some("[LOG]"));
        assert_eq!(config.prefix.get("warn").map(String::as_str), Some(""));

        let audit = config.custom_methods[0].handler.as_ref().unwrap();
        assert_eq!(audit.invoke(&parts!["Alice", "Login"]), parts!["User Alice did Login"]);
    }

    #[test]
    fn test_toml_prefix_values_are_opaque() {
        let config = LoggerConfig::from_toml_str("[prefix]\nlog = 42\ninfo = true").unwrap();
        assert_eq!(config.prefix.get("log").map(String::as_str), Some("42"));
        assert_eq!(config.prefix.get("info").map(String::as_str), Some("true"));
    }

    #[test]
    fn test_toml_non_string_custom_method_has_no_handler() {
        let config = LoggerConfig::from_toml_str("[custom_methods]\nbroken = 7").unwrap();
        assert_eq!(config.custom_methods[0].id, "broken");
        assert!(config.custom_methods[0].handler.is_none());
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        assert!(LoggerConfig::from_toml_str("use_prefixes = false").is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = LoggerConfig::from_file(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glyphlog.toml");
        std::fs::write(&path, "use_icon_pack = true\n").unwrap();
        assert!(LoggerConfig::from_file(&path).unwrap().use_icon_pack);
    }
}
