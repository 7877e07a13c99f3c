//! Icon packs: optional external sources of prefix strings.
//!
//! An [`IconProvider`] loads an [`IconPack`] asynchronously. Loading may
//! fail; the engine treats a failed load as if no pack had been requested.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use serde::Deserialize;

use crate::error::IconPackError;
use crate::logging::targets;

/// Future returned by [`IconProvider::load`].
pub type IconFuture<'a> = Pin<Box<dyn Future<Output = Result<IconPack, IconPackError>> + Send + 'a>>;

/// String-valued icons keyed by semantic name (`pin`, `warning`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct IconPack {
    icons: BTreeMap<String, String>,
}

impl IconPack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an icon.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, icon: impl Into<String>) -> Self {
        self.icons.insert(name.into(), icon.into());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.icons.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Parses a TOML document of `name = "icon"` pairs.
    pub fn from_toml_str(text: &str) -> Result<Self, IconPackError> {
        Ok(toml::from_str(text)?)
    }

    /// Parses a JSON object of `"name": "icon"` pairs.
    pub fn from_json_str(text: &str) -> Result<Self, IconPackError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for IconPack {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            icons: iter
                .into_iter()
                .map(|(name, icon)| (name.into(), icon.into()))
                .collect(),
        }
    }
}

/// Maps a method identifier to the icon name it looks up.
///
/// Built-ins have fixed names; any other identifier is its own icon name.
#[must_use]
pub fn icon_name(method: &str) -> &str {
    match method {
        "log" => "pin",
        "check" => "check_green",
        "warn" => "warning",
        "error" => "cross",
        other => other,
    }
}

/// An asynchronously loadable icon pack.
pub trait IconProvider: Send + Sync {
    fn load(&self) -> IconFuture<'_>;
}

/// Provider serving a pack that is already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticIcons(pub IconPack);

impl IconProvider for StaticIcons {
    fn load(&self) -> IconFuture<'_> {
        let pack = self.0.clone();
        Box::pin(async move { Ok(pack) })
    }
}

/// Provider for the bundled emoji pack.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmojiIcons;

impl EmojiIcons {
    /// The bundled pack, covering every built-in icon name.
    #[must_use]
    pub fn pack() -> IconPack {
        [
            ("pin", "📌"),
            ("check_green", "✅"),
            ("warning", "⚠️"),
            ("cross", "❌"),
            ("info", "ℹ️"),
            ("success", "🎉"),
            ("skip", "⏭️"),
            ("connect", "🔌"),
            ("disconnect", "⛔"),
        ]
        .into_iter()
        .collect()
    }
}

impl IconProvider for EmojiIcons {
    fn load(&self) -> IconFuture<'_> {
        Box::pin(async { Ok(Self::pack()) })
    }
}

/// Provider reading a `.toml` or `.json` file.
#[derive(Debug, Clone)]
pub struct FileIcons {
    path: PathBuf,
}

impl FileIcons {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/glyphlog/icons.toml`, if the platform has a config dir.
    #[must_use]
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("glyphlog").join("icons.toml")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IconProvider for FileIcons {
    fn load(&self) -> IconFuture<'_> {
        Box::pin(async move {
            let parse: fn(&str) -> Result<IconPack, IconPackError> =
                match self.path.extension().and_then(|ext| ext.to_str()) {
                    Some("toml") => IconPack::from_toml_str,
                    Some("json") => IconPack::from_json_str,
                    _ => return Err(IconPackError::UnsupportedFormat(self.path.clone())),
                };

            log::debug!(target: targets::ICONS, "loading icon pack from {}", self.path.display());
            let text = tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| IconPackError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            parse(&text)
        })
    }
}
