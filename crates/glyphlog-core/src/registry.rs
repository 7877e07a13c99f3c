//! Method registry: the fixed built-ins plus user-declared methods.

use std::collections::BTreeMap;
use std::fmt;

use crate::custom::CustomHandler;
use crate::sink::Channel;

/// Built-in method identifiers and the sink channel each one writes to.
pub const BUILTIN_METHODS: [(&str, Channel); 9] = [
    ("log", Channel::Plain),
    ("warn", Channel::Warning),
    ("error", Channel::Error),
    ("info", Channel::Info),
    ("success", Channel::Plain),
    ("check", Channel::Plain),
    ("skip", Channel::Plain),
    ("connect", Channel::Plain),
    ("disconnect", Channel::Plain),
];

/// How a registered method is dispatched.
#[derive(Clone)]
pub enum MethodKind {
    /// Forwards its arguments to a fixed channel.
    Builtin(Channel),
    /// Runs a handler and forwards its output to the plain channel.
    Custom(CustomHandler),
}

impl MethodKind {
    /// The channel this method ends up writing to.
    #[must_use]
    pub fn channel(&self) -> Channel {
        match self {
            Self::Builtin(channel) => *channel,
            Self::Custom(_) => Channel::Plain,
        }
    }

    #[must_use]
    pub fn origin(&self) -> RegistrationOrigin {
        match self {
            Self::Builtin(_) => RegistrationOrigin::Builtin,
            Self::Custom(_) => RegistrationOrigin::Custom,
        }
    }
}

impl fmt::Debug for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(channel) => f.debug_tuple("Builtin").field(channel).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Where an existing registration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOrigin {
    Builtin,
    Custom,
}

impl fmt::Display for RegistrationOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("built-in"),
            Self::Custom => f.write_str("custom"),
        }
    }
}

/// The set of dispatchable method identifiers.
///
/// Identifiers are unique; registering an existing one replaces it and
/// reports what was replaced so the caller can warn about it. Iteration
/// order is lexicographic, which keeps everything derived from a registry
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    methods: BTreeMap<String, MethodKind>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in method.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// Registers the built-in methods, leaving existing entries alone.
    pub fn register_builtins(&mut self) {
        for (id, channel) in BUILTIN_METHODS {
            self.methods
                .entry(id.to_string())
                .or_insert(MethodKind::Builtin(channel));
        }
    }

    /// Registers a custom method.
    ///
    /// Returns the origin of the entry it replaced, if any. The new handler
    /// always wins.
    pub fn register_custom(
        &mut self,
        id: impl Into<String>,
        handler: CustomHandler,
    ) -> Option<RegistrationOrigin> {
        let id = id.into();
        let previous = self.methods.insert(id.clone(), MethodKind::Custom(handler));
        if let Some(previous) = &previous {
            log::debug!(
                target: crate::logging::targets::REGISTRY,
                "custom method `{}` replaced a {} registration",
                id,
                previous.origin()
            );
        }
        previous.map(|kind| kind.origin())
    }

    /// Looks up a method.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MethodKind> {
        self.methods.get(id)
    }

    /// Looks up a method, returning the registry's own copy of its id.
    #[must_use]
    pub fn entry(&self, id: &str) -> Option<(&str, &MethodKind)> {
        self.methods
            .get_key_value(id)
            .map(|(id, kind)| (id.as_str(), kind))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.methods.contains_key(id)
    }

    /// All registered identifiers, deduplicated.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// All registered methods with their kinds.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MethodKind)> {
        self.methods.iter().map(|(id, kind)| (id.as_str(), kind))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
