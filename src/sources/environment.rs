//! Access to process properties and environment variables.

use super::system;
use std::collections::HashMap;

/// Read-only view of the two ambient, process-level sources.
///
/// Resolution never reads `std::env` or the property table directly; it goes
/// through this trait so tests can substitute a [`MapEnvironment`].
pub trait Environment: Send + Sync {
    /// Look up a process property by key.
    fn system_property(&self, key: &str) -> Option<String>;

    /// Look up an environment variable by name.
    fn env_var(&self, name: &str) -> Option<String>;
}

/// The live process: the global property table and `std::env`.
///
/// Environment variables that are not valid UTF-8 are treated as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn system_property(&self, key: &str) -> Option<String> {
        system::system_property(key)
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed, in-memory environment.
///
/// # Examples
///
/// ```rust
/// use provenance_config::sources::{Environment, MapEnvironment};
///
/// let env = MapEnvironment::new()
///     .with_property("app.host", "localhost")
///     .with_env("APP_HOST", "otherhost");
/// assert_eq!(env.system_property("app.host").as_deref(), Some("localhost"));
/// assert_eq!(env.env_var("APP_PORT"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    properties: HashMap<String, String>,
    variables: HashMap<String, String>,
}

impl MapEnvironment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a process property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Add an environment variable.
    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn system_property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }
}
