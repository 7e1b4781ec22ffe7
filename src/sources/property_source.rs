//! External properties file source.

use super::{Environment, properties};
use crate::core::ResolutionResult;
use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Process property consulted for the external file location.
pub const DEFAULT_PATH_PROPERTY: &str = "config.provenance.path";

/// Environment variable consulted for the external file location.
pub const DEFAULT_PATH_ENV: &str = "CONFIG_PROVENANCE_PATH";

/// File name used in the home directory when no location is configured.
pub const DEFAULT_FILE_NAME: &str = ".config-provenance.properties";

/// A read-only key-value map backed by a local properties file.
///
/// The file is read once, when the source is built. A missing, unreadable or
/// corrupt file is not an error: the source simply has no entries and
/// [`can_provide`](PropertySource::can_provide) returns false.
///
/// # Examples
///
/// ```rust,no_run
/// use provenance_config::sources::{ProcessEnvironment, PropertySource};
///
/// // config.provenance.path -> CONFIG_PROVENANCE_PATH -> explicit path -> ~/.config-provenance.properties
/// let source = PropertySource::builder()
///     .path("/etc/myservice/service.properties")
///     .build(&ProcessEnvironment);
///
/// if let Some(host) = source.get("myservice.db.host") {
///     println!("db host: {}", host);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertySource {
    path: Option<PathBuf>,
    entries: HashMap<String, String>,
}

impl PropertySource {
    /// Create a builder for locating the external file.
    pub fn builder() -> PropertySourceBuilder {
        PropertySourceBuilder::new()
    }

    /// Locate and read the external file using the default keys and default path.
    pub fn load(env: &dyn Environment) -> Self {
        Self::builder().build(env)
    }

    /// Read the file at exactly `path`, with no property or environment lookups.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::open(Some(path.into()))
    }

    /// Build an in-memory source with no backing file.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            path: None,
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// A source that can never provide anything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read the same path again into a new source.
    ///
    /// The existing source is left untouched.
    pub fn reload(&self) -> Self {
        match &self.path {
            Some(path) => Self::open(Some(path.clone())),
            None => self.clone(),
        }
    }

    fn open(path: Option<PathBuf>) -> Self {
        let entries = match path.as_deref() {
            Some(path) => match read_entries(path) {
                Ok(entries) => {
                    tracing::debug!(
                        file_path = %path.display(),
                        entries = entries.len(),
                        "Loaded external properties"
                    );
                    entries
                }
                Err(ConfigError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(
                        file_path = %path.display(),
                        "External properties file not found. Ignoring."
                    );
                    HashMap::new()
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        file_path = %path.display(),
                        "Unable to read external properties file. Ignoring."
                    );
                    HashMap::new()
                }
            },
            None => {
                tracing::debug!("No external properties path could be determined");
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    /// Whether the source holds at least one entry.
    pub fn can_provide(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Look up a key.
    ///
    /// This is the raw entry, so a key written as `key=` yields `Some("")`. The
    /// callback helpers below treat such blank entries as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Call `on_found` with the value if `key` holds a non-blank value, otherwise
    /// call `on_absent`.
    ///
    /// Exactly one of the callbacks runs.
    pub fn use_if_present<F, A>(&self, key: &str, on_found: F, on_absent: A)
    where
        F: FnOnce(&str),
        A: FnOnce(),
    {
        match self.non_blank_entry(key) {
            Some(value) => on_found(value),
            None => on_absent(),
        }
    }

    /// Fold an external lookup into a resolution chain.
    ///
    /// `on_found` receives the raw value when `key` holds a non-blank value; otherwise
    /// `on_absent` supplies the result. A blank value counts as absent, the same as a
    /// blank process property or environment variable.
    pub fn resolve_external<T, F, A>(
        &self,
        key: &str,
        on_found: F,
        on_absent: A,
    ) -> Result<ResolutionResult<T>>
    where
        F: FnOnce(&str) -> Result<ResolutionResult<T>>,
        A: FnOnce() -> Result<ResolutionResult<T>>,
    {
        match self.non_blank_entry(key) {
            Some(value) => on_found(value),
            None => on_absent(),
        }
    }

    fn non_blank_entry(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    /// The resolved file location, if one could be determined.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the source has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn read_entries(path: &Path) -> Result<HashMap<String, String>> {
    let text = std::fs::read_to_string(path)?;
    properties::parse(&text)
}

/// Builder for locating a [`PropertySource`].
///
/// The file location is chosen by this precedence:
/// 1. a non-blank process property (default key [`DEFAULT_PATH_PROPERTY`])
/// 2. a non-blank environment variable (default name [`DEFAULT_PATH_ENV`])
/// 3. the explicit [`path`](PropertySourceBuilder::path)
/// 4. the default path, `~/`[`DEFAULT_FILE_NAME`] unless overridden
#[derive(Debug, Clone, Default)]
pub struct PropertySourceBuilder {
    path: Option<PathBuf>,
    system_property_key: Option<String>,
    env_variable: Option<String>,
    default_path: Option<PathBuf>,
}

impl PropertySourceBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this path unless a process property or environment variable names another.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Read the file location from a different process property.
    pub fn system_property_key(mut self, key: impl Into<String>) -> Self {
        self.system_property_key = Some(key.into());
        self
    }

    /// Read the file location from a different environment variable.
    pub fn env_variable(mut self, name: impl Into<String>) -> Self {
        self.env_variable = Some(name.into());
        self
    }

    /// Replace the last-resort location.
    pub fn default_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_path = Some(path.into());
        self
    }

    /// Resolve the location and read the file.
    pub fn build(self, env: &dyn Environment) -> PropertySource {
        PropertySource::open(self.resolve_path(env))
    }

    fn resolve_path(self, env: &dyn Environment) -> Option<PathBuf> {
        let key = self
            .system_property_key
            .as_deref()
            .unwrap_or(DEFAULT_PATH_PROPERTY);
        if let Some(path) = non_blank(env.system_property(key)) {
            tracing::debug!(key, "External properties path set by process property");
            return Some(PathBuf::from(path));
        }

        let variable = self.env_variable.as_deref().unwrap_or(DEFAULT_PATH_ENV);
        if let Some(path) = non_blank(env.env_var(variable)) {
            tracing::debug!(variable, "External properties path set by environment variable");
            return Some(PathBuf::from(path));
        }

        self.path
            .or(self.default_path)
            .or_else(|| dirs::home_dir().map(|home| home.join(DEFAULT_FILE_NAME)))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Provenance;
    use crate::sources::MapEnvironment;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_nonexistent_path_cannot_provide() {
        let source = PropertySource::from_path("/nonexistent/service.properties");
        assert!(!source.can_provide());
        assert_eq!(source.get("anything"), None);
        assert_eq!(
            source.path(),
            Some(Path::new("/nonexistent/service.properties"))
        );
    }

    #[test]
    fn test_readable_file_can_provide() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "service.properties", "app.host=file-host\n");

        let source = PropertySource::from_path(&path);
        assert!(source.can_provide());
        assert_eq!(source.get("app.host"), Some("file-host"));
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_empty_file_cannot_provide() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "empty.properties", "# nothing here\n");
        assert!(!PropertySource::from_path(path).can_provide());
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "broken.properties", "good=1\nbad=\\uZZZZ\n");
        let source = PropertySource::from_path(path);
        assert!(!source.can_provide());
    }

    #[test]
    fn test_directory_path_degrades_to_empty() {
        let temp_dir = TempDir::new().unwrap();
        let source = PropertySource::from_path(temp_dir.path());
        assert!(!source.can_provide());
    }

    #[test]
    fn test_path_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let from_property = write_file(&temp_dir, "property.properties", "origin=property\n");
        let from_env = write_file(&temp_dir, "env.properties", "origin=env\n");
        let explicit = write_file(&temp_dir, "explicit.properties", "origin=explicit\n");
        let fallback = write_file(&temp_dir, "default.properties", "origin=default\n");

        let builder = || {
            PropertySource::builder()
                .path(&explicit)
                .default_path(&fallback)
        };

        let env = MapEnvironment::new()
            .with_property(DEFAULT_PATH_PROPERTY, from_property.to_str().unwrap())
            .with_env(DEFAULT_PATH_ENV, from_env.to_str().unwrap());
        assert_eq!(builder().build(&env).get("origin"), Some("property"));

        let env = MapEnvironment::new()
            .with_property(DEFAULT_PATH_PROPERTY, "   ")
            .with_env(DEFAULT_PATH_ENV, from_env.to_str().unwrap());
        assert_eq!(builder().build(&env).get("origin"), Some("env"));

        let env = MapEnvironment::new();
        assert_eq!(builder().build(&env).get("origin"), Some("explicit"));

        let source = PropertySource::builder()
            .default_path(&fallback)
            .build(&env);
        assert_eq!(source.get("origin"), Some("default"));
    }

    #[test]
    fn test_custom_lookup_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "custom.properties", "k=v\n");

        let env = MapEnvironment::new()
            .with_env("MYSERVICE_CONFIG", path.to_str().unwrap())
            .with_env(DEFAULT_PATH_ENV, "/nonexistent/ignored.properties");
        let source = PropertySource::builder()
            .env_variable("MYSERVICE_CONFIG")
            .build(&env);

        assert_eq!(source.path(), Some(path.as_path()));
        assert_eq!(source.get("k"), Some("v"));
    }

    #[test]
    fn test_use_if_present_calls_exactly_one() {
        let source = PropertySource::from_entries([("present", "yes")]);

        let mut found = None;
        let mut absent = false;
        source.use_if_present("present", |v| found = Some(v.to_string()), || absent = true);
        assert_eq!(found.as_deref(), Some("yes"));
        assert!(!absent);

        let mut found = None;
        source.use_if_present("missing", |v| found = Some(v.to_string()), || absent = true);
        assert_eq!(found, None);
        assert!(absent);
    }

    #[test]
    fn test_use_if_present_treats_blank_as_absent() {
        let source = PropertySource::from_entries([("db.host", ""), ("db.user", " \t ")]);

        for key in ["db.host", "db.user"] {
            let mut found = None;
            let mut absent = false;
            source.use_if_present(key, |v| found = Some(v.to_string()), || absent = true);
            assert_eq!(found, None, "{key}");
            assert!(absent, "{key}");
        }
        assert_eq!(source.get("db.host"), Some(""));
    }

    #[test]
    fn test_resolve_external_treats_blank_as_absent() {
        let source = PropertySource::from_entries([("host", "file-host"), ("blank", "  ")]);

        let result = source
            .resolve_external(
                "host",
                |raw| Ok(ResolutionResult::found(raw.to_string(), Provenance::ExternalProperty)),
                || Ok(ResolutionResult::none()),
            )
            .unwrap();
        assert_eq!(result.value().map(String::as_str), Some("file-host"));

        let result: ResolutionResult<String> = source
            .resolve_external(
                "blank",
                |raw| Ok(ResolutionResult::found(raw.to_string(), Provenance::ExternalProperty)),
                || Ok(ResolutionResult::none()),
            )
            .unwrap();
        assert!(!result.resolved());
    }

    #[test]
    fn test_reload_reads_fresh_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "service.properties", "version=1\n");
        let first = PropertySource::from_path(&path);

        fs::write(&path, "version=2\n").unwrap();
        let second = first.reload();

        assert_eq!(first.get("version"), Some("1"));
        assert_eq!(second.get("version"), Some("2"));
    }
}
