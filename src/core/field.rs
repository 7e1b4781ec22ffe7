//! Declarative field specifications.

use super::{Converter, ResolutionRequest};
use crate::error::{ConfigError, Result};
use crate::sources::{Environment, PropertySource};

/// A field's identity: its name, default lookup keys, fallback and converter.
///
/// Concrete providers declare one spec per field and hand them to a
/// [`FieldResolver`](super::FieldResolver) instead of writing precedence code.
#[derive(Debug)]
pub struct FieldSpec<T> {
    name: String,
    system_property_key: String,
    env_variable: String,
    external_key: String,
    fallback: Option<T>,
    converter: Converter<T>,
}

impl<T> FieldSpec<T> {
    /// Start declaring a field.
    pub fn builder(name: impl Into<String>) -> FieldSpecBuilder<T> {
        FieldSpecBuilder::new(name)
    }

    /// Field name, as reported in provenance maps.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Default process property key.
    pub fn system_property_key(&self) -> &str {
        &self.system_property_key
    }

    /// Default environment variable name.
    pub fn env_variable(&self) -> &str {
        &self.env_variable
    }

    /// Default external file key.
    pub fn external_key(&self) -> &str {
        &self.external_key
    }

    /// Compiled-in fallback.
    pub fn fallback(&self) -> Option<&T> {
        self.fallback.as_ref()
    }

    /// Build a resolution request for this field.
    pub fn request<'a>(
        &self,
        property_source: &'a PropertySource,
        environment: &'a dyn Environment,
    ) -> ResolutionRequest<'a, T>
    where
        T: Clone,
    {
        ResolutionRequest::new(
            self.system_property_key.clone(),
            self.env_variable.clone(),
            self.external_key.clone(),
            self.converter.clone(),
            property_source,
            environment,
        )
        .fallback_opt(self.fallback.clone())
    }
}

impl<T: Clone> Clone for FieldSpec<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            system_property_key: self.system_property_key.clone(),
            env_variable: self.env_variable.clone(),
            external_key: self.external_key.clone(),
            fallback: self.fallback.clone(),
            converter: self.converter.clone(),
        }
    }
}

/// Builder for [`FieldSpec`].
#[derive(Debug)]
pub struct FieldSpecBuilder<T> {
    name: String,
    system_property_key: Option<String>,
    env_variable: Option<String>,
    external_key: Option<String>,
    fallback: Option<T>,
    converter: Option<Converter<T>>,
}

impl<T> FieldSpecBuilder<T> {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_property_key: None,
            env_variable: None,
            external_key: None,
            fallback: None,
            converter: None,
        }
    }

    /// Default process property key.
    pub fn system_property_key(mut self, key: impl Into<String>) -> Self {
        self.system_property_key = Some(key.into());
        self
    }

    /// Default environment variable name.
    pub fn env_variable(mut self, name: impl Into<String>) -> Self {
        self.env_variable = Some(name.into());
        self
    }

    /// Default external file key.
    pub fn external_key(mut self, key: impl Into<String>) -> Self {
        self.external_key = Some(key.into());
        self
    }

    /// Compiled-in fallback value.
    pub fn fallback(mut self, value: T) -> Self {
        self.fallback = Some(value);
        self
    }

    /// String-to-value conversion.
    pub fn converter(mut self, converter: Converter<T>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Finish the spec.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFieldMetadata`] if the name, any of the three
    /// lookup keys, or the converter is missing or blank.
    pub fn build(self) -> Result<FieldSpec<T>> {
        if self.name.trim().is_empty() {
            return Err(missing(&self.name, "name"));
        }
        let system_property_key = required(
            self.system_property_key,
            &self.name,
            "system property key",
        )?;
        let env_variable = required(self.env_variable, &self.name, "environment variable name")?;
        let external_key = required(self.external_key, &self.name, "external property key")?;
        let converter = self
            .converter
            .ok_or_else(|| missing(&self.name, "converter"))?;

        Ok(FieldSpec {
            name: self.name,
            system_property_key,
            env_variable,
            external_key,
            fallback: self.fallback,
            converter,
        })
    }
}

fn required(value: Option<String>, field: &str, what: &'static str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing(field, what))
}

fn missing(field: &str, what: &'static str) -> ConfigError {
    ConfigError::MissingFieldMetadata {
        field: field.to_string(),
        missing: what,
    }
}

/// A product prefix from which default lookup keys are derived.
///
/// # Examples
///
/// ```rust
/// use provenance_config::core::{Converter, Namespace};
///
/// let ns = Namespace::new("app");
/// assert_eq!(ns.system_property_key("db.host"), "app.db.host");
/// assert_eq!(ns.env_variable("db.host"), "APP_DB_HOST");
///
/// let spec = ns.field("port", Converter::<u16>::parse()).fallback(8080).build().unwrap();
/// assert_eq!(spec.env_variable(), "APP_PORT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: String,
}

impl Namespace {
    /// Create a namespace, e.g. `"app"` or `"myservice.db"`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// `lower.dotted.case`: `<prefix>.<field>`.
    pub fn system_property_key(&self, field: &str) -> String {
        format!("{}.{}", self.prefix, field)
    }

    /// `UPPER_SNAKE_CASE`: `<PREFIX>_<FIELD>` with dots and dashes turned into underscores.
    pub fn env_variable(&self, field: &str) -> String {
        format!("{}_{}", self.prefix, field)
            .chars()
            .map(|c| match c {
                '.' | '-' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect()
    }

    /// Same as the process property key.
    pub fn external_key(&self, field: &str) -> String {
        self.system_property_key(field)
    }

    /// A field spec builder with all three keys derived from `name`.
    pub fn field<T>(&self, name: &str, converter: Converter<T>) -> FieldSpecBuilder<T> {
        FieldSpec::builder(name)
            .system_property_key(self.system_property_key(name))
            .env_variable(self.env_variable(name))
            .external_key(self.external_key(name))
            .converter(converter)
    }
}
