//! One field's worth of resolution input.

use super::{Converter, ResolutionStrategy};
use crate::sources::{Environment, PropertySource};

/// Everything needed to resolve a single field.
///
/// Requests are one-shot: [`resolve`](crate::core::resolve) consumes them, so a
/// strategy's supplier can run at most once.
///
/// # Examples
///
/// ```rust
/// use provenance_config::core::{Converter, Provenance, ResolutionRequest, resolve};
/// use provenance_config::sources::{MapEnvironment, PropertySource};
///
/// let env = MapEnvironment::new().with_env("APP_PORT", "9000");
/// let source = PropertySource::empty();
///
/// let request = ResolutionRequest::new(
///     "app.port",
///     "APP_PORT",
///     "app.port",
///     Converter::<u16>::parse(),
///     &source,
///     &env,
/// )
/// .fallback(8080);
///
/// let result = resolve(request).unwrap();
/// assert_eq!(result.value(), Some(&9000));
/// assert_eq!(result.resolved_by(), Provenance::SystemEnv);
/// ```
pub struct ResolutionRequest<'a, T> {
    pub(crate) default_system_property_key: String,
    pub(crate) default_env_variable: String,
    pub(crate) default_external_key: String,
    pub(crate) fallback_value: Option<T>,
    pub(crate) strategy: Option<ResolutionStrategy<T>>,
    pub(crate) property_source: &'a PropertySource,
    pub(crate) environment: &'a dyn Environment,
    pub(crate) converter: Converter<T>,
}

impl<'a, T> ResolutionRequest<'a, T> {
    /// Create a request from the field's default lookup keys.
    pub fn new(
        system_property_key: impl Into<String>,
        env_variable: impl Into<String>,
        external_key: impl Into<String>,
        converter: Converter<T>,
        property_source: &'a PropertySource,
        environment: &'a dyn Environment,
    ) -> Self {
        Self {
            default_system_property_key: system_property_key.into(),
            default_env_variable: env_variable.into(),
            default_external_key: external_key.into(),
            fallback_value: None,
            strategy: None,
            property_source,
            environment,
            converter,
        }
    }

    /// Set the compiled-in value used when every other source is silent.
    pub fn fallback(mut self, value: T) -> Self {
        self.fallback_value = Some(value);
        self
    }

    /// Set or clear the compiled-in fallback.
    pub fn fallback_opt(mut self, value: Option<T>) -> Self {
        self.fallback_value = value;
        self
    }

    /// Attach caller overrides.
    pub fn strategy(mut self, strategy: ResolutionStrategy<T>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Attach caller overrides, if any.
    pub fn strategy_opt(mut self, strategy: Option<ResolutionStrategy<T>>) -> Self {
        self.strategy = strategy;
        self
    }
}
