//! The precedence engine.

use super::{Converter, Provenance, ResolutionRequest, ResolutionResult, ResolutionStrategy};
use crate::error::{ConfigError, Result};
use crate::sources::Environment;

/// Resolve one field.
///
/// Sources are consulted in this fixed order and the first one to produce a value wins:
///
/// 1. the process property named by the strategy override or the default key
/// 2. the environment variable named by the strategy override or the default name
/// 3. the external properties file, under the override or the default key
/// 4. the strategy's explicit value
/// 5. the strategy's supplier, invoked only when everything above is silent
/// 6. the request's fallback value
///
/// Steps 1-3 only count non-blank raw strings. If nothing produces a value the
/// result is tagged [`Provenance::None`].
///
/// # Errors
///
/// A non-blank raw string that the converter rejects returns
/// [`ConfigError::Conversion`]. Resolution stops there and never falls through to a
/// weaker source.
pub fn resolve<T>(request: ResolutionRequest<'_, T>) -> Result<ResolutionResult<T>> {
    let ResolutionRequest {
        default_system_property_key,
        default_env_variable,
        default_external_key,
        fallback_value,
        strategy,
        property_source,
        environment,
        converter,
    } = request;
    let ResolutionStrategy {
        explicit_value,
        system_property_key,
        env_variable,
        external_property_key,
        value_supplier,
    } = strategy.unwrap_or_default();

    let property_key = system_property_key.unwrap_or(default_system_property_key);
    if let Some(raw) = lookup(environment, Lookup::Property(&property_key)) {
        return convert(&converter, &property_key, &raw, Provenance::SystemProperty);
    }

    let variable = env_variable.unwrap_or(default_env_variable);
    if let Some(raw) = lookup(environment, Lookup::Env(&variable)) {
        return convert(&converter, &variable, &raw, Provenance::SystemEnv);
    }

    let external_key = external_property_key.unwrap_or(default_external_key);
    property_source.resolve_external(
        &external_key,
        |raw| convert(&converter, &external_key, raw, Provenance::ExternalProperty),
        || {
            let result = if let Some(value) = explicit_value {
                ResolutionResult::found(value, Provenance::ExplicitValue)
            } else if let Some(value) = value_supplier.and_then(|supplier| supplier()) {
                ResolutionResult::found(value, Provenance::Supplier)
            } else if let Some(value) = fallback_value {
                ResolutionResult::found(value, Provenance::ProviderDefault)
            } else {
                ResolutionResult::none()
            };
            tracing::debug!(
                key = reported_key(result.resolved_by(), &external_key),
                provenance = %result.resolved_by(),
                "Resolved configuration value"
            );
            Ok(result)
        },
    )
}

enum Lookup<'k> {
    Property(&'k str),
    Env(&'k str),
}

fn lookup(environment: &dyn Environment, lookup: Lookup<'_>) -> Option<String> {
    let raw = match lookup {
        Lookup::Property(key) => environment.system_property(key),
        Lookup::Env(name) => environment.env_var(name),
    };
    raw.filter(|value| !value.trim().is_empty())
}

fn convert<T>(
    converter: &Converter<T>,
    key: &str,
    raw: &str,
    provenance: Provenance,
) -> Result<ResolutionResult<T>> {
    match converter.convert(raw) {
        Ok(value) => {
            tracing::debug!(
                key = reported_key(provenance, key),
                provenance = %provenance,
                "Resolved configuration value"
            );
            Ok(ResolutionResult::found(value, provenance))
        }
        Err(e) => Err(ConfigError::conversion(key, provenance, e)),
    }
}

/// The lookup key behind a value, for sources that are addressed by key.
fn reported_key(provenance: Provenance, key: &str) -> Option<&str> {
    provenance.is_external_override().then_some(key)
}
