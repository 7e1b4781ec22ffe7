//! Construction-time session for resolving a provider's fields.

use super::{FieldSpec, Provenance, ResolutionResult, ResolutionStrategy, ResolvedBy, resolve};
use crate::error::{ConfigError, Result};
use crate::sources::{Environment, PropertySource};
use std::collections::{BTreeMap, HashMap};

/// Resolves a provider's fields against one property source and one environment,
/// recording the provenance of each.
///
/// The provenance map only becomes visible through [`finish`](FieldResolver::finish),
/// once every field has been resolved.
///
/// # Examples
///
/// ```rust
/// use provenance_config::prelude::*;
///
/// # fn main() -> Result<()> {
/// let ns = Namespace::new("app");
/// let host = ns.field("host", Converter::string()).build()?;
/// let port = ns.field("port", Converter::<u16>::parse()).fallback(8080).build()?;
///
/// let env = MapEnvironment::new().with_property("app.host", "localhost");
/// let source = PropertySource::empty();
///
/// let mut fields = FieldResolver::new(&source, &env);
/// let host = fields.value(&host, None)?;
/// let port = fields.value(&port, Some(ResolutionStrategy::new().explicit_value(9000)))?;
/// let resolved_by = fields.finish();
///
/// assert_eq!(host.as_deref(), Some("localhost"));
/// assert_eq!(port, Some(9000));
/// assert_eq!(resolved_by.get("port"), Some(Provenance::ExplicitValue));
/// # Ok(())
/// # }
/// ```
pub struct FieldResolver<'a> {
    property_source: &'a PropertySource,
    environment: &'a dyn Environment,
    resolved_by: BTreeMap<String, Provenance>,
}

impl<'a> FieldResolver<'a> {
    /// Start a session.
    pub fn new(property_source: &'a PropertySource, environment: &'a dyn Environment) -> Self {
        Self {
            property_source,
            environment,
            resolved_by: BTreeMap::new(),
        }
    }

    /// Resolve one field and record its provenance.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateField`] if a field with the same name was
    /// already resolved in this session, or [`ConfigError::Conversion`] for a
    /// malformed override.
    pub fn resolve<T: Clone>(
        &mut self,
        spec: &FieldSpec<T>,
        strategy: Option<ResolutionStrategy<T>>,
    ) -> Result<ResolutionResult<T>> {
        self.ensure_unresolved(spec.name())?;
        let result = self.resolve_unrecorded(spec, strategy)?;
        self.resolved_by
            .insert(spec.name().to_string(), result.resolved_by());
        Ok(result)
    }

    /// Resolve one field and keep only its value.
    pub fn value<T: Clone>(
        &mut self,
        spec: &FieldSpec<T>,
        strategy: Option<ResolutionStrategy<T>>,
    ) -> Result<Option<T>> {
        self.resolve(spec, strategy).map(ResolutionResult::into_value)
    }

    /// Resolve a list of same-typed fields.
    ///
    /// `strategies` is keyed by field name. Provenance is recorded only once every
    /// field in `specs` has resolved; on error the session is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownField`] if a strategy names a field not in
    /// `specs`, [`ConfigError::DuplicateField`] if a name repeats within `specs` or
    /// was already resolved, plus any conversion error.
    pub fn resolve_all<T: Clone>(
        &mut self,
        specs: &[FieldSpec<T>],
        mut strategies: HashMap<String, ResolutionStrategy<T>>,
    ) -> Result<BTreeMap<String, ResolutionResult<T>>> {
        if let Some(name) = strategies
            .keys()
            .find(|name| !specs.iter().any(|spec| spec.name() == name.as_str()))
        {
            return Err(ConfigError::UnknownField(name.clone()));
        }

        let mut results = BTreeMap::new();
        for spec in specs {
            self.ensure_unresolved(spec.name())?;
            if results.contains_key(spec.name()) {
                return Err(ConfigError::DuplicateField(spec.name().to_string()));
            }
            let strategy = strategies.remove(spec.name());
            let result = self.resolve_unrecorded(spec, strategy)?;
            results.insert(spec.name().to_string(), result);
        }

        self.resolved_by.extend(
            results
                .iter()
                .map(|(name, result)| (name.clone(), result.resolved_by())),
        );
        Ok(results)
    }

    fn ensure_unresolved(&self, name: &str) -> Result<()> {
        if self.resolved_by.contains_key(name) {
            return Err(ConfigError::DuplicateField(name.to_string()));
        }
        Ok(())
    }

    fn resolve_unrecorded<T: Clone>(
        &self,
        spec: &FieldSpec<T>,
        strategy: Option<ResolutionStrategy<T>>,
    ) -> Result<ResolutionResult<T>> {
        let request = spec
            .request(self.property_source, self.environment)
            .strategy_opt(strategy);
        resolve(request)
    }

    /// End the session and return the provenance of every resolved field.
    pub fn finish(self) -> ResolvedBy {
        ResolvedBy::new(self.resolved_by)
    }
}
