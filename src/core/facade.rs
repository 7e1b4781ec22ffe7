//! The contract implemented by concrete configuration providers.

use super::Provenance;
use serde::Serialize;
use std::collections::BTreeMap;

/// A typed configuration object assembled from resolved fields.
///
/// Implementors resolve all of their fields once, at construction, and keep the
/// provenance of each one for diagnostics.
///
/// # Examples
///
/// ```rust
/// use provenance_config::core::{ConfigFacade, Provenance, ResolvedBy};
///
/// struct Endpoint {
///     host: Option<String>,
///     port: u16,
///     resolved_by: ResolvedBy,
/// }
///
/// impl ConfigFacade for Endpoint {
///     fn can_provide(&self) -> bool {
///         self.host.as_deref().is_some_and(|h| !h.trim().is_empty()) && self.port > 0
///     }
///
///     fn resolved_by(&self) -> &ResolvedBy {
///         &self.resolved_by
///     }
/// }
///
/// let endpoint = Endpoint {
///     host: None,
///     port: 8080,
///     resolved_by: [("host", Provenance::None), ("port", Provenance::ProviderDefault)]
///         .into_iter()
///         .collect(),
/// };
/// assert!(!endpoint.can_provide());
/// assert_eq!(endpoint.resolved_by().unresolved().collect::<Vec<_>>(), vec!["host"]);
/// ```
pub trait ConfigFacade {
    /// Whether the already-resolved fields are enough to supply this configuration.
    ///
    /// Must not trigger any new resolution.
    fn can_provide(&self) -> bool;

    /// How each field was resolved, keyed by field name.
    fn resolved_by(&self) -> &ResolvedBy;
}

/// Immutable map from field name to [`Provenance`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedBy(BTreeMap<String, Provenance>);

impl ResolvedBy {
    pub(crate) fn new(entries: BTreeMap<String, Provenance>) -> Self {
        Self(entries)
    }

    /// Provenance of one field.
    pub fn get(&self, field: &str) -> Option<Provenance> {
        self.0.get(field).copied()
    }

    /// Iterate over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Provenance)> {
        self.0.iter().map(|(name, provenance)| (name.as_str(), *provenance))
    }

    /// Names of the fields nothing could resolve.
    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, provenance)| !provenance.is_resolved())
            .map(|(name, _)| name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Provenance)> for ResolvedBy {
    fn from_iter<I: IntoIterator<Item = (K, Provenance)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, p)| (k.into(), p)).collect())
    }
}
