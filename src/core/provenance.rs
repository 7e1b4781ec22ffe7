//! Provenance tags recording which source supplied a value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a configuration value was obtained.
///
/// The variants are listed from the strongest source to the weakest, except for
/// [`Provenance::None`], which marks a field nothing could resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Provenance {
    /// Read from the process-wide property table.
    SystemProperty,
    /// Read from a process environment variable.
    SystemEnv,
    /// Read from the external properties file.
    ExternalProperty,
    /// Pinned by the caller through a resolution strategy.
    ExplicitValue,
    /// Produced by a caller-supplied callback.
    Supplier,
    /// The field's compiled-in fallback value.
    ///
    /// This is a resolution outcome, never an "unresolved yet" marker.
    ProviderDefault,
    /// No source produced a value.
    None,
}

impl Provenance {
    /// Returns true for every tag except [`Provenance::None`].
    pub fn is_resolved(self) -> bool {
        self != Provenance::None
    }

    /// Returns true if the value came from a source outside the code: a process
    /// property, an environment variable, or the external file.
    pub fn is_external_override(self) -> bool {
        matches!(
            self,
            Provenance::SystemProperty | Provenance::SystemEnv | Provenance::ExternalProperty
        )
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Provenance::SystemProperty => "system property",
            Provenance::SystemEnv => "environment variable",
            Provenance::ExternalProperty => "external property file",
            Provenance::ExplicitValue => "explicit value",
            Provenance::Supplier => "value supplier",
            Provenance::ProviderDefault => "provider default",
            Provenance::None => "no source",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_none_is_unresolved() {
        assert!(!Provenance::None.is_resolved());
        assert!(Provenance::ProviderDefault.is_resolved());
        assert!(Provenance::Supplier.is_resolved());
        assert!(Provenance::SystemEnv.is_resolved());
    }

    #[test]
    fn test_external_overrides() {
        assert!(Provenance::SystemProperty.is_external_override());
        assert!(Provenance::ExternalProperty.is_external_override());
        assert!(!Provenance::ExplicitValue.is_external_override());
        assert!(!Provenance::ProviderDefault.is_external_override());
    }

    #[test]
    fn test_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&Provenance::SystemProperty).unwrap();
        assert_eq!(json, "\"SYSTEM_PROPERTY\"");

        let back: Provenance = serde_json::from_str("\"PROVIDER_DEFAULT\"").unwrap();
        assert_eq!(back, Provenance::ProviderDefault);
    }
}
