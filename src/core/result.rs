//! The outcome of resolving a single field.

use super::Provenance;

/// An immutable `(value, provenance)` pair.
///
/// A result carries a value if and only if its provenance is not [`Provenance::None`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult<T> {
    value: Option<T>,
    resolved_by: Provenance,
}

impl<T> ResolutionResult<T> {
    /// A value obtained from `resolved_by`.
    ///
    /// # Panics
    ///
    /// Panics if `resolved_by` is [`Provenance::None`]; use [`ResolutionResult::none`] for that.
    pub fn found(value: T, resolved_by: Provenance) -> Self {
        assert!(
            resolved_by.is_resolved(),
            "a found value cannot be tagged Provenance::None"
        );
        Self {
            value: Some(value),
            resolved_by,
        }
    }

    /// Nothing was resolved.
    pub fn none() -> Self {
        Self {
            value: None,
            resolved_by: Provenance::None,
        }
    }

    /// Whether any source produced a value.
    pub fn resolved(&self) -> bool {
        self.resolved_by.is_resolved()
    }

    /// The resolved value, if any.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Which source supplied the value.
    pub fn resolved_by(&self) -> Provenance {
        self.resolved_by
    }

    /// Consume the result, keeping only the value.
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// Consume the result into its parts.
    pub fn into_parts(self) -> (Option<T>, Provenance) {
        (self.value, self.resolved_by)
    }

    /// Transform the value while keeping its provenance.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResolutionResult<U> {
        ResolutionResult {
            value: self.value.map(f),
            resolved_by: self.resolved_by,
        }
    }
}
