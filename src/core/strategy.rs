//! Per-field override bundles.

use std::fmt;

/// Type alias for lazily invoked value suppliers.
pub type ValueSupplier<T> = Box<dyn FnOnce() -> Option<T> + Send>;

/// Caller-supplied overrides for resolving one field.
///
/// Every member is optional. The key overrides only redirect *where* the process
/// property, environment and external lookups happen; the explicit value and the
/// supplier provide values that rank below those lookups but above the field's own
/// fallback.
///
/// # Examples
///
/// ```rust
/// use provenance_config::core::ResolutionStrategy;
///
/// let strategy = ResolutionStrategy::new()
///     .env_variable("LEGACY_DB_HOST")
///     .explicit_value("db.internal".to_string());
/// assert!(strategy.has_explicit_value());
/// ```
pub struct ResolutionStrategy<T> {
    pub(crate) explicit_value: Option<T>,
    pub(crate) system_property_key: Option<String>,
    pub(crate) env_variable: Option<String>,
    pub(crate) external_property_key: Option<String>,
    pub(crate) value_supplier: Option<ValueSupplier<T>>,
}

impl<T> ResolutionStrategy<T> {
    /// Create an empty strategy.
    pub fn new() -> Self {
        Self {
            explicit_value: None,
            system_property_key: None,
            env_variable: None,
            external_property_key: None,
            value_supplier: None,
        }
    }

    /// Pin a value for the field.
    pub fn explicit_value(mut self, value: T) -> Self {
        self.explicit_value = Some(value);
        self
    }

    /// Look the field up under a different process property key.
    pub fn system_property_key(mut self, key: impl Into<String>) -> Self {
        self.system_property_key = Some(key.into());
        self
    }

    /// Look the field up under a different environment variable.
    pub fn env_variable(mut self, name: impl Into<String>) -> Self {
        self.env_variable = Some(name.into());
        self
    }

    /// Look the field up under a different key in the external file.
    pub fn external_property_key(mut self, key: impl Into<String>) -> Self {
        self.external_property_key = Some(key.into());
        self
    }

    /// Provide a callback invoked only when no stronger source resolves the field.
    ///
    /// Returning `None` lets resolution continue to the fallback.
    pub fn value_supplier<F>(mut self, supplier: F) -> Self
    where
        F: FnOnce() -> Option<T> + Send + 'static,
    {
        self.value_supplier = Some(Box::new(supplier));
        self
    }

    /// Whether an explicit value is pinned.
    pub fn has_explicit_value(&self) -> bool {
        self.explicit_value.is_some()
    }

    /// Whether a supplier is registered.
    pub fn has_value_supplier(&self) -> bool {
        self.value_supplier.is_some()
    }
}

impl<T> Default for ResolutionStrategy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ResolutionStrategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionStrategy")
            .field("explicit_value", &self.explicit_value)
            .field("system_property_key", &self.system_property_key)
            .field("env_variable", &self.env_variable)
            .field("external_property_key", &self.external_property_key)
            .field("value_supplier", &self.value_supplier.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
