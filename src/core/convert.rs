//! String-to-typed conversion functions.

use crate::error::BoxError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "json")]
use std::collections::HashMap;

type ConvertFn<T> = Arc<dyn Fn(&str) -> Result<T, BoxError> + Send + Sync>;

/// A reusable `&str -> T` conversion.
///
/// Converters run only on raw strings read from process properties, the environment
/// or the external file. A conversion error is reported as
/// [`ConfigError::Conversion`](crate::error::ConfigError::Conversion) and stops resolution.
///
/// # Examples
///
/// ```rust
/// use provenance_config::core::Converter;
///
/// let port = Converter::<u16>::parse();
/// assert_eq!(port.convert("9000").unwrap(), 9000);
/// assert!(port.convert("notANumber").is_err());
/// ```
pub struct Converter<T> {
    inner: ConvertFn<T>,
}

impl<T: 'static> Converter<T> {
    /// Wrap a custom conversion function.
    pub fn new<F, E>(f: F) -> Self
    where
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError> + 'static,
    {
        Self {
            inner: Arc::new(move |raw: &str| f(raw).map_err(Into::into)),
        }
    }
}

impl<T> Converter<T> {
    /// Convert a raw string.
    pub fn convert(&self, raw: &str) -> Result<T, BoxError> {
        (self.inner)(raw)
    }
}

impl<T> Converter<T>
where
    T: FromStr + 'static,
    T::Err: Into<BoxError> + 'static,
{
    /// Convert with [`FromStr`]. Surrounding whitespace is trimmed first.
    pub fn parse() -> Self {
        Self::new(|raw: &str| raw.trim().parse::<T>())
    }
}

impl Converter<String> {
    /// Keep the raw string as is.
    pub fn string() -> Self {
        Self::new(|raw: &str| Ok::<_, BoxError>(raw.to_string()))
    }
}

impl Converter<bool> {
    /// Accept `true/false`, `yes/no`, `on/off` and `1/0`, ignoring case.
    ///
    /// Anything else is an error rather than `false`.
    pub fn boolean() -> Self {
        Self::new(|raw: &str| match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(BoxError::from(
                "expected one of true/false, yes/no, on/off or 1/0",
            )),
        })
    }
}

impl Converter<Vec<String>> {
    /// Split on commas, trimming items and dropping empty ones.
    pub fn list() -> Self {
        Self::new(|raw: &str| {
            Ok::<_, BoxError>(
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(String::from)
                    .collect(),
            )
        })
    }
}

impl Converter<PathBuf> {
    /// Interpret the raw string as a filesystem path.
    pub fn path() -> Self {
        Self::new(|raw: &str| Ok::<_, BoxError>(PathBuf::from(raw.trim())))
    }
}

#[cfg(feature = "json")]
impl Converter<HashMap<String, String>> {
    /// Parse a JSON object with string values.
    pub fn json_map() -> Self {
        Self::new(|raw: &str| serde_json::from_str::<HashMap<String, String>>(raw))
    }
}

impl<T> Clone for Converter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Converter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Converter")
    }
}
