//! Decoded form data.
//!
//! [`FormValues`] is the name → values mapping the scanner reads from. It is
//! normally produced by decoding a request body or query string with
//! [`FormValues::from_urlencoded`] or [`FormValues::from_uri`].

use crate::{DecodeError, LookupError};
use http::Uri;
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;

/// Default maximum body size for form decoding (1 MB).
const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Settings for decoding URL-encoded payloads.
///
/// Deserializable so it can be embedded in an application's configuration:
///
/// ```rust
/// use formscan::DecodeConfig;
///
/// let config: DecodeConfig = serde_json::from_str(r#"{"max_body_size": 4096}"#).unwrap();
/// assert_eq!(config.max_body_size, 4096);
///
/// let config: DecodeConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config, DecodeConfig::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Maximum accepted payload size in bytes.
    pub max_body_size: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl DecodeConfig {
    /// Creates a configuration with the given size limit.
    #[must_use]
    pub fn with_max_body_size(max_body_size: usize) -> Self {
        Self { max_body_size }
    }
}

/// Decoded form fields: each name maps to the values submitted under it, in
/// submission order.
///
/// Names are kept in first-seen order.
///
/// # Example
///
/// ```rust
/// use formscan::FormValues;
///
/// let form = FormValues::from_urlencoded(
///     b"tag=a&name=alice&tag=b",
///     &Default::default(),
/// ).unwrap();
///
/// assert_eq!(form.get("tag"), Some(&["a".to_string(), "b".to_string()][..]));
/// assert_eq!(form.single("name"), Ok("alice"));
/// assert!(form.single("tag").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    inner: IndexMap<String, Vec<String>>,
}

impl FormValues {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an `application/x-www-form-urlencoded` body.
    ///
    /// Repeated names accumulate their values in order. An empty body yields
    /// an empty mapping.
    pub fn from_urlencoded(body: &[u8], config: &DecodeConfig) -> Result<Self, DecodeError> {
        if body.len() > config.max_body_size {
            return Err(DecodeError::PayloadTooLarge {
                max: config.max_body_size,
                actual: body.len(),
            });
        }

        let body = std::str::from_utf8(body)?;
        Self::from_pairs_str(body)
    }

    /// Decodes the query string of `uri`. A URI without a query yields an
    /// empty mapping.
    pub fn from_uri(uri: &Uri) -> Result<Self, DecodeError> {
        Self::from_pairs_str(uri.query().unwrap_or(""))
    }

    fn from_pairs_str(input: &str) -> Result<Self, DecodeError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(input)?;
        tracing::debug!(pairs = pairs.len(), "decoded form data");
        Ok(pairs.into_iter().collect())
    }

    /// Replaces all values of `name` with `value`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(name.into(), vec![value.into()]);
    }

    /// Appends `value` to the values of `name`.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(name.into()).or_default().push(value.into());
    }

    /// Sets the complete value list of `name`, which may be empty.
    pub fn set_all(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.inner.insert(name.into(), values);
    }

    /// Returns every value submitted under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.inner.get(name).map(Vec::as_slice)
    }

    /// Returns the value of `name` if exactly one was submitted.
    pub fn single(&self, name: &str) -> Result<&str, LookupError> {
        match self.inner.get(name).map(Vec::as_slice) {
            None => Err(LookupError::Missing),
            Some([value]) => Ok(value.as_str()),
            Some(values) => Err(LookupError::NotExactlyOne(values.len())),
        }
    }

    /// Returns the number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no names are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (name, value) in iter {
            values.append(name, value);
        }
        values
    }
}

impl From<HashMap<String, Vec<String>>> for FormValues {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        Self {
            inner: map.into_iter().collect(),
        }
    }
}
