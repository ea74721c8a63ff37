//! Request parameters
//!
//! [`Params`] is an insertion-ordered map of parameter names to loosely
//! typed JSON values. Client defaults and per-call values are combined with
//! [`Params::merged`]; the later map wins on duplicate keys.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// Query parameter carrying the pagination token
pub const CURSOR_PARAM: &str = "cursor";

/// Ordered request parameter map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(JsonObject);

impl Params {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite a parameter, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Option<JsonValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.0.iter()
    }

    /// Current pagination token, if one has been set
    pub fn cursor(&self) -> Option<&JsonValue> {
        self.get(CURSOR_PARAM)
    }

    /// Set (or overwrite) the pagination token
    pub fn set_cursor(&mut self, token: impl Into<String>) {
        self.insert(CURSOR_PARAM, JsonValue::String(token.into()));
    }

    /// Overlay `overrides` onto `self`; values from `overrides` win
    pub fn extend(&mut self, overrides: &Params) {
        for (key, value) in overrides.iter() {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Combine two maps without mutating either; `overrides` wins on conflicts
    #[must_use]
    pub fn merged(&self, overrides: &Params) -> Params {
        let mut out = self.clone();
        out.extend(overrides);
        out
    }

    /// Flatten into query string pairs
    ///
    /// Strings are sent verbatim, numbers and booleans as their JSON text,
    /// nulls are dropped, arrays become one pair per element and objects are
    /// sent as JSON text.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.len());
        for (key, value) in self.iter() {
            match value {
                JsonValue::Null => {}
                JsonValue::Array(values) => {
                    for v in values {
                        if let Some(text) = scalar_text(v) {
                            pairs.push((key.clone(), text));
                        }
                    }
                }
                other => {
                    if let Some(text) = scalar_text(other) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
        }
        pairs
    }

    /// Parse a `key=value` pair as given on the command line
    ///
    /// The value is kept as a string; numeric interpretation is left to the
    /// server.
    pub fn parse_pair(pair: &str) -> Result<(String, JsonValue)> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::invalid_param(format!("expected key=value, got '{pair}'")))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::invalid_param(format!("empty key in '{pair}'")));
        }
        Ok((key.to_string(), JsonValue::String(value.to_string())))
    }
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<JsonValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl From<JsonObject> for Params {
    fn from(map: JsonObject) -> Self {
        Self(map)
    }
}

impl From<Params> for JsonValue {
    fn from(params: Params) -> Self {
        JsonValue::Object(params.0)
    }
}
