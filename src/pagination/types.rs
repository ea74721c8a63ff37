//! Page and cursor types
//!
//! Disqus list endpoints answer with
//!
//! ```text
//! { "code": 0,
//!   "cursor": {"hasPrev": false, "prev": null,
//!              "hasNext": true, "next": "1320872487989935:0:0",
//!              "total": null},
//!   "response": [ ... ] }
//! ```
//!
//! Only `cursor.hasNext` and `cursor.next` drive traversal. `total` is rarely
//! filled in and the legacy `more`/`id` fields duplicate `hasNext`/`next`, so
//! none of them are consulted.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::Serialize;

/// Pagination position reported by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    pub has_prev: bool,
    pub prev: Option<String>,
    pub has_next: bool,
    pub next: Option<String>,
    pub total: Option<u64>,
}

impl Cursor {
    /// Parse a `cursor` object; `hasNext` is the only required field
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        let JsonValue::Object(obj) = value else {
            return Err(Error::malformed_page("'cursor' is not an object"));
        };
        let has_next = match obj.get("hasNext") {
            Some(JsonValue::Bool(b)) => *b,
            Some(other) => {
                return Err(Error::malformed_page(format!(
                    "'cursor.hasNext' is not a boolean: {other}"
                )))
            }
            None => return Err(Error::malformed_page("missing 'cursor.hasNext'")),
        };

        Ok(Self {
            has_prev: obj
                .get("hasPrev")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
            prev: obj.get("prev").and_then(token),
            has_next,
            next: obj.get("next").and_then(token),
            total: obj.get("total").and_then(JsonValue::as_u64),
        })
    }

    /// Token to request the following page
    ///
    /// `Ok(None)` once the API reports no further pages. A cursor claiming
    /// more pages without a `next` token is malformed.
    pub fn continuation(&self) -> Result<Option<&str>> {
        if !self.has_next {
            return Ok(None);
        }
        match self.next.as_deref() {
            Some(token) => Ok(Some(token)),
            None => Err(Error::malformed_page(
                "'cursor.hasNext' is true but 'cursor.next' is missing",
            )),
        }
    }
}

/// Opaque tokens are usually strings; numeric ones are kept as their text
fn token(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// One API response from a paginated resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub cursor: Cursor,
    /// Result items in server order
    pub response: Vec<JsonValue>,
    /// Remaining top-level fields, such as `code`
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Page {
    /// Validate and split a raw response body into a page
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let JsonValue::Object(mut map) = value else {
            return Err(Error::malformed_page("page is not a JSON object"));
        };

        let cursor = match map.shift_remove("cursor") {
            Some(raw) => Cursor::from_value(&raw)?,
            None => return Err(Error::malformed_page("missing 'cursor'")),
        };
        let response = match map.shift_remove("response") {
            Some(JsonValue::Array(items)) => items,
            Some(_) => return Err(Error::malformed_page("'response' is not an array")),
            None => return Err(Error::malformed_page("missing 'response'")),
        };

        Ok(Self {
            cursor,
            response,
            extra: map,
        })
    }

    pub fn len(&self) -> usize {
        self.response.len()
    }

    pub fn is_empty(&self) -> bool {
        self.response.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.cursor.has_next
    }
}

impl TryFrom<JsonValue> for Page {
    type Error = Error;

    fn try_from(value: JsonValue) -> Result<Self> {
        Self::from_value(value)
    }
}
