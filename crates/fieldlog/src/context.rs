// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Typed lookups into an ambient key/value context.
//!
//! A context is any store implementing [`ContextSource`]. Values are
//! [`serde_json::Value`]s; the extractors only report a value as present when
//! it has the expected type (and, for strings, is non-empty).

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Context keys read by the request, response and trace builders.
pub mod keys {
    /// HTTP method of the request
    pub const METHOD: &str = "Method";
    /// Request URI
    pub const REQUEST_URI: &str = "RequestURI";
    /// Serialized request headers
    pub const REQ_HEADER: &str = "ReqHeader";
    /// Request body
    pub const REQ_BODY: &str = "ReqBody";
    /// Request time, passed through unchanged
    pub const TIME: &str = "Time";
    /// Serialized response headers
    pub const RESP_HEADER: &str = "RespHeader";
    /// Response body
    pub const RESP_BODY: &str = "RespBody";
    /// Response status code (integer)
    pub const STATUS_CODE: &str = "StatusCode";
    /// Free-form tag
    pub const TAG: &str = "Tag";
    /// Document identifier
    pub const DOCUMENT_ID: &str = "DocumentId";
    /// Internal request identifier
    pub const REQ_ID: &str = "ReqId";
    /// Upstream `X-Request-Id`
    pub const X_REQ_ID: &str = "XReqId";
}

/// Read-only key/value lookup scoped to one unit of work.
pub trait ContextSource {
    /// Raw value stored under `key`, if any
    fn value(&self, key: &str) -> Option<&Value>;
}

impl<S: BuildHasher> ContextSource for HashMap<String, Value, S> {
    fn value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl ContextSource for Map<String, Value> {
    fn value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl ContextSource for Value {
    fn value(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl<C: ContextSource + ?Sized> ContextSource for &C {
    fn value(&self, key: &str) -> Option<&Value> {
        (**self).value(key)
    }
}

/// Owned context store.
///
/// ```
/// use fieldlog::Context;
///
/// let ctx = Context::new()
///     .with_str("Method", "GET")
///     .with_int("StatusCode", 200);
/// assert_eq!(fieldlog::get_string(&ctx, "Method"), Some("GET"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: Map<String, Value>,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a string value
    pub fn with_str(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), Value::String(value.into()));
        self
    }

    /// Store an integer value
    pub fn with_int(mut self, key: impl Into<String>, value: i64) -> Self {
        self.values.insert(key.into(), Value::from(value));
        self
    }

    /// Store an arbitrary value, replacing any previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the context holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ContextSource for Context {
    fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

impl From<Map<String, Value>> for Context {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

/// Non-empty string stored under `key`.
pub fn get_string<'a, C: ContextSource + ?Sized>(ctx: &'a C, key: &str) -> Option<&'a str> {
    match ctx.value(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Integer stored under `key`. Zero counts as present; floats do not.
pub fn get_int<C: ContextSource + ?Sized>(ctx: &C, key: &str) -> Option<i64> {
    match ctx.value(key) {
        Some(Value::Number(n)) => n.as_i64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_present() {
        let ctx = Context::new().with_str(keys::METHOD, "GET");
        assert_eq!(get_string(&ctx, keys::METHOD), Some("GET"));
    }

    #[test]
    fn test_empty_string_is_absent() {
        let ctx = Context::new().with_str(keys::REQ_HEADER, "");
        assert_eq!(get_string(&ctx, keys::REQ_HEADER), None);
    }

    #[test]
    fn test_missing_key_is_absent() {
        let ctx = Context::new();
        assert_eq!(get_string(&ctx, keys::TAG), None);
        assert_eq!(get_int(&ctx, keys::STATUS_CODE), None);
    }

    #[test]
    fn test_zero_is_present() {
        let ctx = Context::new().with_int(keys::STATUS_CODE, 0);
        assert_eq!(get_int(&ctx, keys::STATUS_CODE), Some(0));
    }

    #[test]
    fn test_type_mismatch_is_absent() {
        let others = [
            json!(true),
            json!(null),
            json!(1.5),
            json!([1, 2]),
            json!({"a": 1}),
        ];
        for other in others {
            let mut ctx = Context::new();
            ctx.insert(keys::STATUS_CODE, other.clone());
            ctx.insert(keys::METHOD, other.clone());
            assert_eq!(get_int(&ctx, keys::STATUS_CODE), None, "{other}");
            assert_eq!(get_string(&ctx, keys::METHOD), None, "{other}");
        }
    }

    #[test]
    fn test_string_and_int_do_not_cross() {
        let ctx = Context::new()
            .with_str(keys::STATUS_CODE, "200")
            .with_int(keys::METHOD, 7);
        assert_eq!(get_int(&ctx, keys::STATUS_CODE), None);
        assert_eq!(get_string(&ctx, keys::METHOD), None);
    }

    #[test]
    fn test_json_object_source() {
        let ctx = json!({"Tag": "billing", "StatusCode": 404});
        assert_eq!(get_string(&ctx, keys::TAG), Some("billing"));
        assert_eq!(get_int(&ctx, keys::STATUS_CODE), Some(404));
        assert_eq!(get_string(&json!("not an object"), keys::TAG), None);
    }

    #[test]
    fn test_hashmap_source() {
        let mut ctx: HashMap<String, Value> = HashMap::new();
        ctx.insert(keys::REQ_ID.to_string(), json!("r-1"));
        assert_eq!(get_string(&ctx, keys::REQ_ID), Some("r-1"));
    }
}
