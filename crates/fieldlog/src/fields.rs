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
//! Field names and the per-logger field set.

use std::fmt;
use std::sync::Arc;

/// Names of the fields a logger can carry.
pub mod names {
    /// HTTP method
    pub const METHOD: &str = "method";
    /// Request URI
    pub const REQ_URI: &str = "req_uri";
    /// Request headers
    pub const REQ_HEADER: &str = "req_header";
    /// Request body
    pub const REQ_BODY: &str = "req_body";
    /// Request time
    pub const TIME: &str = "time";
    /// Response headers
    pub const RESP_HEADER: &str = "resp_header";
    /// Response body
    pub const RESP_BODY: &str = "resp_body";
    /// Response status code
    pub const STATUS_CODE: &str = "status_code";
    /// Tag
    pub const TAG: &str = "tag";
    /// Document identifier
    pub const DOCUMENT_ID: &str = "document_id";
    /// Request identifier
    pub const REQ_ID: &str = "req_id";
    /// Upstream request identifier
    pub const X_REQ_ID: &str = "x_req_id";
    /// Attached error description
    pub const ERROR: &str = "error";
    /// Numeric severity on warn/error/fatal records
    pub const SEVERITY: &str = "severity";
    /// Source location of the log call
    pub const CALLER: &str = "caller";
}

/// Severity code attached to warn records.
pub const SEVERITY_WARN: i64 = 400;
/// Severity code attached to error records.
pub const SEVERITY_ERROR: i64 = 500;
/// Severity code attached to fatal records.
pub const SEVERITY_FATAL: i64 = 800;

/// Borrowed value of one attached field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// String field
    Str(&'a str),
    /// Integer field
    Int(i64),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{n}"),
        }
    }
}

/// Fields carried forward by a logger and every logger derived from it.
///
/// Cloning is cheap: string values are shared `Arc<str>`s, so a derived set
/// shares every value it inherited from its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    pub(crate) method: Option<Arc<str>>,
    pub(crate) req_uri: Option<Arc<str>>,
    pub(crate) req_header: Option<Arc<str>>,
    pub(crate) req_body: Option<Arc<str>>,
    pub(crate) time: Option<Arc<str>>,
    pub(crate) resp_header: Option<Arc<str>>,
    pub(crate) resp_body: Option<Arc<str>>,
    pub(crate) status_code: Option<i64>,
    pub(crate) tag: Option<Arc<str>>,
    pub(crate) document_id: Option<Arc<str>>,
    pub(crate) req_id: Option<Arc<str>>,
    pub(crate) x_req_id: Option<Arc<str>>,
    pub(crate) error: Option<Arc<str>>,
}

impl FieldSet {
    /// Empty field set
    pub fn new() -> Self {
        Self::default()
    }

    /// Value attached under `name`
    pub fn get(&self, name: &str) -> Option<FieldValue<'_>> {
        self.iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Whether a field named `name` is attached
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Attached fields in attachment-table order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FieldValue<'_>)> + '_ {
        let strings = [
            (names::METHOD, &self.method),
            (names::REQ_URI, &self.req_uri),
            (names::REQ_HEADER, &self.req_header),
            (names::REQ_BODY, &self.req_body),
            (names::TIME, &self.time),
            (names::RESP_HEADER, &self.resp_header),
            (names::RESP_BODY, &self.resp_body),
        ];
        let context = [
            (names::TAG, &self.tag),
            (names::DOCUMENT_ID, &self.document_id),
            (names::REQ_ID, &self.req_id),
            (names::X_REQ_ID, &self.x_req_id),
            (names::ERROR, &self.error),
        ];

        strings
            .into_iter()
            .filter_map(str_entry)
            .chain(
                self.status_code
                    .map(|code| (names::STATUS_CODE, FieldValue::Int(code))),
            )
            .chain(context.into_iter().filter_map(str_entry))
    }

    /// Number of attached fields
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no field is attached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn str_entry<'a>(
    (name, value): (&'static str, &'a Option<Arc<str>>),
) -> Option<(&'static str, FieldValue<'a>)> {
    value.as_deref().map(|s| (name, FieldValue::Str(s)))
}
