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
//! Derived loggers enriched from an ambient context.
//!
//! Each builder reads a fixed list of context keys and attaches the ones that
//! are present. Absent keys, empty strings and type mismatches are skipped.

use crate::context::{get_int, get_string, keys, ContextSource};
use crate::logger::Logger;
use std::sync::Arc;

fn attach_str<C: ContextSource + ?Sized>(slot: &mut Option<Arc<str>>, ctx: &C, key: &str) {
    if let Some(value) = get_string(ctx, key) {
        *slot = Some(Arc::from(value));
    }
}

impl Logger {
    /// Attach `method`, `req_uri`, `req_header`, `req_body` and `time`.
    pub fn apply_request<C: ContextSource + ?Sized>(&self, ctx: &C) -> Logger {
        let mut fields = self.fields().clone();
        attach_str(&mut fields.method, ctx, keys::METHOD);
        attach_str(&mut fields.req_uri, ctx, keys::REQUEST_URI);
        attach_str(&mut fields.req_header, ctx, keys::REQ_HEADER);
        attach_str(&mut fields.req_body, ctx, keys::REQ_BODY);
        attach_str(&mut fields.time, ctx, keys::TIME);
        self.derive(fields)
    }

    /// Attach `resp_header`, `resp_body` and `status_code`.
    pub fn apply_response<C: ContextSource + ?Sized>(&self, ctx: &C) -> Logger {
        let mut fields = self.fields().clone();
        attach_str(&mut fields.resp_header, ctx, keys::RESP_HEADER);
        attach_str(&mut fields.resp_body, ctx, keys::RESP_BODY);
        if let Some(code) = get_int(ctx, keys::STATUS_CODE) {
            fields.status_code = Some(code);
        }
        self.derive(fields)
    }

    /// Attach `tag`, `document_id`, `req_id` and `x_req_id`.
    pub fn apply_context<C: ContextSource + ?Sized>(&self, ctx: &C) -> Logger {
        let mut fields = self.fields().clone();
        attach_str(&mut fields.tag, ctx, keys::TAG);
        attach_str(&mut fields.document_id, ctx, keys::DOCUMENT_ID);
        attach_str(&mut fields.req_id, ctx, keys::REQ_ID);
        attach_str(&mut fields.x_req_id, ctx, keys::X_REQ_ID);
        self.derive(fields)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::config::{LogOutput, Verbosity};
    use crate::context::{keys, Context};
    use crate::fields::{names, FieldValue};
    use crate::writer::{Writer, WriterConfig};
    use crate::{CaptureBuffer, Logger};
    use serde_json::{json, Value};

    fn root() -> (Logger, CaptureBuffer) {
        let buffer = CaptureBuffer::new();
        let config = WriterConfig::json(3)
            .with_output(LogOutput::Capture(buffer.clone()))
            .with_timestamps(false);
        (Logger::from_writer(Writer::new(config, Verbosity::Debug)), buffer)
    }

    #[test]
    fn test_request_fields_skip_empty() {
        let (logger, buffer) = root();
        let ctx = Context::new()
            .with_str(keys::METHOD, "GET")
            .with_str(keys::REQUEST_URI, "/x")
            .with_str(keys::REQ_HEADER, "");

        logger.apply_request(&ctx).infof(format_args!("served"));

        let record: Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert_eq!(record["method"], "GET");
        assert_eq!(record["req_uri"], "/x");
        assert!(record.get(names::REQ_HEADER).is_none());
        assert!(record.get(names::REQ_BODY).is_none());
    }

    #[test]
    fn test_time_is_passed_through() {
        let (logger, _) = root();
        let ctx = Context::new().with_str(keys::TIME, "yesterday-ish");
        let derived = logger.apply_request(&ctx);
        assert_eq!(
            derived.fields().get(names::TIME),
            Some(FieldValue::Str("yesterday-ish"))
        );
    }

    #[test]
    fn test_status_code_presence() {
        let (logger, buffer) = root();

        let with_code = Context::new().with_int(keys::STATUS_CODE, 200);
        logger.apply_response(&with_code).infof(format_args!("done"));

        let without_code = Context::new().with_str(keys::RESP_BODY, "ok");
        logger.apply_response(&without_code).infof(format_args!("done"));

        let lines = buffer.lines();
        let first: Value = serde_json::from_str(&lines[0]).unwrap();
        let second: Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(first["status_code"], 200);
        assert!(second.get(names::STATUS_CODE).is_none());
        assert_eq!(second["resp_body"], "ok");
    }

    #[test]
    fn test_context_fields() {
        let (logger, _) = root();
        let ctx = json!({
            "Tag": "billing",
            "DocumentId": "doc-9",
            "ReqId": "r-1",
            "XReqId": "",
        });

        let derived = logger.apply_context(&ctx);
        let attached: Vec<_> = derived.fields().iter().map(|(name, _)| name).collect();
        assert_eq!(attached, vec![names::TAG, names::DOCUMENT_ID, names::REQ_ID]);
    }

    #[test]
    fn test_parent_is_not_modified() {
        let (logger, _) = root();
        let ctx = Context::new()
            .with_str(keys::METHOD, "POST")
            .with_int(keys::STATUS_CODE, 201)
            .with_str(keys::TAG, "t");

        let _request = logger.apply_request(&ctx);
        let _response = logger.apply_response(&ctx);
        let _context = logger.apply_context(&ctx);
        let _failed = logger.err("nope");

        assert!(logger.fields().is_empty());
    }

    #[test]
    fn test_request_then_response_is_a_union() {
        let (logger, buffer) = root();
        let request = Context::new()
            .with_str(keys::METHOD, "PUT")
            .with_str(keys::REQ_BODY, "{}");
        let response = Context::new()
            .with_int(keys::STATUS_CODE, 204)
            .with_str(keys::RESP_HEADER, "x-a: 1");

        let derived = logger.apply_request(&request).apply_response(&response);
        assert_eq!(derived.fields().len(), 4);

        derived.infof(format_args!("complete"));
        let record: Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert_eq!(record["method"], "PUT");
        assert_eq!(record["req_body"], "{}");
        assert_eq!(record["status_code"], 204);
        assert_eq!(record["resp_header"], "x-a: 1");
    }

    #[test]
    fn test_later_value_replaces_in_child_only() {
        let (logger, _) = root();
        let first = logger.apply_context(&Context::new().with_str(keys::TAG, "a"));
        let second = first.apply_context(&Context::new().with_str(keys::TAG, "b"));

        assert_eq!(first.fields().get(names::TAG), Some(FieldValue::Str("a")));
        assert_eq!(second.fields().get(names::TAG), Some(FieldValue::Str("b")));
    }

    #[test]
    fn test_missing_value_keeps_inherited_field() {
        let (logger, _) = root();
        let tagged = logger.apply_context(&Context::new().with_str(keys::TAG, "keep"));
        let again = tagged.apply_context(&Context::new().with_str(keys::TAG, ""));
        assert_eq!(again.fields().get(names::TAG), Some(FieldValue::Str("keep")));
    }

    #[test]
    fn test_derived_loggers_share_writer() {
        let (logger, _) = root();
        let derived = logger.apply_request(&Context::new());
        assert!(std::ptr::eq(logger.writer(), derived.writer()));
    }
}
