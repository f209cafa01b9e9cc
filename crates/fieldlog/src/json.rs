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
//! Machine-readable JSON-lines layout.
//!
//! One object per record: `timestamp` (RFC 3339, UTC, optional), `level`,
//! `message` and every recorded field at the top level. Records carrying
//! `severity=800` are written with level `FATAL`.

use crate::fields::{names, SEVERITY_FATAL};
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Event formatter for [`LogFormat::Json`](crate::LogFormat::Json).
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat {
    use_timestamps: bool,
}

impl JsonFormat {
    /// Create a formatter, optionally stamping each record with the time
    pub fn new(use_timestamps: bool) -> Self {
        Self { use_timestamps }
    }
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<S, N> FormatEvent<S, N> for JsonFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut record = JsonRecord::default();
        event.record(&mut record);

        let mut object = Map::new();
        if self.use_timestamps {
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
            object.insert("timestamp".to_string(), Value::String(now));
        }

        let fatal = record.0.get(names::SEVERITY).and_then(Value::as_i64) == Some(SEVERITY_FATAL);
        let level = if fatal {
            "FATAL"
        } else {
            event.metadata().level().as_str()
        };
        object.insert("level".to_string(), Value::from(level));
        object.extend(record.0);

        let line = serde_json::to_string(&object).map_err(|_| fmt::Error)?;
        writeln!(writer, "{line}")
    }
}

/// Field visitor collecting recorded values as JSON.
#[derive(Debug, Default)]
struct JsonRecord(Map<String, Value>);

impl JsonRecord {
    fn put(&mut self, field: &Field, value: Value) {
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for JsonRecord {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, Value::String(format!("{value:?}")));
    }
}
