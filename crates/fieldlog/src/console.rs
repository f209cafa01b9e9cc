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
//! Human-oriented console layout.
//!
//! Renders one line per record:
//!
//! ```text
//! 2026-10-19T09:12:44+02:00 | WARN  | src/main.rs:42 > disk almost full method:GET severity:400
//! ```
//!
//! The level tag and field values are upper-cased, field names carry a colon
//! suffix and are sorted by name.

use crate::fields::{names, SEVERITY_FATAL};
use chrono::{Local, SecondsFormat};
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Event formatter for [`LogFormat::Console`](crate::LogFormat::Console).
#[derive(Debug, Clone, Copy)]
pub struct ConsoleFormat {
    use_timestamps: bool,
}

impl ConsoleFormat {
    /// Create a formatter, optionally prefixing each line with an RFC 3339 time
    pub fn new(use_timestamps: bool) -> Self {
        Self { use_timestamps }
    }
}

impl Default for ConsoleFormat {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<S, N> FormatEvent<S, N> for ConsoleFormat
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
        let mut record = ConsoleRecord::default();
        event.record(&mut record);

        if self.use_timestamps {
            write!(
                writer,
                "{} ",
                Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
            )?;
        }

        let level = if record.severity == Some(SEVERITY_FATAL) {
            "fatal"
        } else {
            event.metadata().level().as_str()
        };
        write!(writer, "{}", format_level(level))?;

        if let Some(caller) = &record.caller {
            write!(writer, " {caller} >")?;
        }
        write!(writer, " {}", record.message)?;

        for (name, value) in &record.fields {
            write!(writer, " {name}:{}", value.to_uppercase())?;
        }
        writeln!(writer)
    }
}

fn format_level(level: &str) -> String {
    format!("| {level:<6}|").to_uppercase()
}

/// Field visitor splitting message and caller from ordinary fields.
#[derive(Debug, Default)]
struct ConsoleRecord {
    message: String,
    caller: Option<String>,
    severity: Option<i64>,
    fields: BTreeMap<&'static str, String>,
}

impl Visit for ConsoleRecord {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            names::CALLER => self.caller = Some(value.to_string()),
            name => {
                self.fields.insert(name, value.to_string());
            }
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == names::SEVERITY {
            self.severity = Some(value);
        }
        self.fields.insert(field.name(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let mut rendered = String::new();
        let _ = write!(rendered, "{value:?}");
        self.record_str(field, &rendered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureBuffer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    fn capture<F: FnOnce()>(format: ConsoleFormat, f: F) -> String {
        let buffer = CaptureBuffer::new();
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(buffer.clone())
            .event_format(format);
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::with_default(subscriber, f);
        buffer.contents()
    }

    #[test]
    fn test_level_tag_is_padded_and_upper_cased() {
        assert_eq!(format_level("warn"), "| WARN  |");
        assert_eq!(format_level("INFO"), "| INFO  |");
        assert_eq!(format_level("fatal"), "| FATAL |");
    }

    #[test]
    fn test_console_line_layout() {
        let out = capture(ConsoleFormat::new(false), || {
            tracing::warn!(
                method = "get",
                severity = 400_i64,
                caller = "src/app.rs:9",
                "disk almost full"
            );
        });

        assert_eq!(
            out,
            "| WARN  | src/app.rs:9 > disk almost full method:GET severity:400\n"
        );
    }

    #[test]
    fn test_fatal_severity_is_tagged_fatal() {
        let out = capture(ConsoleFormat::new(false), || {
            tracing::error!(severity = 800_i64, "boom");
        });
        assert!(out.starts_with("| FATAL |"), "{out}");
    }

    #[test]
    fn test_timestamp_prefix() {
        let out = capture(ConsoleFormat::default(), || {
            tracing::info!("hello");
        });
        let (time, rest) = out.split_once(' ').unwrap_or_default();
        assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok(), "{out}");
        assert_eq!(rest, "| INFO  | hello\n");
    }
}
