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
//! Leveled emission and error attachment.
//!
//! A [`Logger`] is an immutable value: a shared [`Writer`] plus the
//! [`FieldSet`] accumulated so far. Builder methods return new loggers and
//! never touch the one they were called on.

use crate::caller;
use crate::config::Verbosity;
use crate::context::ContextSource;
use crate::fields::{FieldSet, SEVERITY_ERROR, SEVERITY_FATAL, SEVERITY_WARN};
use crate::writer::Writer;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::Arc;
use tracing::Level;

/// Emits one event carrying every attached field plus the per-record
/// `severity` and `caller`. Absent (`None`) values are not recorded.
macro_rules! emit_event {
    ($level:expr, $fields:expr, $severity:expr, $caller:expr, $args:expr) => {
        ::tracing::event!(
            target: "fieldlog",
            $level,
            method = $fields.method.as_deref(),
            req_uri = $fields.req_uri.as_deref(),
            req_header = $fields.req_header.as_deref(),
            req_body = $fields.req_body.as_deref(),
            time = $fields.time.as_deref(),
            resp_header = $fields.resp_header.as_deref(),
            resp_body = $fields.resp_body.as_deref(),
            status_code = $fields.status_code,
            tag = $fields.tag.as_deref(),
            document_id = $fields.document_id.as_deref(),
            req_id = $fields.req_id.as_deref(),
            x_req_id = $fields.x_req_id.as_deref(),
            error = $fields.error.as_deref(),
            severity = $severity,
            caller = $caller,
            "{}",
            $args
        )
    };
}

/// Record severity, including the process-terminating `Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Diagnostic detail
    Debug,
    /// Normal operation
    Info,
    /// Recoverable problem, code 400
    Warn,
    /// Failed operation, code 500
    Error,
    /// Unrecoverable, code 800; the process exits after emission
    Fatal,
}

impl Severity {
    /// Numeric code attached to the record, if any
    pub fn code(self) -> Option<i64> {
        match self {
            Severity::Debug | Severity::Info => None,
            Severity::Warn => Some(SEVERITY_WARN),
            Severity::Error => Some(SEVERITY_ERROR),
            Severity::Fatal => Some(SEVERITY_FATAL),
        }
    }

    /// `tracing` level the record is emitted at. There is no level above
    /// `ERROR`, so fatal records are told apart by their severity code.
    pub fn level(self) -> Level {
        match self {
            Severity::Debug => Level::DEBUG,
            Severity::Info => Level::INFO,
            Severity::Warn => Level::WARN,
            Severity::Error | Severity::Fatal => Level::ERROR,
        }
    }
}

/// Structured logger carrying request, response and trace-context fields.
#[derive(Debug, Clone)]
pub struct Logger {
    writer: Arc<Writer>,
    fields: FieldSet,
}

impl Logger {
    /// Root logger over `writer` with an empty field set
    pub fn from_writer(writer: Writer) -> Self {
        Self {
            writer: Arc::new(writer),
            fields: FieldSet::default(),
        }
    }

    pub(crate) fn derive(&self, fields: FieldSet) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
            fields,
        }
    }

    /// Fields attached to this logger
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Threshold of the underlying writer
    pub fn level(&self) -> Verbosity {
        self.writer.threshold()
    }

    /// Resolved caller-frame-skip depth
    pub fn caller_depth(&self) -> usize {
        self.writer.caller_depth()
    }

    /// The underlying writer, shared with every derived logger
    pub fn writer(&self) -> &Writer {
        &self.writer
    }

    /// New logger whose fields also carry `error`, the display text of `err`.
    /// Emits nothing.
    pub fn err<E: fmt::Display + ?Sized>(&self, err: &E) -> Logger {
        let mut fields = self.fields.clone();
        fields.error = Some(Arc::from(err.to_string()));
        self.derive(fields)
    }

    /// Emit a debug record
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Debug, args);
    }

    /// Emit an info record
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Info, args);
    }

    /// Emit a warn record with `severity=400`
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Warn, args);
    }

    /// Emit an error record with `severity=500`
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Error, args);
    }

    /// Emit a record with `severity=800` at the highest level, then exit the
    /// process with status 1. Never returns.
    ///
    /// Both layouts tag the record `FATAL`; the underlying `tracing` event is
    /// an `ERROR`.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit(Severity::Fatal, args);
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(1)
    }

    /// Emit one record at `severity` through the writer.
    #[track_caller]
    pub fn log(&self, severity: Severity, args: fmt::Arguments<'_>) {
        if severity == Severity::Fatal {
            self.fatalf(args);
        }
        self.emit(severity, args);
    }

    #[track_caller]
    fn emit(&self, severity: Severity, args: fmt::Arguments<'_>) {
        if severity.level() > self.writer.threshold().level_filter() {
            return;
        }

        let location = Location::caller();
        let caller = self
            .writer
            .include_caller()
            .then(|| caller::annotate(location, self.writer.caller_depth()));
        let caller = caller.as_deref();
        let code = severity.code();
        let fields = &self.fields;

        self.writer.scoped(|| match severity {
            Severity::Debug => emit_event!(Level::DEBUG, fields, code, caller, args),
            Severity::Info => emit_event!(Level::INFO, fields, code, caller, args),
            Severity::Warn => emit_event!(Level::WARN, fields, code, caller, args),
            Severity::Error | Severity::Fatal => {
                emit_event!(Level::ERROR, fields, code, caller, args)
            }
        });
    }
}

/// Logging surface application code depends on.
pub trait StructuredLog: Sized {
    /// Attach trace-context fields
    fn apply_context(&self, ctx: &dyn ContextSource) -> Self;
    /// Attach request fields
    fn apply_request(&self, ctx: &dyn ContextSource) -> Self;
    /// Attach response fields
    fn apply_response(&self, ctx: &dyn ContextSource) -> Self;
    /// Attach an error description
    fn err(&self, err: &dyn fmt::Display) -> Self;
    /// Emit a debug record
    fn debugf(&self, args: fmt::Arguments<'_>);
    /// Emit an info record
    fn infof(&self, args: fmt::Arguments<'_>);
    /// Emit a warn record
    fn warnf(&self, args: fmt::Arguments<'_>);
    /// Emit an error record
    fn errorf(&self, args: fmt::Arguments<'_>);
    /// Emit a fatal record and exit the process
    fn fatalf(&self, args: fmt::Arguments<'_>) -> !;
}

impl StructuredLog for Logger {
    fn apply_context(&self, ctx: &dyn ContextSource) -> Self {
        Logger::apply_context(self, ctx)
    }

    fn apply_request(&self, ctx: &dyn ContextSource) -> Self {
        Logger::apply_request(self, ctx)
    }

    fn apply_response(&self, ctx: &dyn ContextSource) -> Self {
        Logger::apply_response(self, ctx)
    }

    fn err(&self, err: &dyn fmt::Display) -> Self {
        Logger::err(self, err)
    }

    #[track_caller]
    fn debugf(&self, args: fmt::Arguments<'_>) {
        Logger::debugf(self, args);
    }

    #[track_caller]
    fn infof(&self, args: fmt::Arguments<'_>) {
        Logger::infof(self, args);
    }

    #[track_caller]
    fn warnf(&self, args: fmt::Arguments<'_>) {
        Logger::warnf(self, args);
    }

    #[track_caller]
    fn errorf(&self, args: fmt::Arguments<'_>) {
        Logger::errorf(self, args);
    }

    #[track_caller]
    fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        Logger::fatalf(self, args)
    }
}
