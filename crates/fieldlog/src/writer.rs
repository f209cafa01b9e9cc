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
//! The record writer behind every logger.
//!
//! A [`Writer`] owns a `tracing` dispatcher built from a level threshold and a
//! single formatting layer. Loggers never install it globally; each emission
//! runs with the writer's dispatcher as the scoped default.

use crate::config::{LogError, LogFormat, LogOutput, Verbosity};
use crate::console::ConsoleFormat;
use crate::json::JsonFormat;
use std::io;
use tracing::Dispatch;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, Registry};

/// Layout and destination of a writer.
///
/// Custom writer factories receive the resolved caller depth and return one
/// of these; the threshold is applied afterwards by initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct WriterConfig {
    /// Output layout
    pub format: LogFormat,
    /// Output destination
    pub output: LogOutput,
    /// Whether records carry a timestamp
    pub use_timestamps: bool,
    /// Whether records carry the caller location
    pub include_caller: bool,
    /// Resolved caller-frame-skip depth
    pub caller_depth: usize,
}

impl WriterConfig {
    /// Machine-readable JSON lines on stdout, with timestamp and caller
    pub fn json(caller_depth: usize) -> Self {
        Self {
            format: LogFormat::Json,
            output: LogOutput::Stdout,
            use_timestamps: true,
            include_caller: true,
            caller_depth,
        }
    }

    /// Human-oriented console lines on stdout, with RFC 3339 timestamps
    pub fn console(caller_depth: usize) -> Self {
        Self {
            format: LogFormat::Console,
            ..Self::json(caller_depth)
        }
    }

    /// Set the output destination
    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Enable or disable timestamps
    pub fn with_timestamps(mut self, use_timestamps: bool) -> Self {
        self.use_timestamps = use_timestamps;
        self
    }

    /// Enable or disable caller annotation
    pub fn with_caller(mut self, include_caller: bool) -> Self {
        self.include_caller = include_caller;
        self
    }
}

/// Shared record writer. Immutable once built.
#[derive(Debug)]
pub struct Writer {
    dispatch: Dispatch,
    threshold: Verbosity,
    config: WriterConfig,
}

impl Writer {
    /// Build a writer that drops records below `threshold`
    pub fn new(config: WriterConfig, threshold: Verbosity) -> Self {
        let dispatch = build_dispatch(&config, threshold);
        Self {
            dispatch,
            threshold,
            config,
        }
    }

    /// Minimum severity written
    pub fn threshold(&self) -> Verbosity {
        self.threshold
    }

    /// Resolved caller-frame-skip depth
    pub fn caller_depth(&self) -> usize {
        self.config.caller_depth
    }

    /// Whether records carry the caller location
    pub fn include_caller(&self) -> bool {
        self.config.include_caller
    }

    /// Configuration this writer was built from
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Run `f` with this writer's dispatcher as the current default.
    pub(crate) fn scoped<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Install this writer's dispatcher as the process-wide default, so
    /// plain `tracing` macros elsewhere reach the same sink.
    pub(crate) fn install_global(&self) -> Result<(), LogError> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|_| LogError::AlreadyInitialized)
    }
}

/// Sink for an output destination
fn make_writer(output: &LogOutput) -> BoxMakeWriter {
    match output {
        LogOutput::Stdout => BoxMakeWriter::new(io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(io::stderr),
        LogOutput::Capture(buffer) => BoxMakeWriter::new(buffer.clone()),
    }
}

fn build_dispatch(config: &WriterConfig, threshold: Verbosity) -> Dispatch {
    let registry = Registry::default().with(threshold.level_filter());

    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(make_writer(&config.output))
                .event_format(JsonFormat::new(config.use_timestamps));

            Dispatch::new(registry.with(layer))
        }
        LogFormat::Console => {
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(make_writer(&config.output))
                .event_format(ConsoleFormat::new(config.use_timestamps));

            Dispatch::new(registry.with(layer))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::capture::CaptureBuffer;

    #[test]
    fn test_json_writer_threshold() {
        let buffer = CaptureBuffer::new();
        let config = WriterConfig::json(3)
            .with_output(LogOutput::Capture(buffer.clone()))
            .with_timestamps(false);
        let writer = Writer::new(config, Verbosity::Warn);

        writer.scoped(|| {
            tracing::info!("dropped");
            tracing::warn!(tag = "t", "kept");
        });

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        let record: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(record["message"], "kept");
        assert_eq!(record["level"], "WARN");
        assert_eq!(record["tag"], "t");
        assert!(record.get("timestamp").is_none());
    }

    #[test]
    fn test_json_writer_timestamp() {
        let buffer = CaptureBuffer::new();
        let config = WriterConfig::json(3).with_output(LogOutput::Capture(buffer.clone()));
        let writer = Writer::new(config, Verbosity::Info);

        writer.scoped(|| tracing::info!("stamped"));

        let record: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert!(record["timestamp"].is_string());
    }

    #[test]
    fn test_console_writer() {
        let buffer = CaptureBuffer::new();
        let config = WriterConfig::console(3)
            .with_output(LogOutput::Capture(buffer.clone()))
            .with_timestamps(false);
        let writer = Writer::new(config, Verbosity::Debug);

        writer.scoped(|| tracing::debug!(req_id = "abc", "hi"));

        assert_eq!(buffer.contents(), "| DEBUG | hi req_id:ABC\n");
    }

    #[test]
    fn test_writer_accessors() {
        let writer = Writer::new(WriterConfig::console(9).with_caller(false), Verbosity::Error);
        assert_eq!(writer.threshold(), Verbosity::Error);
        assert_eq!(writer.caller_depth(), 9);
        assert!(!writer.include_caller());
        assert_eq!(writer.config().format, LogFormat::Console);
    }
}
