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
//! Configuration for the structured logger.
//!
//! This module provides the types that are resolved once at startup: the
//! verbosity threshold, the output layout, the output sink and the
//! caller-frame-skip depth.

use crate::capture::CaptureBuffer;
use crate::initialization::resolve_skip_frame_count;
use crate::writer::WriterConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Environment variable holding the verbosity level.
pub const ENV_LEVEL: &str = "FIELDLOG_LEVEL";
/// Environment variable holding the output format.
pub const ENV_FORMAT: &str = "FIELDLOG_FORMAT";
/// Environment variable holding the caller-frame-skip depth.
pub const ENV_SKIP_FRAMES: &str = "FIELDLOG_SKIP_FRAMES";

/// Errors that can occur while configuring or installing a logger
#[derive(Error, Debug)]
pub enum LogError {
    /// Unknown output format name
    #[error("Unknown format: {0}. Expected one of: json, console")]
    InvalidFormat(String),

    /// Skip-frame value that is not an integer
    #[error("Invalid skip frame count: {0}")]
    InvalidSkipFrames(String),

    /// A global default dispatcher is already installed
    #[error("A global logger has already been installed")]
    AlreadyInitialized,
}

/// Minimum severity a record needs in order to be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum Verbosity {
    /// Everything, including debug records
    Debug,
    /// Info and above
    #[default]
    Info,
    /// Warnings and errors
    Warn,
    /// Errors only
    Error,
}

impl Verbosity {
    /// Parse a level name. Unrecognized names resolve to [`Verbosity::Info`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "debug" => Verbosity::Debug,
            "warn" | "warning" => Verbosity::Warn,
            "error" => Verbosity::Error,
            _ => Verbosity::Info,
        }
    }

    /// Level filter applied by the writer
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Debug => LevelFilter::DEBUG,
            Verbosity::Info => LevelFilter::INFO,
            Verbosity::Warn => LevelFilter::WARN,
            Verbosity::Error => LevelFilter::ERROR,
        }
    }
}

impl From<String> for Verbosity {
    fn from(s: String) -> Self {
        Verbosity::parse(&s)
    }
}

impl From<tracing::Level> for Verbosity {
    fn from(level: tracing::Level) -> Self {
        if level == tracing::Level::DEBUG {
            Verbosity::Debug
        } else if level == tracing::Level::WARN {
            Verbosity::Warn
        } else if level == tracing::Level::ERROR {
            Verbosity::Error
        } else {
            Verbosity::Info
        }
    }
}

/// Output layout for records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,

    /// Human-oriented line with upper-cased level and field values
    Console,
}

impl FromStr for LogFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "console" | "pretty" => Ok(LogFormat::Console),
            _ => Err(LogError::InvalidFormat(s.to_string())),
        }
    }
}

/// Log output destination
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogOutput {
    /// Write to standard output
    #[default]
    Stdout,

    /// Write to standard error
    Stderr,

    /// Write into an in-memory buffer
    Capture(CaptureBuffer),
}

/// Configuration for a root logger
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output layout
    pub format: LogFormat,

    /// Level name (e.g. "debug", "warn").
    /// If None, it is taken from `FIELDLOG_LEVEL`
    pub level: Option<String>,

    /// Caller-frame-skip depth. Negative or None means the default
    pub skip_frame_count: Option<i64>,

    /// Whether records carry a timestamp
    pub use_timestamps: bool,

    /// Whether records carry the caller location
    pub include_caller: bool,

    /// Output destination (stdout by default)
    pub output: LogOutput,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Json,
            level: None,
            skip_frame_count: None,
            use_timestamps: true,
            include_caller: true,
            output: LogOutput::Stdout,
        }
    }
}

impl LogConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from `FIELDLOG_LEVEL`, `FIELDLOG_FORMAT` and
    /// `FIELDLOG_SKIP_FRAMES`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, LogError> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var(ENV_LEVEL) {
            config.level = Some(value);
        }
        if let Ok(value) = std::env::var(ENV_FORMAT) {
            config.format = value.parse()?;
        }
        if let Ok(value) = std::env::var(ENV_SKIP_FRAMES) {
            let parsed = value
                .trim()
                .parse::<i64>()
                .map_err(|_| LogError::InvalidSkipFrames(value.clone()))?;
            config.skip_frame_count = Some(parsed);
        }

        Ok(config)
    }

    /// Set the output format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Set the caller-frame-skip depth
    pub fn with_skip_frame_count(mut self, skip_frame_count: i64) -> Self {
        self.skip_frame_count = Some(skip_frame_count);
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

    /// Set the output destination
    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Get the effective level from config or environment
    pub fn effective_level(&self) -> Verbosity {
        self.level
            .clone()
            .or_else(|| std::env::var(ENV_LEVEL).ok())
            .map(|level| Verbosity::parse(&level))
            .unwrap_or_default()
    }

    /// Resolved caller-frame-skip depth
    pub fn caller_depth(&self) -> usize {
        resolve_skip_frame_count(self.skip_frame_count)
    }

    /// Writer configuration for the given resolved depth
    pub fn writer_config(&self, caller_depth: usize) -> WriterConfig {
        WriterConfig {
            format: self.format,
            output: self.output.clone(),
            use_timestamps: self.use_timestamps,
            include_caller: self.include_caller,
            caller_depth,
        }
    }
}
