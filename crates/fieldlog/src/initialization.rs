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
//! Root logger construction.
//!
//! This module turns a verbosity level and an optional caller-frame-skip
//! count into a writer and returns the root [`Logger`] every other logger is
//! derived from.

use crate::config::{LogConfig, LogError, Verbosity};
use crate::logger::Logger;
use crate::writer::{Writer, WriterConfig};

/// Caller-frame-skip depth used when none (or a negative one) is given.
pub const DEFAULT_SKIP_FRAME_COUNT: usize = 3;

/// Resolve a requested skip-frame count. Non-negative values are used as
/// given; negative or absent values fall back to [`DEFAULT_SKIP_FRAME_COUNT`].
pub fn resolve_skip_frame_count(skip_frame_count: Option<i64>) -> usize {
    skip_frame_count
        .and_then(|count| usize::try_from(count).ok())
        .unwrap_or(DEFAULT_SKIP_FRAME_COUNT)
}

impl Logger {
    /// Root logger writing JSON lines to stdout with a timestamp and the
    /// caller location.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fieldlog::{infof, Logger, Verbosity};
    ///
    /// let logger = Logger::new(Verbosity::Info, None);
    /// infof!(logger, "listening on {}", 8080);
    /// ```
    pub fn new(level: Verbosity, skip_frame_count: Option<i64>) -> Self {
        Self::with_writer_factory(level, skip_frame_count, WriterConfig::json)
    }

    /// Root logger whose writer layout comes from `factory`, called once with
    /// the resolved caller depth.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fieldlog::{LogOutput, Logger, Verbosity, WriterConfig};
    ///
    /// let logger = Logger::with_writer_factory(Verbosity::Debug, Some(1), |depth| {
    ///     WriterConfig::console(depth).with_output(LogOutput::Stderr)
    /// });
    /// assert_eq!(logger.caller_depth(), 1);
    /// ```
    pub fn with_writer_factory<F>(
        level: Verbosity,
        skip_frame_count: Option<i64>,
        factory: F,
    ) -> Self
    where
        F: FnOnce(usize) -> WriterConfig,
    {
        let depth = resolve_skip_frame_count(skip_frame_count);
        let config = factory(depth);
        Self::from_writer(Writer::new(config, level))
    }

    /// Root logger using the human-oriented console layout on stdout.
    pub fn pretty(level: Verbosity, skip_frame_count: Option<i64>) -> Self {
        Self::with_writer_factory(level, skip_frame_count, WriterConfig::console)
    }

    /// Root logger built from a [`LogConfig`].
    pub fn from_config(config: &LogConfig) -> Self {
        Self::with_writer_factory(
            config.effective_level(),
            config.skip_frame_count,
            |depth| config.writer_config(depth),
        )
    }

    /// Route plain `tracing` macros anywhere in the process through this
    /// logger's writer. Fails if a global default is already installed.
    pub fn install_global(&self) -> Result<(), LogError> {
        self.writer().install_global()
    }
}

/// Build a root logger from `config` and install its writer as the global
/// `tracing` default.
///
/// # Example
///
/// ```ignore
/// use fieldlog::{init_logger, LogConfig, LogFormat};
///
/// fn main() -> Result<(), fieldlog::LogError> {
///     let logger = init_logger(&LogConfig::new().with_format(LogFormat::Console))?;
///     fieldlog::infof!(logger, "service started");
///     tracing::info!("plain tracing events share the same sink");
///     Ok(())
/// }
/// ```
pub fn init_logger(config: &LogConfig) -> Result<Logger, LogError> {
    let logger = Logger::from_config(config);
    logger.install_global()?;
    Ok(logger)
}

/// Same as [`init_logger`] with the configuration read from the
/// `FIELDLOG_*` environment variables.
pub fn init_logger_from_env() -> Result<Logger, LogError> {
    init_logger(&LogConfig::from_env()?)
}
