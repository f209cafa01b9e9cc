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
//! Formatting macros for the leveled logger methods.
//!
//! Each macro takes a logger expression followed by `format!`-style
//! arguments and forwards them as [`std::fmt::Arguments`].

/// Emit a debug record
///
/// # Example
///
/// ```ignore
/// debugf!(logger, "cache miss for {}", key);
/// ```
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

/// Emit an info record
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

/// Emit a warn record carrying `severity=400`
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(::std::format_args!($($arg)+))
    };
}

/// Emit an error record carrying `severity=500`
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}

/// Emit a fatal record carrying `severity=800` and exit with status 1
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::{CaptureBuffer, LogOutput, Logger, Verbosity, WriterConfig};

    #[test]
    fn test_macros_format_and_locate() {
        let buffer = CaptureBuffer::new();
        let logger = Logger::with_writer_factory(Verbosity::Debug, None, |depth| {
            WriterConfig::json(depth).with_output(LogOutput::Capture(buffer.clone()))
        });

        let user = "ada";
        debugf!(logger, "looking up {user}");
        infof!(logger, "found {} rows", 3);
        warnf!(logger, "slow query");
        let line = line!() + 1;
        errorf!(logger, "gave up after {}ms", 250);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 4);
        let last: serde_json::Value = serde_json::from_str(&lines[3]).unwrap();
        assert_eq!(last["message"], "gave up after 250ms");
        assert_eq!(last["severity"], 500);
        let caller = last["caller"].as_str().unwrap();
        assert!(caller.ends_with(&format!("macros.rs:{line}")), "{caller}");

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["message"], "looking up ada");
    }
}
