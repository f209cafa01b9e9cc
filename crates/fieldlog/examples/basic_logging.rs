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
//! Basic logging example demonstrating both output layouts.
//!
//! Run with: cargo run --example basic_logging -- <format> [level]
//! Where <format> is one of: json, console

use fieldlog::{debugf, errorf, infof, warnf, LogFormat, Logger, Verbosity};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let format = args
        .get(1)
        .and_then(|s| s.parse::<LogFormat>().ok())
        .unwrap_or_default();
    let level = args
        .get(2)
        .map(|s| Verbosity::parse(s))
        .unwrap_or(Verbosity::Debug);

    let logger = match format {
        LogFormat::Json => Logger::new(level, None),
        LogFormat::Console => Logger::pretty(level, None),
    };

    infof!(logger, "Application started with {:?} output", format);

    debugf!(logger, "This is a debug message");
    infof!(logger, "This is an info message");
    warnf!(logger, "This is a warning message");

    let failure = std::io::Error::other("disk quota exceeded");
    errorf!(logger.err(&failure), "Could not persist {} records", 12);

    debugf!(logger, "Application shutting down");
}
