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
//! Caller annotation for emitted records.
//!
//! The default depth names the application call site reported by
//! `#[track_caller]`. Every level of depth beyond the default moves the
//! annotation one frame further up the stack, past application helpers that
//! wrap the logger.

use crate::initialization::DEFAULT_SKIP_FRAME_COUNT;
use backtrace::Backtrace;
use std::panic::Location;

/// Render the `file:line` a record is attributed to.
///
/// Depths at or below the default resolve to `location`. So does a stack
/// without line information, or one where `location` cannot be found.
pub(crate) fn annotate(location: &Location<'_>, depth: usize) -> String {
    let extra = depth.saturating_sub(DEFAULT_SKIP_FRAME_COUNT);
    if extra > 0 {
        if let Some(site) = walk_up(location, extra) {
            return site;
        }
    }
    format!("{}:{}", location.file(), location.line())
}

/// Find `location` on the current stack and step `extra` frames above it.
/// Stops at the outermost frame with line information.
fn walk_up(location: &Location<'_>, extra: usize) -> Option<String> {
    let trace = Backtrace::new();
    let mut sites = trace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .filter_map(|symbol| Some((symbol.filename()?, symbol.lineno()?)));

    sites.find(|(file, line)| *line == location.line() && file.ends_with(location.file()))?;

    let (file, line) = sites.take(extra).last()?;
    Some(format!("{}:{line}", file.display()))
}
