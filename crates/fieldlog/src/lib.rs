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
//! Fieldlog
//!
//! A small leveled logging facade over the `tracing` ecosystem, with
//! request, response and trace-context field enrichment.
//!
//! # Features
//!
//! - **Leveled emission**: `debugf`, `infof`, `warnf` (severity 400),
//!   `errorf` (severity 500) and the process-terminating `fatalf` (severity 800)
//! - **Derived loggers**: `apply_request`, `apply_response`, `apply_context`
//!   and `err` return new loggers; the parent never changes
//! - **Two layouts**: JSON lines, or a console layout with upper-cased level
//!   and field values
//! - **Caller annotation**: every record names the `file:line` it came from,
//!   optionally skipping further frames past application logging helpers
//!
//! # Example
//!
//! ```no_run
//! use fieldlog::{infof, keys, Context, Logger, Verbosity};
//!
//! let root = Logger::new(Verbosity::Info, None);
//!
//! let ctx = Context::new()
//!     .with_str(keys::METHOD, "GET")
//!     .with_str(keys::REQUEST_URI, "/orders/7")
//!     .with_int(keys::STATUS_CODE, 200);
//!
//! let log = root.apply_request(&ctx).apply_response(&ctx);
//! infof!(log, "served in {}ms", 12);
//! ```

pub mod builder;
mod caller;
pub mod capture;
pub mod config;
pub mod console;
pub mod context;
pub mod fields;
pub mod initialization;
pub mod json;
pub mod logger;
pub mod macros;
pub mod writer;

pub use capture::CaptureBuffer;
pub use config::{LogConfig, LogError, LogFormat, LogOutput, Verbosity};
pub use console::ConsoleFormat;
pub use context::{get_int, get_string, keys, Context, ContextSource};
pub use fields::{names, FieldSet, FieldValue};
pub use json::JsonFormat;
pub use initialization::{
    init_logger, init_logger_from_env, resolve_skip_frame_count, DEFAULT_SKIP_FRAME_COUNT,
};
pub use logger::{Logger, Severity, StructuredLog};
pub use writer::{Writer, WriterConfig};
