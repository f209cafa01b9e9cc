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
//! Request lifecycle example
//!
//! Demonstrates derived loggers carried through concurrent request handlers:
//! trace-context fields first, request fields on arrival and response fields
//! once the handler finishes.
//!
//! Run with: FIELDLOG_FORMAT=console cargo run --example request_lifecycle

use fieldlog::{errorf, infof, init_logger_from_env, keys, Context, Logger};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let root = init_logger_from_env()?;
    infof!(root, "Starting request lifecycle example");

    let first = tokio::spawn(handle(root.clone(), 1, "/documents/1"));
    let second = tokio::spawn(handle(root.clone(), 2, "/documents/missing"));
    let (first, second) = tokio::join!(first, second);
    first?;
    second?;

    tracing::info!("Plain tracing events reach the same writer");
    Ok(())
}

async fn handle(root: Logger, id: u32, uri: &'static str) {
    let trace = Context::new()
        .with_str(keys::REQ_ID, format!("req-{id}"))
        .with_str(keys::TAG, "documents");
    let request = Context::new()
        .with_str(keys::METHOD, "GET")
        .with_str(keys::REQUEST_URI, uri)
        .with_str(keys::TIME, chrono::Utc::now().to_rfc3339());

    let log = root.apply_context(&trace).apply_request(&request);
    infof!(log, "Request received");

    match lookup(uri).await {
        Ok(body) => {
            let response = Context::new()
                .with_str(keys::RESP_BODY, body)
                .with_int(keys::STATUS_CODE, 200);
            infof!(log.apply_response(&response), "Request served");
        }
        Err(err) => {
            let response = Context::new().with_int(keys::STATUS_CODE, 404);
            errorf!(log.apply_response(&response).err(&err), "Request failed");
        }
    }
}

async fn lookup(uri: &str) -> anyhow::Result<String> {
    tokio::time::sleep(Duration::from_millis(10)).await;
    match uri.rsplit('/').next() {
        Some(id) if id.chars().all(|c| c.is_ascii_digit()) => Ok(format!("{{\"id\":{id}}}")),
        _ => anyhow::bail!("no document at {uri}"),
    }
}
