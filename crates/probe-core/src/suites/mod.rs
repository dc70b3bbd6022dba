//! Phase suites: one fixed, linear script of steps per resource kind.
//!
//! Suites never branch on response content beyond extracting identifiers for
//! chaining. Each step records exactly one outcome; a non-conforming status
//! or a transport failure is recorded and execution moves to the next step,
//! never retried.

pub mod auth;
pub mod blogs;
pub mod categories;
pub mod comments;
pub mod contacts;
pub mod dashboard;
pub mod health;
pub mod tags;
pub mod teardown;

use crate::client::ApiResponse;
use crate::error::TransportError;

/// Failure text for a non-conforming step: the server's `error` field when a
/// response exists, `Unknown error` when the response carries none, and the
/// literal `No response` when the transport produced nothing. The summary
/// output depends on this format.
pub(crate) fn failure_reason(result: &Result<ApiResponse, TransportError>) -> String {
    match result {
        Ok(response) => response
            .error_message()
            .unwrap_or("Unknown error")
            .to_string(),
        Err(_) => "No response".to_string(),
    }
}

/// Count of items in a list response body, 0 when the body is not an array.
pub(crate) fn item_count(response: &ApiResponse) -> usize {
    response.body.as_array().map_or(0, Vec::len)
}

pub(crate) fn banner(title: &str) {
    println!("\n=== {title} ===");
}
