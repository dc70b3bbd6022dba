//! Harness error types.

use thiserror::Error;

/// Errors that can occur while setting up a run.
///
/// Step-level failures are never surfaced through this type; they are
/// recorded as outcomes and the run continues.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The configured base address is not usable.
    #[error("invalid base address '{address}': {reason}")]
    InvalidBaseAddress {
        /// The address as configured.
        address: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// A request that produced no response at all (connection refused, DNS
/// failure, timeout).
///
/// Carried inside step outcomes rather than propagated: the harness records
/// the step as failed with a `No response` message and moves on.
#[derive(Debug, Error)]
#[error("no response: {0}")]
pub struct TransportError(#[from] pub reqwest::Error);
