//! # probe-core
//!
//! Test orchestration engine for `cmsprobe`, an external integration-test
//! harness that exercises a CMS REST API end to end against a live server.
//!
//! The engine sequences dependent operations (a comment needs a blog, a blog
//! benefits from a category and tags), tracks every resource it creates so it
//! can be torn down afterward, aggregates pass/fail outcomes, and reports a
//! summary:
//! - [`ApiClient`] issues one HTTP call per step, no retries
//! - [`ResourceLedger`] threads created identifiers between phases and
//!   drives teardown
//! - [`Recorder`] is the append-only log of step outcomes
//! - [`Runner`] owns the phase order and the fatal-abort rules
//!
//! Everything is strictly sequential: a request is fully resolved before the
//! next begins, so the run context needs no locking.

pub mod client;
pub mod error;
pub mod ledger;
pub mod model;
pub mod recorder;
pub mod runner;
pub mod suites;

pub use client::{ApiClient, ApiResponse, Payload, UploadFile};
pub use error::{ProbeError, TransportError};
pub use ledger::{ResourceKind, ResourceLedger};
pub use model::ResourceId;
pub use recorder::{Outcome, Recorder, Summary};
pub use runner::{RunContext, RunReport, RunState, Runner};
