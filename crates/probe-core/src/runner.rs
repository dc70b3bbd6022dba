//! Run controller: phase order, fatal aborts, and the final report.

use serde_json::Value;

use crate::client::ApiClient;
use crate::ledger::ResourceLedger;
use crate::recorder::{Outcome, Recorder, Summary};
use crate::suites;

/// Everything a phase suite touches, owned by the [`Runner`] for the run's
/// duration. No ambient or static state: a fresh context per run means runs
/// can be repeated in one process without bleeding into each other.
pub struct RunContext {
    /// HTTP client holding the base address and, after login, the token.
    pub client: ApiClient,
    /// Identifiers of everything created so far.
    pub ledger: ResourceLedger,
    /// Append-only outcome log.
    pub recorder: Recorder,
    /// Login email.
    pub email: String,
    /// Login password.
    pub password: String,
    /// Authenticated user's profile as returned by login; opaque.
    pub user: Option<Value>,
}

/// Where the run ended up.
///
/// `AbortedHealth` and `AbortedAuth` are terminal failure states: they skip
/// every remaining phase and teardown, and signal a non-zero exit. All other
/// runs execute teardown before summarizing, whatever the individual step
/// outcomes were.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    HealthChecked,
    Authenticated,
    PhasesComplete,
    TornDown,
    Summarized,
    AbortedHealth,
    AbortedAuth,
}

impl RunState {
    /// Whether the run ended in a fatal abort.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::AbortedHealth | Self::AbortedAuth)
    }
}

/// Final report handed to the caller for printing and exit-code selection.
#[derive(Debug)]
pub struct RunReport {
    /// Terminal state of the run.
    pub state: RunState,
    /// Aggregated counts and failures.
    pub summary: Summary,
    /// Every recorded outcome, in execution order.
    pub outcomes: Vec<Outcome>,
}

impl RunReport {
    /// Whether the process should exit non-zero.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.state.is_fatal()
    }
}

/// Drives one full run: health check, authentication, the resource phases,
/// teardown, summary.
pub struct Runner {
    cx: RunContext,
    state: RunState,
}

impl Runner {
    /// Build a runner around an already-configured client and credentials.
    #[must_use]
    pub fn new(client: ApiClient, email: String, password: String) -> Self {
        Self {
            cx: RunContext {
                client,
                ledger: ResourceLedger::new(),
                recorder: Recorder::new(),
                email,
                password,
                user: None,
            },
            state: RunState::NotStarted,
        }
    }

    /// Execute the run to completion and consume the runner.
    pub async fn run(mut self) -> RunReport {
        println!("Starting CMS backend API test run");
        println!("{}", "=".repeat(60));

        if !suites::health::run(&mut self.cx).await {
            tracing::error!("health check failed; aborting run");
            println!("Backend is not running. Exiting tests.");
            self.state = RunState::AbortedHealth;
            return self.finish();
        }
        self.state = RunState::HealthChecked;

        if !suites::auth::run(&mut self.cx).await {
            tracing::error!("authentication failed; aborting run");
            println!("Authentication failed. Cannot proceed with protected endpoints.");
            self.state = RunState::AbortedAuth;
            return self.finish();
        }
        self.state = RunState::Authenticated;

        suites::categories::run(&mut self.cx).await;
        suites::tags::run(&mut self.cx).await;
        suites::blogs::run(&mut self.cx).await;
        suites::comments::run(&mut self.cx).await;
        suites::contacts::run(&mut self.cx).await;
        suites::dashboard::run(&mut self.cx).await;
        self.state = RunState::PhasesComplete;

        suites::teardown::run(&mut self.cx).await;
        self.state = RunState::TornDown;

        self.finish()
    }

    fn finish(mut self) -> RunReport {
        let summary = self.cx.recorder.summary();
        if !self.state.is_fatal() {
            self.state = RunState::Summarized;
        }
        RunReport {
            state: self.state,
            summary,
            outcomes: self.cx.recorder.outcomes().to_vec(),
        }
    }
}
