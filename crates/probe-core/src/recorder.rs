//! Append-only log of step outcomes.

use serde_json::Value;

/// One recorded test step: created exactly once, never mutated.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Step name as printed in the summary (e.g. `Create Category`).
    pub name: String,
    /// Whether the step met its expectation.
    pub passed: bool,
    /// Human-readable result line.
    pub message: String,
    /// Optional diagnostic payload (usually the response body).
    pub details: Option<Value>,
}

/// Aggregated counts plus the failures in record order.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Steps recorded.
    pub total: usize,
    /// Steps that passed.
    pub passed: usize,
    /// Steps that failed.
    pub failed: usize,
    /// Every failed outcome, in execution order.
    pub failures: Vec<Outcome>,
}

impl Summary {
    /// Pass rate in percent; 0 when nothing was recorded.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.passed as f64 / self.total as f64 * 100.0
    }
}

/// Source of truth for the final summary.
///
/// Recording never blocks and never fails; each step prints its pass/fail
/// line as it lands, mirroring the run's execution order.
#[derive(Debug, Default)]
pub struct Recorder {
    outcomes: Vec<Outcome>,
}

impl Recorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one outcome and print its console line.
    pub fn record(
        &mut self,
        name: impl Into<String>,
        passed: bool,
        message: impl Into<String>,
        details: Option<Value>,
    ) {
        let outcome = Outcome {
            name: name.into(),
            passed,
            message: message.into(),
            details,
        };
        let status = if outcome.passed { "PASS" } else { "FAIL" };
        println!("{status}: {} - {}", outcome.name, outcome.message);
        if let Some(details) = &outcome.details {
            if !outcome.passed {
                println!("   Details: {details}");
            }
        }
        self.outcomes.push(outcome);
    }

    /// All outcomes in execution order.
    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Compute the summary. Callable any number of times.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let passed = self.outcomes.iter().filter(|o| o.passed).count();
        Summary {
            total: self.outcomes.len(),
            passed,
            failed: self.outcomes.len() - passed,
            failures: self
                .outcomes
                .iter()
                .filter(|o| !o.passed)
                .cloned()
                .collect(),
        }
    }
}
