//! Health phase: one GET against the status endpoint.

use crate::model::HealthResponse;
use crate::runner::RunContext;

/// Check `/api/health`. Returns `false` when the backend cannot be trusted,
/// which aborts the whole run before authentication is attempted.
pub async fn run(cx: &mut RunContext) -> bool {
    let result = cx.client.get("/api/health").await;
    match &result {
        Ok(response) if response.status == 200 => {
            match response.decode::<HealthResponse>() {
                Ok(health) if health.status == "ok" => {
                    cx.recorder
                        .record("Health Check", true, "Backend is running", None);
                    true
                }
                _ => {
                    cx.recorder.record(
                        "Health Check",
                        false,
                        "Unexpected response",
                        Some(response.body.clone()),
                    );
                    false
                }
            }
        }
        Ok(response) => {
            cx.recorder.record(
                "Health Check",
                false,
                format!("Request failed: {}", response.status),
                None,
            );
            false
        }
        Err(_) => {
            cx.recorder
                .record("Health Check", false, "Request failed: No response", None);
            false
        }
    }
}
