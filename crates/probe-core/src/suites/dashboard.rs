//! Dashboard phase: one aggregate-statistics read, no chaining.

use super::{banner, failure_reason};
use crate::runner::RunContext;

pub async fn run(cx: &mut RunContext) {
    banner("Testing Dashboard");

    let result = cx.client.get("/api/dashboard/stats").await;
    match &result {
        Ok(response) if response.status == 200 => {
            cx.recorder.record(
                "Get Dashboard Stats",
                true,
                "Successfully retrieved dashboard stats",
                None,
            );
        }
        _ => {
            cx.recorder.record(
                "Get Dashboard Stats",
                false,
                format!("Failed to get dashboard stats: {}", failure_reason(&result)),
                None,
            );
        }
    }
}
