//! Tags phase: list, create. The API exposes no tag update endpoint.

use super::{banner, failure_reason, item_count};
use crate::ledger::ResourceKind;
use crate::model::{Created, TagRequest};
use crate::runner::RunContext;

pub async fn run(cx: &mut RunContext) {
    banner("Testing Tags CRUD");

    let result = cx.client.get("/api/tags").await;
    match &result {
        Ok(response) if response.status == 200 => {
            cx.recorder.record(
                "Get Tags",
                true,
                format!("Retrieved {} tags", item_count(response)),
                None,
            );
        }
        _ => {
            cx.recorder.record(
                "Get Tags",
                false,
                format!("Failed to get tags: {}", failure_reason(&result)),
                None,
            );
        }
    }

    let create = TagRequest { name: "Test Tag" };
    let result = cx.client.post_json("/api/tags", Some(&create)).await;
    match &result {
        Ok(response) if response.status == 201 => match response.decode::<Created>() {
            Ok(created) => {
                cx.ledger.register(ResourceKind::Tag, created.id);
                cx.recorder
                    .record("Create Tag", true, "Successfully created tag", None);
            }
            Err(_) => {
                cx.recorder.record(
                    "Create Tag",
                    false,
                    "Missing id in response",
                    Some(response.body.clone()),
                );
            }
        },
        _ => {
            cx.recorder.record(
                "Create Tag",
                false,
                format!("Failed to create tag: {}", failure_reason(&result)),
                None,
            );
        }
    }
}
