//! Categories phase: list, create, update.

use super::{banner, failure_reason, item_count};
use crate::ledger::ResourceKind;
use crate::model::{CategoryRequest, Created};
use crate::runner::RunContext;

pub async fn run(cx: &mut RunContext) {
    banner("Testing Categories CRUD");

    let result = cx.client.get("/api/categories").await;
    match &result {
        Ok(response) if response.status == 200 => {
            cx.recorder.record(
                "Get Categories",
                true,
                format!("Retrieved {} categories", item_count(response)),
                None,
            );
        }
        _ => {
            cx.recorder.record(
                "Get Categories",
                false,
                format!("Failed to get categories: {}", failure_reason(&result)),
                None,
            );
        }
    }

    let create = CategoryRequest {
        name: "Test Category",
        description: "Test category description",
    };
    let result = cx.client.post_json("/api/categories", Some(&create)).await;
    let created = match &result {
        Ok(response) if response.status == 201 => match response.decode::<Created>() {
            Ok(created) => {
                cx.ledger
                    .register(ResourceKind::Category, created.id.clone());
                cx.recorder
                    .record("Create Category", true, "Successfully created category", None);
                Some(created.id)
            }
            Err(_) => {
                cx.recorder.record(
                    "Create Category",
                    false,
                    "Missing id in response",
                    Some(response.body.clone()),
                );
                None
            }
        },
        _ => {
            cx.recorder.record(
                "Create Category",
                false,
                format!("Failed to create category: {}", failure_reason(&result)),
                None,
            );
            None
        }
    };

    let Some(id) = created else { return };
    let update = CategoryRequest {
        name: "Updated Test Category",
        description: "Updated description",
    };
    let result = cx
        .client
        .put_json(&format!("/api/categories/{id}"), &update)
        .await;
    match &result {
        Ok(response) if response.status == 200 => {
            cx.recorder
                .record("Update Category", true, "Successfully updated category", None);
        }
        _ => {
            cx.recorder.record(
                "Update Category",
                false,
                format!("Failed to update category: {}", failure_reason(&result)),
                None,
            );
        }
    }
}
