//! Contacts phase: public create, admin list, read-state patch.

use super::{banner, failure_reason, item_count};
use crate::ledger::ResourceKind;
use crate::model::{ContactRequest, Created, StatusPatch};
use crate::runner::RunContext;

pub async fn run(cx: &mut RunContext) {
    banner("Testing Contacts CRUD");

    let create = ContactRequest {
        name: "Jane Smith",
        email: "jane@example.com",
        subject: "Test Contact Message",
        message: "This is a test contact message from the website.",
    };
    let result = cx.client.post_json("/api/contacts", Some(&create)).await;
    let created = match &result {
        Ok(response) if response.status == 201 => match response.decode::<Created>() {
            Ok(created) => {
                cx.ledger
                    .register(ResourceKind::Contact, created.id.clone());
                cx.recorder
                    .record("Create Contact", true, "Successfully created contact", None);
                Some(created.id)
            }
            Err(_) => {
                cx.recorder.record(
                    "Create Contact",
                    false,
                    "Missing id in response",
                    Some(response.body.clone()),
                );
                None
            }
        },
        _ => {
            cx.recorder.record(
                "Create Contact",
                false,
                format!("Failed to create contact: {}", failure_reason(&result)),
                None,
            );
            None
        }
    };

    let Some(id) = created else { return };

    let result = cx.client.get("/api/contacts").await;
    match &result {
        Ok(response) if response.status == 200 => {
            cx.recorder.record(
                "Get Contacts",
                true,
                format!("Retrieved {} contacts", item_count(response)),
                None,
            );
        }
        _ => {
            cx.recorder.record(
                "Get Contacts",
                false,
                format!("Failed to get contacts: {}", failure_reason(&result)),
                None,
            );
        }
    }

    let patch = StatusPatch { status: "read" };
    let result = cx
        .client
        .patch_json(&format!("/api/contacts/{id}/status"), &patch)
        .await;
    match &result {
        Ok(response) if response.status == 200 => {
            cx.recorder.record(
                "Update Contact Status",
                true,
                "Successfully updated contact status",
                None,
            );
        }
        _ => {
            cx.recorder.record(
                "Update Contact Status",
                false,
                format!("Failed to update contact status: {}", failure_reason(&result)),
                None,
            );
        }
    }
}
