//! Comments phase: admin list, create against the first blog, moderation
//! patch. Skips the create when no blog exists to comment on.

use super::{banner, failure_reason, item_count};
use crate::ledger::ResourceKind;
use crate::model::{CommentRequest, Created, StatusPatch};
use crate::runner::RunContext;

pub async fn run(cx: &mut RunContext) {
    banner("Testing Comments CRUD");

    let result = cx.client.get("/api/comments").await;
    match &result {
        Ok(response) if response.status == 200 => {
            cx.recorder.record(
                "Get Comments",
                true,
                format!("Retrieved {} comments", item_count(response)),
                None,
            );
        }
        _ => {
            cx.recorder.record(
                "Get Comments",
                false,
                format!("Failed to get comments: {}", failure_reason(&result)),
                None,
            );
        }
    }

    // Precondition failure: recorded without issuing the request.
    let Some(blog_id) = cx.ledger.first(ResourceKind::Blog).cloned() else {
        cx.recorder.record(
            "Create Comment",
            false,
            "No blogs available for testing comments",
            None,
        );
        return;
    };

    let create = CommentRequest {
        blog_id,
        author_name: "John Doe",
        author_email: "john@example.com",
        content: "This is a test comment on the blog post.",
    };
    let result = cx.client.post_json("/api/comments", Some(&create)).await;
    let created = match &result {
        Ok(response) if response.status == 201 => match response.decode::<Created>() {
            Ok(created) => {
                cx.ledger
                    .register(ResourceKind::Comment, created.id.clone());
                cx.recorder
                    .record("Create Comment", true, "Successfully created comment", None);
                Some(created.id)
            }
            Err(_) => {
                cx.recorder.record(
                    "Create Comment",
                    false,
                    "Missing id in response",
                    Some(response.body.clone()),
                );
                None
            }
        },
        _ => {
            cx.recorder.record(
                "Create Comment",
                false,
                format!("Failed to create comment: {}", failure_reason(&result)),
                None,
            );
            None
        }
    };

    let Some(id) = created else { return };
    let patch = StatusPatch { status: "approved" };
    let result = cx
        .client
        .patch_json(&format!("/api/comments/{id}/status"), &patch)
        .await;
    match &result {
        Ok(response) if response.status == 200 => {
            cx.recorder.record(
                "Update Comment Status",
                true,
                "Successfully updated comment status",
                None,
            );
        }
        _ => {
            cx.recorder.record(
                "Update Comment Status",
                false,
                format!("Failed to update comment status: {}", failure_reason(&result)),
                None,
            );
        }
    }
}
