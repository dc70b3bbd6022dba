//! Blogs phase: list, filtered list, JSON create with slug fetch and update,
//! and a second create over multipart carrying a dummy image.

use super::{banner, failure_reason, item_count};
use crate::client::UploadFile;
use crate::ledger::ResourceKind;
use crate::model::{BlogCreated, BlogRequest, Created};
use crate::runner::RunContext;

/// JSON-encoded array holding the first registered tag id, `[]` when no tag
/// was created. The API accepts tag references in this shape on both the
/// JSON and the multipart path.
fn tags_field(cx: &RunContext) -> String {
    let first_tag: Vec<_> = cx.ledger.all(ResourceKind::Tag).iter().take(1).collect();
    serde_json::to_string(&first_tag).unwrap_or_else(|_| "[]".to_string())
}

pub async fn run(cx: &mut RunContext) {
    banner("Testing Blogs CRUD");

    let result = cx.client.get("/api/blogs").await;
    match &result {
        Ok(response) if response.status == 200 => {
            cx.recorder.record(
                "Get Blogs",
                true,
                format!("Retrieved {} blogs", item_count(response)),
                None,
            );
        }
        _ => {
            cx.recorder.record(
                "Get Blogs",
                false,
                format!("Failed to get blogs: {}", failure_reason(&result)),
                None,
            );
        }
    }

    let result = cx.client.get("/api/blogs?status=published").await;
    match &result {
        Ok(response) if response.status == 200 => {
            cx.recorder.record(
                "Get Published Blogs",
                true,
                format!("Retrieved {} published blogs", item_count(response)),
                None,
            );
        }
        _ => {
            cx.recorder.record(
                "Get Published Blogs",
                false,
                format!("Failed to get published blogs: {}", failure_reason(&result)),
                None,
            );
        }
    }

    create_json_blog(cx).await;
    create_multipart_blog(cx).await;
}

async fn create_json_blog(cx: &mut RunContext) {
    let create = BlogRequest {
        title: "Test Blog Post",
        content: "This is a test blog post content with some detailed information.",
        excerpt: "Test blog excerpt",
        status: "published",
        tags: Some(tags_field(cx)),
        category_id: cx.ledger.first(ResourceKind::Category).cloned(),
    };

    let result = cx.client.post_json("/api/blogs", Some(&create)).await;
    let created = match &result {
        Ok(response) if response.status == 201 => match response.decode::<Created>() {
            Ok(created) => {
                cx.ledger.register(ResourceKind::Blog, created.id.clone());
                cx.recorder
                    .record("Create Blog", true, "Successfully created blog", None);
                // Slug is asserted separately: a create that returns an id
                // but no slug still registers for teardown.
                let slug = response.decode::<BlogCreated>().ok().map(|blog| blog.slug);
                Some((created.id, slug))
            }
            Err(_) => {
                cx.recorder.record(
                    "Create Blog",
                    false,
                    "Missing id in response",
                    Some(response.body.clone()),
                );
                None
            }
        },
        _ => {
            cx.recorder.record(
                "Create Blog",
                false,
                format!("Failed to create blog: {}", failure_reason(&result)),
                None,
            );
            None
        }
    };

    let Some((id, slug)) = created else { return };

    if let Some(slug) = slug {
        let result = cx.client.get(&format!("/api/blogs/{slug}")).await;
        match &result {
            Ok(response) if response.status == 200 => {
                cx.recorder.record(
                    "Get Blog by Slug",
                    true,
                    "Successfully retrieved blog by slug",
                    None,
                );
            }
            _ => {
                cx.recorder.record(
                    "Get Blog by Slug",
                    false,
                    format!("Failed to get blog by slug: {}", failure_reason(&result)),
                    None,
                );
            }
        }
    }

    let update = BlogRequest {
        title: "Updated Test Blog Post",
        content: "Updated content",
        excerpt: "Updated excerpt",
        status: "draft",
        tags: None,
        category_id: None,
    };
    let result = cx
        .client
        .put_json(&format!("/api/blogs/{id}"), &update)
        .await;
    match &result {
        Ok(response) if response.status == 200 => {
            cx.recorder
                .record("Update Blog", true, "Successfully updated blog", None);
        }
        _ => {
            cx.recorder.record(
                "Update Blog",
                false,
                format!("Failed to update blog: {}", failure_reason(&result)),
                None,
            );
        }
    }
}

async fn create_multipart_blog(cx: &mut RunContext) {
    let mut fields = vec![
        ("title".to_string(), "Test Blog with Image".to_string()),
        ("content".to_string(), "Blog content with image".to_string()),
        ("excerpt".to_string(), "Blog excerpt".to_string()),
        ("status".to_string(), "published".to_string()),
        ("tags".to_string(), tags_field(cx)),
    ];
    if let Some(category) = cx.ledger.first(ResourceKind::Category) {
        fields.push(("category_id".to_string(), category.to_string()));
    }

    let file = UploadFile {
        field: "featured_image".to_string(),
        filename: "test.jpg".to_string(),
        mime: "image/jpeg".to_string(),
        bytes: b"fake image data".to_vec(),
    };

    let result = cx.client.post_multipart("/api/blogs", fields, file).await;
    match &result {
        Ok(response) if response.status == 201 => match response.decode::<Created>() {
            Ok(created) => {
                cx.ledger.register(ResourceKind::Blog, created.id);
                cx.recorder.record(
                    "Create Blog with Image",
                    true,
                    "Successfully created blog with image",
                    None,
                );
            }
            Err(_) => {
                cx.recorder.record(
                    "Create Blog with Image",
                    false,
                    "Missing id in response",
                    Some(response.body.clone()),
                );
            }
        },
        _ => {
            cx.recorder.record(
                "Create Blog with Image",
                false,
                format!("Failed to create blog with image: {}", failure_reason(&result)),
                None,
            );
        }
    }
}
