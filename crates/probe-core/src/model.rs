//! Typed request and response records for the CMS API surface.
//!
//! One record per endpoint payload, so a malformed field is a compile error
//! rather than a runtime failed assertion. Response structs only name the
//! fields the harness asserts on; everything else stays in the raw
//! [`ApiResponse`](crate::ApiResponse) body.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Identifiers ────────────────────────────────────────────────────

/// Opaque server-assigned identifier.
///
/// The API is free to hand back JSON numbers or strings for `id`; either is
/// preserved verbatim and rendered bare when interpolated into a URL path
/// (`7`, not `"7"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// Numeric identifier (e.g. an auto-increment key).
    Num(i64),
    /// String identifier (e.g. a UUID).
    Str(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(n: i64) -> Self {
        Self::Num(n)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

// ── Auth ───────────────────────────────────────────────────────────

/// Credentials posted to `/api/auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful login body: a bearer token plus the user's profile, which the
/// harness holds but never inspects.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: serde_json::Value,
}

/// Body of `GET /api/auth/me`.
#[derive(Debug, Deserialize)]
pub struct MeResponse {
    pub user: serde_json::Value,
}

// ── Health ─────────────────────────────────────────────────────────

/// Body of `GET /api/health`.
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

// ── Resources ──────────────────────────────────────────────────────

/// Category create/update payload.
#[derive(Debug, Serialize)]
pub struct CategoryRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

/// Tag create payload.
#[derive(Debug, Serialize)]
pub struct TagRequest<'a> {
    pub name: &'a str,
}

/// Blog create/update payload.
///
/// `tags` is a JSON-encoded array of tag ids carried as a string, matching
/// what the API accepts on both the JSON and the multipart path.
#[derive(Debug, Serialize)]
pub struct BlogRequest<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub excerpt: &'a str,
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<ResourceId>,
}

/// Comment create payload.
#[derive(Debug, Serialize)]
pub struct CommentRequest<'a> {
    pub blog_id: ResourceId,
    pub author_name: &'a str,
    pub author_email: &'a str,
    pub content: &'a str,
}

/// Contact-message create payload.
#[derive(Debug, Serialize)]
pub struct ContactRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
}

/// Moderation/read-state patch for `/:id/status` endpoints.
#[derive(Debug, Serialize)]
pub struct StatusPatch<'a> {
    pub status: &'a str,
}

// ── Response shapes ────────────────────────────────────────────────

/// Minimal create response: every create is expected to return an `id`.
#[derive(Debug, Deserialize)]
pub struct Created {
    pub id: ResourceId,
}

/// Blog create response: an `id` plus the URL slug used for public reads.
#[derive(Debug, Deserialize)]
pub struct BlogCreated {
    pub id: ResourceId,
    pub slug: String,
}

/// Error body shape: failed requests are expected to carry an `error` field.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
