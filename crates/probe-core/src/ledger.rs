//! Run-scoped registry of created resources.
//!
//! The only state threaded between phases: creates append the identifier the
//! server handed back, later phases read the first entry of a kind to chain
//! dependent creates, and teardown walks every entry to delete it. Entries
//! are never removed; the run ends right after teardown.

use crate::model::ResourceId;

/// Resource kinds the harness creates, in no particular order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Category,
    Tag,
    Blog,
    Comment,
    Contact,
}

impl ResourceKind {
    /// Singular name used in console lines (`Delete Comment`, ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Tag => "Tag",
            Self::Blog => "Blog",
            Self::Comment => "Comment",
            Self::Contact => "Contact",
        }
    }

    /// API path segment for the kind's collection.
    #[must_use]
    pub const fn collection_path(self) -> &'static str {
        match self {
            Self::Category => "/api/categories",
            Self::Tag => "/api/tags",
            Self::Blog => "/api/blogs",
            Self::Comment => "/api/comments",
            Self::Contact => "/api/contacts",
        }
    }
}

/// Append-only, order-preserving map from kind to created identifiers.
#[derive(Debug, Default)]
pub struct ResourceLedger {
    categories: Vec<ResourceId>,
    tags: Vec<ResourceId>,
    blogs: Vec<ResourceId>,
    comments: Vec<ResourceId>,
    contacts: Vec<ResourceId>,
}

impl ResourceLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` under `kind`.
    pub fn register(&mut self, kind: ResourceKind, id: ResourceId) {
        self.entries_mut(kind).push(id);
    }

    /// All identifiers registered under `kind`, in creation order. Empty
    /// slice when nothing was registered; never an error.
    #[must_use]
    pub fn all(&self, kind: ResourceKind) -> &[ResourceId] {
        match kind {
            ResourceKind::Category => &self.categories,
            ResourceKind::Tag => &self.tags,
            ResourceKind::Blog => &self.blogs,
            ResourceKind::Comment => &self.comments,
            ResourceKind::Contact => &self.contacts,
        }
    }

    /// The first identifier registered under `kind`, for chaining dependent
    /// creates.
    #[must_use]
    pub fn first(&self, kind: ResourceKind) -> Option<&ResourceId> {
        self.all(kind).first()
    }

    fn entries_mut(&mut self, kind: ResourceKind) -> &mut Vec<ResourceId> {
        match kind {
            ResourceKind::Category => &mut self.categories,
            ResourceKind::Tag => &mut self.tags,
            ResourceKind::Blog => &mut self.blogs,
            ResourceKind::Comment => &mut self.comments,
            ResourceKind::Contact => &mut self.contacts,
        }
    }
}
