//! Page aggregate: the owning root for both section sequences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::section::Section;

/// A single piece of publishable content on a site.
///
/// The page owns its sections exclusively; sections have no identity
/// outside of it. `content_draft_sections` is the editable working copy,
/// `content_sections` is the last-published snapshot rendered to the
/// public. The two are only ever reconciled by the publish operation —
/// clients never merge them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub uid: String,
    pub site_uid: String,
    pub title: String,
    pub slug: String,
    pub page_color: String,

    pub is_published: bool,
    pub is_banned: bool,
    pub is_deleted: bool,
    pub is_flagged: bool,

    pub impressions: u64,
    pub visits: u64,
    pub earnings: f64,
    pub likes: u64,
    pub dislikes: u64,
    pub report_count: u64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_publish: Option<DateTime<Utc>>,

    /// Automatically derived category tags.
    pub category_tags: Vec<String>,
    /// User-authored meta tags.
    pub meta_tags: Vec<String>,

    pub content_sections: Vec<Section>,
    pub content_draft_sections: Vec<Section>,

    /// Monotonic mutation counter, bumped by the authority on every
    /// successful mutation. Clients use it to discard snapshots that
    /// arrive out of send order.
    pub version: u64,
}

impl Page {
    /// Fresh page with no sections in either sequence.
    pub fn new(
        uid: impl Into<String>,
        site_uid: impl Into<String>,
        title: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            uid: uid.into(),
            site_uid: site_uid.into(),
            title: title.into(),
            slug: slug.into(),
            page_color: "#ffffff".to_string(),
            is_published: false,
            is_banned: false,
            is_deleted: false,
            is_flagged: false,
            impressions: 0,
            visits: 0,
            earnings: 0.0,
            likes: 0,
            dislikes: 0,
            report_count: 0,
            created_at: now,
            updated_at: now,
            last_publish: None,
            category_tags: Vec::new(),
            meta_tags: Vec::new(),
            content_sections: Vec::new(),
            content_draft_sections: Vec::new(),
            version: 0,
        }
    }

    pub fn draft_section(&self, section_uid: &str) -> Option<&Section> {
        self.content_draft_sections
            .iter()
            .find(|s| s.uid() == section_uid)
    }

    pub fn draft_index_of(&self, section_uid: &str) -> Option<usize> {
        self.content_draft_sections
            .iter()
            .position(|s| s.uid() == section_uid)
    }
}
