//! Editor operations against the draft sequence.
//!
//! Each operation maps one-to-one onto a backend mutation; the payload
//! shapes here are the wire shapes. Operations are intent-preserving
//! and carry no derived state — the authoritative result is always the
//! page snapshot the backend returns.

use folio_model::SectionType;
use serde::{Deserialize, Serialize};

/// Semantic operation on a page's draft sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SectionOperation {
    /// Insert a default instance of `section_type` at `index`
    /// (append when omitted).
    AddSection {
        section_type: SectionType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },

    /// Apply a partial change to one draft section.
    UpdateSection {
        section_uid: String,
        patch: SectionPatch,
    },

    /// Remove one draft section.
    DeleteSection { section_uid: String },

    /// Move the draft element at `from_index` to `to_index`.
    /// Out-of-range indices wrap (euclidean remainder over the draft
    /// length), so `-1` addresses the last element.
    ReorderSections { from_index: i64, to_index: i64 },

    /// Promote the validated draft sequence to published.
    PublishSections,

    /// Update page-level fields.
    UpdatePage { patch: PagePatch },
}

/// Partial change to a single section. Only the populated fields are
/// applied; which fields are legal depends on the target variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_image_url: Option<String>,

    /// Which image slot `new_image_url` / `delete_image` targets for
    /// multi-image variants. Defaults to slot 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nth_image: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_video_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing: Option<bool>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub delete_image: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub delete_video_url: bool,
}

fn is_false(value: &bool) -> bool {
    !value
}

impl SectionPatch {
    pub fn text(markdown: impl Into<String>) -> Self {
        Self {
            new_text: Some(markdown.into()),
            ..Self::default()
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self {
            new_image_url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn nth_image(n: usize, url: impl Into<String>) -> Self {
        Self {
            new_image_url: Some(url.into()),
            nth_image: Some(n),
            ..Self::default()
        }
    }

    pub fn video(url: impl Into<String>, title: impl Into<String>, processing: bool) -> Self {
        Self {
            new_video_url: Some(url.into()),
            new_title: Some(title.into()),
            processing: Some(processing),
            ..Self::default()
        }
    }

    pub fn remove_image() -> Self {
        Self {
            delete_image: true,
            ..Self::default()
        }
    }

    pub fn remove_video_url() -> Self {
        Self {
            delete_video_url: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Partial change to page-level fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_tags: Option<Vec<String>>,
}

impl PagePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn color(color: impl Into<String>) -> Self {
        Self {
            page_color: Some(color.into()),
            ..Self::default()
        }
    }
}
