//! Publish gates.
//!
//! Four ordered checks over the draft sequence, short-circuiting on the
//! first failure. All four must pass before the publish mutation is
//! sent; a failed gate aborts without contacting the backend.

use folio_model::{all_texts, processing_videos, MediaRef, Section};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason a draft cannot be published. Display strings are the
/// user-visible modal messages.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PublishBlocker {
    #[error("Add at least one section before publishing.")]
    NoSections,

    #[error("{count} video(s) are still processing. Wait for them to finish, then publish.")]
    VideosProcessing { count: usize },

    #[error("Add some text content before publishing.")]
    NoTextContent,

    #[error("Add at least one image before publishing.")]
    NoImage,

    #[error("Replace the placeholder image before publishing.")]
    PlaceholderImage,
}

/// Evaluate the four publish gates, in order.
///
/// 1. draft is non-empty;
/// 2. no video-block is still processing;
/// 3. at least one non-empty text payload exists (headers count);
/// 4. at least one image slot exists and none still holds a
///    placeholder, whatever URL it points at.
pub fn check_publishable(draft: &[Section]) -> Result<(), PublishBlocker> {
    if draft.is_empty() {
        return Err(PublishBlocker::NoSections);
    }

    let in_flight = processing_videos(draft);
    if !in_flight.is_empty() {
        return Err(PublishBlocker::VideosProcessing {
            count: in_flight.len(),
        });
    }

    if all_texts(draft).is_empty() {
        return Err(PublishBlocker::NoTextContent);
    }

    let slots: Vec<&MediaRef> = draft.iter().flat_map(Section::image_slots).collect();
    if slots.is_empty() {
        return Err(PublishBlocker::NoImage);
    }
    if slots.iter().any(|m| m.is_placeholder()) {
        return Err(PublishBlocker::PlaceholderImage);
    }

    Ok(())
}
