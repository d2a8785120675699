//! Derived-data extractors.
//!
//! Pure traversals over a section sequence, used by the publish gates
//! and for social meta-tag generation. Each is a deterministic function
//! of its input; callers re-derive after every sequence change.

use crate::section::{MediaRef, Section};

/// All image URLs across the image-bearing variants, with placeholder
/// slots filtered out.
pub fn all_images(sections: &[Section]) -> Vec<String> {
    image_slots(sections)
        .filter(|m| !m.is_placeholder())
        .map(|m| m.url.clone())
        .collect()
}

/// Same traversal as [`all_images`] but placeholder slots are
/// retained, for callers that want the slot URLs as displayed.
pub fn image_urls(sections: &[Section]) -> Vec<String> {
    image_slots(sections).map(|m| m.url.clone()).collect()
}

fn image_slots(sections: &[Section]) -> impl Iterator<Item = &MediaRef> {
    sections.iter().flat_map(Section::image_slots)
}

/// Text bodies (markdown-first, html-fallback) of header and text
/// variants, blanks dropped.
pub fn all_texts(sections: &[Section]) -> Vec<String> {
    let mut texts = Vec::new();
    for section in sections {
        match section {
            Section::Header { text, .. }
            | Section::TextBlock { text, .. }
            | Section::TextImageRight { text, .. }
            | Section::TextImageLeft { text, .. } => {
                let body = text.body();
                if !body.trim().is_empty() {
                    texts.push(body.to_string());
                }
            }
            Section::ImageRow { .. }
            | Section::TripleImageCol { .. }
            | Section::VideoRowEmbedOnly { .. }
            | Section::VideoBlock { .. } => {}
        }
    }
    texts
}

/// Like [`all_texts`] but headers are excluded: a social preview
/// description should not repeat the page's own title line.
pub fn all_descriptions(sections: &[Section]) -> Vec<String> {
    let mut texts = Vec::new();
    for section in sections {
        match section {
            Section::TextBlock { text, .. }
            | Section::TextImageRight { text, .. }
            | Section::TextImageLeft { text, .. } => {
                let body = text.body();
                if !body.trim().is_empty() {
                    texts.push(body.to_string());
                }
            }
            Section::Header { .. }
            | Section::ImageRow { .. }
            | Section::TripleImageCol { .. }
            | Section::VideoRowEmbedOnly { .. }
            | Section::VideoBlock { .. } => {}
        }
    }
    texts
}

/// Uids of video-block sections whose transcode is still in flight.
pub fn processing_videos(sections: &[Section]) -> Vec<&str> {
    let mut uids = Vec::new();
    for section in sections {
        match section {
            Section::VideoBlock {
                uid, processing, ..
            } => {
                if *processing {
                    uids.push(uid.as_str());
                }
            }
            Section::Header { .. }
            | Section::TextBlock { .. }
            | Section::TextImageRight { .. }
            | Section::TextImageLeft { .. }
            | Section::ImageRow { .. }
            | Section::TripleImageCol { .. }
            | Section::VideoRowEmbedOnly { .. } => {}
        }
    }
    uids
}
