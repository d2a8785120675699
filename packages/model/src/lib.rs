//! # Folio Model
//!
//! Core content model for Folio pages.
//!
//! A page is composed of an ordered sequence of typed content sections,
//! held in two parallel forms:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ content_draft_sections: the editable copy   │
//! └─────────────────────────────────────────────┘
//!                     ↓ publish (validated)
//! ┌─────────────────────────────────────────────┐
//! │ content_sections: the last-published copy   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The section set is closed: every consumer (renderer, extractors,
//! publish gates) matches exhaustively on [`Section`], so adding a
//! variant is a compile-time checklist.

mod extract;
mod page;
mod section;
mod uid;

pub use extract::{
    all_descriptions, all_images, all_texts, image_urls, processing_videos,
};
pub use page::Page;
pub use section::{
    MediaRef, MediaType, RichText, Section, SectionShapeError, SectionType,
    PLACEHOLDER_IMAGE_URL,
};
pub use uid::{scope_uid, UidGenerator};
