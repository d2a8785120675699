//! Backend port.
//!
//! The editing client's only externally visible surface: the mutation
//! contract it issues against an authoritative page service. Every call
//! returns the full authoritative [`Page`] (both section sequences) on
//! success; on failure, no local state changes.

use async_trait::async_trait;
use folio_model::{Page, SectionType};
use thiserror::Error;

use crate::operations::{PagePatch, SectionPatch};
use crate::publish::PublishBlocker;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("page not found: {0}")]
    PageNotFound(String),

    #[error("section not found: {0}")]
    SectionNotFound(String),

    #[error("a page with slug {0:?} already exists on this site")]
    SlugTaken(String),

    #[error("section limit reached ({limit})")]
    SectionLimitReached { limit: usize },

    #[error("patch rejected: {0}")]
    PatchRejected(String),

    #[error("publish blocked: {0}")]
    PublishBlocked(#[from] PublishBlocker),

    #[error("transport failure: {0}")]
    Transport(String),
}

/// Authoritative page mutation/query surface.
#[async_trait]
pub trait PageBackend: Send + Sync {
    async fn fetch_page(&self, page_uid: &str) -> Result<Page, BackendError>;

    async fn page_section_add(
        &self,
        page_uid: &str,
        section_type: SectionType,
        index: Option<usize>,
    ) -> Result<Page, BackendError>;

    async fn page_section_update(
        &self,
        page_uid: &str,
        section_uid: &str,
        patch: SectionPatch,
    ) -> Result<Page, BackendError>;

    async fn page_section_delete(
        &self,
        page_uid: &str,
        section_uid: &str,
    ) -> Result<Page, BackendError>;

    async fn page_sections_reorder(
        &self,
        page_uid: &str,
        from_index: i64,
        to_index: i64,
    ) -> Result<Page, BackendError>;

    async fn page_section_publish(&self, page_uid: &str) -> Result<Page, BackendError>;

    async fn update_page(&self, page_uid: &str, patch: PagePatch) -> Result<Page, BackendError>;
}
