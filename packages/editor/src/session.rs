//! # Edit Session
//!
//! One client's handle on a page being edited.
//!
//! The session owns the local page state explicitly — there is no
//! ambient "current page" singleton. Every operation is an asynchronous
//! round trip: send the mutation, await the authoritative snapshot,
//! replace the whole local page with it. The UI is transiently stale
//! between request and response; the snapshot version guards against a
//! late response clobbering a newer one.

use std::sync::Arc;

use folio_model::{Page, SectionType};

use crate::backend::PageBackend;
use crate::errors::EditorError;
use crate::operations::{PagePatch, SectionOperation, SectionPatch};
use crate::publish::check_publishable;

pub struct EditSession {
    page: Page,
    backend: Arc<dyn PageBackend>,
}

impl EditSession {
    /// Open a session by fetching the page from the backend.
    pub async fn open(backend: Arc<dyn PageBackend>, page_uid: &str) -> Result<Self, EditorError> {
        let page = backend.fetch_page(page_uid).await?;
        Ok(Self { page, backend })
    }

    /// Start from an already-held snapshot (e.g. handed over by a page
    /// listing query).
    pub fn with_page(backend: Arc<dyn PageBackend>, page: Page) -> Self {
        Self { page, backend }
    }

    /// Current local page state.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Dispatch one operation through the backend and adopt the
    /// returned snapshot.
    pub async fn apply(&mut self, op: SectionOperation) -> Result<&Page, EditorError> {
        let uid = self.page.uid.clone();
        let snapshot = match op {
            SectionOperation::AddSection {
                section_type,
                index,
            } => {
                self.backend
                    .page_section_add(&uid, section_type, index)
                    .await?
            }
            SectionOperation::UpdateSection { section_uid, patch } => {
                self.backend
                    .page_section_update(&uid, &section_uid, patch)
                    .await?
            }
            SectionOperation::DeleteSection { section_uid } => {
                self.backend.page_section_delete(&uid, &section_uid).await?
            }
            SectionOperation::ReorderSections {
                from_index,
                to_index,
            } => {
                self.backend
                    .page_sections_reorder(&uid, from_index, to_index)
                    .await?
            }
            SectionOperation::PublishSections => {
                // Gate locally; a failed gate never reaches the backend.
                check_publishable(&self.page.content_draft_sections)?;
                self.backend.page_section_publish(&uid).await?
            }
            SectionOperation::UpdatePage { patch } => {
                self.backend.update_page(&uid, patch).await?
            }
        };
        self.adopt(snapshot);
        Ok(&self.page)
    }

    pub async fn add_section(
        &mut self,
        section_type: SectionType,
        index: Option<usize>,
    ) -> Result<&Page, EditorError> {
        self.apply(SectionOperation::AddSection {
            section_type,
            index,
        })
        .await
    }

    pub async fn update_section(
        &mut self,
        section_uid: &str,
        patch: SectionPatch,
    ) -> Result<&Page, EditorError> {
        self.apply(SectionOperation::UpdateSection {
            section_uid: section_uid.to_string(),
            patch,
        })
        .await
    }

    pub async fn delete_section(&mut self, section_uid: &str) -> Result<&Page, EditorError> {
        self.apply(SectionOperation::DeleteSection {
            section_uid: section_uid.to_string(),
        })
        .await
    }

    pub async fn reorder_sections(
        &mut self,
        from_index: i64,
        to_index: i64,
    ) -> Result<&Page, EditorError> {
        self.apply(SectionOperation::ReorderSections {
            from_index,
            to_index,
        })
        .await
    }

    pub async fn publish(&mut self) -> Result<&Page, EditorError> {
        self.apply(SectionOperation::PublishSections).await
    }

    pub async fn update_page(&mut self, patch: PagePatch) -> Result<&Page, EditorError> {
        self.apply(SectionOperation::UpdatePage { patch }).await
    }

    /// Re-fetch the authoritative page.
    pub async fn refresh(&mut self) -> Result<&Page, EditorError> {
        let snapshot = self.backend.fetch_page(&self.page.uid).await?;
        self.adopt(snapshot);
        Ok(&self.page)
    }

    /// Replace local state with an authoritative snapshot. Snapshots
    /// older than the held page mean a newer response already arrived
    /// out of send order; those are logged and dropped.
    fn adopt(&mut self, snapshot: Page) {
        if snapshot.version < self.page.version {
            tracing::warn!(
                page = %self.page.uid,
                held = self.page.version,
                received = snapshot.version,
                "dropping stale page snapshot"
            );
            return;
        }
        tracing::debug!(page = %self.page.uid, version = snapshot.version, "adopted page snapshot");
        self.page = snapshot;
    }
}
