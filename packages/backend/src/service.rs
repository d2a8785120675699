//! In-process backend adapter.
//!
//! Wraps the store behind the [`PageBackend`] port so an edit session
//! gets the same round-trip contract a remote service would give it:
//! every mutation resolves to the full authoritative page snapshot.

use async_trait::async_trait;
use folio_editor::{BackendError, PageBackend, PagePatch, SectionPatch};
use folio_model::{Page, SectionType};
use tokio::sync::Mutex;

use crate::config::BackendConfig;
use crate::store::PageStore;

pub struct InMemoryBackend {
    store: Mutex<PageStore>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::with_config(BackendConfig::default())
    }

    pub fn with_config(config: BackendConfig) -> Self {
        Self {
            store: Mutex::new(PageStore::new(config)),
        }
    }

    /// Create an empty page (site-owner action; not part of the
    /// editing port).
    pub async fn create_page(
        &self,
        site_uid: &str,
        title: &str,
        slug: &str,
    ) -> Result<Page, BackendError> {
        self.store.lock().await.create_page(site_uid, title, slug)
    }

    /// Tombstone a page (owner or administrative action).
    pub async fn delete_page(&self, page_uid: &str) -> Result<Page, BackendError> {
        self.store.lock().await.delete_page(page_uid)
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageBackend for InMemoryBackend {
    async fn fetch_page(&self, page_uid: &str) -> Result<Page, BackendError> {
        self.store.lock().await.get_page(page_uid)
    }

    async fn page_section_add(
        &self,
        page_uid: &str,
        section_type: SectionType,
        index: Option<usize>,
    ) -> Result<Page, BackendError> {
        self.store
            .lock()
            .await
            .section_add(page_uid, section_type, index)
    }

    async fn page_section_update(
        &self,
        page_uid: &str,
        section_uid: &str,
        patch: SectionPatch,
    ) -> Result<Page, BackendError> {
        self.store
            .lock()
            .await
            .section_update(page_uid, section_uid, &patch)
    }

    async fn page_section_delete(
        &self,
        page_uid: &str,
        section_uid: &str,
    ) -> Result<Page, BackendError> {
        self.store.lock().await.section_delete(page_uid, section_uid)
    }

    async fn page_sections_reorder(
        &self,
        page_uid: &str,
        from_index: i64,
        to_index: i64,
    ) -> Result<Page, BackendError> {
        self.store
            .lock()
            .await
            .sections_reorder(page_uid, from_index, to_index)
    }

    async fn page_section_publish(&self, page_uid: &str) -> Result<Page, BackendError> {
        self.store.lock().await.section_publish(page_uid)
    }

    async fn update_page(&self, page_uid: &str, patch: PagePatch) -> Result<Page, BackendError> {
        self.store.lock().await.update_page(page_uid, &patch)
    }
}
