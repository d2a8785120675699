//! Authoritative page store.
//!
//! Single writer for all page state. Every mutation validates, applies,
//! bumps the page version, stamps `updated_at`, and returns a full page
//! clone — the snapshot clients wholesale-adopt. Sections are only ever
//! created, changed, and reordered in the draft sequence; the published
//! sequence changes through the publish operation alone.

use std::collections::HashMap;

use chrono::Utc;
use folio_editor::{check_publishable, BackendError, PagePatch, SectionPatch};
use folio_model::{
    scope_uid, MediaRef, Page, Section, SectionShapeError, SectionType, UidGenerator,
};

use crate::config::BackendConfig;

struct PageEntry {
    page: Page,
    section_uids: UidGenerator,
}

pub struct PageStore {
    pages: HashMap<String, PageEntry>,
    config: BackendConfig,
}

impl PageStore {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            pages: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Create an empty page for a site. The page uid is derived from
    /// `site_uid/slug`, so a duplicate slug on the same site is
    /// rejected.
    pub fn create_page(
        &mut self,
        site_uid: &str,
        title: &str,
        slug: &str,
    ) -> Result<Page, BackendError> {
        let uid = scope_uid(&format!("{}/{}", site_uid, slug));
        if self.pages.contains_key(&uid) {
            return Err(BackendError::SlugTaken(slug.to_string()));
        }

        let page = Page::new(uid.clone(), site_uid, title, slug);
        let section_uids = UidGenerator::new(&uid);
        tracing::info!(page = %uid, site = %site_uid, slug = %slug, "created page");
        self.pages.insert(
            uid,
            PageEntry {
                page: page.clone(),
                section_uids,
            },
        );
        Ok(page)
    }

    /// Tombstone a page (owner or administrative action). The sections
    /// die with it.
    pub fn delete_page(&mut self, page_uid: &str) -> Result<Page, BackendError> {
        let entry = self.entry_mut(page_uid)?;
        entry.page.is_deleted = true;
        entry.page.is_published = false;
        Ok(Self::touch(entry))
    }

    pub fn get_page(&self, page_uid: &str) -> Result<Page, BackendError> {
        self.pages
            .get(page_uid)
            .map(|entry| entry.page.clone())
            .ok_or_else(|| BackendError::PageNotFound(page_uid.to_string()))
    }

    /// Insert a default instance of `section_type` into the draft
    /// sequence (append when `index` is omitted; insert index clamped
    /// to the sequence length).
    pub fn section_add(
        &mut self,
        page_uid: &str,
        section_type: SectionType,
        index: Option<usize>,
    ) -> Result<Page, BackendError> {
        let limit = self.config.max_sections_per_page;
        let placeholder = self.config.placeholder_image_url.clone();
        let entry = self.entry_mut(page_uid)?;

        let draft = &mut entry.page.content_draft_sections;
        if draft.len() >= limit {
            return Err(BackendError::SectionLimitReached { limit });
        }

        let uid = entry.section_uids.next_uid();
        let mut section = Section::empty(section_type, &uid);
        // Fresh image slots all start as placeholders; point them at the
        // configured placeholder asset.
        for slot in section.image_slots_mut() {
            *slot = MediaRef::placeholder_with_url(&placeholder);
        }
        let at = index.unwrap_or(draft.len()).min(draft.len());
        draft.insert(at, section);

        tracing::debug!(page = %page_uid, section = %uid, %section_type, at, "added draft section");
        Ok(Self::touch(entry))
    }

    /// Apply a partial change to one draft section.
    pub fn section_update(
        &mut self,
        page_uid: &str,
        section_uid: &str,
        patch: &SectionPatch,
    ) -> Result<Page, BackendError> {
        let placeholder = self.config.placeholder_image_url.clone();
        let entry = self.entry_mut(page_uid)?;

        if patch.is_empty() {
            tracing::debug!(page = %page_uid, section = %section_uid, "empty patch, nothing to apply");
            return Ok(entry.page.clone());
        }

        let at = entry
            .page
            .content_draft_sections
            .iter()
            .position(|s| s.uid() == section_uid)
            .ok_or_else(|| BackendError::SectionNotFound(section_uid.to_string()))?;

        // Patch a scratch copy; a rejected patch leaves the draft
        // untouched even when some fields already applied.
        let mut section = entry.page.content_draft_sections[at].clone();
        apply_patch(&mut section, patch, &placeholder)?;
        entry.page.content_draft_sections[at] = section;

        tracing::debug!(page = %page_uid, section = %section_uid, "patched draft section");
        Ok(Self::touch(entry))
    }

    /// Remove one draft section.
    pub fn section_delete(
        &mut self,
        page_uid: &str,
        section_uid: &str,
    ) -> Result<Page, BackendError> {
        let entry = self.entry_mut(page_uid)?;
        let draft = &mut entry.page.content_draft_sections;

        let at = draft
            .iter()
            .position(|s| s.uid() == section_uid)
            .ok_or_else(|| BackendError::SectionNotFound(section_uid.to_string()))?;
        draft.remove(at);

        tracing::debug!(page = %page_uid, section = %section_uid, "deleted draft section");
        Ok(Self::touch(entry))
    }

    /// Move the draft element at `from_index` to `to_index`. Indices
    /// wrap over the draft length, so `-1` addresses the last element
    /// and `len` the first.
    pub fn sections_reorder(
        &mut self,
        page_uid: &str,
        from_index: i64,
        to_index: i64,
    ) -> Result<Page, BackendError> {
        let entry = self.entry_mut(page_uid)?;
        let draft = &mut entry.page.content_draft_sections;

        if draft.is_empty() {
            return Ok(entry.page.clone());
        }

        let from = wrap_index(from_index, draft.len());
        let to = wrap_index(to_index, draft.len());
        let section = draft.remove(from);
        draft.insert(to, section);

        tracing::debug!(page = %page_uid, from, to, "reordered draft sections");
        Ok(Self::touch(entry))
    }

    /// Promote the draft sequence to published. Gates are re-checked
    /// here — clients validate before sending, but the store is the
    /// authority.
    pub fn section_publish(&mut self, page_uid: &str) -> Result<Page, BackendError> {
        let entry = self.entry_mut(page_uid)?;

        check_publishable(&entry.page.content_draft_sections)?;

        entry.page.content_sections = entry.page.content_draft_sections.clone();
        entry.page.is_published = true;
        entry.page.last_publish = Some(Utc::now());

        tracing::info!(
            page = %page_uid,
            sections = entry.page.content_sections.len(),
            "published draft sections"
        );
        Ok(Self::touch(entry))
    }

    /// Apply page-level field changes.
    pub fn update_page(&mut self, page_uid: &str, patch: &PagePatch) -> Result<Page, BackendError> {
        let entry = self.entry_mut(page_uid)?;
        let page = &mut entry.page;

        if let Some(title) = &patch.title {
            page.title = title.clone();
        }
        if let Some(color) = &patch.page_color {
            page.page_color = color.clone();
        }
        if let Some(is_published) = patch.is_published {
            page.is_published = is_published;
        }
        if let Some(meta_tags) = &patch.meta_tags {
            page.meta_tags = meta_tags.clone();
        }

        tracing::debug!(page = %page_uid, "updated page fields");
        Ok(Self::touch(entry))
    }

    fn entry_mut(&mut self, page_uid: &str) -> Result<&mut PageEntry, BackendError> {
        self.pages
            .get_mut(page_uid)
            .ok_or_else(|| BackendError::PageNotFound(page_uid.to_string()))
    }

    /// Stamp a successful mutation and clone the authoritative
    /// snapshot.
    fn touch(entry: &mut PageEntry) -> Page {
        entry.page.version += 1;
        entry.page.updated_at = Utc::now();
        entry.page.clone()
    }
}

fn wrap_index(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}

fn apply_patch(
    section: &mut Section,
    patch: &SectionPatch,
    placeholder_url: &str,
) -> Result<(), BackendError> {
    let section_type = section.section_type();

    if let Some(markdown) = &patch.new_text {
        let text = section.text_mut().ok_or_else(|| {
            BackendError::PatchRejected(format!("{} has no text payload", section_type))
        })?;
        *text = folio_model::RichText::from_markdown(markdown.clone());
    }

    if let Some(url) = &patch.new_image_url {
        let nth = patch.nth_image.unwrap_or(0);
        let slots = section.image_slots_mut();
        let slot = slots.get_mut(nth).ok_or_else(|| {
            BackendError::PatchRejected(format!(
                "{} has no image slot {}",
                section_type, nth
            ))
        })?;
        *slot = MediaRef::image(url.clone());
    }

    if patch.delete_image {
        let nth = patch.nth_image.unwrap_or(0);
        let slots = section.image_slots_mut();
        let slot = slots.get_mut(nth).ok_or_else(|| {
            BackendError::PatchRejected(format!(
                "{} has no image slot {}",
                section_type, nth
            ))
        })?;
        *slot = MediaRef::placeholder_with_url(placeholder_url);
    }

    if let Some(url) = &patch.new_video_url {
        match section {
            Section::VideoBlock { video, .. } => video.url = url.clone(),
            Section::VideoRowEmbedOnly { embed_url, .. } => *embed_url = Some(url.clone()),
            _ => {
                return Err(BackendError::PatchRejected(format!(
                    "{} has no video payload",
                    section_type
                )))
            }
        }
    }

    if patch.delete_video_url {
        match section {
            Section::VideoBlock { video, .. } => video.url.clear(),
            Section::VideoRowEmbedOnly { embed_url, .. } => *embed_url = None,
            _ => {
                return Err(BackendError::PatchRejected(format!(
                    "{} has no video payload",
                    section_type
                )))
            }
        }
    }

    if let Some(title) = &patch.new_title {
        match section {
            Section::VideoBlock { title: t, .. } => *t = title.clone(),
            _ => {
                return Err(BackendError::PatchRejected(format!(
                    "{} has no title field",
                    section_type
                )))
            }
        }
    }

    if let Some(processing) = patch.processing {
        match section {
            Section::VideoBlock { processing: p, .. } => *p = processing,
            _ => {
                return Err(BackendError::PatchRejected(format!(
                    "{} has no processing flag",
                    section_type
                )))
            }
        }
    }

    // Incoming media URLs must be well-formed; other shape findings
    // (blank text, cleared video urls) are legal draft states.
    if patch.new_image_url.is_some() || patch.new_video_url.is_some() {
        if let Err(SectionShapeError::MalformedMediaUrl { url, .. }) = section.validate() {
            return Err(BackendError::PatchRejected(format!(
                "media url is not a valid http(s) url: {:?}",
                url
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_model::{all_images, PLACEHOLDER_IMAGE_URL};
    use std::collections::HashSet;

    fn store_with_page() -> (PageStore, String) {
        let mut store = PageStore::new(BackendConfig::default());
        let page = store.create_page("site-1", "Hello", "hello").unwrap();
        (store, page.uid)
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let (mut store, _) = store_with_page();
        assert_eq!(
            store.create_page("site-1", "Other", "hello"),
            Err(BackendError::SlugTaken("hello".to_string()))
        );
        // Same slug on another site is fine.
        assert!(store.create_page("site-2", "Other", "hello").is_ok());
    }

    #[test]
    fn test_add_delete_sequence_length_and_uid_uniqueness() {
        let (mut store, uid) = store_with_page();

        let mut adds = 0;
        for t in SectionType::ALL {
            store.section_add(&uid, t, None).unwrap();
            adds += 1;
        }
        for t in [SectionType::Header, SectionType::ImageRow] {
            store.section_add(&uid, t, Some(0)).unwrap();
            adds += 1;
        }

        let page = store.get_page(&uid).unwrap();
        let first = page.content_draft_sections[0].uid().to_string();
        store.section_delete(&uid, &first).unwrap();
        let page = store.get_page(&uid).unwrap();
        let second = page.content_draft_sections[0].uid().to_string();
        store.section_delete(&uid, &second).unwrap();

        let page = store.get_page(&uid).unwrap();
        assert_eq!(page.content_draft_sections.len(), adds - 2);

        let uids: HashSet<&str> = page
            .content_draft_sections
            .iter()
            .map(|s| s.uid())
            .collect();
        assert_eq!(uids.len(), page.content_draft_sections.len());
    }

    #[test]
    fn test_add_at_index_and_clamped_append() {
        let (mut store, uid) = store_with_page();
        store.section_add(&uid, SectionType::Header, None).unwrap();
        store.section_add(&uid, SectionType::TextBlock, Some(0)).unwrap();
        // Insert index past the end is clamped to append.
        let page = store.section_add(&uid, SectionType::ImageRow, Some(99)).unwrap();

        let types: Vec<SectionType> = page
            .content_draft_sections
            .iter()
            .map(|s| s.section_type())
            .collect();
        assert_eq!(
            types,
            vec![SectionType::TextBlock, SectionType::Header, SectionType::ImageRow]
        );
    }

    #[test]
    fn test_section_limit_enforced() {
        let mut store = PageStore::new(BackendConfig {
            max_sections_per_page: 2,
            ..BackendConfig::default()
        });
        let uid = store.create_page("site-1", "Hello", "hello").unwrap().uid;

        store.section_add(&uid, SectionType::Header, None).unwrap();
        store.section_add(&uid, SectionType::TextBlock, None).unwrap();
        assert_eq!(
            store.section_add(&uid, SectionType::ImageRow, None),
            Err(BackendError::SectionLimitReached { limit: 2 })
        );
    }

    #[test]
    fn test_unknown_section_uid_signals_not_found() {
        let (mut store, uid) = store_with_page();
        assert_eq!(
            store.section_delete(&uid, "nope"),
            Err(BackendError::SectionNotFound("nope".to_string()))
        );
        assert_eq!(
            store.section_update(&uid, "nope", &SectionPatch::text("x")),
            Err(BackendError::SectionNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_version_bumps_on_every_successful_mutation() {
        let (mut store, uid) = store_with_page();
        assert_eq!(store.get_page(&uid).unwrap().version, 0);

        let p1 = store.section_add(&uid, SectionType::Header, None).unwrap();
        assert_eq!(p1.version, 1);

        let section_uid = p1.content_draft_sections[0].uid().to_string();
        let p2 = store
            .section_update(&uid, &section_uid, &SectionPatch::text("# Hi"))
            .unwrap();
        assert_eq!(p2.version, 2);

        // Failed mutations leave the version alone.
        let _ = store.section_delete(&uid, "nope");
        assert_eq!(store.get_page(&uid).unwrap().version, 2);
    }

    #[test]
    fn test_reorder_moves_and_wraps() {
        let (mut store, uid) = store_with_page();
        store.section_add(&uid, SectionType::Header, None).unwrap();
        store.section_add(&uid, SectionType::TextBlock, None).unwrap();
        let before = store.section_add(&uid, SectionType::ImageRow, None).unwrap();
        let uids: Vec<String> = before
            .content_draft_sections
            .iter()
            .map(|s| s.uid().to_string())
            .collect();

        // Plain move.
        let page = store.sections_reorder(&uid, 0, 1).unwrap();
        assert_eq!(page.content_draft_sections[0].uid(), uids[1]);
        assert_eq!(page.content_draft_sections[1].uid(), uids[0]);

        // to = -1 wraps to the last position.
        let page = store.sections_reorder(&uid, 0, -1).unwrap();
        assert_eq!(page.content_draft_sections[2].uid(), uids[1]);

        // to = len wraps to the first position.
        let page = store.sections_reorder(&uid, 2, 3).unwrap();
        assert_eq!(page.content_draft_sections[0].uid(), uids[1]);
    }

    #[test]
    fn test_reorder_on_empty_draft_is_a_no_op() {
        let (mut store, uid) = store_with_page();
        let page = store.sections_reorder(&uid, 0, 5).unwrap();
        assert!(page.content_draft_sections.is_empty());
        assert_eq!(page.version, 0);
    }

    #[test]
    fn test_patch_application_per_variant() {
        let (mut store, uid) = store_with_page();

        let page = store.section_add(&uid, SectionType::TripleImageCol, None).unwrap();
        let triple_uid = page.content_draft_sections[0].uid().to_string();

        let page = store
            .section_update(&uid, &triple_uid, &SectionPatch::nth_image(1, "https://cdn/b.jpg"))
            .unwrap();
        let images = all_images(&page.content_draft_sections);
        assert_eq!(images, vec!["https://cdn/b.jpg"]);

        // Deleting the slot resets it to the placeholder.
        let mut patch = SectionPatch::remove_image();
        patch.nth_image = Some(1);
        let page = store.section_update(&uid, &triple_uid, &patch).unwrap();
        assert!(all_images(&page.content_draft_sections).is_empty());
        assert!(page.content_draft_sections[0]
            .image_slots()
            .iter()
            .all(|m| m.url == PLACEHOLDER_IMAGE_URL));

        // Out-of-range slot is rejected.
        assert!(matches!(
            store.section_update(&uid, &triple_uid, &SectionPatch::nth_image(3, "https://x/y.jpg")),
            Err(BackendError::PatchRejected(_))
        ));

        // Text patch on an image variant is rejected.
        assert!(matches!(
            store.section_update(&uid, &triple_uid, &SectionPatch::text("hi")),
            Err(BackendError::PatchRejected(_))
        ));

        // Video patch round trip.
        let page = store.section_add(&uid, SectionType::VideoBlock, None).unwrap();
        let video_uid = page.content_draft_sections[1].uid().to_string();
        let page = store
            .section_update(
                &uid,
                &video_uid,
                &SectionPatch::video("https://cdn/v.mp4", "clip", true),
            )
            .unwrap();
        match &page.content_draft_sections[1] {
            Section::VideoBlock {
                video,
                title,
                processing,
                ..
            } => {
                assert_eq!(video.url, "https://cdn/v.mp4");
                assert_eq!(title, "clip");
                assert!(*processing);
            }
            other => panic!("expected video block, got {:?}", other.section_type()),
        }
    }

    #[test]
    fn test_configured_placeholder_still_blocks_publish() {
        let mut store = PageStore::new(BackendConfig {
            placeholder_image_url: "https://cdn/custom-blank.png".to_string(),
            ..BackendConfig::default()
        });
        let uid = store.create_page("site-1", "Hello", "hello").unwrap().uid;

        let page = store.section_add(&uid, SectionType::TextBlock, None).unwrap();
        let text_uid = page.content_draft_sections[0].uid().to_string();
        store
            .section_update(&uid, &text_uid, &SectionPatch::text("body"))
            .unwrap();
        let page = store.section_add(&uid, SectionType::ImageRow, None).unwrap();
        let row_uid = page.content_draft_sections[1].uid().to_string();

        // Fresh slots point at the configured placeholder asset.
        assert_eq!(
            page.content_draft_sections[1].image_slots()[0].url,
            "https://cdn/custom-blank.png"
        );
        assert!(all_images(&page.content_draft_sections).is_empty());

        store
            .section_update(&uid, &row_uid, &SectionPatch::image("https://cdn/real.jpg"))
            .unwrap();
        let page = store
            .section_update(&uid, &row_uid, &SectionPatch::remove_image())
            .unwrap();
        assert_eq!(
            page.content_draft_sections[1].image_slots()[0].url,
            "https://cdn/custom-blank.png"
        );

        // The cleared slot is still a placeholder, so publishing stays
        // blocked.
        assert_eq!(
            store.section_publish(&uid),
            Err(BackendError::PublishBlocked(
                folio_editor::PublishBlocker::PlaceholderImage
            ))
        );
    }

    #[test]
    fn test_malformed_media_url_patch_rejected() {
        let (mut store, uid) = store_with_page();

        let page = store.section_add(&uid, SectionType::ImageRow, None).unwrap();
        let row_uid = page.content_draft_sections[0].uid().to_string();
        assert!(matches!(
            store.section_update(&uid, &row_uid, &SectionPatch::image("not-a-url.jpg")),
            Err(BackendError::PatchRejected(_))
        ));
        // The slot keeps its placeholder.
        let page = store.get_page(&uid).unwrap();
        assert!(page.content_draft_sections[0].image_slots()[0].is_placeholder());

        let page = store.section_add(&uid, SectionType::VideoBlock, None).unwrap();
        let video_uid = page.content_draft_sections[1].uid().to_string();
        assert!(matches!(
            store.section_update(
                &uid,
                &video_uid,
                &SectionPatch::video("file:///v.mp4", "clip", false),
            ),
            Err(BackendError::PatchRejected(_))
        ));
    }

    #[test]
    fn test_rejected_patch_leaves_section_untouched() {
        let (mut store, uid) = store_with_page();
        let page = store.section_add(&uid, SectionType::TextBlock, None).unwrap();
        let text_uid = page.content_draft_sections[0].uid().to_string();
        store
            .section_update(&uid, &text_uid, &SectionPatch::text("original"))
            .unwrap();

        // new_text would apply, new_title is rejected for this variant;
        // neither change may land.
        let mut patch = SectionPatch::text("replaced");
        patch.new_title = Some("nope".to_string());
        assert!(matches!(
            store.section_update(&uid, &text_uid, &patch),
            Err(BackendError::PatchRejected(_))
        ));

        let page = store.get_page(&uid).unwrap();
        assert_eq!(
            page.content_draft_sections[0].text().unwrap().markdown,
            "original"
        );
    }

    #[test]
    fn test_publish_copies_draft_and_stamps() {
        let (mut store, uid) = store_with_page();

        // Gates re-checked server-side: empty draft cannot publish.
        assert_eq!(
            store.section_publish(&uid),
            Err(BackendError::PublishBlocked(
                folio_editor::PublishBlocker::NoSections
            ))
        );

        let page = store.section_add(&uid, SectionType::Header, None).unwrap();
        let header_uid = page.content_draft_sections[0].uid().to_string();
        store
            .section_update(&uid, &header_uid, &SectionPatch::text("# Title"))
            .unwrap();
        let page = store.section_add(&uid, SectionType::ImageRow, None).unwrap();
        let row_uid = page.content_draft_sections[1].uid().to_string();
        store
            .section_update(&uid, &row_uid, &SectionPatch::image("https://cdn/a.jpg"))
            .unwrap();

        let page = store.section_publish(&uid).unwrap();
        assert!(page.is_published);
        assert!(page.last_publish.is_some());
        assert_eq!(page.content_sections, page.content_draft_sections);

        // Further draft edits do not touch the published sequence.
        let page = store.section_delete(&uid, &row_uid).unwrap();
        assert_eq!(page.content_sections.len(), 2);
        assert_eq!(page.content_draft_sections.len(), 1);
    }

    #[test]
    fn test_delete_page_tombstones() {
        let (mut store, uid) = store_with_page();
        let page = store.delete_page(&uid).unwrap();
        assert!(page.is_deleted);
        assert!(!page.is_published);
    }

    #[test]
    fn test_update_page_fields() {
        let (mut store, uid) = store_with_page();
        let patch = PagePatch {
            title: Some("New title".to_string()),
            page_color: Some("#112233".to_string()),
            is_published: None,
            meta_tags: Some(vec!["travel".to_string(), "food".to_string()]),
        };
        let page = store.update_page(&uid, &patch).unwrap();
        assert_eq!(page.title, "New title");
        assert_eq!(page.page_color, "#112233");
        assert_eq!(page.meta_tags, vec!["travel", "food"]);
    }
}
