//! Section → view mapping.
//!
//! Pure function of variant → view tree; no state, no persistence. The
//! editor mode wraps the public presentation in an editable affordance
//! naming which inline control the variant swaps to — all persistence
//! still goes through the editor operations.

use folio_model::{MediaRef, Page, RichText, Section};

use crate::view::ViewNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Read-only public page.
    Public,
    /// Hover-to-edit affordances around each section.
    Editor,
}

/// Inline editing control a variant swaps to on activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditControl {
    RichText,
    Image,
    TextAndImage,
    EmbedUrl,
    Video,
}

impl EditControl {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditControl::RichText => "rich-text",
            EditControl::Image => "image",
            EditControl::TextAndImage => "text-and-image",
            EditControl::EmbedUrl => "embed-url",
            EditControl::Video => "video",
        }
    }

    /// Which control edits the given section.
    pub fn for_section(section: &Section) -> EditControl {
        match section {
            Section::Header { .. } | Section::TextBlock { .. } => EditControl::RichText,
            Section::TextImageRight { .. } | Section::TextImageLeft { .. } => {
                EditControl::TextAndImage
            }
            Section::ImageRow { .. } | Section::TripleImageCol { .. } => EditControl::Image,
            Section::VideoRowEmbedOnly { .. } => EditControl::EmbedUrl,
            Section::VideoBlock { .. } => EditControl::Video,
        }
    }
}

/// Render a page: the published sequence for the public view, the
/// draft sequence for the editor.
pub fn render_page(page: &Page, mode: RenderMode) -> ViewNode {
    let sections = match mode {
        RenderMode::Public => &page.content_sections,
        RenderMode::Editor => &page.content_draft_sections,
    };

    ViewNode::element("article")
        .with_attr("data-page-uid", &page.uid)
        .with_attr("style", format!("background-color: {}", page.page_color))
        .with_children(
            sections
                .iter()
                .map(|section| render_section(section, mode))
                .collect(),
        )
}

/// Render one section in the given mode.
pub fn render_section(section: &Section, mode: RenderMode) -> ViewNode {
    let view = present(section);
    match mode {
        RenderMode::Public => view,
        RenderMode::Editor => ViewNode::element("div")
            .with_attr("data-editable", "true")
            .with_attr("data-section-uid", section.uid())
            .with_attr("data-section-type", section.section_type().as_str())
            .with_attr(
                "data-edit-control",
                EditControl::for_section(section).as_str(),
            )
            .with_child(view),
    }
}

fn rich_text(text: &RichText) -> ViewNode {
    ViewNode::rich_html(if text.html.is_empty() {
        text.markdown.clone()
    } else {
        text.html.clone()
    })
}

fn img(image: &MediaRef) -> ViewNode {
    ViewNode::element("img").with_attr("src", &image.url)
}

/// Read-only presentation of one section's payload.
fn present(section: &Section) -> ViewNode {
    match section {
        Section::Header { text, .. } => ViewNode::element("header")
            .with_attr("class", "section-header")
            .with_child(rich_text(text)),

        Section::TextBlock { text, .. } => ViewNode::element("div")
            .with_attr("class", "section-text")
            .with_child(rich_text(text)),

        Section::TextImageRight { text, image, .. } => ViewNode::element("div")
            .with_attr("class", "section-text-image section-text-image--right")
            .with_child(rich_text(text))
            .with_child(img(image)),

        Section::TextImageLeft { text, image, .. } => ViewNode::element("div")
            .with_attr("class", "section-text-image section-text-image--left")
            .with_child(img(image))
            .with_child(rich_text(text)),

        Section::ImageRow { image, .. } => ViewNode::element("figure")
            .with_attr("class", "section-image-row")
            .with_child(img(image)),

        Section::TripleImageCol { images, .. } => ViewNode::element("div")
            .with_attr("class", "section-triple-image")
            .with_children(images.iter().map(img).collect()),

        Section::VideoRowEmbedOnly { embed_url, .. } => match embed_url {
            Some(url) => ViewNode::element("iframe")
                .with_attr("class", "section-video-embed")
                .with_attr("src", url)
                .with_attr("allowfullscreen", "true"),
            None => ViewNode::element("div")
                .with_attr("class", "section-video-embed section-video-embed--empty"),
        },

        Section::VideoBlock {
            video,
            title,
            text,
            processing,
            ..
        } => {
            let player = if *processing {
                ViewNode::element("div")
                    .with_attr("class", "section-video--processing")
                    .with_child(ViewNode::text("Video is processing…"))
            } else {
                ViewNode::element("video")
                    .with_attr("src", &video.url)
                    .with_attr("controls", "true")
            };
            ViewNode::element("figure")
                .with_attr("class", "section-video")
                .with_child(player)
                .with_child(ViewNode::element("h3").with_child(ViewNode::text(title)))
                .with_child(
                    ViewNode::element("figcaption").with_child(rich_text(text)),
                )
        }
    }
}
