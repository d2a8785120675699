//! Content section variants and their payload shapes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default URL for "no image chosen yet" slots. Placeholder slots are
/// recognized by their media type, not this URL — backends may serve a
/// different placeholder asset — and must never reach a published page;
/// the publish gates reject drafts that still carry one.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://static.folio.page/placeholder.png";

/// Closed set of section type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionType {
    Header,
    TextBlock,
    TextImageRight,
    TextImageLeft,
    ImageRow,
    TripleImageCol,
    VideoRowEmbedOnly,
    VideoBlock,
}

impl SectionType {
    pub const ALL: [SectionType; 8] = [
        SectionType::Header,
        SectionType::TextBlock,
        SectionType::TextImageRight,
        SectionType::TextImageLeft,
        SectionType::ImageRow,
        SectionType::TripleImageCol,
        SectionType::VideoRowEmbedOnly,
        SectionType::VideoBlock,
    ];

    /// Wire tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Header => "header",
            SectionType::TextBlock => "text-block",
            SectionType::TextImageRight => "text-image-right",
            SectionType::TextImageLeft => "text-image-left",
            SectionType::ImageRow => "image-row",
            SectionType::TripleImageCol => "triple-image-col",
            SectionType::VideoRowEmbedOnly => "video-row-embed-only",
            SectionType::VideoBlock => "video-block",
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SectionType {
    type Err = SectionShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SectionShapeError::UnknownType(s.to_string()))
    }
}

/// Rich text payload carried in both authored (markdown) and rendered
/// (html) form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    pub markdown: String,
    pub html: String,
}

impl RichText {
    /// Build a payload from markdown, rendering the html half.
    pub fn from_markdown(markdown: impl Into<String>) -> Self {
        let markdown = markdown.into();
        let parser = pulldown_cmark::Parser::new(&markdown);
        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, parser);
        Self { markdown, html }
    }

    pub fn is_empty(&self) -> bool {
        self.markdown.trim().is_empty() && self.html.trim().is_empty()
    }

    /// Markdown if non-empty, html otherwise.
    pub fn body(&self) -> &str {
        if self.markdown.trim().is_empty() {
            &self.html
        } else {
            &self.markdown
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaType {
    Image,
    Video,
    Placeholder,
}

/// Reference to an uploaded or external media asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

impl MediaRef {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            media_type: MediaType::Image,
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            media_type: MediaType::Video,
        }
    }

    /// The "no image chosen yet" slot value, pointing at the default
    /// placeholder asset.
    pub fn placeholder() -> Self {
        Self::placeholder_with_url(PLACEHOLDER_IMAGE_URL)
    }

    /// A placeholder slot pointing at a custom asset.
    pub fn placeholder_with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            media_type: MediaType::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.media_type == MediaType::Placeholder || self.url == PLACEHOLDER_IMAGE_URL
    }
}

/// One discrete content block within a page.
///
/// The `type` tag determines which payload fields are present; no
/// instance can mix payload shapes across variants. A triple-image
/// column always carries exactly three media entries — the array type
/// makes two or four entries fail deserialization outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Section {
    Header {
        uid: String,
        text: RichText,
    },
    TextBlock {
        uid: String,
        text: RichText,
    },
    TextImageRight {
        uid: String,
        text: RichText,
        image: MediaRef,
    },
    TextImageLeft {
        uid: String,
        text: RichText,
        image: MediaRef,
    },
    ImageRow {
        uid: String,
        image: MediaRef,
    },
    TripleImageCol {
        uid: String,
        images: [MediaRef; 3],
    },
    VideoRowEmbedOnly {
        uid: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        embed_url: Option<String>,
    },
    VideoBlock {
        uid: String,
        video: MediaRef,
        title: String,
        text: RichText,
        processing: bool,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SectionShapeError {
    #[error("unknown section type: {0}")]
    UnknownType(String),

    #[error("section {uid}: text payload is empty")]
    EmptyText { uid: String },

    #[error("section {uid}: media url is not a valid http(s) url: {url:?}")]
    MalformedMediaUrl { uid: String, url: String },
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//")
}

impl Section {
    /// Default instance created by the add operation. Text payloads start
    /// empty and image slots start at the placeholder sentinel, so a
    /// fresh section never passes the publish gates by accident.
    pub fn empty(section_type: SectionType, uid: impl Into<String>) -> Self {
        let uid = uid.into();
        match section_type {
            SectionType::Header => Section::Header {
                uid,
                text: RichText::default(),
            },
            SectionType::TextBlock => Section::TextBlock {
                uid,
                text: RichText::default(),
            },
            SectionType::TextImageRight => Section::TextImageRight {
                uid,
                text: RichText::default(),
                image: MediaRef::placeholder(),
            },
            SectionType::TextImageLeft => Section::TextImageLeft {
                uid,
                text: RichText::default(),
                image: MediaRef::placeholder(),
            },
            SectionType::ImageRow => Section::ImageRow {
                uid,
                image: MediaRef::placeholder(),
            },
            SectionType::TripleImageCol => Section::TripleImageCol {
                uid,
                images: [
                    MediaRef::placeholder(),
                    MediaRef::placeholder(),
                    MediaRef::placeholder(),
                ],
            },
            SectionType::VideoRowEmbedOnly => Section::VideoRowEmbedOnly {
                uid,
                embed_url: None,
            },
            SectionType::VideoBlock => Section::VideoBlock {
                uid,
                video: MediaRef::video(""),
                title: String::new(),
                text: RichText::default(),
                processing: false,
            },
        }
    }

    pub fn uid(&self) -> &str {
        match self {
            Section::Header { uid, .. }
            | Section::TextBlock { uid, .. }
            | Section::TextImageRight { uid, .. }
            | Section::TextImageLeft { uid, .. }
            | Section::ImageRow { uid, .. }
            | Section::TripleImageCol { uid, .. }
            | Section::VideoRowEmbedOnly { uid, .. }
            | Section::VideoBlock { uid, .. } => uid,
        }
    }

    pub fn section_type(&self) -> SectionType {
        match self {
            Section::Header { .. } => SectionType::Header,
            Section::TextBlock { .. } => SectionType::TextBlock,
            Section::TextImageRight { .. } => SectionType::TextImageRight,
            Section::TextImageLeft { .. } => SectionType::TextImageLeft,
            Section::ImageRow { .. } => SectionType::ImageRow,
            Section::TripleImageCol { .. } => SectionType::TripleImageCol,
            Section::VideoRowEmbedOnly { .. } => SectionType::VideoRowEmbedOnly,
            Section::VideoBlock { .. } => SectionType::VideoBlock,
        }
    }

    /// Rich text payload, for the variants that carry one.
    pub fn text(&self) -> Option<&RichText> {
        match self {
            Section::Header { text, .. }
            | Section::TextBlock { text, .. }
            | Section::TextImageRight { text, .. }
            | Section::TextImageLeft { text, .. }
            | Section::VideoBlock { text, .. } => Some(text),
            Section::ImageRow { .. }
            | Section::TripleImageCol { .. }
            | Section::VideoRowEmbedOnly { .. } => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut RichText> {
        match self {
            Section::Header { text, .. }
            | Section::TextBlock { text, .. }
            | Section::TextImageRight { text, .. }
            | Section::TextImageLeft { text, .. }
            | Section::VideoBlock { text, .. } => Some(text),
            Section::ImageRow { .. }
            | Section::TripleImageCol { .. }
            | Section::VideoRowEmbedOnly { .. } => None,
        }
    }

    /// Image slots of this section (three for a triple column, one for
    /// the single-image variants, none otherwise). Video media is not an
    /// image slot.
    pub fn image_slots(&self) -> &[MediaRef] {
        match self {
            Section::TextImageRight { image, .. }
            | Section::TextImageLeft { image, .. }
            | Section::ImageRow { image, .. } => std::slice::from_ref(image),
            Section::TripleImageCol { images, .. } => images,
            Section::Header { .. }
            | Section::TextBlock { .. }
            | Section::VideoRowEmbedOnly { .. }
            | Section::VideoBlock { .. } => &[],
        }
    }

    pub fn image_slots_mut(&mut self) -> &mut [MediaRef] {
        match self {
            Section::TextImageRight { image, .. }
            | Section::TextImageLeft { image, .. }
            | Section::ImageRow { image, .. } => std::slice::from_mut(image),
            Section::TripleImageCol { images, .. } => images,
            Section::Header { .. }
            | Section::TextBlock { .. }
            | Section::VideoRowEmbedOnly { .. }
            | Section::VideoBlock { .. } => &mut [],
        }
    }

    /// Shape predicate for the variant. Pure; never mutates. Media URLs
    /// are checked before text payloads, so a url-bearing section with a
    /// bad url reports the url even while its text is still blank.
    pub fn validate(&self) -> Result<(), SectionShapeError> {
        let uid = self.uid().to_string();
        match self {
            Section::Header { text, .. } | Section::TextBlock { text, .. } => {
                if text.is_empty() {
                    return Err(SectionShapeError::EmptyText { uid });
                }
            }
            Section::TextImageRight { text, image, .. }
            | Section::TextImageLeft { text, image, .. } => {
                if !is_http_url(&image.url) {
                    return Err(SectionShapeError::MalformedMediaUrl {
                        uid,
                        url: image.url.clone(),
                    });
                }
                if text.is_empty() {
                    return Err(SectionShapeError::EmptyText { uid });
                }
            }
            Section::ImageRow { image, .. } => {
                if !is_http_url(&image.url) {
                    return Err(SectionShapeError::MalformedMediaUrl {
                        uid,
                        url: image.url.clone(),
                    });
                }
            }
            Section::TripleImageCol { images, .. } => {
                for image in images {
                    if !is_http_url(&image.url) {
                        return Err(SectionShapeError::MalformedMediaUrl {
                            uid,
                            url: image.url.clone(),
                        });
                    }
                }
            }
            Section::VideoRowEmbedOnly { embed_url, .. } => {
                if let Some(url) = embed_url {
                    if !is_http_url(url) {
                        return Err(SectionShapeError::MalformedMediaUrl {
                            uid,
                            url: url.clone(),
                        });
                    }
                }
            }
            Section::VideoBlock { video, .. } => {
                if !is_http_url(&video.url) {
                    return Err(SectionShapeError::MalformedMediaUrl {
                        uid,
                        url: video.url.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
