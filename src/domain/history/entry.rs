//! History entry value objects

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Maximum preview length for text entries (in characters)
pub const PREVIEW_MAX_CHARS: usize = 100;

/// Kind of content held by a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Text,
    Image,
    File,
    Pdf,
    RichText,
}

impl ContentType {
    /// Cache file extension for binary content types
    pub const fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Image => Some("png"),
            Self::Pdf => Some("pdf"),
            Self::RichText => Some("rtf"),
            Self::Text | Self::File => None,
        }
    }

    /// Human readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Image => "Image",
            Self::File => "File",
            Self::Pdf => "PDF document",
            Self::RichText => "Rich text document",
        }
    }

    /// Short lowercase name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::File => "file",
            Self::Pdf => "pdf",
            Self::RichText => "rtf",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Binary clipboard content with its optional on-disk materialization.
///
/// The cache file, when present, belongs to the entry holding this payload
/// and must be deleted when the entry leaves the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPayload {
    bytes: Vec<u8>,
    cache_file: Option<PathBuf>,
}

impl BinaryPayload {
    pub fn new(bytes: Vec<u8>, cache_file: Option<PathBuf>) -> Self {
        Self { bytes, cache_file }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn cache_file(&self) -> Option<&Path> {
        self.cache_file.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Content of a history entry, one variant per content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipContent {
    Text(String),
    /// Reference to the original external file, not a copy
    File(PathBuf),
    Image(BinaryPayload),
    Pdf(BinaryPayload),
    RichText(BinaryPayload),
}

impl ClipContent {
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Text(_) => ContentType::Text,
            Self::File(_) => ContentType::File,
            Self::Image(_) => ContentType::Image,
            Self::Pdf(_) => ContentType::Pdf,
            Self::RichText(_) => ContentType::RichText,
        }
    }

    /// Binary payload for image, PDF and rich text content
    pub fn binary(&self) -> Option<&BinaryPayload> {
        match self {
            Self::Image(p) | Self::Pdf(p) | Self::RichText(p) => Some(p),
            Self::Text(_) | Self::File(_) => None,
        }
    }

    /// Cache file owned by this content, if any
    pub fn cache_file(&self) -> Option<&Path> {
        self.binary().and_then(BinaryPayload::cache_file)
    }

    /// Content equality used for deduplication.
    ///
    /// Text and file entries compare by value, binary entries by their bytes.
    /// Entries of different types are never equal.
    pub fn same_content(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::File(a), Self::File(b)) => a == b,
            (Self::Image(a), Self::Image(b))
            | (Self::Pdf(a), Self::Pdf(b))
            | (Self::RichText(a), Self::RichText(b)) => a.bytes() == b.bytes(),
            _ => false,
        }
    }
}

/// A single captured clipboard item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    content: ClipContent,
    preview: String,
    captured_at: DateTime<Local>,
}

impl HistoryEntry {
    /// Create an entry, deriving its preview from the content
    pub fn new(content: ClipContent, captured_at: DateTime<Local>) -> Self {
        let preview = build_preview(&content);
        Self {
            content,
            preview,
            captured_at,
        }
    }

    /// Create a text entry captured now
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(ClipContent::Text(text.into()), Local::now())
    }

    pub fn content(&self) -> &ClipContent {
        &self.content
    }

    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn captured_at(&self) -> DateTime<Local> {
        self.captured_at
    }

    pub fn cache_file(&self) -> Option<&Path> {
        self.content.cache_file()
    }

    /// Text value for text entries
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            ClipContent::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn same_content(&self, other: &Self) -> bool {
        self.content.same_content(&other.content)
    }
}

/// Truncate text to the preview length, appending an ellipsis
pub fn truncate_preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_MAX_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(PREVIEW_MAX_CHARS - 3).collect();
    format!("{}...", head)
}

fn build_preview(content: &ClipContent) -> String {
    match content {
        ClipContent::Text(text) => truncate_preview(text),
        ClipContent::File(path) => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned()),
        ClipContent::Image(p) | ClipContent::Pdf(p) | ClipContent::RichText(p) => p
            .cache_file()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| content.content_type().label().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(bytes: &[u8], cache: Option<&str>) -> ClipContent {
        ClipContent::Image(BinaryPayload::new(bytes.to_vec(), cache.map(PathBuf::from)))
    }

    #[test]
    fn extensions_for_binary_types() {
        assert_eq!(ContentType::Image.extension(), Some("png"));
        assert_eq!(ContentType::Pdf.extension(), Some("pdf"));
        assert_eq!(ContentType::RichText.extension(), Some("rtf"));
        assert_eq!(ContentType::Text.extension(), None);
        assert_eq!(ContentType::File.extension(), None);
    }

    #[test]
    fn short_text_preview_is_unchanged() {
        let entry = HistoryEntry::text("hello");
        assert_eq!(entry.preview(), "hello");
    }

    #[test]
    fn long_text_preview_is_truncated() {
        let long = "x".repeat(150);
        let entry = HistoryEntry::text(long);
        assert_eq!(entry.preview().chars().count(), PREVIEW_MAX_CHARS);
        assert!(entry.preview().ends_with("..."));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let long = "é".repeat(120);
        let preview = truncate_preview(&long);
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS);
    }

    #[test]
    fn file_preview_is_base_name() {
        let entry = HistoryEntry::new(
            ClipContent::File(PathBuf::from("/Users/me/report.pdf")),
            Local::now(),
        );
        assert_eq!(entry.preview(), "report.pdf");
    }

    #[test]
    fn binary_preview_is_cache_path_or_label() {
        let cached = HistoryEntry::new(image(b"png", Some("/tmp/c/clip.png")), Local::now());
        assert_eq!(cached.preview(), "/tmp/c/clip.png");

        let uncached = HistoryEntry::new(image(b"png", None), Local::now());
        assert_eq!(uncached.preview(), "Image");
    }

    #[test]
    fn same_content_compares_text_by_value() {
        assert!(HistoryEntry::text("a").same_content(&HistoryEntry::text("a")));
        assert!(!HistoryEntry::text("a").same_content(&HistoryEntry::text("b")));
    }

    #[test]
    fn same_content_compares_binary_by_bytes_not_cache_path() {
        let a = image(b"same", Some("/tmp/a.png"));
        let b = image(b"same", Some("/tmp/b.png"));
        let c = image(b"other", Some("/tmp/a.png"));
        assert!(a.same_content(&b));
        assert!(!a.same_content(&c));
    }

    #[test]
    fn same_content_never_matches_across_types() {
        let pdf = ClipContent::Pdf(BinaryPayload::new(b"same".to_vec(), None));
        let rtf = ClipContent::RichText(BinaryPayload::new(b"same".to_vec(), None));
        assert!(!pdf.same_content(&rtf));
        assert!(!ClipContent::Text("/tmp/a".into())
            .same_content(&ClipContent::File(PathBuf::from("/tmp/a"))));
    }
}
