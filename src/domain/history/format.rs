//! Clipboard format identifiers and snapshots
//!
//! The OS exposes clipboard content under platform specific identifiers
//! (macOS UTIs, X11/Wayland MIME targets, Windows format names). This module
//! folds them into the handful of abstract formats the history understands.

use std::path::{Path, PathBuf};

/// Abstract clipboard formats recognized by the history engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipFormat {
    /// List of file references (Finder / file manager copy)
    FileList,
    /// Single file URL string
    FileUrl,
    /// Plain UTF-8 text
    Text,
    /// PNG image data
    Png,
    /// TIFF image data
    Tiff,
    /// PDF document data
    Pdf,
    /// RTF document data
    Rtf,
}

const FILE_LIST_IDS: &[&str] = &[
    "NSFilenamesPboardType",
    "CF_HDROP",
    "x-special/gnome-copied-files",
];

const FILE_URL_IDS: &[&str] = &["public.file-url", "text/uri-list"];

const TEXT_IDS: &[&str] = &[
    "public.utf8-plain-text",
    "NSStringPboardType",
    "text/plain;charset=utf-8",
    "text/plain",
    "UTF8_STRING",
    "STRING",
    "TEXT",
    "CF_UNICODETEXT",
    "CF_TEXT",
];

const PNG_IDS: &[&str] = &["public.png", "image/png", "PNG"];

const TIFF_IDS: &[&str] = &["public.tiff", "NeXT TIFF v4.0 pasteboard type", "image/tiff"];

const PDF_IDS: &[&str] = &["com.adobe.pdf", "Apple PDF pasteboard type", "application/pdf"];

const RTF_IDS: &[&str] = &[
    "public.rtf",
    "NSRTFPboardType",
    "text/rtf",
    "application/rtf",
    "Rich Text Format",
];

impl ClipFormat {
    /// Map a platform format identifier onto an abstract format.
    ///
    /// Returns `None` for identifiers the history does not capture.
    pub fn classify(identifier: &str) -> Option<Self> {
        let id = identifier.trim();
        let table: [(&[&str], ClipFormat); 7] = [
            (FILE_LIST_IDS, Self::FileList),
            (FILE_URL_IDS, Self::FileUrl),
            (TEXT_IDS, Self::Text),
            (PNG_IDS, Self::Png),
            (TIFF_IDS, Self::Tiff),
            (PDF_IDS, Self::Pdf),
            (RTF_IDS, Self::Rtf),
        ];

        table
            .iter()
            .find(|(ids, _)| ids.iter().any(|known| known.eq_ignore_ascii_case(id)))
            .map(|(_, format)| *format)
    }

    /// Whether this format references files rather than carrying content
    pub const fn is_file_reference(&self) -> bool {
        matches!(self, Self::FileList | Self::FileUrl)
    }

    /// Whether this format carries image data
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Png | Self::Tiff)
    }

    /// Whether this format carries a document (PDF or rich text)
    pub const fn is_document(&self) -> bool {
        matches!(self, Self::Pdf | Self::Rtf)
    }
}

/// Payload of a single clipboard representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatData {
    Files(Vec<PathBuf>),
    Text(String),
    Bytes(Vec<u8>),
}

/// One format of clipboard content, used both when reading and writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Representation {
    pub format: ClipFormat,
    pub data: FormatData,
}

impl Representation {
    pub fn new(format: ClipFormat, data: FormatData) -> Self {
        Self { format, data }
    }
}

/// Point-in-time view of the clipboard.
///
/// `declared` keeps every identifier the OS advertised, in OS order.
/// `representations` holds the data read for the classified ones, in the
/// same relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardSnapshot {
    declared: Vec<String>,
    representations: Vec<Representation>,
}

impl ClipboardSnapshot {
    pub fn new(declared: Vec<String>, representations: Vec<Representation>) -> Self {
        Self {
            declared,
            representations,
        }
    }

    /// Create a snapshot with no content
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder helper used by adapters and tests
    pub fn with(mut self, identifier: &str, data: FormatData) -> Self {
        self.declared.push(identifier.to_string());
        if let Some(format) = ClipFormat::classify(identifier) {
            self.representations.push(Representation::new(format, data));
        }
        self
    }

    pub fn declared(&self) -> &[String] {
        &self.declared
    }

    pub fn representations(&self) -> &[Representation] {
        &self.representations
    }

    pub fn is_empty(&self) -> bool {
        self.representations.is_empty()
    }
}

/// Check whether text is nothing but a single `file://` URI.
///
/// File drags commonly expose the URI as plain text too; such text is not
/// captured as a text entry.
pub fn looks_like_file_uri(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.len() > "file://".len()
        && trimmed
            .get(..7)
            .is_some_and(|p| p.eq_ignore_ascii_case("file://"))
        && !trimmed.contains(char::is_whitespace)
}

/// Convert a `file://` URL into a filesystem path.
///
/// Plain paths are returned unchanged. Returns `None` for other URL schemes
/// or undecodable input.
pub fn file_url_to_path(url: &str) -> Option<PathBuf> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    if !url.get(..7).is_some_and(|p| p.eq_ignore_ascii_case("file://")) {
        if url.contains("://") {
            return None;
        }
        return Some(PathBuf::from(url));
    }

    // file://localhost/path and file:///path are both local
    let rest = &url[7..];
    let rest = rest.strip_prefix("localhost").unwrap_or(rest);
    let decoded = urlencoding::decode(rest).ok()?;
    if decoded.is_empty() {
        return None;
    }
    Some(PathBuf::from(decoded.into_owned()))
}

/// Convert a filesystem path into a percent-encoded `file://` URL
pub fn path_to_file_url(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let encoded: Vec<String> = raw
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    let joined = encoded.join("/");
    if joined.starts_with('/') {
        format!("file://{}", joined)
    } else {
        format!("file:///{}", joined)
    }
}
