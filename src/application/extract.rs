//! Clipboard content classification

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::domain::history::{
    file_url_to_path, looks_like_file_uri, BinaryPayload, ClipContent, ClipFormat,
    ClipboardSnapshot, ContentType, FormatData, HistoryEntry, Representation,
};

use super::ports::{CacheStore, SharedLogger};

const COMPONENT: &str = "extract";

/// Turns a clipboard snapshot into at most one history entry.
///
/// Precedence: file reference, then plain text that is not a bare file URI,
/// then the first image format, then PDF or rich text. Binary payloads are
/// written to the cache store on the way in.
pub struct ContentExtractor {
    cache: Arc<dyn CacheStore>,
    logger: SharedLogger,
}

impl ContentExtractor {
    pub fn new(cache: Arc<dyn CacheStore>, logger: SharedLogger) -> Self {
        Self { cache, logger }
    }

    /// Classify the snapshot. `None` means no recognized format.
    pub fn extract(&self, snapshot: &ClipboardSnapshot) -> Option<HistoryEntry> {
        self.extract_at(snapshot, Local::now())
    }

    pub fn extract_at(
        &self,
        snapshot: &ClipboardSnapshot,
        captured_at: DateTime<Local>,
    ) -> Option<HistoryEntry> {
        let reps = snapshot.representations();

        if let Some(path) = reps.iter().find_map(file_reference) {
            return Some(HistoryEntry::new(ClipContent::File(path), captured_at));
        }

        if let Some(text) = reps.iter().find_map(capturable_text) {
            return Some(HistoryEntry::new(
                ClipContent::Text(text.to_string()),
                captured_at,
            ));
        }

        if let Some(bytes) = first_bytes(reps, |f| f.is_image()).map(|(_, b)| b) {
            let payload = self.cache_payload(bytes, ContentType::Image, captured_at);
            return Some(HistoryEntry::new(ClipContent::Image(payload), captured_at));
        }

        if let Some((format, bytes)) = first_bytes(reps, |f| f.is_document()) {
            let content = if format == ClipFormat::Pdf {
                ClipContent::Pdf(self.cache_payload(bytes, ContentType::Pdf, captured_at))
            } else {
                ClipContent::RichText(self.cache_payload(bytes, ContentType::RichText, captured_at))
            };
            return Some(HistoryEntry::new(content, captured_at));
        }

        None
    }

    fn cache_payload(
        &self,
        bytes: &[u8],
        content_type: ContentType,
        captured_at: DateTime<Local>,
    ) -> BinaryPayload {
        let extension = content_type.extension().unwrap_or("bin");
        let cache_file = match self.cache.save(bytes, extension, captured_at) {
            Ok(path) => Some(path),
            Err(e) => {
                self.logger.warn(COMPONENT, &e.to_string());
                None
            }
        };
        BinaryPayload::new(bytes.to_vec(), cache_file)
    }
}

fn file_reference(rep: &Representation) -> Option<PathBuf> {
    if !rep.format.is_file_reference() {
        return None;
    }
    match &rep.data {
        FormatData::Files(paths) => paths.first().cloned(),
        FormatData::Text(text) => first_path_in_list(text),
        FormatData::Bytes(bytes) => std::str::from_utf8(bytes).ok().and_then(first_path_in_list),
    }
}

/// First path in a URI list or GNOME copied-files payload
fn first_path_in_list(text: &str) -> Option<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| *line != "copy" && *line != "cut")
        .find_map(file_url_to_path)
}

fn capturable_text(rep: &Representation) -> Option<&str> {
    match (&rep.format, &rep.data) {
        (ClipFormat::Text, FormatData::Text(text))
            if !text.is_empty() && !looks_like_file_uri(text) =>
        {
            Some(text.as_str())
        }
        _ => None,
    }
}

fn first_bytes(
    reps: &[Representation],
    accept: impl Fn(&ClipFormat) -> bool,
) -> Option<(ClipFormat, &[u8])> {
    reps.iter().find_map(|rep| match &rep.data {
        FormatData::Bytes(bytes) if accept(&rep.format) && !bytes.is_empty() => {
            Some((rep.format, bytes.as_slice()))
        }
        _ => None,
    })
}
