//! Clipboard history domain module

mod entry;
mod format;

pub use entry::{
    truncate_preview, BinaryPayload, ClipContent, ContentType, HistoryEntry, PREVIEW_MAX_CHARS,
};
pub use format::{
    file_url_to_path, looks_like_file_uri, path_to_file_url, ClipFormat, ClipboardSnapshot,
    FormatData, Representation,
};
