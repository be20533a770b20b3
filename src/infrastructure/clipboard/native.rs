//! Cross-platform pasteboard adapter using clipboard-rs
//!
//! Works on Windows, macOS, and Linux (X11). The clipboard context lives on
//! a dedicated thread for the adapter's lifetime; on X11 the owning context
//! must stay alive for pasted content to remain available.
//!
//! Change detection reads the OS counter on macOS and Windows. X11 has none,
//! so there the content is fingerprinted instead and an identical re-copy
//! goes unnoticed.

use std::path::Path;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use async_trait::async_trait;
use clipboard_rs::{Clipboard, ClipboardContent, ClipboardContext};
use tokio::sync::oneshot;

use crate::application::ports::{ClipboardError, Pasteboard};
use crate::domain::history::{
    file_url_to_path, ClipFormat, ClipboardSnapshot, FormatData, Representation,
};

use super::fingerprint::ChangeCounter;
use super::sequence;

type Reply<T> = oneshot::Sender<Result<T, ClipboardError>>;

enum Request {
    Snapshot(Reply<ClipboardSnapshot>),
    Write(Vec<Representation>, Reply<()>),
}

/// Pasteboard backed by the OS clipboard
pub struct NativePasteboard {
    requests: Mutex<mpsc::Sender<Request>>,
    counter: ChangeCounter,
    /// Snapshot read while fingerprinting, handed to the next `snapshot()`
    pending: Mutex<Option<ClipboardSnapshot>>,
}

impl NativePasteboard {
    /// Open the clipboard on a worker thread
    pub fn new() -> Result<Self, ClipboardError> {
        let (tx, rx) = mpsc::channel::<Request>();
        let (ready_tx, ready_rx) = mpsc::channel();

        thread::Builder::new()
            .name("cliptrail-clipboard".into())
            .spawn(move || {
                let ctx = match ClipboardContext::new() {
                    Ok(ctx) => {
                        let _ = ready_tx.send(Ok(()));
                        ctx
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(ClipboardError::Unavailable(e.to_string())));
                        return;
                    }
                };
                // Ends once the adapter (the only sender) is dropped
                while let Ok(request) = rx.recv() {
                    serve(&ctx, request);
                }
            })
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

        ready_rx
            .recv()
            .map_err(|_| ClipboardError::Unavailable("clipboard thread exited".to_string()))??;

        Ok(Self {
            requests: Mutex::new(tx),
            counter: ChangeCounter::new(),
            pending: Mutex::new(None),
        })
    }

    async fn call<T>(&self, make: impl FnOnce(Reply<T>) -> Request) -> Result<T, ClipboardError> {
        let (tx, rx) = oneshot::channel();
        {
            let sender = self
                .requests
                .lock()
                .map_err(|_| ClipboardError::Unavailable("clipboard lock poisoned".to_string()))?;
            sender
                .send(make(tx))
                .map_err(|_| ClipboardError::Unavailable("clipboard thread stopped".to_string()))?;
        }
        rx.await
            .map_err(|_| ClipboardError::Unavailable("clipboard thread stopped".to_string()))?
    }
}

#[async_trait]
impl Pasteboard for NativePasteboard {
    async fn change_count(&self) -> Result<u64, ClipboardError> {
        if sequence::HAS_SYSTEM_COUNTER {
            return sequence::system_change_count();
        }
        let snapshot = self.call(Request::Snapshot).await?;
        let count = self.counter.observe(ChangeCounter::fingerprint(&snapshot));
        *self.pending.lock().unwrap_or_else(|p| p.into_inner()) = Some(snapshot);
        Ok(count)
    }

    async fn snapshot(&self) -> Result<ClipboardSnapshot, ClipboardError> {
        let pending = self.pending.lock().unwrap_or_else(|p| p.into_inner()).take();
        match pending {
            Some(snapshot) => Ok(snapshot),
            None => self.call(Request::Snapshot).await,
        }
    }

    async fn write(&self, representations: Vec<Representation>) -> Result<(), ClipboardError> {
        self.pending.lock().unwrap_or_else(|p| p.into_inner()).take();
        self.call(|reply| Request::Write(representations, reply)).await
    }
}

fn serve(ctx: &ClipboardContext, request: Request) {
    match request {
        Request::Snapshot(reply) => {
            let _ = reply.send(read_snapshot(ctx));
        }
        // set() empties the clipboard and writes every format in one step
        Request::Write(reps, reply) => {
            let result = ctx
                .set(to_native_contents(&reps))
                .map_err(|e| ClipboardError::WriteFailed(e.to_string()));
            let _ = reply.send(result);
        }
    }
}

fn read_snapshot(ctx: &ClipboardContext) -> Result<ClipboardSnapshot, ClipboardError> {
    let declared = ctx
        .available_formats()
        .map_err(|e| ClipboardError::ReadFailed(e.to_string()))?;

    let mut representations = Vec::new();
    let mut files_read = false;
    let mut text_read = false;

    // Formats can vanish between listing and reading; unreadable ones are skipped
    for id in &declared {
        let Some(format) = ClipFormat::classify(id) else {
            continue;
        };
        let data = match format {
            ClipFormat::FileList | ClipFormat::FileUrl => {
                if files_read {
                    continue;
                }
                files_read = true;
                match ctx.get_files() {
                    Ok(files) if !files.is_empty() => {
                        FormatData::Files(files.iter().filter_map(|f| file_url_to_path(f)).collect())
                    }
                    _ => continue,
                }
            }
            ClipFormat::Text => {
                if text_read {
                    continue;
                }
                text_read = true;
                match ctx.get_text() {
                    Ok(text) => FormatData::Text(text),
                    Err(_) => continue,
                }
            }
            ClipFormat::Png | ClipFormat::Tiff | ClipFormat::Pdf | ClipFormat::Rtf => {
                match ctx.get_buffer(id) {
                    Ok(bytes) => FormatData::Bytes(bytes),
                    Err(_) => continue,
                }
            }
        };
        representations.push(Representation::new(format, data));
    }

    Ok(ClipboardSnapshot::new(declared, representations))
}

/// Platform identifier used when writing a binary format
fn native_id(format: ClipFormat) -> Option<&'static str> {
    if cfg!(target_os = "macos") {
        match format {
            ClipFormat::Png => Some("public.png"),
            ClipFormat::Tiff => Some("public.tiff"),
            ClipFormat::Pdf => Some("com.adobe.pdf"),
            ClipFormat::Rtf => Some("public.rtf"),
            ClipFormat::FileUrl => Some("public.file-url"),
            _ => None,
        }
    } else if cfg!(target_os = "windows") {
        match format {
            ClipFormat::Png => Some("PNG"),
            ClipFormat::Tiff => Some("image/tiff"),
            ClipFormat::Pdf => Some("application/pdf"),
            ClipFormat::Rtf => Some("Rich Text Format"),
            _ => None,
        }
    } else {
        match format {
            ClipFormat::Png => Some("image/png"),
            ClipFormat::Tiff => Some("image/tiff"),
            ClipFormat::Pdf => Some("application/pdf"),
            ClipFormat::Rtf => Some("text/rtf"),
            ClipFormat::FileUrl => Some("x-special/gnome-copied-files"),
            _ => None,
        }
    }
}

fn file_list_entry(path: &Path) -> String {
    // X11 file lists are URI lists; macOS and Windows take plain paths
    if cfg!(any(target_os = "macos", target_os = "windows")) {
        path.to_string_lossy().into_owned()
    } else {
        crate::domain::history::path_to_file_url(path)
    }
}

/// Map representations onto clipboard-rs contents written as one item
fn to_native_contents(reps: &[Representation]) -> Vec<ClipboardContent> {
    reps.iter()
        .filter_map(|rep| match (&rep.format, &rep.data) {
            (ClipFormat::Text, FormatData::Text(text)) => Some(ClipboardContent::Text(text.clone())),
            (ClipFormat::FileList, FormatData::Files(paths)) => Some(ClipboardContent::Files(
                paths.iter().map(|p| file_list_entry(p)).collect(),
            )),
            (ClipFormat::FileUrl, FormatData::Text(url)) => match native_id(ClipFormat::FileUrl) {
                Some(id) if id.starts_with("x-special") => Some(ClipboardContent::Other(
                    id.to_string(),
                    format!("copy\n{}", url).into_bytes(),
                )),
                Some(id) => Some(ClipboardContent::Other(id.to_string(), url.clone().into_bytes())),
                None => None,
            },
            (format, FormatData::Bytes(bytes)) => native_id(*format)
                .map(|id| ClipboardContent::Other(id.to_string(), bytes.clone())),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn other_ids(contents: &[ClipboardContent]) -> Vec<String> {
        contents
            .iter()
            .filter_map(|c| match c {
                ClipboardContent::Other(id, _) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn text_maps_to_text() {
        let reps = vec![Representation::new(
            ClipFormat::Text,
            FormatData::Text("hello".to_string()),
        )];
        let contents = to_native_contents(&reps);
        assert!(matches!(&contents[..], [ClipboardContent::Text(t)] if t == "hello"));
    }

    #[test]
    fn image_formats_map_to_distinct_native_ids() {
        let reps = vec![
            Representation::new(ClipFormat::Png, FormatData::Bytes(b"IMG".to_vec())),
            Representation::new(ClipFormat::Tiff, FormatData::Bytes(b"IMG".to_vec())),
        ];
        let ids = other_ids(&to_native_contents(&reps));
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        for id in ids {
            assert!(ClipFormat::classify(&id).is_some_and(|f| f.is_image()));
        }
    }

    #[test]
    fn documents_round_trip_through_classify() {
        for format in [ClipFormat::Pdf, ClipFormat::Rtf] {
            let id = native_id(format).unwrap();
            assert_eq!(ClipFormat::classify(id), Some(format));
        }
    }

    #[test]
    fn file_list_is_written() {
        let reps = vec![Representation::new(
            ClipFormat::FileList,
            FormatData::Files(vec![PathBuf::from("/tmp/a b.txt")]),
        )];
        let contents = to_native_contents(&reps);
        match &contents[..] {
            [ClipboardContent::Files(files)] => assert!(files[0].contains("a")),
            _ => panic!("expected a file list"),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_file_url_uses_gnome_copied_files() {
        let reps = vec![Representation::new(
            ClipFormat::FileUrl,
            FormatData::Text("file:///tmp/a.txt".to_string()),
        )];
        let contents = to_native_contents(&reps);
        match &contents[..] {
            [ClipboardContent::Other(id, bytes)] => {
                assert_eq!(id, "x-special/gnome-copied-files");
                assert_eq!(bytes, b"copy\nfile:///tmp/a.txt");
            }
            _ => panic!("expected gnome-copied-files"),
        }
    }
}
