//! Write-back of history entries into the OS clipboard

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::domain::history::{
    path_to_file_url, ClipContent, ClipFormat, FormatData, HistoryEntry, Representation,
};

use super::ports::{
    ClipboardError, InputPermission, KeystrokeError, PasteKeystroke, Pasteboard, SharedLogger,
};

const COMPONENT: &str = "paste";

/// Errors from pasting a history entry
#[derive(Debug, Error)]
pub enum PasteError {
    #[error("Input simulation permission not granted. Allow this application to control the computer (Accessibility / input access) and try again.")]
    PermissionDenied,

    #[error("File no longer exists: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Clipboard write failed: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("Paste keystroke failed: {0}")]
    Simulation(#[from] KeystrokeError),
}

/// Republishes an entry in its native formats and triggers a paste.
pub struct ClipboardWriter<P: Pasteboard, K: PasteKeystroke> {
    pasteboard: P,
    keystroke: K,
    fallback: Option<Box<dyn PasteKeystroke>>,
    permission: Box<dyn InputPermission>,
    settle: Duration,
    logger: SharedLogger,
}

impl<P: Pasteboard, K: PasteKeystroke> ClipboardWriter<P, K> {
    pub fn new(
        pasteboard: P,
        keystroke: K,
        permission: Box<dyn InputPermission>,
        logger: SharedLogger,
    ) -> Self {
        Self {
            pasteboard,
            keystroke,
            fallback: None,
            permission,
            settle: Duration::from_millis(100),
            logger,
        }
    }

    /// Set the delivery mechanism tried when the primary keystroke fails
    pub fn with_fallback(mut self, fallback: Option<Box<dyn PasteKeystroke>>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Set the delay between paste key-down and key-up
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Paste an entry, logging any failure.
    ///
    /// Returns true only when the clipboard was populated and the paste
    /// keystroke was delivered.
    pub async fn paste(&self, entry: &HistoryEntry) -> bool {
        match self.try_paste(entry).await {
            Ok(()) => true,
            Err(e) => {
                self.logger.error(COMPONENT, &e.to_string());
                false
            }
        }
    }

    /// Paste an entry.
    ///
    /// Nothing is mutated when permission is missing or a file entry's path
    /// has disappeared. A keystroke failure leaves the clipboard populated.
    pub async fn try_paste(&self, entry: &HistoryEntry) -> Result<(), PasteError> {
        if !self.permission.is_granted() {
            return Err(PasteError::PermissionDenied);
        }

        let representations = representations_for(entry.content())?;

        self.pasteboard.write(representations).await?;
        self.logger.debug(
            COMPONENT,
            &format!("Clipboard set to {} entry: {}", entry.content_type(), entry.preview()),
        );

        self.send_paste().await
    }

    async fn send_paste(&self) -> Result<(), PasteError> {
        let primary_err = match self.keystroke.send_paste(self.settle).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        let Some(fallback) = &self.fallback else {
            return Err(primary_err.into());
        };

        self.logger.warn(
            COMPONENT,
            &format!(
                "{} failed ({}), trying {}",
                self.keystroke.name(),
                primary_err,
                fallback.name()
            ),
        );
        fallback.send_paste(self.settle).await?;
        Ok(())
    }
}

/// Native formats for an entry, one item with one or more representations
pub fn representations_for(content: &ClipContent) -> Result<Vec<Representation>, PasteError> {
    let reps = match content {
        ClipContent::Text(text) => vec![Representation::new(
            ClipFormat::Text,
            FormatData::Text(text.clone()),
        )],
        ClipContent::File(path) => {
            if !path.exists() {
                return Err(PasteError::MissingFile(path.clone()));
            }
            vec![
                Representation::new(ClipFormat::FileList, FormatData::Files(vec![path.clone()])),
                Representation::new(ClipFormat::FileUrl, FormatData::Text(path_to_file_url(path))),
            ]
        }
        ClipContent::Image(payload) => vec![
            Representation::new(ClipFormat::Png, FormatData::Bytes(payload.bytes().to_vec())),
            Representation::new(ClipFormat::Tiff, FormatData::Bytes(payload.bytes().to_vec())),
        ],
        ClipContent::Pdf(payload) => vec![Representation::new(
            ClipFormat::Pdf,
            FormatData::Bytes(payload.bytes().to_vec()),
        )],
        ClipContent::RichText(payload) => vec![Representation::new(
            ClipFormat::Rtf,
            FormatData::Bytes(payload.bytes().to_vec()),
        )],
    };
    Ok(reps)
}
