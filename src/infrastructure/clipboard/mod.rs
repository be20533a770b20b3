//! Clipboard infrastructure module
//!
//! Provides the OS pasteboard through clipboard-rs. The change counter is
//! the system one where it exists and a content fingerprint on X11.

mod fingerprint;
mod native;
mod sequence;

pub use fingerprint::ChangeCounter;
pub use native::NativePasteboard;
