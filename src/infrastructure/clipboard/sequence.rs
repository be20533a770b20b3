//! System clipboard change counters

use crate::application::ports::ClipboardError;

/// Whether the OS keeps a change counter this adapter can read
pub const HAS_SYSTEM_COUNTER: bool = cfg!(any(target_os = "macos", windows));

/// NSPasteboard `changeCount`, bumped by every write from any process
#[cfg(target_os = "macos")]
pub fn system_change_count() -> Result<u64, ClipboardError> {
    use objc2_app_kit::NSPasteboard;

    let count = NSPasteboard::generalPasteboard().changeCount();
    u64::try_from(count)
        .map_err(|_| ClipboardError::ReadFailed(format!("negative change count {}", count)))
}

/// Win32 clipboard sequence number
#[cfg(windows)]
pub fn system_change_count() -> Result<u64, ClipboardError> {
    use windows_sys::Win32::System::DataExchange::GetClipboardSequenceNumber;

    // SAFETY: takes no arguments and does not open the clipboard
    match unsafe { GetClipboardSequenceNumber() } {
        0 => Err(ClipboardError::Unavailable(
            "no access to the clipboard sequence number".to_string(),
        )),
        n => Ok(u64::from(n)),
    }
}

#[cfg(not(any(target_os = "macos", windows)))]
pub fn system_change_count() -> Result<u64, ClipboardError> {
    Err(ClipboardError::Unavailable(
        "X11 exposes no clipboard change counter".to_string(),
    ))
}
