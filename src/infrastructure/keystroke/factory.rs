//! Fallback paste tool factory with automatic detection

use std::env;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::str::FromStr;

use tokio::process::Command;

use crate::application::ports::{KeystrokeError, PasteKeystroke};

use super::osascript::OsascriptPaste;
use super::wtype::WtypePaste;
use super::xdotool::XdotoolPaste;
use super::ydotool::YdotoolPaste;

/// External tools able to deliver a paste keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTool {
    /// Linux: xdotool (X11)
    Xdotool,
    /// Linux: wtype (Wayland native)
    Wtype,
    /// Linux: ydotool (requires ydotoold daemon)
    Ydotool,
    /// macOS: osascript / System Events
    Osascript,
}

impl FallbackTool {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Xdotool => "xdotool",
            Self::Wtype => "wtype",
            Self::Ydotool => "ydotool",
            Self::Osascript => "osascript",
        }
    }
}

impl fmt::Display for FallbackTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User preference for the fallback paste tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPreference {
    /// Detect the best tool for this platform
    #[default]
    Auto,
    /// No fallback; enigo failures are final
    None,
    /// A specific tool
    Tool(FallbackTool),
}

impl fmt::Display for FallbackPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::None => write!(f, "none"),
            Self::Tool(tool) => write!(f, "{}", tool),
        }
    }
}

/// Valid `paste_fallback` values
pub const FALLBACK_OPTIONS: &str = "auto, none, xdotool, wtype, ydotool, osascript";

/// Error type for parsing fallback preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFallbackError {
    pub value: String,
}

impl fmt::Display for ParseFallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid paste fallback '{}'. Valid options: {}",
            self.value, FALLBACK_OPTIONS
        )
    }
}

impl std::error::Error for ParseFallbackError {}

impl FromStr for FallbackPreference {
    type Err = ParseFallbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "none" => Ok(Self::None),
            "xdotool" => Ok(Self::Tool(FallbackTool::Xdotool)),
            "wtype" => Ok(Self::Tool(FallbackTool::Wtype)),
            "ydotool" => Ok(Self::Tool(FallbackTool::Ydotool)),
            "osascript" => Ok(Self::Tool(FallbackTool::Osascript)),
            _ => Err(ParseFallbackError {
                value: s.to_string(),
            }),
        }
    }
}

/// Check if a tool binary is available using `which`
async fn is_tool_available(tool: &str) -> bool {
    Command::new("which")
        .arg(tool)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Check if ydotool is available (binary exists AND daemon socket exists)
async fn is_ydotool_available() -> bool {
    if !is_tool_available("ydotool").await {
        return false;
    }

    // Try XDG_RUNTIME_DIR first, then /tmp
    let socket_paths = [
        env::var("XDG_RUNTIME_DIR")
            .map(|dir| format!("{}/.ydotool_socket", dir))
            .ok(),
        Some("/tmp/.ydotool_socket".to_string()),
    ];

    socket_paths
        .into_iter()
        .flatten()
        .any(|path| Path::new(&path).exists())
}

async fn is_available(tool: FallbackTool) -> bool {
    match tool {
        FallbackTool::Ydotool => is_ydotool_available().await,
        other => is_tool_available(other.as_str()).await,
    }
}

/// Detect the best available fallback tool
///
/// On macOS: osascript
/// On Linux: ydotool → wtype (Wayland sessions only) → xdotool
/// Elsewhere: none
pub async fn detect_fallback_tool() -> Option<FallbackTool> {
    if cfg!(target_os = "macos") {
        return Some(FallbackTool::Osascript);
    }
    if !cfg!(target_os = "linux") {
        return None;
    }

    if is_ydotool_available().await {
        return Some(FallbackTool::Ydotool);
    }

    if env::var_os("WAYLAND_DISPLAY").is_some() && is_tool_available("wtype").await {
        return Some(FallbackTool::Wtype);
    }

    if is_tool_available("xdotool").await {
        return Some(FallbackTool::Xdotool);
    }

    None
}

/// Create the fallback paste adapter for a preference.
///
/// `Auto` yields `None` when nothing usable is installed. An explicitly
/// requested tool that is missing is an error.
pub async fn create_fallback(
    preference: FallbackPreference,
) -> Result<Option<(Box<dyn PasteKeystroke>, FallbackTool)>, KeystrokeError> {
    let tool = match preference {
        FallbackPreference::None => return Ok(None),
        FallbackPreference::Auto => match detect_fallback_tool().await {
            Some(tool) => tool,
            None => return Ok(None),
        },
        FallbackPreference::Tool(tool) => {
            if !is_available(tool).await {
                return Err(KeystrokeError::ToolNotFound(tool.as_str()));
            }
            tool
        }
    };

    Ok(Some((create_specific_tool(tool), tool)))
}

/// Create a specific fallback adapter
pub fn create_specific_tool(tool: FallbackTool) -> Box<dyn PasteKeystroke> {
    match tool {
        FallbackTool::Xdotool => Box::new(XdotoolPaste::new()),
        FallbackTool::Wtype => Box::new(WtypePaste::new()),
        FallbackTool::Ydotool => Box::new(YdotoolPaste::new()),
        FallbackTool::Osascript => Box::new(OsascriptPaste::new()),
    }
}
