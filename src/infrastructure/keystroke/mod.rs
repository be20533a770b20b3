//! Paste keystroke infrastructure module
//!
//! Provides cross-platform paste simulation using enigo (primary)
//! and external tools as the fallback delivery path.

mod enigo;
mod factory;
mod osascript;
mod tool;
mod wtype;
mod xdotool;
mod ydotool;

pub use self::enigo::EnigoPaste;
pub use factory::{
    create_fallback, create_specific_tool, detect_fallback_tool, FallbackPreference, FallbackTool,
    ParseFallbackError, FALLBACK_OPTIONS,
};
pub use osascript::OsascriptPaste;
pub use wtype::WtypePaste;
pub use xdotool::XdotoolPaste;
pub use ydotool::YdotoolPaste;
