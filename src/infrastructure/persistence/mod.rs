//! History persistence adapters

mod json_text;

pub use json_text::JsonTextHistory;
