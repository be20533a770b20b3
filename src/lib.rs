//! ClipTrail - clipboard history with a global recall hotkey
//!
//! This crate watches the system clipboard, keeps a bounded, deduplicated
//! history of text, files, images and documents, and pastes any entry back
//! into the focused application on demand.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, hotkey matching, configuration, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (clipboard-rs, enigo, event taps, etc.)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
