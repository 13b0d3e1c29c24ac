//! # UI Module
//!
//! The terminal user interface for quotebox.
//!
//! ## Components
//!
//! - [`App`] - controller owning the quote store, filter, form and prompt state
//! - [`mod@input`] - key handling
//! - [`mod@render`] - rendering functions for drawing the TUI
//! - [`theme`] / [`config`] - colors and persisted user settings
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                    Header                        │
//! ├──────────────┬──────────────────────────────────┤
//! │              │                                  │
//! │  Categories  │          Current Quote           │
//! │  (filter)    │                                  │
//! │              │                                  │
//! ├──────────────┴──────────────────────────────────┤
//! │          Footer (key hints or last notice)       │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The add-quote form, the import/export path prompts and the help screen are
//! drawn as centered modals over the body.

pub mod app;
pub mod config;
pub mod input;
pub mod render;
pub mod theme;

pub use app::App;
pub use input::{handle_key, Command};
pub use render::render;
