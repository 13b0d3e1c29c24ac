//! Quotebox - a terminal quote box
//!
//! This library provides the quote list, its persistent storage, JSON
//! import/export, the terminal user interface, and the non-interactive
//! subcommands built on top of them.

pub mod cli;
pub mod quote;
pub mod storage;
pub mod ui;
