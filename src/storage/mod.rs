//! # Storage Module
//!
//! Key-value storage backends for quote data.
//!
//! ## Overview
//!
//! Quotebox keeps two kinds of state:
//!
//! - **Durable** state (the quote list and the last category filter) lives in
//!   a [`FileStore`], a JSON object on disk that survives restarts.
//! - **Session** state (the last displayed quote) lives in a [`MemoryStore`]
//!   and is dropped when the process exits.
//!
//! Both implement [`KeyValueStore`], a string-to-string map. Values are stored
//! as opaque strings; callers are responsible for encoding them.
//!
//! ## Storage Location
//!
//! ```text
//! ~/.local/share/quotebox/
//! ├── storage.json
//! └── quotebox.log
//! ```

mod durable;
mod session;

pub use durable::{default_data_dir, FileStore, STORAGE_FILE_NAME};
pub use session::MemoryStore;

use anyhow::Result;

/// A string key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
