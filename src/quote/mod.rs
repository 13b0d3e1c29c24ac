//! # Quote Module
//!
//! The quote list and everything that reads or writes it.
//!
//! ## Components
//!
//! - [`model`] - the [`Quote`] record, category filters, seed data
//! - [`store`] - [`QuoteStore`], the in-memory list mirrored to storage
//! - [`transfer`] - JSON file import and export
//!
//! ## Data Flow
//!
//! ```text
//!   storage.json ──load──▶ QuoteStore ──persist──▶ storage.json
//!                              │  ▲
//!                     export   │  │   import
//!                              ▼  │
//!                     quotes_export.json
//! ```

pub mod model;
pub mod store;
pub mod transfer;

pub use model::{
    category_options, distinct_categories, seed_quotes, CategoryFilter, Quote, QuoteError,
    ALL_CATEGORIES, MSG_ADDED, MSG_MISSING_FIELDS,
};
pub use store::{Draw, LoadOutcome, QuoteStore};
pub use transfer::{
    export_json, export_to_file, parse_import, read_import_file, ImportError, EXPORT_FILE_NAME,
    MSG_IMPORT_FORMAT, MSG_IMPORT_PARSE,
};
