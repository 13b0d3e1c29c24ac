//! # Command-Line Operations
//!
//! Non-interactive counterparts of the TUI actions, used by the `quotebox`
//! subcommands. Each function works on an already opened [`QuoteStore`] and
//! writes its report to `out`.

use crate::quote::{
    export_to_file, read_import_file, CategoryFilter, Draw, ImportError, LoadOutcome, Quote,
    QuoteStore, MSG_ADDED, MSG_IMPORT_FORMAT, MSG_IMPORT_PARSE, MSG_MISSING_FIELDS,
};
use crate::storage::{FileStore, MemoryStore};
use anyhow::{bail, Context, Result};
use rand::Rng;
use std::io::Write;
use std::path::Path;

/// Open the durable store in `data_dir` and load the quote list.
pub fn open_store(data_dir: &Path) -> Result<QuoteStore> {
    let (durable, backup) = FileStore::open_or_reset(data_dir)
        .with_context(|| format!("Failed to open storage in {}", data_dir.display()))?;
    if let Some(backup) = backup {
        eprintln!(
            "Warning: storage file was unreadable and has been moved to {}",
            backup.display()
        );
    }
    let mut store = QuoteStore::new(Box::new(durable), Box::new(MemoryStore::new()));

    if let LoadOutcome::Recovered(reason) = store.load()? {
        eprintln!(
            "Warning: stored quotes were unreadable and have been reset ({})",
            reason
        );
    }
    Ok(store)
}

/// Print one random quote. Without `category`, the saved filter applies.
pub fn random(
    store: &mut QuoteStore,
    category: Option<&str>,
    rng: &mut impl Rng,
    out: &mut impl Write,
) -> Result<()> {
    let filter = match category {
        Some(category) => CategoryFilter::parse(category),
        None => store.saved_filter()?.unwrap_or_default(),
    };

    match store.draw(&filter, rng) {
        Draw::Quote(quote) => {
            store.persist_last_viewed(&quote)?;
            writeln!(out, "\"{}\"", quote.text)?;
            writeln!(out, "Category: {}", quote.category)?;
        }
        Draw::NoQuotes => writeln!(out, "No quotes available. Add one!")?,
        Draw::NoMatch(filter) => {
            writeln!(out, "No quotes found in the category: {}.", filter)?;
        }
    }
    Ok(())
}

/// Append a quote and persist the list.
pub fn add(store: &mut QuoteStore, text: &str, category: &str, out: &mut impl Write) -> Result<()> {
    let Ok(quote) = Quote::new(text, category) else {
        bail!(MSG_MISSING_FIELDS);
    };

    store.push(quote);
    store.persist()?;
    writeln!(out, "{}", MSG_ADDED)?;
    Ok(())
}

/// Print the filter option set, one per line.
pub fn categories(store: &QuoteStore, out: &mut impl Write) -> Result<()> {
    for option in store.category_options() {
        writeln!(out, "{}", option)?;
    }
    Ok(())
}

/// Print every quote with its category.
pub fn list(store: &QuoteStore, out: &mut impl Write) -> Result<()> {
    for quote in store.quotes() {
        writeln!(out, "[{}] {}", quote.category, quote.text)?;
    }
    Ok(())
}

/// Write every quote to `path`.
pub fn export(store: &QuoteStore, path: &Path, out: &mut impl Write) -> Result<()> {
    export_to_file(store.quotes(), path)?;
    writeln!(
        out,
        "Exported {} quotes to {}",
        store.len(),
        path.display()
    )?;
    Ok(())
}

/// Append the quotes in `path`. Invalid files change nothing.
pub async fn import(store: &mut QuoteStore, path: &Path, out: &mut impl Write) -> Result<()> {
    let imported = match read_import_file(path).await {
        Ok(imported) => imported,
        Err(ImportError::Read { source, .. }) => {
            return Err(source).with_context(|| format!("Could not read file: {}", path.display()))
        }
        Err(ImportError::Parse(e)) => {
            log::debug!("Import parse error: {}", e);
            bail!(MSG_IMPORT_PARSE);
        }
        Err(ImportError::Format(reason)) => {
            log::debug!("Import format error: {}", reason);
            bail!(MSG_IMPORT_FORMAT);
        }
    };

    let count = imported.len();
    store.extend(imported);
    store.persist()?;
    log::info!("Imported {} quotes from {}", count, path.display());
    writeln!(out, "Successfully imported {} quotes!", count)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::seed_quotes;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_open_store_seeds_new_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(temp_dir.path()).unwrap();
        assert_eq!(store.quotes(), seed_quotes().as_slice());
    }

    #[test]
    fn test_random_with_category() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(temp_dir.path()).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let mut buf = Vec::new();
        random(&mut store, Some("life"), &mut rng, &mut buf).unwrap();
        assert!(output(buf).ends_with("Category: Life\n"));

        let mut buf = Vec::new();
        random(&mut store, Some("Sports"), &mut rng, &mut buf).unwrap();
        assert_eq!(output(buf), "No quotes found in the category: Sports.\n");
    }

    #[test]
    fn test_add_rejects_blank() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(temp_dir.path()).unwrap();

        let err = add(&mut store, "  ", "X", &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), MSG_MISSING_FIELDS);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_categories_and_list() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(temp_dir.path()).unwrap();
        add(&mut store, "Hello", "Greeting", &mut Vec::new()).unwrap();

        let mut buf = Vec::new();
        categories(&store, &mut buf).unwrap();
        assert_eq!(output(buf), "all\nWork\nInspiration\nLife\nGreeting\n");

        let mut buf = Vec::new();
        list(&store, &mut buf).unwrap();
        assert!(output(buf).ends_with("[Greeting] Hello\n"));
    }
}
