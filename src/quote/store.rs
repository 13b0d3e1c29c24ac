//! # Quote Store
//!
//! Owns the in-memory quote list and keeps it in sync with durable storage.
//!
//! ## Storage Keys
//!
//! | Key | Store | Value |
//! |-----|-------|-------|
//! | `quotesData` | durable | JSON array of quotes |
//! | `lastCategoryFilter` | durable | `"all"` or a category |
//! | `quotesData.corrupt` | durable | raw value that failed to parse |
//! | `lastViewedQuote` | session | JSON quote, never read back |

use super::model::{category_options, seed_quotes, CategoryFilter, Quote};
use crate::storage::KeyValueStore;
use anyhow::{Context, Result};
use rand::Rng;

/// Durable key holding the quote list
pub const QUOTES_KEY: &str = "quotesData";

/// Durable key holding the last selected filter
pub const FILTER_KEY: &str = "lastCategoryFilter";

/// Durable key where an unparseable quote list is set aside
pub const CORRUPT_QUOTES_KEY: &str = "quotesData.corrupt";

/// Session key holding the last displayed quote
pub const LAST_VIEWED_KEY: &str = "lastViewedQuote";

/// How the quote list was obtained at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The stored list was read back
    Loaded(usize),
    /// Nothing was stored; the seed quotes were written
    Seeded,
    /// The stored list could not be parsed; the seed quotes replaced it
    Recovered(String),
}

/// Result of drawing a quote under a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draw {
    Quote(Quote),
    /// The list itself is empty
    NoQuotes,
    /// The list has quotes, but none in the filtered category
    NoMatch(CategoryFilter),
}

pub struct QuoteStore {
    quotes: Vec<Quote>,
    durable: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
}

impl QuoteStore {
    /// Create a store over the given backends. The list starts empty; call
    /// [`QuoteStore::load`] to read it.
    pub fn new(durable: Box<dyn KeyValueStore>, session: Box<dyn KeyValueStore>) -> Self {
        Self {
            quotes: Vec::new(),
            durable,
            session,
        }
    }

    /// Replace the in-memory list with the stored one, seeding it when absent.
    pub fn load(&mut self) -> Result<LoadOutcome> {
        let stored = self
            .durable
            .get(QUOTES_KEY)
            .context("Failed to read stored quotes")?;

        let Some(raw) = stored else {
            log::info!("No quotes found, using default data");
            self.quotes = seed_quotes();
            self.persist()?;
            return Ok(LoadOutcome::Seeded);
        };

        match serde_json::from_str::<Vec<Quote>>(&raw) {
            Ok(quotes) => {
                log::info!("Loaded {} quotes from storage", quotes.len());
                self.quotes = quotes;
                Ok(LoadOutcome::Loaded(self.quotes.len()))
            }
            Err(e) => {
                log::warn!("Stored quotes are corrupted, restoring defaults: {}", e);
                self.durable
                    .set(CORRUPT_QUOTES_KEY, &raw)
                    .context("Failed to set aside corrupted quotes")?;
                self.quotes = seed_quotes();
                self.persist()?;
                Ok(LoadOutcome::Recovered(e.to_string()))
            }
        }
    }

    /// Write the full list to durable storage
    pub fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.quotes).context("Failed to serialize quotes")?;
        self.durable
            .set(QUOTES_KEY, &json)
            .context("Failed to save quotes")?;
        log::debug!("Saved {} quotes", self.quotes.len());
        Ok(())
    }

    /// Record the quote currently on screen in session storage
    pub fn persist_last_viewed(&mut self, quote: &Quote) -> Result<()> {
        let json = serde_json::to_string(quote).context("Failed to serialize quote")?;
        self.session
            .set(LAST_VIEWED_KEY, &json)
            .context("Failed to save last viewed quote")
    }

    /// The quote last recorded by [`QuoteStore::persist_last_viewed`]
    #[cfg(test)]
    pub fn last_viewed(&self) -> Result<Option<Quote>> {
        let Some(raw) = self
            .session
            .get(LAST_VIEWED_KEY)
            .context("Failed to read last viewed quote")?
        else {
            return Ok(None);
        };
        let quote = serde_json::from_str(&raw).context("Failed to parse last viewed quote")?;
        Ok(Some(quote))
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Append one quote. Does not persist.
    pub fn push(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    /// Append many quotes in order. Does not persist.
    pub fn extend(&mut self, quotes: Vec<Quote>) {
        self.quotes.extend(quotes);
    }

    /// The `all` sentinel followed by every distinct category
    pub fn category_options(&self) -> Vec<CategoryFilter> {
        category_options(&self.quotes)
    }

    /// The filter saved by the last filter change, if any
    pub fn saved_filter(&self) -> Result<Option<CategoryFilter>> {
        let value = self
            .durable
            .get(FILTER_KEY)
            .context("Failed to read saved filter")?;
        Ok(value
            .filter(|v| !v.is_empty())
            .map(|v| CategoryFilter::parse(&v)))
    }

    pub fn save_filter(&mut self, filter: &CategoryFilter) -> Result<()> {
        self.durable
            .set(FILTER_KEY, filter.as_str())
            .context("Failed to save category filter")
    }

    /// Quotes matching `filter`, in list order
    pub fn filtered(&self, filter: &CategoryFilter) -> Vec<&Quote> {
        self.quotes.iter().filter(|q| filter.matches(q)).collect()
    }

    /// Draw one quote uniformly at random from those matching `filter`.
    pub fn draw<R: Rng>(&self, filter: &CategoryFilter, rng: &mut R) -> Draw {
        if self.quotes.is_empty() {
            return Draw::NoQuotes;
        }

        let candidates = self.filtered(filter);
        if candidates.is_empty() {
            return Draw::NoMatch(filter.clone());
        }

        let index = rng.gen_range(0..candidates.len());
        Draw::Quote(candidates[index].clone())
    }
}

impl std::fmt::Debug for QuoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteStore")
            .field("quotes", &self.quotes.len())
            .finish_non_exhaustive()
    }
}
