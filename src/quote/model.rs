use serde::{Deserialize, Serialize};
use std::fmt;

/// Filter sentinel meaning "every category"
pub const ALL_CATEGORIES: &str = "all";

/// Reported after a quote is added
pub const MSG_ADDED: &str = "Quote added successfully!";

/// Reported when the quote text or category is blank
pub const MSG_MISSING_FIELDS: &str = "Please enter both a quote and a category.";

/// A single quote and its category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    /// Build a quote from raw user input.
    ///
    /// Both fields are trimmed; either one being empty afterwards is rejected.
    pub fn new(text: &str, category: &str) -> Result<Self, QuoteError> {
        let text = text.trim();
        let category = category.trim();

        if text.is_empty() {
            return Err(QuoteError::EmptyText);
        }
        if category.is_empty() {
            return Err(QuoteError::EmptyCategory);
        }

        Ok(Self {
            text: text.to_string(),
            category: category.to_string(),
        })
    }

    /// Case-insensitive category comparison
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

/// Reasons a quote cannot be built from user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteError {
    EmptyText,
    EmptyCategory,
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteError::EmptyText => write!(f, "quote text is empty"),
            QuoteError::EmptyCategory => write!(f, "quote category is empty"),
        }
    }
}

impl std::error::Error for QuoteError {}

/// The category constraint applied before drawing a random quote
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parse a stored filter value. `"all"` is the sentinel for no filter.
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }

    /// The value persisted to storage and shown as the option key
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Category(category) => category,
        }
    }

    /// Human-readable label for the category list
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All Categories",
            CategoryFilter::Category(category) => category,
        }
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(category) => quote.in_category(category),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quotes used when durable storage holds no quote list yet
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote {
            text: "The only way to do great work is to love what you do.".to_string(),
            category: "Work".to_string(),
        },
        Quote {
            text: "Strive not to be a success, but rather to be of value.".to_string(),
            category: "Inspiration".to_string(),
        },
        Quote {
            text: "Life is what happens when you're busy making other plans.".to_string(),
            category: "Life".to_string(),
        },
    ]
}

/// Distinct categories in order of first appearance.
///
/// Distinctness is exact: "Life" and "life" are two options.
pub fn distinct_categories(quotes: &[Quote]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for quote in quotes {
        if !categories.contains(&quote.category) {
            categories.push(quote.category.clone());
        }
    }
    categories
}

/// The filter option set: the `all` sentinel followed by every distinct category.
///
/// A category spelled like the sentinel is folded into the `all` option.
pub fn category_options(quotes: &[Quote]) -> Vec<CategoryFilter> {
    std::iter::once(CategoryFilter::All)
        .chain(
            distinct_categories(quotes)
                .iter()
                .map(|category| CategoryFilter::parse(category))
                .filter(|option| *option != CategoryFilter::All),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(text: &str, category: &str) -> Quote {
        Quote {
            text: text.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_new_trims_fields() {
        let q = Quote::new("  Hello  ", "\tGreeting\n").unwrap();
        assert_eq!(q, quote("Hello", "Greeting"));
    }

    #[test]
    fn test_new_rejects_blank_fields() {
        assert_eq!(Quote::new("", "X"), Err(QuoteError::EmptyText));
        assert_eq!(Quote::new("   ", "X"), Err(QuoteError::EmptyText));
        assert_eq!(Quote::new("X", ""), Err(QuoteError::EmptyCategory));
        assert_eq!(Quote::new("X", "  "), Err(QuoteError::EmptyCategory));
    }

    #[test]
    fn test_in_category_ignores_case() {
        let q = quote("t", "Life");
        assert!(q.in_category("life"));
        assert!(q.in_category("LIFE"));
        assert!(!q.in_category("Work"));
    }

    #[test]
    fn test_filter_parse_and_as_str() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("Work"),
            CategoryFilter::Category("Work".to_string())
        );
        assert_eq!(CategoryFilter::All.as_str(), "all");
        assert_eq!(CategoryFilter::parse("Work").as_str(), "Work");
        assert_eq!(CategoryFilter::All.label(), "All Categories");
    }

    #[test]
    fn test_filter_matches() {
        let q = quote("t", "Work");
        assert!(CategoryFilter::All.matches(&q));
        assert!(CategoryFilter::parse("work").matches(&q));
        assert!(!CategoryFilter::parse("Life").matches(&q));
    }

    #[test]
    fn test_seed_quotes() {
        let seeds = seed_quotes();
        assert_eq!(seeds.len(), 3);
        assert_eq!(seeds[0].category, "Work");
        assert_eq!(seeds[1].category, "Inspiration");
        assert_eq!(seeds[2].category, "Life");
    }

    #[test]
    fn test_distinct_categories_first_appearance_order() {
        let quotes = vec![
            quote("1", "A"),
            quote("2", "B"),
            quote("3", "A"),
            quote("4", "a"),
        ];
        assert_eq!(distinct_categories(&quotes), vec!["A", "B", "a"]);
    }

    #[test]
    fn test_category_options_starts_with_all() {
        let quotes = vec![quote("1", "A"), quote("2", "B"), quote("3", "A")];
        let options = category_options(&quotes);
        assert_eq!(
            options,
            vec![
                CategoryFilter::All,
                CategoryFilter::Category("A".to_string()),
                CategoryFilter::Category("B".to_string()),
            ]
        );
        assert_eq!(category_options(&[]), vec![CategoryFilter::All]);
    }

    #[test]
    fn test_category_options_fold_sentinel_category() {
        let quotes = vec![quote("1", "A"), quote("2", "all"), quote("3", "B")];
        assert_eq!(
            category_options(&quotes),
            vec![
                CategoryFilter::All,
                CategoryFilter::Category("A".to_string()),
                CategoryFilter::Category("B".to_string()),
            ]
        );
    }

    #[test]
    fn test_quote_json_shape() {
        let json = serde_json::to_string(&quote("Hi", "Greeting")).unwrap();
        assert_eq!(json, r#"{"text":"Hi","category":"Greeting"}"#);
    }
}
