use crate::quote::{
    export_to_file, read_import_file, CategoryFilter, Draw, ImportError, LoadOutcome, Quote,
    QuoteError, QuoteStore, EXPORT_FILE_NAME, MSG_ADDED, MSG_IMPORT_FORMAT, MSG_IMPORT_PARSE,
    MSG_MISSING_FIELDS,
};
use crate::storage::{FileStore, MemoryStore};
use crate::ui::theme::Theme;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    AddQuote,
    Import,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Category,
}

/// The two-field "add quote" form
#[derive(Debug, Clone)]
pub struct QuoteForm {
    pub text: String,
    pub category: String,
    pub focus: FormField,
}

impl Default for QuoteForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: String::new(),
            focus: FormField::Text,
        }
    }
}

impl QuoteForm {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Text => &mut self.text,
            FormField::Category => &mut self.category,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Text => FormField::Category,
            FormField::Category => FormField::Text,
        };
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.category.clear();
        self.focus = FormField::Text;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A message for the user, shown in the footer until replaced
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Local>,
}

/// What the quote panel currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Display {
    /// Nothing drawn yet
    Blank,
    Quote(Quote),
    NoQuotes,
    NoMatch(CategoryFilter),
}

impl From<Draw> for Display {
    fn from(draw: Draw) -> Self {
        match draw {
            Draw::Quote(quote) => Display::Quote(quote),
            Draw::NoQuotes => Display::NoQuotes,
            Draw::NoMatch(filter) => Display::NoMatch(filter),
        }
    }
}

pub struct App {
    pub store: QuoteStore,
    /// The filter option set: `all` plus every distinct category
    pub options: Vec<CategoryFilter>,
    pub selected_option: usize,
    pub display: Display,
    pub mode: Mode,
    pub form: QuoteForm,
    /// Path typed into the import or export prompt
    pub path_input: String,
    /// Pre-filled in the export prompt
    pub export_file: String,
    pub notice: Option<Notice>,
    pub theme: Theme,
    pub show_help: bool,
    pub should_quit: bool,
    rng: StdRng,
}

impl App {
    pub fn new(store: QuoteStore, theme: Theme) -> Self {
        Self::with_rng(store, theme, StdRng::from_entropy())
    }

    /// Create an app with a fixed random source (deterministic draws)
    pub fn with_rng(store: QuoteStore, theme: Theme, rng: StdRng) -> Self {
        Self {
            store,
            options: vec![CategoryFilter::All],
            selected_option: 0,
            display: Display::Blank,
            mode: Mode::Browse,
            form: QuoteForm::default(),
            path_input: String::new(),
            export_file: EXPORT_FILE_NAME.to_string(),
            notice: None,
            theme,
            show_help: false,
            should_quit: false,
            rng,
        }
    }

    /// Open the storage in `data_dir` and start an initialized app on it.
    ///
    /// An unreadable storage file is moved aside and reported as a notice.
    pub fn open(data_dir: &Path, theme: Theme) -> Result<Self> {
        let (durable, backup) = FileStore::open_or_reset(data_dir)
            .with_context(|| format!("Failed to open storage in {}", data_dir.display()))?;
        let store = QuoteStore::new(Box::new(durable), Box::new(MemoryStore::new()));

        let mut app = Self::new(store, theme);
        app.initialize()?;
        if let Some(backup) = backup {
            app.notify(
                NoticeLevel::Error,
                format!(
                    "Storage file was unreadable and has been moved to {}",
                    backup.display()
                ),
            );
        }
        Ok(app)
    }

    /// Load quotes, build the category list, restore the saved filter, and
    /// draw the first quote.
    pub fn initialize(&mut self) -> Result<()> {
        if let LoadOutcome::Recovered(reason) = self.store.load()? {
            self.notify(
                NoticeLevel::Error,
                format!("Stored quotes were unreadable and have been reset ({})", reason),
            );
        }
        self.refresh_category_options()?;
        self.filter_quotes()
    }

    /// The filter currently selected in the category list
    pub fn current_filter(&self) -> CategoryFilter {
        self.options
            .get(self.selected_option)
            .cloned()
            .unwrap_or_default()
    }

    /// Draw a random quote under the current filter and display it.
    pub fn show_random_quote(&mut self) -> Result<()> {
        let filter = self.current_filter();
        let draw = self.store.draw(&filter, &mut self.rng);
        if let Draw::Quote(ref quote) = draw {
            self.store.persist_last_viewed(quote)?;
        }
        self.display = draw.into();
        Ok(())
    }

    /// Add the quote in the form. Blank fields are reported, nothing changes.
    ///
    /// Returns whether the quote was added.
    pub fn add_quote(&mut self) -> Result<bool> {
        let quote = match Quote::new(&self.form.text, &self.form.category) {
            Ok(quote) => quote,
            Err(QuoteError::EmptyText | QuoteError::EmptyCategory) => {
                self.notify(NoticeLevel::Error, MSG_MISSING_FIELDS);
                return Ok(false);
            }
        };

        log::info!("Adding quote in category {:?}", quote.category);
        self.store.push(quote);
        self.store.persist()?;
        self.refresh_category_options()?;

        self.form.clear();
        self.notify(NoticeLevel::Success, MSG_ADDED);
        Ok(true)
    }

    /// Rebuild the category list from the quotes, then reselect the saved
    /// filter if it is still an option. Falls back to `all`.
    pub fn refresh_category_options(&mut self) -> Result<()> {
        self.options = self.store.category_options();
        self.selected_option = match self.store.saved_filter()? {
            Some(saved) => self.options.iter().position(|o| *o == saved).unwrap_or(0),
            None => 0,
        };
        Ok(())
    }

    /// Persist the current filter and draw a quote under it.
    pub fn filter_quotes(&mut self) -> Result<()> {
        let filter = self.current_filter();
        self.store.save_filter(&filter)?;
        log::debug!("Filter changed to: {}", filter);
        self.show_random_quote()
    }

    /// Select the option at `index` and apply it as the filter.
    pub fn select_category(&mut self, index: usize) -> Result<()> {
        if index >= self.options.len() {
            return Ok(());
        }
        self.selected_option = index;
        self.filter_quotes()
    }

    pub fn next_category(&mut self) -> Result<()> {
        if self.options.is_empty() {
            return Ok(());
        }
        self.select_category((self.selected_option + 1) % self.options.len())
    }

    pub fn previous_category(&mut self) -> Result<()> {
        if self.options.is_empty() {
            return Ok(());
        }
        let index = if self.selected_option > 0 {
            self.selected_option - 1
        } else {
            self.options.len() - 1
        };
        self.select_category(index)
    }

    /// Export every quote, regardless of the filter, to `path`.
    ///
    /// Returns whether the file was written; failures become a notice.
    pub fn export_to_json_file(&mut self, path: &Path) -> bool {
        match export_to_file(self.store.quotes(), path) {
            Ok(()) => {
                self.notify(
                    NoticeLevel::Success,
                    format!(
                        "Exported {} quotes to {}",
                        self.store.len(),
                        path.display()
                    ),
                );
                true
            }
            Err(e) => {
                log::error!("Export failed: {:#}", e);
                self.notify(NoticeLevel::Error, format!("Export failed: {}", e));
                false
            }
        }
    }

    /// Read `path` and append its quotes to the list.
    ///
    /// The file read is the only await point; everything after it runs as
    /// one step against the list. Invalid files change nothing.
    pub async fn import_from_json_file(&mut self, path: &Path) -> Result<bool> {
        let result = read_import_file(path).await;
        self.finish_import(path, result)
    }

    fn finish_import(
        &mut self,
        path: &Path,
        result: Result<Vec<Quote>, ImportError>,
    ) -> Result<bool> {
        let imported = match result {
            Ok(imported) => imported,
            Err(e) => {
                log::warn!("Import of {} rejected: {}", path.display(), e);
                let message = match e {
                    ImportError::Read { .. } => format!("Could not read file: {}", path.display()),
                    ImportError::Parse(_) => MSG_IMPORT_PARSE.to_string(),
                    ImportError::Format(_) => MSG_IMPORT_FORMAT.to_string(),
                };
                self.notify(NoticeLevel::Error, message);
                return Ok(false);
            }
        };

        let count = imported.len();
        self.store.extend(imported);
        self.store.persist()?;
        self.refresh_category_options()?;

        log::info!("Imported {} quotes from {}", count, path.display());
        self.notify(
            NoticeLevel::Success,
            format!("Successfully imported {} quotes!", count),
        );
        self.path_input.clear();
        self.close_prompt();
        Ok(true)
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            message: message.into(),
            at: Local::now(),
        });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn open_add_form(&mut self) {
        self.mode = Mode::AddQuote;
    }

    pub fn open_import_prompt(&mut self) {
        self.mode = Mode::Import;
    }

    pub fn open_export_prompt(&mut self) {
        self.path_input = self.export_file.clone();
        self.mode = Mode::Export;
    }

    /// Leave any form or prompt. Typed input is kept for next time.
    pub fn close_prompt(&mut self) {
        self.mode = Mode::Browse;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Switch to the next built-in theme and return its name
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme.next();
        self.theme = next.clone();
        next.name
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("store", &self.store)
            .field("options", &self.options)
            .field("selected_option", &self.selected_option)
            .field("display", &self.display)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
