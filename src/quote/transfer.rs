//! # Import and Export
//!
//! Moves the quote list in and out of standalone JSON files.
//!
//! ## File Format
//!
//! ```json
//! [
//!   {
//!     "text": "Life is what happens when you're busy making other plans.",
//!     "category": "Life"
//!   }
//! ]
//! ```
//!
//! Exports are pretty-printed with two-space indentation. Imports must be an
//! array whose every element has non-empty string `text` and `category`
//! fields; other fields are ignored. A file that fails validation is rejected
//! as a whole.

use super::model::Quote;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default file name for exports
pub const EXPORT_FILE_NAME: &str = "quotes_export.json";

/// Reported when an import file is valid JSON of the wrong shape
pub const MSG_IMPORT_FORMAT: &str =
    "Import failed: JSON format is invalid. Expected an array of quote objects with \"text\" and \"category\".";

/// Reported when an import file is not valid JSON
pub const MSG_IMPORT_PARSE: &str =
    "Error processing file. Please ensure it is a valid JSON format.";

/// Why an import file was rejected
#[derive(Debug)]
pub enum ImportError {
    /// The file could not be read
    Read { path: PathBuf, source: std::io::Error },
    /// The content is not valid JSON
    Parse(serde_json::Error),
    /// Valid JSON, but not an array of quotes
    Format(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Read { path, source } => {
                write!(f, "could not read {}: {}", path.display(), source)
            }
            ImportError::Parse(e) => write!(f, "invalid JSON: {}", e),
            ImportError::Format(reason) => write!(f, "unexpected format: {}", reason),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Read { source, .. } => Some(source),
            ImportError::Parse(e) => Some(e),
            ImportError::Format(_) => None,
        }
    }
}

/// Serialize quotes as pretty-printed JSON
pub fn export_json(quotes: &[Quote]) -> Result<String> {
    serde_json::to_string_pretty(quotes).context("Failed to serialize quotes for export")
}

/// Write the export file at `path`.
///
/// The JSON goes to a temporary file next to the target, which is renamed
/// over `path` once fully written. The temporary file is removed on failure.
pub fn export_to_file(quotes: &[Quote], path: &Path) -> Result<()> {
    let json = export_json(quotes)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let mut temp = tempfile::NamedTempFile::new_in(&dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp.write_all(json.as_bytes())
        .context("Failed to write export data")?;
    temp.persist(path)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    log::info!("Exported {} quotes to {}", quotes.len(), path.display());
    Ok(())
}

/// Parse and validate the content of an import file.
pub fn parse_import(content: &str) -> Result<Vec<Quote>, ImportError> {
    let value: Value = serde_json::from_str(content).map_err(ImportError::Parse)?;

    let Value::Array(items) = value else {
        return Err(ImportError::Format("top level is not an array".to_string()));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| quote_from_value(index, item))
        .collect()
}

/// Read `path` and validate it as an import file.
pub async fn read_import_file(path: &Path) -> Result<Vec<Quote>, ImportError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    parse_import(&content)
}

fn quote_from_value(index: usize, item: &Value) -> Result<Quote, ImportError> {
    let Value::Object(fields) = item else {
        return Err(ImportError::Format(format!(
            "element {} is not an object",
            index
        )));
    };

    let field = |name: &str| -> Result<String, ImportError> {
        match fields.get(name) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            Some(Value::String(_)) => Err(ImportError::Format(format!(
                "element {} has an empty \"{}\"",
                index, name
            ))),
            Some(_) => Err(ImportError::Format(format!(
                "element {} has a non-string \"{}\"",
                index, name
            ))),
            None => Err(ImportError::Format(format!(
                "element {} is missing \"{}\"",
                index, name
            ))),
        }
    };

    Ok(Quote {
        text: field("text")?,
        category: field("category")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::model::seed_quotes;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_export_json_is_pretty() {
        let json = export_json(&seed_quotes()[..1]).unwrap();
        let expected = r#"[
  {
    "text": "The only way to do great work is to love what you do.",
    "category": "Work"
  }
]"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_export_to_file_then_parse() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(EXPORT_FILE_NAME);

        export_to_file(&seed_quotes(), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(parse_import(&content).unwrap(), seed_quotes());

        // only the export file remains; the temp file was renamed
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");
        fs::write(&path, "old").unwrap();

        export_to_file(&[], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_parse_import_accepts_quotes() {
        let content = r#"[{"text":" x ","category":"Y","extra":1},{"text":"z","category":"W"}]"#;
        let quotes = parse_import(content).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0], Quote::new("x", "Y").unwrap());
    }

    #[test]
    fn test_parse_import_empty_array() {
        assert!(parse_import("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_import_rejects_bad_json() {
        assert!(matches!(parse_import("{bad"), Err(ImportError::Parse(_))));
    }

    #[test]
    fn test_parse_import_rejects_wrong_shape() {
        let cases = [
            r#""not an array""#,
            r#"{"text":"x","category":"y"}"#,
            r#"[{"text":"x"}]"#,
            r#"[{"category":"y"}]"#,
            r#"[{"text":"","category":"y"}]"#,
            r#"[{"text":"x","category":"   "}]"#,
            r#"[{"text":1,"category":"y"}]"#,
            r#"[{"text":"x","category":true}]"#,
            r#"[{"text":"x","category":"y"}, 3]"#,
        ];
        for case in cases {
            assert!(
                matches!(parse_import(case), Err(ImportError::Format(_))),
                "expected format error for {}",
                case
            );
        }
    }

    #[test]
    fn test_format_error_names_element() {
        let err = parse_import(r#"[{"text":"a","category":"b"},{"text":"x"}]"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected format: element 1 is missing \"category\""
        );
    }

    #[tokio::test]
    async fn test_read_import_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_import_file(&temp_dir.path().join("nope.json")).await;
        assert!(matches!(result, Err(ImportError::Read { .. })));
    }

    #[tokio::test]
    async fn test_read_import_file_valid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("in.json");
        fs::write(&path, r#"[{"text":"Hello","category":"Greeting"}]"#).unwrap();

        let quotes = read_import_file(&path).await.unwrap();
        assert_eq!(quotes, vec![Quote::new("Hello", "Greeting").unwrap()]);
    }
}
