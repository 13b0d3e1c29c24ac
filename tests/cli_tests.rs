//! Subcommand tests
//!
//! Runs the non-interactive operations against real data directories.

use quotebox::cli;
use quotebox::quote::{
    seed_quotes, CategoryFilter, EXPORT_FILE_NAME, MSG_IMPORT_FORMAT, MSG_IMPORT_PARSE,
};
use quotebox::storage::STORAGE_FILE_NAME;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use tempfile::TempDir;

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_add_persists_between_runs() {
    let temp_dir = TempDir::new().unwrap();
    {
        let mut store = cli::open_store(temp_dir.path()).unwrap();
        let mut buf = Vec::new();
        cli::add(&mut store, "  Hello  ", "Greeting", &mut buf).unwrap();
        assert_eq!(output(buf), "Quote added successfully!\n");
    }

    let store = cli::open_store(temp_dir.path()).unwrap();
    let mut buf = Vec::new();
    cli::list(&store, &mut buf).unwrap();
    assert!(output(buf).ends_with("[Greeting] Hello\n"));
    assert_eq!(store.len(), 4);
}

#[test]
fn test_random_uses_saved_filter() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = cli::open_store(temp_dir.path()).unwrap();
    store.save_filter(&CategoryFilter::parse("Work")).unwrap();

    let mut rng = StdRng::seed_from_u64(3);
    let mut buf = Vec::new();
    cli::random(&mut store, None, &mut rng, &mut buf).unwrap();
    assert!(output(buf).ends_with("Category: Work\n"));
}

#[test]
fn test_random_on_empty_list() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(STORAGE_FILE_NAME),
        r#"{"quotesData":"[]"}"#,
    )
    .unwrap();

    let mut store = cli::open_store(temp_dir.path()).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let mut buf = Vec::new();
    cli::random(&mut store, None, &mut rng, &mut buf).unwrap();
    assert_eq!(output(buf), "No quotes available. Add one!\n");
}

#[test]
fn test_corrupted_storage_file_is_reset() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(STORAGE_FILE_NAME), "garbage").unwrap();

    let store = cli::open_store(temp_dir.path()).unwrap();
    assert_eq!(store.quotes(), seed_quotes().as_slice());
    assert!(temp_dir.path().join("storage.json.corrupt").exists());
}

#[tokio::test]
async fn test_export_then_import_into_fresh_directory() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();
    let export_path = source_dir.path().join(EXPORT_FILE_NAME);

    let mut source = cli::open_store(source_dir.path()).unwrap();
    cli::add(&mut source, "Hello", "Greeting", &mut Vec::new()).unwrap();
    let mut buf = Vec::new();
    cli::export(&source, &export_path, &mut buf).unwrap();
    assert!(output(buf).starts_with("Exported 4 quotes to "));

    let mut target = cli::open_store(target_dir.path()).unwrap();
    let mut buf = Vec::new();
    cli::import(&mut target, &export_path, &mut buf).await.unwrap();
    assert_eq!(output(buf), "Successfully imported 4 quotes!\n");
    assert_eq!(target.len(), 3 + 4);

    let mut buf = Vec::new();
    cli::categories(&target, &mut buf).unwrap();
    assert_eq!(output(buf), "all\nWork\nInspiration\nLife\nGreeting\n");

    let reopened = cli::open_store(target_dir.path()).unwrap();
    assert_eq!(reopened.len(), 7);
}

#[tokio::test]
async fn test_import_rejects_bad_files() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = cli::open_store(temp_dir.path()).unwrap();

    let path = temp_dir.path().join("in.json");
    let cases = [
        ("{not json", MSG_IMPORT_PARSE),
        (r#"{"text":"x","category":"y"}"#, MSG_IMPORT_FORMAT),
        (r#"[{"text":"x","category":7}]"#, MSG_IMPORT_FORMAT),
        (r#"[{"text":"","category":"y"}]"#, MSG_IMPORT_FORMAT),
    ];
    for (content, message) in cases {
        fs::write(&path, content).unwrap();
        let err = cli::import(&mut store, &path, &mut Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), message);
    }

    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_import_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = cli::open_store(temp_dir.path()).unwrap();

    let err = cli::import(&mut store, &temp_dir.path().join("nope.json"), &mut Vec::new())
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Could not read file: "));
}

#[tokio::test]
async fn test_import_empty_array_is_noop() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = cli::open_store(temp_dir.path()).unwrap();
    let path = temp_dir.path().join("empty.json");
    fs::write(&path, "[]").unwrap();

    let mut buf = Vec::new();
    cli::import(&mut store, &path, &mut buf).await.unwrap();
    assert_eq!(output(buf), "Successfully imported 0 quotes!\n");
    assert_eq!(store.len(), 3);
}
