//! Link Reader Integration Tests
//!
//! File-based parsing behavior: ordering, trimming, and the malformed
//! line fallback.

use std::path::PathBuf;

use tempfile::TempDir;
use vidpress::LinkRecord;

fn write_links(temp: &TempDir, content: &str) -> PathBuf {
    let path = temp.path().join("upload.txt");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_parse_file_two_lines_in_order() {
    let temp = TempDir::new().unwrap();
    let path = write_links(
        &temp,
        "https://example.com/a - Title A\nhttps://example.com/b - Title B\n",
    );

    let records = LinkRecord::parse_file(&path).unwrap();

    assert_eq!(
        records,
        vec![
            LinkRecord::new("https://example.com/a", "Title A"),
            LinkRecord::new("https://example.com/b", "Title B"),
        ]
    );
}

#[test]
fn test_parse_file_mixed_content() {
    let temp = TempDir::new().unwrap();
    let path = write_links(
        &temp,
        "# weekly batch\n\n  https://example.com/a - Padded Title  \nhttps://example.com/bare\n",
    );

    let records = LinkRecord::parse_file(&path).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].url, "https://example.com/a");
    assert_eq!(records[0].title, "Padded Title");
    // Bare url: title defaults to the url itself
    assert_eq!(records[1].url, "https://example.com/bare");
    assert_eq!(records[1].title, "https://example.com/bare");
}

#[test]
fn test_parse_file_missing_input_is_an_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.txt");

    let err = LinkRecord::parse_file(&missing).unwrap_err();
    assert!(err.to_string().contains("Failed to read link file"));
}
