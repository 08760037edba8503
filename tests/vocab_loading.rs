//! Vocabulary Loading Integration Tests
//!
//! Tests for the two accepted source shapes and the startup failures
//! raised for missing or malformed vocabulary files.

use linkstash::{Vocabulary, VocabularyError};
use tempfile::TempDir;

#[tokio::test]
async fn test_flat_source_accepts_exactly_the_listed_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("valid_levels.json");
    std::fs::write(&path, r#"["none", "some", "lots"]"#).unwrap();

    let vocab = Vocabulary::load("level", &path).await.unwrap();

    for value in ["none", "some", "lots"] {
        assert!(vocab.contains(value));
    }
    for rejected in ["None", "SOME", "medium", ""] {
        assert!(!vocab.contains(rejected));
    }
}

#[tokio::test]
async fn test_value_object_source_extracts_the_value_key() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("valid_interests.json");
    std::fs::write(
        &path,
        r#"[{"value": "android"}, {"value": "web", "label": "Web development"}]"#,
    )
    .unwrap();

    let vocab = Vocabulary::load("interest", &path).await.unwrap();
    assert_eq!(vocab.values(), &["android", "web"]);
    assert!(!vocab.contains("Web development"));
}

#[tokio::test]
async fn test_missing_source_is_a_startup_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.json");

    let err = Vocabulary::load("level", &path).await.unwrap_err();
    assert!(matches!(err, VocabularyError::Unreadable { .. }));
    assert!(err.to_string().contains("level"));
}

#[tokio::test]
async fn test_non_array_source_is_malformed() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("valid_levels.json");
    std::fs::write(&path, r#""none""#).unwrap();

    let err = Vocabulary::load("level", &path).await.unwrap_err();
    assert!(matches!(err, VocabularyError::Malformed { .. }));
}

#[tokio::test]
async fn test_entry_without_value_key_is_malformed() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("valid_levels.json");
    std::fs::write(&path, r#"[{"value": "none"}, {"label": "some"}]"#).unwrap();

    let err = Vocabulary::load("level", &path).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("entry 1"));
}
