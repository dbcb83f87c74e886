//! Integration tests for the data aggregator
//!
//! Each test builds a throwaway data folder with tempfile:
//! - data/tags.json
//! - data/evidence_detections/{tag_id}_detections.json
//! - data/evidence_detections/{tag_id}_summary.txt

use evidence_common::{Error, EvidenceStore};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

/// Test helper: data folder with an empty detections directory
fn setup_data_dir() -> (TempDir, EvidenceStore) {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let detections = dir.path().join("data/evidence_detections");
    std::fs::create_dir_all(&detections).unwrap();

    let store = EvidenceStore::new(dir.path().join("data/tags.json"), detections);
    (dir, store)
}

fn write_tags(store: &EvidenceStore, tags: serde_json::Value) {
    std::fs::write(store.tags_file(), serde_json::to_string_pretty(&tags).unwrap()).unwrap();
}

fn write_detection(store: &EvidenceStore, tag_id: &str, record: serde_json::Value) {
    let path = store.detections_dir().join(format!("{}_detections.json", tag_id));
    std::fs::write(path, serde_json::to_string_pretty(&record).unwrap()).unwrap();
}

fn write_raw(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

fn sample_tags() -> serde_json::Value {
    json!([
        {
            "id": "a",
            "title": "Loading dock",
            "description": "North entrance",
            "coords": [1.23456, -2.5, 0.75],
            "photos": ["data/tag_photos/a/photo_0.jpg"],
            "color": [1.0, 0.0, 0.0]
        },
        {
            "id": "b",
            "title": "Shelf 4",
            "description": "",
            "coords": [0, 0, 0],
            "photos": []
        }
    ])
}

// =============================================================================
// listTags
// =============================================================================

#[tokio::test]
async fn test_list_tags() {
    let (_dir, store) = setup_data_dir();
    write_tags(&store, sample_tags());

    let tags = store.list_tags().await.unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].id, "a");
    assert_eq!(tags[0].photo_count(), 1);
}

#[tokio::test]
async fn test_list_tags_missing_file_is_not_found() {
    let (_dir, store) = setup_data_dir();

    let err = store.list_tags().await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_list_tags_corrupt_file_is_not_found() {
    let (_dir, store) = setup_data_dir();
    std::fs::write(store.tags_file(), "[{ not json").unwrap();

    let err = store.list_tags().await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_list_tags_skips_entries_that_are_not_tags() {
    let (_dir, store) = setup_data_dir();
    write_tags(
        &store,
        json!([
            { "id": "a", "title": "Loading dock", "coords": [1, 2, 3] },
            { "id": "b", "coords": [0, 0, 0] },
            { "id": "c", "title": "No coords" },
            "stray string"
        ]),
    );

    let tags = store.list_tags().await.unwrap();
    let ids: Vec<&str> = tags.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(tags[1].title, "");
}

#[tokio::test]
async fn test_list_tags_non_array_is_not_found() {
    let (_dir, store) = setup_data_dir();
    write_tags(&store, json!({ "id": "a" }));

    let err = store.list_tags().await.unwrap_err();
    assert!(err.is_not_found());
}

// =============================================================================
// getDetection / getSummary
// =============================================================================

#[tokio::test]
async fn test_get_detection() {
    let (_dir, store) = setup_data_dir();
    write_detection(
        &store,
        "a",
        json!({ "tag_id": "a", "total_detections": 5, "detected_objects": ["cup"] }),
    );

    let record = store.get_detection("a").await.unwrap();
    assert_eq!(record.tag_id, "a");
    assert_eq!(record.total_detections, 5);
}

#[tokio::test]
async fn test_get_detection_missing_is_not_found() {
    let (_dir, store) = setup_data_dir();

    let err = store.get_detection("a").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_get_detection_rejects_path_traversal() {
    let (_dir, store) = setup_data_dir();

    let err = store.get_detection("../../etc/passwd").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_get_detection_corrupt_is_parse_error() {
    let (_dir, store) = setup_data_dir();
    write_raw(store.detections_dir(), "a_detections.json", "{");

    let err = store.get_detection("a").await.unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[tokio::test]
async fn test_get_summary() {
    let (_dir, store) = setup_data_dir();
    write_raw(
        store.detections_dir(),
        "a_summary.txt",
        "Evidence Analysis for Tag: Loading dock\n",
    );

    let summary = store.get_summary("a").await.unwrap();
    assert_eq!(summary, "Evidence Analysis for Tag: Loading dock\n");
}

#[tokio::test]
async fn test_get_summary_missing_is_not_found() {
    let (_dir, store) = setup_data_dir();

    let err = store.get_summary("a").await.unwrap_err();
    assert!(err.is_not_found());
}

// =============================================================================
// listAllDetections
// =============================================================================

#[tokio::test]
async fn test_list_all_detections_skips_malformed_files() {
    let (_dir, store) = setup_data_dir();
    write_detection(&store, "a", json!({ "tag_id": "a" }));
    write_detection(&store, "c", json!({ "tag_id": "c" }));
    write_raw(store.detections_dir(), "b_detections.json", "not json");
    write_raw(store.detections_dir(), "a_summary.txt", "summary");
    write_raw(store.detections_dir(), "notes.json", "{}");

    let records = store.list_all_detections().await.unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.tag_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[tokio::test]
async fn test_list_all_detections_accepts_null_label() {
    let (_dir, store) = setup_data_dir();
    write_detection(
        &store,
        "a",
        json!({
            "tag_id": "a",
            "total_detections": 1,
            "image_detections": [{
                "image_path": "data/tag_photos/a/photo_0.jpg",
                "detection_count": 1,
                "detections": [{ "label": null, "box_2d_absolute": [0, 0, 10, 10], "confidence": 0.9 }]
            }]
        }),
    );

    let records = store.list_all_detections().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].image_detections[0].detections[0].label, "unknown");
}

#[tokio::test]
async fn test_list_all_detections_empty_dir() {
    let (_dir, store) = setup_data_dir();
    assert!(store.list_all_detections().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_all_detections_missing_dir_is_read_failure() {
    let dir = tempfile::tempdir().unwrap();
    let store = EvidenceStore::new(dir.path().join("tags.json"), dir.path().join("absent"));

    let err = store.list_all_detections().await.unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
}

// =============================================================================
// getAllData
// =============================================================================

#[tokio::test]
async fn test_get_all_data_left_join() {
    let (_dir, store) = setup_data_dir();
    write_tags(&store, sample_tags());
    write_detection(
        &store,
        "a",
        json!({ "tag_id": "a", "photos_processed": 1, "total_detections": 2 }),
    );
    write_detection(&store, "orphan", json!({ "tag_id": "orphan" }));

    let merged = store.get_all_data().await.unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].tag.id, "a");
    assert_eq!(merged[0].detection.as_ref().unwrap().total_detections, 2);
    assert_eq!(merged[1].tag.id, "b");
    assert!(merged[1].detection.is_none());
}

#[tokio::test]
async fn test_get_all_data_keeps_tags_next_to_a_bad_entry() {
    let (_dir, store) = setup_data_dir();
    write_tags(
        &store,
        json!([
            { "id": "a", "title": "Loading dock", "coords": [1, 2, 3] },
            { "id": "b", "coords": [0, 0, 0] },
            { "title": "No id", "coords": [0, 0, 0] }
        ]),
    );
    write_detection(&store, "a", json!({ "tag_id": "a", "total_detections": 2 }));

    let merged = store.get_all_data().await.unwrap();
    assert_eq!(merged.len(), 2);
    assert!(merged[0].is_processed());
    assert!(!merged[1].is_processed());
}

#[tokio::test]
async fn test_get_all_data_without_tag_file_is_empty() {
    let (_dir, store) = setup_data_dir();
    write_detection(&store, "a", json!({ "tag_id": "a" }));

    let merged = store.get_all_data().await.unwrap();
    assert!(merged.is_empty());
}

#[tokio::test]
async fn test_get_all_data_missing_dir_is_read_failure() {
    let dir = tempfile::tempdir().unwrap();
    let store = EvidenceStore::new(dir.path().join("tags.json"), dir.path().join("absent"));
    std::fs::write(store.tags_file(), "[]").unwrap();

    let err = store.get_all_data().await.unwrap_err();
    assert!(!err.is_not_found());
}
