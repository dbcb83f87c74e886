//! Data aggregator over the on-disk evidence layout
//!
//! Two independent sources are read:
//! - a tag list file (`tags.json`)
//! - a directory holding one `{tag_id}_detections.json` and one
//!   `{tag_id}_summary.txt` per processed tag
//!
//! Nothing here writes. Each call re-reads the files so that a running
//! service always reflects the latest processing output.

use crate::error::{Error, Result};
use crate::model::{DetectionRecord, MergedTag, Tag};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name suffix of per-tag detection records
pub const DETECTIONS_SUFFIX: &str = "_detections.json";

/// File name suffix of per-tag summary text
pub const SUMMARY_SUFFIX: &str = "_summary.txt";

/// Read-only access to tags and detection records
#[derive(Debug, Clone)]
pub struct EvidenceStore {
    tags_file: PathBuf,
    detections_dir: PathBuf,
}

impl EvidenceStore {
    pub fn new(tags_file: impl Into<PathBuf>, detections_dir: impl Into<PathBuf>) -> Self {
        Self {
            tags_file: tags_file.into(),
            detections_dir: detections_dir.into(),
        }
    }

    pub fn tags_file(&self) -> &Path {
        &self.tags_file
    }

    pub fn detections_dir(&self) -> &Path {
        &self.detections_dir
    }

    /// Load the raw tag list
    ///
    /// A missing tag file, or one that is not a JSON array, is reported as
    /// `NotFound`: from a caller's point of view there is no usable tag
    /// source. Inside a valid array, entries that do not describe a tag are
    /// skipped so the rest of the list survives.
    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        let content = tokio::fs::read_to_string(&self.tags_file)
            .await
            .map_err(|e| {
                debug!("Tag file {} unreadable: {}", self.tags_file.display(), e);
                Error::NotFound("Tags file not found".to_string())
            })?;

        let entries: Vec<Value> = serde_json::from_str(&content).map_err(|e| {
            warn!("Tag file {} is not valid: {}", self.tags_file.display(), e);
            Error::NotFound("Tags file not found".to_string())
        })?;

        let mut tags = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<Tag>(entry) {
                Ok(tag) => tags.push(tag),
                Err(e) => warn!(
                    "Skipping tag #{} in {}: {}",
                    index,
                    self.tags_file.display(),
                    e
                ),
            }
        }
        Ok(tags)
    }

    /// Load the detection record of one tag
    pub async fn get_detection(&self, tag_id: &str) -> Result<DetectionRecord> {
        let path = self.tag_file(tag_id, DETECTIONS_SUFFIX)?;

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound("Detections not found".to_string()));
            }
            Err(source) => return Err(Error::Read { path, source }),
        };

        serde_json::from_str(&content).map_err(|source| Error::Parse { path, source })
    }

    /// Load the raw summary text of one tag
    pub async fn get_summary(&self, tag_id: &str) -> Result<String> {
        let path = self.tag_file(tag_id, SUMMARY_SUFFIX)?;

        match tokio::fs::read_to_string(&path).await {
            Ok(summary) => Ok(summary),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound("Summary not found".to_string()))
            }
            Err(source) => Err(Error::Read { path, source }),
        }
    }

    /// Load every detection record in the detections directory
    ///
    /// Records are returned in file name order. A file that cannot be read or
    /// parsed is skipped; only a failure to list the directory is an error.
    pub async fn list_all_detections(&self) -> Result<Vec<DetectionRecord>> {
        let dir = &self.detections_dir;
        let read_error = |source: std::io::Error| Error::Read {
            path: dir.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(dir).await.map_err(read_error)?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
            let is_detection_file = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(DETECTIONS_SUFFIX));
            if is_detection_file {
                paths.push(entry.path());
            }
        }
        paths.sort();

        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            match read_record(&path).await {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping detection file: {}", e),
            }
        }

        debug!("Loaded {} detection records from {}", records.len(), dir.display());
        Ok(records)
    }

    /// Load every tag with its detection record attached
    ///
    /// Tags form the left side of the join: every tag appears exactly once,
    /// with `detection: None` when it has not been processed. Records whose
    /// `tag_id` matches no tag are dropped. An unusable tag file yields an
    /// empty result here rather than an error.
    pub async fn get_all_data(&self) -> Result<Vec<MergedTag>> {
        let records = self.list_all_detections().await?;

        let tags = match self.list_tags().await {
            Ok(tags) => tags,
            Err(e) => {
                warn!("Tag list unavailable, combined data will be empty: {}", e);
                Vec::new()
            }
        };

        Ok(merge(tags, records))
    }

    /// Build `{detections_dir}/{tag_id}{suffix}`, refusing ids that would escape the directory
    fn tag_file(&self, tag_id: &str, suffix: &str) -> Result<PathBuf> {
        if !is_valid_tag_id(tag_id) {
            return Err(Error::NotFound(format!("Invalid tag id: {}", tag_id)));
        }
        Ok(self.detections_dir.join(format!("{}{}", tag_id, suffix)))
    }
}

async fn read_record(path: &Path) -> Result<DetectionRecord> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Left-join tags against detection records by `tag_id`
///
/// When several records share a `tag_id`, the last one wins.
pub fn merge(tags: Vec<Tag>, records: Vec<DetectionRecord>) -> Vec<MergedTag> {
    let by_tag: HashMap<String, DetectionRecord> = records
        .into_iter()
        .map(|record| (record.tag_id.clone(), record))
        .collect();

    let tag_ids: HashSet<&str> = tags.iter().map(|t| t.id.as_str()).collect();
    let orphans = by_tag.keys().filter(|id| !tag_ids.contains(id.as_str())).count();
    if orphans > 0 {
        debug!("Dropping {} detection records with no matching tag", orphans);
    }

    tags.into_iter()
        .map(|tag| {
            let detection = by_tag.get(&tag.id).cloned();
            MergedTag { tag, detection }
        })
        .collect()
}

/// Tag ids become file names, so only plain names are accepted
pub fn is_valid_tag_id(tag_id: &str) -> bool {
    !tag_id.is_empty()
        && tag_id.len() < 256
        && !tag_id.contains(['/', '\\', '\0'])
        && tag_id != "."
        && !tag_id.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tag(id: &str) -> Tag {
        serde_json::from_value(json!({ "id": id, "title": id, "coords": [0, 0, 0] })).unwrap()
    }

    fn record(tag_id: &str, total: u64) -> DetectionRecord {
        serde_json::from_value(json!({ "tag_id": tag_id, "total_detections": total })).unwrap()
    }

    #[test]
    fn test_merge_keeps_every_tag() {
        let merged = merge(vec![tag("a"), tag("b"), tag("c")], vec![record("b", 3)]);

        assert_eq!(merged.len(), 3);
        assert!(merged[0].detection.is_none());
        assert_eq!(merged[1].detection.as_ref().unwrap().total_detections, 3);
        assert!(merged[2].detection.is_none());
    }

    #[test]
    fn test_merge_drops_orphan_records() {
        let merged = merge(vec![tag("a")], vec![record("zzz", 9)]);

        assert_eq!(merged.len(), 1);
        assert!(merged[0].detection.is_none());
    }

    #[test]
    fn test_merge_preserves_tag_order() {
        let merged = merge(
            vec![tag("c"), tag("a"), tag("b")],
            vec![record("a", 1), record("b", 2), record("c", 3)],
        );

        let ids: Vec<&str> = merged.iter().map(|m| m.tag.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(merged[0].detection.as_ref().unwrap().total_detections, 3);
    }

    #[test]
    fn test_merge_last_duplicate_record_wins() {
        let merged = merge(vec![tag("a")], vec![record("a", 1), record("a", 7)]);
        assert_eq!(merged[0].detection.as_ref().unwrap().total_detections, 7);
    }

    #[test]
    fn test_merge_empty_inputs() {
        assert!(merge(Vec::new(), vec![record("a", 1)]).is_empty());
        assert!(merge(Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn test_tag_id_validation() {
        assert!(is_valid_tag_id("3f2c9a1e-0b5d-4c2e-9a7f-1d2e3f4a5b6c"));
        assert!(is_valid_tag_id("tag_01"));
        assert!(!is_valid_tag_id(""));
        assert!(!is_valid_tag_id("."));
        assert!(!is_valid_tag_id(".."));
        assert!(!is_valid_tag_id("../tags"));
        assert!(!is_valid_tag_id("a/b"));
        assert!(!is_valid_tag_id("a\\b"));
    }
}
