//! Immutable snapshot of the merged collection and its overview statistics
//!
//! A snapshot is built once per page load and handed to every renderer and
//! to the detail lookup, so all views of one load agree with each other.

use crate::model::{DetectionRecord, MergedTag};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// The merged collection as loaded at one instant
#[derive(Debug, Clone)]
pub struct Snapshot {
    items: Vec<MergedTag>,
    loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(items: Vec<MergedTag>) -> Self {
        Self::at(items, Utc::now())
    }

    pub fn at(items: Vec<MergedTag>, loaded_at: DateTime<Utc>) -> Self {
        Self { items, loaded_at }
    }

    pub fn items(&self) -> &[MergedTag] {
        &self.items
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Detection records attached to tags, in tag order
    pub fn detections(&self) -> impl Iterator<Item = &DetectionRecord> {
        self.items.iter().filter_map(|item| item.detection.as_ref())
    }

    /// First tag with the given id
    pub fn find(&self, tag_id: &str) -> Option<&MergedTag> {
        self.items.iter().find(|item| item.tag.id == tag_id)
    }

    pub fn stats(&self) -> OverviewStats {
        OverviewStats::from_snapshot(self)
    }
}

/// Dashboard headline numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverviewStats {
    pub total_tags: usize,
    pub total_photos: u64,
    pub total_detections: u64,
    pub unique_objects: usize,
}

impl OverviewStats {
    /// Reduce the snapshot; recomputed in full on every call
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut labels: HashSet<&str> = HashSet::new();
        let mut total_photos = 0;
        let mut total_detections = 0;

        for record in snapshot.detections() {
            total_photos += record.photos_processed;
            total_detections += record.total_detections;
            labels.extend(record.detected_objects.iter().map(String::as_str));
        }

        Self {
            total_tags: snapshot.items().len(),
            total_photos,
            total_detections,
            unique_objects: labels.len(),
        }
    }
}
