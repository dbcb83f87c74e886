//! Tag and detection record models
//!
//! These mirror the JSON written by the capture and evidence processing tools.
//! Every field the tools may omit carries an explicit serde default so that
//! consumers never have to guess what "missing" means. Fields this crate does
//! not know about are kept in `extra` and written back unchanged, which keeps
//! the tag and detection endpoints raw pass-throughs.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// World-space position of a tag: `[x, y, z]`
pub type Coords = [f64; 3];

/// Bounding box in pixel coordinates: `[x1, y1, x2, y2]`
pub type BoundingBox = [f64; 4];

/// A labeled 3D point of interest with its evidence photos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub coords: Coords,
    /// Photo paths relative to the data root (e.g. `data/tag_photos/<id>/photo_0.jpg`)
    #[serde(default)]
    pub photos: Vec<String>,
    /// Marker color as written by the capture tool (RGB, 0.0-1.0)
    #[serde(default)]
    pub color: Vec<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tag {
    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }
}

/// Aggregated detection results for every photo of one tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub tag_id: String,
    #[serde(default)]
    pub tag_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_coords: Option<Coords>,
    #[serde(default)]
    pub photos_processed: u64,
    #[serde(default)]
    pub total_detections: u64,
    /// Labels seen across all photos. Upstream deduplicates, but readers must not rely on it.
    #[serde(default)]
    pub detected_objects: Vec<String>,
    #[serde(default)]
    pub image_detections: Vec<ImageDetection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DetectionRecord {
    /// Distinct labels in first-occurrence order
    pub fn unique_objects(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.detected_objects
            .iter()
            .map(String::as_str)
            .filter(|label| seen.insert(*label))
            .collect()
    }

    pub fn unique_object_count(&self) -> usize {
        self.unique_objects().len()
    }
}

/// Detection results for one photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDetection {
    pub image_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotated_image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
    #[serde(default)]
    pub detection_count: u64,
    #[serde(default)]
    pub detections: Vec<Detection>,
    /// Set by the processor when the photo was missing or could not be analysed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// One labeled bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// The processor writes `null` when the model returned no label
    #[serde(default = "default_label", deserialize_with = "label_or_unknown")]
    pub label: String,
    pub box_2d_absolute: BoundingBox,
    /// Model output box, `[ymin, xmin, ymax, xmax]` on a 0-1000 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_2d_normalized: Option<BoundingBox>,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_label() -> String {
    "unknown".to_string()
}

fn label_or_unknown<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_label))
}

fn default_confidence() -> f64 {
    1.0
}

/// A tag joined with its optional detection record
///
/// Serializes as the tag's own fields plus `"detection": <record> | null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedTag {
    #[serde(flatten)]
    pub tag: Tag,
    pub detection: Option<DetectionRecord>,
}

impl MergedTag {
    pub fn is_processed(&self) -> bool {
        self.detection.is_some()
    }
}
