//! # Evidence Common Library
//!
//! Shared code for the evidence review dashboard:
//! - Tag and detection record models
//! - Data aggregator over the on-disk JSON layout
//! - Immutable snapshot and overview statistics
//! - Configuration loading
//! - Error types

pub mod config;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod store;

pub use error::{Error, Result};
pub use model::{Detection, DetectionRecord, ImageDetection, MergedTag, Tag};
pub use snapshot::{OverviewStats, Snapshot};
pub use store::EvidenceStore;
