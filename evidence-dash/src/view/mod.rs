//! Dashboard rendering
//!
//! Every renderer is a pure function of a [`Snapshot`] returning markup, so
//! views can be tested without a browser. The page script only toggles the
//! markup produced here; it never builds any from data.
//!
//! [`Snapshot`]: evidence_common::Snapshot

mod detail;
mod detections;
mod format;
mod overview;
mod page;
mod tags;

pub use detail::{render_detail, render_detail_templates};
pub use detections::render_detection_gallery;
pub use format::escape_html;
pub use overview::render_overview;
pub use page::render_dashboard;
pub use tags::render_tag_gallery;
