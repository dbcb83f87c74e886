//! Overview statistics tiles

use evidence_common::{OverviewStats, Snapshot};

/// Four headline tiles, recomputed from the snapshot on every call
pub fn render_overview(snapshot: &Snapshot) -> String {
    let OverviewStats {
        total_tags,
        total_photos,
        total_detections,
        unique_objects,
    } = snapshot.stats();

    [
        stat_card("total-tags", total_tags as u64, "Total Tags"),
        stat_card("total-photos", total_photos, "Photos Processed"),
        stat_card("total-detections", total_detections, "Total Detections"),
        stat_card("unique-objects", unique_objects as u64, "Unique Objects"),
    ]
    .concat()
}

fn stat_card(id: &str, value: u64, label: &str) -> String {
    format!(
        r#"<div class="stat-card" id="{id}"><span class="stat-value">{value}</span><span class="stat-label">{label}</span></div>"#
    )
}
