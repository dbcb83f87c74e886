//! Detail panel for a single tag
//!
//! Lookups go through the snapshot only. The page embeds one pre-rendered
//! panel per tag so opening a panel never triggers another request.

use evidence_common::Snapshot;

use super::format::{self, escape_html};

/// Panel markup for `tag_id`, or `None` when the snapshot has no such tag
pub fn render_detail(snapshot: &Snapshot, tag_id: &str) -> Option<String> {
    let item = snapshot.find(tag_id)?;
    let tag = &item.tag;

    let description = if tag.description.trim().is_empty() {
        r#"<p class="detail-description muted">No description</p>"#.to_string()
    } else {
        format!(
            r#"<p class="detail-description">{}</p>"#,
            escape_html(&tag.description)
        )
    };

    let detection = match &item.detection {
        Some(record) => format!(
            concat!(
                r#"<section class="detail-detections"><h3>Detection Summary</h3><dl>"#,
                "<dt>Photos Processed</dt><dd>{photos}</dd>",
                "<dt>Total Detections</dt><dd>{total}</dd>",
                "<dt>Unique Objects</dt><dd>{unique}</dd>",
                "</dl></section>"
            ),
            photos = record.photos_processed,
            total = record.total_detections,
            unique = record.unique_object_count(),
        ),
        None => {
            r#"<p class="detail-no-data">No detection data available for this tag.</p>"#.to_string()
        }
    };

    Some(format!(
        concat!(
            r#"<div class="detail" data-tag-id="{id}">"#,
            r#"<h2 class="detail-title">{title}</h2>"#,
            "{description}",
            r#"<dl class="detail-fields">"#,
            "<dt>Coordinates</dt><dd>{coords}</dd>",
            "<dt>Photos</dt><dd>{photos}</dd>",
            "</dl>",
            "{detection}",
            "</div>"
        ),
        id = escape_html(&tag.id),
        title = escape_html(&tag.title),
        description = description,
        coords = format::coords(&tag.coords, 4),
        photos = tag.photo_count(),
        detection = detection,
    ))
}

/// One `<template>` per tag, keyed by `data-detail-for`
pub fn render_detail_templates(snapshot: &Snapshot) -> String {
    snapshot
        .items()
        .iter()
        .filter_map(|item| {
            let panel = render_detail(snapshot, &item.tag.id)?;
            Some(format!(
                r#"<template data-detail-for="{}">{}</template>"#,
                escape_html(&item.tag.id),
                panel
            ))
        })
        .collect()
}
