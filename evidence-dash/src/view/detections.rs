//! Detection gallery: one card per detection record attached to a tag

use evidence_common::model::{Detection, ImageDetection};
use evidence_common::{MergedTag, Snapshot};

use super::format::{self, escape_html};

/// Inline fallback so a missing photo never leaves a broken image icon
const IMG_FALLBACK: &str = r#"onerror="this.onerror=null;this.src='/static/placeholder.svg'""#;

pub fn render_detection_gallery(snapshot: &Snapshot) -> String {
    let cards: String = snapshot
        .items()
        .iter()
        .filter(|item| item.is_processed())
        .map(detection_card)
        .collect();

    if cards.is_empty() {
        r#"<p class="empty-state">No detection results yet.</p>"#.to_string()
    } else {
        cards
    }
}

fn detection_card(item: &MergedTag) -> String {
    let Some(record) = &item.detection else {
        return String::new();
    };

    let title = if record.tag_title.is_empty() {
        &item.tag.title
    } else {
        &record.tag_title
    };
    let coords = record.tag_coords.unwrap_or(item.tag.coords);

    let stats = [
        stat_tile(record.photos_processed, "Photos"),
        stat_tile(record.total_detections, "Detections"),
        stat_tile(record.unique_object_count() as u64, "Object Types"),
    ]
    .concat();

    let object_badges: String = record
        .unique_objects()
        .into_iter()
        .map(|label| format!(r#"<span class="badge badge-object">{}</span>"#, escape_html(label)))
        .collect();

    let images: String = record.image_detections.iter().map(image_block).collect();

    let summary = record
        .summary
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            format!(
                r#"<details class="summary-block"><summary>Summary</summary><pre>{}</pre></details>"#,
                escape_html(s)
            )
        })
        .unwrap_or_default();

    format!(
        concat!(
            r#"<article class="detection-card" data-tag-id="{id}">"#,
            r#"<header><h3 class="card-title">{title}</h3><p class="card-coords">{coords}</p></header>"#,
            r#"<div class="detection-stats">{stats}</div>"#,
            r#"<div class="badges">{badges}</div>"#,
            r#"<div class="image-detections">{images}</div>"#,
            "{summary}",
            "</article>"
        ),
        id = escape_html(&record.tag_id),
        title = escape_html(title),
        coords = format::coords(&coords, 2),
        stats = stats,
        badges = object_badges,
        images = images,
        summary = summary,
    )
}

fn stat_tile(value: u64, label: &str) -> String {
    format!(
        r#"<div class="stat-tile"><span class="stat-value">{value}</span><span class="stat-label">{label}</span></div>"#
    )
}

fn image_block(batch: &ImageDetection) -> String {
    let name = escape_html(format::file_name(&batch.image_path));

    let mut pair = figure(&batch.image_path, &format!("Original: {}", name), "Original");
    if let Some(annotated) = &batch.annotated_image_path {
        pair.push_str(&figure(annotated, &format!("Annotated: {}", name), "Annotated"));
    }

    let error = batch
        .error
        .as_deref()
        .map(|e| format!(r#"<p class="image-error">{}</p>"#, escape_html(e)))
        .unwrap_or_default();

    let detections: String = batch.detections.iter().map(detection_row).collect();

    format!(
        concat!(
            r#"<div class="image-detection">"#,
            r#"<div class="image-pair">{pair}</div>"#,
            r#"<p class="image-name">{name} &middot; {count}</p>"#,
            "{error}",
            r#"<ul class="detection-list">{detections}</ul>"#,
            "</div>"
        ),
        pair = pair,
        name = name,
        count = format::count(batch.detection_count, "object", "objects"),
        error = error,
        detections = detections,
    )
}

/// `alt` must already be escaped
fn figure(path: &str, alt: &str, caption: &str) -> String {
    format!(
        r#"<figure><img src="{src}" alt="{alt}" loading="lazy" {fallback}><figcaption>{caption}</figcaption></figure>"#,
        src = escape_html(&format::asset_url(path)),
        alt = alt,
        fallback = IMG_FALLBACK,
        caption = caption,
    )
}

fn detection_row(det: &Detection) -> String {
    format!(
        concat!(
            "<li>",
            r#"<span class="det-label">{label}</span>"#,
            r#"<span class="det-box">{bbox}</span>"#,
            r#"<span class="det-confidence">{confidence}</span>"#,
            "</li>"
        ),
        label = escape_html(&det.label),
        bbox = format::bounding_box(&det.box_2d_absolute),
        confidence = format::confidence(det.confidence),
    )
}
