//! Tag gallery: one card per tag

use evidence_common::{MergedTag, Snapshot};

use super::format::{self, escape_html};

pub fn render_tag_gallery(snapshot: &Snapshot) -> String {
    if snapshot.is_empty() {
        return r#"<p class="empty-state">No tags found.</p>"#.to_string();
    }

    snapshot.items().iter().map(tag_card).collect()
}

fn tag_card(item: &MergedTag) -> String {
    let tag = &item.tag;

    let mut badges = format!(
        r#"<span class="badge badge-photos">{}</span>"#,
        format::count(tag.photo_count() as u64, "photo", "photos")
    );
    match &item.detection {
        Some(record) => {
            badges.push_str(r#"<span class="badge badge-processed">Processed</span>"#);
            if record.total_detections > 0 {
                badges.push_str(&format!(
                    r#"<span class="badge badge-detections">{}</span>"#,
                    format::count(record.total_detections, "detection", "detections")
                ));
            }
        }
        None => badges.push_str(r#"<span class="badge badge-pending">Not Processed</span>"#),
    }

    format!(
        concat!(
            r#"<article class="tag-card" data-tag-id="{id}" tabindex="0" role="button">"#,
            r#"<h3 class="card-title">{title}</h3>"#,
            r#"<p class="card-description">{description}</p>"#,
            r#"<p class="card-coords">{coords}</p>"#,
            r#"<div class="badges">{badges}</div>"#,
            "</article>"
        ),
        id = escape_html(&tag.id),
        title = escape_html(&tag.title),
        description = escape_html(&tag.description),
        coords = format::coords(&tag.coords, 2),
        badges = badges,
    )
}
