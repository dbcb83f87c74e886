//! Full dashboard page

use evidence_common::Snapshot;

use super::{
    escape_html, render_detail_templates, render_detection_gallery, render_overview,
    render_tag_gallery,
};

/// Render the page from one load attempt
///
/// Views render in a fixed order (overview, tags, detections) against the
/// same snapshot. On a failed load the three views stay empty and a
/// dismissible banner carries the error; there is no retry.
pub fn render_dashboard(loaded: &Result<Snapshot, String>) -> String {
    let (banner, overview, tags, detections, templates, footer) = match loaded {
        Ok(snapshot) => (
            String::new(),
            render_overview(snapshot),
            render_tag_gallery(snapshot),
            render_detection_gallery(snapshot),
            render_detail_templates(snapshot),
            format!(
                "Loaded {}",
                snapshot.loaded_at().format("%Y-%m-%d %H:%M:%S UTC")
            ),
        ),
        Err(message) => (
            error_banner(message),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Evidence Review Dashboard</title>
<link rel="stylesheet" href="/static/dashboard.css">
</head>
<body>
<header class="page-header"><h1>Evidence Review Dashboard</h1></header>
{banner}
<main>
<section class="overview" id="overview">{overview}</section>
<h2 class="section-title">Tags</h2>
<section class="gallery" id="tag-gallery">{tags}</section>
<h2 class="section-title">Detections</h2>
<section class="gallery" id="detection-gallery">{detections}</section>
</main>
<div class="detail-templates" hidden>{templates}</div>
<div class="modal" id="detail-modal" hidden>
<div class="modal-content" role="dialog" aria-modal="true">
<button type="button" class="modal-close" aria-label="Close">&times;</button>
<div class="modal-body"></div>
</div>
</div>
<footer class="page-footer">{footer}</footer>
<script src="/static/app.js"></script>
</body>
</html>
"#
    )
}

fn error_banner(message: &str) -> String {
    format!(
        concat!(
            r#"<div class="error-banner" role="alert">"#,
            "<span>{}</span>",
            r#"<button type="button" class="banner-dismiss" aria-label="Dismiss">&times;</button>"#,
            "</div>"
        ),
        escape_html(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::fixtures;

    #[test]
    fn test_views_render_in_order() {
        let html = render_dashboard(&Ok(fixtures::snapshot()));

        let overview = html.find(r#"id="overview""#).unwrap();
        let tags = html.find(r#"id="tag-gallery""#).unwrap();
        let detections = html.find(r#"id="detection-gallery""#).unwrap();
        assert!(overview < tags && tags < detections);

        assert!(!html.contains("error-banner"));
        assert!(html.contains(r#"class="tag-card""#));
        assert!(html.contains(r#"class="detection-card""#));
        assert!(html.contains(r#"data-detail-for="a""#));
        assert!(html.contains("Loaded "));
    }

    #[test]
    fn test_failed_load_shows_banner_and_empty_views() {
        let html = render_dashboard(&Err("Failed to load evidence data: <denied>".to_string()));

        assert!(html.contains(r#"class="error-banner""#));
        assert!(html.contains("banner-dismiss"));
        assert!(html.contains("&lt;denied&gt;"));
        assert!(html.contains(r#"<section class="overview" id="overview"></section>"#));
        assert!(html.contains(r#"<section class="gallery" id="tag-gallery"></section>"#));
        assert!(html.contains(r#"<section class="gallery" id="detection-gallery"></section>"#));
        assert!(!html.contains("<template"));
    }
}
