//! Escaping and number formatting shared by the renderers

use evidence_common::model::{BoundingBox, Coords};

/// Escape text for use in HTML content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `(x, y, z)` with the given number of decimals
pub fn coords(c: &Coords, decimals: usize) -> String {
    format!(
        "({:.prec$}, {:.prec$}, {:.prec$})",
        c[0],
        c[1],
        c[2],
        prec = decimals
    )
}

/// `[x1, y1, x2, y2]`
pub fn bounding_box(b: &BoundingBox) -> String {
    format!("[{}, {}, {}, {}]", b[0], b[1], b[2], b[3])
}

/// Confidence in 0.0-1.0 as a percentage with one decimal
pub fn confidence(c: f64) -> String {
    format!("{:.1}%", c * 100.0)
}

/// `1 photo`, `3 photos`
pub fn count(n: u64, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, plural)
    }
}

/// Image shown in place of a path that does not point into the data root
pub const PLACEHOLDER_URL: &str = "/static/placeholder.svg";

/// URL for a data-relative file path, served under `/data`
///
/// Paths are written by the processing tools relative to the root folder
/// (`data/tag_photos/...`), sometimes with Windows separators. The result is
/// always a same-origin path: leading slashes collapse to one, and anything
/// carrying a URL scheme falls back to the placeholder.
pub fn asset_url(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let trimmed = normalized
        .trim_start_matches("./")
        .trim_start_matches('/');

    let first_segment = trimmed.split('/').next().unwrap_or_default();
    if first_segment.contains(':') {
        return PLACEHOLDER_URL.to_string();
    }
    format!("/{}", trimmed)
}

/// Last path component, accepting either separator
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
