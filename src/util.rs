//! Shared utility functions.

/// Escape HTML special characters for use in text and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Format a byte count for download labels.
///
/// 512 -> "512 B"
/// 2048 -> "2 kB"
/// 3_500_000 -> "3.3 MB"
pub fn human_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let size = bytes as f64;
    if size < KB {
        format!("{} B", bytes)
    } else if size < MB {
        format!("{} kB", (size / KB).round() as u64)
    } else {
        format!("{:.1} MB", size / MB)
    }
}

/// Final segment of a slash separated path.
///
/// "/economy/bulletins/abc123" -> "abc123"
pub fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}
