//! Helpers for content URIs.

/// The uri up to, not including, its last `/`.
///
/// A uri without any `/` has no parent and yields an empty string.
pub fn parent_path(uri: &str) -> &str {
    uri.rfind('/').map(|i| &uri[..i]).unwrap_or("")
}

/// Whether the path points into a bulletin's archive of previous versions.
pub fn is_previous_version(path: &str) -> bool {
    path.rsplit('/').next() == Some("previous")
}

/// For `/a/b/previous/v1`, the live bulletin's path `/a/b`.
pub fn corrected_path(uri: &str) -> Option<String> {
    let parent = parent_path(uri);
    if is_previous_version(parent) {
        Some(parent_path(parent).to_string())
    } else {
        None
    }
}
