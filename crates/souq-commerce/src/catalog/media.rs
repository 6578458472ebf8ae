//! Image references.

/// Resolve a backend image path against the asset base URL.
///
/// Absolute `http(s)` URLs and `data:` URIs pass through unchanged.
pub fn resolve_media_url(asset_base_url: &str, image: &str) -> String {
    let image = image.trim();
    if image.starts_with("http://") || image.starts_with("https://") || image.starts_with("data:") {
        return image.to_string();
    }
    format!(
        "{}/{}",
        asset_base_url.trim_end_matches('/'),
        image.trim_start_matches('/')
    )
}
