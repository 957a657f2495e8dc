/// Normalize MIME type by stripping parameters and case
/// (e.g. "Image/JPEG; charset=utf-8" -> "image/jpeg").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .unwrap_or(content_type)
        .to_ascii_lowercase()
}

/// Lowercased text after the last dot of a file name. A bare dotted name such
/// as `.pdf` counts as having the extension `pdf`.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && !ext.contains(['/', '\\']))
        .map(str::to_ascii_lowercase)
}
