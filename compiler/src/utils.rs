use std::path::Path;

/// Quotes `text` as a double-quoted literal, escaping quotes, backslashes and
/// control characters.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// Logical name of a schema path: the file name without directory or extension.
pub fn base_name(path: &str) -> String {
    Path::new(path.trim())
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Splits a comma-separated list into uppercased, trimmed, non-empty entries.
pub fn split_upper_list(text: Option<&str>) -> Vec<String> {
    text.unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
        .collect()
}
