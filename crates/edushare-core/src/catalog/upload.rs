//! Upload filename policy.

use chrono::{DateTime, Utc};

/// File extensions accepted for upload (lowercase, without the dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "txt", "md", "zip", "mp4", "avi", "mkv", "mov", "doc", "docx", "ppt", "pptx", "xls",
    "xlsx", "csv", "png", "jpg", "jpeg", "gif", "webm", "webp",
];

/// Check whether a filename has an allowed extension.
///
/// Only the text after the last dot counts, compared case-insensitively.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Reduce a client-supplied filename to a safe, flat ASCII name.
///
/// Path separators become spaces, whitespace runs become `_`, anything outside
/// `[A-Za-z0-9_.-]` is dropped and leading/trailing `.` and `_` are stripped.
/// The result may be empty.
pub fn secure_filename(filename: &str) -> String {
    let flattened: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Name under which an upload is stored: a UTC timestamp prefix keeps
/// repeated uploads of the same file apart.
pub fn stored_filename(at: DateTime<Utc>, original: &str) -> String {
    secure_filename(&format!("{}_{}", at.format("%Y%m%d%H%M%S"), original))
}
