use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Capture metadata decoded from a single media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    pub file_name: String,
    pub source_path: PathBuf,
    /// Lowercased camera model, empty when the file does not carry one.
    pub camera_model: String,
    pub captured_at: OffsetDateTime,
}

/// Extensions handled when none are configured (lowercase, no dot).
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "raw", "cr2", "cr3", "mp4", "mov"];

/// Normalize a configured extension: trimmed, lowercase, no leading dot.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Check whether a path ends in one of the supported extensions.
///
/// Only the text after the final `.` is compared, ignoring case, so
/// `a.JPG` matches `jpg` while `a.jpgx` and `jpg` (no dot) do not.
pub fn is_supported_media_file<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let path_str = path.to_string_lossy();
    let Some((_, ext)) = path_str.rsplit_once('.') else {
        return false;
    };

    extensions
        .iter()
        .any(|candidate| !ext.is_empty() && ext.eq_ignore_ascii_case(candidate.as_ref()))
}

/// Extract the final path component as an owned string.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
