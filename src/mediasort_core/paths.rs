use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Folder name for raw files inside the backup tree.
pub const RAW_BACKUP_FOLDER: &str = "raw";

/// Folder name for edited files inside the backup tree.
pub const EDITED_BACKUP_FOLDER: &str = "edited";

/// Destination of an imported raw file: `{local}/{YYYY}-{MM}-{DD}/{file_name}`.
pub fn raw_import_destination(local_raw_path: &Path, file_name: &str, timestamp: OffsetDateTime) -> PathBuf {
    let day_folder = format!(
        "{}-{:02}-{:02}",
        timestamp.year(),
        timestamp.month() as u8,
        timestamp.day()
    );
    local_raw_path.join(day_folder).join(file_name)
}

/// Destination of a raw file in the backup tree:
/// `{backup}/raw/{YYYY}/{MM}/{DD}/{HH}{mm}{ss}_{file_name}`.
pub fn raw_backup_destination(backup_path: &Path, file_name: &str, timestamp: OffsetDateTime) -> PathBuf {
    backup_destination(backup_path, RAW_BACKUP_FOLDER, file_name, timestamp)
}

/// Destination of an edited file in the backup tree:
/// `{backup}/edited/{YYYY}/{MM}/{DD}/{HH}{mm}{ss}_{file_name}`.
pub fn edited_backup_destination(backup_path: &Path, file_name: &str, timestamp: OffsetDateTime) -> PathBuf {
    backup_destination(backup_path, EDITED_BACKUP_FOLDER, file_name, timestamp)
}

fn backup_destination(
    backup_path: &Path,
    folder: &str,
    file_name: &str,
    timestamp: OffsetDateTime,
) -> PathBuf {
    backup_path
        .join(folder)
        .join(timestamp.year().to_string())
        .join(format!("{:02}", timestamp.month() as u8))
        .join(format!("{:02}", timestamp.day()))
        .join(format!(
            "{:02}{:02}{:02}_{}",
            timestamp.hour(),
            timestamp.minute(),
            timestamp.second(),
            file_name
        ))
}
