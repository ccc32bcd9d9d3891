use crate::mediasort_core::error::{MediasortError, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::datetime;

/// Default location of the last import file, relative to the working directory.
pub const LAST_IMPORT_FILE_NAME: &str = "last_import.txt";

/// Watermark reported when nothing has ever been imported.
pub const NEVER_IMPORTED: OffsetDateTime = datetime!(1990-01-01 00:00:00 UTC);

/// Persists the capture time of the newest imported file between runs.
pub trait WatermarkStore {
    /// The stored watermark, or `NEVER_IMPORTED` if none was recorded.
    fn get(&self) -> Result<OffsetDateTime>;

    fn set(&mut self, timestamp: OffsetDateTime) -> Result<()>;
}

/// `WatermarkStore` holding a single RFC 3339 timestamp in a text file.
#[derive(Debug, Clone)]
pub struct FileWatermarkStore {
    path: PathBuf,
}

impl FileWatermarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn error(&self, reason: impl ToString) -> MediasortError {
        MediasortError::Watermark {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl WatermarkStore for FileWatermarkStore {
    fn get(&self) -> Result<OffsetDateTime> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!(
                    "No last import file at {}, using default date",
                    self.path.display()
                );
                return Ok(NEVER_IMPORTED);
            }
            Err(e) => return Err(self.error(e)),
        };

        OffsetDateTime::parse(contents.trim(), &Rfc3339).map_err(|e| self.error(e))
    }

    fn set(&mut self, timestamp: OffsetDateTime) -> Result<()> {
        let formatted = timestamp.format(&Rfc3339).map_err(|e| self.error(e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.error(e))?;
        }
        fs::write(&self.path, formatted).map_err(|e| self.error(e))?;

        log::debug!("Recorded last import date {} in {}", timestamp, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    #[test]
    fn test_missing_file_returns_sentinel() {
        let temp = TempDir::new().unwrap();
        let store = FileWatermarkStore::new(temp.path().join(LAST_IMPORT_FILE_NAME));
        assert_eq!(store.get().unwrap(), NEVER_IMPORTED);
    }

    #[test]
    fn test_set_writes_bare_rfc3339() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("state/nested/last_import.txt");
        let mut store = FileWatermarkStore::new(file.path());

        store.set(datetime!(2024-01-02 00:00:00 UTC)).unwrap();

        file.assert("2024-01-02T00:00:00Z");
        assert_eq!(store.get().unwrap(), datetime!(2024-01-02 00:00:00 UTC));
    }

    #[test]
    fn test_offset_is_preserved() {
        let temp = TempDir::new().unwrap();
        let mut store = FileWatermarkStore::new(temp.path().join("last_import.txt"));

        store.set(datetime!(2024-05-01 12:00:00 +02:00)).unwrap();

        let stored = store.get().unwrap();
        assert_eq!(stored, datetime!(2024-05-01 10:00:00 UTC));
        assert_eq!(stored.offset(), time::macros::offset!(+2));
    }

    #[test]
    fn test_trailing_newline_is_tolerated() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("last_import.txt");
        file.write_str("2023-08-15T06:30:00Z\n").unwrap();

        let store = FileWatermarkStore::new(file.path());
        assert_eq!(store.get().unwrap(), datetime!(2023-08-15 06:30:00 UTC));
    }

    #[test]
    fn test_garbage_is_an_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("last_import.txt");
        file.write_str("yesterday").unwrap();

        let store = FileWatermarkStore::new(file.path());
        assert!(matches!(store.get(), Err(MediasortError::Watermark { .. })));
    }
}
