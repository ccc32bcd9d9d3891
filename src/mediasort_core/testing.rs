//! In-memory collaborators for exercising the sorting engine without touching disk.

use crate::mediasort_core::error::{MediasortError, Result};
use crate::mediasort_core::exif::MetadataExtractor;
use crate::mediasort_core::media::MediaRecord;
use crate::mediasort_core::storage::Storage;
use crate::mediasort_core::watermark::{NEVER_IMPORTED, WatermarkStore};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// In-memory file tree; file contents are plain strings.
#[derive(Default)]
pub(crate) struct FakeStorage {
    files: RefCell<BTreeMap<PathBuf, String>>,
    pub(crate) dirs: Vec<PathBuf>,
    copies: Cell<usize>,
    moves: Cell<usize>,
    pub(crate) fail_copy: bool,
}

impl FakeStorage {
    pub(crate) fn with_files(files: &[&str]) -> Self {
        let storage = FakeStorage::default();
        for f in files {
            storage.add(f, f);
        }
        storage
    }

    /// Empty directories that exist but hold no files.
    pub(crate) fn with_dirs(dirs: &[&str]) -> Self {
        FakeStorage {
            dirs: dirs.iter().map(PathBuf::from).collect(),
            ..Default::default()
        }
    }

    pub(crate) fn add(&self, path: &str, contents: &str) {
        self.files
            .borrow_mut()
            .insert(PathBuf::from(path), contents.to_string());
    }

    pub(crate) fn contents(&self, path: &str) -> Option<String> {
        self.files.borrow().get(Path::new(path)).cloned()
    }

    pub(crate) fn has(&self, path: &str) -> bool {
        self.contents(path).is_some()
    }

    pub(crate) fn copies(&self) -> usize {
        self.copies.get()
    }

    pub(crate) fn moves(&self) -> usize {
        self.moves.get()
    }
}

impl Storage for FakeStorage {
    fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect())
    }

    fn list_files_recursively(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !self.path_exists(path)? {
            return Err(MediasortError::ReadDir {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|p| p.starts_with(path))
            .cloned()
            .collect())
    }

    fn file_exists(&self, path: &Path) -> Result<bool> {
        Ok(self.files.borrow().contains_key(path))
    }

    fn path_exists(&self, path: &Path) -> Result<bool> {
        Ok(self.dirs.iter().any(|d| d == path)
            || self.files.borrow().keys().any(|p| p.starts_with(path)))
    }

    fn move_file(&self, source: &Path, destination: &Path) -> Result<()> {
        let mut files = self.files.borrow_mut();
        let contents = files.remove(source).ok_or_else(|| MediasortError::Move {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
            source: io::Error::from(io::ErrorKind::NotFound),
        })?;
        files.insert(destination.to_path_buf(), contents);
        self.moves.set(self.moves.get() + 1);
        Ok(())
    }

    fn copy_file(&self, source: &Path, destination: &Path) -> Result<()> {
        let copy_err = |kind: io::ErrorKind| MediasortError::Copy {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
            source: io::Error::from(kind),
        };
        if self.fail_copy {
            return Err(copy_err(io::ErrorKind::PermissionDenied));
        }
        let mut files = self.files.borrow_mut();
        let contents = files
            .get(source)
            .cloned()
            .ok_or_else(|| copy_err(io::ErrorKind::NotFound))?;
        files.insert(destination.to_path_buf(), contents);
        self.copies.set(self.copies.get() + 1);
        Ok(())
    }
}

/// Extractor answering from a fixed table keyed by file name.
///
/// Files missing from the table fail to decode.
#[derive(Default)]
pub(crate) struct FakeExtractor {
    timestamps: HashMap<String, OffsetDateTime>,
    pub(crate) decoded: Vec<PathBuf>,
}

impl FakeExtractor {
    pub(crate) fn with(entries: &[(&str, OffsetDateTime)]) -> Self {
        Self {
            timestamps: entries
                .iter()
                .map(|(name, ts)| (name.to_string(), *ts))
                .collect(),
            decoded: Vec::new(),
        }
    }
}

impl MetadataExtractor for FakeExtractor {
    fn decode(&mut self, path: &Path) -> Result<MediaRecord> {
        self.decoded.push(path.to_path_buf());
        let file_name = path.file_name().unwrap().to_string_lossy().to_string();
        let captured_at = *self.timestamps.get(&file_name).ok_or_else(|| {
            MediasortError::MetadataExtraction {
                path: path.to_path_buf(),
                reason: "corrupt header".to_string(),
            }
        })?;
        Ok(MediaRecord {
            file_name,
            source_path: path.to_path_buf(),
            camera_model: "canon eos r6".to_string(),
            captured_at,
        })
    }
}

/// Watermark kept in memory, counting writes.
pub(crate) struct MemoryWatermarkStore {
    pub(crate) value: Option<OffsetDateTime>,
    pub(crate) writes: usize,
}

impl MemoryWatermarkStore {
    pub(crate) fn new(value: Option<OffsetDateTime>) -> Self {
        Self { value, writes: 0 }
    }
}

impl WatermarkStore for MemoryWatermarkStore {
    fn get(&self) -> Result<OffsetDateTime> {
        Ok(self.value.unwrap_or(NEVER_IMPORTED))
    }

    fn set(&mut self, timestamp: OffsetDateTime) -> Result<()> {
        self.value = Some(timestamp);
        self.writes += 1;
        Ok(())
    }
}
