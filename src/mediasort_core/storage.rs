use crate::mediasort_core::error::{MediasortError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File system operations the sorting engine relies on.
pub trait Storage {
    /// List regular files directly inside `path`.
    fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// List regular files anywhere below `path`.
    fn list_files_recursively(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// True if a regular file exists at `path`. Not-found is `Ok(false)`.
    fn file_exists(&self, path: &Path) -> Result<bool>;

    /// True if anything (file or directory) exists at `path`.
    fn path_exists(&self, path: &Path) -> Result<bool>;

    /// Rename `source` to `destination`. The destination's parent must already exist.
    fn move_file(&self, source: &Path, destination: &Path) -> Result<()>;

    /// Copy `source` to `destination`, creating missing parent directories.
    fn copy_file(&self, source: &Path, destination: &Path) -> Result<()>;
}

/// `Storage` backed by the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl FsStorage {
    pub fn new() -> Self {
        FsStorage
    }
}

impl Storage for FsStorage {
    fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let read_dir_err = |source| MediasortError::ReadDir {
            path: path.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(path).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            if entry.file_type().map_err(read_dir_err)?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        Ok(files)
    }

    fn list_files_recursively(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(|source| MediasortError::Walk {
                path: path.to_path_buf(),
                source,
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    fn file_exists(&self, path: &Path) -> Result<bool> {
        match fs::metadata(path) {
            Ok(meta) => Ok(!meta.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(MediasortError::ExistenceCheck {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn path_exists(&self, path: &Path) -> Result<bool> {
        match fs::metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(MediasortError::ExistenceCheck {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn move_file(&self, source: &Path, destination: &Path) -> Result<()> {
        fs::rename(source, destination).map_err(|e| MediasortError::Move {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
            source: e,
        })
    }

    fn copy_file(&self, source: &Path, destination: &Path) -> Result<()> {
        let copy_err = |e| MediasortError::Copy {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
            source: e,
        };

        let mut reader = fs::File::open(source).map_err(copy_err)?;

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(copy_err)?;
        }

        let mut writer = fs::File::create(destination).map_err(copy_err)?;
        io::copy(&mut reader, &mut writer).map_err(copy_err)?;

        Ok(())
    }
}
