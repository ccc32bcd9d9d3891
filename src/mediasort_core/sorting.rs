use crate::mediasort_core::error::{MediasortError, Result};
use crate::mediasort_core::exif::MetadataExtractor;
use crate::mediasort_core::media::{DEFAULT_EXTENSIONS, is_supported_media_file, normalize_extension};
use crate::mediasort_core::paths::{edited_backup_destination, raw_backup_destination, raw_import_destination};
use crate::mediasort_core::stats::{BackupStats, ImportStats, UploadStats};
use crate::mediasort_core::storage::Storage;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// How backups transfer a file that is not yet in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    Copy,
    Move,
    /// Backups leave every file where it is and log a warning.
    None,
}

/// Immutable settings shared by every sorting operation.
#[derive(Debug, Clone)]
pub struct SortCriteria {
    extensions: Vec<String>,
    pub source_path: PathBuf,
    pub local_raw_path: PathBuf,
    pub local_edited_path: PathBuf,
    pub backup_path: PathBuf,
    pub operation_mode: OperationMode,
}

impl SortCriteria {
    pub fn new<S: AsRef<str>>(
        extensions: &[S],
        source_path: impl Into<PathBuf>,
        local_raw_path: impl Into<PathBuf>,
        local_edited_path: impl Into<PathBuf>,
        backup_path: impl Into<PathBuf>,
        operation_mode: OperationMode,
    ) -> Self {
        let mut normalized: Vec<String> = Vec::with_capacity(extensions.len());
        for ext in extensions {
            let ext = normalize_extension(ext.as_ref());
            if !ext.is_empty() && !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }

        Self {
            extensions: normalized,
            source_path: source_path.into(),
            local_raw_path: local_raw_path.into(),
            local_edited_path: local_edited_path.into(),
            backup_path: backup_path.into(),
            operation_mode,
        }
    }

    /// Criteria using `DEFAULT_EXTENSIONS`.
    pub fn with_default_extensions(
        source_path: impl Into<PathBuf>,
        local_raw_path: impl Into<PathBuf>,
        local_edited_path: impl Into<PathBuf>,
        backup_path: impl Into<PathBuf>,
        operation_mode: OperationMode,
    ) -> Self {
        Self::new(
            DEFAULT_EXTENSIONS,
            source_path,
            local_raw_path,
            local_edited_path,
            backup_path,
            operation_mode,
        )
    }

    /// Supported extensions, lowercase without the dot.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

/// Which local tree a backup pass reads and where it files things.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackupKind {
    Raw,
    Edited,
}

impl BackupKind {
    fn label(self) -> &'static str {
        match self {
            BackupKind::Raw => "local raw",
            BackupKind::Edited => "local edited",
        }
    }

    fn destination(self, backup_path: &Path, file_name: &str, timestamp: OffsetDateTime) -> PathBuf {
        match self {
            BackupKind::Raw => raw_backup_destination(backup_path, file_name, timestamp),
            BackupKind::Edited => edited_backup_destination(backup_path, file_name, timestamp),
        }
    }
}

/// Result of enumerating and filtering a tree.
struct Candidates {
    checked: usize,
    media: Vec<PathBuf>,
}

/// Decides what happens to every media file during import and backup.
pub struct SortingService<'a, S, M> {
    criteria: &'a SortCriteria,
    storage: S,
    extractor: M,
}

impl<'a, S: Storage, M: MetadataExtractor> SortingService<'a, S, M> {
    pub fn new(criteria: &'a SortCriteria, storage: S, extractor: M) -> Self {
        Self {
            criteria,
            storage,
            extractor,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Copy files captured after `last_import` from the source into the local raw tree.
    ///
    /// Returns the newest imported capture time, or `last_import` itself when
    /// nothing was imported. Persisting it is left to the caller.
    pub fn import_raw_files(
        &mut self,
        last_import: OffsetDateTime,
        stats: &mut ImportStats,
    ) -> Result<OffsetDateTime> {
        let source = self.criteria.source_path.as_path();
        log::info!("Importing raw files from {}", source.display());

        // An unmounted card is reported as such rather than as a failed walk
        if !self.storage.path_exists(source)? {
            return Err(MediasortError::SourceUnavailable(source.to_path_buf()));
        }

        let candidates = self.collect_media(source)?;
        stats.checked += candidates.checked;
        stats.found += candidates.media.len();

        let bar = progress_bar(candidates.media.len(), "Importing");
        let total = candidates.media.len();
        let mut newest = last_import;

        for (index, path) in candidates.media.iter().enumerate() {
            let remaining = total - index - 1;
            let record = self.extractor.decode(path)?;

            if record.captured_at <= last_import {
                log::debug!(
                    "{} files remaining; skipping {} (captured {} not after {})",
                    remaining,
                    path.display(),
                    record.captured_at,
                    last_import
                );
                stats.skipped += 1;
                bar.inc(1);
                continue;
            }

            let destination =
                raw_import_destination(&self.criteria.local_raw_path, &record.file_name, record.captured_at);
            self.storage.copy_file(path, &destination)?;

            if record.captured_at > newest {
                newest = record.captured_at;
            }
            stats.imported += 1;
            log::debug!(
                "{} files remaining; imported {} -> {}",
                remaining,
                path.display(),
                destination.display()
            );
            bar.inc(1);
        }

        bar.finish_and_clear();
        log::info!(
            "Import of raw files completed: {} of {} media files imported",
            stats.imported,
            stats.found
        );

        Ok(newest)
    }

    /// Back up the local raw tree into `{backup}/raw`.
    pub fn backup_local_raw_files(&mut self, stats: &mut BackupStats) -> Result<()> {
        self.backup_tree(BackupKind::Raw, stats)
    }

    /// Back up the local edited tree into `{backup}/edited`.
    pub fn backup_local_edited_files(&mut self, stats: &mut BackupStats) -> Result<()> {
        self.backup_tree(BackupKind::Edited, stats)
    }

    /// Uploading edited files is not implemented; the stage only reports that.
    pub fn upload_edited_files(&mut self, stats: &mut UploadStats) -> Result<()> {
        log::warn!(
            "Upload of edited files is not implemented, nothing uploaded from {}",
            self.criteria.local_edited_path.display()
        );
        log::debug!("Upload stats unchanged: {:?}", stats);
        Ok(())
    }

    fn backup_tree(&mut self, kind: BackupKind, stats: &mut BackupStats) -> Result<()> {
        let source = match kind {
            BackupKind::Raw => self.criteria.local_raw_path.as_path(),
            BackupKind::Edited => self.criteria.local_edited_path.as_path(),
        };
        log::info!("Backing up {} files from {}", kind.label(), source.display());

        let candidates = self.collect_media(source)?;
        stats.checked += candidates.checked;
        stats.found += candidates.media.len();

        let bar = progress_bar(candidates.media.len(), "Backing up");
        let total = candidates.media.len();

        for (index, path) in candidates.media.iter().enumerate() {
            let remaining = total - index - 1;
            let record = self.extractor.decode(path)?;
            let destination = kind.destination(&self.criteria.backup_path, &record.file_name, record.captured_at);

            if self.storage.file_exists(&destination)? {
                log::debug!(
                    "{} files remaining; skipping {} (duplicate: {} already exists)",
                    remaining,
                    path.display(),
                    destination.display()
                );
                stats.duplicates += 1;
                bar.inc(1);
                continue;
            }

            match self.criteria.operation_mode {
                OperationMode::Copy => {
                    self.storage.copy_file(path, &destination)?;
                    stats.copied += 1;
                }
                OperationMode::Move => {
                    self.storage.move_file(path, &destination)?;
                    stats.moved += 1;
                }
                OperationMode::None => {
                    log::warn!(
                        "No file operation specified (neither move nor copy), leaving {}",
                        path.display()
                    );
                    stats.unhandled += 1;
                    bar.inc(1);
                    continue;
                }
            }

            log::debug!(
                "{} files remaining; backed up {} -> {}",
                remaining,
                path.display(),
                destination.display()
            );
            bar.inc(1);
        }

        bar.finish_and_clear();
        log::info!(
            "Backup of {} files completed: {} copied, {} moved, {} duplicates",
            kind.label(),
            stats.copied,
            stats.moved,
            stats.duplicates
        );

        Ok(())
    }

    /// Walk `root` and keep only files with a supported extension.
    fn collect_media(&self, root: &Path) -> Result<Candidates> {
        let files = self.storage.list_files_recursively(root)?;
        let checked = files.len();

        let media: Vec<PathBuf> = files
            .into_iter()
            .filter(|path| {
                let supported = is_supported_media_file(path, self.criteria.extensions());
                if !supported {
                    log::debug!("Skipping non-media file: {}", path.display());
                }
                supported
            })
            .collect();

        log::info!("Found {} media files among {} files", media.len(), checked);
        Ok(Candidates { checked, media })
    }
}

fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    let bar = ProgressBar::new(len as u64).with_style(style);
    bar.set_message(message);
    bar
}
