pub mod cli;
pub mod config;
pub mod error;
pub mod exif;
pub mod media;
pub mod paths;
pub mod runner;
pub mod sorting;
pub mod stats;
pub mod storage;
pub mod watermark;

#[cfg(test)]
pub(crate) mod testing;

pub use cli::{Cli, ReportFormat};
pub use config::{Config, FileOperation, PathProfile, StageToggles};
pub use error::{MediasortError, Result};
pub use exif::{ExiftoolExtractor, MetadataExtractor};
pub use media::{DEFAULT_EXTENSIONS, MediaRecord, is_supported_media_file};
pub use paths::{edited_backup_destination, raw_backup_destination, raw_import_destination};
pub use runner::{Stage, import_with_watermark, run_stages};
pub use sorting::{OperationMode, SortCriteria, SortingService};
pub use stats::RunStats;
pub use storage::{FsStorage, Storage};
pub use watermark::{FileWatermarkStore, NEVER_IMPORTED, WatermarkStore};
