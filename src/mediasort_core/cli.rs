use crate::mediasort_core::config::{FileOperation, PathProfile};
use crate::mediasort_core::watermark::LAST_IMPORT_FILE_NAME;
use clap::builder::BoolishValueParser;
use clap::{Parser, ValueEnum};
use simplelog::LevelFilter;
use std::path::PathBuf;

/// Every option can also be given through the environment variable shown in `--help`.
/// Stage toggles read from the environment accept 1/0, true/false, yes/no and on/off.
#[derive(Parser, Debug)]
#[command(author, version, about = "Import camera media and back up local photo trees")]
pub struct Cli {
    /// Terminal log level (off, error, warn, info, debug, trace)
    #[arg(long, env = "LOG_LEVEL", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,

    /// Also write a debug log to this file
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Bundled set of source, local and backup paths
    #[arg(long, env = "PATH_CONFIG", value_enum, default_value_t = PathProfile::Default)]
    pub path_profile: PathProfile,

    /// Whether backups copy or move files. A move renames into the archive and
    /// does not create missing date folders, so it fails for days not yet backed up
    #[arg(long, env = "FILE_OP", value_enum)]
    pub file_op: FileOperation,

    /// Import new files from the source into the local raw tree
    #[arg(long, env = "IMPORT_RAW", value_parser = BoolishValueParser::new())]
    pub import_raw: bool,

    /// Back up the local raw tree
    #[arg(long, env = "BACKUP_RAW", value_parser = BoolishValueParser::new())]
    pub backup_raw: bool,

    /// Back up the local edited tree
    #[arg(long, env = "BACKUP_EDITED", value_parser = BoolishValueParser::new())]
    pub backup_edited: bool,

    /// Upload edited files (not implemented, logs a warning)
    #[arg(long, env = "UPLOAD_EDITED", value_parser = BoolishValueParser::new())]
    pub upload_edited: bool,

    /// Override the profile's source path (usually the camera card)
    #[arg(long, env = "SOURCE_PATH")]
    pub source_path: Option<PathBuf>,

    /// Override the profile's local raw path
    #[arg(long, env = "LOCAL_RAW_PATH")]
    pub local_raw_path: Option<PathBuf>,

    /// Override the profile's local edited path
    #[arg(long, env = "LOCAL_EDITED_PATH")]
    pub local_edited_path: Option<PathBuf>,

    /// Override the profile's backup path
    #[arg(long, env = "BACKUP_PATH")]
    pub backup_path: Option<PathBuf>,

    /// Supported media extensions, comma-separated (e.g. "jpg,cr3,mp4")
    #[arg(long, env = "MEDIA_EXTENSIONS", value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// File holding the capture time of the newest imported file
    #[arg(long, env = "LAST_IMPORT_FILE", default_value = LAST_IMPORT_FILE_NAME)]
    pub watermark_file: PathBuf,

    /// Format of the end-of-run statistics
    #[arg(long, env = "REPORT_FORMAT", value_enum, default_value_t = ReportFormat::Text)]
    pub report: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One line per stage plus totals
    Text,
    /// JSON object
    Json,
}
