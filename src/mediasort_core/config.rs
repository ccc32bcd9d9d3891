use crate::mediasort_core::cli::Cli;
use crate::mediasort_core::error::{MediasortError, Result};
use crate::mediasort_core::media::DEFAULT_EXTENSIONS;
use crate::mediasort_core::runner::Stage;
use crate::mediasort_core::sorting::{OperationMode, SortCriteria};
use clap::ValueEnum;
use simplelog::LevelFilter;
use std::path::{Path, PathBuf};

/// Bundled sets of source, local and backup locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PathProfile {
    /// Camera card and the real photo library
    Default,
    /// Scratch folders under ~/Pictures/testing
    Test,
}

/// How backups transfer files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileOperation {
    Copy,
    Move,
}

impl From<FileOperation> for OperationMode {
    fn from(op: FileOperation) -> Self {
        match op {
            FileOperation::Copy => OperationMode::Copy,
            FileOperation::Move => OperationMode::Move,
        }
    }
}

/// Locations selected by a `PathProfile`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePaths {
    pub source: PathBuf,
    pub local_raw: PathBuf,
    pub local_edited: PathBuf,
    pub backup: PathBuf,
}

impl PathProfile {
    pub fn paths(self, home: &Path) -> ProfilePaths {
        match self {
            PathProfile::Default => ProfilePaths {
                source: PathBuf::from("/Volumes/EOS_DIGITAL/DCIM"),
                local_raw: home.join("Pictures/raw"),
                local_edited: home.join("Pictures/edited"),
                backup: PathBuf::from("/"),
            },
            PathProfile::Test => {
                let root = home.join("Pictures/testing");
                ProfilePaths {
                    source: root.join("raw"),
                    local_raw: root.join("rawsorted"),
                    local_edited: root.join("edited"),
                    backup: root.join("backup"),
                }
            }
        }
    }
}

/// Which stages run, always in `Stage` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageToggles {
    pub import_raw: bool,
    pub backup_raw: bool,
    pub backup_edited: bool,
    pub upload_edited: bool,
}

impl StageToggles {
    pub fn enabled(&self) -> Vec<Stage> {
        [
            (self.import_raw, Stage::ImportRaw),
            (self.backup_raw, Stage::BackupRaw),
            (self.backup_edited, Stage::BackupEdited),
            (self.upload_edited, Stage::UploadEdited),
        ]
        .into_iter()
        .filter_map(|(on, stage)| on.then_some(stage))
        .collect()
    }
}

/// Fully resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: LevelFilter,
    pub path_profile: PathProfile,
    pub criteria: SortCriteria,
    pub stages: StageToggles,
    pub watermark_file: PathBuf,
}

impl Config {
    /// Resolve the command line against the current user's home directory.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        Self::resolve(cli, home.as_deref())
    }

    /// Resolve the command line. Explicit paths win over the profile; the
    /// profile is only consulted (and `home` only required) for paths left unset.
    pub fn resolve(cli: &Cli, home: Option<&Path>) -> Result<Self> {
        let profile = home.map(|h| cli.path_profile.paths(h));
        let pick = |explicit: &Option<PathBuf>, flag: &str, from_profile: fn(&ProfilePaths) -> &PathBuf| {
            explicit
                .clone()
                .or_else(|| profile.as_ref().map(|p| from_profile(p).clone()))
                .ok_or_else(|| {
                    MediasortError::Config(format!(
                        "HOME is not set, pass --{} to choose a location",
                        flag
                    ))
                })
        };

        let source = pick(&cli.source_path, "source-path", |p| &p.source)?;
        let local_raw = pick(&cli.local_raw_path, "local-raw-path", |p| &p.local_raw)?;
        let local_edited = pick(&cli.local_edited_path, "local-edited-path", |p| &p.local_edited)?;
        let backup = pick(&cli.backup_path, "backup-path", |p| &p.backup)?;

        let criteria = match &cli.extensions {
            Some(exts) => SortCriteria::new(exts.as_slice(), source, local_raw, local_edited, backup, cli.file_op.into()),
            None => SortCriteria::new(DEFAULT_EXTENSIONS, source, local_raw, local_edited, backup, cli.file_op.into()),
        };
        if criteria.extensions().is_empty() {
            return Err(MediasortError::Config(
                "no media extensions configured".to_string(),
            ));
        }

        Ok(Config {
            log_level: cli.log_level,
            path_profile: cli.path_profile,
            criteria,
            stages: StageToggles {
                import_raw: cli.import_raw,
                backup_raw: cli.backup_raw,
                backup_edited: cli.backup_edited,
                upload_edited: cli.upload_edited,
            },
            watermark_file: cli.watermark_file.clone(),
        })
    }

    /// Log the effective configuration at startup.
    pub fn log_config(&self) {
        log::info!("Config on startup:");
        log::info!("  log level:         {}", self.log_level);
        log::info!("  path profile:      {:?}", self.path_profile);
        log::info!("  source path:       {}", self.criteria.source_path.display());
        log::info!("  local raw path:    {}", self.criteria.local_raw_path.display());
        log::info!("  local edited path: {}", self.criteria.local_edited_path.display());
        log::info!("  backup path:       {}", self.criteria.backup_path.display());
        log::info!("  extensions:        {}", self.criteria.extensions().join(","));
        log::info!("  operation mode:    {:?}", self.criteria.operation_mode);
        log::info!("  last import file:  {}", self.watermark_file.display());
        log::info!("  stages:            {:?}", self.stages.enabled());
    }
}
