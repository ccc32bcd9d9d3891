use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;
use std::path::PathBuf;

/// Environment variables the binary reads; cleared so the host shell cannot leak into tests.
const CONFIG_ENV_VARS: &[&str] = &[
    "LOG_LEVEL",
    "LOG_FILE",
    "PATH_CONFIG",
    "FILE_OP",
    "IMPORT_RAW",
    "BACKUP_RAW",
    "BACKUP_EDITED",
    "UPLOAD_EDITED",
    "SOURCE_PATH",
    "LOCAL_RAW_PATH",
    "LOCAL_EDITED_PATH",
    "BACKUP_PATH",
    "MEDIA_EXTENSIONS",
    "LAST_IMPORT_FILE",
    "REPORT_FORMAT",
];

/// Scratch source, local and backup trees for one test.
pub struct Workspace {
    pub temp: TempDir,
    pub source: ChildPath,
    pub local_raw: ChildPath,
    pub local_edited: ChildPath,
    pub backup: ChildPath,
    pub watermark: ChildPath,
}

pub fn setup_workspace() -> Workspace {
    let temp = TempDir::new().unwrap();
    let source = temp.child("card/DCIM");
    let local_raw = temp.child("Pictures/raw");
    let local_edited = temp.child("Pictures/edited");
    let backup = temp.child("backup");
    for dir in [&source, &local_raw, &local_edited, &backup] {
        dir.create_dir_all().unwrap();
    }
    let watermark = temp.child("state/last_import.txt");

    Workspace {
        temp,
        source,
        local_raw,
        local_edited,
        backup,
        watermark,
    }
}

/// A mediasort command with no environment overrides.
pub fn bare_command() -> Command {
    let mut cmd = Command::cargo_bin("mediasort").unwrap();
    for var in CONFIG_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Paths handed to the binary; start from `Workspace::paths` and swap single entries.
#[derive(Clone)]
pub struct RunPaths {
    pub source: PathBuf,
    pub local_raw: PathBuf,
    pub local_edited: PathBuf,
    pub backup: PathBuf,
    pub watermark: PathBuf,
}

impl Workspace {
    pub fn paths(&self) -> RunPaths {
        RunPaths {
            source: self.source.path().to_path_buf(),
            local_raw: self.local_raw.path().to_path_buf(),
            local_edited: self.local_edited.path().to_path_buf(),
            backup: self.backup.path().to_path_buf(),
            watermark: self.watermark.path().to_path_buf(),
        }
    }
}

/// A mediasort command copying between the given paths.
pub fn command_with_paths(paths: &RunPaths) -> Command {
    let mut cmd = bare_command();
    cmd.arg("--file-op")
        .arg("copy")
        .arg("--source-path")
        .arg(&paths.source)
        .arg("--local-raw-path")
        .arg(&paths.local_raw)
        .arg("--local-edited-path")
        .arg(&paths.local_edited)
        .arg("--backup-path")
        .arg(&paths.backup)
        .arg("--watermark-file")
        .arg(&paths.watermark);
    cmd
}

/// A mediasort command pointed at the workspace trees, copying by default.
pub fn workspace_command(ws: &Workspace) -> Command {
    command_with_paths(&ws.paths())
}
