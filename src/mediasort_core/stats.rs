use serde::Serialize;

/// Counters for the raw import stage.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub checked: usize,
    pub found: usize,
    pub imported: usize,
    /// Files at or before the last import date.
    pub skipped: usize,
}

/// Counters for a local raw or local edited backup stage.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BackupStats {
    pub checked: usize,
    pub found: usize,
    pub moved: usize,
    pub copied: usize,
    /// Files whose destination already existed.
    pub duplicates: usize,
    /// Files left alone because no operation mode was configured.
    pub unhandled: usize,
}

/// Counters for the upload stage.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct UploadStats {
    pub checked: usize,
    pub found: usize,
    pub uploaded: usize,
}

/// Statistics for a whole run, one slice per stage.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub raw_import: ImportStats,
    pub local_raw_backup: BackupStats,
    pub local_edited_backup: BackupStats,
    pub upload: UploadStats,
}

/// Aggregate counters across all stages.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub checked: usize,
    pub found: usize,
    pub processed: usize,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn totals(&self) -> Totals {
        let backups = [&self.local_raw_backup, &self.local_edited_backup];
        Totals {
            checked: self.raw_import.checked
                + backups.iter().map(|b| b.checked).sum::<usize>()
                + self.upload.checked,
            found: self.raw_import.found
                + backups.iter().map(|b| b.found).sum::<usize>()
                + self.upload.found,
            processed: self.raw_import.imported
                + backups.iter().map(|b| b.moved + b.copied).sum::<usize>()
                + self.upload.uploaded,
        }
    }

    /// Human readable report, one line per stage followed by totals.
    pub fn summary_lines(&self) -> Vec<String> {
        let totals = self.totals();
        vec![
            format!(
                "Raw Files:          Checked: {}, Found: {}, Imported: {}, Skipped: {}",
                self.raw_import.checked,
                self.raw_import.found,
                self.raw_import.imported,
                self.raw_import.skipped
            ),
            format!("Local Raw Files:    {}", self.local_raw_backup),
            format!("Local Edited Files: {}", self.local_edited_backup),
            format!(
                "To Upload Files:    Checked: {}, Found: {}, Uploaded: {}",
                self.upload.checked, self.upload.found, self.upload.uploaded
            ),
            format!(
                "Totals:             Checked: {}, Found: {}, Processed: {}",
                totals.checked, totals.found, totals.processed
            ),
        ]
    }

    /// JSON report including totals.
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Report<'a> {
            #[serde(flatten)]
            stages: &'a RunStats,
            totals: Totals,
        }

        serde_json::to_string_pretty(&Report {
            stages: self,
            totals: self.totals(),
        })
    }
}

impl std::fmt::Display for BackupStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Checked: {}, Found: {}, Moved: {}, Copied: {}, Duplicates: {}",
            self.checked, self.found, self.moved, self.copied, self.duplicates
        )?;
        if self.unhandled > 0 {
            write!(f, ", Unhandled: {}", self.unhandled)?;
        }
        Ok(())
    }
}
