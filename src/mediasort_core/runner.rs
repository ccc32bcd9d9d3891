use crate::mediasort_core::config::StageToggles;
use crate::mediasort_core::error::{MediasortError, Result};
use crate::mediasort_core::exif::MetadataExtractor;
use crate::mediasort_core::sorting::SortingService;
use crate::mediasort_core::stats::{ImportStats, RunStats};
use crate::mediasort_core::storage::Storage;
use crate::mediasort_core::watermark::WatermarkStore;
use time::OffsetDateTime;

/// The stages of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ImportRaw,
    BackupRaw,
    BackupEdited,
    UploadEdited,
}

impl Stage {
    pub fn description(self) -> &'static str {
        match self {
            Stage::ImportRaw => "import raw files",
            Stage::BackupRaw => "back up raw files",
            Stage::BackupEdited => "back up edited files",
            Stage::UploadEdited => "upload edited files",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Run every enabled stage in order, stopping at the first failure.
///
/// Work done by stages that finished before the failure is kept.
pub fn run_stages<S, M, W>(
    service: &mut SortingService<'_, S, M>,
    watermark: &mut W,
    stages: &StageToggles,
    stats: &mut RunStats,
) -> Result<()>
where
    S: Storage,
    M: MetadataExtractor,
    W: WatermarkStore,
{
    for stage in stages.enabled() {
        log::info!("Starting: {}", stage);

        let result = match stage {
            Stage::ImportRaw => import_with_watermark(service, watermark, &mut stats.raw_import).map(|_| ()),
            Stage::BackupRaw => service.backup_local_raw_files(&mut stats.local_raw_backup),
            Stage::BackupEdited => service.backup_local_edited_files(&mut stats.local_edited_backup),
            Stage::UploadEdited => service.upload_edited_files(&mut stats.upload),
        };

        result.map_err(|e| MediasortError::Stage {
            stage,
            source: Box::new(e),
        })?;
        log::info!("Completed: {}", stage);
    }

    Ok(())
}

/// Import against the stored watermark and advance it once the pass succeeds.
pub fn import_with_watermark<S, M, W>(
    service: &mut SortingService<'_, S, M>,
    watermark: &mut W,
    stats: &mut ImportStats,
) -> Result<OffsetDateTime>
where
    S: Storage,
    M: MetadataExtractor,
    W: WatermarkStore,
{
    let last_import = watermark.get()?;
    log::info!("Last import date: {}", last_import);

    let newest = service.import_raw_files(last_import, stats)?;
    if newest > last_import {
        watermark.set(newest)?;
        log::info!("Last import date advanced to {}", newest);
    }

    Ok(newest)
}
