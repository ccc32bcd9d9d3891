use anyhow::{Context, Result};
use clap::Parser;
use mediasort::mediasort_core::exif::exiftool_available;
use mediasort::mediasort_core::{
    Cli, Config, ExiftoolExtractor, FileWatermarkStore, FsStorage, ReportFormat, RunStats,
    SortingService, run_stages,
};
use simplelog::{CombinedLogger, LevelFilter, SharedLogger, TermLogger, WriteLogger};
use std::fs::File;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize loggers; stdout is reserved for the report
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        cli.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )];

    if let Some(log_file) = &cli.log_file {
        let file = File::create(log_file)
            .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, simplelog::Config::default(), file));
    }

    CombinedLogger::init(loggers)?;

    let config = Config::from_cli(&cli).context("Invalid configuration")?;
    config.log_config();

    let stages = config.stages.enabled();
    if stages.is_empty() {
        log::warn!("No stages enabled, nothing to do");
    } else if !exiftool_available() {
        log::warn!("exiftool was not found in PATH, decoding media files will fail");
    }

    log::info!("Media sort started");

    let mut service = SortingService::new(&config.criteria, FsStorage::new(), ExiftoolExtractor::new());
    let mut watermark = FileWatermarkStore::new(&config.watermark_file);
    let mut stats = RunStats::new();

    let outcome = run_stages(&mut service, &mut watermark, &config.stages, &mut stats);

    match cli.report {
        ReportFormat::Text => {
            for line in stats.summary_lines() {
                println!("{}", line);
            }
        }
        ReportFormat::Json => println!("{}", stats.to_json()?),
    }

    if let Err(e) = outcome {
        let err = anyhow::Error::from(e);
        log::error!("{:#}", err);
        return Err(err);
    }

    log::info!("Media sort completed");
    Ok(())
}
