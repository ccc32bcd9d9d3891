use crate::mediasort_core::error::{MediasortError, Result};
use crate::mediasort_core::media::{MediaRecord, file_name_of};
use exiftool::ExifTool;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Date format used in EXIF data.
const EXIF_DATE_FORMAT: &[time::format_description::FormatItem] =
    time::macros::format_description!("[year]:[month]:[day] [hour]:[minute]:[second]");

const EXIF_OFFSET_FORMAT: &[time::format_description::FormatItem] =
    time::macros::format_description!("[offset_hour]:[offset_minute]");

/// Decodes capture metadata from media files.
pub trait MetadataExtractor {
    fn decode(&mut self, path: &Path) -> Result<MediaRecord>;
}

/// Raw fields requested from exiftool.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct RawExifInfo {
    #[serde(default)]
    date_time_original: Option<String>,
    #[serde(default)]
    create_date: Option<String>,
    #[serde(default)]
    offset_time_original: Option<String>,
    #[serde(default)]
    offset_time: Option<String>,
    #[serde(default)]
    model: Option<Value>, // Usually a string, but exiftool emits bare numbers for some bodies
}

/// `MetadataExtractor` that shells out to a long-running exiftool process.
///
/// The process is only started on the first decode, so runs that never see a
/// media file work without exiftool installed.
#[derive(Default)]
pub struct ExiftoolExtractor {
    tool: Option<ExifTool>,
}

impl ExiftoolExtractor {
    pub fn new() -> Self {
        Self { tool: None }
    }

    fn tool(&mut self) -> Result<&mut ExifTool> {
        let tool = match self.tool.take() {
            Some(tool) => tool,
            None => {
                log::debug!("Starting exiftool");
                ExifTool::new().map_err(|e| MediasortError::MetadataExtraction {
                    path: Default::default(),
                    reason: format!("could not start exiftool: {}", e),
                })?
            }
        };
        Ok(self.tool.insert(tool))
    }
}

impl MetadataExtractor for ExiftoolExtractor {
    fn decode(&mut self, path: &Path) -> Result<MediaRecord> {
        let raw: RawExifInfo = self.tool()?.read_metadata(path, &[]).map_err(|e| {
            MediasortError::MetadataExtraction {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        let captured_at = capture_timestamp(&raw, path)?;
        let camera_model = raw
            .model
            .as_ref()
            .and_then(value_to_string)
            .unwrap_or_default()
            .to_lowercase();

        log::debug!(
            "Decoded {} (camera: {:?}, captured: {})",
            path.display(),
            camera_model,
            captured_at
        );

        Ok(MediaRecord {
            file_name: file_name_of(path),
            source_path: path.to_path_buf(),
            camera_model,
            captured_at,
        })
    }
}

/// Pick the capture timestamp: DateTimeOriginal first, then CreateDate.
fn capture_timestamp(raw: &RawExifInfo, path: &Path) -> Result<OffsetDateTime> {
    let candidates = [
        (&raw.date_time_original, &raw.offset_time_original),
        (&raw.create_date, &raw.offset_time),
    ];

    for (date, offset) in candidates {
        let Some(date) = date.as_deref() else {
            continue;
        };
        match parse_exif_date(date, offset.as_deref()) {
            Ok(ts) => return Ok(ts),
            Err(e) => log::debug!("Ignoring date {:?} in {}: {}", date, path.display(), e),
        }
    }

    Err(MediasortError::MissingCaptureDate(path.to_path_buf()))
}

/// Parse an EXIF date string with optional timezone offset.
///
/// Without an offset tag the wall clock value is kept and labelled UTC, so the
/// calendar fields never shift.
fn parse_exif_date(date_str: &str, offset_str: Option<&str>) -> Result<OffsetDateTime> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return Err(MediasortError::InvalidDateFormat("empty date".to_string()));
    }

    // Some cameras append subseconds or a zone suffix; only the first 19 characters are the date
    let base = date_str.get(..19).unwrap_or(date_str);
    let date_time = PrimitiveDateTime::parse(base, EXIF_DATE_FORMAT)
        .map_err(|e| MediasortError::InvalidDateFormat(e.to_string()))?;

    let offset = match offset_str.map(str::trim) {
        Some(o) if !o.is_empty() => UtcOffset::parse(o, EXIF_OFFSET_FORMAT)
            .map_err(|e| MediasortError::InvalidDateFormat(e.to_string()))?,
        _ => UtcOffset::UTC,
    };

    Ok(date_time.assume_offset(offset))
}

fn value_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Check if exiftool is available on the system.
pub fn exiftool_available() -> bool {
    std::process::Command::new("exiftool")
        .arg("-ver")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
