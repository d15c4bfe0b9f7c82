//! # Record Store
//!
//! Reads and writes measurement files: plain text, one record per line,
//! fields separated by a single tab, no header and no escaping.
//!
//! ## File Formats
//!
//! ```text
//! raw:        <height>\t<weight>\n
//! processed:  <height>\t<weight>\t<bmi>\t<category>\n
//! ```
//!
//! New measurements are appended in the raw format. Saving after processing
//! rewrites the whole file in the processed format. Nothing in the file
//! records which format it holds, so [`load`] rejects processed lines with a
//! [`CalcError::ParseError`] instead of guessing, and [`detect_format`] is
//! available for callers that want to pick a loader explicitly.
//!
//! Whole-file writes are atomic: contents go to a `.tmp` sibling, get
//! synced, and are renamed over the target.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bmi_core::bmi::Measurement;
//! use bmi_core::record_store::{append, load};
//! use std::path::Path;
//!
//! let path = Path::new("people.txt");
//! append(path, &Measurement::new(1.75, 70.5))?;
//! let measurements = load(path)?;
//! assert_eq!(measurements.last(), Some(&Measurement::new(1.75, 70.5)));
//! # Ok::<(), bmi_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bmi::{BmiCategory, Measurement, ProcessedRecord};
use crate::errors::{CalcError, CalcResult};

/// Extension given to data files named in the entry form
pub const DATA_FILE_EXTENSION: &str = "txt";

const RAW_FIELDS: usize = 2;
const PROCESSED_FIELDS: usize = 4;

/// Column layout of a data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// height, weight
    Raw,
    /// height, weight, BMI, category
    Processed,
}

impl RecordFormat {
    pub fn field_count(&self) -> usize {
        match self {
            RecordFormat::Raw => RAW_FIELDS,
            RecordFormat::Processed => PROCESSED_FIELDS,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RecordFormat::Raw => "raw",
            RecordFormat::Processed => "processed",
        }
    }
}

/// Load raw-format measurements.
///
/// # Returns
///
/// * `Ok(Vec<Measurement>)` - One entry per non-blank line, in file order
/// * `Err(CalcError::FileNotFound)` - The file does not exist
/// * `Err(CalcError::ParseError)` - A line is not two numeric fields
/// * `Err(CalcError::FileError)` - Any other I/O failure
pub fn load(path: &Path) -> CalcResult<Vec<Measurement>> {
    let mut measurements = Vec::new();
    for_each_line(path, |number, line| {
        let fields = split_fields(path, number, line, RecordFormat::Raw)?;
        measurements.push(Measurement::new(
            parse_field(path, number, line, "height", fields[0])?,
            parse_field(path, number, line, "weight", fields[1])?,
        ));
        Ok(())
    })?;
    debug!(path = %path.display(), count = measurements.len(), "loaded raw measurements");
    Ok(measurements)
}

/// Load raw-format measurements, treating a missing file as empty.
///
/// The missing file is logged; every other error is still returned.
pub fn load_or_empty(path: &Path) -> CalcResult<Vec<Measurement>> {
    match load(path) {
        Err(CalcError::FileNotFound { path }) => {
            warn!(%path, "data file not found, starting with no measurements");
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Load processed-format records. BMI and category are taken as written.
pub fn load_processed(path: &Path) -> CalcResult<Vec<ProcessedRecord>> {
    let mut records = Vec::new();
    for_each_line(path, |number, line| {
        let fields = split_fields(path, number, line, RecordFormat::Processed)?;
        let measurement = Measurement::new(
            parse_field(path, number, line, "height", fields[0])?,
            parse_field(path, number, line, "weight", fields[1])?,
        );
        let bmi = parse_field(path, number, line, "BMI", fields[2])?;
        let category: BmiCategory = fields[3].parse().map_err(|_| {
            CalcError::parse_error(
                path.display().to_string(),
                number,
                line,
                format!("unknown category '{}'", fields[3].trim()),
            )
        })?;
        records.push(ProcessedRecord {
            measurement,
            bmi,
            category,
        });
        Ok(())
    })?;
    debug!(path = %path.display(), count = records.len(), "loaded processed records");
    Ok(records)
}

/// Append one raw-format line, creating the file if needed.
pub fn append(path: &Path, measurement: &Measurement) -> CalcResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CalcError::file_error("open for append", path.display().to_string(), e.to_string()))?;

    file.write_all(raw_line(measurement).as_bytes())
        .map_err(|e| CalcError::file_error("append to", path.display().to_string(), e.to_string()))?;

    debug!(
        path = %path.display(),
        height_m = measurement.height_m,
        weight_kg = measurement.weight_kg,
        "appended measurement"
    );
    Ok(())
}

/// Replace the whole file with processed-format lines.
///
/// A file that held raw lines no longer loads with [`load`] afterwards; use
/// [`load_processed`] for it.
pub fn overwrite_with_processed(path: &Path, records: &[ProcessedRecord]) -> CalcResult<()> {
    let contents: String = records.iter().map(processed_line).collect();
    write_atomic(path, &contents)?;
    debug!(path = %path.display(), count = records.len(), "wrote processed records");
    Ok(())
}

/// Replace the whole file with raw-format lines.
pub fn save_raw(path: &Path, measurements: &[Measurement]) -> CalcResult<()> {
    let contents: String = measurements.iter().map(raw_line).collect();
    write_atomic(path, &contents)?;
    debug!(path = %path.display(), count = measurements.len(), "wrote raw measurements");
    Ok(())
}

/// Detect a file's format from the column count of its first non-blank line.
///
/// An empty file is reported as [`RecordFormat::Raw`].
pub fn detect_format(path: &Path) -> CalcResult<RecordFormat> {
    let file = open(path)?;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        return match trimmed.split('\t').count() {
            RAW_FIELDS => Ok(RecordFormat::Raw),
            PROCESSED_FIELDS => Ok(RecordFormat::Processed),
            n => Err(CalcError::parse_error(
                path.display().to_string(),
                index + 1,
                trimmed,
                format!("expected 2 or 4 tab-separated fields, found {}", n),
            )),
        };
    }
    Ok(RecordFormat::Raw)
}

/// Resolve a file name typed into the entry form.
///
/// The name is trimmed and gets a `.txt` extension unless it already has
/// one. Relative names are resolved against `data_dir`.
pub fn data_file_path(data_dir: &Path, name: &str) -> CalcResult<PathBuf> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CalcError::missing_field("file_name"));
    }

    let has_extension = Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DATA_FILE_EXTENSION));
    let file_name = if has_extension {
        name.to_string()
    } else {
        format!("{}.{}", name, DATA_FILE_EXTENSION)
    };
    Ok(data_dir.join(file_name))
}

/// Format a float the way data files spell numbers: shortest round-trip
/// digits, with `.0` kept on integral values.
pub fn format_number(value: f64) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

fn raw_line(measurement: &Measurement) -> String {
    format!(
        "{}\t{}\n",
        format_number(measurement.height_m),
        format_number(measurement.weight_kg)
    )
}

fn processed_line(record: &ProcessedRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}\n",
        format_number(record.measurement.height_m),
        format_number(record.measurement.weight_kg),
        format_number(record.bmi),
        record.category.display_name()
    )
}

fn open(path: &Path) -> CalcResult<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CalcError::file_not_found(path.display().to_string()),
        _ => CalcError::file_error("open", path.display().to_string(), e.to_string()),
    })
}

/// Call `f` with the 1-based number and trimmed text of each non-blank line.
fn for_each_line<F>(path: &Path, mut f: F) -> CalcResult<()>
where
    F: FnMut(usize, &str) -> CalcResult<()>,
{
    let file = open(path)?;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        f(index + 1, trimmed)?;
    }
    Ok(())
}

fn split_fields<'a>(path: &Path, number: usize, line: &'a str, format: RecordFormat) -> CalcResult<Vec<&'a str>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() == format.field_count() {
        return Ok(fields);
    }

    let reason = match (format, fields.len()) {
        (RecordFormat::Raw, PROCESSED_FIELDS) => format!(
            "expected {} tab-separated fields, found {} (this looks like a processed file)",
            RAW_FIELDS, PROCESSED_FIELDS
        ),
        (RecordFormat::Processed, RAW_FIELDS) => format!(
            "expected {} tab-separated fields, found {} (this looks like a raw file)",
            PROCESSED_FIELDS, RAW_FIELDS
        ),
        (format, n) => format!("expected {} tab-separated fields, found {}", format.field_count(), n),
    };
    Err(CalcError::parse_error(path.display().to_string(), number, line, reason))
}

fn parse_field(path: &Path, number: usize, line: &str, name: &str, field: &str) -> CalcResult<f64> {
    field.trim().parse::<f64>().map_err(|_| {
        CalcError::parse_error(
            path.display().to_string(),
            number,
            line,
            format!("{} '{}' is not a number", name, field.trim()),
        )
    })
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `contents` to `path` via a synced temp file and a rename.
///
/// The temp file is removed again if any step fails.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let result = write_then_rename(&tmp_path, path, contents);
    if result.is_err() && tmp_path.exists() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_then_rename(tmp_path: &Path, path: &Path, contents: &str) -> CalcResult<()> {
    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(tmp_path, path)
        .map_err(|e| CalcError::file_error("rename to final", path.display().to_string(), e.to_string()))
}
