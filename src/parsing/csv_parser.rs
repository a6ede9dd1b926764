//! CSV parser for the occupancy observation log.
//!
//! Expected columns: `RaumID`, `Datum`, `Zeit`, `Wochentag`, `Semester`,
//! `Raumtyp`, `Kapazität`, `Gebäudelage`, `Gebäudekoordinaten`, `Auslastung`.
//!
//! Row-level problems (bad date, unknown weekday, non-numeric occupancy) skip
//! the affected row and are collected as [`RowIssue`] diagnostics rather than
//! failing the batch. Malformed coordinates do *not* skip the row: the raw
//! string is carried as [`CoordinateField::Invalid`] so the room summarizer
//! can apply its per-room exclusion policy.

use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{weekday_from_german, CoordinateField, Coordinates, OccupancyRecord, Semester};

/// Columns that must be present in the header row.
const REQUIRED_COLUMNS: [&str; 10] = [
    "RaumID",
    "Datum",
    "Zeit",
    "Wochentag",
    "Semester",
    "Raumtyp",
    "Kapazität",
    "Gebäudelage",
    "Gebäudekoordinaten",
    "Auslastung",
];

/// Fatal ingestion errors. Row-level data problems are not errors; they are
/// reported as [`RowIssue`]s.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read CSV input: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// A skipped or degraded row, reported alongside the parsed records.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RowIssue {
    /// 1-based line number in the CSV input (header is line 1).
    pub line: u64,
    pub message: String,
}

/// Result of parsing one CSV input: the usable records plus per-row
/// diagnostics. An input whose every row fails still parses successfully,
/// with an empty record set.
#[derive(Debug, Clone, Default)]
pub struct ParsedDataset {
    pub records: Vec<OccupancyRecord>,
    pub issues: Vec<RowIssue>,
}

/// Raw CSV row as deserialized by serde, before validation.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "RaumID")]
    room_id: String,
    #[serde(rename = "Datum")]
    date: String,
    #[serde(rename = "Zeit")]
    time: String,
    #[serde(rename = "Wochentag")]
    weekday: String,
    #[serde(rename = "Semester")]
    semester: String,
    #[serde(rename = "Raumtyp")]
    room_category: String,
    #[serde(rename = "Kapazität")]
    capacity: String,
    #[serde(rename = "Gebäudelage")]
    location: String,
    #[serde(rename = "Gebäudekoordinaten")]
    coordinates: String,
    #[serde(rename = "Auslastung")]
    occupancy: String,
}

/// Parse CSV text into occupancy records.
pub fn parse_records(csv_text: &str) -> Result<ParsedDataset, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ParseError::MissingColumn(column));
        }
    }

    let mut dataset = ParsedDataset::default();

    for (index, row) in reader.deserialize::<RawRow>().enumerate() {
        // Header occupies line 1.
        let line = index as u64 + 2;
        let raw = match row {
            Ok(raw) => raw,
            Err(e) => {
                dataset.report(line, format!("unreadable row: {}", e));
                continue;
            }
        };

        match convert_row(&raw) {
            Ok(record) => dataset.records.push(record),
            Err(message) => dataset.report(line, message),
        }
    }

    Ok(dataset)
}

/// Parse a CSV file from disk. Used by the server to preload a dataset at
/// startup.
pub fn parse_records_from_path(path: &Path) -> Result<ParsedDataset, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_records(&text)
}

impl ParsedDataset {
    fn report(&mut self, line: u64, message: String) {
        log::warn!("skipping CSV line {}: {}", line, message);
        self.issues.push(RowIssue { line, message });
    }
}

/// Validate one raw row into a typed record, or explain why it cannot be.
fn convert_row(raw: &RawRow) -> Result<OccupancyRecord, String> {
    if raw.room_id.is_empty() {
        return Err("empty RaumID".to_string());
    }

    let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d")
        .map_err(|e| format!("invalid Datum '{}': {}", raw.date, e))?;
    let time_slot = NaiveTime::parse_from_str(&raw.time, "%H:%M")
        .map_err(|e| format!("invalid Zeit '{}': {}", raw.time, e))?;
    let weekday = weekday_from_german(&raw.weekday)
        .ok_or_else(|| format!("unknown Wochentag '{}'", raw.weekday))?;
    let semester = Semester::from_label(&raw.semester)
        .ok_or_else(|| format!("unknown Semester '{}'", raw.semester))?;
    let capacity: u32 = raw
        .capacity
        .parse()
        .map_err(|_| format!("invalid Kapazität '{}'", raw.capacity))?;
    let occupancy: f64 = raw
        .occupancy
        .parse()
        .map_err(|_| format!("invalid Auslastung '{}'", raw.occupancy))?;

    Ok(OccupancyRecord {
        room_id: raw.room_id.clone(),
        date,
        time_slot,
        weekday,
        semester,
        room_category: raw.room_category.clone(),
        capacity,
        location_label: raw.location.clone(),
        coordinates: parse_coordinates(&raw.coordinates),
        occupancy_pct: to_percentage(occupancy),
    })
}

/// Derive `Auslastung (%)` once at load: fraction × 100, rounded to one
/// decimal as the dashboard displays it.
fn to_percentage(fraction: f64) -> f64 {
    (fraction * 100.0 * 10.0).round() / 10.0
}

/// Parse a "lat,lon" string into coordinates, keeping the raw value when it
/// does not split into two numeric components.
fn parse_coordinates(raw: &str) -> CoordinateField {
    let mut parts = raw.split(',');
    let lat = parts.next().and_then(|s| s.trim().parse::<f64>().ok());
    let lon = parts.next().and_then(|s| s.trim().parse::<f64>().ok());

    match (lat, lon, parts.next()) {
        (Some(lat), Some(lon), None) => CoordinateField::Parsed(Coordinates { lat, lon }),
        _ => CoordinateField::Invalid(raw.to_string()),
    }
}
