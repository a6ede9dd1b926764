//! Data Transfer Objects for the HTTP API.
//!
//! The visualization payloads are the view types from [`crate::models`],
//! which already derive Serialize/Deserialize; this module adds the
//! request/response envelopes and the filter query parameters.

use std::collections::HashSet;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::models::{weekday_from_german, FilterConfig, SemesterSelection};
use crate::parsing::RowIssue;
use crate::store::DatasetInfo;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Number of datasets currently held in the store
    pub datasets: usize,
}

/// Request body for uploading a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadDatasetRequest {
    /// Name for the dataset
    pub name: String,
    /// Raw CSV content
    pub csv: String,
}

/// Response for a dataset upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadDatasetResponse {
    pub dataset_id: i64,
    pub checksum: String,
    pub record_count: usize,
    /// False when the upload matched an existing dataset by checksum
    pub created: bool,
    /// Row-level ingestion diagnostics
    pub issues: Vec<RowIssue>,
}

/// Response listing all stored datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetListResponse {
    pub datasets: Vec<DatasetInfo>,
    pub total: usize,
}

/// Filtered records for the data-table view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsResponse {
    pub records: Vec<crate::models::OccupancyRecord>,
    pub total: usize,
}

/// Filter query parameters shared by all visualization endpoints.
///
/// `semester` takes the UI labels `HS`, `FS`, or `HS+FS` (default);
/// `weekdays` is a comma-separated list of German weekday names;
/// `start_hour`/`end_hour` form an inclusive window and must appear
/// together.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    pub semester: Option<String>,
    pub room_category: Option<String>,
    pub start_hour: Option<u32>,
    pub end_hour: Option<u32>,
    pub weekdays: Option<String>,
}

impl FilterQuery {
    /// Validate the query parameters into a typed filter configuration.
    pub fn into_config(self) -> Result<FilterConfig, String> {
        let semester = match &self.semester {
            None => SemesterSelection::Both,
            Some(label) => SemesterSelection::from_label(label)
                .ok_or_else(|| format!("invalid semester '{}' (expected HS, FS or HS+FS)", label))?,
        };

        let time_window = match (self.start_hour, self.end_hour) {
            (None, None) => None,
            (Some(start), Some(end)) => {
                if start > 23 || end > 23 {
                    return Err(format!("hour out of range: {}-{}", start, end));
                }
                if start > end {
                    return Err(format!("start_hour {} after end_hour {}", start, end));
                }
                Some((start, end))
            }
            _ => return Err("start_hour and end_hour must be given together".to_string()),
        };

        let weekdays = match &self.weekdays {
            None => None,
            Some(list) => {
                let mut set: HashSet<Weekday> = HashSet::new();
                for name in list.split(',') {
                    let weekday = weekday_from_german(name)
                        .ok_or_else(|| format!("unknown weekday '{}'", name.trim()))?;
                    set.insert(weekday);
                }
                Some(set)
            }
        };

        Ok(FilterConfig {
            time_window,
            weekdays,
            semester,
            room_category: self.room_category,
        })
    }
}
