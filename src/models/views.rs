//! Derived view types returned to the dashboard.
//!
//! All of these are plain value objects: recomputed fully on every filter
//! change, owned by the request that produced them, and free of
//! rendering-specific fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{Coordinates, HalfDay};

/// Key of one heatmap column: a (date, half-of-day) aggregation bucket.
///
/// The derived ordering is chronological, morning before afternoon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HalfDayBucket {
    pub date: NaiveDate,
    pub half_day: HalfDay,
}

/// Summary statistics for one room, shown on the map and KPI panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub room_id: String,
    pub avg_occupancy_pct: f64,
    pub peak_occupancy_pct: f64,
    /// Number of distinct dates observed for this room.
    pub distinct_days: usize,
    /// Hours of non-zero occupancy per observed day.
    pub usage_hours_per_day: f64,
    pub room_category: String,
    pub capacity: u32,
    pub location_label: String,
    pub coordinates: Coordinates,
}

/// A room excluded from the summary, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDiagnostic {
    pub room_id: String,
    pub message: String,
}

/// Room id plus average occupancy, for the top/bottom performer lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRanking {
    pub room_id: String,
    pub avg_occupancy_pct: f64,
}

/// Complete room-summary view: summaries, exclusion diagnostics, and the
/// highest/lowest average-occupancy rankings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RoomSummaryData {
    /// Summaries sorted by ascending room id.
    pub rooms: Vec<RoomSummary>,
    /// Rooms excluded from the summary (malformed coordinates).
    pub diagnostics: Vec<SummaryDiagnostic>,
    /// Up to three rooms with the highest average occupancy, descending.
    pub top_rooms: Vec<RoomRanking>,
    /// Up to three rooms with the lowest average occupancy, ascending.
    pub bottom_rooms: Vec<RoomRanking>,
}

/// Similarity-ordered room × half-day occupancy matrix for the heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HeatmapData {
    /// Rooms in display order (similarity ranking, or input order when the
    /// degenerate case applies).
    pub rooms: Vec<String>,
    /// Bucket columns, chronologically sorted.
    pub buckets: Vec<HalfDayBucket>,
    /// One row per room, aligned with `rooms`; missing cells are 0.
    pub values: Vec<Vec<f64>>,
    /// Mean pairwise correlation per room, aligned with `rooms`. Empty when
    /// clustering was skipped.
    pub mean_correlations: Vec<f64>,
    /// False for the degenerate case (fewer than two rooms): the matrix is
    /// presented as-is with no reordering. Distinct from an error.
    pub clustered: bool,
}

/// One aggregated point of a room's aligned time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub half_day: HalfDay,
    pub avg_occupancy_pct: f64,
}

/// Semester-aligned time series for one selected room.
///
/// `semester_start: None` together with empty `points` signals "no data for
/// this room under the active filters". The caller decides how to render
/// that; it is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedTimeSeries {
    pub room_id: String,
    pub semester_start: Option<NaiveDate>,
    pub points: Vec<TimeSeriesPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bucket_ordering_is_chronological() {
        let mut buckets = vec![
            HalfDayBucket { date: date(2024, 3, 2), half_day: HalfDay::Morning },
            HalfDayBucket { date: date(2024, 3, 1), half_day: HalfDay::Afternoon },
            HalfDayBucket { date: date(2024, 3, 1), half_day: HalfDay::Morning },
        ];
        buckets.sort();

        assert_eq!(buckets[0].date, date(2024, 3, 1));
        assert_eq!(buckets[0].half_day, HalfDay::Morning);
        assert_eq!(buckets[1].half_day, HalfDay::Afternoon);
        assert_eq!(buckets[2].date, date(2024, 3, 2));
    }
}
