//! Semester-aligned time series for a single selected room.
//!
//! Series from different rooms or semesters share the same x-axis origin by
//! shifting each room's dates so its first observed date lands on the
//! canonical semester start.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{
    AlignedTimeSeries, HalfDay, OccupancyRecord, SemesterSelection, TimeSeriesPoint,
};

/// Resolve the canonical semester start date from the filtered record set.
///
/// Fixed domain convention, not configurable: the autumn semester (HS)
/// starts August 14 of the minimum year present, the spring semester (FS)
/// February 1 of the maximum year; "both halves" defaults to the HS rule.
/// Returns `None` when the record set is empty.
pub fn semester_start(
    selection: SemesterSelection,
    records: &[OccupancyRecord],
) -> Option<NaiveDate> {
    let years = records.iter().map(|r| r.date.year());
    match selection {
        SemesterSelection::Second => NaiveDate::from_ymd_opt(years.max()?, 2, 1),
        SemesterSelection::First | SemesterSelection::Both => {
            NaiveDate::from_ymd_opt(years.min()?, 8, 14)
        }
    }
}

/// Compute the aligned occupancy time series for one room.
///
/// The semester start is resolved from the *whole* filtered set (all rooms),
/// matching the dashboard's shared x-axis; the shift is the distance from
/// the selected room's earliest observation to that start. Shifted records
/// falling before the semester start are dropped, and the remainder
/// aggregates by (date, half-of-day) into mean occupancy.
///
/// A room with no records under the active filters yields an empty series
/// with no semester start: "no data", distinct from an error.
pub fn compute_aligned_series(
    records: &[OccupancyRecord],
    room_id: &str,
    selection: SemesterSelection,
) -> AlignedTimeSeries {
    let room_records: Vec<&OccupancyRecord> =
        records.iter().filter(|r| r.room_id == room_id).collect();

    let (Some(start), Some(earliest)) = (
        semester_start(selection, records),
        room_records.iter().map(|r| r.date).min(),
    ) else {
        return AlignedTimeSeries {
            room_id: room_id.to_string(),
            semester_start: None,
            points: vec![],
        };
    };

    // Shift every date so the room's first observation lands on the
    // semester start; a zero shift leaves the series unchanged.
    let shift = start - earliest;

    let mut cells: BTreeMap<(NaiveDate, HalfDay), (f64, usize)> = BTreeMap::new();
    for record in room_records {
        let shifted = record.date + shift;
        // Guards against a negative shift producing out-of-range entries.
        if shifted < start {
            continue;
        }
        let cell = cells.entry((shifted, record.half_day())).or_insert((0.0, 0));
        cell.0 += record.occupancy_pct;
        cell.1 += 1;
    }

    let points = cells
        .into_iter()
        .map(|((date, half_day), (sum, count))| TimeSeriesPoint {
            date,
            half_day,
            avg_occupancy_pct: sum / count as f64,
        })
        .collect();

    AlignedTimeSeries {
        room_id: room_id.to_string(),
        semester_start: Some(start),
        points,
    }
}
