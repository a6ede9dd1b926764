//! End-to-end scenarios running the full pipeline: CSV parsing, filtering,
//! and the three analytical views.

use std::collections::HashSet;

use chrono::{NaiveDate, Weekday};

use raum_rust::models::{FilterConfig, SemesterSelection};
use raum_rust::parsing::parse_records;
use raum_rust::services::{
    apply_filters, compute_aligned_series, compute_heatmap_data, compute_room_summaries,
};

const HEADER: &str = "RaumID,Datum,Zeit,Wochentag,Semester,Raumtyp,Kapazität,Gebäudelage,Gebäudekoordinaten,Auslastung";

fn build_csv(rows: &[String]) -> String {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text
}

fn row(
    room: &str,
    date: &str,
    time: &str,
    weekday: &str,
    semester: &str,
    occupancy: f64,
) -> String {
    format!(
        "{room},{date},{time},{weekday},{semester},Seminarraum,40,Zentrum,\"47.374,8.548\",{occupancy}"
    )
}

/// Two rooms oscillating in phase across four half-day buckets plus a flat
/// zero room: the correlated pair must be adjacent, the flat room ranked by
/// the neutral-correlation policy.
#[test]
fn scenario_a_correlated_rooms_adjacent_flat_room_neutral() {
    let mut rows = Vec::new();
    for (room, pattern) in [
        ("R1", [0.2, 0.8, 0.2, 0.8]),
        ("R2", [0.3, 0.7, 0.3, 0.7]),
        ("R3", [0.0, 0.0, 0.0, 0.0]),
    ] {
        rows.push(row(room, "2023-09-18", "08:00", "Montag", "Herbstsemester", pattern[0]));
        rows.push(row(room, "2023-09-18", "14:00", "Montag", "Herbstsemester", pattern[1]));
        rows.push(row(room, "2023-09-19", "08:00", "Dienstag", "Herbstsemester", pattern[2]));
        rows.push(row(room, "2023-09-19", "14:00", "Dienstag", "Herbstsemester", pattern[3]));
    }

    let parsed = parse_records(&build_csv(&rows)).unwrap();
    assert!(parsed.issues.is_empty());

    let heatmap = compute_heatmap_data(&parsed.records);

    assert!(heatmap.clustered);
    let r1 = heatmap.rooms.iter().position(|r| r == "R1").unwrap();
    let r2 = heatmap.rooms.iter().position(|r| r == "R2").unwrap();
    assert_eq!(r1.abs_diff(r2), 1, "correlated rooms must be adjacent");

    // The flat room is ranked deterministically with neutral correlation.
    let r3 = heatmap.rooms.iter().position(|r| r == "R3").unwrap();
    assert_eq!(heatmap.mean_correlations[r3], 0.0);
    assert!(heatmap.mean_correlations.iter().all(|c| c.is_finite()));
}

/// Filtering to Monday..Friday removes exactly the one Saturday record.
#[test]
fn scenario_b_workday_filter_removes_only_saturday() {
    let rows = vec![
        row("R1", "2023-09-18", "08:00", "Montag", "Herbstsemester", 0.5),
        row("R1", "2023-09-20", "08:00", "Mittwoch", "Herbstsemester", 0.5),
        row("R1", "2023-09-23", "08:00", "Samstag", "Herbstsemester", 0.5),
        row("R1", "2023-09-22", "08:00", "Freitag", "Herbstsemester", 0.5),
    ];
    let parsed = parse_records(&build_csv(&rows)).unwrap();

    let workdays: HashSet<Weekday> = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]
    .into_iter()
    .collect();
    let config = FilterConfig {
        weekdays: Some(workdays),
        ..Default::default()
    };
    let filtered = apply_filters(&parsed.records, &config);

    assert_eq!(filtered.len(), parsed.records.len() - 1);
    let removed: Vec<_> = parsed
        .records
        .iter()
        .filter(|r| !filtered.contains(r))
        .collect();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].weekday, Weekday::Sat);
}

/// A room never used across five distinct days has zero usage hours per
/// day, with no division error.
#[test]
fn scenario_c_unused_room_over_five_days() {
    let rows: Vec<String> = (18..23)
        .map(|day| {
            row(
                "R1",
                &format!("2023-09-{day}"),
                "08:00",
                "Montag",
                "Herbstsemester",
                0.0,
            )
        })
        .collect();
    let parsed = parse_records(&build_csv(&rows)).unwrap();
    let data = compute_room_summaries(&parsed.records);

    assert_eq!(data.rooms.len(), 1);
    assert_eq!(data.rooms[0].distinct_days, 5);
    assert_eq!(data.rooms[0].usage_hours_per_day, 0.0);
    assert_eq!(data.rooms[0].avg_occupancy_pct, 0.0);
}

/// Selecting the spring semester on data spanning 2023 and 2024 anchors the
/// series at February 1 of 2024 (the maximum year), not 2023.
#[test]
fn scenario_d_fs_start_uses_max_year() {
    let rows = vec![
        row("R1", "2023-09-18", "08:00", "Montag", "Herbstsemester", 0.5),
        row("R1", "2024-03-04", "08:00", "Montag", "Frühlingssemester", 0.6),
    ];
    let parsed = parse_records(&build_csv(&rows)).unwrap();

    let config = FilterConfig {
        semester: SemesterSelection::Second,
        ..Default::default()
    };
    let filtered = apply_filters(&parsed.records, &config);
    let series = compute_aligned_series(&filtered, "R1", SemesterSelection::Second);

    assert_eq!(
        series.semester_start,
        Some(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
    );
    // The single spring record lands on the semester start.
    assert_eq!(series.points.len(), 1);
    assert_eq!(series.points[0].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
}

/// The three views are independent consumers of the same filtered set: a
/// filter change affects all of them consistently.
#[test]
fn filtered_set_feeds_all_views_consistently() {
    let rows = vec![
        row("R1", "2023-09-18", "08:00", "Montag", "Herbstsemester", 0.5),
        row("R2", "2023-09-18", "08:00", "Montag", "Herbstsemester", 0.4),
        row("R1", "2024-03-04", "10:00", "Montag", "Frühlingssemester", 0.9),
    ];
    let parsed = parse_records(&build_csv(&rows)).unwrap();

    let config = FilterConfig {
        semester: SemesterSelection::First,
        ..Default::default()
    };
    let filtered = apply_filters(&parsed.records, &config);

    let summaries = compute_room_summaries(&filtered);
    let heatmap = compute_heatmap_data(&filtered);
    let series = compute_aligned_series(&filtered, "R1", SemesterSelection::First);

    // The spring record is gone from every view.
    assert_eq!(summaries.rooms.len(), 2);
    assert_eq!(summaries.rooms[0].peak_occupancy_pct, 50.0);
    assert_eq!(heatmap.buckets.len(), 1);
    assert_eq!(series.points.len(), 1);
    assert_eq!(series.points[0].avg_occupancy_pct, 50.0);
}

/// A malformed coordinate string excludes that room from the summary but
/// not from the heatmap or time series, and never fails the batch.
#[test]
fn malformed_coordinates_are_isolated_per_view() {
    let rows = vec![
        "R1,2023-09-18,08:00,Montag,Herbstsemester,Seminarraum,40,Zentrum,kaputt,0.5".to_string(),
        row("R2", "2023-09-18", "08:00", "Montag", "Herbstsemester", 0.4),
        row("R2", "2023-09-18", "14:00", "Montag", "Herbstsemester", 0.6),
    ];
    let parsed = parse_records(&build_csv(&rows)).unwrap();
    assert_eq!(parsed.records.len(), 3);

    let summaries = compute_room_summaries(&parsed.records);
    assert_eq!(summaries.rooms.len(), 1);
    assert_eq!(summaries.rooms[0].room_id, "R2");
    assert_eq!(summaries.diagnostics.len(), 1);
    assert_eq!(summaries.diagnostics[0].room_id, "R1");

    // The heatmap and time series do not need coordinates.
    let heatmap = compute_heatmap_data(&parsed.records);
    assert_eq!(heatmap.rooms.len(), 2);
    let series = compute_aligned_series(&parsed.records, "R1", SemesterSelection::Both);
    assert_eq!(series.points.len(), 1);
}
