//! Similarity-ordered occupancy heatmap.
//!
//! Rooms are reordered so behaviorally similar rooms sit adjacent in the
//! heatmap. This is a heuristic proximity ordering by mean pairwise Pearson
//! correlation, not a formal hierarchical clustering: no dendrogram, no
//! cluster count parameter.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{HalfDayBucket, HeatmapData, OccupancyRecord};

/// Build the similarity-ordered room × half-day occupancy matrix.
///
/// With fewer than two rooms clustering is skipped: the matrix is returned
/// as-is with `clustered = false` and no correlations. That is a degenerate
/// case, not an error.
pub fn compute_heatmap_data(records: &[OccupancyRecord]) -> HeatmapData {
    let (rooms, buckets, values) = build_matrix(records);

    if rooms.len() < 2 {
        return HeatmapData {
            rooms,
            buckets,
            values,
            mean_correlations: vec![],
            clustered: false,
        };
    }

    // Full pairwise correlation matrix between the rooms' bucket vectors.
    let n = rooms.len();
    let mut correlations = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let corr = pearson_correlation(&values[i], &values[j]);
            correlations[i][j] = corr;
            correlations[j][i] = corr;
        }
    }

    // Mean correlation against all other rooms.
    let mut ranking: Vec<(usize, f64)> = (0..n)
        .map(|i| {
            let sum: f64 = (0..n).filter(|&j| j != i).map(|j| correlations[i][j]).sum();
            (i, sum / (n - 1) as f64)
        })
        .collect();

    // Most similar first; ties broken by ascending room id so the ordering
    // is reproducible across runs.
    ranking.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| rooms[a.0].cmp(&rooms[b.0]))
    });

    let mut ordered_rooms = Vec::with_capacity(n);
    let mut ordered_values = Vec::with_capacity(n);
    let mut mean_correlations = Vec::with_capacity(n);
    for &(index, mean_corr) in &ranking {
        ordered_rooms.push(rooms[index].clone());
        ordered_values.push(values[index].clone());
        mean_correlations.push(mean_corr);
    }

    HeatmapData {
        rooms: ordered_rooms,
        buckets,
        values: ordered_values,
        mean_correlations,
        clustered: true,
    }
}

/// Room × bucket mean-occupancy matrix. Rooms come out sorted by id, bucket
/// columns chronologically; missing combinations are filled with 0.
fn build_matrix(
    records: &[OccupancyRecord],
) -> (Vec<String>, Vec<HalfDayBucket>, Vec<Vec<f64>>) {
    let mut rooms: BTreeSet<&str> = BTreeSet::new();
    let mut buckets: BTreeSet<HalfDayBucket> = BTreeSet::new();
    let mut cells: BTreeMap<(&str, HalfDayBucket), (f64, usize)> = BTreeMap::new();

    for record in records {
        let bucket = HalfDayBucket {
            date: record.date,
            half_day: record.half_day(),
        };
        rooms.insert(&record.room_id);
        buckets.insert(bucket);
        let cell = cells.entry((&record.room_id, bucket)).or_insert((0.0, 0));
        cell.0 += record.occupancy_pct;
        cell.1 += 1;
    }

    let rooms: Vec<String> = rooms.into_iter().map(String::from).collect();
    let buckets: Vec<HalfDayBucket> = buckets.into_iter().collect();

    let values = rooms
        .iter()
        .map(|room| {
            buckets
                .iter()
                .map(|bucket| match cells.get(&(room.as_str(), *bucket)) {
                    Some((sum, count)) => sum / *count as f64,
                    None => 0.0,
                })
                .collect()
        })
        .collect();

    (rooms, buckets, values)
}

/// Pearson correlation between two equal-length vectors.
///
/// A zero-variance vector (constant occupancy, including all-zero) has no
/// defined correlation; the policy here is to treat it as 0 (neutral
/// similarity) so the ordering stays deterministic instead of propagating
/// NaN into the ranking.
pub(crate) fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for i in 0..x.len() {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = (sum_sq_x * sum_sq_y).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoordinateField, Coordinates, HalfDay, Semester};
    use chrono::{Datelike, NaiveDate, NaiveTime};

    fn record(room_id: &str, day: u32, hour: u32, occupancy_pct: f64) -> OccupancyRecord {
        let date = NaiveDate::from_ymd_opt(2023, 9, day).unwrap();
        OccupancyRecord {
            room_id: room_id.to_string(),
            date,
            time_slot: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            weekday: date.weekday(),
            semester: Semester::Herbst,
            room_category: "Seminarraum".to_string(),
            capacity: 40,
            location_label: "Zentrum".to_string(),
            coordinates: CoordinateField::Parsed(Coordinates { lat: 47.37, lon: 8.55 }),
            occupancy_pct,
        }
    }

    /// Four half-day buckets (two days × morning/afternoon) with the given
    /// occupancy pattern.
    fn room_with_pattern(room_id: &str, pattern: [f64; 4]) -> Vec<OccupancyRecord> {
        vec![
            record(room_id, 18, 8, pattern[0]),
            record(room_id, 18, 14, pattern[1]),
            record(room_id, 19, 8, pattern[2]),
            record(room_id, 19, 14, pattern[3]),
        ]
    }

    #[test]
    fn test_pearson_perfect_positive() {
        let corr = pearson_correlation(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!((corr - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let corr = pearson_correlation(&[1.0, 2.0, 3.0], &[6.0, 4.0, 2.0]);
        assert!((corr + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_zero_variance_is_neutral() {
        assert_eq!(pearson_correlation(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(pearson_correlation(&[0.0, 0.0, 0.0], &[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_pearson_length_mismatch() {
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(pearson_correlation(&[], &[]), 0.0);
    }

    #[test]
    fn test_empty_input() {
        let data = compute_heatmap_data(&[]);
        assert!(data.rooms.is_empty());
        assert!(data.buckets.is_empty());
        assert!(!data.clustered);
    }

    #[test]
    fn test_single_room_is_degenerate_not_error() {
        let records = room_with_pattern("R1", [20.0, 80.0, 20.0, 80.0]);
        let data = compute_heatmap_data(&records);

        assert_eq!(data.rooms, vec!["R1"]);
        assert_eq!(data.values.len(), 1);
        assert!(!data.clustered);
        assert!(data.mean_correlations.is_empty());
    }

    #[test]
    fn test_missing_cells_filled_with_zero() {
        let mut records = room_with_pattern("R1", [20.0, 80.0, 20.0, 80.0]);
        // R2 observed only on the first day
        records.push(record("R2", 18, 8, 50.0));
        records.push(record("R2", 18, 14, 50.0));

        let data = compute_heatmap_data(&records);
        assert_eq!(data.buckets.len(), 4);
        let r2_row = &data.values[data.rooms.iter().position(|r| r == "R2").unwrap()];
        assert_eq!(r2_row[2], 0.0);
        assert_eq!(r2_row[3], 0.0);
    }

    #[test]
    fn test_cells_average_multiple_slots() {
        // Two morning slots on the same day aggregate to their mean.
        let records = vec![record("R1", 18, 8, 40.0), record("R1", 18, 10, 60.0)];
        let data = compute_heatmap_data(&records);

        assert_eq!(data.buckets.len(), 1);
        assert_eq!(data.buckets[0].half_day, HalfDay::Morning);
        assert!((data.values[0][0] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_columns_chronologically_sorted() {
        // Records supplied newest-first; columns must still come out sorted.
        let records = vec![
            record("R1", 20, 14, 10.0),
            record("R1", 18, 8, 20.0),
            record("R2", 19, 8, 30.0),
        ];
        let data = compute_heatmap_data(&records);

        let dates: Vec<_> = data.buckets.iter().map(|b| b.date.day()).collect();
        assert_eq!(dates, vec![18, 19, 20]);
    }

    #[test]
    fn test_similar_rooms_adjacent_and_constant_room_neutral() {
        // R1 and R2 oscillate in phase (perfectly correlated); R3 is flat
        // zero and must rank by the neutral-correlation policy, not NaN.
        let mut records = room_with_pattern("R1", [20.0, 80.0, 20.0, 80.0]);
        records.extend(room_with_pattern("R2", [30.0, 70.0, 30.0, 70.0]));
        records.extend(room_with_pattern("R3", [0.0, 0.0, 0.0, 0.0]));

        let data = compute_heatmap_data(&records);

        assert!(data.clustered);
        assert_eq!(data.rooms, vec!["R1", "R2", "R3"]);
        // R1/R2 mean = (1.0 + 0.0) / 2; R3 mean = 0
        assert!((data.mean_correlations[0] - 0.5).abs() < 1e-9);
        assert!((data.mean_correlations[1] - 0.5).abs() < 1e-9);
        assert_eq!(data.mean_correlations[2], 0.0);
        assert!(data.mean_correlations.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_ordering_is_deterministic() {
        let mut records = room_with_pattern("B", [10.0, 90.0, 10.0, 90.0]);
        records.extend(room_with_pattern("A", [90.0, 10.0, 90.0, 10.0]));
        records.extend(room_with_pattern("C", [50.0, 50.0, 50.0, 50.0]));

        let first = compute_heatmap_data(&records);
        for _ in 0..5 {
            assert_eq!(compute_heatmap_data(&records), first);
        }
    }

    #[test]
    fn test_tie_break_by_ascending_room_id() {
        // Two flat rooms tie at mean correlation 0 against everything.
        let mut records = room_with_pattern("Z", [40.0, 40.0, 40.0, 40.0]);
        records.extend(room_with_pattern("A", [60.0, 60.0, 60.0, 60.0]));
        records.extend(room_with_pattern("M", [10.0, 90.0, 10.0, 90.0]));

        let data = compute_heatmap_data(&records);
        // All means are 0; ordering falls back to ascending id.
        assert_eq!(data.rooms, vec!["A", "M", "Z"]);
    }

    #[test]
    fn test_rows_follow_room_reordering() {
        let mut records = room_with_pattern("R1", [20.0, 80.0, 20.0, 80.0]);
        records.extend(room_with_pattern("R2", [80.0, 20.0, 80.0, 20.0]));
        records.extend(room_with_pattern("R3", [21.0, 79.0, 21.0, 79.0]));

        let data = compute_heatmap_data(&records);
        for (room, row) in data.rooms.iter().zip(&data.values) {
            // Each row must still hold its own room's first-bucket value.
            let expected = match room.as_str() {
                "R1" => 20.0,
                "R2" => 80.0,
                "R3" => 21.0,
                _ => panic!("unexpected room"),
            };
            assert_eq!(row[0], expected);
        }
    }
}
