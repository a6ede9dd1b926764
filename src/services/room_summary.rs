//! Per-room summary statistics for the map and KPI panel.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{
    CoordinateField, OccupancyRecord, RoomRanking, RoomSummary, RoomSummaryData,
    SummaryDiagnostic, SLOT_DURATION_HOURS,
};

/// Number of rooms listed in each of the top/bottom rankings.
const RANKING_SIZE: usize = 3;

/// Aggregate the filtered records into per-room summaries.
///
/// A room whose coordinates cannot be parsed is excluded from the summary
/// with a diagnostic; one bad room never blocks the rest. An empty input
/// yields an empty summary set, which is not an error.
pub fn compute_room_summaries(records: &[OccupancyRecord]) -> RoomSummaryData {
    // BTreeMap keeps the output sorted by room id independent of input order.
    let mut by_room: BTreeMap<&str, Vec<&OccupancyRecord>> = BTreeMap::new();
    for record in records {
        by_room.entry(&record.room_id).or_default().push(record);
    }

    let mut data = RoomSummaryData::default();

    for (room_id, room_records) in by_room {
        match summarize_room(room_id, &room_records) {
            Ok(summary) => data.rooms.push(summary),
            Err(message) => {
                log::warn!("excluding room {} from summary: {}", room_id, message);
                data.diagnostics.push(SummaryDiagnostic {
                    room_id: room_id.to_string(),
                    message,
                });
            }
        }
    }

    data.top_rooms = rank_rooms(&data.rooms, true);
    data.bottom_rooms = rank_rooms(&data.rooms, false);
    data
}

fn summarize_room(room_id: &str, records: &[&OccupancyRecord]) -> Result<RoomSummary, String> {
    // Metadata comes from the room's first observation, where "first" means
    // the minimum (date, time_slot), not input order.
    let first = records
        .iter()
        .min_by_key(|r| (r.date, r.time_slot))
        .ok_or_else(|| "no records".to_string())?;

    let coordinates = match &first.coordinates {
        CoordinateField::Parsed(c) => *c,
        CoordinateField::Invalid(raw) => {
            return Err(format!("malformed coordinates '{}'", raw));
        }
    };

    let count = records.len() as f64;
    let avg_occupancy_pct = records.iter().map(|r| r.occupancy_pct).sum::<f64>() / count;
    let peak_occupancy_pct = records
        .iter()
        .map(|r| r.occupancy_pct)
        .fold(f64::NEG_INFINITY, f64::max);

    let distinct_days = records
        .iter()
        .map(|r| r.date)
        .collect::<BTreeSet<_>>()
        .len();
    let used_slots = records.iter().filter(|r| r.occupancy_pct > 0.0).count();
    let usage_hours_per_day = if distinct_days > 0 {
        used_slots as f64 * SLOT_DURATION_HOURS / distinct_days as f64
    } else {
        0.0
    };

    Ok(RoomSummary {
        room_id: room_id.to_string(),
        avg_occupancy_pct,
        peak_occupancy_pct,
        distinct_days,
        usage_hours_per_day,
        room_category: first.room_category.clone(),
        capacity: first.capacity,
        location_label: first.location_label.clone(),
        coordinates,
    })
}

/// Top (descending) or bottom (ascending) rooms by average occupancy, ties
/// broken by room id.
fn rank_rooms(rooms: &[RoomSummary], descending: bool) -> Vec<RoomRanking> {
    let mut ranked: Vec<&RoomSummary> = rooms.iter().collect();
    ranked.sort_by(|a, b| {
        let by_avg = if descending {
            b.avg_occupancy_pct
                .partial_cmp(&a.avg_occupancy_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        } else {
            a.avg_occupancy_pct
                .partial_cmp(&b.avg_occupancy_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        };
        by_avg.then_with(|| a.room_id.cmp(&b.room_id))
    });

    ranked
        .into_iter()
        .take(RANKING_SIZE)
        .map(|r| RoomRanking {
            room_id: r.room_id.clone(),
            avg_occupancy_pct: r.avg_occupancy_pct,
        })
        .collect()
}
