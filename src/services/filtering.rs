//! Filter stage: applies the user-selected predicates to the record set.

use chrono::Timelike;

use crate::models::{FilterConfig, OccupancyRecord};

/// Return the subset of records satisfying every active predicate.
///
/// Predicates combine with logical AND; absent filters pass everything
/// through. The input is never mutated, applying the default configuration
/// returns the full set unchanged (order and contents), and applying the
/// same configuration twice is idempotent.
pub fn apply_filters(records: &[OccupancyRecord], config: &FilterConfig) -> Vec<OccupancyRecord> {
    records
        .iter()
        .filter(|r| matches_config(r, config))
        .cloned()
        .collect()
}

fn matches_config(record: &OccupancyRecord, config: &FilterConfig) -> bool {
    if let Some((start_hour, end_hour)) = config.time_window {
        let hour = record.time_slot.hour();
        if hour < start_hour || hour > end_hour {
            return false;
        }
    }

    if let Some(weekdays) = &config.weekdays {
        if !weekdays.contains(&record.weekday) {
            return false;
        }
    }

    if !config.semester.matches(record.semester) {
        return false;
    }

    if let Some(category) = &config.room_category {
        if record.room_category != *category {
            return false;
        }
    }

    true
}
