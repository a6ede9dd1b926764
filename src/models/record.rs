//! Occupancy observation records and their component types.

use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Duration of one observation slot in hours. The source data samples rooms
/// every two hours.
pub const SLOT_DURATION_HOURS: f64 = 2.0;

/// Geographic coordinates of a room's building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Parse outcome for the `Gebäudekoordinaten` column.
///
/// Malformed coordinate strings are carried through ingestion instead of
/// failing the row; the room summarizer decides what to do with them
/// (exclude the room with a diagnostic, never abort the batch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum CoordinateField {
    Parsed(Coordinates),
    Invalid(String),
}

impl CoordinateField {
    pub fn as_parsed(&self) -> Option<Coordinates> {
        match self {
            CoordinateField::Parsed(c) => Some(*c),
            CoordinateField::Invalid(_) => None,
        }
    }
}

/// The two canonical semester labels in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Semester {
    /// "Herbstsemester" (autumn, first half of the academic year)
    Herbst,
    /// "Frühlingssemester" (spring, second half)
    Fruehling,
}

impl Semester {
    /// Parse a canonical semester label as it appears in the CSV.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Herbstsemester" => Some(Semester::Herbst),
            "Frühlingssemester" => Some(Semester::Fruehling),
            _ => None,
        }
    }
}

/// Morning/afternoon half of a day, derived from the slot start hour.
///
/// A slot starting at 12:00 or earlier counts as morning, matching the
/// dashboard's Vormittag/Nachmittag split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfDay {
    Morning,
    Afternoon,
}

impl HalfDay {
    pub fn from_time(time: NaiveTime) -> Self {
        if time.hour() <= 12 {
            HalfDay::Morning
        } else {
            HalfDay::Afternoon
        }
    }
}

/// One room-occupancy observation (one CSV row).
///
/// Immutable value type. `occupancy_pct` is derived once at load as
/// `Auslastung * 100`, rounded to one decimal, and treated as canonical
/// thereafter. It is nominally in [0, 100] but not clamped: overcounted
/// source rows above 100 are reported as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyRecord {
    pub room_id: String,
    pub date: NaiveDate,
    /// Start time of the two-hour observation slot.
    pub time_slot: NaiveTime,
    pub weekday: Weekday,
    pub semester: Semester,
    pub room_category: String,
    pub capacity: u32,
    pub location_label: String,
    pub coordinates: CoordinateField,
    /// Occupancy as a percentage of capacity.
    pub occupancy_pct: f64,
}

impl OccupancyRecord {
    /// Half-day bucket this observation falls into.
    pub fn half_day(&self) -> HalfDay {
        HalfDay::from_time(self.time_slot)
    }
}

/// Parse a German weekday name as found in the `Wochentag` column.
pub fn weekday_from_german(name: &str) -> Option<Weekday> {
    match name.trim() {
        "Montag" => Some(Weekday::Mon),
        "Dienstag" => Some(Weekday::Tue),
        "Mittwoch" => Some(Weekday::Wed),
        "Donnerstag" => Some(Weekday::Thu),
        "Freitag" => Some(Weekday::Fri),
        "Samstag" => Some(Weekday::Sat),
        "Sonntag" => Some(Weekday::Sun),
        _ => None,
    }
}
