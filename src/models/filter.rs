//! Filter configuration selected by the dashboard user.

use std::collections::HashSet;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::record::Semester;

/// Semester period selected in the UI: first half (HS), second half (FS),
/// or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SemesterSelection {
    #[serde(rename = "HS")]
    First,
    #[serde(rename = "FS")]
    Second,
    #[serde(rename = "HS+FS")]
    #[default]
    Both,
}

impl SemesterSelection {
    /// Whether a record from the given semester passes this selection.
    pub fn matches(&self, semester: Semester) -> bool {
        match self {
            SemesterSelection::First => semester == Semester::Herbst,
            SemesterSelection::Second => semester == Semester::Fruehling,
            SemesterSelection::Both => true,
        }
    }

    /// Parse the UI label ("HS", "FS", "HS+FS").
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "HS" => Some(SemesterSelection::First),
            "FS" => Some(SemesterSelection::Second),
            "HS+FS" => Some(SemesterSelection::Both),
            _ => None,
        }
    }
}

/// User-selected filter predicates, combined with logical AND.
///
/// Absent filters pass everything through; the default configuration is the
/// identity filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterConfig {
    /// Inclusive (start_hour, end_hour) window on the slot start hour,
    /// e.g. (8, 20) for business hours.
    pub time_window: Option<(u32, u32)>,
    /// Weekdays to keep, e.g. Monday through Friday for workdays only.
    pub weekdays: Option<HashSet<Weekday>>,
    pub semester: SemesterSelection,
    /// Exact-match room category label.
    pub room_category: Option<String>,
}

impl FilterConfig {
    /// True when no predicate is active (the identity configuration).
    pub fn is_identity(&self) -> bool {
        self.time_window.is_none()
            && self.weekdays.is_none()
            && self.semester == SemesterSelection::Both
            && self.room_category.is_none()
    }
}
