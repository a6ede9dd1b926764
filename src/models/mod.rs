//! Domain model types for occupancy analytics.
//!
//! Records are parsed and validated once at the ingestion boundary
//! ([`crate::parsing`]); everything inside the services layer works on the
//! typed values defined here and never re-parses strings.

pub mod filter;
pub mod record;
pub mod views;

pub use filter::{FilterConfig, SemesterSelection};
pub use record::{
    weekday_from_german, CoordinateField, Coordinates, HalfDay, OccupancyRecord, Semester,
    SLOT_DURATION_HOURS,
};
pub use views::{
    AlignedTimeSeries, HalfDayBucket, HeatmapData, RoomRanking, RoomSummary, RoomSummaryData,
    SummaryDiagnostic, TimeSeriesPoint,
};
