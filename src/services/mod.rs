//! Service layer: the occupancy aggregation and clustering engine.
//!
//! Data flows strictly filtering → {room_summary, clustering, alignment};
//! the three view computations are independent consumers of the filtered
//! record set and do not depend on each other. Every function here is a
//! side-effect-free function of its inputs.

pub mod alignment;

pub mod clustering;

pub mod filtering;

pub mod room_summary;

pub use alignment::{compute_aligned_series, semester_start};
pub use clustering::compute_heatmap_data;
pub use filtering::apply_filters;
pub use room_summary::compute_room_summaries;
