//! # Raum Rust Backend
//!
//! Room-occupancy analytics engine for the Raumauslastung dashboard.
//!
//! This crate ingests a tabular log of room-occupancy observations (one row
//! per room, date, and time slot) and derives the analytical views the
//! dashboard renders: per-room summary statistics for the map and KPI panel,
//! a similarity-ordered room × half-day occupancy matrix for the heatmap, and
//! a semester-aligned time series for a single selected room. The REST API is
//! exposed via Axum for the frontend.
//!
//! ## Architecture
//!
//! - [`models`]: Strongly typed domain records and derived view types
//! - [`parsing`]: CSV ingestion boundary (parse and validate once)
//! - [`services`]: Filtering, aggregation, clustering, and alignment logic
//! - [`store`]: In-memory dataset registry with checksum deduplication
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! The engine itself is synchronous and stateless: every computation takes
//! the filtered record set as input and returns a fresh derived structure.

pub mod models;

pub mod parsing;

pub mod services;

pub mod store;

#[cfg(feature = "http-server")]
pub mod http;
