//! HTTP server module for the occupancy backend.
//!
//! Exposes the dataset store and the analytics services as a REST API via
//! axum. The handlers only parse requests and serialize responses; all
//! analytical logic lives in [`crate::services`].

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
