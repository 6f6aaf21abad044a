//! Axum HTTP boundary for the StayHub marketplace.
//!
//! Wires the booking lifecycle, room store, role directory, and credential
//! service into a JSON API. Authorization is a per-route extractor guard
//! (see [`extractors`]); handlers stay thin and delegate the two-entity
//! booking transitions to `stayhub-core`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::AppError;
pub use router::build_router;
pub use state::{AppState, Environment};
