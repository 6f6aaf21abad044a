//! Request handlers, one module per resource.

pub mod bookings;
pub mod health;
pub mod rooms;
pub mod session;
pub mod users;

use serde::Serialize;

/// Affected-count response for update and delete operations.
///
/// A zero count means the target id (or id-and-owner pair) matched nothing;
/// the operation itself succeeded and the response status is still 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MutationResponse {
    /// Records the write touched.
    pub affected: u64,
}
