//! Route table.

use axum::Router;
use axum::routing::{get, patch, post, put};
use tower_http::trace::TraceLayer;

use crate::handlers::{bookings, health, rooms, session, users};
use crate::state::AppState;

/// Build the full application router over the given state.
///
/// CORS is deliberately not layered here: the binary attaches a
/// credentialed `CorsLayer` built from its configured origins, and tests
/// drive the router without one.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/rooms", post(rooms::create_room).get(rooms::list_rooms))
        .route("/rooms/host/:email", get(rooms::host_rooms))
        .route(
            "/rooms/:id",
            get(rooms::get_room)
                .patch(rooms::update_room)
                .delete(rooms::delete_room),
        )
        .route("/update-status/:id", patch(rooms::update_status))
        .route("/bookings", post(bookings::create_booking))
        .route("/manage/my-bookings/:id", post(bookings::cancel_booking))
        .route("/my-booking/:email", get(bookings::my_bookings))
        .route("/manage-booking/:email", get(bookings::host_bookings))
        .route("/users", put(users::upsert_user).get(users::list_users))
        .route("/users/:email", patch(users::update_role))
        .route("/role/:email", get(users::get_role))
        .route("/jwt", post(session::issue_token))
        .route("/logout", get(session::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
