use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    browse_reservations, cancel_reservation, join_reservation, leave_reservation,
    register_reservation, reject_invitation, show_my_reservations, show_reservation,
    update_reservation,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", get(show_my_reservations))
        .route("/join", post(join_reservation))
        .route("/:reservation_id", get(show_reservation))
        .route("/:reservation_id", patch(update_reservation))
        .route("/:reservation_id", delete(cancel_reservation))
        .route("/:reservation_id/members/me", delete(leave_reservation))
        .route("/:reservation_id/members/me", patch(reject_invitation));

    Router::new()
        .nest("/reservations", routers)
        .route("/courts/:court_id/reservations", post(register_reservation))
        .route(
            "/courts/:court_id/reservations/browse",
            post(browse_reservations),
        )
}
