use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::venue::{
    delete_venue, register_venue, show_venue, show_venue_list, update_venue,
};

pub fn build_venue_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/stadiums/:stadium_id/venues", post(register_venue))
        .route("/stadiums/:stadium_id/venues", get(show_venue_list))
        .route("/venues/:venue_id", get(show_venue))
        .route("/venues/:venue_id", patch(update_venue))
        .route("/venues/:venue_id", delete(delete_venue))
}
