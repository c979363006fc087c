use axum::{
    routing::{get, patch, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::court::{register_court, show_court_list, update_court_published};

pub fn build_court_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/venues/:venue_id/courts", post(register_court))
        .route("/venues/:venue_id/courts", get(show_court_list))
        .route("/courts/:court_id", patch(update_court_published))
}
