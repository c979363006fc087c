use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::business_hour::{replace_business_hours, show_business_hours};

pub fn build_business_hour_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/business-hours", get(show_business_hours))
        .route("/business-hours", put(replace_business_hours))
}
