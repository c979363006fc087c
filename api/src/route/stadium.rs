use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::stadium::{
    delete_stadium, register_stadium, show_stadium, show_stadium_list, update_stadium,
};

pub fn build_stadium_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", post(register_stadium))
        .route("/", get(show_stadium_list))
        .route("/:stadium_id", get(show_stadium))
        .route("/:stadium_id", patch(update_stadium))
        .route("/:stadium_id", delete(delete_stadium));

    Router::new().nest("/stadiums", routers)
}
