use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::album::{delete_album, show_album_list, upload_album};

pub fn build_album_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", post(upload_album))
        .route("/", get(show_album_list))
        .route("/:album_id", delete(delete_album));

    Router::new().nest("/albums", routers)
}
