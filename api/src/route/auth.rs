use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::auth::{google_auth_url, google_callback, login, logout};

pub fn build_auth_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/google", get(google_auth_url))
        .route("/google/callback", post(google_callback));

    Router::new().nest("/auth", routers)
}
