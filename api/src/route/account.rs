use axum::{
    routing::{get, patch, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::account::{change_password, register_account, show_me};

pub fn build_account_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", post(register_account))
        .route("/me", get(show_me))
        .route("/me", patch(change_password));

    Router::new().nest("/accounts", routers)
}
