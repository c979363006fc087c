use super::{
    account::build_account_routers, album::build_album_routers, auth::build_auth_routers,
    business_hour::build_business_hour_routers, court::build_court_routers,
    reservation::build_reservation_routers, stadium::build_stadium_routers,
    venue::build_venue_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_auth_routers())
        .merge(build_account_routers())
        .merge(build_stadium_routers())
        .merge(build_venue_routers())
        .merge(build_court_routers())
        .merge(build_business_hour_routers())
        .merge(build_reservation_routers())
        .merge(build_album_routers());

    Router::new().nest("/api/v1", router)
}
