use crate::http;
use actix_web::web;

/// Mount every HTTP sub-module under `/api`.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(http::auth::init_routes)
            // search registers /players/search-sort, so it must precede the
            // players module and its dynamic /players/{id}
            .configure(http::search::init_routes)
            .configure(http::players::init_routes)
            .configure(http::admin_players::init_routes)
            .configure(http::articles::init_routes)
            .configure(http::squads::init_routes)
            .configure(http::football::init_routes)
            .configure(http::health::init_routes),
    );
}
