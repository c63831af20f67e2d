//! Name search over the catalogue: substring match, market-value sort,
//! then an optional pagination slice — the stages from [`crate::pipeline`]
//! composed in order.

use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::db::player_repo;
use crate::pipeline::{self, SortDirection};

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub sort: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

//////////////////////////////////////////////////
// GET /api/search
//////////////////////////////////////////////////
#[get("/search")]
pub async fn search(
    web::Query(params): web::Query<SearchParams>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let players = match player_repo::all(&db).await {
        Ok(p) => p,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Search error", "details": e.to_string() }))
        }
    };

    let mut filtered = pipeline::filter_by_name(players, params.query.as_deref());
    pipeline::sort_by_market_value(
        &mut filtered,
        SortDirection::from_query(params.sort.as_deref()),
    );
    let page = pipeline::paginate(&filtered, params.page, params.limit);

    HttpResponse::Ok().json(json!({
        "total": filtered.len(),
        "page": params.page,
        "limit": params.limit,
        "players": page,
    }))
}

//////////////////////////////////////////////////
// GET /api/players/search-sort
//////////////////////////////////////////////////
#[get("/players/search-sort")]
pub async fn search_sort(
    web::Query(params): web::Query<SearchParams>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let players = match player_repo::all(&db).await {
        Ok(p) => p,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Server error", "details": e.to_string() }))
        }
    };

    // Same first two stages, no pagination: the full sorted set goes back.
    let mut filtered = pipeline::filter_by_name(players, params.query.as_deref());
    pipeline::sort_by_market_value(
        &mut filtered,
        SortDirection::from_query(params.sort.as_deref()),
    );

    HttpResponse::Ok().json(filtered)
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(search).service(search_sort);
}
