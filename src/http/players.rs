//! Public player catalogue (list / top-5 / filter / lookups).

use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::player_repo;
use crate::pipeline;

//////////////////////////////////////////////////
// Query params
//////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct PageParams {
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

#[derive(Deserialize)]
pub struct FilterParams {
    pub sub_position: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    pub age: Option<i32>,
    #[serde(rename = "XGBoost_predicted_values")]
    pub max_predicted: Option<f64>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}

/// Wire sort-field names and their backing columns.
const SORT_FIELDS: [(&str, &str); 3] = [
    ("XGBoost_predicted_values", "xgboost_predicted_values"),
    ("age", "age"),
    (
        "current_club_domestic_competition_id",
        "current_club_domestic_competition_id",
    ),
];

/// Resolves a wire sort-field name against the allow-list.
pub fn sort_column(wire: &str) -> Option<&'static str> {
    SORT_FIELDS
        .iter()
        .find(|(name, _)| *name == wire)
        .map(|(_, col)| *col)
}

//////////////////////////////////////////////////
// GET /api/players
//////////////////////////////////////////////////
#[get("/players")]
pub async fn list_players(
    web::Query(params): web::Query<PageParams>,
    db: web::Data<PgPool>,
) -> impl Responder {
    if !pipeline::valid_page_params(params.page, params.limit) {
        return HttpResponse::BadRequest()
            .json(json!({ "message": "Page and limit must be positive numbers." }));
    }

    let total = match player_repo::count(&db).await {
        Ok(n) => n,
        Err(e) => {
            return HttpResponse::InternalServerError().json(json!({ "message": e.to_string() }))
        }
    };

    let offset = (params.page - 1) * params.limit;
    match player_repo::page(&db, offset, params.limit).await {
        Ok(players) => HttpResponse::Ok().json(json!({
            "totalPlayers": total,
            "totalPages": pipeline::total_pages(total, params.limit),
            "currentPage": params.page,
            "players": players,
        })),
        Err(e) => HttpResponse::InternalServerError().json(json!({ "message": e.to_string() })),
    }
}

//////////////////////////////////////////////////
// GET /api/players/getTop5
//////////////////////////////////////////////////
#[get("/players/getTop5")]
pub async fn get_top5(db: web::Data<PgPool>) -> impl Responder {
    let players = match player_repo::all(&db).await {
        Ok(p) => p,
        Err(e) => {
            log::error!("top-5 fetch failed: {e:?}");
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Server error", "details": e.to_string() }));
        }
    };

    let groups = pipeline::top_by_competition(players);
    if groups.is_empty() {
        return HttpResponse::NotFound()
            .json(json!({ "message": "No players found or data missing." }));
    }

    HttpResponse::Ok().json(groups)
}

//////////////////////////////////////////////////
// GET /api/players/filter
//////////////////////////////////////////////////
#[get("/players/filter")]
pub async fn filter_players(
    web::Query(params): web::Query<FilterParams>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let order_col = match params.sort_by.as_deref() {
        None => None,
        Some(field) => match sort_column(field) {
            Some(col) => Some(col),
            None => {
                return HttpResponse::BadRequest().json(json!({
                    "message": "Invalid sort field. Use XGBoost_predicted_values, age, or current_club_domestic_competition_id."
                }))
            }
        },
    };
    let ascending = params.sort_order.as_deref() == Some("asc");

    match player_repo::filtered(
        &db,
        params.sub_position.as_deref(),
        params.name.as_deref(),
        params.age,
        params.max_predicted,
        order_col,
        ascending,
    )
    .await
    {
        Ok(players) if players.is_empty() => HttpResponse::NotFound()
            .json(json!({ "message": "No players found matching the criteria." })),
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => {
            log::error!("player filter failed: {e:?}");
            HttpResponse::InternalServerError().json(json!({ "message": e.to_string() }))
        }
    }
}

//////////////////////////////////////////////////
// GET /api/players/sub-position/{sub_position}
//////////////////////////////////////////////////
#[get("/players/sub-position/{sub_position}")]
pub async fn by_sub_position(path: web::Path<String>, db: web::Data<PgPool>) -> impl Responder {
    // Comma-separated set; a player matches any of them.
    let positions: Vec<String> = path
        .into_inner()
        .split(',')
        .map(|s| s.to_string())
        .collect();

    match player_repo::by_sub_positions(&db, &positions).await {
        Ok(players) if players.is_empty() => HttpResponse::NotFound()
            .json(json!({ "message": "No players found for the given sub-positions." })),
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => HttpResponse::InternalServerError().json(json!({ "message": e.to_string() })),
    }
}

//////////////////////////////////////////////////
// GET /api/players/playerId/{player_id}
//////////////////////////////////////////////////
#[get("/players/playerId/{player_id}")]
pub async fn id_by_player_id(path: web::Path<i64>, db: web::Data<PgPool>) -> impl Responder {
    match player_repo::by_player_id(&db, path.into_inner()).await {
        Ok(Some(player)) => HttpResponse::Ok().json(json!({ "_id": player.id })),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "Player not found" })),
        Err(e) => HttpResponse::InternalServerError().json(json!({ "message": e.to_string() })),
    }
}

//////////////////////////////////////////////////
// GET /api/players/{id}
//////////////////////////////////////////////////
#[get("/players/{id}")]
pub async fn get_player(path: web::Path<String>, db: web::Data<PgPool>) -> impl Responder {
    // Id format is checked before any query goes out.
    let id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({ "message": "Invalid id format" }))
        }
    };

    match player_repo::by_id(&db, id).await {
        Ok(Some(player)) => HttpResponse::Ok().json(player),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "Player not found" })),
        Err(e) => HttpResponse::InternalServerError().json(json!({ "message": e.to_string() })),
    }
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // The dynamic /players/{id} stays last so it cannot shadow the rest.
    cfg.service(get_top5)
        .service(filter_players)
        .service(by_sub_position)
        .service(id_by_player_id)
        .service(list_players)
        .service(get_player);
}
