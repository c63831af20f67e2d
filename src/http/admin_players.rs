//! Catalogue maintenance surface (`/api/handlePlayer`), keyed by the
//! external `player_id` rather than the row id. Mutations are admin-gated.

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

use crate::db::player_repo::{self, NewPlayer, PlayerPatch};
use crate::http::auth::{AdminAuth, JwtAuth};

//////////////////////////////////////////////////
// POST /api/handlePlayer/create
//////////////////////////////////////////////////
#[post("/handlePlayer/create")]
pub async fn create_player(
    _admin: AdminAuth,
    info: web::Json<NewPlayer>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match player_repo::insert(&db, &info).await {
        Ok(player) => HttpResponse::Created()
            .json(json!({ "message": "Player created successfully", "player": player })),
        Err(e) => {
            log::error!("player create failed: {e:?}");
            HttpResponse::BadRequest().json(json!({ "error": e.to_string() }))
        }
    }
}

//////////////////////////////////////////////////
// GET /api/handlePlayer/all
//////////////////////////////////////////////////
#[get("/handlePlayer/all")]
pub async fn all_players(_auth: JwtAuth, db: web::Data<PgPool>) -> impl Responder {
    match player_repo::all(&db).await {
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })),
    }
}

//////////////////////////////////////////////////
// GET /api/handlePlayer/{player_id}
//////////////////////////////////////////////////
#[get("/handlePlayer/{player_id}")]
pub async fn get_by_player_id(
    _auth: JwtAuth,
    path: web::Path<i64>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match player_repo::by_player_id(&db, path.into_inner()).await {
        Ok(Some(player)) => HttpResponse::Ok().json(player),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "Player not found" })),
        Err(e) => HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })),
    }
}

//////////////////////////////////////////////////
// PUT /api/handlePlayer/update/{player_id}
//////////////////////////////////////////////////
#[put("/handlePlayer/update/{player_id}")]
pub async fn update_player(
    _admin: AdminAuth,
    path: web::Path<i64>,
    info: web::Json<PlayerPatch>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match player_repo::update_by_player_id(&db, path.into_inner(), &info).await {
        Ok(Some(player)) => HttpResponse::Ok()
            .json(json!({ "message": "Player updated successfully", "player": player })),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "Player not found" })),
        Err(e) => {
            log::error!("player update failed: {e:?}");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

//////////////////////////////////////////////////
// DELETE /api/handlePlayer/delete/{player_id}
//////////////////////////////////////////////////
#[delete("/handlePlayer/delete/{player_id}")]
pub async fn delete_player(
    _admin: AdminAuth,
    path: web::Path<i64>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match player_repo::delete_by_player_id(&db, path.into_inner()).await {
        Ok(0) => HttpResponse::NotFound().json(json!({ "message": "Player not found" })),
        Ok(_) => HttpResponse::Ok().json(json!({ "message": "Player deleted successfully" })),
        Err(e) => HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })),
    }
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_player)
        .service(all_players)
        .service(update_player)
        .service(delete_player)
        .service(get_by_player_id);
}
