//! Fantasy squads, scoped to the owning user.

use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::squad_repo;
use crate::http::auth::JwtAuth;

#[derive(Deserialize)]
pub struct SaveSquadRequest {
    #[serde(rename = "squadName")]
    pub squad_name: String,
    /// Opaque entries carrying position data; must be a non-empty array.
    pub players: Vec<serde_json::Value>,
    #[serde(rename = "totalValue")]
    pub total_value: f64,
}

//////////////////////////////////////////////////
// POST /api/squads/save
//////////////////////////////////////////////////
#[post("/squads/save")]
pub async fn save_squad(
    auth: JwtAuth,
    info: web::Json<SaveSquadRequest>,
    db: web::Data<PgPool>,
) -> impl Responder {
    if info.players.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Players array cannot be empty and must contain position data."
        }));
    }

    let players = serde_json::Value::Array(info.players.clone());
    match squad_repo::insert(&db, &info.squad_name, &players, info.total_value, auth.user_id).await
    {
        Ok(squad) => HttpResponse::Created()
            .json(json!({ "message": "Squad saved successfully", "squad": squad })),
        Err(e) => {
            log::error!("squad save failed: {e:?}");
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to save squad", "error": e.to_string() }))
        }
    }
}

//////////////////////////////////////////////////
// GET /api/squads/my-squads
//////////////////////////////////////////////////
#[get("/squads/my-squads")]
pub async fn my_squads(auth: JwtAuth, db: web::Data<PgPool>) -> impl Responder {
    match squad_repo::for_user(&db, auth.user_id).await {
        Ok(squads) => HttpResponse::Ok().json(squads),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({ "message": "Failed to fetch squads", "error": e.to_string() })),
    }
}

//////////////////////////////////////////////////
// DELETE /api/squads/delete/{squadId}
//////////////////////////////////////////////////
#[delete("/squads/delete/{squad_id}")]
pub async fn delete_squad(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match squad_repo::delete_for_user(&db, path.into_inner(), auth.user_id).await {
        // A miss is a 404 whether the squad is absent or owned by someone
        // else; the caller cannot tell the two apart.
        Ok(0) => {
            HttpResponse::NotFound().json(json!({ "message": "Squad not found or unauthorized" }))
        }
        Ok(_) => HttpResponse::Ok().json(json!({ "message": "Squad deleted successfully" })),
        Err(e) => {
            log::error!("squad delete failed: {e:?}");
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Failed to delete squad", "error": e.to_string() }))
        }
    }
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(save_squad).service(my_squads).service(delete_squad);
}
