use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::Squad;

pub async fn insert(
    db: &PgPool,
    squad_name: &str,
    players: &serde_json::Value,
    total_value: f64,
    user_id: Uuid,
) -> Result<Squad> {
    sqlx::query_as::<_, Squad>(
        r#"INSERT INTO squads (squad_name, players, total_value, user_id)
           VALUES ($1, $2, $3, $4)
           RETURNING id, squad_name, players, total_value, user_id, created_at, updated_at"#,
    )
    .bind(squad_name)
    .bind(players)
    .bind(total_value)
    .bind(user_id)
    .fetch_one(db)
    .await
    .context("inserting squad")
}

/// The caller's squads, newest first.
pub async fn for_user(db: &PgPool, user_id: Uuid) -> Result<Vec<Squad>> {
    sqlx::query_as::<_, Squad>(
        "SELECT id, squad_name, players, total_value, user_id, created_at, updated_at
           FROM squads
          WHERE user_id = $1
          ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("fetching squads")
}

/// Deletes only when both the squad id and the owner match; a miss covers
/// "doesn't exist" and "not yours" alike.
pub async fn delete_for_user(db: &PgPool, squad_id: Uuid, user_id: Uuid) -> Result<u64> {
    Ok(
        sqlx::query("DELETE FROM squads WHERE id = $1 AND user_id = $2")
            .bind(squad_id)
            .bind(user_id)
            .execute(db)
            .await
            .context("deleting squad")?
            .rows_affected(),
    )
}
