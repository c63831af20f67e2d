//! Catalogue access for `player_full_info`.
//!
//! The external `player_id` is assigned here: a scalar subquery takes the
//! current maximum inside the INSERT itself, so assignment is atomic per
//! statement and survives restarts without a side table.

use anyhow::{Context, Result};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::Player;

/// Create payload for the admin surface. A `player_id` in the request body
/// is ignored; the repository assigns the next one.
#[derive(Debug, Deserialize)]
pub struct NewPlayer {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Nationality")]
    pub nationality: Option<String>,
    pub current_club_id: Option<i64>,
    pub country_of_birth: Option<String>,
    pub city_of_birth: Option<String>,
    pub country_of_citizenship: Option<String>,
    pub date_of_birth: Option<String>,
    pub sub_position: Option<String>,
    pub foot: Option<String>,
    pub height_in_cm: Option<f64>,
    pub contract_expiration_date: Option<String>,
    pub agent_name: Option<String>,
    pub current_club_domestic_competition_id: String,
    pub current_club_name: Option<String>,
    pub market_value_in_eur: Option<i64>,
    pub highest_market_value_in_eur: Option<i64>,
    pub age: Option<i32>,
    #[serde(rename = "XGBoost_predicted_values")]
    pub xgboost_predicted_values: Option<f64>,
    #[serde(rename = "RFT_predicted_values")]
    pub rft_predicted_values: Option<f64>,
    pub image_url: Option<String>,
}

/// Partial update keyed by external `player_id`; absent fields keep their
/// stored value.
#[derive(Debug, Deserialize)]
pub struct PlayerPatch {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Nationality")]
    pub nationality: Option<String>,
    pub current_club_id: Option<i64>,
    pub country_of_birth: Option<String>,
    pub city_of_birth: Option<String>,
    pub country_of_citizenship: Option<String>,
    pub date_of_birth: Option<String>,
    pub sub_position: Option<String>,
    pub foot: Option<String>,
    pub height_in_cm: Option<f64>,
    pub contract_expiration_date: Option<String>,
    pub agent_name: Option<String>,
    pub current_club_domestic_competition_id: Option<String>,
    pub current_club_name: Option<String>,
    pub market_value_in_eur: Option<i64>,
    pub highest_market_value_in_eur: Option<i64>,
    pub age: Option<i32>,
    #[serde(rename = "XGBoost_predicted_values")]
    pub xgboost_predicted_values: Option<f64>,
    #[serde(rename = "RFT_predicted_values")]
    pub rft_predicted_values: Option<f64>,
    pub image_url: Option<String>,
}

pub async fn count(db: &PgPool) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM player_full_info")
        .fetch_one(db)
        .await
        .context("counting players")
}

pub async fn page(db: &PgPool, offset: i64, limit: i64) -> Result<Vec<Player>> {
    sqlx::query_as::<_, Player>(
        "SELECT * FROM player_full_info ORDER BY player_id OFFSET $1 LIMIT $2",
    )
    .bind(offset)
    .bind(limit)
    .fetch_all(db)
    .await
    .context("fetching player page")
}

pub async fn all(db: &PgPool) -> Result<Vec<Player>> {
    sqlx::query_as::<_, Player>("SELECT * FROM player_full_info ORDER BY player_id")
        .fetch_all(db)
        .await
        .context("fetching all players")
}

pub async fn by_id(db: &PgPool, id: Uuid) -> Result<Option<Player>> {
    sqlx::query_as::<_, Player>("SELECT * FROM player_full_info WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
        .context("fetching player by id")
}

pub async fn by_player_id(db: &PgPool, player_id: i64) -> Result<Option<Player>> {
    sqlx::query_as::<_, Player>("SELECT * FROM player_full_info WHERE player_id = $1")
        .bind(player_id)
        .fetch_optional(db)
        .await
        .context("fetching player by player_id")
}

/// Matches any of the given sub-positions.
pub async fn by_sub_positions(db: &PgPool, positions: &[String]) -> Result<Vec<Player>> {
    sqlx::query_as::<_, Player>(
        "SELECT * FROM player_full_info WHERE sub_position = ANY($1) ORDER BY player_id",
    )
    .bind(positions)
    .fetch_all(db)
    .await
    .context("fetching players by sub-position")
}

/// Combined filter query. `order_col` must already be validated against the
/// handler's allow-list before it is spliced into the ORDER BY clause.
pub async fn filtered(
    db: &PgPool,
    sub_position: Option<&str>,
    name: Option<&str>,
    max_age: Option<i32>,
    max_predicted: Option<f64>,
    order_col: Option<&str>,
    ascending: bool,
) -> Result<Vec<Player>> {
    let mut sql = String::from(
        "SELECT * FROM player_full_info
          WHERE ($1::text IS NULL OR sub_position = $1)
            AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
            AND ($3::int4 IS NULL OR age <= $3)
            AND ($4::float8 IS NULL OR xgboost_predicted_values <= $4)",
    );
    if let Some(col) = order_col {
        sql.push_str(" ORDER BY ");
        sql.push_str(col);
        sql.push_str(if ascending { " ASC" } else { " DESC" });
    }

    sqlx::query_as::<_, Player>(&sql)
        .bind(sub_position)
        .bind(name)
        .bind(max_age)
        .bind(max_predicted)
        .fetch_all(db)
        .await
        .context("filtering players")
}

pub async fn insert(db: &PgPool, p: &NewPlayer) -> Result<Player> {
    sqlx::query_as::<_, Player>(
        r#"INSERT INTO player_full_info
               (player_id, name, nationality, current_club_id, country_of_birth,
                city_of_birth, country_of_citizenship, date_of_birth, sub_position,
                foot, height_in_cm, contract_expiration_date, agent_name,
                current_club_domestic_competition_id, current_club_name,
                market_value_in_eur, highest_market_value_in_eur, age,
                xgboost_predicted_values, rft_predicted_values, image_url)
           VALUES ((SELECT COALESCE(MAX(player_id), 0) + 1 FROM player_full_info),
                   $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                   $15, $16, $17, $18, $19, $20)
        RETURNING *"#,
    )
    .bind(&p.name)
    .bind(&p.nationality)
    .bind(p.current_club_id)
    .bind(&p.country_of_birth)
    .bind(&p.city_of_birth)
    .bind(&p.country_of_citizenship)
    .bind(&p.date_of_birth)
    .bind(&p.sub_position)
    .bind(&p.foot)
    .bind(p.height_in_cm)
    .bind(&p.contract_expiration_date)
    .bind(&p.agent_name)
    .bind(&p.current_club_domestic_competition_id)
    .bind(&p.current_club_name)
    .bind(p.market_value_in_eur)
    .bind(p.highest_market_value_in_eur)
    .bind(p.age)
    .bind(p.xgboost_predicted_values)
    .bind(p.rft_predicted_values)
    .bind(&p.image_url)
    .fetch_one(db)
    .await
    .context("inserting player")
}

pub async fn update_by_player_id(
    db: &PgPool,
    player_id: i64,
    p: &PlayerPatch,
) -> Result<Option<Player>> {
    sqlx::query_as::<_, Player>(
        r#"UPDATE player_full_info
              SET name                                 = COALESCE($2,  name),
                  nationality                          = COALESCE($3,  nationality),
                  current_club_id                      = COALESCE($4,  current_club_id),
                  country_of_birth                     = COALESCE($5,  country_of_birth),
                  city_of_birth                        = COALESCE($6,  city_of_birth),
                  country_of_citizenship               = COALESCE($7,  country_of_citizenship),
                  date_of_birth                        = COALESCE($8,  date_of_birth),
                  sub_position                         = COALESCE($9,  sub_position),
                  foot                                 = COALESCE($10, foot),
                  height_in_cm                         = COALESCE($11, height_in_cm),
                  contract_expiration_date             = COALESCE($12, contract_expiration_date),
                  agent_name                           = COALESCE($13, agent_name),
                  current_club_domestic_competition_id = COALESCE($14, current_club_domestic_competition_id),
                  current_club_name                    = COALESCE($15, current_club_name),
                  market_value_in_eur                  = COALESCE($16, market_value_in_eur),
                  highest_market_value_in_eur          = COALESCE($17, highest_market_value_in_eur),
                  age                                  = COALESCE($18, age),
                  xgboost_predicted_values             = COALESCE($19, xgboost_predicted_values),
                  rft_predicted_values                 = COALESCE($20, rft_predicted_values),
                  image_url                            = COALESCE($21, image_url),
                  updated_at                           = now()
            WHERE player_id = $1
        RETURNING *"#,
    )
    .bind(player_id)
    .bind(&p.name)
    .bind(&p.nationality)
    .bind(p.current_club_id)
    .bind(&p.country_of_birth)
    .bind(&p.city_of_birth)
    .bind(&p.country_of_citizenship)
    .bind(&p.date_of_birth)
    .bind(&p.sub_position)
    .bind(&p.foot)
    .bind(p.height_in_cm)
    .bind(&p.contract_expiration_date)
    .bind(&p.agent_name)
    .bind(&p.current_club_domestic_competition_id)
    .bind(&p.current_club_name)
    .bind(p.market_value_in_eur)
    .bind(p.highest_market_value_in_eur)
    .bind(p.age)
    .bind(p.xgboost_predicted_values)
    .bind(p.rft_predicted_values)
    .bind(&p.image_url)
    .fetch_optional(db)
    .await
    .context("updating player")
}

pub async fn delete_by_player_id(db: &PgPool, player_id: i64) -> Result<u64> {
    Ok(sqlx::query("DELETE FROM player_full_info WHERE player_id = $1")
        .bind(player_id)
        .execute(db)
        .await
        .context("deleting player")?
        .rows_affected())
}
