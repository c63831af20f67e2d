//! Row types and outbound projections.
//!
//! Wire names follow the contract the front end already speaks
//! (`_id`, `Name`, `XGBoost_predicted_values`, camelCase timestamps), so
//! response structs carry serde renames while columns stay snake_case.
//! `User` is the only row type that never serializes: everything leaving
//! the server goes through a projection that structurally lacks the
//! password hash.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user account. No hash field exists to leak.
#[derive(Debug, Serialize)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "profileImage")]
    pub profile_image: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        UserView {
            id: u.id,
            username: u.username,
            email: u.email,
            role: u.role,
            profile_image: u.profile_image,
            created_at: u.created_at,
        }
    }
}

/// Scouted player, stored in the externally named `player_full_info` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Player {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub player_id: i64,
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
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub photo: Option<String>,
    #[serde(rename = "createdBy")]
    pub created_by: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Squad {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "squadName")]
    pub squad_name: String,
    /// Opaque player entries (position data included), kept as stored.
    pub players: serde_json::Value,
    #[serde(rename = "totalValue")]
    pub total_value: f64,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
