use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::User;

/// Salted one-way hash for storage. Plaintext never reaches a row.
pub fn hash_password(plain: &str) -> Result<String> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST).context("hashing password")
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(plain, hash).context("verifying password")
}

/// Case-sensitive exact match on either column, mirroring the registration
/// uniqueness rule.
pub async fn username_or_email_taken(db: &PgPool, username: &str, email: &str) -> Result<bool> {
    sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS(
               SELECT 1
                 FROM users
                WHERE username = $1
                   OR email    = $2
           )"#,
    )
    .bind(username)
    .bind(email)
    .fetch_one(db)
    .await
    .context("checking username/email uniqueness")
}

/// Uniqueness re-check for profile updates: the caller's own row is excluded.
pub async fn username_taken_excluding(db: &PgPool, username: &str, user_id: Uuid) -> Result<bool> {
    sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS(
               SELECT 1
                 FROM users
                WHERE username = $1
                  AND id      <> $2
           )"#,
    )
    .bind(username)
    .bind(user_id)
    .fetch_one(db)
    .await
    .context("checking username uniqueness")
}

pub async fn insert(
    db: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    role: &str,
    profile_image: Option<&str>,
) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"INSERT INTO users (username, email, password_hash, role, profile_image)
           VALUES ($1, $2, $3, $4, $5)
           RETURNING id, username, email, password_hash, role, profile_image, created_at"#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(profile_image)
    .fetch_one(db)
    .await
    .context("inserting user")
}

pub async fn by_email(db: &PgPool, email: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, role, profile_image, created_at
           FROM users
          WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(db)
    .await
    .context("fetching user by email")
}

pub async fn by_id(db: &PgPool, id: Uuid) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, role, profile_image, created_at
           FROM users
          WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("fetching user by id")
}

pub async fn all(db: &PgPool) -> Result<Vec<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, role, profile_image, created_at
           FROM users
          ORDER BY created_at",
    )
    .fetch_all(db)
    .await
    .context("listing users")
}

/// Partial profile update. A `password_hash` here is already hashed by the
/// caller; `None` fields keep their stored value.
pub async fn update(
    db: &PgPool,
    id: Uuid,
    username: Option<&str>,
    email: Option<&str>,
    password_hash: Option<&str>,
    profile_image: Option<&str>,
) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"UPDATE users
              SET username      = COALESCE($2, username),
                  email         = COALESCE($3, email),
                  password_hash = COALESCE($4, password_hash),
                  profile_image = COALESCE($5, profile_image)
            WHERE id = $1
        RETURNING id, username, email, password_hash, role, profile_image, created_at"#,
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(profile_image)
    .fetch_optional(db)
    .await
    .context("updating user")
}

pub async fn delete(db: &PgPool, id: Uuid) -> Result<u64> {
    Ok(sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("deleting user")?
        .rows_affected())
}
