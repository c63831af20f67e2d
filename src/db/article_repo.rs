use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::Article;

pub async fn insert(
    db: &PgPool,
    title: &str,
    text: &str,
    photo: Option<&str>,
    created_by: Uuid,
) -> Result<Article> {
    sqlx::query_as::<_, Article>(
        r#"INSERT INTO articles (title, text, photo, created_by)
           VALUES ($1, $2, $3, $4)
           RETURNING id, title, text, photo, created_by, created_at"#,
    )
    .bind(title)
    .bind(text)
    .bind(photo)
    .bind(created_by)
    .fetch_one(db)
    .await
    .context("inserting article")
}

/// Newest-first page plus the total count for page arithmetic.
pub async fn page(db: &PgPool, offset: i64, limit: i64) -> Result<(Vec<Article>, i64)> {
    let articles = sqlx::query_as::<_, Article>(
        "SELECT id, title, text, photo, created_by, created_at
           FROM articles
          ORDER BY created_at DESC
         OFFSET $1 LIMIT $2",
    )
    .bind(offset)
    .bind(limit)
    .fetch_all(db)
    .await
    .context("fetching article page")?;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM articles")
        .fetch_one(db)
        .await
        .context("counting articles")?;

    Ok((articles, total))
}

pub async fn by_id(db: &PgPool, id: Uuid) -> Result<Option<Article>> {
    sqlx::query_as::<_, Article>(
        "SELECT id, title, text, photo, created_by, created_at FROM articles WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("fetching article")
}

/// Single article with the creator reference expanded to a display name.
pub async fn with_creator(db: &PgPool, id: Uuid) -> Result<Option<(Article, String)>> {
    let row = sqlx::query_as::<_, (Uuid, String, String, Option<String>, Uuid, chrono::DateTime<chrono::Utc>, String)>(
        r#"SELECT a.id, a.title, a.text, a.photo, a.created_by, a.created_at, u.username
             FROM articles a
             JOIN users u ON u.id = a.created_by
            WHERE a.id = $1"#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("fetching article with creator")?;

    Ok(row.map(|(id, title, text, photo, created_by, created_at, username)| {
        (
            Article {
                id,
                title,
                text,
                photo,
                created_by,
                created_at,
            },
            username,
        )
    }))
}

pub async fn update(
    db: &PgPool,
    id: Uuid,
    title: &str,
    text: &str,
    photo: Option<&str>,
) -> Result<Option<Article>> {
    sqlx::query_as::<_, Article>(
        r#"UPDATE articles
              SET title = $2,
                  text  = $3,
                  photo = COALESCE($4, photo)
            WHERE id = $1
        RETURNING id, title, text, photo, created_by, created_at"#,
    )
    .bind(id)
    .bind(title)
    .bind(text)
    .bind(photo)
    .fetch_optional(db)
    .await
    .context("updating article")
}

pub async fn delete(db: &PgPool, id: Uuid) -> Result<u64> {
    Ok(sqlx::query("DELETE FROM articles WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("deleting article")?
        .rows_affected())
}
