//! Article publishing (admin-curated news with optional photos).

use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use futures_util::TryStreamExt;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::settings;
use crate::db::article_repo;
use crate::http::auth::{AdminAuth, JwtAuth};
use crate::http::players::PageParams;

//////////////////////////////////////////////////
// Payloads
//////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct ArticleUpdateRequest {
    pub title: String,
    pub text: String,
    pub photo: Option<String>,
}

/// Fields collected from the multipart create form. An uploaded file wins
/// over a plain `photo` string field.
#[derive(Default)]
struct ArticleForm {
    title: Option<String>,
    text: Option<String>,
    photo_field: Option<String>,
    uploaded_path: Option<String>,
}

fn validate_article(title: &str, text: &str) -> Result<(), &'static str> {
    if title.trim().len() < 5 {
        return Err("Title must be at least 5 characters");
    }
    if text.trim().len() < 10 {
        return Err("Text must be at least 10 characters");
    }
    Ok(())
}

async fn collect_form(payload: &mut Multipart) -> Result<ArticleForm, String> {
    let mut form = ArticleForm::default();

    while let Some(mut field) = payload.try_next().await.map_err(|e| e.to_string())? {
        let name = field.name().to_string();
        let filename = field
            .content_disposition()
            .get_filename()
            .map(str::to_string);

        let mut buf = web::BytesMut::new();
        while let Some(chunk) = field.try_next().await.map_err(|e| e.to_string())? {
            buf.extend_from_slice(&chunk);
        }

        match (name.as_str(), filename) {
            ("photo", Some(filename)) => {
                let dir = &settings().uploads_dir;
                tokio::fs::create_dir_all(dir)
                    .await
                    .map_err(|e| e.to_string())?;
                let path = format!("{}/{}-{}", dir, Uuid::new_v4(), filename);
                tokio::fs::write(&path, &buf)
                    .await
                    .map_err(|e| e.to_string())?;
                form.uploaded_path = Some(path);
            }
            ("photo", None) => form.photo_field = Some(String::from_utf8_lossy(&buf).into_owned()),
            ("title", _) => form.title = Some(String::from_utf8_lossy(&buf).into_owned()),
            ("text", _) => form.text = Some(String::from_utf8_lossy(&buf).into_owned()),
            _ => {}
        }
    }

    Ok(form)
}

//////////////////////////////////////////////////
// POST /api/articles/create
//////////////////////////////////////////////////
#[post("/articles/create")]
pub async fn create_article(
    admin: AdminAuth,
    mut payload: Multipart,
    db: web::Data<PgPool>,
) -> impl Responder {
    let form = match collect_form(&mut payload).await {
        Ok(f) => f,
        Err(e) => {
            log::error!("article upload failed: {e}");
            return HttpResponse::InternalServerError()
                .json(json!({ "success": false, "message": "Error creating article" }));
        }
    };

    let title = match form.title.as_deref() {
        Some(t) => t,
        None => {
            return HttpResponse::BadRequest()
                .json(json!({ "success": false, "message": "Title is required" }))
        }
    };
    let text = match form.text.as_deref() {
        Some(t) => t,
        None => {
            return HttpResponse::BadRequest()
                .json(json!({ "success": false, "message": "Text is required" }))
        }
    };
    if let Err(msg) = validate_article(title, text) {
        return HttpResponse::BadRequest().json(json!({ "success": false, "message": msg }));
    }

    let photo = form.uploaded_path.or(form.photo_field);
    match article_repo::insert(&db, title, text, photo.as_deref(), admin.0.user_id).await {
        Ok(article) => HttpResponse::Created().json(json!({
            "success": true,
            "message": "Article created successfully",
            "article": article,
        })),
        Err(e) => {
            log::error!("article insert failed: {e:?}");
            HttpResponse::InternalServerError()
                .json(json!({ "success": false, "message": "Error creating article" }))
        }
    }
}

//////////////////////////////////////////////////
// GET /api/articles
//////////////////////////////////////////////////
#[get("/articles")]
pub async fn list_articles(
    web::Query(params): web::Query<PageParams>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let offset = ((params.page - 1) * params.limit).max(0);
    match article_repo::page(&db, offset, params.limit.max(0)).await {
        Ok((articles, total)) => HttpResponse::Ok().json(json!({
            "success": true,
            "articles": articles,
            "totalPages": crate::pipeline::total_pages(total, params.limit),
            "currentPage": params.page,
        })),
        Err(e) => {
            log::error!("article listing failed: {e:?}");
            HttpResponse::InternalServerError()
                .json(json!({ "success": false, "message": "Error fetching articles" }))
        }
    }
}

//////////////////////////////////////////////////
// GET /api/articles/{id}
//////////////////////////////////////////////////
#[get("/articles/{id}")]
pub async fn get_article(path: web::Path<Uuid>, db: web::Data<PgPool>) -> impl Responder {
    match article_repo::with_creator(&db, path.into_inner()).await {
        Ok(Some((article, username))) => HttpResponse::Ok().json(json!({
            "success": true,
            "article": {
                "_id": article.id,
                "title": article.title,
                "text": article.text,
                "photo": article.photo,
                "createdBy": { "_id": article.created_by, "username": username },
                "createdAt": article.created_at,
            }
        })),
        Ok(None) => HttpResponse::NotFound()
            .json(json!({ "success": false, "message": "Article not found" })),
        Err(e) => {
            log::error!("article fetch failed: {e:?}");
            HttpResponse::InternalServerError()
                .json(json!({ "success": false, "message": "Error fetching the article" }))
        }
    }
}

//////////////////////////////////////////////////
// PUT /api/articles/update/{id}
//////////////////////////////////////////////////
#[put("/articles/update/{id}")]
pub async fn update_article(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<ArticleUpdateRequest>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let id = path.into_inner();

    if let Err(msg) = validate_article(&info.title, &info.text) {
        return HttpResponse::BadRequest().json(json!({ "success": false, "message": msg }));
    }

    let article = match article_repo::by_id(&db, id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return HttpResponse::NotFound()
                .json(json!({ "success": false, "message": "Article not found" }))
        }
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({ "success": false, "message": e.to_string() }))
        }
    };

    // Creator-only: the reference is immutable, so this check is final.
    if article.created_by != auth.user_id {
        return HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "Access denied. Only the creator can update this article."
        }));
    }

    // An empty photo keeps the stored one.
    let photo = info.photo.as_deref().filter(|p| !p.is_empty());
    match article_repo::update(&db, id, &info.title, &info.text, photo).await {
        Ok(Some(article)) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Article updated successfully",
            "article": article,
        })),
        Ok(None) => HttpResponse::NotFound()
            .json(json!({ "success": false, "message": "Article not found" })),
        Err(e) => {
            log::error!("article update failed: {e:?}");
            HttpResponse::InternalServerError()
                .json(json!({ "success": false, "message": "Error updating article" }))
        }
    }
}

//////////////////////////////////////////////////
// DELETE /api/articles/delete/{id}
//////////////////////////////////////////////////
#[delete("/articles/delete/{id}")]
pub async fn delete_article(
    _admin: AdminAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match article_repo::delete(&db, path.into_inner()).await {
        Ok(0) => HttpResponse::NotFound()
            .json(json!({ "success": false, "message": "Article not found" })),
        Ok(_) => HttpResponse::Ok()
            .json(json!({ "success": true, "message": "Article deleted successfully" })),
        Err(e) => {
            log::error!("article delete failed: {e:?}");
            HttpResponse::InternalServerError()
                .json(json!({ "success": false, "message": "Error deleting article" }))
        }
    }
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // The dynamic /articles/{id} goes last.
    cfg.service(create_article)
        .service(list_articles)
        .service(update_article)
        .service(delete_article)
        .service(get_article);
}
