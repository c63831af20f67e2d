//! Account registration, login (JWT) and profile management.

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use std::env;
use uuid::Uuid;

use crate::config::settings;
use crate::db::models::{User, UserView};
use crate::db::user_repo;

//////////////////////////////////////////////////
// Data structs
//////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "profileImage", default)]
    pub profile_image: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "profileImage")]
    pub profile_image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    pub role: String,
    pub exp: usize,
}

/// Reduced projection returned by profile updates.
#[derive(Serialize)]
struct UpdatedProfile {
    #[serde(rename = "_id")]
    id: Uuid,
    email: String,
    username: String,
    #[serde(rename = "profileImage")]
    profile_image: Option<String>,
}

//////////////////////////////////////////////////
// Token service
//////////////////////////////////////////////////

pub fn sign_claims(claims: &Claims, secret: &[u8]) -> jsonwebtoken::errors::Result<String> {
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret))
}

pub fn verify_claims(token: &str, secret: &[u8]) -> jsonwebtoken::errors::Result<Claims> {
    // No expiry leeway: a token one minute past its TTL is dead.
    let mut validation = Validation::default();
    validation.leeway = 0;
    decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
}

/// Issue a bearer token for the given account ({id, email, role}, 1 h TTL).
pub fn create_token(user: &User) -> anyhow::Result<String> {
    let secret = env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;
    let exp = Utc::now()
        .checked_add_signed(Duration::seconds(settings().token_ttl_secs as i64))
        .ok_or_else(|| anyhow::anyhow!("token expiry overflow"))?
        .timestamp() as usize;
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role.clone(),
        exp,
    };
    Ok(sign_claims(&claims, secret.as_bytes())?)
}

//////////////////////////////////////////////////
// ─────────────  JwtAuth extractor  ─────────────
//////////////////////////////////////////////////

pub mod extractor {
    use super::{verify_claims, Claims};
    use actix_web::{
        dev::Payload,
        error::{ErrorForbidden, ErrorInternalServerError, ErrorUnauthorized},
        FromRequest, HttpRequest, Result as ActixResult,
    };
    use futures_util::future::{ready, Ready};
    use std::env;
    use uuid::Uuid;

    /// The authenticated principal, resolved once per request from the
    /// bearer token. Downstream checks reuse it instead of re-fetching the
    /// account row.
    #[derive(Debug, Clone)]
    pub struct JwtAuth {
        pub user_id: Uuid,
        pub email: String,
        pub role: String,
    }

    pub(super) fn authenticate(req: &HttpRequest) -> ActixResult<JwtAuth> {
        // Expect:  Authorization: Bearer <JWT>
        let hdr = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ErrorUnauthorized("Unauthorized, no token provided"))?;

        let token = hdr
            .strip_prefix("Bearer ")
            .ok_or_else(|| ErrorUnauthorized("Unauthorized, no token provided"))?;

        let secret =
            env::var("JWT_SECRET").map_err(|_| ErrorInternalServerError("server mis-config"))?;
        let claims: Claims = verify_claims(token, secret.as_bytes())
            .map_err(|_| ErrorForbidden("Invalid or expired token"))?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| ErrorForbidden("Invalid token payload"))?;

        Ok(JwtAuth {
            user_id,
            email: claims.email,
            role: claims.role,
        })
    }

    impl FromRequest for JwtAuth {
        type Error = actix_web::Error;
        type Future = Ready<ActixResult<Self, Self::Error>>;

        fn from_request(req: &HttpRequest, _pl: &mut Payload) -> Self::Future {
            ready(authenticate(req))
        }
    }

    /// Admin-gated variant: same token resolution, plus a role check.
    #[derive(Debug, Clone)]
    pub struct AdminAuth(pub JwtAuth);

    impl FromRequest for AdminAuth {
        type Error = actix_web::Error;
        type Future = Ready<ActixResult<Self, Self::Error>>;

        fn from_request(req: &HttpRequest, _pl: &mut Payload) -> Self::Future {
            ready(authenticate(req).and_then(|auth| {
                if auth.role == "admin" {
                    Ok(AdminAuth(auth))
                } else {
                    Err(ErrorForbidden("Access denied. Admins only."))
                }
            }))
        }
    }
}
pub use extractor::{AdminAuth, JwtAuth};

fn valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        _ => false,
    }
}

//////////////////////////////////////////////////
// POST /api/user
//////////////////////////////////////////////////
#[post("/user")]
pub async fn register(info: web::Json<RegisterRequest>, db: web::Data<PgPool>) -> impl Responder {
    let username = info.username.trim();
    let email = info.email.trim().to_lowercase();

    if username.len() < 3 {
        return HttpResponse::BadRequest()
            .json(json!({ "message": "Username must be at least 3 characters" }));
    }
    if !valid_email(&email) {
        return HttpResponse::BadRequest().json(json!({ "message": "Invalid email format" }));
    }
    if info.password.len() < 6 {
        return HttpResponse::BadRequest()
            .json(json!({ "message": "Password must be at least 6 characters" }));
    }
    let role = info.role.as_deref().unwrap_or("user");
    if role != "user" && role != "admin" {
        return HttpResponse::BadRequest().json(json!({ "message": "Invalid role" }));
    }

    match user_repo::username_or_email_taken(&db, username, &email).await {
        Ok(true) => {
            return HttpResponse::BadRequest().json(json!({
                "message": "Username or email already exists. Please choose another."
            }))
        }
        Ok(false) => {}
        Err(e) => {
            log::error!("registration lookup failed: {e:?}");
            return HttpResponse::InternalServerError().json(json!({ "message": e.to_string() }));
        }
    }

    let hash = match user_repo::hash_password(&info.password) {
        Ok(h) => h,
        Err(e) => {
            log::error!("password hash failed: {e:?}");
            return HttpResponse::InternalServerError().json(json!({ "message": e.to_string() }));
        }
    };

    match user_repo::insert(&db, username, &email, &hash, role, info.profile_image.as_deref())
        .await
    {
        Ok(user) => HttpResponse::Created().json(UserView::from(user)),
        Err(e) => {
            log::error!("registration insert failed: {e:?}");
            HttpResponse::InternalServerError().json(json!({ "message": e.to_string() }))
        }
    }
}

//////////////////////////////////////////////////
// POST /api/user/login
//////////////////////////////////////////////////
#[post("/user/login")]
pub async fn login(info: web::Json<LoginRequest>, db: web::Data<PgPool>) -> impl Responder {
    if info.email.is_empty() || info.password.is_empty() {
        return HttpResponse::BadRequest()
            .json(json!({ "message": "Email and password are required" }));
    }

    let user = match user_repo::by_email(&db, &info.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            // Same body as a password mismatch; only the log line differs.
            log::warn!("login: user not found for email {}", info.email);
            return HttpResponse::Unauthorized()
                .json(json!({ "message": "Invalid email or password" }));
        }
        Err(e) => {
            log::error!("login lookup failed: {e:?}");
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Internal server error" }));
        }
    };

    match user_repo::verify_password(&info.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            log::warn!("login: password mismatch for email {}", info.email);
            return HttpResponse::Unauthorized()
                .json(json!({ "message": "Invalid email or password" }));
        }
        Err(e) => {
            log::error!("login verify failed: {e:?}");
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Internal server error" }));
        }
    }

    let token = match create_token(&user) {
        Ok(t) => t,
        Err(e) => {
            log::error!("token mint failed: {e:?}");
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Internal server error" }));
        }
    };

    log::info!("user logged in: {} ({})", user.email, user.id);
    HttpResponse::Ok().json(json!({
        "token": token,
        "message": "Login successful",
        "user": {
            "id": user.id,
            "username": user.username,
            "email": user.email,
            "role": user.role,
            "profileImage": user.profile_image.as_deref().unwrap_or("/default-profile.png"),
        }
    }))
}

//////////////////////////////////////////////////
// GET /api/user/protected
//////////////////////////////////////////////////
#[get("/user/protected")]
pub async fn protected(auth: JwtAuth) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Access granted to protected route",
        "user": { "id": auth.user_id, "email": auth.email, "role": auth.role }
    }))
}

//////////////////////////////////////////////////
// GET /api/user
//////////////////////////////////////////////////
#[get("/user")]
pub async fn list_users(db: web::Data<PgPool>) -> impl Responder {
    match user_repo::all(&db).await {
        Ok(users) => HttpResponse::Ok()
            .json(users.into_iter().map(UserView::from).collect::<Vec<_>>()),
        Err(e) => {
            log::error!("user listing failed: {e:?}");
            HttpResponse::InternalServerError().json(json!({ "message": e.to_string() }))
        }
    }
}

//////////////////////////////////////////////////
// GET /api/user/{id}
//////////////////////////////////////////////////
#[get("/user/{id}")]
pub async fn get_user(
    _auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match user_repo::by_id(&db, path.into_inner()).await {
        Ok(Some(user)) => HttpResponse::Ok().json(UserView::from(user)),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "User not found" })),
        Err(e) => HttpResponse::InternalServerError().json(json!({ "message": e.to_string() })),
    }
}

//////////////////////////////////////////////////
// PUT /api/user/{id}
//////////////////////////////////////////////////
#[put("/user/{id}")]
pub async fn update_user(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<UpdateProfileRequest>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let id = path.into_inner();

    // Token subject must own the profile being changed.
    if auth.user_id != id {
        return HttpResponse::Forbidden()
            .json(json!({ "message": "Forbidden: You can only update your own profile" }));
    }

    if let Some(username) = info.username.as_deref() {
        match user_repo::username_taken_excluding(&db, username, id).await {
            Ok(true) => {
                return HttpResponse::BadRequest().json(json!({
                    "message": "Username already exists. Please choose another."
                }))
            }
            Ok(false) => {}
            Err(e) => {
                return HttpResponse::InternalServerError()
                    .json(json!({ "message": e.to_string() }))
            }
        }
    }

    let password_hash = match info.password.as_deref() {
        Some(plain) => match user_repo::hash_password(plain) {
            Ok(h) => Some(h),
            Err(e) => {
                return HttpResponse::InternalServerError()
                    .json(json!({ "message": e.to_string() }))
            }
        },
        None => None,
    };

    match user_repo::update(
        &db,
        id,
        info.username.as_deref(),
        info.email.as_deref(),
        password_hash.as_deref(),
        info.profile_image.as_deref(),
    )
    .await
    {
        Ok(Some(user)) => HttpResponse::Ok().json(json!({
            "success": true,
            "updatedUser": UpdatedProfile {
                id: user.id,
                email: user.email,
                username: user.username,
                profile_image: user.profile_image,
            }
        })),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "User not found" })),
        Err(e) => {
            log::error!("profile update failed: {e:?}");
            HttpResponse::InternalServerError().json(json!({ "message": e.to_string() }))
        }
    }
}

//////////////////////////////////////////////////
// DELETE /api/user/{id}
//////////////////////////////////////////////////
#[delete("/user/{id}")]
pub async fn delete_user(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let id = path.into_inner();

    let target = match user_repo::by_id(&db, id).await {
        Ok(Some(u)) => u,
        Ok(None) => return HttpResponse::NotFound().json(json!({ "message": "User not found" })),
        Err(e) => {
            return HttpResponse::InternalServerError().json(json!({ "message": e.to_string() }))
        }
    };

    // Only admins or the account holder may delete.
    if auth.role != "admin" && auth.user_id != target.id {
        return HttpResponse::Forbidden()
            .json(json!({ "message": "Unauthorized to delete this user" }));
    }

    match user_repo::delete(&db, id).await {
        Ok(_) => HttpResponse::Ok().json(json!({ "message": "User deleted successfully" })),
        Err(e) => HttpResponse::InternalServerError().json(json!({ "message": e.to_string() })),
    }
}

//////////////////////////////////////////////////
// GET /api/fetchuser/me
//////////////////////////////////////////////////
#[get("/fetchuser/me")]
pub async fn me(auth: JwtAuth, db: web::Data<PgPool>) -> impl Responder {
    match user_repo::by_id(&db, auth.user_id).await {
        Ok(Some(user)) => {
            HttpResponse::Ok().json(json!({ "success": true, "user": UserView::from(user) }))
        }
        Ok(None) => HttpResponse::NotFound()
            .json(json!({ "success": false, "message": "User not found" })),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({ "success": false, "message": e.to_string() })),
    }
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // /user/protected must be registered ahead of the dynamic /user/{id}.
    cfg.service(register)
        .service(login)
        .service(protected)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
        .service(me);
}
