use actix_web::{get, post, web, HttpResponse};
use uuid::Uuid;

use crate::dtos::user_dtos::BanUserIn;
use crate::dtos::ApiResponse;
use crate::errors::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::services::user_service::UserService;

#[get("/users")]
pub async fn list_users(
    service: web::Data<UserService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    if !user.is_admin() {
        return Err(ApiError::Forbidden);
    }
    let users = service.list_users().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Users retrieved successfully", users)))
}

#[post("/users/{id}/ban")]
pub async fn ban_user(
    service: web::Data<UserService>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<BanUserIn>,
) -> Result<HttpResponse, ApiError> {
    if !user.is_admin() {
        return Err(ApiError::Forbidden);
    }
    let id = path.into_inner();
    service.set_banned(id, body.banned).await?;
    log::info!("admin {} set banned={} for user {}", user.user_id, body.banned, id);
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::ok("User updated", ())))
}
