use actix_web::{post, web, HttpResponse};

use crate::dtos::auth_dtos::{LoginIn, SignupIn};
use crate::dtos::ApiResponse;
use crate::errors::ApiError;
use crate::services::auth_services::AuthService;

#[post("/signup")]
pub async fn signup(
    auth: web::Data<AuthService>,
    body: web::Json<SignupIn>,
) -> Result<HttpResponse, ApiError> {
    let user = auth.signup(body.into_inner()).await?;
    log::info!("new user registered: {}", user.id);
    Ok(HttpResponse::Created().json(ApiResponse::ok("Signup successful", user)))
}

#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    body: web::Json<LoginIn>,
) -> Result<HttpResponse, ApiError> {
    let session = auth.login(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Login successful", session)))
}
