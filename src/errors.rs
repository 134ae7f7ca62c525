use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::dtos::ApiResponse;
use crate::services::auth_services::AuthError;

/// Crate-wide error type for handlers and repositories. Repository failures
/// pass through the service layer untouched; only the handler boundary turns
/// them into an HTTP response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("database error: {0}")]
    Db(#[from] tokio_postgres::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("forbidden")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Db(_) | ApiError::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(e) => match e {
                AuthError::InvalidCredentials | AuthError::InvalidToken => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::Banned => StatusCode::FORBIDDEN,
                AuthError::EmailTaken => StatusCode::CONFLICT,
                AuthError::Hash(_) | AuthError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        // don't leak SQL details to clients, but keep them in the log
        let message = match self {
            ApiError::Db(e) => {
                log::error!("database error: {}", e);
                "internal error".to_string()
            }
            ApiError::Pool(e) => {
                log::error!("pool error: {}", e);
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::error(message))
    }
}
