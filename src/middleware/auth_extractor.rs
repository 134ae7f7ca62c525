use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use uuid::Uuid;

use crate::services::auth_services::AuthService;

/// Extractor result: a user with a valid, unexpired token.
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<AuthenticatedUser, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let auth_header = match req.headers().get("Authorization") {
            Some(header) => match header.to_str() {
                Ok(h) => h,
                Err(_) => return ready(Err(ErrorUnauthorized("Invalid header format"))),
            },
            None => return ready(Err(ErrorUnauthorized("Missing Authorization header"))),
        };

        if !auth_header.starts_with("Bearer ") {
            return ready(Err(ErrorUnauthorized("Invalid auth header format")));
        }
        let token = auth_header.trim_start_matches("Bearer ").trim();

        let Some(auth) = req.app_data::<web::Data<AuthService>>() else {
            return ready(Err(ErrorInternalServerError("auth service not configured")));
        };

        match auth.decode_token(token) {
            Ok((user_id, role)) => {
                log::debug!("auth ok for user {}", user_id);
                ready(Ok(AuthenticatedUser { user_id, role }))
            }
            Err(e) => {
                log::debug!("auth failed: {}", e);
                ready(Err(ErrorUnauthorized("Invalid token")))
            }
        }
    }
}
