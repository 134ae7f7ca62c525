use std::env;
use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::password_hash::rand_core::OsRng;
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::dtos::auth_dtos::{LoginIn, SessionOut, SignupIn};
use crate::errors::ApiError;
use crate::models::user::{JwtClaims, User, UserPublic};
use crate::repositories::user_repository::{NewUser, UserRepository};

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("account is banned")]
    Banned,
    #[error("email already registered")]
    EmailTaken,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Signup, login and token handling. Tokens are HS256 with the secret taken
/// from JWT_SECRET at startup.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: String) -> Self {
        AuthService { users, jwt_secret }
    }

    pub fn new_from_env(users: Arc<dyn UserRepository>) -> Self {
        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET is required")
            .trim()
            .to_string();
        Self::new(users, jwt_secret)
    }

    pub async fn signup(&self, input: SignupIn) -> Result<UserPublic, ApiError> {
        let email = input.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::Validation("invalid email".to_string()));
        }
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken.into());
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .users
            .create(NewUser {
                full_name: input.full_name.trim().to_string(),
                email,
                password_hash,
                role: "user".to_string(), // role is server-set, never client-set
            })
            .await?;
        Ok(UserPublic::from(&user))
    }

    pub async fn login(&self, input: LoginIn) -> Result<SessionOut, ApiError> {
        let email = input.email.trim().to_lowercase();
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(&input.password, &user.password_hash)?;
        if user.banned {
            return Err(AuthError::Banned.into());
        }

        let access_token = self.issue_token(&user)?;
        Ok(SessionOut {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: TOKEN_TTL_HOURS * 3600,
            user: UserPublic::from(&user),
        })
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user.id.to_string(),
            role: user.role.clone(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?)
    }

    /// Validates signature and expiry, then pulls out (user id, role).
    pub fn decode_token(&self, token: &str) -> Result<(Uuid, String), AuthError> {
        let data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| AuthError::InvalidToken)?;

        let user_id = Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::InvalidToken)?;
        Ok((user_id, data.claims.role))
    }
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}
