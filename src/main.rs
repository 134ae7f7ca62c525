mod config;
mod dtos;
mod errors;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod services;

use std::env;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};

use crate::handlers::auth_handlers::{login, signup};
use crate::handlers::post_handlers::{
    create_post, delete_post, get_post, like_post, list_posts, update_post,
};
use crate::handlers::user_handlers::{ban_user, list_users};
use crate::repositories::post_repository::PgPostRepository;
use crate::repositories::user_repository::PgUserRepository;
use crate::services::auth_services::AuthService;
use crate::services::post_service::PostService;
use crate::services::user_service::UserService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let pg_pool = match config::get_pg_pool() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create PG pool: {}", e);
            std::process::exit(1);
        }
    };

    let post_repo = Arc::new(PgPostRepository::new(pg_pool.clone()));
    let user_repo = Arc::new(PgUserRepository::new(pg_pool));

    let post_service = web::Data::new(PostService::new(post_repo, user_repo.clone()));
    let user_service = web::Data::new(UserService::new(user_repo.clone()));
    let auth_service = web::Data::new(AuthService::new_from_env(user_repo));

    let allowed_origins = env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".into());

    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                "authorization",
                "content-type",
                "accept",
                "x-requested-with",
            ])
            .supports_credentials()
            .max_age(3600);

        for origin in allowed_origins.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(post_service.clone())
            .app_data(user_service.clone())
            .app_data(auth_service.clone())
            .service(
                web::scope("/auth")
                    .service(signup) // POST /auth/signup
                    .service(login), // POST /auth/login
            )
            .service(
                web::scope("/api")
                    .service(list_posts) // GET /api/posts?orden=&busqueda=
                    .service(get_post) // GET /api/posts/{id}
                    .service(create_post) // POST /api/posts
                    .service(update_post) // PUT /api/posts/{id}
                    .service(delete_post) // DELETE /api/posts/{id}
                    .service(like_post) // POST /api/posts/{id}/like
                    .service(list_users) // GET /api/users (admin)
                    .service(ban_user), // POST /api/users/{id}/ban (admin)
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
