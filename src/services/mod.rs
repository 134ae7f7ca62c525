pub mod auth_services;
pub mod popularity_service;
pub mod post_service;
pub mod user_service;
