pub mod like;
pub mod popularity;
pub mod post;
pub mod user;
