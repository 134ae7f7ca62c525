use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreatePostDTO {
    pub title: String,
    pub content: Option<String>, // optional, matches schema
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostDTO {
    pub title: String,
    pub content: Option<String>,
}

/// Query string for GET /api/posts. `orden` takes the sort keys the frontend
/// sends ("nombre-asc", "nombre-desc", "popularidad-asc", "popularidad-desc");
/// anything else falls back to newest-first.
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub orden: Option<String>,
    pub busqueda: Option<String>,
}
