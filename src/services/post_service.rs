use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::dtos::post_dtos::{CreatePostDTO, UpdatePostDTO};
use crate::errors::ApiError;
use crate::models::post::Post;
use crate::repositories::post_repository::{NewPost, PostPatch, PostRepository};
use crate::repositories::user_repository::UserRepository;
use crate::services::popularity_service::compute_popularity;

pub const ORDER_NAME_ASC: &str = "nombre-asc";
pub const ORDER_NAME_DESC: &str = "nombre-desc";
pub const ORDER_POPULARITY_ASC: &str = "popularidad-asc";
pub const ORDER_POPULARITY_DESC: &str = "popularidad-desc";

/// Post use cases. Holds the two read collaborators the listing pipeline
/// needs; everything here works on snapshots and never caches between calls.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        PostService { posts, users }
    }

    /// Listing pipeline: fetch -> search filter -> order.
    ///
    /// Popularity ordering scores the *full* snapshot (all posts, all users)
    /// before the search filter is applied, then sorts the filtered subset by
    /// looked-up score. Unknown or missing order keys fall back to
    /// newest-first. Repository errors bubble up untouched.
    pub async fn list_posts(
        &self,
        order: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<Post>, ApiError> {
        let posts = self.posts.read_all().await?;

        let mut filtered: Vec<Post> = match search.filter(|s| !s.is_empty()) {
            Some(query) => {
                let query = query.to_lowercase();
                posts
                    .iter()
                    .filter(|p| {
                        p.title.to_lowercase().contains(&query)
                            || p.content
                                .as_ref()
                                .is_some_and(|c| c.to_lowercase().contains(&query))
                    })
                    .cloned()
                    .collect()
            }
            None => posts.clone(),
        };

        match order.unwrap_or_default() {
            ORDER_NAME_ASC => filtered.sort_by(compare_titles),
            ORDER_NAME_DESC => filtered.sort_by(|a, b| compare_titles(b, a)),
            key @ (ORDER_POPULARITY_ASC | ORDER_POPULARITY_DESC) => {
                let users = self.users.read_all().await?;
                let scores: HashMap<Uuid, f64> = compute_popularity(&posts, &users)
                    .into_iter()
                    .map(|s| (s.id, s.popularity))
                    .collect();
                let score_of =
                    |post: &Post| -> f64 { scores.get(&post.id).copied().unwrap_or(0.0) };
                if key == ORDER_POPULARITY_ASC {
                    filtered.sort_by(|a, b| score_of(a).total_cmp(&score_of(b)));
                } else {
                    filtered.sort_by(|a, b| score_of(b).total_cmp(&score_of(a)));
                }
            }
            // default and unrecognized keys: most recent first
            _ => filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        Ok(filtered)
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post, ApiError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("post"))
    }

    pub async fn create_post(
        &self,
        author_id: Uuid,
        input: CreatePostDTO,
    ) -> Result<Post, ApiError> {
        if input.title.trim().is_empty() {
            return Err(ApiError::Validation("title must not be empty".to_string()));
        }
        self.posts
            .create(NewPost {
                title: input.title,
                content: input.content,
                author_id,
            })
            .await
    }

    /// Author-only edit.
    pub async fn update_post(
        &self,
        id: Uuid,
        requester_id: Uuid,
        input: UpdatePostDTO,
    ) -> Result<Post, ApiError> {
        let post = self.get_post(id).await?;
        if post.author_id != requester_id {
            return Err(ApiError::Forbidden);
        }
        if input.title.trim().is_empty() {
            return Err(ApiError::Validation("title must not be empty".to_string()));
        }
        self.posts
            .update(
                id,
                PostPatch {
                    title: input.title,
                    content: input.content,
                },
            )
            .await?;
        self.get_post(id).await
    }

    /// Soft delete, allowed for the author or an admin.
    pub async fn delete_post(
        &self,
        id: Uuid,
        requester_id: Uuid,
        requester_role: &str,
    ) -> Result<(), ApiError> {
        let post = self.get_post(id).await?;
        if post.author_id != requester_id && requester_role != "admin" {
            return Err(ApiError::Forbidden);
        }
        self.posts.soft_delete(id).await
    }

    pub async fn like_post(&self, id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        // fails with 404 instead of inserting a dangling like
        self.get_post(id).await?;
        self.posts.add_like(id, user_id).await?;
        Ok(())
    }
}

// Title comparison: case folds before comparing so "Zorro" does not sort
// before "abeja". Deliberately not full locale collation: accented initials
// stay in code-point order, so "Ábaco" lands after "zorro".
fn compare_titles(a: &Post, b: &Post) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}
