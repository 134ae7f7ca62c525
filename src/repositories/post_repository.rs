use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use deadpool_postgres::Pool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::like::Like;
use crate::models::post::Post;

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub author_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct PostPatch {
    pub title: String,
    pub content: Option<String>,
}

/// Read/write access to posts. The listing pipeline only ever calls
/// `read_all`; the rest backs the CRUD handlers.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Full snapshot of non-deleted posts, each carrying its likes.
    async fn read_all(&self) -> Result<Vec<Post>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, ApiError>;
    async fn create(&self, input: NewPost) -> Result<Post, ApiError>;
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<(), ApiError>;
    /// Marks the row deleted; never removes it.
    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError>;
    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<Like, ApiError>;
}

pub struct PgPostRepository {
    pool: Pool,
}

impl PgPostRepository {
    pub fn new(pool: Pool) -> Self {
        PgPostRepository { pool }
    }

    fn row_to_post(row: &tokio_postgres::Row, likes: Option<Vec<Like>>) -> Post {
        Post {
            id: row.get(0),
            title: row.get(1),
            content: row.get(2),
            deleted: row.get(3),
            author_id: row.get(4),
            created_at: row.get(5),
            author_name: row.get(6),
            likes,
        }
    }
}

const POST_COLUMNS: &str =
    "p.id, p.title, p.content, p.deleted, p.author_id, p.created_at, u.full_name";

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn read_all(&self) -> Result<Vec<Post>, ApiError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts p \
             JOIN users u ON u.id = p.author_id \
             WHERE p.deleted = FALSE"
        );
        let rows = client.query(sql.as_str(), &[]).await?;

        let like_rows = client
            .query("SELECT id, user_id, post_id, created_at FROM likes", &[])
            .await?;
        let mut likes_by_post: HashMap<Uuid, Vec<Like>> = HashMap::new();
        for row in like_rows {
            let like = Like {
                id: row.get(0),
                user_id: row.get(1),
                post_id: row.get(2),
                created_at: row.get(3),
            };
            likes_by_post.entry(like.post_id).or_default().push(like);
        }

        Ok(rows
            .iter()
            .map(|row| {
                let id: Uuid = row.get(0);
                Self::row_to_post(row, likes_by_post.remove(&id))
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, ApiError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts p \
             JOIN users u ON u.id = p.author_id \
             WHERE p.id = $1 AND p.deleted = FALSE"
        );
        let row = client.query_opt(sql.as_str(), &[&id]).await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let like_rows = client
            .query(
                "SELECT id, user_id, post_id, created_at FROM likes WHERE post_id = $1",
                &[&id],
            )
            .await?;
        let likes: Vec<Like> = like_rows
            .iter()
            .map(|r| Like {
                id: r.get(0),
                user_id: r.get(1),
                post_id: r.get(2),
                created_at: r.get(3),
            })
            .collect();
        let likes = if likes.is_empty() { None } else { Some(likes) };

        Ok(Some(Self::row_to_post(&row, likes)))
    }

    async fn create(&self, input: NewPost) -> Result<Post, ApiError> {
        let client = self.pool.get().await?;
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        client
            .execute(
                "INSERT INTO posts (id, title, content, deleted, author_id, created_at) \
                 VALUES ($1, $2, $3, FALSE, $4, $5)",
                &[&id, &input.title, &input.content, &input.author_id, &created_at],
            )
            .await?;

        let author_row = client
            .query_one("SELECT full_name FROM users WHERE id = $1", &[&input.author_id])
            .await?;

        Ok(Post {
            id,
            title: input.title,
            content: input.content,
            deleted: false,
            author_id: input.author_id,
            created_at,
            author_name: author_row.get(0),
            likes: None,
        })
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<(), ApiError> {
        let client = self.pool.get().await?;
        client
            .execute(
                "UPDATE posts SET title = $1, content = $2 WHERE id = $3 AND deleted = FALSE",
                &[&patch.title, &patch.content, &id],
            )
            .await?;
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), ApiError> {
        let client = self.pool.get().await?;
        client
            .execute("UPDATE posts SET deleted = TRUE WHERE id = $1", &[&id])
            .await?;
        Ok(())
    }

    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<Like, ApiError> {
        let client = self.pool.get().await?;
        let like = Like {
            id: Uuid::new_v4(),
            user_id,
            post_id,
            created_at: Utc::now(),
        };
        client
            .execute(
                "INSERT INTO likes (id, user_id, post_id, created_at) VALUES ($1, $2, $3, $4)",
                &[&like.id, &like.user_id, &like.post_id, &like.created_at],
            )
            .await?;
        Ok(like)
    }
}
