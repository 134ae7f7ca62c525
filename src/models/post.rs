use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::like::Like;

/// A blog post as stored. `deleted` is a soft-delete marker: the row stays
/// in the database, it is just hidden from listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub deleted: bool,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    /// Likes attached to this post, when the repository loaded them.
    pub likes: Option<Vec<Like>>,
}

impl Post {
    pub fn like_count(&self) -> usize {
        self.likes.as_ref().map_or(0, |l| l.len())
    }
}
