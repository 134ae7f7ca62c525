use serde::Serialize;
use uuid::Uuid;

/// Derived score for one post. Recomputed per request, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct PopularityScore {
    pub id: Uuid,
    pub popularity: f64,
}
