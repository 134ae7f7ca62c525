use async_trait::async_trait;
use deadpool_postgres::Pool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::user::User;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String, // set "user" server-side
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn read_all(&self) -> Result<Vec<User>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn create(&self, input: NewUser) -> Result<User, ApiError>;
    /// Returns false when no such user exists.
    async fn set_banned(&self, id: Uuid, banned: bool) -> Result<bool, ApiError>;
}

pub struct PgUserRepository {
    pool: Pool,
}

impl PgUserRepository {
    pub fn new(pool: Pool) -> Self {
        PgUserRepository { pool }
    }

    fn row_to_user(row: &tokio_postgres::Row) -> User {
        User {
            id: row.get(0),
            full_name: row.get(1),
            email: row.get(2),
            password_hash: row.get(3),
            role: row.get(4),
            banned: row.get(5),
        }
    }
}

const USER_COLUMNS: &str = "id, full_name, email, password_hash, role, banned";

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn read_all(&self) -> Result<Vec<User>, ApiError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users");
        let rows = client.query(sql.as_str(), &[]).await?;
        Ok(rows.iter().map(Self::row_to_user).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = client.query_opt(sql.as_str(), &[&id]).await?;
        Ok(row.as_ref().map(Self::row_to_user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = client.query_opt(sql.as_str(), &[&email]).await?;
        Ok(row.as_ref().map(Self::row_to_user))
    }

    async fn create(&self, input: NewUser) -> Result<User, ApiError> {
        let client = self.pool.get().await?;
        let user = User {
            id: Uuid::new_v4(),
            full_name: input.full_name,
            email: input.email,
            password_hash: input.password_hash,
            role: input.role,
            banned: false,
        };
        client
            .execute(
                "INSERT INTO users (id, full_name, email, password_hash, role, banned) \
                 VALUES ($1, $2, $3, $4, $5, FALSE)",
                &[
                    &user.id,
                    &user.full_name,
                    &user.email,
                    &user.password_hash,
                    &user.role,
                ],
            )
            .await?;
        Ok(user)
    }

    async fn set_banned(&self, id: Uuid, banned: bool) -> Result<bool, ApiError> {
        let client = self.pool.get().await?;
        let updated = client
            .execute("UPDATE users SET banned = $1 WHERE id = $2", &[&banned, &id])
            .await?;
        Ok(updated > 0)
    }
}
