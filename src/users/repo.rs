use async_trait::async_trait;
use sqlx::PgPool;

use super::{entity::User, errors::RepoError};

/// Persistence boundary for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user (`id == 0`) or update a stored one; returns the user's id.
    async fn save(&self, user: &User) -> Result<i64, RepoError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn map_write_error(e: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return RepoError::Duplicate;
        }
    }
    RepoError::Database(e)
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, created_at, updated_at, suspended_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<i64, RepoError> {
        let id = if user.is_new() {
            sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO users (email, password, created_at, updated_at, suspended_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
                "#,
            )
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.suspended_at)
            .fetch_optional(&self.db)
            .await
            .map_err(map_write_error)?
        } else {
            sqlx::query_scalar::<_, i64>(
                r#"
                UPDATE users
                SET email = $2, password = $3, updated_at = $4, suspended_at = $5
                WHERE id = $1
                RETURNING id
                "#,
            )
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.updated_at)
            .bind(user.suspended_at)
            .fetch_optional(&self.db)
            .await
            .map_err(map_write_error)?
        };

        id.ok_or(RepoError::MissingId)
    }
}
