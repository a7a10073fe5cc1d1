use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{on_duplicate, AppError};

/// User row. The hash never leaves the process: it is skipped on
/// serialization and excluded from the lookup projections.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Projection handed out by lookups; no password material.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
}

impl User {
    pub async fn create(db: &PgPool, email: &str, password_hash: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| on_duplicate(e, "Email already exists"))?;
        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<PublicUser>, AppError> {
        let user = sqlx::query_as::<_, PublicUser>(
            r#"
            SELECT id, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn list_all(db: &PgPool) -> Result<Vec<PublicUser>, AppError> {
        let users = sqlx::query_as::<_, PublicUser>(
            r#"
            SELECT id, email
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    pub async fn email_exists(db: &PgPool, email: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)"#)
                .bind(email)
                .fetch_one(db)
                .await?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("a@b.com"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }
}
