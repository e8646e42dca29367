use async_trait::async_trait;
use sqlx::PgPool;

use super::{UserStore, map_constraint};
use crate::error::{Result, StorageError};
use crate::models::{NewUser, User};

/// Repository for User database operations
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password_hash, phone, role_id, active, last_access_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password_hash, phone, role_id, active, last_access_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password_hash, phone, role_id, active, last_access_at
            FROM users
            ORDER BY user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_active(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password_hash, phone, role_id, active, last_access_at
            FROM users
            WHERE active = TRUE
            ORDER BY user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_by_role(&self, role_id: i32) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password_hash, phone, role_id, active, last_access_at
            FROM users
            WHERE role_id = $1
            ORDER BY user_id
            "#,
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn exists_by_phone(&self, phone: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE phone = $1)")
            .bind(phone)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, phone, role_id, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING user_id, name, email, password_hash, phone, role_id, active, last_access_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(user.role_id)
        .bind(user.active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint(
                e,
                "User email or phone already registered",
                "User references an unknown role",
            )
        })?;

        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2,
                email = $3,
                password_hash = $4,
                phone = $5,
                role_id = $6,
                active = $7,
                last_access_at = $8
            WHERE user_id = $1
            RETURNING user_id, name, email, password_hash, phone, role_id, active, last_access_at
            "#,
        )
        .bind(user.user_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(user.role_id)
        .bind(user.active)
        .bind(user.last_access_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_constraint(
                e,
                "User email or phone already registered",
                "User references an unknown role",
            )
        })?
        .ok_or(StorageError::NotFound)?;

        Ok(user)
    }
}
