use async_trait::async_trait;
use sqlx::PgPool;

use super::{RoleStore, map_constraint};
use crate::error::Result;
use crate::models::{NewRole, Role};

/// Repository for Role database operations
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for RoleRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Role>> {
        let role = sqlx::query_as::<_, Role>(
            "SELECT role_id, name, description FROM roles WHERE role_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>> {
        let role =
            sqlx::query_as::<_, Role>("SELECT role_id, name, description FROM roles WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(role)
    }

    async fn find_all(&self) -> Result<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT role_id, name, description FROM roles ORDER BY role_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM roles WHERE name = $1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn insert(&self, role: NewRole) -> Result<Role> {
        let role = sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (name, description)
            VALUES ($1, $2)
            RETURNING role_id, name, description
            "#,
        )
        .bind(&role.name)
        .bind(&role.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint(
                e,
                "Role name already exists",
                "Role is still referenced",
            )
        })?;

        Ok(role)
    }
}
