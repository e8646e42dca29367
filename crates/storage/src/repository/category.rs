use async_trait::async_trait;
use sqlx::PgPool;

use super::{CategoryStore, map_constraint};
use crate::error::{Result, StorageError};
use crate::models::{Category, NewCategory};

/// Repository for Category database operations
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, name, description, min_age, max_age, active
            FROM categories
            WHERE category_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, name, description, min_age, max_age, active
            FROM categories
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, name, description, min_age, max_age, active
            FROM categories
            ORDER BY category_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn find_active(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, name, description, min_age, max_age, active
            FROM categories
            WHERE active = TRUE
            ORDER BY category_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE category_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn insert(&self, category: NewCategory) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, min_age, max_age, active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING category_id, name, description, min_age, max_age, active
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.min_age)
        .bind(category.max_age)
        .bind(category.active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint(
                e,
                "Category name already exists",
                "Category is still referenced",
            )
        })?;

        Ok(category)
    }

    async fn save(&self, category: &Category) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2,
                description = $3,
                min_age = $4,
                max_age = $5,
                active = $6
            WHERE category_id = $1
            RETURNING category_id, name, description, min_age, max_age, active
            "#,
        )
        .bind(category.category_id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.min_age)
        .bind(category.max_age)
        .bind(category.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_constraint(
                e,
                "Category name already exists",
                "Category is still referenced",
            )
        })?
        .ok_or(StorageError::NotFound)?;

        Ok(category)
    }

    async fn delete_by_id(&self, id: i32) -> Result<()> {
        sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_constraint(
                    e,
                    "Category name already exists",
                    "Category still has enrolled competitors",
                )
            })?;

        Ok(())
    }
}
