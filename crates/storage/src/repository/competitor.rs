use async_trait::async_trait;
use sqlx::PgPool;

use super::{CompetitorStore, map_constraint};
use crate::error::{Result, StorageError};
use crate::models::{Competitor, NewCompetitor};

/// Repository for Competitor database operations
pub struct CompetitorRepository {
    pool: PgPool,
}

impl CompetitorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(&self, clause: &str, value: Option<i32>) -> Result<Vec<Competitor>> {
        let sql = format!(
            r#"
            SELECT competitor_id, first_name, last_name, identity_document, birth_date, age,
                   email, phone, club_id, category_id, robot_name, enrolled_at, active
            FROM competitors
            {clause}
            ORDER BY competitor_id
            "#
        );

        let mut query = sqlx::query_as::<_, Competitor>(&sql);
        if let Some(value) = value {
            query = query.bind(value);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl CompetitorStore for CompetitorRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Competitor>> {
        let competitor = sqlx::query_as::<_, Competitor>(
            r#"
            SELECT competitor_id, first_name, last_name, identity_document, birth_date, age,
                   email, phone, club_id, category_id, robot_name, enrolled_at, active
            FROM competitors
            WHERE competitor_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(competitor)
    }

    async fn find_all(&self) -> Result<Vec<Competitor>> {
        self.fetch_where("", None).await
    }

    async fn find_active(&self) -> Result<Vec<Competitor>> {
        self.fetch_where("WHERE active = TRUE", None).await
    }

    async fn find_by_club(&self, club_id: i32) -> Result<Vec<Competitor>> {
        self.fetch_where("WHERE club_id = $1", Some(club_id)).await
    }

    async fn find_by_category(&self, category_id: i32) -> Result<Vec<Competitor>> {
        self.fetch_where("WHERE category_id = $1", Some(category_id))
            .await
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM competitors WHERE competitor_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_document(&self, document: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM competitors WHERE identity_document = $1)",
        )
        .bind(document)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert(&self, competitor: NewCompetitor) -> Result<Competitor> {
        let competitor = sqlx::query_as::<_, Competitor>(
            r#"
            INSERT INTO competitors (first_name, last_name, identity_document, birth_date, age,
                                     email, phone, club_id, category_id, robot_name,
                                     enrolled_at, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING competitor_id, first_name, last_name, identity_document, birth_date, age,
                      email, phone, club_id, category_id, robot_name, enrolled_at, active
            "#,
        )
        .bind(&competitor.first_name)
        .bind(&competitor.last_name)
        .bind(&competitor.identity_document)
        .bind(competitor.birth_date)
        .bind(competitor.age)
        .bind(&competitor.email)
        .bind(&competitor.phone)
        .bind(competitor.club_id)
        .bind(competitor.category_id)
        .bind(&competitor.robot_name)
        .bind(competitor.enrolled_at)
        .bind(competitor.active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint(
                e,
                "Identity document already registered",
                "Competitor references an unknown club or category",
            )
        })?;

        Ok(competitor)
    }

    async fn save(&self, competitor: &Competitor) -> Result<Competitor> {
        let competitor = sqlx::query_as::<_, Competitor>(
            r#"
            UPDATE competitors
            SET first_name = $2,
                last_name = $3,
                identity_document = $4,
                birth_date = $5,
                age = $6,
                email = $7,
                phone = $8,
                club_id = $9,
                category_id = $10,
                robot_name = $11,
                active = $12
            WHERE competitor_id = $1
            RETURNING competitor_id, first_name, last_name, identity_document, birth_date, age,
                      email, phone, club_id, category_id, robot_name, enrolled_at, active
            "#,
        )
        .bind(competitor.competitor_id)
        .bind(&competitor.first_name)
        .bind(&competitor.last_name)
        .bind(&competitor.identity_document)
        .bind(competitor.birth_date)
        .bind(competitor.age)
        .bind(&competitor.email)
        .bind(&competitor.phone)
        .bind(competitor.club_id)
        .bind(competitor.category_id)
        .bind(&competitor.robot_name)
        .bind(competitor.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_constraint(
                e,
                "Identity document already registered",
                "Competitor references an unknown club or category",
            )
        })?
        .ok_or(StorageError::NotFound)?;

        Ok(competitor)
    }

    async fn delete_by_id(&self, id: i32) -> Result<()> {
        sqlx::query("DELETE FROM competitors WHERE competitor_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
