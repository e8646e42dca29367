use async_trait::async_trait;
use sqlx::PgPool;

use super::{ClubStore, map_constraint};
use crate::error::{Result, StorageError};
use crate::models::{Club, ClubStatus, NewClub};

/// Repository for Club database operations
pub struct ClubRepository {
    pool: PgPool,
}

impl ClubRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClubStore for ClubRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Club>> {
        let club = sqlx::query_as::<_, Club>(
            r#"
            SELECT club_id, name, representative, representative_email, phone, address,
                   status, registered_at, validated_at, validated_by, observations
            FROM clubs
            WHERE club_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(club)
    }

    async fn find_all(&self) -> Result<Vec<Club>> {
        let clubs = sqlx::query_as::<_, Club>(
            r#"
            SELECT club_id, name, representative, representative_email, phone, address,
                   status, registered_at, validated_at, validated_by, observations
            FROM clubs
            ORDER BY club_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clubs)
    }

    async fn find_by_status(&self, status: ClubStatus) -> Result<Vec<Club>> {
        let clubs = sqlx::query_as::<_, Club>(
            r#"
            SELECT club_id, name, representative, representative_email, phone, address,
                   status, registered_at, validated_at, validated_by, observations
            FROM clubs
            WHERE status = $1
            ORDER BY club_id
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(clubs)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clubs WHERE club_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clubs WHERE name = $1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM clubs WHERE representative_email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert(&self, club: NewClub) -> Result<Club> {
        let club = sqlx::query_as::<_, Club>(
            r#"
            INSERT INTO clubs (name, representative, representative_email, phone, address,
                               status, registered_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING club_id, name, representative, representative_email, phone, address,
                      status, registered_at, validated_at, validated_by, observations
            "#,
        )
        .bind(&club.name)
        .bind(&club.representative)
        .bind(&club.representative_email)
        .bind(&club.phone)
        .bind(&club.address)
        .bind(club.status)
        .bind(club.registered_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint(
                e,
                "Club name already exists",
                "Club references an unknown user",
            )
        })?;

        Ok(club)
    }

    async fn save(&self, club: &Club) -> Result<Club> {
        let club = sqlx::query_as::<_, Club>(
            r#"
            UPDATE clubs
            SET name = $2,
                representative = $3,
                representative_email = $4,
                phone = $5,
                address = $6,
                status = $7,
                validated_at = $8,
                validated_by = $9,
                observations = $10
            WHERE club_id = $1
            RETURNING club_id, name, representative, representative_email, phone, address,
                      status, registered_at, validated_at, validated_by, observations
            "#,
        )
        .bind(club.club_id)
        .bind(&club.name)
        .bind(&club.representative)
        .bind(&club.representative_email)
        .bind(&club.phone)
        .bind(&club.address)
        .bind(club.status)
        .bind(club.validated_at)
        .bind(club.validated_by)
        .bind(&club.observations)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_constraint(
                e,
                "Club name already exists",
                "Club references an unknown user",
            )
        })?
        .ok_or(StorageError::NotFound)?;

        Ok(club)
    }

    async fn save_if_status(&self, club: &Club, expected: ClubStatus) -> Result<Option<Club>> {
        let club = sqlx::query_as::<_, Club>(
            r#"
            UPDATE clubs
            SET name = $2,
                representative = $3,
                representative_email = $4,
                phone = $5,
                address = $6,
                status = $7,
                validated_at = $8,
                validated_by = $9,
                observations = $10
            WHERE club_id = $1 AND status = $11
            RETURNING club_id, name, representative, representative_email, phone, address,
                      status, registered_at, validated_at, validated_by, observations
            "#,
        )
        .bind(club.club_id)
        .bind(&club.name)
        .bind(&club.representative)
        .bind(&club.representative_email)
        .bind(&club.phone)
        .bind(&club.address)
        .bind(club.status)
        .bind(club.validated_at)
        .bind(club.validated_by)
        .bind(&club.observations)
        .bind(expected)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_constraint(
                e,
                "Club name already exists",
                "Club references an unknown user",
            )
        })?;

        Ok(club)
    }

    async fn delete_by_id(&self, id: i32) -> Result<()> {
        sqlx::query("DELETE FROM clubs WHERE club_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_constraint(
                    e,
                    "Club name already exists",
                    "Club still has enrolled competitors",
                )
            })?;

        Ok(())
    }
}
