use crate::Database;
use crate::dto::club::{RegisterClubRequest, UpdateClubRequest};
use crate::error::{Entity, RegistryError, RegistryResult};
use crate::models::{Club, ClubStatus, NewClub};
use crate::repository::{ClubStore, UserStore};

use super::now;

/// Club registration and the admin-gated validation workflow.
pub struct ClubService<'a> {
    clubs: &'a dyn ClubStore,
    users: &'a dyn UserStore,
}

impl<'a> ClubService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            clubs: db.clubs(),
            users: db.users(),
        }
    }

    /// Register a club. It always starts out pending.
    pub async fn register(&self, req: &RegisterClubRequest) -> RegistryResult<Club> {
        if self.clubs.exists_by_name(&req.name).await? {
            return Err(RegistryError::duplicate(Entity::Club, "name", &req.name));
        }

        if self.clubs.exists_by_email(&req.representative_email).await? {
            return Err(RegistryError::duplicate(
                Entity::Club,
                "representative_email",
                &req.representative_email,
            ));
        }

        let club = self
            .clubs
            .insert(NewClub {
                name: req.name.clone(),
                representative: req.representative.clone(),
                representative_email: req.representative_email.clone(),
                phone: req.phone.clone(),
                address: req.address.clone(),
                status: ClubStatus::Pending,
                registered_at: now(),
            })
            .await?;

        tracing::info!(club_id = club.club_id, name = %club.name, "Club registered");
        Ok(club)
    }

    /// Move a pending club to active.
    pub async fn approve(&self, club_id: i32, admin_id: i32) -> RegistryResult<Club> {
        let mut club = self.get(club_id).await?;
        let admin = self
            .users
            .find_by_id(admin_id)
            .await?
            .ok_or(RegistryError::NotFound {
                entity: Entity::User,
                id: admin_id,
            })?;

        if club.status != ClubStatus::Pending {
            tracing::warn!(club_id, status = %club.status, "Approval refused");
            return Err(RegistryError::InvalidTransition {
                id: club_id,
                from: club.status,
                to: ClubStatus::Active,
            });
        }

        club.status = ClubStatus::Active;
        club.validated_at = Some(now());
        club.validated_by = Some(admin.user_id);

        // Lands only while the stored row is still pending.
        let Some(club) = self
            .clubs
            .save_if_status(&club, ClubStatus::Pending)
            .await?
        else {
            let current = self.get(club_id).await?;
            tracing::warn!(club_id, status = %current.status, "Approval lost to a concurrent change");
            return Err(RegistryError::InvalidTransition {
                id: club_id,
                from: current.status,
                to: ClubStatus::Active,
            });
        };

        tracing::info!(club_id, admin_id, "Club approved");
        Ok(club)
    }

    /// Reject a club from whatever state it is in.
    pub async fn reject(
        &self,
        club_id: i32,
        admin_id: i32,
        observations: Option<String>,
    ) -> RegistryResult<Club> {
        let mut club = self.get(club_id).await?;
        let admin = self
            .users
            .find_by_id(admin_id)
            .await?
            .ok_or(RegistryError::NotFound {
                entity: Entity::User,
                id: admin_id,
            })?;

        // Unlike approve, the current state is not checked.
        club.status = ClubStatus::Rejected;
        club.validated_at = Some(now());
        club.validated_by = Some(admin.user_id);
        club.observations = observations;

        let club = self.clubs.save(&club).await?;
        tracing::info!(club_id, admin_id, "Club rejected");
        Ok(club)
    }

    /// Overwrite the descriptive fields. Name and email uniqueness is not
    /// re-checked here.
    pub async fn update(&self, club_id: i32, req: &UpdateClubRequest) -> RegistryResult<Club> {
        let mut club = self.get(club_id).await?;

        club.name = req.name.clone();
        club.representative = req.representative.clone();
        club.representative_email = req.representative_email.clone();
        club.phone = req.phone.clone();
        club.address = req.address.clone();

        Ok(self.clubs.save(&club).await?)
    }

    pub async fn delete(&self, club_id: i32) -> RegistryResult<()> {
        if !self.clubs.exists_by_id(club_id).await? {
            return Err(RegistryError::NotFound {
                entity: Entity::Club,
                id: club_id,
            });
        }
        self.clubs.delete_by_id(club_id).await?;
        tracing::info!(club_id, "Club deleted");
        Ok(())
    }

    pub async fn get(&self, club_id: i32) -> RegistryResult<Club> {
        self.clubs
            .find_by_id(club_id)
            .await?
            .ok_or(RegistryError::NotFound {
                entity: Entity::Club,
                id: club_id,
            })
    }

    pub async fn list(&self, status: Option<ClubStatus>) -> RegistryResult<Vec<Club>> {
        let clubs = match status {
            Some(status) => self.clubs.find_by_status(status).await?,
            None => self.clubs.find_all().await?,
        };
        Ok(clubs)
    }

    pub async fn list_pending(&self) -> RegistryResult<Vec<Club>> {
        self.list(Some(ClubStatus::Pending)).await
    }

    pub async fn list_active(&self) -> RegistryResult<Vec<Club>> {
        self.list(Some(ClubStatus::Active)).await
    }
}
