use crate::Database;
use crate::dto::competitor::{EnrollCompetitorRequest, UpdateCompetitorRequest};
use crate::error::{Entity, RegistryError, RegistryResult};
use crate::models::{Category, Club, ClubStatus, Competitor, CompetitorDetail, NewCompetitor};
use crate::repository::{CategoryStore, ClubStore, CompetitorStore};

use super::now;

/// Competitor enrollment and maintenance.
pub struct CompetitorService<'a> {
    competitors: &'a dyn CompetitorStore,
    clubs: &'a dyn ClubStore,
    categories: &'a dyn CategoryStore,
}

impl<'a> CompetitorService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            competitors: db.competitors(),
            clubs: db.clubs(),
            categories: db.categories(),
        }
    }

    /// Admit a competitor into an active club and category.
    ///
    /// Checks run in a fixed order and the first failure is reported: club
    /// exists, club is active, category exists, category is active, age fits
    /// the category, identity document is unused.
    pub async fn enroll(&self, req: &EnrollCompetitorRequest) -> RegistryResult<CompetitorDetail> {
        let club = self
            .clubs
            .find_by_id(req.club_id)
            .await?
            .ok_or(RegistryError::ClubNotFound(req.club_id))?;

        if club.status != ClubStatus::Active {
            return Err(RegistryError::ClubNotActive {
                id: club.club_id,
                status: club.status,
            });
        }

        let category = self
            .categories
            .find_by_id(req.category_id)
            .await?
            .ok_or(RegistryError::CategoryNotFound(req.category_id))?;

        if !category.active {
            return Err(RegistryError::CategoryInactive(category.category_id));
        }

        // Skipped unless the age and both bounds are all known.
        if let (Some(age), Some((min, max))) = (req.age, category.age_bounds()) {
            if age < min || age > max {
                return Err(RegistryError::AgeOutOfRange { age, min, max });
            }
        }

        if let Some(document) = &req.identity_document {
            if self.competitors.exists_by_document(document).await? {
                return Err(RegistryError::duplicate(
                    Entity::Competitor,
                    "identity_document",
                    document,
                ));
            }
        }

        let competitor = self
            .competitors
            .insert(NewCompetitor {
                first_name: req.first_name.clone(),
                last_name: req.last_name.clone(),
                identity_document: req.identity_document.clone(),
                birth_date: req.birth_date,
                age: req.age,
                email: req.email.clone(),
                phone: req.phone.clone(),
                club_id: club.club_id,
                category_id: category.category_id,
                robot_name: req.robot_name.clone(),
                enrolled_at: now(),
                active: true,
            })
            .await?;

        tracing::info!(
            competitor_id = competitor.competitor_id,
            club_id = club.club_id,
            category_id = category.category_id,
            "Competitor enrolled"
        );

        Ok(CompetitorDetail {
            competitor,
            club,
            category,
        })
    }

    /// Overwrite personal data. Enrollment rules are not re-validated.
    pub async fn update(
        &self,
        competitor_id: i32,
        req: &UpdateCompetitorRequest,
    ) -> RegistryResult<Competitor> {
        let mut competitor = self.find(competitor_id).await?;

        competitor.first_name = req.first_name.clone();
        competitor.last_name = req.last_name.clone();
        competitor.identity_document = req.identity_document.clone();
        competitor.birth_date = req.birth_date;
        competitor.age = req.age;
        competitor.email = req.email.clone();
        competitor.phone = req.phone.clone();
        competitor.robot_name = req.robot_name.clone();

        Ok(self.competitors.save(&competitor).await?)
    }

    pub async fn set_active(&self, competitor_id: i32, active: bool) -> RegistryResult<Competitor> {
        let mut competitor = self.find(competitor_id).await?;
        competitor.active = active;
        Ok(self.competitors.save(&competitor).await?)
    }

    pub async fn delete(&self, competitor_id: i32) -> RegistryResult<()> {
        if !self.competitors.exists_by_id(competitor_id).await? {
            return Err(RegistryError::NotFound {
                entity: Entity::Competitor,
                id: competitor_id,
            });
        }
        self.competitors.delete_by_id(competitor_id).await?;
        tracing::info!(competitor_id, "Competitor deleted");
        Ok(())
    }

    /// Fetch a competitor with its club and category joined on.
    pub async fn get(&self, competitor_id: i32) -> RegistryResult<CompetitorDetail> {
        let competitor = self.find(competitor_id).await?;
        self.resolve(competitor).await
    }

    pub async fn resolve(&self, competitor: Competitor) -> RegistryResult<CompetitorDetail> {
        let club: Club = self
            .clubs
            .find_by_id(competitor.club_id)
            .await?
            .ok_or(RegistryError::NotFound {
                entity: Entity::Club,
                id: competitor.club_id,
            })?;
        let category: Category = self
            .categories
            .find_by_id(competitor.category_id)
            .await?
            .ok_or(RegistryError::NotFound {
                entity: Entity::Category,
                id: competitor.category_id,
            })?;

        Ok(CompetitorDetail {
            competitor,
            club,
            category,
        })
    }

    async fn find(&self, competitor_id: i32) -> RegistryResult<Competitor> {
        self.competitors
            .find_by_id(competitor_id)
            .await?
            .ok_or(RegistryError::NotFound {
                entity: Entity::Competitor,
                id: competitor_id,
            })
    }

    pub async fn list(&self) -> RegistryResult<Vec<Competitor>> {
        Ok(self.competitors.find_all().await?)
    }

    pub async fn list_active(&self) -> RegistryResult<Vec<Competitor>> {
        Ok(self.competitors.find_active().await?)
    }

    pub async fn list_by_club(&self, club_id: i32) -> RegistryResult<Vec<Competitor>> {
        Ok(self.competitors.find_by_club(club_id).await?)
    }

    pub async fn list_by_category(&self, category_id: i32) -> RegistryResult<Vec<Competitor>> {
        Ok(self.competitors.find_by_category(category_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::services::categories::tests::category_request;
    use crate::services::clubs::tests::{register_request, seed_admin};
    use crate::services::{CategoryService, ClubService};

    struct Fixture {
        db: Database,
        club_id: i32,
        category_id: i32,
        admin_id: i32,
    }

    /// A pending club "RoboX" and an active "Junior" (10-15) category.
    async fn fixture() -> Fixture {
        let db = Database::in_memory();
        let admin_id = seed_admin(&db).await;
        let club = ClubService::new(&db)
            .register(&register_request("RoboX", "r@x.com"))
            .await
            .unwrap();
        let category = CategoryService::new(&db)
            .create(&category_request("Junior", Some(10), Some(15)))
            .await
            .unwrap();
        Fixture {
            db,
            club_id: club.club_id,
            category_id: category.category_id,
            admin_id,
        }
    }

    async fn approve(fx: &Fixture) {
        ClubService::new(&fx.db)
            .approve(fx.club_id, fx.admin_id)
            .await
            .unwrap();
    }

    fn enroll_request(club_id: i32, category_id: i32, age: Option<i32>) -> EnrollCompetitorRequest {
        EnrollCompetitorRequest {
            first_name: "Mateo".to_string(),
            last_name: "Quispe".to_string(),
            identity_document: Some("12345678".to_string()),
            birth_date: None,
            age,
            email: Some("mateo@x.com".to_string()),
            phone: None,
            club_id,
            category_id,
            robot_name: Some("Tornado".to_string()),
        }
    }

    #[tokio::test]
    async fn test_enroll_into_pending_club_fails() {
        let fx = fixture().await;
        let err = CompetitorService::new(&fx.db)
            .enroll(&enroll_request(fx.club_id, fx.category_id, Some(12)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::ClubNotActive {
                status: ClubStatus::Pending,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_enroll_into_inactive_category_fails() {
        let fx = fixture().await;
        approve(&fx).await;
        CategoryService::new(&fx.db)
            .set_active(fx.category_id, false)
            .await
            .unwrap();

        let err = CompetitorService::new(&fx.db)
            .enroll(&enroll_request(fx.club_id, fx.category_id, Some(12)))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::CategoryInactive(_)));
    }

    #[tokio::test]
    async fn test_enroll_age_bounds_are_inclusive() {
        let fx = fixture().await;
        approve(&fx).await;
        let service = CompetitorService::new(&fx.db);

        for age in [9, 16] {
            let mut req = enroll_request(fx.club_id, fx.category_id, Some(age));
            req.identity_document = None;
            let err = service.enroll(&req).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidRange, "age {age}");
        }

        for age in [10, 15] {
            let mut req = enroll_request(fx.club_id, fx.category_id, Some(age));
            req.identity_document = None;
            assert!(service.enroll(&req).await.is_ok(), "age {age}");
        }
    }

    #[tokio::test]
    async fn test_age_check_skipped_when_anything_is_unknown() {
        let fx = fixture().await;
        approve(&fx).await;
        let open = CategoryService::new(&fx.db)
            .create(&category_request("Open", Some(18), None))
            .await
            .unwrap();
        let service = CompetitorService::new(&fx.db);

        let mut req = enroll_request(fx.club_id, fx.category_id, None);
        req.identity_document = None;
        assert!(service.enroll(&req).await.is_ok());

        let mut req = enroll_request(fx.club_id, open.category_id, Some(5));
        req.identity_document = None;
        assert!(service.enroll(&req).await.is_ok());
    }

    #[tokio::test]
    async fn test_enroll_success_binds_references() {
        let fx = fixture().await;
        approve(&fx).await;

        let detail = CompetitorService::new(&fx.db)
            .enroll(&enroll_request(fx.club_id, fx.category_id, Some(12)))
            .await
            .unwrap();

        assert!(detail.competitor.active);
        assert_eq!(detail.club.club_id, fx.club_id);
        assert_eq!(detail.club.status, ClubStatus::Active);
        assert_eq!(detail.category.name, "Junior");
        assert_eq!(detail.competitor.full_name(), "Mateo Quispe");
    }

    #[tokio::test]
    async fn test_duplicate_document_is_rejected() {
        let fx = fixture().await;
        approve(&fx).await;
        let service = CompetitorService::new(&fx.db);
        service
            .enroll(&enroll_request(fx.club_id, fx.category_id, Some(12)))
            .await
            .unwrap();

        let err = service
            .enroll(&enroll_request(fx.club_id, fx.category_id, Some(13)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Duplicate {
                field: "identity_document",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_documents_never_collide() {
        let fx = fixture().await;
        approve(&fx).await;
        let service = CompetitorService::new(&fx.db);

        for _ in 0..2 {
            let mut req = enroll_request(fx.club_id, fx.category_id, Some(12));
            req.identity_document = None;
            service.enroll(&req).await.unwrap();
        }
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_first_failing_check_wins() {
        let fx = fixture().await;
        let service = CompetitorService::new(&fx.db);

        // Unknown club, unknown category, out-of-range age: the club is reported.
        let err = service
            .enroll(&enroll_request(404, 405, Some(99)))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::ClubNotFound(404)));

        // Pending club and unknown category: the club state is reported.
        let err = service
            .enroll(&enroll_request(fx.club_id, 405, Some(99)))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::ClubNotActive { .. }));

        approve(&fx).await;
        let err = service
            .enroll(&enroll_request(fx.club_id, 405, Some(99)))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::CategoryNotFound(405)));
    }

    #[tokio::test]
    async fn test_update_skips_enrollment_rules() {
        let fx = fixture().await;
        approve(&fx).await;
        let service = CompetitorService::new(&fx.db);
        let detail = service
            .enroll(&enroll_request(fx.club_id, fx.category_id, Some(12)))
            .await
            .unwrap();

        let updated = service
            .update(
                detail.competitor.competitor_id,
                &UpdateCompetitorRequest {
                    first_name: "Mateo".to_string(),
                    last_name: "Quispe".to_string(),
                    identity_document: Some("87654321".to_string()),
                    birth_date: None,
                    age: Some(40),
                    email: None,
                    phone: None,
                    robot_name: Some("Ciclón".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.age, Some(40));
        assert_eq!(updated.enrolled_at, detail.competitor.enrolled_at);
        assert_eq!(updated.club_id, fx.club_id);
    }

    #[tokio::test]
    async fn test_state_toggle_and_filters() {
        let fx = fixture().await;
        approve(&fx).await;
        let service = CompetitorService::new(&fx.db);
        let detail = service
            .enroll(&enroll_request(fx.club_id, fx.category_id, Some(12)))
            .await
            .unwrap();
        let id = detail.competitor.competitor_id;

        let inactive = service.set_active(id, false).await.unwrap();
        assert!(!inactive.active);
        assert!(service.list_active().await.unwrap().is_empty());
        assert_eq!(service.list_by_club(fx.club_id).await.unwrap().len(), 1);
        assert_eq!(
            service.list_by_category(fx.category_id).await.unwrap().len(),
            1
        );
        assert!(service.list_by_club(fx.club_id + 1).await.unwrap().is_empty());

        let fetched = service.get(id).await.unwrap();
        assert_eq!(fetched.club.name, "RoboX");

        service.delete(id).await.unwrap();
        assert_eq!(service.get(id).await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(service.delete(id).await.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_club_and_category_with_competitors_cannot_be_deleted() {
        let fx = fixture().await;
        approve(&fx).await;
        let detail = CompetitorService::new(&fx.db)
            .enroll(&enroll_request(fx.club_id, fx.category_id, Some(12)))
            .await
            .unwrap();

        let err = ClubService::new(&fx.db)
            .delete(fx.club_id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StillReferenced);

        let err = CategoryService::new(&fx.db)
            .delete(fx.category_id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StillReferenced);

        let resolved = CompetitorService::new(&fx.db)
            .get(detail.competitor.competitor_id)
            .await
            .unwrap();
        assert_eq!(resolved.club.club_id, fx.club_id);
        assert_eq!(resolved.category.category_id, fx.category_id);

        CompetitorService::new(&fx.db)
            .delete(detail.competitor.competitor_id)
            .await
            .unwrap();
        ClubService::new(&fx.db).delete(fx.club_id).await.unwrap();
        CategoryService::new(&fx.db)
            .delete(fx.category_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_listings_follow_enrollment_order() {
        let fx = fixture().await;
        approve(&fx).await;
        let service = CompetitorService::new(&fx.db);

        let mut zapata = enroll_request(fx.club_id, fx.category_id, Some(12));
        zapata.last_name = "Zapata".to_string();
        zapata.identity_document = Some("11111111".to_string());
        let mut alvarez = enroll_request(fx.club_id, fx.category_id, Some(13));
        alvarez.last_name = "Alvarez".to_string();
        alvarez.identity_document = Some("22222222".to_string());

        let first = service.enroll(&zapata).await.unwrap().competitor;
        let second = service.enroll(&alvarez).await.unwrap().competitor;

        let ids: Vec<i32> = service
            .list()
            .await
            .unwrap()
            .iter()
            .map(|c| c.competitor_id)
            .collect();
        assert_eq!(ids, vec![first.competitor_id, second.competitor_id]);
        let by_club: Vec<String> = service
            .list_by_club(fx.club_id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.last_name)
            .collect();
        assert_eq!(by_club, vec!["Zapata", "Alvarez"]);
    }
}
