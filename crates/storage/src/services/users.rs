use crate::Database;
use crate::dto::user::{CreateRoleRequest, CreateUserRequest};
use crate::error::{Entity, RegistryError, RegistryResult};
use crate::models::{NewRole, NewUser, Role, User};
use crate::repository::{RoleStore, UserStore};

use super::credentials::CredentialHasher;
use super::now;

/// Platform users, their credentials and role assignment.
pub struct UserService<'a> {
    users: &'a dyn UserStore,
    roles: &'a dyn RoleStore,
    hasher: &'a dyn CredentialHasher,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a Database, hasher: &'a dyn CredentialHasher) -> Self {
        Self {
            users: db.users(),
            roles: db.roles(),
            hasher,
        }
    }

    /// Verify credentials and stamp the last access time.
    ///
    /// Unknown email, inactive account and wrong secret all collapse into
    /// `Unauthenticated`.
    pub async fn authenticate(&self, email: &str, password: &str) -> RegistryResult<User> {
        let Some(mut user) = self.users.find_by_email(email).await? else {
            tracing::warn!("Login attempt for unknown account");
            return Err(RegistryError::Unauthenticated);
        };

        if !user.active || !self.hasher.verify(password, &user.password_hash) {
            tracing::warn!(user_id = user.user_id, "Login attempt rejected");
            return Err(RegistryError::Unauthenticated);
        }

        user.last_access_at = Some(now());
        let user = self.users.save(&user).await?;
        tracing::info!(user_id = user.user_id, "User authenticated");
        Ok(user)
    }

    pub async fn create(&self, req: &CreateUserRequest) -> RegistryResult<User> {
        if self.users.exists_by_email(&req.email).await? {
            return Err(RegistryError::duplicate(Entity::User, "email", &req.email));
        }

        if self.users.exists_by_phone(&req.phone).await? {
            return Err(RegistryError::duplicate(Entity::User, "phone", &req.phone));
        }

        let password = match req.password.as_deref() {
            Some(password) if !password.is_empty() => password,
            _ => return Err(RegistryError::MissingField("password")),
        };

        if self.roles.find_by_id(req.role_id).await?.is_none() {
            return Err(RegistryError::NotFound {
                entity: Entity::Role,
                id: req.role_id,
            });
        }

        let user = self
            .users
            .insert(NewUser {
                name: req.name.clone(),
                email: req.email.clone(),
                password_hash: self.hasher.hash(password)?,
                phone: req.phone.clone(),
                role_id: req.role_id,
                active: req.active,
            })
            .await?;

        tracing::info!(user_id = user.user_id, role_id = user.role_id, "User created");
        Ok(user)
    }

    pub async fn assign_role(&self, user_id: i32, role_id: i32) -> RegistryResult<User> {
        let mut user = self.get(user_id).await?;
        let role = self
            .roles
            .find_by_id(role_id)
            .await?
            .ok_or(RegistryError::NotFound {
                entity: Entity::Role,
                id: role_id,
            })?;

        user.role_id = role.role_id;
        let user = self.users.save(&user).await?;
        tracing::info!(user_id, role = %role.name, "Role assigned");
        Ok(user)
    }

    pub async fn set_active(&self, user_id: i32, active: bool) -> RegistryResult<User> {
        let mut user = self.get(user_id).await?;
        user.active = active;
        Ok(self.users.save(&user).await?)
    }

    pub async fn get(&self, user_id: i32) -> RegistryResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(RegistryError::NotFound {
                entity: Entity::User,
                id: user_id,
            })
    }

    pub async fn find_by_email(&self, email: &str) -> RegistryResult<Option<User>> {
        Ok(self.users.find_by_email(email).await?)
    }

    pub async fn list(&self) -> RegistryResult<Vec<User>> {
        Ok(self.users.find_all().await?)
    }

    pub async fn list_active(&self) -> RegistryResult<Vec<User>> {
        Ok(self.users.find_active().await?)
    }

    pub async fn list_by_role(&self, role_id: i32) -> RegistryResult<Vec<User>> {
        Ok(self.users.find_by_role(role_id).await?)
    }

    pub async fn list_roles(&self) -> RegistryResult<Vec<Role>> {
        Ok(self.roles.find_all().await?)
    }

    pub async fn find_role_by_name(&self, name: &str) -> RegistryResult<Option<Role>> {
        Ok(self.roles.find_by_name(name).await?)
    }

    pub async fn get_role_by_name(&self, name: &str) -> RegistryResult<Role> {
        self.roles
            .find_by_name(name)
            .await?
            .ok_or_else(|| RegistryError::NamedNotFound {
                entity: Entity::Role,
                name: name.to_string(),
            })
    }

    pub async fn create_role(&self, req: &CreateRoleRequest) -> RegistryResult<Role> {
        if self.roles.exists_by_name(&req.name).await? {
            return Err(RegistryError::duplicate(Entity::Role, "name", &req.name));
        }

        Ok(self
            .roles
            .insert(NewRole {
                name: req.name.clone(),
                description: req.description.clone(),
            })
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::services::credentials::PlainHasher;

    async fn seed_roles(service: &UserService<'_>) -> (Role, Role) {
        let admin = service
            .create_role(&CreateRoleRequest {
                name: "admin".to_string(),
                description: None,
            })
            .await
            .unwrap();
        let rep = service
            .create_role(&CreateRoleRequest {
                name: "club_representative".to_string(),
                description: None,
            })
            .await
            .unwrap();
        (admin, rep)
    }

    fn user_request(email: &str, phone: &str, role_id: i32) -> CreateUserRequest {
        CreateUserRequest {
            name: "Rosa".to_string(),
            email: email.to_string(),
            password: Some("admin123".to_string()),
            phone: phone.to_string(),
            role_id,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_create_hashes_secret() {
        let db = Database::in_memory();
        let service = UserService::new(&db, &PlainHasher);
        let (admin, _) = seed_roles(&service).await;

        let user = service
            .create(&user_request("rosa@x.com", "911", admin.role_id))
            .await
            .unwrap();
        assert_eq!(user.password_hash, "plain$admin123");
        assert!(user.last_access_at.is_none());
    }

    #[tokio::test]
    async fn test_create_checks_in_order() {
        let db = Database::in_memory();
        let service = UserService::new(&db, &PlainHasher);
        let (admin, _) = seed_roles(&service).await;
        service
            .create(&user_request("rosa@x.com", "911", admin.role_id))
            .await
            .unwrap();

        // Email clash is reported even when the phone and secret are also bad.
        let mut req = user_request("rosa@x.com", "911", admin.role_id);
        req.password = None;
        let err = service.create(&req).await.unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { field: "email", .. }));

        let mut req = user_request("otra@x.com", "911", admin.role_id);
        req.password = None;
        let err = service.create(&req).await.unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { field: "phone", .. }));

        let mut req = user_request("otra@x.com", "912", admin.role_id);
        req.password = Some(String::new());
        let err = service.create(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);

        let err = service
            .create(&user_request("otra@x.com", "912", 77))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_authenticate_stamps_last_access() {
        let db = Database::in_memory();
        let service = UserService::new(&db, &PlainHasher);
        let (admin, _) = seed_roles(&service).await;
        service
            .create(&user_request("rosa@x.com", "911", admin.role_id))
            .await
            .unwrap();

        let user = service.authenticate("rosa@x.com", "admin123").await.unwrap();
        assert!(user.last_access_at.is_some());
        assert_eq!(
            service.get(user.user_id).await.unwrap().last_access_at,
            user.last_access_at
        );
    }

    #[tokio::test]
    async fn test_failed_logins_are_indistinguishable() {
        let db = Database::in_memory();
        let service = UserService::new(&db, &PlainHasher);
        let (admin, _) = seed_roles(&service).await;
        service
            .create(&user_request("rosa@x.com", "911", admin.role_id))
            .await
            .unwrap();
        let mut inactive = user_request("ivan@x.com", "912", admin.role_id);
        inactive.active = false;
        service.create(&inactive).await.unwrap();

        let outcomes = [
            service.authenticate("rosa@x.com", "wrong").await,
            service.authenticate("ivan@x.com", "admin123").await,
            service.authenticate("nadie@x.com", "admin123").await,
        ];

        for outcome in outcomes {
            let err = outcome.unwrap_err();
            assert!(matches!(err, RegistryError::Unauthenticated));
            assert_eq!(err.to_string(), "Invalid credentials");
        }
    }

    #[tokio::test]
    async fn test_assign_role_and_filters() {
        let db = Database::in_memory();
        let service = UserService::new(&db, &PlainHasher);
        let (admin, rep) = seed_roles(&service).await;
        let user = service
            .create(&user_request("rosa@x.com", "911", rep.role_id))
            .await
            .unwrap();

        let promoted = service.assign_role(user.user_id, admin.role_id).await.unwrap();
        assert_eq!(promoted.role_id, admin.role_id);
        assert_eq!(service.list_by_role(admin.role_id).await.unwrap().len(), 1);
        assert!(service.list_by_role(rep.role_id).await.unwrap().is_empty());

        let err = service.assign_role(user.user_id, 99).await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::NotFound {
                entity: Entity::Role,
                ..
            }
        ));
        let err = service.assign_role(99, admin.role_id).await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::NotFound {
                entity: Entity::User,
                ..
            }
        ));

        service.set_active(user.user_id, false).await.unwrap();
        assert!(service.list_active().await.unwrap().is_empty());
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_role_names_are_unique() {
        let db = Database::in_memory();
        let service = UserService::new(&db, &PlainHasher);
        seed_roles(&service).await;

        let err = service
            .create_role(&CreateRoleRequest {
                name: "admin".to_string(),
                description: Some("again".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateConstraint);
        assert_eq!(service.list_roles().await.unwrap().len(), 2);
        assert!(service.find_role_by_name("admin").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unknown_role_name_is_reported_by_name() {
        let db = Database::in_memory();
        let service = UserService::new(&db, &PlainHasher);
        seed_roles(&service).await;

        assert_eq!(service.get_role_by_name("admin").await.unwrap().name, "admin");

        let err = service.get_role_by_name("judge").await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::NamedNotFound {
                entity: Entity::Role,
                ref name,
            } if name == "judge"
        ));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
