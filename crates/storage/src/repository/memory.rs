//! In-process gateway backend.
//!
//! Mirrors the unique columns and the competitor foreign keys of the SQL
//! schema so duplicate writes and blocked deletes fail the same way they would
//! against PostgreSQL.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CategoryStore, ClubStore, CompetitorStore, RoleStore, UserStore};
use crate::error::{Result, StorageError};
use crate::models::{
    Category, Club, ClubStatus, Competitor, NewCategory, NewClub, NewCompetitor, NewRole, NewUser,
    Role, User,
};

struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| predicate(row)).cloned().collect()
    }

    fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.rows.values().any(predicate)
    }

    fn replace(&mut self, id: i32, row: T) -> Result<T> {
        match self.rows.get_mut(&id) {
            Some(existing) => {
                *existing = row.clone();
                Ok(row)
            }
            None => Err(StorageError::NotFound),
        }
    }
}

#[derive(Default)]
struct Tables {
    clubs: Table<Club>,
    categories: Table<Category>,
    competitors: Table<Competitor>,
    users: Table<User>,
    roles: Table<Role>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

fn violation(message: &str) -> StorageError {
    StorageError::ConstraintViolation(message.to_string())
}

#[async_trait]
impl ClubStore for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Club>> {
        Ok(self.tables.read().await.clubs.get(id))
    }

    async fn find_all(&self) -> Result<Vec<Club>> {
        Ok(self.tables.read().await.clubs.filter(|_| true))
    }

    async fn find_by_status(&self, status: ClubStatus) -> Result<Vec<Club>> {
        Ok(self.tables.read().await.clubs.filter(|c| c.status == status))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool> {
        Ok(self.tables.read().await.clubs.rows.contains_key(&id))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        Ok(self.tables.read().await.clubs.any(|c| c.name == name))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(self
            .tables
            .read()
            .await
            .clubs
            .any(|c| c.representative_email == email))
    }

    async fn insert(&self, club: NewClub) -> Result<Club> {
        let mut tables = self.tables.write().await;
        if tables.clubs.any(|c| c.name == club.name) {
            return Err(violation("Club name already exists"));
        }
        let id = tables.clubs.next_id();
        let club = club.into_club(id);
        tables.clubs.rows.insert(id, club.clone());
        Ok(club)
    }

    async fn save(&self, club: &Club) -> Result<Club> {
        let mut tables = self.tables.write().await;
        if tables
            .clubs
            .any(|c| c.name == club.name && c.club_id != club.club_id)
        {
            return Err(violation("Club name already exists"));
        }
        tables.clubs.replace(club.club_id, club.clone())
    }

    async fn save_if_status(&self, club: &Club, expected: ClubStatus) -> Result<Option<Club>> {
        let mut tables = self.tables.write().await;
        match tables.clubs.get(club.club_id) {
            Some(current) if current.status == expected => {}
            _ => return Ok(None),
        }
        if tables
            .clubs
            .any(|c| c.name == club.name && c.club_id != club.club_id)
        {
            return Err(violation("Club name already exists"));
        }
        tables.clubs.replace(club.club_id, club.clone()).map(Some)
    }

    async fn delete_by_id(&self, id: i32) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.competitors.any(|c| c.club_id == id) {
            return Err(StorageError::ReferenceViolation(
                "Club still has enrolled competitors".to_string(),
            ));
        }
        tables.clubs.rows.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>> {
        Ok(self.tables.read().await.categories.get(id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self
            .tables
            .read()
            .await
            .categories
            .filter(|c| c.name == name)
            .into_iter()
            .next())
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        Ok(self.tables.read().await.categories.filter(|_| true))
    }

    async fn find_active(&self) -> Result<Vec<Category>> {
        Ok(self.tables.read().await.categories.filter(|c| c.active))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool> {
        Ok(self.tables.read().await.categories.rows.contains_key(&id))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        Ok(self.tables.read().await.categories.any(|c| c.name == name))
    }

    async fn insert(&self, category: NewCategory) -> Result<Category> {
        let mut tables = self.tables.write().await;
        if tables.categories.any(|c| c.name == category.name) {
            return Err(violation("Category name already exists"));
        }
        let id = tables.categories.next_id();
        let category = category.into_category(id);
        tables.categories.rows.insert(id, category.clone());
        Ok(category)
    }

    async fn save(&self, category: &Category) -> Result<Category> {
        let mut tables = self.tables.write().await;
        if tables
            .categories
            .any(|c| c.name == category.name && c.category_id != category.category_id)
        {
            return Err(violation("Category name already exists"));
        }
        tables
            .categories
            .replace(category.category_id, category.clone())
    }

    async fn delete_by_id(&self, id: i32) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.competitors.any(|c| c.category_id == id) {
            return Err(StorageError::ReferenceViolation(
                "Category still has enrolled competitors".to_string(),
            ));
        }
        tables.categories.rows.remove(&id);
        Ok(())
    }
}

fn same_document(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

#[async_trait]
impl CompetitorStore for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Competitor>> {
        Ok(self.tables.read().await.competitors.get(id))
    }

    async fn find_all(&self) -> Result<Vec<Competitor>> {
        Ok(self.tables.read().await.competitors.filter(|_| true))
    }

    async fn find_active(&self) -> Result<Vec<Competitor>> {
        Ok(self.tables.read().await.competitors.filter(|c| c.active))
    }

    async fn find_by_club(&self, club_id: i32) -> Result<Vec<Competitor>> {
        Ok(self
            .tables
            .read()
            .await
            .competitors
            .filter(|c| c.club_id == club_id))
    }

    async fn find_by_category(&self, category_id: i32) -> Result<Vec<Competitor>> {
        Ok(self
            .tables
            .read()
            .await
            .competitors
            .filter(|c| c.category_id == category_id))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool> {
        Ok(self.tables.read().await.competitors.rows.contains_key(&id))
    }

    async fn exists_by_document(&self, document: &str) -> Result<bool> {
        Ok(self
            .tables
            .read()
            .await
            .competitors
            .any(|c| c.identity_document.as_deref() == Some(document)))
    }

    async fn insert(&self, competitor: NewCompetitor) -> Result<Competitor> {
        let mut tables = self.tables.write().await;
        if tables
            .competitors
            .any(|c| same_document(&c.identity_document, &competitor.identity_document))
        {
            return Err(violation("Identity document already registered"));
        }
        if !tables.clubs.rows.contains_key(&competitor.club_id)
            || !tables.categories.rows.contains_key(&competitor.category_id)
        {
            return Err(StorageError::ReferenceViolation(
                "Competitor references an unknown club or category".to_string(),
            ));
        }
        let id = tables.competitors.next_id();
        let competitor = competitor.into_competitor(id);
        tables.competitors.rows.insert(id, competitor.clone());
        Ok(competitor)
    }

    async fn save(&self, competitor: &Competitor) -> Result<Competitor> {
        let mut tables = self.tables.write().await;
        if tables.competitors.any(|c| {
            c.competitor_id != competitor.competitor_id
                && same_document(&c.identity_document, &competitor.identity_document)
        }) {
            return Err(violation("Identity document already registered"));
        }
        tables
            .competitors
            .replace(competitor.competitor_id, competitor.clone())
    }

    async fn delete_by_id(&self, id: i32) -> Result<()> {
        self.tables.write().await.competitors.rows.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .filter(|u| u.email == email)
            .into_iter()
            .next())
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.tables.read().await.users.filter(|_| true))
    }

    async fn find_active(&self) -> Result<Vec<User>> {
        Ok(self.tables.read().await.users.filter(|u| u.active))
    }

    async fn find_by_role(&self, role_id: i32) -> Result<Vec<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .filter(|u| u.role_id == role_id))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(self.tables.read().await.users.any(|u| u.email == email))
    }

    async fn exists_by_phone(&self, phone: &str) -> Result<bool> {
        Ok(self.tables.read().await.users.any(|u| u.phone == phone))
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .any(|u| u.email == user.email || u.phone == user.phone)
        {
            return Err(violation("User email or phone already registered"));
        }
        let id = tables.users.next_id();
        let user = user.into_user(id);
        tables.users.rows.insert(id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<User> {
        let mut tables = self.tables.write().await;
        if tables.users.any(|u| {
            u.user_id != user.user_id && (u.email == user.email || u.phone == user.phone)
        }) {
            return Err(violation("User email or phone already registered"));
        }
        tables.users.replace(user.user_id, user.clone())
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Role>> {
        Ok(self.tables.read().await.roles.get(id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>> {
        Ok(self
            .tables
            .read()
            .await
            .roles
            .filter(|r| r.name == name)
            .into_iter()
            .next())
    }

    async fn find_all(&self) -> Result<Vec<Role>> {
        Ok(self.tables.read().await.roles.filter(|_| true))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        Ok(self.tables.read().await.roles.any(|r| r.name == name))
    }

    async fn insert(&self, role: NewRole) -> Result<Role> {
        let mut tables = self.tables.write().await;
        if tables.roles.any(|r| r.name == role.name) {
            return Err(violation("Role name already exists"));
        }
        let role_id = tables.roles.next_id();
        let role = Role {
            role_id,
            name: role.name,
            description: role.description,
        };
        tables.roles.rows.insert(role_id, role.clone());
        Ok(role)
    }
}
