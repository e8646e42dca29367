use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

use error::Result;
use repository::memory::MemoryStore;
use repository::{
    CategoryRepository, CategoryStore, ClubRepository, ClubStore, CompetitorRepository,
    CompetitorStore, RoleRepository, RoleStore, UserRepository, UserStore,
};

/// Handle to the persistence gateway shared by every request.
///
/// Backed either by PostgreSQL or, when no database is configured, by an
/// in-process store that enforces the same unique columns as the schema.
#[derive(Clone)]
pub struct Database {
    pool: Option<PgPool>,
    clubs: Arc<dyn ClubStore>,
    categories: Arc<dyn CategoryStore>,
    competitors: Arc<dyn CompetitorStore>,
    users: Arc<dyn UserStore>,
    roles: Arc<dyn RoleStore>,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self {
            clubs: Arc::new(ClubRepository::new(pool.clone())),
            categories: Arc::new(CategoryRepository::new(pool.clone())),
            competitors: Arc::new(CompetitorRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool.clone())),
            roles: Arc::new(RoleRepository::new(pool.clone())),
            pool: Some(pool),
        })
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::default());

        Self {
            pool: None,
            clubs: store.clone(),
            categories: store.clone(),
            competitors: store.clone(),
            users: store.clone(),
            roles: store,
        }
    }

    /// Apply pending migrations. No-op for the in-memory backend.
    pub async fn run_migrations(&self) -> Result<()> {
        if let Some(pool) = &self.pool {
            sqlx::migrate!("./migrations").run(pool).await?;
        }
        Ok(())
    }

    pub fn is_persistent(&self) -> bool {
        self.pool.is_some()
    }

    pub fn clubs(&self) -> &dyn ClubStore {
        self.clubs.as_ref()
    }

    pub fn categories(&self) -> &dyn CategoryStore {
        self.categories.as_ref()
    }

    pub fn competitors(&self) -> &dyn CompetitorStore {
        self.competitors.as_ref()
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    pub fn roles(&self) -> &dyn RoleStore {
        self.roles.as_ref()
    }
}
