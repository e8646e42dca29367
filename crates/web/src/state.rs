use std::sync::Arc;

use storage::Database;
use storage::services::{Argon2Hasher, CategoryService, CredentialHasher, UserService};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub hasher: Arc<dyn CredentialHasher>,
    pub strict_age_bounds: bool,
}

impl AppState {
    pub fn new(db: Database, strict_age_bounds: bool) -> Self {
        Self {
            db,
            hasher: Arc::new(Argon2Hasher),
            strict_age_bounds,
        }
    }

    pub fn categories(&self) -> CategoryService<'_> {
        CategoryService::new(&self.db).with_strict_age_bounds(self.strict_age_bounds)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(&self.db, self.hasher.as_ref())
    }
}
