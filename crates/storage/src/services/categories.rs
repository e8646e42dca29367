use crate::Database;
use crate::dto::category::CategoryRequest;
use crate::error::{Entity, RegistryError, RegistryResult};
use crate::models::{Category, NewCategory};
use crate::repository::CategoryStore;

/// Competitor category definitions.
pub struct CategoryService<'a> {
    categories: &'a dyn CategoryStore,
    strict_age_bounds: bool,
}

impl<'a> CategoryService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            categories: db.categories(),
            strict_age_bounds: false,
        }
    }

    /// Reject categories whose minimum age exceeds the maximum age.
    ///
    /// Off by default so rows written without the check keep round-tripping.
    pub fn with_strict_age_bounds(mut self, strict: bool) -> Self {
        self.strict_age_bounds = strict;
        self
    }

    fn check_bounds(&self, req: &CategoryRequest) -> RegistryResult<()> {
        if !self.strict_age_bounds {
            return Ok(());
        }
        match (req.min_age, req.max_age) {
            (Some(min), Some(max)) if min > max => Err(RegistryError::InvalidAgeBounds { min, max }),
            _ => Ok(()),
        }
    }

    pub async fn create(&self, req: &CategoryRequest) -> RegistryResult<Category> {
        if self.categories.exists_by_name(&req.name).await? {
            return Err(RegistryError::duplicate(Entity::Category, "name", &req.name));
        }
        self.check_bounds(req)?;

        let category = self
            .categories
            .insert(NewCategory {
                name: req.name.clone(),
                description: req.description.clone(),
                min_age: req.min_age,
                max_age: req.max_age,
                active: req.active,
            })
            .await?;

        tracing::info!(category_id = category.category_id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Replace a category's fields. The name is only re-checked for
    /// uniqueness when it changes.
    pub async fn update(&self, category_id: i32, req: &CategoryRequest) -> RegistryResult<Category> {
        let mut category = self.get(category_id).await?;

        if category.name != req.name && self.categories.exists_by_name(&req.name).await? {
            return Err(RegistryError::duplicate(Entity::Category, "name", &req.name));
        }
        self.check_bounds(req)?;

        category.name = req.name.clone();
        category.description = req.description.clone();
        category.min_age = req.min_age;
        category.max_age = req.max_age;
        category.active = req.active;

        Ok(self.categories.save(&category).await?)
    }

    /// Hard delete. Refused with `StillReferenced` while competitors point
    /// at the category.
    pub async fn delete(&self, category_id: i32) -> RegistryResult<()> {
        if !self.categories.exists_by_id(category_id).await? {
            return Err(RegistryError::NotFound {
                entity: Entity::Category,
                id: category_id,
            });
        }
        self.categories.delete_by_id(category_id).await?;
        tracing::info!(category_id, "Category deleted");
        Ok(())
    }

    pub async fn set_active(&self, category_id: i32, active: bool) -> RegistryResult<Category> {
        let mut category = self.get(category_id).await?;
        category.active = active;
        Ok(self.categories.save(&category).await?)
    }

    pub async fn get(&self, category_id: i32) -> RegistryResult<Category> {
        self.categories
            .find_by_id(category_id)
            .await?
            .ok_or(RegistryError::NotFound {
                entity: Entity::Category,
                id: category_id,
            })
    }

    pub async fn find_by_name(&self, name: &str) -> RegistryResult<Option<Category>> {
        Ok(self.categories.find_by_name(name).await?)
    }

    pub async fn list(&self) -> RegistryResult<Vec<Category>> {
        Ok(self.categories.find_all().await?)
    }

    pub async fn list_active(&self) -> RegistryResult<Vec<Category>> {
        Ok(self.categories.find_active().await?)
    }
}
