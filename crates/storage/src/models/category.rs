use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub active: bool,
}

impl Category {
    /// Both bounds, when the category defines them.
    pub fn age_bounds(&self) -> Option<(i32, i32)> {
        self.min_age.zip(self.max_age)
    }
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub active: bool,
}

impl NewCategory {
    pub fn into_category(self, category_id: i32) -> Category {
        Category {
            category_id,
            name: self.name,
            description: self.description,
            min_age: self.min_age,
            max_age: self.max_age,
            active: self.active,
        }
    }
}
