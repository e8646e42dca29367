use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{Category, Club};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competitor {
    pub competitor_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub identity_document: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub club_id: i32,
    pub category_id: i32,
    pub robot_name: Option<String>,
    pub enrolled_at: NaiveDateTime,
    pub active: bool,
}

impl Competitor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone)]
pub struct NewCompetitor {
    pub first_name: String,
    pub last_name: String,
    pub identity_document: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub club_id: i32,
    pub category_id: i32,
    pub robot_name: Option<String>,
    pub enrolled_at: NaiveDateTime,
    pub active: bool,
}

impl NewCompetitor {
    pub fn into_competitor(self, competitor_id: i32) -> Competitor {
        Competitor {
            competitor_id,
            first_name: self.first_name,
            last_name: self.last_name,
            identity_document: self.identity_document,
            birth_date: self.birth_date,
            age: self.age,
            email: self.email,
            phone: self.phone,
            club_id: self.club_id,
            category_id: self.category_id,
            robot_name: self.robot_name,
            enrolled_at: self.enrolled_at,
            active: self.active,
        }
    }
}

/// A competitor with its club and category resolved.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompetitorDetail {
    #[serde(flatten)]
    pub competitor: Competitor,
    pub club: Club,
    pub category: Category,
}
