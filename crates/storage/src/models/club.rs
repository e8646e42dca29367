use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Lifecycle state of a club registration.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "club_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClubStatus {
    #[default]
    Pending,
    Active,
    Rejected,
    Inactive,
}

impl fmt::Display for ClubStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClubStatus::Pending => "pending",
            ClubStatus::Active => "active",
            ClubStatus::Rejected => "rejected",
            ClubStatus::Inactive => "inactive",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Club {
    pub club_id: i32,
    pub name: String,
    pub representative: String,
    pub representative_email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: ClubStatus,
    pub registered_at: NaiveDateTime,
    pub validated_at: Option<NaiveDateTime>,
    /// User who approved or rejected the club
    pub validated_by: Option<i32>,
    pub observations: Option<String>,
}

/// Club row before the gateway assigns an id.
#[derive(Debug, Clone)]
pub struct NewClub {
    pub name: String,
    pub representative: String,
    pub representative_email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: ClubStatus,
    pub registered_at: NaiveDateTime,
}

impl NewClub {
    pub fn into_club(self, club_id: i32) -> Club {
        Club {
            club_id,
            name: self.name,
            representative: self.representative,
            representative_email: self.representative_email,
            phone: self.phone,
            address: self.address,
            status: self.status,
            registered_at: self.registered_at,
            validated_at: None,
            validated_by: None,
            observations: None,
        }
    }
}
