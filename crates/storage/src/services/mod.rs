//! Registration rules for clubs, categories, competitors and users.
//!
//! Services borrow the gateway from [`crate::Database`] for the duration of
//! one request and keep no state between calls.

pub mod categories;
pub mod clubs;
pub mod competitors;
pub mod credentials;
pub mod users;

pub use categories::CategoryService;
pub use clubs::ClubService;
pub use competitors::CompetitorService;
pub use credentials::{Argon2Hasher, CredentialHasher};
pub use users::UserService;

use chrono::{NaiveDateTime, Utc};

pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}
