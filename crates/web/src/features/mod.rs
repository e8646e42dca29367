pub mod auth;
pub mod categories;
pub mod clubs;
pub mod competitors;
pub mod health;
pub mod users;
