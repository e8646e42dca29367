pub mod auth;
pub mod category;
pub mod club;
pub mod common;
pub mod competitor;
pub mod user;
