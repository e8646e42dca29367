mod category;
mod club;
mod competitor;
mod role;
mod user;

pub use category::{Category, NewCategory};
pub use club::{Club, ClubStatus, NewClub};
pub use competitor::{Competitor, CompetitorDetail, NewCompetitor};
pub use role::{NewRole, Role};
pub use user::{NewUser, User};
