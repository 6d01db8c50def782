//! Domain entities - core business objects

mod role;
mod user;

pub use role::Role;
pub use user::{is_valid_email, NewUser, User};
