//! Value objects - immutable domain primitives

mod user_id;

pub use user_id::{UserId, UserIdParseError};
