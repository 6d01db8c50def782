//! Entity to model mappers
//!
//! Conversions between domain entities (auth-core) and database models.
//! - `TryFrom<Model> for Entity`: Convert database rows to domain objects

mod user;
