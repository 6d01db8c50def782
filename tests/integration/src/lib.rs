//! Integration test utilities for the authentication backend
//!
//! Wires the services to an in-memory repository with fast password
//! hashing, and provides fixtures for building accounts.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
