//! # auth-cli
//!
//! Operator tooling for the pool authentication backend, shipped as the
//! `pool-auth` binary.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::execute;
