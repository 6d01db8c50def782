//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, TokenService, TOKEN_TTL_SECS};
pub use password::{PasswordConfig, PasswordService};
