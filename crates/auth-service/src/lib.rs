//! # auth-service
//!
//! Application layer: account registration and login, token resolution, and
//! role management over the role hierarchy.

pub mod services;

pub use services::{
    AuthService, ErrorKind, RoleService, ServiceContext, ServiceError, ServiceResult, Session,
};
