//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

/// Signing secret shared by every test environment
pub const TEST_SECRET: &str = "integration-test-secret";

/// A password that satisfies the registration rules
pub const TEST_PASSWORD: &str = "TestPass123!";

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self::named(&format!("testuser{suffix}"))
    }

    pub fn named(username: &str) -> Self {
        Self {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: TEST_PASSWORD.to_string(),
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }
}
