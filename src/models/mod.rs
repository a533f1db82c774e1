//! Data models for the users table gateway.
//!
//! This module re-exports all model types used throughout the crate.

pub mod connection;
pub mod user;

// Re-export commonly used types
pub use connection::{ConnectionConfig, ConnectionConfigError, DatabaseType};
pub use user::{COLUMN_AGE, COLUMN_ID, COLUMN_LAST_NAME, COLUMN_NAME, USERS_TABLE, User};
