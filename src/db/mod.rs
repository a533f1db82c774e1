//! Database abstraction layer.
//!
//! This module provides database access functionality:
//! - Connection providers and database-specific pools
//! - Per-backend SQL for the users table
//! - Statement execution and row decoding
//! - Database dispatch macros for reducing code duplication

pub mod dialect;
pub mod executor;
#[macro_use]
pub mod macros;
pub mod pool;

pub use dialect::Statement;
pub use executor::UserParam;
pub use pool::{ConnectionProvider, DbConnection, DbPool, PoolConnectionProvider};
