//! User Table Gateway Library
//!
//! A fixed set of six operations over a single `users` table (id, name,
//! lastName, age) on MySQL, PostgreSQL or SQLite. Connections come from a
//! [`ConnectionProvider`] passed in at construction; every operation runs one
//! statement, logs the outcome, and returns errors to the caller unchanged.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod gateway;
pub mod models;

pub use config::Config;
pub use db::{ConnectionProvider, PoolConnectionProvider};
pub use error::{DbError, DbResult};
pub use gateway::UserTableGateway;
pub use models::User;
