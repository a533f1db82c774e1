//! The user entity stored in the `users` table.

use serde::{Deserialize, Serialize};

/// Name of the single table managed by the gateway.
pub const USERS_TABLE: &str = "users";

pub const COLUMN_ID: &str = "id";
pub const COLUMN_NAME: &str = "name";
pub const COLUMN_LAST_NAME: &str = "lastName";
pub const COLUMN_AGE: &str = "age";

/// A row of the `users` table.
///
/// Values are only ever built from result rows; inserts take the three
/// caller-supplied fields directly and let the engine assign `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Assigned by the database on insert.
    pub id: i64,
    pub name: String,
    pub last_name: String,
    /// Stored as TINYINT.
    pub age: i8,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, last_name: impl Into<String>, age: i8) -> Self {
        Self {
            id,
            name: name.into(),
            last_name: last_name.into(),
            age,
        }
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "User {{ id: {}, name: {}, lastName: {}, age: {} }}",
            self.id, self.name, self.last_name, self.age
        )
    }
}
