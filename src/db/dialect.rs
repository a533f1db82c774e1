//! Fixed SQL statements for the `users` table, per backend.
//!
//! MySQL carries the reference schema. PostgreSQL and SQLite get the closest
//! equivalent: no TINYINT there, so `age` gets a CHECK constraint with the same
//! range, and SQLite has no TRUNCATE.

use crate::models::DatabaseType;

/// The six statements the gateway can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statement {
    CreateTable,
    DropTable,
    InsertUser,
    DeleteUserById,
    SelectAllUsers,
    CleanTable,
}

impl Statement {
    pub const ALL: [Statement; 6] = [
        Statement::CreateTable,
        Statement::DropTable,
        Statement::InsertUser,
        Statement::DeleteUserById,
        Statement::SelectAllUsers,
        Statement::CleanTable,
    ];

    /// Short name used in log fields.
    pub fn name(self) -> &'static str {
        match self {
            Self::CreateTable => "create_table",
            Self::DropTable => "drop_table",
            Self::InsertUser => "insert_user",
            Self::DeleteUserById => "delete_user_by_id",
            Self::SelectAllUsers => "select_all_users",
            Self::CleanTable => "clean_table",
        }
    }

    /// SQL text for the given backend.
    pub fn sql(self, db_type: DatabaseType) -> &'static str {
        match db_type {
            DatabaseType::MySQL => mysql::sql(self),
            DatabaseType::PostgreSQL => postgres::sql(self),
            DatabaseType::SQLite => sqlite::sql(self),
        }
    }
}

const DROP_TABLE: &str = "DROP TABLE IF EXISTS users";
const SELECT_ALL_USERS: &str = "SELECT * FROM users";

mod mysql {
    use super::*;

    const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (\
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY, \
        name VARCHAR(255) NOT NULL, \
        lastName VARCHAR(255) NOT NULL, \
        age TINYINT NOT NULL\
        )";

    pub fn sql(statement: Statement) -> &'static str {
        match statement {
            Statement::CreateTable => CREATE_TABLE,
            Statement::DropTable => DROP_TABLE,
            Statement::InsertUser => "INSERT INTO users (name, lastName, age) VALUES (?, ?, ?)",
            Statement::DeleteUserById => "DELETE FROM users WHERE id = ?",
            Statement::SelectAllUsers => SELECT_ALL_USERS,
            Statement::CleanTable => "TRUNCATE TABLE users",
        }
    }
}

mod postgres {
    use super::*;

    // Quoted so the column keeps its camel-case name instead of folding to lastname.
    const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (\
        id BIGSERIAL PRIMARY KEY, \
        name VARCHAR(255) NOT NULL, \
        \"lastName\" VARCHAR(255) NOT NULL, \
        age SMALLINT NOT NULL CHECK (age BETWEEN -128 AND 127)\
        )";

    pub fn sql(statement: Statement) -> &'static str {
        match statement {
            Statement::CreateTable => CREATE_TABLE,
            Statement::DropTable => DROP_TABLE,
            Statement::InsertUser => {
                "INSERT INTO users (name, \"lastName\", age) VALUES ($1, $2, $3)"
            }
            Statement::DeleteUserById => "DELETE FROM users WHERE id = $1",
            Statement::SelectAllUsers => SELECT_ALL_USERS,
            Statement::CleanTable => "TRUNCATE TABLE users",
        }
    }
}

mod sqlite {
    use super::*;

    const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (\
        id INTEGER PRIMARY KEY AUTOINCREMENT, \
        name VARCHAR(255) NOT NULL, \
        lastName VARCHAR(255) NOT NULL, \
        age TINYINT NOT NULL CHECK (age BETWEEN -128 AND 127)\
        )";

    pub fn sql(statement: Statement) -> &'static str {
        match statement {
            Statement::CreateTable => CREATE_TABLE,
            Statement::DropTable => DROP_TABLE,
            Statement::InsertUser => "INSERT INTO users (name, lastName, age) VALUES (?, ?, ?)",
            Statement::DeleteUserById => "DELETE FROM users WHERE id = ?",
            Statement::SelectAllUsers => SELECT_ALL_USERS,
            Statement::CleanTable => "DELETE FROM users",
        }
    }
}
