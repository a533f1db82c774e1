//! Statement execution over a borrowed connection.
//!
//! Each backend lives in its own submodule:
//! - `mysql`: binds `age` as TINYINT (`i8`)
//! - `postgres`: binds and reads `age` as SMALLINT (`i16`)
//! - `sqlite`: binds and reads `age` as INTEGER (`i64`)
//!
//! The code structure is intentionally parallel to make differences obvious.

use crate::db::pool::DbConnection;
use crate::error::{DbError, DbResult};
use crate::impl_db_dispatch;
use crate::models::{COLUMN_AGE, COLUMN_ID, COLUMN_LAST_NAME, COLUMN_NAME, User};
use sqlx::Row;
use tracing::debug;

/// A value bound to a statement placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserParam<'a> {
    Text(&'a str),
    Age(i8),
    Id(i64),
}

/// Execute a write statement and return the number of affected rows.
pub async fn execute(
    conn: &mut DbConnection,
    sql: &str,
    params: &[UserParam<'_>],
) -> DbResult<u64> {
    debug!(sql = %sql, params = params.len(), "Executing statement");

    impl_db_dispatch!(conn, {
        MySql(c) => mysql::execute(c, sql, params).await,
        Postgres(c) => postgres::execute(c, sql, params).await,
        SQLite(c) => sqlite::execute(c, sql, params).await,
    })
}

/// Run a query and materialize every row as a [`User`].
///
/// Either every row decodes or the whole call fails; no partial list escapes.
pub async fn fetch_users(conn: &mut DbConnection, sql: &str) -> DbResult<Vec<User>> {
    debug!(sql = %sql, "Fetching users");

    impl_db_dispatch!(conn, {
        MySql(c) => mysql::fetch_users(c, sql).await,
        Postgres(c) => postgres::fetch_users(c, sql).await,
        SQLite(c) => sqlite::fetch_users(c, sql).await,
    })
}

/// Narrow a stored age to the TINYINT range.
fn narrow_age<T>(value: T) -> DbResult<i8>
where
    T: Copy + std::fmt::Display + TryInto<i8>,
{
    value.try_into().map_err(|_| {
        DbError::storage(
            format!("Column {} value {} does not fit TINYINT", COLUMN_AGE, value),
            None,
        )
    })
}

// =============================================================================
// Database-Specific Implementations
// =============================================================================

mod mysql {
    use super::*;
    use sqlx::MySql;
    use sqlx::mysql::{MySqlArguments, MySqlRow};
    use sqlx::pool::PoolConnection;

    pub async fn execute(
        conn: &mut PoolConnection<MySql>,
        sql: &str,
        params: &[UserParam<'_>],
    ) -> DbResult<u64> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = bind_param(query, param);
        }
        let result = query.execute(&mut **conn).await?;
        Ok(result.rows_affected())
    }

    pub async fn fetch_users(conn: &mut PoolConnection<MySql>, sql: &str) -> DbResult<Vec<User>> {
        let rows = sqlx::query(sql).fetch_all(&mut **conn).await?;
        rows.iter().map(user_from_row).collect()
    }

    fn user_from_row(row: &MySqlRow) -> DbResult<User> {
        Ok(User {
            id: row.try_get(COLUMN_ID)?,
            name: row.try_get(COLUMN_NAME)?,
            last_name: row.try_get(COLUMN_LAST_NAME)?,
            age: row.try_get(COLUMN_AGE)?,
        })
    }

    fn bind_param<'q>(
        query: sqlx::query::Query<'q, MySql, MySqlArguments>,
        param: &UserParam<'q>,
    ) -> sqlx::query::Query<'q, MySql, MySqlArguments> {
        match *param {
            UserParam::Text(v) => query.bind(v),
            UserParam::Age(v) => query.bind(v),
            UserParam::Id(v) => query.bind(v),
        }
    }
}

mod postgres {
    use super::*;
    use sqlx::Postgres;
    use sqlx::pool::PoolConnection;
    use sqlx::postgres::{PgArguments, PgRow};

    pub async fn execute(
        conn: &mut PoolConnection<Postgres>,
        sql: &str,
        params: &[UserParam<'_>],
    ) -> DbResult<u64> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = bind_param(query, param);
        }
        let result = query.execute(&mut **conn).await?;
        Ok(result.rows_affected())
    }

    pub async fn fetch_users(
        conn: &mut PoolConnection<Postgres>,
        sql: &str,
    ) -> DbResult<Vec<User>> {
        let rows = sqlx::query(sql).fetch_all(&mut **conn).await?;
        rows.iter().map(user_from_row).collect()
    }

    fn user_from_row(row: &PgRow) -> DbResult<User> {
        Ok(User {
            id: row.try_get(COLUMN_ID)?,
            name: row.try_get(COLUMN_NAME)?,
            last_name: row.try_get(COLUMN_LAST_NAME)?,
            age: narrow_age(row.try_get::<i16, _>(COLUMN_AGE)?)?,
        })
    }

    fn bind_param<'q>(
        query: sqlx::query::Query<'q, Postgres, PgArguments>,
        param: &UserParam<'q>,
    ) -> sqlx::query::Query<'q, Postgres, PgArguments> {
        match *param {
            UserParam::Text(v) => query.bind(v),
            // No single-byte integer in PostgreSQL
            UserParam::Age(v) => query.bind(i16::from(v)),
            UserParam::Id(v) => query.bind(v),
        }
    }
}

mod sqlite {
    use super::*;
    use sqlx::Sqlite;
    use sqlx::pool::PoolConnection;
    use sqlx::sqlite::{SqliteArguments, SqliteRow};

    pub async fn execute(
        conn: &mut PoolConnection<Sqlite>,
        sql: &str,
        params: &[UserParam<'_>],
    ) -> DbResult<u64> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = bind_param(query, param);
        }
        let result = query.execute(&mut **conn).await?;
        Ok(result.rows_affected())
    }

    pub async fn fetch_users(conn: &mut PoolConnection<Sqlite>, sql: &str) -> DbResult<Vec<User>> {
        let rows = sqlx::query(sql).fetch_all(&mut **conn).await?;
        rows.iter().map(user_from_row).collect()
    }

    fn user_from_row(row: &SqliteRow) -> DbResult<User> {
        Ok(User {
            id: row.try_get(COLUMN_ID)?,
            name: row.try_get(COLUMN_NAME)?,
            last_name: row.try_get(COLUMN_LAST_NAME)?,
            age: narrow_age(row.try_get::<i64, _>(COLUMN_AGE)?)?,
        })
    }

    fn bind_param<'q>(
        query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
        param: &UserParam<'q>,
    ) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
        match *param {
            UserParam::Text(v) => query.bind(v),
            UserParam::Age(v) => query.bind(i64::from(v)),
            UserParam::Id(v) => query.bind(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolOptions;
    use crate::db::pool::{ConnectionProvider, PoolConnectionProvider};
    use crate::models::ConnectionConfig;

    async fn memory_connection() -> (PoolConnectionProvider, DbConnection) {
        let config = ConnectionConfig::new("sqlite::memory:", PoolOptions::default()).unwrap();
        let provider = PoolConnectionProvider::connect(&config).await.unwrap();
        let conn = provider.acquire().await.unwrap();
        (provider, conn)
    }

    #[test]
    fn test_narrow_age() {
        assert_eq!(narrow_age(127i64).unwrap(), 127);
        assert_eq!(narrow_age(-128i16).unwrap(), -128);
        let err = narrow_age(300i64).unwrap_err();
        assert!(err.to_string().contains("300"));
    }

    #[tokio::test]
    async fn test_execute_reports_affected_rows() {
        let (_provider, mut conn) = memory_connection().await;
        execute(&mut conn, "CREATE TABLE t (v TEXT NOT NULL)", &[])
            .await
            .unwrap();

        let affected = execute(
            &mut conn,
            "INSERT INTO t (v) VALUES (?), (?)",
            &[UserParam::Text("a"), UserParam::Text("b")],
        )
        .await
        .unwrap();
        assert_eq!(affected, 2);

        let affected = execute(&mut conn, "DELETE FROM t WHERE v = ?", &[UserParam::Text("zzz")])
            .await
            .unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn test_fetch_users_decodes_by_column_name() {
        let (_provider, mut conn) = memory_connection().await;
        // Column order differs from the struct on purpose
        execute(
            &mut conn,
            "CREATE TABLE users (age TINYINT, lastName TEXT, name TEXT, id INTEGER PRIMARY KEY)",
            &[],
        )
        .await
        .unwrap();
        execute(
            &mut conn,
            "INSERT INTO users (id, name, lastName, age) VALUES (?, ?, ?, ?)",
            &[
                UserParam::Id(42),
                UserParam::Text("Ivan"),
                UserParam::Text("Petrov"),
                UserParam::Age(-5),
            ],
        )
        .await
        .unwrap();

        let users = fetch_users(&mut conn, "SELECT * FROM users").await.unwrap();
        assert_eq!(users, vec![User::new(42, "Ivan", "Petrov", -5)]);
    }

    #[tokio::test]
    async fn test_fetch_users_fails_whole_call_on_bad_row() {
        let (_provider, mut conn) = memory_connection().await;
        execute(
            &mut conn,
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, lastName TEXT, age INTEGER)",
            &[],
        )
        .await
        .unwrap();
        execute(
            &mut conn,
            "INSERT INTO users (name, lastName, age) VALUES ('A', 'B', 1), ('C', 'D', 1000)",
            &[],
        )
        .await
        .unwrap();

        let err = fetch_users(&mut conn, "SELECT * FROM users").await.unwrap_err();
        assert!(matches!(err, DbError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_execute_missing_table_is_storage_error() {
        let (_provider, mut conn) = memory_connection().await;
        let err = execute(&mut conn, "DELETE FROM users", &[]).await.unwrap_err();
        match err {
            DbError::Storage { message, .. } => assert!(message.contains("no such table")),
            other => panic!("expected storage error, got {other:?}"),
        }
    }
}
