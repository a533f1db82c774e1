//! Database dispatch macros for reducing code duplication.
//!
//! Every backend-specific operation is a three-way match over
//! [`DbConnection`](crate::db::pool::DbConnection); the macro keeps those
//! matches linear and readable. It expands at compile time with zero runtime
//! overhead.

/// Macro for generating database dispatch match arms.
///
/// This macro generates match arms for `DbConnection` variants, reducing the
/// need to manually write repetitive match statements.
///
/// # Example
///
/// ```ignore
/// impl_db_dispatch!(conn, {
///     MySql(c) => do_mysql(c),
///     Postgres(c) => do_postgres(c),
///     SQLite(c) => do_sqlite(c),
/// });
/// ```
#[macro_export]
macro_rules! impl_db_dispatch {
    ($conn:expr, { $($variant:ident($c:ident) => $body:expr),+ $(,)? }) => {
        match $conn {
            $(
                $crate::db::pool::DbConnection::$variant($c) => $body,
            )+
        }
    };
}

pub use impl_db_dispatch;
