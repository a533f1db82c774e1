//! The users table gateway.
//!
//! Six fixed operations, each one statement over one borrowed connection. The
//! connection is a local of the operation that borrowed it, so it is returned
//! to the provider on every exit path, including errors.
//!
//! Every failure is logged with the operation and its inputs and then handed
//! back to the caller unchanged. Deleting an id that matches no row is the one
//! outcome that is logged as a warning instead of being reported as an error.

use crate::db::executor::{self, UserParam};
use crate::db::{ConnectionProvider, Statement};
use crate::error::DbResult;
use crate::models::{USERS_TABLE, User};
use tracing::{debug, error, info, warn};

/// Data-access gateway for the `users` table.
#[derive(Debug, Clone)]
pub struct UserTableGateway<P> {
    provider: P,
}

impl<P: ConnectionProvider> UserTableGateway<P> {
    /// Create a gateway that borrows a connection from `provider` for every call.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Create the `users` table if it does not exist yet.
    pub async fn create_table(&self) -> DbResult<()> {
        self.run(Statement::CreateTable, &[])
            .await
            .inspect_err(|e| error!(table = USERS_TABLE, error = %e, "Failed to create table"))?;

        info!(table = USERS_TABLE, "Table created or already exists");
        Ok(())
    }

    /// Drop the `users` table if it exists.
    pub async fn drop_table(&self) -> DbResult<()> {
        self.run(Statement::DropTable, &[])
            .await
            .inspect_err(|e| error!(table = USERS_TABLE, error = %e, "Failed to drop table"))?;

        info!(table = USERS_TABLE, "Table dropped");
        Ok(())
    }

    /// Insert one user. The database assigns the id, which is not read back.
    pub async fn save_user(&self, name: &str, last_name: &str, age: i8) -> DbResult<()> {
        let params = [
            UserParam::Text(name),
            UserParam::Text(last_name),
            UserParam::Age(age),
        ];

        self.run(Statement::InsertUser, &params)
            .await
            .inspect_err(|e| {
                error!(
                    name = %name,
                    last_name = %last_name,
                    age,
                    error = %e,
                    "Failed to save user"
                )
            })?;

        info!(name = %name, last_name = %last_name, age, "User saved");
        Ok(())
    }

    /// Delete the user with `id`.
    ///
    /// No matching row is not an error: it is logged and the call succeeds.
    pub async fn remove_user_by_id(&self, id: i64) -> DbResult<()> {
        let affected = self
            .run(Statement::DeleteUserById, &[UserParam::Id(id)])
            .await
            .inspect_err(|e| error!(id, error = %e, "Failed to remove user"))?;

        if affected > 0 {
            info!(id, "User removed");
        } else {
            warn!(id, "User not found, nothing removed");
        }
        Ok(())
    }

    /// Fetch every row of the table, in whatever order the engine returns them.
    pub async fn get_all_users(&self) -> DbResult<Vec<User>> {
        let mut conn = self
            .provider
            .acquire()
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch users"))?;
        let sql = Statement::SelectAllUsers.sql(conn.db_type());

        let users = executor::fetch_users(&mut conn, sql)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch users"))?;

        info!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// Remove every row, keeping the table.
    pub async fn clean_table(&self) -> DbResult<()> {
        let affected = self
            .run(Statement::CleanTable, &[])
            .await
            .inspect_err(|e| error!(table = USERS_TABLE, error = %e, "Failed to clean table"))?;

        // MySQL and PostgreSQL report 0 for TRUNCATE
        info!(table = USERS_TABLE, rows_affected = affected, "Table cleaned");
        Ok(())
    }

    /// Borrow a connection, execute one statement, and give the connection back.
    async fn run(&self, statement: Statement, params: &[UserParam<'_>]) -> DbResult<u64> {
        let mut conn = self.provider.acquire().await?;
        let db_type = conn.db_type();
        debug!(statement = statement.name(), db_type = %db_type, "Running statement");

        executor::execute(&mut conn, statement.sql(db_type), params).await
    }
}
