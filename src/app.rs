//! Command dispatch for the binary.
//!
//! Maps each CLI subcommand onto one gateway operation and renders what the
//! user should see on stdout.

use crate::config::Command;
use crate::db::ConnectionProvider;
use crate::error::DbResult;
use crate::format::{OutputFormat, format_users};
use crate::gateway::UserTableGateway;
use tracing::info;

/// Users inserted by the `demo` command.
pub const DEMO_USERS: [(&str, &str, i8); 4] = [
    ("Ivan", "Petrov", 25),
    ("Anna", "Sidorova", 30),
    ("Sergey", "Ivanov", 41),
    ("Maria", "Smirnova", 19),
];

/// Run one command and return the text to print.
pub async fn run_command<P: ConnectionProvider>(
    gateway: &UserTableGateway<P>,
    command: &Command,
) -> DbResult<String> {
    match command {
        Command::CreateTable => {
            gateway.create_table().await?;
            Ok("Table 'users' is ready\n".to_string())
        }
        Command::DropTable => {
            gateway.drop_table().await?;
            Ok("Table 'users' dropped\n".to_string())
        }
        Command::Save {
            name,
            last_name,
            age,
        } => {
            gateway.save_user(name, last_name, *age).await?;
            Ok(format!("User {} {} saved\n", name, last_name))
        }
        Command::Remove { id } => {
            gateway.remove_user_by_id(*id).await?;
            Ok(String::new())
        }
        Command::List { format } => {
            let users = gateway.get_all_users().await?;
            Ok(format_users(&users, *format))
        }
        Command::Clean => {
            gateway.clean_table().await?;
            Ok("Table 'users' cleaned\n".to_string())
        }
        Command::Demo => run_demo(gateway).await,
    }
}

/// Walk through the whole lifecycle of the table once.
///
/// The table is created, filled with [`DEMO_USERS`], listed, cleaned and
/// finally dropped. The listing is returned for printing.
pub async fn run_demo<P: ConnectionProvider>(gateway: &UserTableGateway<P>) -> DbResult<String> {
    gateway.create_table().await?;

    for (name, last_name, age) in DEMO_USERS {
        gateway.save_user(name, last_name, age).await?;
        info!("User named {} added to the database", name);
    }

    let users = gateway.get_all_users().await?;
    let listing = format_users(&users, OutputFormat::Table);

    gateway.clean_table().await?;
    gateway.drop_table().await?;

    Ok(listing)
}
