//! Shared setup for the integration tests.

#![allow(dead_code)]

use std::time::Duration;
use tempfile::{NamedTempFile, TempPath};
use user_table_gateway::config::{DatabaseConfig, PoolOptions};
use user_table_gateway::models::ConnectionConfig;
use user_table_gateway::{DbError, PoolConnectionProvider, User, UserTableGateway};

pub type PoolGateway = UserTableGateway<PoolConnectionProvider>;

/// Gateway over a fresh SQLite file. The file lives as long as the returned path.
pub async fn sqlite_gateway() -> (PoolGateway, TempPath) {
    sqlite_gateway_with(PoolOptions {
        acquire_timeout_secs: Some(5),
        ..PoolOptions::default()
    })
    .await
}

pub async fn sqlite_gateway_with(pool_options: PoolOptions) -> (PoolGateway, TempPath) {
    let temp_path = NamedTempFile::new().unwrap().into_temp_path();
    let conn_url = format!("sqlite:{}", temp_path.to_str().unwrap());
    let config = ConnectionConfig::new(conn_url, pool_options).unwrap();

    let provider = PoolConnectionProvider::connect(&config).await.unwrap();
    (UserTableGateway::new(provider), temp_path)
}

/// Gateway for the server named by `var`, or `None` when the variable is unset.
///
/// The URL may carry pool options as query parameters, like the CLI accepts.
pub async fn server_gateway(var: &str) -> Option<PoolGateway> {
    let url = match std::env::var(var) {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: {var} not set");
            return None;
        }
    };

    let config = DatabaseConfig::parse(&url)
        .unwrap()
        .to_connection_config()
        .unwrap();
    let provider = PoolConnectionProvider::connect(&config).await.unwrap();
    Some(UserTableGateway::new(provider))
}

/// Acquire timeout short enough that a leaked connection fails the test quickly.
pub const LEAK_TIMEOUT: Duration = Duration::from_secs(1);

pub fn sorted(mut users: Vec<User>) -> Vec<User> {
    users.sort_by_key(|u| u.id);
    users
}

pub fn triples(users: &[User]) -> Vec<(String, String, i8)> {
    users
        .iter()
        .map(|u| (u.name.clone(), u.last_name.clone(), u.age))
        .collect()
}

/// Run every operation once against a server, leaving no table behind.
///
/// Servers share one `users` table across tests, so the whole flow lives in a
/// single call. Returns the SQLSTATE reported for an insert into a missing table.
pub async fn assert_server_lifecycle(gateway: &PoolGateway) -> Option<String> {
    gateway.drop_table().await.unwrap();

    let err = gateway.save_user("A", "B", 1).await.unwrap_err();
    assert!(matches!(err, DbError::Storage { .. }), "got {err:?}");
    let missing_table_state = err.sql_state().map(str::to_string);

    gateway.create_table().await.unwrap();
    gateway.create_table().await.unwrap();

    gateway.save_user("Ivan", "Petrov", 25).await.unwrap();
    gateway.save_user("Anna", "Sidorova", 30).await.unwrap();

    let users = sorted(gateway.get_all_users().await.unwrap());
    assert_eq!(
        triples(&users),
        vec![
            ("Ivan".to_string(), "Petrov".to_string(), 25),
            ("Anna".to_string(), "Sidorova".to_string(), 30),
        ]
    );
    assert_ne!(users[0].id, users[1].id);

    gateway.remove_user_by_id(users[0].id).await.unwrap();
    // Second delete matches nothing and still succeeds
    gateway.remove_user_by_id(users[0].id).await.unwrap();
    assert_eq!(
        gateway.get_all_users().await.unwrap(),
        vec![users[1].clone()]
    );

    gateway.clean_table().await.unwrap();
    assert!(gateway.get_all_users().await.unwrap().is_empty());

    // TINYINT bounds and non-ASCII text survive the round trip
    gateway.save_user("Иван", "Петров", i8::MAX).await.unwrap();
    gateway.save_user("O'Brien", "Smith", i8::MIN).await.unwrap();
    let users = sorted(gateway.get_all_users().await.unwrap());
    assert_eq!(
        triples(&users),
        vec![
            ("Иван".to_string(), "Петров".to_string(), 127),
            ("O'Brien".to_string(), "Smith".to_string(), -128),
        ]
    );

    gateway.clean_table().await.unwrap();
    assert!(gateway.get_all_users().await.unwrap().is_empty());

    gateway.drop_table().await.unwrap();
    gateway.drop_table().await.unwrap();
    gateway.provider().close().await;

    missing_table_state
}
