//! Opening the registry's SurrealDB connection.

use std::fmt;

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

use crate::error::DbError;
use crate::schema::run_migrations;

/// The `db` section of the server configuration. Every field falls back
/// to a local development value.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    /// `host:port` of the SurrealDB WebSocket endpoint.
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "beacons".into(),
            database: "registry".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

// Config is logged at startup; keep the password out of it.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.url)
            .field("namespace", &self.namespace)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A signed-in client, scoped to the registry namespace and database,
/// whose schema is at the latest migration.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    pub async fn open(config: &DbConfig) -> Result<Self, DbError> {
        let db = Surreal::new::<Ws>(config.url.as_str()).await?;
        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;
        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await?;
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Signed in to SurrealDB"
        );

        run_migrations(&db).await?;
        Ok(Self { db })
    }

    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_keeps_remaining_defaults() {
        let config: DbConfig =
            serde_json::from_value(serde_json::json!({ "url": "db.internal:8000" })).unwrap();
        assert_eq!(config.url, "db.internal:8000");
        assert_eq!(config.namespace, "beacons");
        assert_eq!(config.database, "registry");
    }

    #[test]
    fn debug_output_hides_password() {
        let config = DbConfig {
            password: "hunter2".into(),
            ..Default::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("registry"));
    }
}
