//! Server configuration.
//!
//! Layered with figment: built-in defaults, then an optional YAML file,
//! then `BEACONS_`-prefixed environment variables (`__` separates
//! nested keys, e.g. `BEACONS_DB__URL`).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use beacons_db::DbConfig;
use beacons_service::AuthConfig;
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "beacons-server", about = "Beacon registry API server")]
pub struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file does not exist: {0}")]
    MissingFile(PathBuf),

    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("missing required setting: {0}")]
    MissingSetting(&'static str),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub db: DbConfig,
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db: DbConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed("BEACONS_").split("__"))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        if config.auth.jwt_public_key_pem.trim().is_empty() {
            return Err(ConfigError::MissingSetting("auth.jwt_public_key_pem"));
        }
        Ok(config)
    }

    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path.filter(|p| !p.is_file()) {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        Self::from_figment(&Self::figment(path))
    }
}
