use crate::error::{BadEnvVarSnafu, ParsePortSnafu, RosterError, RosterResult};
use dotenvy::var;
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use std::{str::FromStr, sync::Arc};

pub const DEFAULT_SERVER_IP: &str = "127.0.0.1:5000";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    store_config: StoreConfig,
    server_ip: Arc<str>,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        let kind = var("ROSTER_STORE").map_or(Ok(StoreKind::Postgres), |kind| kind.parse())?;

        let store_config = match kind {
            StoreKind::Postgres => StoreConfig::Postgres(Arc::new(DbConfig::new()?)),
            StoreKind::Memory => StoreConfig::InMemory,
        };
        let server_ip = var("ROSTER_SERVER_IP").unwrap_or_else(|_| DEFAULT_SERVER_IP.to_string());

        Ok(Self {
            store_config,
            server_ip: server_ip.into(),
        })
    }

    pub fn store_config(&self) -> StoreConfig {
        self.store_config.clone()
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            _ => Err(RosterError::UnknownStoreKind { kind: s.to_string() }),
        }
    }
}

#[derive(Clone, Debug)]
pub enum StoreConfig {
    Postgres(Arc<DbConfig>),
    InMemory,
}

#[derive(Debug)]
pub struct DbConfig {
    user: String,
    password: SecretString,
    path: String,
    port: u16,
    database: String,
}

impl DbConfig {
    pub fn new() -> RosterResult<Self> {
        let get_env_var = |name| var(name).context(BadEnvVarSnafu { name });

        Ok(Self {
            user: get_env_var("DB_USER")?,
            password: SecretString::from(get_env_var("DB_PASSWORD")?),
            path: get_env_var("DB_PATH")?,
            port: get_env_var("DB_PORT")?.parse().context(ParsePortSnafu)?,
            database: get_env_var("DB_NAME")?,
        })
    }

    pub fn get_db_path(&self) -> SecretString {
        SecretString::from(format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.path,
            self.port,
            self.database
        ))
    }
}
