use serde::Deserialize;

use crate::error::Result;
use crate::persist::PersistenceMode;

// ------------- Settings -------------
/// Runtime settings for the service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Path of the backing file, or `:memory:` for a catalog that
    /// lives and dies with the process.
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "herbarium.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Settings {
    /// Settings are loaded in order, later sources overriding earlier ones:
    /// 1. built-in defaults
    /// 2. a herbarium.toml in the working directory, when present
    /// 3. environment variables with HERBARIUM_ prefix, such as
    ///    HERBARIUM_SERVER__PORT or HERBARIUM_DATABASE__PATH
    pub fn load() -> Result<Settings> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("herbarium").required(false))
            .add_source(config::Environment::with_prefix("HERBARIUM").separator("__"));
        Ok(builder.build()?.try_deserialize()?)
    }
    pub fn persistence_mode(&self) -> PersistenceMode {
        if self.database.path == ":memory:" {
            PersistenceMode::InMemory
        } else {
            PersistenceMode::File(self.database.path.clone())
        }
    }
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
