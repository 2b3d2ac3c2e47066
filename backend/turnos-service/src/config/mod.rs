use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub store: StoreConfig,
    pub api: ApiConfig,
    pub docs: DocsConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    /// Used when the connection string does not name a database.
    #[serde(default = "default_database_name")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Mongo,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Mount point of the turnos routes. An empty string mounts them at the root.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Whether `fecha` must be present when creating or rescheduling a turno.
    #[serde(default = "default_require_fecha")]
    pub require_fecha: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_docs_path")]
    pub path: String,
    #[serde(default = "default_openapi_path")]
    pub openapi_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_name() -> String {
    "veterinaria".to_string()
}

fn default_prefix() -> String {
    "/api".to_string()
}

fn default_require_fecha() -> bool {
    true
}

fn default_docs_path() -> String {
    "/api-docs".to_string()
}

fn default_openapi_path() -> String {
    "/openapi.json".to_string()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "mongodb://localhost:27017/veterinaria")?
            .set_default("database.name", "veterinaria")?
            .set_default("store.backend", "mongo")?
            .set_default("api.prefix", "/api")?
            .set_default("api.require_fecha", true)?
            .set_default("docs.path", "/api-docs")?
            .set_default("docs.openapi_path", "/openapi.json")?
            .set_default("log.format", "pretty")?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ApiConfig {
    /// Normalized mount prefix: either empty or `/segment[/segment...]` with no
    /// trailing slash.
    pub fn mount_prefix(&self) -> String {
        let trimmed = self.prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }
}
