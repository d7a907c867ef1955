use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the four JSON documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Directory served as static files on the root path.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), static_dir: default_static_dir() }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3000 }
fn default_data_dir() -> String { "data".to_string() }
fn default_static_dir() -> String { ".".to_string() }

/// `CONFIG_PATH`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file first; environment variables and defaults when it is missing or invalid.
    ///
    /// The returned error explains why the file was not used. A missing file is
    /// the normal case and yields no error.
    pub fn load_or_env() -> (Self, Option<anyhow::Error>) {
        Self::load_or_env_from(&config_path())
    }

    pub fn load_or_env_from(path: &str) -> (Self, Option<anyhow::Error>) {
        let file_error = match load_from_file(path).and_then(|mut cfg| {
            cfg.normalize_and_validate()?;
            Ok(cfg)
        }) {
            Ok(cfg) => return (cfg, None),
            Err(e) if is_not_found(&e) => None,
            Err(e) => Some(e.context(format!("ignoring config file {path}"))),
        };

        let mut cfg = Self::from_env();
        if let Err(e) = cfg.normalize_and_validate() {
            return (Self::default(), Some(file_error.unwrap_or(e.context("ignoring environment overrides"))));
        }
        (cfg, file_error)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok());
        if let Ok(dir) = std::env::var("DATA_DIR") {
            cfg.storage.data_dir = dir;
        }
        if let Ok(dir) = std::env::var("STATIC_DIR") {
            cfg.storage.static_dir = dir;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        if self.static_dir.trim().is_empty() {
            return Err(anyhow!("storage.static_dir must not be empty"));
        }
        Ok(())
    }
}
