use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Largest accepted request body. Saved packages embed base64 images.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Where records are persisted and where static assets are served from.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), static_dir: default_static_dir() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 8000 }
fn default_max_body_bytes() -> usize { 64 * 1024 * 1024 }
fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_static_dir() -> PathBuf { PathBuf::from(".") }
fn default_log_format() -> String { "compact".into() }

/// `CONFIG_PATH`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

/// Source of override values, keyed by environment variable name.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads overrides from the process environment.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<F> EnvSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        self(key)
    }
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), fall back to defaults when the
    /// file is absent, apply environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = if std::path::Path::new(&config_path()).exists() {
            load_default()?
        } else {
            AppConfig::default()
        };
        cfg.apply_env(&ProcessEnv)?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`,
    /// `MAX_BODY_BYTES`, `DATA_DIR`, `STATIC_DIR` and `LOG_FORMAT` on top of
    /// the file values.
    pub fn apply_env(&mut self, env: &impl EnvSource) -> Result<()> {
        if let Some(host) = env.get("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env.get("SERVER_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow!("SERVER_PORT={port} is not a valid port: {e}"))?;
        }
        if let Some(threads) = env.get("TOKIO_WORKER_THREADS") {
            self.server.worker_threads = Some(
                threads
                    .trim()
                    .parse()
                    .map_err(|e| anyhow!("TOKIO_WORKER_THREADS={threads} is not a number: {e}"))?,
            );
        }
        if let Some(limit) = env.get("MAX_BODY_BYTES") {
            self.server.max_body_bytes = limit
                .trim()
                .parse()
                .map_err(|e| anyhow!("MAX_BODY_BYTES={limit} is not a number: {e}"))?;
        }
        if let Some(dir) = env.get("DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env.get("STATIC_DIR") {
            self.storage.static_dir = PathBuf::from(dir);
        }
        if let Some(format) = env.get("LOG_FORMAT") {
            self.logging.format = format;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize()?;
        self.logging.validate()?;
        Ok(())
    }

    /// `(host, port)` for `TcpListener::bind`; works for IPv6 hosts like `::`.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.server.host.as_str(), self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("server.max_body_bytes must be positive"));
        }
        Ok(())
    }
}

impl StorageConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        if self.static_dir.as_os_str().is_empty() {
            self.static_dir = default_static_dir();
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        match self.format.trim().to_ascii_lowercase().as_str() {
            "compact" | "json" => Ok(()),
            other => Err(anyhow!("logging.format must be `compact` or `json`, got `{other}`")),
        }
    }
}
