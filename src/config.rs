use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming an optional YAML configuration file.
pub const CONFIG_ENV: &str = "LANTERN_CONFIG";

/// Environment variable overriding the listening port.
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

/// Listener and per-connection limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Upper bound on bytes buffered while waiting for the request head.
    pub max_request_bytes: usize,
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
}

/// Where served files and canned error pages live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub root: PathBuf,
    pub index_document: String,
    /// Directory under `root` holding `404.html`, `415.html` and `500.html`.
    pub error_pages: PathBuf,
    /// Extra extension to content-type entries, e.g. `".txt": "text/plain"`.
    pub mime_types: BTreeMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            max_request_bytes: 8192,
            read_timeout_secs: 10,
            write_timeout_secs: 10,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./www"),
            index_document: "index.html".to_string(),
            error_pages: PathBuf::from("code"),
            mime_types: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Builds the configuration from `LANTERN_CONFIG` (if set) and `PORT`.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(port) = std::env::var(PORT_ENV) {
            cfg.server.port = port
                .parse()
                .with_context(|| format!("invalid {PORT_ENV} value {port:?}"))?;
        }

        Ok(cfg)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        Self::from_yaml(&text).with_context(|| format!("invalid config file {path}"))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

impl ServerConfig {
    /// The bind address is always loopback; only the port is configurable.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, self.port))
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}

impl StaticFilesConfig {
    pub fn error_pages_dir(&self) -> PathBuf {
        self.root.join(&self.error_pages)
    }
}
