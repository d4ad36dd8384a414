use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming a YAML configuration file.
pub const CONFIG_ENV: &str = "DOCSERVE_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub backlog: u32,
    /// Upper bound on live workers; `None` spawns one per connection freely.
    pub max_connections: Option<usize>,
    pub read_mode: ReadMode,
    pub max_request_bytes: usize,
}

/// How a worker collects the request line from its connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadMode {
    /// One read of at most `max_request_bytes`.
    Single,
    /// Keep reading until a line terminator arrives or the cap is hit.
    Line,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub root: PathBuf,
    pub default_document: String,
    /// Reject targets that would resolve outside `root`.
    pub contain_paths: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:6789".to_string(),
            backlog: 128,
            max_connections: None,
            read_mode: ReadMode::Single,
            max_request_bytes: 1024,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("web_files"),
            default_document: "index.html".to_string(),
            contain_paths: true,
        }
    }
}

impl Config {
    /// Loads configuration from `$DOCSERVE_CONFIG` if set, then applies the
    /// `LISTEN` and `DOCSERVE_ROOT` overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {:?}", path))?;
                Self::from_yaml(&text)
                    .with_context(|| format!("parsing config file {:?}", path))?
            }
            None => Self::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }
        if let Some(root) = std::env::var_os("DOCSERVE_ROOT") {
            cfg.static_files.root = PathBuf::from(root);
        }

        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(text)?;
        if cfg.server.max_request_bytes == 0 {
            anyhow::bail!("server.max_request_bytes must be greater than zero");
        }
        if cfg.server.max_connections == Some(0) {
            anyhow::bail!("server.max_connections must be greater than zero");
        }
        Ok(cfg)
    }

    /// Listen backlog, never below two pending connections.
    pub fn backlog(&self) -> u32 {
        self.server.backlog.max(2)
    }
}
