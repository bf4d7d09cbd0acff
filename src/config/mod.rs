use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Complete worldsync configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub world: WorldBehaviorConfig,
}

/// HTTP listen address
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Request handling limits and static assets
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Maximum accepted entity body size
    #[serde(default = "default_body_size_limit")]
    pub body_size_limit_bytes: usize,
    /// Directory served under /static
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_body_size_limit() -> usize {
    1_048_576 // 1 MB
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            body_size_limit_bytes: default_body_size_limit(),
            static_dir: default_static_dir(),
        }
    }
}

/// World semantics switches
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorldBehaviorConfig {
    /// When true, /clear also drops every listener and its pending diff
    #[serde(default)]
    pub clear_resets_listeners: bool,
}

impl WorldConfig {
    /// Override fields from WORLDSYNC_* env vars. Unparsable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("WORLDSYNC_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("WORLDSYNC_PORT") {
            if let Ok(n) = v.parse::<u16>() {
                self.server.port = n;
            }
        }
        if let Some(v) = lookup("WORLDSYNC_BODY_SIZE_LIMIT_BYTES") {
            if let Ok(n) = v.parse::<usize>() {
                self.api.body_size_limit_bytes = n;
            }
        }
        if let Some(v) = lookup("WORLDSYNC_STATIC_DIR") {
            self.api.static_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("WORLDSYNC_CLEAR_RESETS_LISTENERS") {
            if let Ok(b) = v.parse::<bool>() {
                self.world.clear_resets_listeners = b;
            }
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<WorldConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: WorldConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Load configuration from `path` if it exists, defaults otherwise, then apply env overrides
pub fn load_or_default(path: impl AsRef<Path>) -> Result<WorldConfig> {
    let path = path.as_ref();
    let mut config = if path.exists() {
        load_config(path)?
    } else {
        WorldConfig::default()
    };
    config.apply_env_overrides();
    Ok(config)
}
