use serde::Deserialize;
use std::net::SocketAddr;

use domain::services::gate::DEFAULT_STAFF_ID;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// How to reach the backend-as-a-service.
///
/// `mode = "memory"` swaps in the in-process gateway, useful for local
/// development without a configured backend.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_mode")]
    pub mode: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

/// Best-effort side-channel endpoints. An empty URL disables the channel.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    #[serde(default)]
    pub notify_url: String,

    #[serde(default)]
    pub generate_url: String,

    #[serde(default = "default_services_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GateConfig {
    /// Staff id unlocking the group info editor.
    #[serde(default = "default_staff_id")]
    pub staff_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_backend_mode() -> String {
    "rest".to_string()
}
fn default_backend_timeout() -> u64 {
    10
}
fn default_bucket() -> String {
    "update-images".to_string()
}
fn default_services_timeout() -> u64 {
    10
}
fn default_staff_id() -> String {
    DEFAULT_STAFF_ID.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: default_backend_mode(),
            url: String::new(),
            api_key: String::new(),
            timeout_secs: default_backend_timeout(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            notify_url: String::new(),
            generate_url: String::new(),
            timeout_secs: default_services_timeout(),
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            staff_id: default_staff_id(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with MB__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("MB").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(config::ConfigError::Message)?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), String> {
        match self.backend.mode.as_str() {
            "memory" => Ok(()),
            "rest" => {
                if self.backend.url.is_empty() {
                    return Err("backend.url is required when backend.mode is \"rest\"".into());
                }
                if self.backend.api_key.is_empty() {
                    return Err("backend.api_key is required when backend.mode is \"rest\"".into());
                }
                Ok(())
            }
            other => Err(format!("unknown backend.mode \"{other}\"")),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], self.server.port)))
    }

    /// Configuration for tests: in-memory backend, side channels disabled.
    pub fn for_test() -> Self {
        Self {
            backend: BackendConfig {
                mode: "memory".to_string(),
                ..BackendConfig::default()
            },
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            services: ServicesConfig::default(),
            gate: GateConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
