//! Layered server configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (parley.toml shipped with the crate)
//! 2. `~/.config/parley/parley.toml`
//! 3. `./parley.toml`
//! 4. Environment variables `PARLEY__SECTION__KEY`
//!
//! The access password may also come from `ACCESS_PASSWORD`.

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use parley_error::{ConfigError, ParleyError, ParleyResult};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../parley.toml");

/// Environment variable consulted when no password is configured.
pub const PASSWORD_ENV: &str = "ACCESS_PASSWORD";

/// Listening address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl ServerConfig {
    /// Parses `host:port` into a socket address.
    pub fn socket_addr(&self) -> ParleyResult<SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            ParleyError::from(ConfigError::new(format!(
                "Invalid listen address {}:{}: {}",
                self.host, self.port, e
            )))
        })
    }
}

/// Where conversations are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the index and CSV files
    pub data_dir: PathBuf,
}

/// Password gate settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Shared access password; `None` disables logging in
    #[serde(default)]
    pub password: Option<String>,
    /// Lifetime of the auth cookie
    pub cookie_max_age_secs: u64,
    /// Mark the auth cookie `Secure`
    #[serde(default)]
    pub secure_cookie: bool,
}

impl AuthConfig {
    /// The configured password, ignoring blank values.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json: bool,
}

/// Top-level Parley configuration.
///
/// # Example
///
/// ```no_run
/// use parley_server::ParleyConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ParleyConfig::load()?;
/// println!("Listening on {}:{}", config.server.host, config.server.port);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParleyConfig {
    /// Listening address
    pub server: ServerConfig,
    /// Storage location
    pub storage: StorageConfig,
    /// Password gate
    pub auth: AuthConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ParleyConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("./conversations"),
            },
            auth: AuthConfig {
                password: None,
                cookie_max_age_secs: 7 * 24 * 60 * 60,
                secure_cookie: false,
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl ParleyConfig {
    /// Load configuration with the standard precedence.
    #[instrument]
    pub fn load() -> ParleyResult<Self> {
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/parley/parley.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("parley").required(false));
        Self::finish(builder)
    }

    /// Load bundled defaults overlaid with one explicit file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ParleyResult<Self> {
        debug!("Loading configuration from file");
        let builder = Self::defaults().add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> ParleyResult<Self> {
        let mut config: Self = builder
            .add_source(
                Environment::with_prefix("PARLEY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                ParleyError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ParleyError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        if config.auth.password().is_none()
            && let Ok(password) = std::env::var(PASSWORD_ENV)
        {
            debug!("Using access password from {}", PASSWORD_ENV);
            config.auth.password = Some(password);
        }

        Ok(config)
    }
}
