use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::barriers::{BarrierCatalog, CatalogError};
use crate::readiness::{ReadinessEngine, WeightTable, WeightTableError, DIMENSION_COUNT};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let barrier_catalog = env::var("READINESS_BARRIER_CATALOG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let legacy_weights = match env::var("READINESS_LEGACY_WEIGHTS") {
            Ok(value) if !value.trim().is_empty() => Some(parse_weights(&value)?),
            _ => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            scoring: ScoringConfig {
                barrier_catalog,
                legacy_weights,
            },
        })
    }
}

/// Parses eight comma-separated percentages in dimension order.
fn parse_weights(value: &str) -> Result<WeightTable, ConfigError> {
    let invalid = |reason: Option<WeightTableError>| ConfigError::InvalidWeights {
        value: value.to_string(),
        reason,
    };

    let parsed = value
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid(None))?;
    let weights: [u8; DIMENSION_COUNT] = parsed.try_into().map_err(|_| invalid(None))?;

    WeightTable::validated(weights).map_err(|source| invalid(Some(source)))
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Scoring inputs that deployments may override.
#[derive(Debug, Clone, Default)]
pub struct ScoringConfig {
    /// JSON barrier bank replacing the built-in one.
    pub barrier_catalog: Option<PathBuf>,
    /// Weights for legacy weighted-percentage sessions.
    pub legacy_weights: Option<WeightTable>,
}

impl ScoringConfig {
    pub fn engine(&self) -> ReadinessEngine {
        ReadinessEngine::new(self.legacy_weights.unwrap_or_default())
    }

    pub fn catalog(&self) -> Result<BarrierCatalog, CatalogError> {
        match &self.barrier_catalog {
            Some(path) => BarrierCatalog::from_path(path),
            None => Ok(BarrierCatalog::standard()),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidWeights {
        value: String,
        reason: Option<WeightTableError>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidWeights { value, reason } => match reason {
                Some(reason) => write!(f, "READINESS_LEGACY_WEIGHTS '{}': {}", value, reason),
                None => write!(
                    f,
                    "READINESS_LEGACY_WEIGHTS '{}' must be {} comma-separated percentages",
                    value, DIMENSION_COUNT
                ),
            },
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidWeights { reason, .. } => reason
                .as_ref()
                .map(|reason| reason as &(dyn std::error::Error + 'static)),
        }
    }
}
