use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::incidents::scoring::{NightWindow, ScoringConfig};

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

/// Top-level configuration for the dashboard backend.
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            scoring: load_scoring()?,
        })
    }
}

fn load_scoring() -> Result<ScoringConfig, ConfigError> {
    let mut scoring = ScoringConfig::default();

    let start = hour_var("APP_NIGHT_START_HOUR", scoring.night.start_hour)?;
    let end = hour_var("APP_NIGHT_END_HOUR", scoring.night.end_hour)?;
    scoring.night = NightWindow::new(start, end);

    if let Ok(raw) = env::var("APP_CRITICAL_SCORE") {
        let critical = raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidCriticalScore { value: raw.clone() })?;
        if critical <= scoring.thresholds.high {
            return Err(ConfigError::InvalidCriticalScore { value: raw });
        }
        scoring.thresholds.critical = critical;
    }

    Ok(scoring)
}

fn hour_var(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<u32>() {
            Ok(hour) if hour < 24 => Ok(hour),
            _ => Err(ConfigError::InvalidNightHour { name, value: raw }),
        },
        Err(_) => Ok(default),
    }
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

/// Log output controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNightHour { name: &'static str, value: String },
    InvalidCriticalScore { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNightHour { name, value } => {
                write!(f, "{name} must be an hour between 0 and 23, found '{value}'")
            }
            ConfigError::InvalidCriticalScore { value } => write!(
                f,
                "APP_CRITICAL_SCORE must be an integer above the HIGH threshold, found '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNightHour { .. }
            | ConfigError::InvalidCriticalScore { .. } => None,
        }
    }
}
