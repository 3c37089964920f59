//! # configs
//!
//! Layered application configuration: built-in defaults, then an
//! optional `lectern.toml`, then `LECTERN_*` environment variables
//! (`.env` files are honored via dotenvy). Secrets stay wrapped in
//! `secrecy` so they never land in debug output.

use chrono::FixedOffset;
use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid schedule.utc_offset {0:?} (expected e.g. \"+05:30\")")]
    InvalidOffset(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,
    /// Origin allowed by CORS. Absent means same-origin only.
    #[serde(default)]
    pub cors_origin: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite url, e.g. `sqlite:lectern.db`.
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: SecretString,
    pub token_ttl_secs: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleConfig {
    /// UTC offset the scheduling day bucket is computed in, e.g. "+05:30".
    /// Absent means the host's offset at startup.
    #[serde(default)]
    pub utc_offset: Option<String>,
}

impl ScheduleConfig {
    pub fn offset(&self) -> Result<Option<FixedOffset>, ConfigError> {
        match &self.utc_offset {
            None => Ok(None),
            Some(raw) => raw
                .parse::<FixedOffset>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidOffset(raw.clone())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// Loads configuration with the default layering.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .set_default("server.bind_addr", "127.0.0.1:8001")?
            .set_default("database.url", "sqlite:lectern.db")?
            // Development fallback only; deployments set LECTERN_AUTH__JWT_SECRET.
            .set_default("auth.jwt_secret", "insecure-dev-secret")?
            .set_default("auth.token_ttl_secs", 86_400i64)?
            .set_default("log.json", false)?
            .add_source(File::with_name("lectern").required(false))
            .add_source(Environment::with_prefix("LECTERN").separator("__"))
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        tracing::debug!(bind_addr = %app.server.bind_addr, "configuration loaded");
        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_required_field() {
        let cfg = AppConfig::load().unwrap();
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:8001");
        assert_eq!(cfg.database.url, "sqlite:lectern.db");
        assert_eq!(cfg.auth.token_ttl_secs, 86_400);
        assert!(cfg.schedule.utc_offset.is_none());
        assert!(!cfg.log.json);
    }

    #[test]
    fn offset_parses_or_rejects() {
        let cfg = ScheduleConfig {
            utc_offset: Some("+05:30".into()),
        };
        let offset = cfg.offset().unwrap().unwrap();
        assert_eq!(offset.local_minus_utc(), 5 * 3600 + 1800);

        let bad = ScheduleConfig {
            utc_offset: Some("tomorrow".into()),
        };
        assert!(bad.offset().is_err());

        assert!(ScheduleConfig::default().offset().unwrap().is_none());
    }
}
