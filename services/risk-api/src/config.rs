use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment};
use risk_engine::{AlertComparison, AlertPolicy};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-for-jwt";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub scoring: ScoringConfig,
    pub cors: CorsConfig,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// Mount point for every route, e.g. "" or "/api"
    pub route_prefix: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScoringConfig {
    pub use_mock_predictions: bool,
    pub alert_threshold: f64,
    pub alert_comparison: AlertComparison,
    #[serde(default)]
    pub noise_seed: Option<u64>,
}

impl ScoringConfig {
    pub fn alert_policy(&self) -> risk_engine::Result<AlertPolicy> {
        AlertPolicy::new(self.alert_threshold, self.alert_comparison)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    /// Comma separated origins; empty allows any origin
    pub allowed_origins: String,
    pub max_age: usize,
}

impl CorsConfig {
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub enabled: bool,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub seed_demo_users: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RateLimitConfig {
    /// 0 disables rate limiting
    pub requests_per_minute: u32,
}

impl Config {
    /// Built-in defaults only, no environment
    pub fn defaults() -> Result<Self, ConfigError> {
        let config: Self = Self::default_builder()?.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::default_builder()?
            .add_source(Environment::with_prefix("RISK_API").separator("__"));

        // Legacy variables understood by earlier deployments
        if let Ok(port) = env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        if let Ok(secret) = env::var("SECRET_KEY") {
            builder = builder.set_override("auth.jwt_secret", secret)?;
        }

        if let Ok(mock) = env::var("USE_MOCK_PREDICTIONS") {
            builder = builder.set_override("scoring.use_mock_predictions", mock)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn default_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            // Server defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.workers", 4)?
            .set_default("server.route_prefix", "")?
            // Scoring defaults
            .set_default("scoring.use_mock_predictions", true)?
            .set_default("scoring.alert_threshold", AlertPolicy::DEFAULT_THRESHOLD)?
            .set_default("scoring.alert_comparison", "exceeds")?
            // CORS defaults
            .set_default("cors.allowed_origins", "")?
            .set_default("cors.max_age", 3600)?
            // Auth defaults
            .set_default("auth.enabled", false)?
            .set_default("auth.jwt_secret", DEFAULT_JWT_SECRET)?
            .set_default("auth.token_ttl_hours", 24)?
            .set_default("auth.seed_demo_users", true)?
            // Rate limiting
            .set_default("rate_limit.requests_per_minute", 0)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.scoring
            .alert_policy()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        if self.server.workers == 0 {
            return Err(ConfigError::Message(
                "server.workers must be positive".to_string(),
            ));
        }

        let prefix = &self.server.route_prefix;
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            return Err(ConfigError::Message(format!(
                "route prefix '{}' must start with '/' and not end with one",
                prefix
            )));
        }

        if self.auth.token_ttl_hours <= 0 {
            return Err(ConfigError::Message(
                "auth.token_ttl_hours must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
