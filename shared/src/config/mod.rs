//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `cache` - Store backend selection and Redis configuration
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Fixed-window policies for SMS, signup and email
//! - `server` - HTTP server and CORS configuration
//! - `sms` - SMS channel order and provider credentials
//! - `verification` - Code lifetime and attempt limits
//!
//! Values are layered: built-in defaults, then `config/config.<env>.toml`,
//! then `ESCROW__`-prefixed environment variables (`ESCROW__SERVER__PORT=3001`).

pub mod cache;
pub mod environment;
pub mod rate_limit;
pub mod server;
pub mod sms;
pub mod verification;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

// Re-export commonly used types
pub use cache::{CacheBackend, CacheConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::{RateLimitConfig, RateLimitPolicy};
pub use server::{CorsConfig, ServerConfig};
pub use sms::{SmsConfig, SmsProviderKind, TwilioConfig, VonageConfig};
pub use verification::VerificationConfig;

/// Prefix of environment variables overriding file values
pub const ENV_PREFIX: &str = "ESCROW";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub verification: VerificationConfig,

    #[serde(default)]
    pub sms: SmsConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub cors: CorsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for an environment
    pub fn for_environment(environment: Environment) -> Self {
        let server = if environment.is_development() {
            ServerConfig::default()
        } else {
            ServerConfig::new("0.0.0.0", 8080)
        };

        Self {
            environment,
            server,
            rate_limit: RateLimitConfig::default(),
            verification: VerificationConfig::default(),
            sms: SmsConfig::default(),
            cache: CacheConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration for the environment named by `ENVIRONMENT`/`ENV`/`RUST_ENV`,
    /// reading the optional file from `./config`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::from_env(), "config")
    }

    /// Layer defaults, the environment's file in `config_dir`, and `ESCROW__*` variables
    pub fn load_from(
        environment: Environment,
        config_dir: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        let defaults = Config::try_from(&Self::for_environment(environment))?;
        let file = config_dir.as_ref().join(environment.config_file());

        let mut config: AppConfig = Config::builder()
            .add_source(defaults)
            .add_source(File::from(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.sms.apply_provider_env();
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only fail later, at request or sweep time
    pub fn validate(&self) -> Result<(), ConfigError> {
        let policies = [
            ("rate_limit.sms_send", self.rate_limit.sms_send),
            ("rate_limit.sms_verify", self.rate_limit.sms_verify),
            ("rate_limit.signup", self.rate_limit.signup),
            ("rate_limit.email_send", self.rate_limit.email_send),
        ];
        for (name, policy) in policies {
            if policy.max_attempts == 0 || policy.window_ms == 0 {
                return Err(invalid(name, "max_attempts and window_ms must be positive"));
            }
        }

        if self.rate_limit.ip_multiplier == 0 {
            return Err(invalid("rate_limit.ip_multiplier", "must be positive"));
        }
        if self.rate_limit.cleanup_interval_secs == 0 {
            return Err(invalid("rate_limit.cleanup_interval_secs", "must be positive"));
        }
        if self.verification.code_expiry_minutes == 0 {
            return Err(invalid("verification.code_expiry_minutes", "must be positive"));
        }
        if self.verification.max_attempts == 0 {
            return Err(invalid("verification.max_attempts", "must be positive"));
        }
        if self.verification.cleanup_interval_secs == 0 {
            return Err(invalid("verification.cleanup_interval_secs", "must be positive"));
        }
        if self.sms.request_timeout_secs == 0 {
            return Err(invalid("sms.request_timeout_secs", "must be positive"));
        }

        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::Message(format!("invalid {}: {}", key, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_survive_layering() {
        let config = AppConfig::load_from(Environment::Production, "does-not-exist").unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.rate_limit.sms_send, RateLimitPolicy::SMS_SEND);
        assert_eq!(config.verification.code_expiry_minutes, 5);
        assert_eq!(config.verification.max_attempts, 5);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_development_defaults() {
        let config = AppConfig::default();
        assert!(config.environment.is_development());
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.rate_limit.ip_multiplier, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let mut config = AppConfig::default();
        config.verification.cleanup_interval_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("verification.cleanup_interval_secs"));

        let mut config = AppConfig::default();
        config.rate_limit.cleanup_interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.verification.code_expiry_minutes = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.rate_limit.sms_verify = RateLimitPolicy::new(5, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_fails_on_invalid_file() {
        let dir = std::env::temp_dir().join(format!("escrow-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(Environment::Staging.config_file()),
            "[verification]\ncleanup_interval_secs = 0\n",
        )
        .unwrap();

        let result = AppConfig::load_from(Environment::Staging, &dir);
        std::fs::remove_dir_all(&dir).ok();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("cleanup_interval_secs"));
    }
}
