//! TOML-based configuration for Planner
//!
//! Infrastructure settings (server, auth, database) come from a TOML file
//! (`planner.toml` by default). The signing secret itself is never stored in
//! the file: `[auth] jwt_secret_env` names the environment variable that
//! holds it, and the server refuses to start when that variable is unset.

use crate::auth::jwt::{SigningSecret, TokenCodec, DEFAULT_TOKEN_TTL_SECS};
use crate::auth::password::PasswordHasher;
use crate::db::DatabaseProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from planner.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

/// Output format of the fmt logging layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable name containing the token signing secret
    #[serde(default = "default_jwt_secret_env")]
    pub jwt_secret_env: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,

    /// Argon2 memory cost in KiB
    #[serde(default = "default_hash_memory_kib")]
    pub hash_memory_kib: u32,

    /// Argon2 iteration count
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,

    /// Argon2 lanes
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
}

fn default_jwt_secret_env() -> String {
    "SECRET_KEY".to_string()
}

fn default_token_ttl() -> i64 {
    DEFAULT_TOKEN_TTL_SECS
}

fn default_hash_memory_kib() -> u32 {
    argon2::Params::DEFAULT_M_COST
}

fn default_hash_iterations() -> u32 {
    argon2::Params::DEFAULT_T_COST
}

fn default_hash_parallelism() -> u32 {
    argon2::Params::DEFAULT_P_COST
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret_env: default_jwt_secret_env(),
            token_ttl_secs: default_token_ttl(),
            hash_memory_kib: default_hash_memory_kib(),
            hash_iterations: default_hash_iterations(),
            hash_parallelism: default_hash_parallelism(),
        }
    }
}

// ============= Database Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Local database path, or `:memory:`
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_database_url() -> String {
    "./data/planner.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl PlannerConfig {
    /// Parse a TOML file without validating it
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Like [`read`](Self::read), but a missing file yields the defaults.
    /// The flag is `true` when the defaults were used.
    pub fn read_or_default<P: AsRef<Path>>(path: P) -> Result<(Self, bool), ConfigError> {
        match Self::read(path) {
            Ok(config) => Ok((config, false)),
            Err(ConfigError::FileNotFound(_)) => Ok((Self::default(), true)),
            Err(e) => Err(e),
        }
    }

    /// Validate the configuration for internal consistency and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt_secret()?;

        if self.auth.token_ttl_secs <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "auth.token_ttl_secs must be positive, got {}",
                self.auth.token_ttl_secs
            )));
        }

        self.password_hasher()?;

        Ok(())
    }

    /// Get the signing secret from the environment. Empty counts as unset.
    pub fn jwt_secret(&self) -> Result<SigningSecret, ConfigError> {
        std::env::var(&self.auth.jwt_secret_env)
            .ok()
            .and_then(SigningSecret::new)
            .ok_or_else(|| ConfigError::MissingEnvVar(self.auth.jwt_secret_env.clone()))
    }

    /// Build the token codec with the configured secret and TTL
    pub fn token_codec(&self) -> Result<TokenCodec, ConfigError> {
        Ok(TokenCodec::new(&self.jwt_secret()?, self.auth.token_ttl_secs))
    }

    /// Build the password hasher with the configured argon2 cost
    pub fn password_hasher(&self) -> Result<PasswordHasher, ConfigError> {
        PasswordHasher::new(
            self.auth.hash_memory_kib,
            self.auth.hash_iterations,
            self.auth.hash_parallelism,
        )
        .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    pub fn database_provider(&self) -> DatabaseProvider {
        DatabaseProvider::from_url(&self.database.url)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_test_config(secret_env: &str) -> String {
        format!(
            r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"
log_format = "json"

[auth]
jwt_secret_env = "{}"
token_ttl_secs = 600
hash_memory_kib = 8
hash_iterations = 1
hash_parallelism = 1

[database]
url = ":memory:"
"#,
            secret_env
        )
    }

    #[test]
    fn test_parse_config() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("PLANNER_TEST_PARSE_SECRET", "test-secret");
        }

        let config: PlannerConfig =
            toml::from_str(&create_test_config("PLANNER_TEST_PARSE_SECRET"))
                .expect("Failed to parse config");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.token_ttl_secs, 600);
        assert_eq!(config.database_provider(), DatabaseProvider::Memory);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: PlannerConfig = toml::from_str("").expect("empty config should parse");

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_format, LogFormat::Pretty);
        assert_eq!(config.auth.jwt_secret_env, "SECRET_KEY");
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert_eq!(config.database.url, "./data/planner.db");
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let config: PlannerConfig =
            toml::from_str(&create_test_config("PLANNER_TEST_UNSET_SECRET")).unwrap();

        let result = config.validate();

        assert!(matches!(result, Err(ConfigError::MissingEnvVar(name)) if name == "PLANNER_TEST_UNSET_SECRET"));
    }

    #[test]
    fn test_empty_secret_is_fatal() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("PLANNER_TEST_EMPTY_SECRET", "");
        }
        let config: PlannerConfig =
            toml::from_str(&create_test_config("PLANNER_TEST_EMPTY_SECRET")).unwrap();

        assert!(matches!(
            config.jwt_secret(),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("PLANNER_TEST_TTL_SECRET", "test-secret");
        }
        let mut config: PlannerConfig =
            toml::from_str(&create_test_config("PLANNER_TEST_TTL_SECRET")).unwrap();
        config.auth.token_ttl_secs = 0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_invalid_hash_params_rejected() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("PLANNER_TEST_HASH_SECRET", "test-secret");
        }
        let mut config: PlannerConfig =
            toml::from_str(&create_test_config("PLANNER_TEST_HASH_SECRET")).unwrap();
        config.auth.hash_iterations = 0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_read_from_file() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("PLANNER_TEST_FILE_SECRET", "test-secret");
        }
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(create_test_config("PLANNER_TEST_FILE_SECRET").as_bytes())
            .unwrap();

        let config = PlannerConfig::read(file.path()).expect("should read");
        config.validate().expect("should validate");

        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert!(config.token_codec().is_ok());
    }

    #[test]
    fn test_read_missing_file() {
        let result = PlannerConfig::read("/definitely/not/here/planner.toml");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_read_or_default_missing_file() {
        let (config, defaulted) =
            PlannerConfig::read_or_default("/definitely/not/here/planner.toml").unwrap();

        assert!(defaulted);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_read_or_default_skips_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(create_test_config("PLANNER_TEST_NEVER_SET_SECRET").as_bytes())
            .unwrap();

        let (config, defaulted) = PlannerConfig::read_or_default(file.path()).unwrap();

        assert!(!defaulted);
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[server\nport = ").unwrap();

        assert!(matches!(
            PlannerConfig::read(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
