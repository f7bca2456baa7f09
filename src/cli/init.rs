//! Init command implementation
//!
//! Writes a starter `planner.toml` and `.env.example` into a directory.

use super::output::Output;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug, PartialEq, Eq)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// Project already exists (planner.toml found)
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// Host address for the server
    pub host: String,
    /// Port for the server
    pub port: u16,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing Planner");

    let base_path = &config.path;
    let config_path = base_path.join("planner.toml");
    if config_path.exists() && !config.force {
        output.warning("planner.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    if let Err(e) = fs::create_dir_all(base_path.join("data")) {
        output.error(&format!("Failed to create data directory: {}", e));
        return InitResult::Error(e.to_string());
    }

    if let Err(e) = write_file(&config_path, &generate_planner_toml(&config), config.force) {
        output.error(&format!("Failed to create planner.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "planner.toml");

    let env_path = base_path.join(".env.example");
    match write_file(&env_path, ENV_EXAMPLE, config.force) {
        Ok(()) => output.created("env", ".env.example"),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            output.skipped(".env.example", "already exists")
        }
        Err(e) => {
            output.error(&format!("Failed to create .env.example: {}", e));
            return InitResult::Error(e.to_string());
        }
    }

    output.success("Planner initialized");
    output.header("Next Steps");
    output.info("1. Provide the token signing secret:");
    output.command("cp .env.example .env");
    output.command("# Edit .env and set SECRET_KEY to a long random value");
    output.info("2. Start the server:");
    output.command("planner-server");

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists", path.display()),
        ));
    }
    fs::write(path, content)
}

const ENV_EXAMPLE: &str = "\
# Token signing secret. The server will not start without it.
SECRET_KEY=change-me-to-a-long-random-string

# Optional: overrides [server] log_level
# RUST_LOG=planner=debug,tower_http=debug
";

fn generate_planner_toml(config: &InitConfig) -> String {
    format!(
        r#"# Planner configuration

[server]
host = "{host}"
port = {port}
log_level = "info"
# "pretty" or "json"
log_format = "pretty"

[auth]
# Name of the environment variable holding the token signing secret
jwt_secret_env = "SECRET_KEY"
# Access token lifetime in seconds
token_ttl_secs = 3600
# Argon2id cost
hash_memory_kib = 19456
hash_iterations = 2
hash_parallelism = 1

[database]
# SQLite file path, or ":memory:" for an ephemeral database
url = "./data/planner.db"
"#,
        host = config.host,
        port = config.port
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::toml_config::PlannerConfig;

    fn init_config(path: &Path, force: bool) -> InitConfig {
        InitConfig {
            path: path.to_path_buf(),
            force,
            host: "0.0.0.0".to_string(),
            port: 8088,
        }
    }

    #[test]
    fn test_init_writes_parseable_config() {
        let dir = tempfile::tempdir().unwrap();

        let result = run(init_config(dir.path(), false), &Output::no_color());

        assert_eq!(result, InitResult::Success);
        let content = fs::read_to_string(dir.path().join("planner.toml")).unwrap();
        let config: PlannerConfig = toml::from_str(&content).expect("generated config parses");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.auth.jwt_secret_env, "SECRET_KEY");
        assert!(dir.path().join(".env.example").exists());
        assert!(dir.path().join("data").is_dir());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("planner.toml"), "# mine").unwrap();

        let result = run(init_config(dir.path(), false), &Output::no_color());

        assert_eq!(result, InitResult::AlreadyExists);
        assert_eq!(
            fs::read_to_string(dir.path().join("planner.toml")).unwrap(),
            "# mine"
        );
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("planner.toml"), "# mine").unwrap();

        let result = run(init_config(dir.path(), true), &Output::no_color());

        assert_eq!(result, InitResult::Success);
        assert!(fs::read_to_string(dir.path().join("planner.toml"))
            .unwrap()
            .contains("[auth]"));
    }
}
