//! CLI module for Planner
//!
//! Provides command-line interface parsing and handling for the planner-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use crate::utils::toml_config::PlannerConfig;
use clap::{Parser, Subcommand};
use output::Output;
use std::path::PathBuf;

/// Planner - event planning API server
#[derive(Parser, Debug)]
#[command(
    name = "planner-server",
    version,
    about = "Planner - event planning API with bearer-token authentication",
    after_help = "EXAMPLES:\n    \
                  planner-server init              # Write planner.toml and .env.example\n    \
                  planner-server                   # Start the server\n    \
                  planner-server --config my.toml  # Use a custom config file\n    \
                  planner-server config --validate # Check configuration and secret"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(
        short,
        long,
        default_value = "planner.toml",
        env = "PLANNER_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter planner.toml and .env.example
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files without prompting
        #[arg(short, long)]
        force: bool,

        /// Host address for the server
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "3000")]
        port: u16,
    },

    /// Show configuration information
    Config {
        /// Fail unless the configuration (including the secret) is valid
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Output helper honoring `--no-color`
    pub fn output(&self) -> Output {
        if self.no_color {
            Output::no_color()
        } else {
            Output::new()
        }
    }
}

/// Prints a configuration summary. The secret's value is never shown, only
/// whether its environment variable resolves.
pub fn show_config(config: &PlannerConfig, output: &Output) {
    output.header("Server");
    output.kv("bind", &config.bind_address());
    output.kv("log_level", &config.server.log_level);

    output.header("Auth");
    let secret_state = if config.jwt_secret().is_ok() {
        "set"
    } else {
        "NOT SET"
    };
    output.kv(
        "secret",
        &format!("${} ({})", config.auth.jwt_secret_env, secret_state),
    );
    output.kv("token_ttl_secs", &config.auth.token_ttl_secs.to_string());
    output.kv(
        "argon2",
        &format!(
            "m={} t={} p={}",
            config.auth.hash_memory_kib, config.auth.hash_iterations, config.auth.hash_parallelism
        ),
    );

    output.header("Database");
    output.kv("url", &config.database.url);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["planner-server"]).unwrap();

        assert_eq!(cli.config, PathBuf::from("planner.toml"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_init_subcommand() {
        let cli =
            Cli::try_parse_from(["planner-server", "init", "/tmp/x", "--force", "--port", "9000"])
                .unwrap();

        match cli.command {
            Some(Commands::Init {
                path, force, port, ..
            }) => {
                assert_eq!(path, PathBuf::from("/tmp/x"));
                assert!(force);
                assert_eq!(port, 9000);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["planner-server", "config", "--validate", "-c", "other.toml"])
                .unwrap();

        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(cli.command, Some(Commands::Config { validate: true })));
    }
}
