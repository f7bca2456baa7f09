//! Relational storage for users and events.
//!
//! Backed by libsql (embedded SQLite). The provider is picked from the
//! `[database] url` setting:
//! - `:memory:` - ephemeral, used by the test suite
//! - any other value - a local SQLite file, created on first use

#![allow(missing_docs)]

pub mod turso;

pub use turso::{TursoClient, User};

use crate::types::Result;

/// Database provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
}

impl DatabaseProvider {
    /// Maps a configured database URL to a provider.
    pub fn from_url(url: &str) -> Self {
        if url.is_empty() || url == ":memory:" {
            DatabaseProvider::Memory
        } else {
            DatabaseProvider::SQLite {
                path: url.to_string(),
            }
        }
    }

    /// Create a database client from this provider configuration
    pub async fn create_client(&self) -> Result<TursoClient> {
        match self {
            DatabaseProvider::Memory => TursoClient::new_memory().await,
            DatabaseProvider::SQLite { path } => TursoClient::new_local(path).await,
        }
    }
}
