use crate::types::{AppError, Event, EventCreate, Result};
use chrono::Utc;
use libsql::{Builder, Connection, Database, Row};
use std::path::Path;

/// Stored credential record.
#[derive(Debug, Clone)]
pub struct User {
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

/// libsql-backed store for users and events.
///
/// A single connection is held for the client's lifetime so that the
/// in-memory backend keeps one database across calls.
pub struct TursoClient {
    _db: Database,
    conn: Connection,
}

impl TursoClient {
    /// Opens an ephemeral in-memory database.
    pub async fn new_memory() -> Result<Self> {
        Self::open(":memory:").await
    }

    /// Opens (or creates) a SQLite file at `path`.
    pub async fn new_local(path: &str) -> Result<Self> {
        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        AppError::Database(format!("Failed to create database directory: {}", e))
                    })?;
                }
            }
        }
        Self::open(path).await
    }

    async fn open(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;
        let conn = db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;

        let client = Self { _db: db, conn };
        client.initialize_schema().await?;

        tracing::debug!(path = %path, "database ready");
        Ok(client)
    }

    pub fn connection(&self) -> Result<Connection> {
        Ok(self.conn.clone())
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        // Users table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

        // Events table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                creator TEXT NOT NULL,
                title TEXT NOT NULL,
                image TEXT NOT NULL,
                description TEXT NOT NULL,
                tags TEXT NOT NULL,
                location TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create events table: {}", e)))?;

        Ok(())
    }

    // User operations

    /// Inserts a credential. A duplicate email is reported as a conflict.
    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<()> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO users (email, password_hash, created_at) VALUES (?, ?, ?)",
            (email, password_hash, now),
        )
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                AppError::Conflict("User with supplied email exists".to_string())
            } else {
                AppError::Database(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(())
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT email, password_hash, created_at FROM users WHERE email = ?",
                [email],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Ok(Some(User {
                email: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
                password_hash: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
                created_at: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
            }))
        } else {
            Ok(None)
        }
    }

    // Event operations

    /// Stores a new event owned by `creator` and returns its id.
    pub async fn create_event(&self, event: &EventCreate, creator: &str) -> Result<i64> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();
        let tags = encode_tags(&event.tags)?;

        let mut rows = conn
            .query(
                "INSERT INTO events
                 (creator, title, image, description, tags, location, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                 RETURNING id",
                (
                    creator,
                    event.title.as_str(),
                    event.image.as_str(),
                    event.description.as_str(),
                    tags,
                    event.location.as_str(),
                    now,
                    now,
                ),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to create event: {}", e)))?;

        let row = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::Database("Insert returned no id".to_string()))?;

        row.get(0).map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn list_events(&self) -> Result<Vec<Event>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, creator, title, image, description, tags, location
                 FROM events ORDER BY id ASC",
                (),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query events: {}", e)))?;

        let mut events = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            events.push(event_from_row(&row)?);
        }

        Ok(events)
    }

    pub async fn get_event(&self, id: i64) -> Result<Option<Event>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, creator, title, image, description, tags, location
                 FROM events WHERE id = ?",
                [id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query event: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(event_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Writes the editable fields of `event` back; returns whether the row
    /// still existed. `creator` is never written.
    pub async fn update_event(&self, event: &Event) -> Result<bool> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();
        let tags = encode_tags(&event.tags)?;

        let affected = conn
            .execute(
                "UPDATE events
                 SET title = ?, image = ?, description = ?, tags = ?, location = ?, updated_at = ?
                 WHERE id = ?",
                (
                    event.title.as_str(),
                    event.image.as_str(),
                    event.description.as_str(),
                    tags,
                    event.location.as_str(),
                    now,
                    event.id,
                ),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to update event: {}", e)))?;

        Ok(affected > 0)
    }

    /// Deletes an event; returns whether a row was removed.
    pub async fn delete_event(&self, id: i64) -> Result<bool> {
        let conn = self.connection()?;

        let affected = conn
            .execute("DELETE FROM events WHERE id = ?", [id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete event: {}", e)))?;

        Ok(affected > 0)
    }
}

fn encode_tags(tags: &[String]) -> Result<String> {
    serde_json::to_string(tags).map_err(|e| AppError::Internal(format!("Failed to encode tags: {}", e)))
}

fn event_from_row(row: &Row) -> Result<Event> {
    let tags: String = row.get(5).map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Event {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        creator: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        title: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        image: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
        description: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
        tags: serde_json::from_str(&tags)
            .map_err(|e| AppError::Database(format!("Corrupt tags column: {}", e)))?,
        location: row.get(6).map_err(|e| AppError::Database(e.to_string()))?,
    })
}
