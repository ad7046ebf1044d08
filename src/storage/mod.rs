// file: src/storage/mod.rs

use std::collections::HashMap;

use anyhow::Context;
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, Row, Sqlite};

use crate::error::AppResult;
use crate::models::{CalendarProvider, NotesData, TokenRecord};

/// Storage key for the whole-blob token map.
pub const TOKENS_KEY: &str = "auth_tokens";
/// Storage key for the whole-blob notes index.
pub const NOTES_KEY: &str = "xcalendar-notes";

/// SQLite-backed key-value store.
///
/// Each logical record is serialized as one JSON blob and replaced whole on
/// every write. The design assumes a single writer at a time; a concurrent
/// second writer would lose updates (last write wins on the whole blob).
#[derive(Clone)]
pub struct Storage {
    pub pool: SqlitePool,
}

impl Storage {
    /// Open the store at the platform data directory, creating it on first
    /// run.
    pub async fn new() -> AppResult<Self> {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("xcalendar");
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;

        let db_path = format!("sqlite:{}?mode=rwc", data_dir.join("xcalendar.db").display());
        Self::open(&db_path).await
    }

    /// Open the store at an explicit sqlite URL.
    pub async fn open(db_path: &str) -> AppResult<Self> {
        let db_exists = Sqlite::database_exists(db_path)
            .await
            .context("Failed to check if database exists")?;
        if !db_exists {
            info!("Creating storage database");
            Sqlite::create_database(db_path)
                .await
                .context("Failed to create database")?;
        }

        let pool = SqlitePool::connect(db_path)
            .await
            .context("Failed to connect to database")?;

        run_schema(&pool).await?;

        info!("Storage initialized");
        Ok(Storage { pool })
    }

    /// In-memory store for tests. Pinned to one connection; every pooled
    /// connection would otherwise see its own empty memory database.
    pub async fn in_memory() -> AppResult<Self> {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;
        run_schema(&pool).await?;
        Ok(Storage { pool })
    }

    /// Read one logical record whole. `None` when the key was never written.
    pub async fn get_record<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let raw: String = row.get("value");
                Ok(Some(serde_json::from_str(&raw)?))
            }
            None => Ok(None),
        }
    }

    /// Replace one logical record whole.
    pub async fn put_record<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        )
        .bind(key)
        .bind(raw)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // --- Typed delegates ---

    pub async fn load_tokens(&self) -> AppResult<HashMap<CalendarProvider, TokenRecord>> {
        Ok(self.get_record(TOKENS_KEY).await?.unwrap_or_default())
    }

    pub async fn save_tokens(
        &self,
        tokens: &HashMap<CalendarProvider, TokenRecord>,
    ) -> AppResult<()> {
        self.put_record(TOKENS_KEY, tokens).await
    }

    pub async fn load_notes(&self) -> AppResult<NotesData> {
        Ok(self.get_record(NOTES_KEY).await?.unwrap_or_default())
    }

    pub async fn save_notes(&self, notes: &NotesData) -> AppResult<()> {
        self.put_record(NOTES_KEY, notes).await
    }
}

async fn run_schema(pool: &SqlitePool) -> AppResult<()> {
    let schema = include_str!("schema.sql");

    let mut current_statement = String::new();
    for line in schema.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") || trimmed.is_empty() {
            continue;
        }

        current_statement.push_str(line);
        current_statement.push('\n');

        if trimmed.ends_with(';') {
            sqlx::query(&current_statement).execute(pool).await?;
            current_statement.clear();
        }
    }
    Ok(())
}
