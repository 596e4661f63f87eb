//! SQLite storage layer.
//!
//! This module provides async database operations with:
//! - Connection pooling
//! - Automatic migrations
//! - WAL mode for concurrent reads/writes
//!
//! The pool is owned by [`Database`] and handed to the pricing engine and
//! filter builder as an injected dependency, never as ambient global state.

pub mod count;
pub mod params;
pub mod places;
pub mod reference;
pub mod users;

use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::filter::{NamedRow, ReferenceLookup};
use crate::pricing::{Parameter, ParameterLookup};
use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Storage handle shared across handlers and the core components.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the configured SQLite database and run migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// In-memory database for tests. A single connection keeps all queries on
    /// the same SQLite memory instance.
    pub async fn connect_in_memory() -> Result<Self> {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 5,
        };
        Self::connect(&config).await
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database migrations completed");
        Ok(())
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// The core components consume Database through these seams only.

impl ParameterLookup for Database {
    async fn parameter_by_name(&self, name: &str) -> Result<Option<Parameter>, AppError> {
        params::parameter_by_name(self, name).await
    }

    async fn parameter_by_id(&self, id: i64) -> Result<Option<Parameter>, AppError> {
        params::parameter_by_id(self, id).await
    }
}

impl ReferenceLookup for Database {
    async fn income_by_id(&self, id: i64) -> Result<Option<NamedRow>, AppError> {
        reference::income_by_id(self, id).await
    }

    async fn family_situation_by_id(&self, id: i64) -> Result<Option<NamedRow>, AppError> {
        reference::family_situation_by_id(self, id).await
    }
}
