use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ScoreBreakdown;

/// Errors that can occur when interacting with the history store
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// One persisted analysis run for a trip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub trip_name: String,
    /// `None` when the run ended without a viable package
    pub package_name: Option<String>,
    pub total_score: Option<f64>,
    pub destination_mismatch: bool,
    pub breakdown: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Aggregate view of a trip's analysis runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub trip_name: String,
    pub total_runs: i64,
    pub matched: i64,
    pub unmatched: i64,
    pub best_score: Option<f64>,
    pub last_run_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// PostgreSQL store for analysis history
///
/// Keeps an append-only log of match analyses per trip, separate from
/// the CRM's own database, so advisors can see how a trip's match
/// evolved as its requirements changed.
pub struct HistoryStore {
    pool: PgPool,
}

impl HistoryStore {
    /// Create a new history store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
    ) -> Result<Self, HistoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new history store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, HistoryError> {
        tracing::info!(
            "Connecting to PostgreSQL (max_connections={})",
            max_connections.unwrap_or(10)
        );

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            acquire_timeout_secs.unwrap_or(5),
            idle_timeout_secs.unwrap_or(600),
        )
        .await
    }

    /// Append one analysis run for a trip.
    ///
    /// `package_name` and the breakdown are absent for runs that ended
    /// without a viable package. Returns the new record's id.
    pub async fn record_analysis(
        &self,
        trip_name: &str,
        package_name: Option<&str>,
        total_score: Option<f64>,
        destination_mismatch: bool,
        breakdown: Option<&ScoreBreakdown>,
    ) -> Result<Uuid, HistoryError> {
        let id = Uuid::new_v4();
        let breakdown_json = match breakdown {
            Some(b) => Some(serde_json::to_value(b)?),
            None => None,
        };

        let query = r#"
            INSERT INTO match_analyses
                (id, trip_name, package_name, total_score, destination_mismatch, breakdown, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
        "#;

        sqlx::query(query)
            .bind(id)
            .bind(trip_name)
            .bind(package_name)
            .bind(total_score)
            .bind(destination_mismatch)
            .bind(breakdown_json)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded analysis for {}: package={:?} score={:?}",
            trip_name,
            package_name,
            total_score
        );

        Ok(id)
    }

    /// Most recent analysis runs for a trip, newest first
    pub async fn recent_for_trip(
        &self,
        trip_name: &str,
        limit: i64,
    ) -> Result<Vec<AnalysisRecord>, HistoryError> {
        let query = r#"
            SELECT id, trip_name, package_name, total_score, destination_mismatch, breakdown, created_at
            FROM match_analyses
            WHERE trip_name = $1
            ORDER BY created_at DESC
            LIMIT $2
        "#;

        let rows = sqlx::query(query)
            .bind(trip_name)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(|row| AnalysisRecord {
                id: row.get("id"),
                trip_name: row.get("trip_name"),
                package_name: row.get("package_name"),
                total_score: row.get("total_score"),
                destination_mismatch: row.get("destination_mismatch"),
                breakdown: row.get("breakdown"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(records)
    }

    /// Delete a trip's analysis history (e.g. after the trip closes)
    pub async fn clear_for_trip(&self, trip_name: &str) -> Result<u64, HistoryError> {
        let query = r#"
            DELETE FROM match_analyses
            WHERE trip_name = $1
        "#;

        let result = sqlx::query(query).bind(trip_name).execute(&self.pool).await?;

        tracing::info!(
            "Cleared {} analysis records for trip {}",
            result.rows_affected(),
            trip_name
        );

        Ok(result.rows_affected())
    }

    /// Aggregate statistics for a trip's analysis runs
    pub async fn stats_for_trip(&self, trip_name: &str) -> Result<AnalysisStats, HistoryError> {
        let query = r#"
            SELECT
                COUNT(*) as total_runs,
                COUNT(*) FILTER (WHERE package_name IS NOT NULL) as matched,
                COUNT(*) FILTER (WHERE package_name IS NULL) as unmatched,
                MAX(total_score) as best_score,
                MAX(created_at) as last_run_at
            FROM match_analyses
            WHERE trip_name = $1
        "#;

        let row = sqlx::query(query).bind(trip_name).fetch_one(&self.pool).await?;

        Ok(AnalysisStats {
            trip_name: trip_name.to_string(),
            total_runs: row.get("total_runs"),
            matched: row.get("matched"),
            unmatched: row.get("unmatched"),
            best_score: row.get("best_score"),
            last_run_at: row.get("last_run_at"),
        })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, HistoryError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
