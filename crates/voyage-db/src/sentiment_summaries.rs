//! Database operations for the `sentiment_summaries` table.
//!
//! One row per location. Every write replaces `pros`, `cons`, and
//! `updated_at` together; rows are never patched field by field.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use voyage_core::SentimentSummary;

use crate::DbError;

/// A row from the `sentiment_summaries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SentimentSummaryRow {
    pub location_id: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<SentimentSummaryRow> for SentimentSummary {
    fn from(row: SentimentSummaryRow) -> Self {
        Self {
            location_id: row.location_id,
            pros: row.pros,
            cons: row.cons,
            updated_at: row.updated_at,
        }
    }
}

/// Insert or replace the summary for a location and return the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_sentiment_summary(
    pool: &PgPool,
    location_id: &str,
    pros: &[String],
    cons: &[String],
) -> Result<SentimentSummaryRow, DbError> {
    let row = sqlx::query_as::<_, SentimentSummaryRow>(
        "INSERT INTO sentiment_summaries (location_id, pros, cons, updated_at) \
         VALUES ($1, $2, $3, NOW()) \
         ON CONFLICT (location_id) DO UPDATE SET \
             pros       = EXCLUDED.pros, \
             cons       = EXCLUDED.cons, \
             updated_at = EXCLUDED.updated_at \
         RETURNING location_id, pros, cons, updated_at",
    )
    .bind(location_id)
    .bind(pros)
    .bind(cons)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Return the stored summary for a location, or `None` if none exists yet.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_sentiment_summary(
    pool: &PgPool,
    location_id: &str,
) -> Result<Option<SentimentSummaryRow>, DbError> {
    let row = sqlx::query_as::<_, SentimentSummaryRow>(
        "SELECT location_id, pros, cons, updated_at \
         FROM sentiment_summaries \
         WHERE location_id = $1",
    )
    .bind(location_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
