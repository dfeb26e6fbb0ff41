//! Database operations for the `reviews` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use voyage_core::{NewReview, Review};

use crate::DbError;

/// A row from the `reviews` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: i64,
    pub public_id: Uuid,
    pub location_id: String,
    pub text: String,
    pub rating: i16,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: row.id,
            public_id: row.public_id,
            location_id: row.location_id,
            text: row.text,
            rating: row.rating,
            author_name: row.author_name,
            created_at: row.created_at,
        }
    }
}

/// Insert a review and return the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including the rating
/// `CHECK` constraint).
pub async fn insert_review(pool: &PgPool, review: &NewReview) -> Result<ReviewRow, DbError> {
    let row = sqlx::query_as::<_, ReviewRow>(
        "INSERT INTO reviews (location_id, text, rating, author_name) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, public_id, location_id, text, rating, author_name, created_at",
    )
    .bind(&review.location_id)
    .bind(&review.text)
    .bind(review.rating)
    .bind(review.author_name.as_deref())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Count the reviews stored for a location.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_reviews_for_location(pool: &PgPool, location_id: &str) -> Result<i64, DbError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE location_id = $1")
        .bind(location_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Return every review text for a location, oldest first.
///
/// Ordering is `created_at ASC, id ASC` so that reviews written within the
/// same timestamp keep their insertion order. The whole set is read by a
/// single statement, which sees one consistent snapshot.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_review_texts_for_location(
    pool: &PgPool,
    location_id: &str,
) -> Result<Vec<String>, DbError> {
    let texts = sqlx::query_scalar::<_, String>(
        "SELECT text FROM reviews \
         WHERE location_id = $1 \
         ORDER BY created_at ASC, id ASC",
    )
    .bind(location_id)
    .fetch_all(pool)
    .await?;

    Ok(texts)
}

/// List reviews for a location, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_reviews_for_location(
    pool: &PgPool,
    location_id: &str,
    limit: i64,
) -> Result<Vec<ReviewRow>, DbError> {
    let rows = sqlx::query_as::<_, ReviewRow>(
        "SELECT id, public_id, location_id, text, rating, author_name, created_at \
         FROM reviews \
         WHERE location_id = $1 \
         ORDER BY created_at DESC, id DESC \
         LIMIT $2",
    )
    .bind(location_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
