use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest accepted star rating.
pub const MIN_RATING: i16 = 1;
/// Highest accepted star rating.
pub const MAX_RATING: i16 = 5;

/// A stored user review. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub public_id: Uuid,
    /// Location (city or place) the review belongs to.
    pub location_id: String,
    pub text: String,
    pub rating: i16,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A review as submitted, before storage assigns ids and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    #[serde(alias = "city", alias = "location")]
    pub location_id: String,
    pub text: String,
    pub rating: i16,
    #[serde(default, alias = "name")]
    pub author_name: Option<String>,
}

/// Derived pros/cons for one location. Replaced wholesale on every recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub location_id: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_review_accepts_legacy_field_names() {
        let review: NewReview = serde_json::from_str(
            r#"{"city": "Lisbon", "text": "Lovely trams.", "rating": 5, "name": "Ana"}"#,
        )
        .expect("legacy payload should deserialize");

        assert_eq!(review.location_id, "Lisbon");
        assert_eq!(review.rating, 5);
        assert_eq!(review.author_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn new_review_author_is_optional() {
        let review: NewReview = serde_json::from_str(
            r#"{"location_id": "Porto", "text": "Steep hills.", "rating": 3}"#,
        )
        .expect("payload without author should deserialize");

        assert!(review.author_name.is_none());
    }
}
