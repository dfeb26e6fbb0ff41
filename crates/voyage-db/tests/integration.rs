//! Offline unit tests for voyage-db pool configuration and row conversions.
//! These tests do not require a live database connection.

use chrono::Utc;
use uuid::Uuid;
use voyage_core::{AppConfig, ClassifierBackendKind, Environment, Review, SentimentSummary};
use voyage_db::{PoolConfig, ReviewRow, SentimentSummaryRow};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        sentiment_backend: ClassifierBackendKind::Lexicon,
        sentiment_tei_url: None,
        sentiment_timeout_ms: 5000,
        sentiment_concurrency: 4,
        sentiment_min_confidence: 0.0,
        recompute_every: 5,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn review_row_converts_to_domain_review() {
    let public_id = Uuid::new_v4();
    let created_at = Utc::now();
    let row = ReviewRow {
        id: 12,
        public_id,
        location_id: "kyoto".to_string(),
        text: "Temples everywhere.".to_string(),
        rating: 5,
        author_name: None,
        created_at,
    };

    let review = Review::from(row);
    assert_eq!(review.id, 12);
    assert_eq!(review.public_id, public_id);
    assert_eq!(review.location_id, "kyoto");
    assert_eq!(review.text, "Temples everywhere.");
    assert_eq!(review.rating, 5);
    assert!(review.author_name.is_none());
    assert_eq!(review.created_at, created_at);
}

#[test]
fn summary_row_converts_to_domain_summary() {
    let row = SentimentSummaryRow {
        location_id: "oslo".to_string(),
        pros: vec!["Clean streets.".to_string()],
        cons: vec!["Pricey coffee.".to_string()],
        updated_at: Utc::now(),
    };

    let summary = SentimentSummary::from(row);
    assert_eq!(summary.location_id, "oslo");
    assert_eq!(summary.pros, vec!["Clean streets.".to_string()]);
    assert_eq!(summary.cons, vec!["Pricey coffee.".to_string()]);
}
