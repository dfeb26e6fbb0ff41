//! Live integration tests for voyage-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. They need `DATABASE_URL` pointing at a server the test
//! user can create databases on; run with `cargo test -- --ignored`.

use voyage_core::NewReview;
use voyage_db::{
    count_reviews_for_location, get_sentiment_summary, insert_review,
    list_review_texts_for_location, list_reviews_for_location, upsert_sentiment_summary,
};

fn new_review(location: &str, text: &str) -> NewReview {
    NewReview {
        location_id: location.to_string(),
        text: text.to_string(),
        rating: 4,
        author_name: Some("tester".to_string()),
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn review_texts_come_back_oldest_first(pool: sqlx::PgPool) {
    for text in ["first", "second", "third"] {
        insert_review(&pool, &new_review("rome", text))
            .await
            .expect("insert_review failed");
    }
    insert_review(&pool, &new_review("paris", "elsewhere"))
        .await
        .expect("insert_review failed");

    let texts = list_review_texts_for_location(&pool, "rome")
        .await
        .expect("list_review_texts_for_location failed");
    assert_eq!(texts, vec!["first", "second", "third"]);

    let newest_first = list_reviews_for_location(&pool, "rome", 10)
        .await
        .expect("list_reviews_for_location failed");
    assert_eq!(newest_first[0].text, "third");

    let count = count_reviews_for_location(&pool, "rome")
        .await
        .expect("count_reviews_for_location failed");
    assert_eq!(count, 3);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn rating_outside_range_is_rejected(pool: sqlx::PgPool) {
    let mut review = new_review("rome", "off the scale");
    review.rating = 9;

    let result = insert_review(&pool, &review).await;
    assert!(result.is_err(), "CHECK constraint should reject rating 9");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn summary_upsert_replaces_previous_lists(pool: sqlx::PgPool) {
    assert!(get_sentiment_summary(&pool, "rome")
        .await
        .expect("get_sentiment_summary failed")
        .is_none());

    upsert_sentiment_summary(
        &pool,
        "rome",
        &["Great pasta.".to_string(), "Sunny.".to_string()],
        &["Crowded.".to_string()],
    )
    .await
    .expect("first upsert failed");

    upsert_sentiment_summary(&pool, "rome", &["Sunny.".to_string()], &[])
        .await
        .expect("second upsert failed");

    let stored = get_sentiment_summary(&pool, "rome")
        .await
        .expect("get_sentiment_summary failed")
        .expect("summary should exist");
    assert_eq!(stored.pros, vec!["Sunny.".to_string()]);
    assert!(stored.cons.is_empty());
}
