//! Review command handlers for the CLI.
//!
//! `submit` and `import` go through the same write path as any other caller,
//! so every fifth review for a location schedules a background recompute.
//! Both wait for those recomputes to drain before returning so the process
//! does not exit mid-run.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use voyage_core::NewReview;
use voyage_sentiment::{RequestOutcome, ReviewSubmitter, SentimentError};

use crate::sentiment::print_summary;
use crate::Services;

/// Sub-commands available under `reviews`.
#[derive(Debug, Subcommand)]
pub enum ReviewsCommands {
    /// Store one review
    Submit {
        /// Location (city or place) the review is for
        #[arg(long)]
        location: String,
        /// Star rating from 1 to 5
        #[arg(long)]
        rating: i16,
        /// Review text
        #[arg(long)]
        text: String,
        /// Reviewer display name
        #[arg(long)]
        author: Option<String>,
    },
    /// Store every review in a JSON array file
    Import {
        /// Path to a JSON array of `{location_id, text, rating, author_name}` objects
        #[arg(long)]
        file: PathBuf,
    },
    /// Show recent reviews for a location with its pros/cons summary
    List {
        #[arg(long)]
        location: String,
        /// Maximum number of reviews to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

pub(crate) async fn run(services: &Services, command: ReviewsCommands) -> anyhow::Result<()> {
    match command {
        ReviewsCommands::Submit {
            location,
            rating,
            text,
            author,
        } => {
            let review = NewReview {
                location_id: location,
                text,
                rating,
                author_name: author,
            };
            run_reviews_submit(&services.submitter, review).await
        }
        ReviewsCommands::Import { file } => run_reviews_import(&services.submitter, &file).await,
        ReviewsCommands::List { location, limit } => {
            run_reviews_list(services, &location, limit).await
        }
    }
}

/// Submit one review and wait for any recompute it triggered.
///
/// # Errors
///
/// Returns an error if the review is invalid or cannot be stored.
async fn run_reviews_submit(
    submitter: &ReviewSubmitter,
    review: NewReview,
) -> anyhow::Result<()> {
    let outcome = submitter.submit(review).await?;

    println!(
        "stored review {} for {}{}",
        outcome.review.public_id,
        outcome.review.location_id,
        outcome
            .review_count
            .map(|n| format!(" ({n} total)"))
            .unwrap_or_default()
    );
    if let Some(recompute) = outcome.recompute {
        println!("{}", describe_request(recompute));
    }

    submitter.queue().wait_idle().await;
    Ok(())
}

/// Submit every review in `path` in file order.
///
/// Invalid or unstorable reviews are logged and skipped. Recomputes triggered
/// along the way are drained before returning.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if it held at
/// least one review and none of them could be stored.
async fn run_reviews_import(submitter: &ReviewSubmitter, path: &Path) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let reviews = parse_import(&raw)?;

    if reviews.is_empty() {
        println!("no reviews found in {}; nothing to import", path.display());
        return Ok(());
    }

    let total = reviews.len();
    let mut stored: usize = 0;
    let mut rejected: usize = 0;
    let mut recomputes: usize = 0;

    for (index, review) in reviews.into_iter().enumerate() {
        match submitter.submit(review).await {
            Ok(outcome) => {
                stored += 1;
                if outcome.recompute.is_some() {
                    recomputes += 1;
                }
            }
            Err(e @ SentimentError::InvalidReview(_)) => {
                tracing::warn!(entry = index, error = %e, "skipping invalid review");
                rejected += 1;
            }
            Err(e) => {
                tracing::error!(entry = index, error = %e, "failed to store review");
                rejected += 1;
            }
        }
    }

    submitter.queue().wait_idle().await;

    if stored == 0 {
        anyhow::bail!("all {total} reviews in {} were rejected", path.display());
    }

    println!(
        "import complete: {stored} of {total} reviews stored, {rejected} rejected, \
         {recomputes} recompute request(s)"
    );
    Ok(())
}

/// Print a location's summary followed by its most recent reviews.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
async fn run_reviews_list(
    services: &Services,
    location: &str,
    limit: usize,
) -> anyhow::Result<()> {
    let summary = services.store.get_summary(location).await?;
    let reviews = services.store.list_reviews(location, limit).await?;

    match &summary {
        Some(summary) => print_summary(&summary.pros, &summary.cons),
        None => print_summary(&[], &[]),
    }
    println!();

    if reviews.is_empty() {
        println!("no reviews found for '{location}'");
        return Ok(());
    }

    println!("{:<18}{:<8}{:<20}TEXT", "CREATED", "RATING", "AUTHOR");
    for review in &reviews {
        let created = review.created_at.format("%Y-%m-%d %H:%M").to_string();
        let author = review.author_name.as_deref().unwrap_or("\u{2014}");
        println!(
            "{:<18}{:<8}{:<20}{}",
            created,
            review.rating,
            author,
            truncate_chars(&review.text, 60)
        );
    }

    Ok(())
}

/// Parse an import file: a JSON array of reviews.
fn parse_import(raw: &str) -> anyhow::Result<Vec<NewReview>> {
    serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("invalid review file: {e}"))
}

fn describe_request(outcome: RequestOutcome) -> &'static str {
    match outcome {
        RequestOutcome::Started => "sentiment recompute started",
        RequestOutcome::Coalesced => "sentiment recompute already running; queued one more pass",
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}
