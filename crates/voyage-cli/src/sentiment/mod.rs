//! Sentiment summary command handlers for the CLI.

use clap::Subcommand;
use voyage_sentiment::CollectStats;

use crate::Services;

/// Sub-commands available under `sentiment`.
#[derive(Debug, Subcommand)]
pub enum SentimentCommands {
    /// Recompute the pros/cons summary for a location now
    Recompute {
        #[arg(long)]
        location: String,

        /// Classify and print the result without storing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the stored pros/cons summary for a location
    Show {
        #[arg(long)]
        location: String,
    },
}

pub(crate) async fn run(services: &Services, command: SentimentCommands) -> anyhow::Result<()> {
    match command {
        SentimentCommands::Recompute { location, dry_run } => {
            run_sentiment_recompute(services, &location, dry_run).await
        }
        SentimentCommands::Show { location } => run_sentiment_show(services, &location).await,
    }
}

/// Recompute a location's summary in the foreground.
///
/// With `dry_run`, runs the same read/classify/collect steps and prints the
/// result without replacing the stored summary.
///
/// # Errors
///
/// Returns an error if the model cannot be loaded or the store fails.
async fn run_sentiment_recompute(
    services: &Services,
    location: &str,
    dry_run: bool,
) -> anyhow::Result<()> {
    if dry_run {
        let collected = services.pipeline.preview(location).await?;
        println!("dry-run: summary for '{location}' would be:");
        print_summary(&collected.pros, &collected.cons);
        println!("{}", describe_stats(&collected.stats));
        return Ok(());
    }

    let report = services.pipeline.recompute_summary(location).await?;
    println!("summary for '{location}' recomputed:");
    print_summary(&report.summary.pros, &report.summary.cons);
    println!("{}", describe_stats(&report.stats));
    Ok(())
}

/// # Errors
///
/// Returns an error if the store cannot be read.
async fn run_sentiment_show(services: &Services, location: &str) -> anyhow::Result<()> {
    let Some(summary) = services.store.get_summary(location).await? else {
        println!("no summary stored for '{location}'; run `sentiment recompute` first");
        return Ok(());
    };

    println!(
        "summary for '{location}' (updated {}):",
        summary.updated_at.format("%Y-%m-%d %H:%M")
    );
    print_summary(&summary.pros, &summary.cons);
    Ok(())
}

/// Print pros and cons as two bulleted sections.
pub(crate) fn print_summary(pros: &[String], cons: &[String]) {
    print!("{}", render_summary(pros, cons));
}

fn render_summary(pros: &[String], cons: &[String]) -> String {
    let mut out = String::new();
    for (heading, phrases) in [("PROS", pros), ("CONS", cons)] {
        out.push_str(heading);
        out.push('\n');
        if phrases.is_empty() {
            out.push_str("  (none)\n");
        }
        for phrase in phrases {
            out.push_str("  - ");
            out.push_str(phrase);
            out.push('\n');
        }
    }
    out
}

fn describe_stats(stats: &CollectStats) -> String {
    format!(
        "{} reviews, {} sentences ({} positive, {} negative, {} neutral, {} skipped)",
        stats.reviews,
        stats.sentences,
        stats.positive,
        stats.negative,
        stats.neutral,
        stats.skipped
    )
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use voyage_sentiment::CollectStats;

    use crate::{Cli, Commands};

    use super::SentimentCommands;

    #[test]
    fn parses_sentiment_recompute_defaults() {
        let cli =
            Cli::try_parse_from(["voyage-cli", "sentiment", "recompute", "--location", "Oslo"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Sentiment {
                command: SentimentCommands::Recompute {
                    ref location,
                    dry_run: false,
                }
            }) if location == "Oslo"
        ));
    }

    #[test]
    fn parses_sentiment_recompute_dry_run() {
        let cli = Cli::try_parse_from([
            "voyage-cli",
            "sentiment",
            "recompute",
            "--location",
            "Oslo",
            "--dry-run",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Sentiment {
                command: SentimentCommands::Recompute { dry_run: true, .. }
            })
        ));
    }

    #[test]
    fn sentiment_show_requires_location() {
        assert!(Cli::try_parse_from(["voyage-cli", "sentiment", "show"]).is_err());
    }

    #[test]
    fn render_summary_marks_empty_lists() {
        let rendered = super::render_summary(&["Clean streets.".to_string()], &[]);
        assert_eq!(rendered, "PROS\n  - Clean streets.\nCONS\n  (none)\n");
    }

    #[test]
    fn describe_stats_lists_every_counter() {
        let stats = CollectStats {
            reviews: 2,
            sentences: 5,
            positive: 2,
            negative: 1,
            neutral: 1,
            skipped: 1,
            ..CollectStats::default()
        };
        assert_eq!(
            super::describe_stats(&stats),
            "2 reviews, 5 sentences (2 positive, 1 negative, 1 neutral, 1 skipped)"
        );
    }
}
