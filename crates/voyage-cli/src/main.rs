mod reviews;
mod sentiment;
mod store;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use voyage_sentiment::{
    RecomputeCadence, RecomputeQueue, ReviewStore, ReviewSubmitter, SentimentClassifier,
    SentimentConfig, SummaryPipeline,
};

use crate::reviews::ReviewsCommands;
use crate::sentiment::SentimentCommands;
use crate::store::PgReviewStore;

#[derive(Debug, Parser)]
#[command(name = "voyage-cli")]
#[command(about = "Voyage reviews and sentiment command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Submit, import and list reviews
    Reviews {
        #[command(subcommand)]
        command: ReviewsCommands,
    },
    /// Recompute and inspect pros/cons summaries
    Sentiment {
        #[command(subcommand)]
        command: SentimentCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

/// The sentiment stack wired over Postgres, built once per invocation.
pub(crate) struct Services {
    pub(crate) store: Arc<dyn ReviewStore>,
    pub(crate) pipeline: Arc<SummaryPipeline>,
    pub(crate) submitter: ReviewSubmitter,
}

fn build_services(
    pool: sqlx::PgPool,
    config: &voyage_core::AppConfig,
) -> anyhow::Result<Services> {
    let sentiment_config = SentimentConfig::from_app_config(config);
    let cadence = RecomputeCadence::every(sentiment_config.recompute_every)
        .ok_or_else(|| anyhow::anyhow!("recompute cadence must be at least 1"))?;

    let store: Arc<dyn ReviewStore> = Arc::new(PgReviewStore::new(pool));
    let classifier = Arc::new(SentimentClassifier::from_config(&sentiment_config)?);
    let pipeline = Arc::new(
        SummaryPipeline::new(Arc::clone(&store), classifier)
            .with_concurrency(sentiment_config.concurrency),
    );
    let queue = RecomputeQueue::new(Arc::clone(&pipeline));
    let submitter = ReviewSubmitter::new(Arc::clone(&store), queue, cadence);

    Ok(Services {
        store,
        pipeline,
        submitter,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("voyage-cli ready; run with --help to list commands");
        return Ok(());
    };

    let config = voyage_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = voyage_db::PoolConfig::from_app_config(&config);
    let pool = voyage_db::connect_pool(&config.database_url, pool_config).await?;

    match command {
        Commands::Db { command } => match command {
            DbCommands::Ping => {
                voyage_db::ping(&pool).await?;
                println!("database reachable");
            }
            DbCommands::Migrate => {
                let applied = voyage_db::run_migrations(&pool).await?;
                println!("migrations complete: {applied} applied");
            }
        },
        Commands::Reviews { command } => {
            let services = build_services(pool, &config)?;
            reviews::run(&services, command).await?;
        }
        Commands::Sentiment { command } => {
            let services = build_services(pool, &config)?;
            sentiment::run(&services, command).await?;
        }
    }

    Ok(())
}
