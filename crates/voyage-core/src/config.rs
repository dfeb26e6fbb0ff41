use crate::app_config::{AppConfig, ClassifierBackendKind, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f32 = |var: &str, default: &str| -> Result<f32, ConfigError> {
        or_default(var, default)
            .parse::<f32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("VOYAGE_ENV", "development"))?;
    let log_level = or_default("VOYAGE_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("VOYAGE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("VOYAGE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("VOYAGE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let sentiment_backend =
        parse_backend(&or_default("VOYAGE_SENTIMENT_BACKEND", "lexicon"))?;
    let sentiment_tei_url = lookup("VOYAGE_SENTIMENT_TEI_URL")
        .ok()
        .map(|url| url.trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty());
    if sentiment_backend == ClassifierBackendKind::Tei && sentiment_tei_url.is_none() {
        return Err(ConfigError::MissingEnvVar(
            "VOYAGE_SENTIMENT_TEI_URL".to_string(),
        ));
    }

    let sentiment_timeout_ms = parse_u64("VOYAGE_SENTIMENT_TIMEOUT_MS", "5000")?;
    if sentiment_timeout_ms == 0 {
        return Err(invalid(
            "VOYAGE_SENTIMENT_TIMEOUT_MS",
            "must be greater than zero".to_string(),
        ));
    }

    let sentiment_concurrency = parse_usize("VOYAGE_SENTIMENT_CONCURRENCY", "4")?;
    if sentiment_concurrency == 0 {
        return Err(invalid(
            "VOYAGE_SENTIMENT_CONCURRENCY",
            "must be at least 1".to_string(),
        ));
    }

    let sentiment_min_confidence = parse_f32("VOYAGE_SENTIMENT_MIN_CONFIDENCE", "0.0")?;
    if !(0.0..=1.0).contains(&sentiment_min_confidence) {
        return Err(invalid(
            "VOYAGE_SENTIMENT_MIN_CONFIDENCE",
            format!("{sentiment_min_confidence} is outside [0.0, 1.0]"),
        ));
    }

    let recompute_every = parse_u64("VOYAGE_RECOMPUTE_EVERY", "5")?;
    if recompute_every == 0 {
        return Err(invalid(
            "VOYAGE_RECOMPUTE_EVERY",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        sentiment_backend,
        sentiment_tei_url,
        sentiment_timeout_ms,
        sentiment_concurrency,
        sentiment_min_confidence,
        recompute_every,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VOYAGE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_backend(s: &str) -> Result<ClassifierBackendKind, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "lexicon" => Ok(ClassifierBackendKind::Lexicon),
        "tei" => Ok(ClassifierBackendKind::Tei),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VOYAGE_SENTIMENT_BACKEND".to_string(),
            reason: format!("expected 'lexicon' or 'tei', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
