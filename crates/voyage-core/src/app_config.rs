#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which sentence classifier backs the pros/cons pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierBackendKind {
    /// Built-in word-weight lexicon. No external service required.
    Lexicon,
    /// Sequence-classification model served by Text Embeddings Inference.
    Tei,
}

impl std::fmt::Display for ClassifierBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierBackendKind::Lexicon => write!(f, "lexicon"),
            ClassifierBackendKind::Tei => write!(f, "tei"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub sentiment_backend: ClassifierBackendKind,
    pub sentiment_tei_url: Option<String>,
    pub sentiment_timeout_ms: u64,
    pub sentiment_concurrency: usize,
    pub sentiment_min_confidence: f32,
    pub recompute_every: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("sentiment_backend", &self.sentiment_backend)
            .field("sentiment_tei_url", &self.sentiment_tei_url)
            .field("sentiment_timeout_ms", &self.sentiment_timeout_ms)
            .field("sentiment_concurrency", &self.sentiment_concurrency)
            .field("sentiment_min_confidence", &self.sentiment_min_confidence)
            .field("recompute_every", &self.recompute_every)
            .finish()
    }
}
