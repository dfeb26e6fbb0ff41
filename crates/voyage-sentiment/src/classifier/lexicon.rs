//! Word-weight lexicon scorer for travel reviews.

use std::sync::Arc;

use async_trait::async_trait;

use super::{ModelLoader, SentenceModel};
use crate::error::SentimentError;
use crate::types::{Classification, SentimentLabel};

/// Travel-review word weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("amazing", 0.5),
    ("wonderful", 0.5),
    ("beautiful", 0.4),
    ("stunning", 0.5),
    ("lovely", 0.4),
    ("love", 0.5),
    ("loved", 0.5),
    ("best", 0.5),
    ("recommend", 0.4),
    ("friendly", 0.4),
    ("helpful", 0.3),
    ("clean", 0.3),
    ("safe", 0.3),
    ("delicious", 0.4),
    ("tasty", 0.3),
    ("cheap", 0.2),
    ("affordable", 0.3),
    ("relaxing", 0.3),
    ("charming", 0.4),
    ("peaceful", 0.3),
    ("vibrant", 0.3),
    ("fun", 0.3),
    ("enjoyed", 0.4),
    ("worth", 0.3),
    // Negative signals
    ("bad", -0.4),
    ("terrible", -0.6),
    ("awful", -0.6),
    ("horrible", -0.6),
    ("worst", -0.6),
    ("dirty", -0.5),
    ("rude", -0.5),
    ("unsafe", -0.6),
    ("dangerous", -0.6),
    ("crowded", -0.3),
    ("overcrowded", -0.4),
    ("expensive", -0.3),
    ("overpriced", -0.4),
    ("noisy", -0.3),
    ("boring", -0.4),
    ("disappointing", -0.5),
    ("disappointed", -0.5),
    ("scam", -0.6),
    ("slow", -0.2),
    ("smelly", -0.4),
    ("hated", -0.5),
    ("hate", -0.5),
    ("avoid", -0.4),
    ("problem", -0.3),
    ("traffic", -0.2),
];

/// Words that flip the weight of the word right after them.
const NEGATORS: &[&str] = &[
    "not", "never", "no", "hardly", "isn't", "wasn't", "aren't", "weren't", "don't", "didn't",
    "doesn't",
];

/// Score a text string using the lexicon.
///
/// Splits text into lowercase words, sums matching weights (negated when the
/// previous word is a negator), and clamps the result to `[-1.0, 1.0]`.
/// Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    let mut negate = false;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase()
            .replace('’', "'");
        if let Some(&(_, weight)) = LEXICON.iter().find(|(lex_word, _)| *lex_word == w) {
            score += if negate { -weight } else { weight };
        }
        negate = NEGATORS.contains(&w.as_str());
    }
    score.clamp(-1.0, 1.0)
}

/// Lexicon-backed [`SentenceModel`]. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconModel;

#[async_trait]
impl SentenceModel for LexiconModel {
    async fn classify(&self, text: &str) -> Result<Classification, SentimentError> {
        let raw = lexicon_score(text);
        let label = if raw > 0.0 {
            SentimentLabel::Positive
        } else if raw < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        Ok(Classification {
            label,
            score: raw.abs(),
        })
    }
}

/// Loads the built-in [`LexiconModel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconLoader;

#[async_trait]
impl ModelLoader for LexiconLoader {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    async fn load(&self) -> Result<Arc<dyn SentenceModel>, SentimentError> {
        Ok(Arc::new(LexiconModel))
    }
}
