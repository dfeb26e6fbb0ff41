//! Folds classified sentences into capped pros/cons lists.
//!
//! Positive sentences become pros and Negative sentences become cons. Neutral
//! and skipped sentences are dropped. Each list keeps the first occurrence of
//! an exact (case-sensitive) text and stops growing at [`MAX_PHRASES`], so the
//! result depends only on the order outcomes are pushed in.

use std::collections::HashSet;

use crate::types::{SentenceOutcome, SentimentLabel};

/// Maximum entries in each of `pros` and `cons`.
pub const MAX_PHRASES: usize = 10;

/// Counters describing one collection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Reviews read for the pass. Filled in by the pipeline.
    pub reviews: usize,
    pub sentences: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Sentences whose classification failed or timed out.
    pub skipped: usize,
    /// Positive/negative sentences already present in their list.
    pub duplicates: usize,
    /// Distinct positive/negative sentences dropped by the cap.
    pub truncated: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedSummary {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub stats: CollectStats,
}

#[derive(Debug, Default)]
struct PhraseList {
    phrases: Vec<String>,
    seen: HashSet<String>,
}

impl PhraseList {
    /// Append `text` unless already seen or the list is full.
    fn offer(&mut self, text: String, cap: usize, stats: &mut CollectStats) {
        if self.seen.contains(&text) {
            stats.duplicates += 1;
            return;
        }
        if self.phrases.len() < cap {
            self.phrases.push(text.clone());
        } else {
            stats.truncated += 1;
        }
        self.seen.insert(text);
    }
}

/// Incremental pros/cons accumulator. Push outcomes in source order.
#[derive(Debug)]
pub struct ProsConsCollector {
    cap: usize,
    pros: PhraseList,
    cons: PhraseList,
    stats: CollectStats,
}

impl Default for ProsConsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProsConsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::with_cap(MAX_PHRASES)
    }

    #[must_use]
    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap,
            pros: PhraseList::default(),
            cons: PhraseList::default(),
            stats: CollectStats::default(),
        }
    }

    pub fn push(&mut self, outcome: SentenceOutcome) {
        self.stats.sentences += 1;
        match outcome {
            SentenceOutcome::Skipped { .. } => self.stats.skipped += 1,
            SentenceOutcome::Classified(result) => match result.label {
                SentimentLabel::Positive => {
                    self.stats.positive += 1;
                    self.pros.offer(result.sentence_text, self.cap, &mut self.stats);
                }
                SentimentLabel::Negative => {
                    self.stats.negative += 1;
                    self.cons.offer(result.sentence_text, self.cap, &mut self.stats);
                }
                SentimentLabel::Neutral => self.stats.neutral += 1,
            },
        }
    }

    #[must_use]
    pub fn finish(self) -> CollectedSummary {
        CollectedSummary {
            pros: self.pros.phrases,
            cons: self.cons.phrases,
            stats: self.stats,
        }
    }
}

/// Collect a full sequence of outcomes with the default cap.
pub fn collect_pros_cons<I>(outcomes: I) -> CollectedSummary
where
    I: IntoIterator<Item = SentenceOutcome>,
{
    let mut collector = ProsConsCollector::new();
    for outcome in outcomes {
        collector.push(outcome);
    }
    collector.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassificationResult, SkipReason};

    fn classified(text: &str, label: SentimentLabel) -> SentenceOutcome {
        SentenceOutcome::Classified(ClassificationResult {
            sentence_text: text.to_string(),
            label,
            score: 0.9,
        })
    }

    fn skipped(text: &str) -> SentenceOutcome {
        SentenceOutcome::Skipped {
            sentence_text: text.to_string(),
            reason: SkipReason::Failed("boom".to_string()),
        }
    }

    #[test]
    fn empty_input_yields_empty_lists() {
        let summary = collect_pros_cons(Vec::new());
        assert!(summary.pros.is_empty());
        assert!(summary.cons.is_empty());
        assert_eq!(summary.stats, CollectStats::default());
    }

    #[test]
    fn labels_route_to_lists_and_neutral_is_dropped() {
        let summary = collect_pros_cons(vec![
            classified("Great food", SentimentLabel::Neutral),
            classified("terrible service", SentimentLabel::Negative),
            classified("Great food, loved it!", SentimentLabel::Positive),
        ]);

        assert_eq!(summary.pros, vec!["Great food, loved it!"]);
        assert_eq!(summary.cons, vec!["terrible service"]);
        assert_eq!(summary.stats.neutral, 1);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let summary = collect_pros_cons(vec![
            classified("Sunny.", SentimentLabel::Positive),
            classified("Crowded.", SentimentLabel::Negative),
            classified("Cheap.", SentimentLabel::Positive),
            classified("Sunny.", SentimentLabel::Positive),
            classified("Crowded.", SentimentLabel::Negative),
        ]);

        assert_eq!(summary.pros, vec!["Sunny.", "Cheap."]);
        assert_eq!(summary.cons, vec!["Crowded."]);
        assert_eq!(summary.stats.duplicates, 2);
    }

    #[test]
    fn dedup_is_case_sensitive() {
        let summary = collect_pros_cons(vec![
            classified("Sunny.", SentimentLabel::Positive),
            classified("sunny.", SentimentLabel::Positive),
        ]);
        assert_eq!(summary.pros, vec!["Sunny.", "sunny."]);
    }

    #[test]
    fn keeps_first_ten_in_source_order() {
        let outcomes: Vec<_> = (0..25)
            .map(|i| classified(&format!("pro {i}"), SentimentLabel::Positive))
            .collect();
        let summary = collect_pros_cons(outcomes);

        let expected: Vec<String> = (0..10).map(|i| format!("pro {i}")).collect();
        assert_eq!(summary.pros, expected);
        assert_eq!(summary.stats.truncated, 15);
    }

    #[test]
    fn duplicates_do_not_consume_capacity() {
        let mut outcomes = vec![classified("same", SentimentLabel::Negative); 5];
        outcomes.extend(
            (0..10).map(|i| classified(&format!("con {i}"), SentimentLabel::Negative)),
        );
        let summary = collect_pros_cons(outcomes);

        assert_eq!(summary.cons.len(), MAX_PHRASES);
        assert_eq!(summary.cons[0], "same");
        assert_eq!(summary.cons[9], "con 8");
    }

    #[test]
    fn skipped_sentences_are_counted_not_collected() {
        let summary = collect_pros_cons(vec![
            skipped("???"),
            classified("Lovely.", SentimentLabel::Positive),
        ]);
        assert_eq!(summary.pros, vec!["Lovely."]);
        assert_eq!(summary.stats.skipped, 1);
        assert_eq!(summary.stats.sentences, 2);
    }

    #[test]
    fn custom_cap_is_respected() {
        let mut collector = ProsConsCollector::with_cap(2);
        for text in ["a", "b", "c"] {
            collector.push(classified(text, SentimentLabel::Positive));
        }
        assert_eq!(collector.finish().pros, vec!["a", "b"]);
    }
}
