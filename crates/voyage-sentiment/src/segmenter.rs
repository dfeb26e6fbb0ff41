//! Sentence segmentation for review text.
//!
//! A boundary is a run of terminal punctuation (`.`, `!`, `?`, `…`), plus any
//! closing quotes or brackets, followed by whitespace or end of input. A
//! period after a known abbreviation is not a boundary, nor is one after a
//! single capital letter that belongs to a run of initials (`J. M. W.
//! Turner`). A lone capital such as the pronoun in "so did I." or the letter
//! in "Gate B." still ends the sentence. Blank lines always end a sentence.
//! Fullwidth terminals (`。！？`) end a sentence without needing trailing
//! whitespace.

use std::sync::LazyLock;

use regex::Regex;

/// Matches text that ends in a known abbreviation.
static ABBREVIATION_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:^|[\s(\["“‘])(?i:mr|mrs|ms|dr|prof|sr|jr|st|mt|ave|rd|vs|approx|e\.g|i\.e|u\.s|u\.k)$"#,
    )
    .expect("valid regex")
});

/// Text ending in a standalone capital letter.
static INITIAL_TAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|[\s(\["“‘])[A-Z]$"#).expect("valid regex"));

/// Text ending in an initial that itself follows an initial (`J. M`).
static INITIAL_PAIR_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[\s(\["“‘])[A-Z]\.\s+[A-Z]$"#).expect("valid regex")
});

/// Text starting with another initial (` W. Turner`).
static NEXT_INITIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+[A-Z]\.(?:\s|$)").expect("valid regex"));

/// Whether a period between `before` and `after` is part of an abbreviation.
fn is_abbreviation(before: &str, after: &str) -> bool {
    ABBREVIATION_TAIL_RE.is_match(before)
        || (INITIAL_TAIL_RE.is_match(before)
            && (INITIAL_PAIR_TAIL_RE.is_match(before) || NEXT_INITIAL_RE.is_match(after)))
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…') || is_fullwidth_terminal(c)
}

fn is_fullwidth_terminal(c: char) -> bool {
    matches!(c, '。' | '！' | '？')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | '”' | '’' | ')' | ']' | '»')
}

/// Split one review into trimmed, non-empty sentences in source order.
///
/// Never fails; empty or whitespace-only input yields an empty `Vec`.
/// The returned slices borrow from `text`.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let boundary = if is_terminal(ch) {
            let mut end = idx + ch.len_utf8();
            let mut periods_only = ch == '.';
            let mut fullwidth = is_fullwidth_terminal(ch);

            while let Some(&(next_idx, next)) = chars.peek() {
                if is_terminal(next) {
                    periods_only &= next == '.';
                    fullwidth |= is_fullwidth_terminal(next);
                } else if !is_closing(next) {
                    break;
                }
                end = next_idx + next.len_utf8();
                chars.next();
            }

            let at_break = fullwidth || chars.peek().is_none_or(|&(_, c)| c.is_whitespace());
            let abbreviated = periods_only && is_abbreviation(&text[start..idx], &text[end..]);

            (at_break && !abbreviated).then_some(end)
        } else if ch == '\n' {
            let rest = text[idx + 1..].trim_start_matches([' ', '\t', '\r']);
            rest.starts_with('\n').then_some(idx)
        } else {
            None
        };

        if let Some(end) = boundary {
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, fragment: &'a str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}
