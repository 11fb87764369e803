//! Text normalizer shared by training and inference.
//!
//! Both paths must produce byte-identical output for the same input, otherwise the
//! vocabulary learned at training time will not line up with serving-time features.

use regex::Regex;
use std::sync::LazyLock;

use crate::pipeline::stopwords::is_stopword;

static NEWLINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Fused colloquial forms the word tokenizer splits in two ("cannot" -> "can not").
/// Forms that need an apostrophe ("d'ye", "'tis") cannot survive step 2 and are omitted.
static FUSED_WORDS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(can)(not)\b",
        r"(?i)\b(gim)(me)\b",
        r"(?i)\b(gon)(na)\b",
        r"(?i)\b(got)(ta)\b",
        r"(?i)\b(lem)(me)\b",
        r"(?i)\b(wan)(na)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Cleans raw resume text into a space-joined string of lowercase, non-stopword tokens.
///
/// Steps, in order:
/// 1. newline runs → single space
/// 2. drop everything that is neither a word character nor whitespace
/// 3. drop digits
/// 4. lowercase
/// 5. tokenize: split fused forms like "cannot" and "gonna", then split on whitespace
/// 6. drop English stopwords
/// 7. rejoin with single spaces
///
/// Total: never fails. Returns an empty string when every token is removed.
pub fn clean_text(text: &str) -> String {
    let text = NEWLINE_RUN.replace_all(text, " ");
    let text = NON_WORD.replace_all(&text, "");
    let text = DIGITS.replace_all(&text, "");
    let lowered = text.to_lowercase();

    tokenize(&lowered)
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Word tokenizer for punctuation-free text. Returns the text with token
/// boundaries marked by whitespace.
fn tokenize(text: &str) -> String {
    FUSED_WORDS
        .iter()
        .fold(text.to_string(), |acc, re| re.replace_all(&acc, "$1 $2").into_owned())
}
