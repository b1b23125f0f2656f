//! Text statistics
//!
//! Character and word frequencies over a block of text, and a coarse mood
//! label voted by the subjectivity lexicon.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::lexicon::{LexiconError, LexiconSource, SubjectivityEntry};

/// Normalized key to occurrence count. Keys with a zero count are never stored.
pub type FrequencyMap = BTreeMap<String, usize>;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Aggregate sentiment of a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Positive,
    Negative,
    Neutral,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Positive => "positive",
            Mood::Negative => "negative",
            Mood::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running polarity votes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodTally {
    pub positive: usize,
    pub negative: usize,
}

impl MoodTally {
    /// Count one vote for `polarity`. Labels other than positive/negative are ignored.
    pub fn record(&mut self, polarity: &str) {
        match polarity {
            "positive" => self.positive += 1,
            "negative" => self.negative += 1,
            _ => {}
        }
    }

    /// Majority vote; a tie (including no votes) is neutral
    pub fn resolve(&self) -> Mood {
        use std::cmp::Ordering;

        match self.positive.cmp(&self.negative) {
            Ordering::Greater => Mood::Positive,
            Ordering::Less => Mood::Negative,
            Ordering::Equal => Mood::Neutral,
        }
    }
}

/// The four statistics for one text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSummary {
    pub vowel_count: FrequencyMap,
    pub consonant_count: FrequencyMap,
    pub word_count: FrequencyMap,
    pub mood: Mood,
}

impl From<(FrequencyMap, FrequencyMap, FrequencyMap, Mood)> for TextSummary {
    fn from(
        (vowel_count, consonant_count, word_count, mood): (FrequencyMap, FrequencyMap, FrequencyMap, Mood),
    ) -> Self {
        Self {
            vowel_count,
            consonant_count,
            word_count,
            mood,
        }
    }
}

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Count lowercased ASCII letters that satisfy `keep`
fn count_letters<F>(text: &str, keep: F) -> FrequencyMap
where
    F: Fn(char) -> bool,
{
    let mut counts = FrequencyMap::new();

    for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
        let c = c.to_ascii_lowercase();
        if keep(c) {
            *counts.entry(c.to_string()).or_insert(0) += 1;
        }
    }

    counts
}

/// Vowel frequencies. Consonants and non-letters never appear in the result.
pub fn num_vowels(text: &str) -> FrequencyMap {
    count_letters(text, is_vowel)
}

/// Consonant frequencies, the complement of [`num_vowels`] over ASCII letters
pub fn num_consonants(text: &str) -> FrequencyMap {
    count_letters(text, |c| !is_vowel(c))
}

/// Split text into normalized word tokens
///
/// Tokens are whitespace separated, trimmed of leading and trailing
/// non-alphanumeric characters and lowercased. Tokens left empty are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}

/// Word frequencies over [`tokenize`]d text
pub fn num_words(text: &str) -> FrequencyMap {
    let mut counts = FrequencyMap::new();

    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }

    counts
}

/// Tally polarity votes of `tokens` against `entries`
///
/// Every occurrence of a token votes once for each lexicon entry whose word
/// equals it, so both repeated words in the text and duplicate lexicon rows
/// add votes.
pub fn tally_mood<S: AsRef<str>>(tokens: &[S], entries: &[SubjectivityEntry]) -> MoodTally {
    let mut by_word: HashMap<&str, MoodTally> = HashMap::new();
    for entry in entries {
        by_word
            .entry(entry.word.as_str())
            .or_default()
            .record(&entry.polarity);
    }

    let mut tally = MoodTally::default();
    for token in tokens {
        if let Some(votes) = by_word.get(token.as_ref()) {
            tally.positive += votes.positive;
            tally.negative += votes.negative;
        }
    }

    tally
}

/// Mood of `text`, loading the lexicon from `source` exactly once
///
/// # Arguments
///
/// * `text` - Text to classify
/// * `source` - Lexicon provider
///
/// # Returns
///
/// The majority polarity, or `Mood::Neutral` on a tie. Lexicon failures are
/// returned unchanged.
pub fn get_mood<S>(text: &str, source: &S) -> Result<Mood, LexiconError>
where
    S: LexiconSource + ?Sized,
{
    let tokens = tokenize(text);
    let entries = source.read_dataset()?;

    Ok(tally_mood(&tokens, &entries).resolve())
}

/// Vowel, consonant and word frequencies plus the mood, in that order
pub fn report_summary<S>(
    text: &str,
    source: &S,
) -> Result<(FrequencyMap, FrequencyMap, FrequencyMap, Mood), LexiconError>
where
    S: LexiconSource + ?Sized,
{
    let mood = get_mood(text, source)?;

    Ok((num_vowels(text), num_consonants(text), num_words(text), mood))
}
