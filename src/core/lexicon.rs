//! Subjectivity lexicon loading
//!
//! The lexicon is a flat text file where every line is a space separated list
//! of `key=value` tokens, for example:
//!
//! ```text
//! type=weaksubj len=1 word1=abandoned pos1=adj stemmed1=n priorpolarity=negative
//! ```
//!
//! All knowledge of that format lives in [`parse_line`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default location of the lexicon, relative to the working directory
pub const DEFAULT_LEXICON_PATH: &str = "data/subjectivity_clues.tff";

lazy_static! {
    /// A single `key=value` token. The value may be empty or contain further `=`.
    static ref FIELD_PATTERN: Regex = Regex::new(r"^([^=\s]+)=(\S*)$").unwrap();
}

/// Errors raised while loading the lexicon
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// The configured lexicon file does not exist
    #[error("Lexicon not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The lexicon exists but could not be read
    #[error("Failed to read lexicon {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A non-blank line did not have the expected shape
    #[error("Malformed lexicon line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// One record of the subjectivity lexicon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectivityEntry {
    /// Strength tag, e.g. `weaksubj` or `strongsubj`
    #[serde(rename = "type")]
    pub kind: String,
    pub len: String,
    /// Headword; the lookup key for mood matching
    pub word: String,
    pub pos: String,
    pub stemmed: String,
    pub polarity: String,
}

/// Location of the lexicon resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconConfig {
    pub path: PathBuf,
}

impl LexiconConfig {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LEXICON_PATH)
    }
}

/// Anything that can produce the lexicon on demand
pub trait LexiconSource {
    /// Load the full lexicon, in source order
    fn read_dataset(&self) -> Result<Vec<SubjectivityEntry>, LexiconError>;
}

/// Lexicon backed by a file on disk, read fresh on every call
#[derive(Debug, Clone, Default)]
pub struct FileLexicon {
    config: LexiconConfig,
}

impl FileLexicon {
    pub fn new(config: LexiconConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

impl LexiconSource for FileLexicon {
    fn read_dataset(&self) -> Result<Vec<SubjectivityEntry>, LexiconError> {
        read_dataset(&self.config)
    }
}

/// Read and parse the lexicon named by `config`
///
/// # Arguments
///
/// * `config` - Lexicon location
///
/// # Returns
///
/// One entry per non-blank line, in file order. An empty file yields an empty
/// vector; a missing file is a `LexiconError::NotFound`.
pub fn read_dataset(config: &LexiconConfig) -> Result<Vec<SubjectivityEntry>, LexiconError> {
    let path = &config.path;
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LexiconError::NotFound { path: path.clone() },
        _ => LexiconError::Unreadable {
            path: path.clone(),
            source: e,
        },
    })?;

    parse_dataset(&content)
}

/// Parse a whole lexicon document
pub fn parse_dataset(content: &str) -> Result<Vec<SubjectivityEntry>, LexiconError> {
    let mut entries = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if let Some(entry) = parse_line(line, index + 1)? {
            entries.push(entry);
        }
    }

    Ok(entries)
}

/// Parse a single lexicon line
///
/// # Arguments
///
/// * `line` - Raw line text
/// * `line_number` - 1-based position, used in error reports
///
/// # Returns
///
/// `None` for blank lines, otherwise the entry with its fields renamed to
/// their canonical names. Unknown keys are ignored and a repeated key keeps
/// its last value.
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<SubjectivityEntry>, LexiconError> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let mut raw: HashMap<&str, &str> = HashMap::new();
    for token in line.split_whitespace() {
        let caps = FIELD_PATTERN.captures(token).ok_or_else(|| LexiconError::Malformed {
            line: line_number,
            reason: format!("expected key=value, found '{}'", token),
        })?;
        let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        raw.insert(key.as_str(), value.as_str());
    }

    let field = |key: &str| {
        raw.get(key)
            .map(|value| value.to_string())
            .ok_or_else(|| LexiconError::Malformed {
                line: line_number,
                reason: format!("missing '{}'", key),
            })
    };

    Ok(Some(SubjectivityEntry {
        kind: field("type")?,
        len: field("len")?,
        word: field("word1")?,
        pos: field("pos1")?,
        stemmed: field("stemmed1")?,
        polarity: field("priorpolarity")?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WOW: &str = "type=weaksubj len=1 word1=wow pos1=adj stemmed1=y priorpolarity=positive";

    #[test]
    fn test_parse_line_renames_fields() {
        let entry = parse_line(WOW, 1).unwrap().unwrap();
        assert_eq!(entry.kind, "weaksubj");
        assert_eq!(entry.len, "1");
        assert_eq!(entry.word, "wow");
        assert_eq!(entry.pos, "adj");
        assert_eq!(entry.stemmed, "y");
        assert_eq!(entry.polarity, "positive");
    }

    #[test]
    fn test_parse_line_blank() {
        assert!(parse_line("", 1).unwrap().is_none());
        assert!(parse_line("   \t ", 2).unwrap().is_none());
    }

    #[test]
    fn test_parse_line_ignores_extra_keys() {
        let line = format!("{} mpqapolarity=strongpos", WOW);
        let entry = parse_line(&line, 1).unwrap().unwrap();
        assert_eq!(entry.word, "wow");
    }

    #[test]
    fn test_parse_line_splits_on_first_equals() {
        let line = "type=weaksubj len=1 word1=a=b pos1=noun stemmed1=n priorpolarity=neutral";
        let entry = parse_line(line, 1).unwrap().unwrap();
        assert_eq!(entry.word, "a=b");
    }

    #[test]
    fn test_parse_line_rejects_bare_token() {
        let line = "type=weaksubj len=1 word1=wow pos1=adj stemmed1=y priorpolarity=positive junk";
        match parse_line(line, 7) {
            Err(LexiconError::Malformed { line, reason }) => {
                assert_eq!(line, 7);
                assert!(reason.contains("junk"));
            }
            other => panic!("expected malformed line, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_line_rejects_missing_key() {
        let line = "type=weaksubj len=1 word1=wow pos1=adj stemmed1=y";
        match parse_line(line, 3) {
            Err(LexiconError::Malformed { reason, .. }) => assert!(reason.contains("priorpolarity")),
            other => panic!("expected malformed line, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_dataset_skips_blank_lines() {
        let content = format!("\n{}\n\n{}\n", WOW, WOW.replace("wow", "meh"));
        let entries = parse_dataset(&content).unwrap();
        let words: Vec<_> = entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["wow", "meh"]);
    }

    #[test]
    fn test_parse_dataset_reports_line_number() {
        let content = format!("{}\n\nnot a lexicon line\n", WOW);
        match parse_dataset(&content) {
            Err(LexiconError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed line, got {:?}", other),
        }
    }

    #[test]
    fn test_entry_serializes_with_type_key() {
        let entry = parse_line(WOW, 1).unwrap().unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "weaksubj");
        assert_eq!(value["polarity"], "positive");
    }
}
