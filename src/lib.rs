//! Text Summary - vowel, consonant and word frequencies plus a lexicon-based mood
//!
//! This library counts character and word frequencies in a block of text and
//! labels its overall mood by majority vote against a subjectivity lexicon.

// Re-export core modules
pub mod core;
pub mod utils;

// Re-export main types for convenience
pub use crate::core::cache::CachedLexicon;
pub use crate::core::lexicon::{read_dataset, FileLexicon, LexiconConfig, LexiconError, LexiconSource, SubjectivityEntry};
pub use crate::core::stats::{get_mood, num_consonants, num_vowels, num_words, report_summary, FrequencyMap, Mood, TextSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Summarize a single text against the lexicon at `lexicon_path`
///
/// This is a convenience function for simple use cases.
///
/// # Arguments
///
/// * `text` - Text to summarize
/// * `lexicon_path` - Path to the subjectivity lexicon
///
/// # Returns
///
/// Vowel, consonant and word frequencies together with the mood
pub fn summarize_text<P: AsRef<std::path::Path>>(text: &str, lexicon_path: P) -> anyhow::Result<TextSummary> {
    let lexicon = FileLexicon::new(LexiconConfig::new(lexicon_path.as_ref()));
    let summary = report_summary(text, &lexicon)?;

    Ok(summary.into())
}

/// Library configuration and utilities
pub mod config {
    use log::{error, info};
    use serde::{Deserialize, Serialize};
    use std::path::{Path, PathBuf};

    use crate::core::lexicon::{LexiconConfig, DEFAULT_LEXICON_PATH};

    /// Settings read from an optional JSON configuration file
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AppConfig {
        /// Location of the subjectivity lexicon
        pub lexicon_path: PathBuf,
        /// URL fetch timeout in seconds
        pub timeout: u64,
        /// Number of parallel workers (0 = auto)
        pub parallel: usize,
    }

    impl Default for AppConfig {
        fn default() -> Self {
            Self {
                lexicon_path: PathBuf::from(DEFAULT_LEXICON_PATH),
                timeout: 30,
                parallel: 0,
            }
        }
    }

    impl AppConfig {
        pub fn lexicon(&self) -> LexiconConfig {
            LexiconConfig::new(&self.lexicon_path)
        }
    }

    /// Create default configuration
    pub fn default_config() -> AppConfig {
        AppConfig::default()
    }

    /// Load configuration from file if provided
    ///
    /// A missing or invalid file is logged and replaced by the defaults.
    pub fn load_config(config_path: Option<&Path>) -> AppConfig {
        let Some(path) = config_path else {
            return default_config();
        };

        if !path.exists() {
            error!("Configuration file not found: {}", path.display());
            return default_config();
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|content| serde_json::from_str::<AppConfig>(&content).map_err(anyhow::Error::from));

        match parsed {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                error!("Invalid configuration file {}: {}", path.display(), e);
                default_config()
            }
        }
    }
}

/// Command-line application functionality
pub mod app {
    use anyhow::{Context, Result};
    use log::{info, warn};
    use serde::{Deserialize, Serialize};
    use std::path::PathBuf;

    use crate::core::lexicon::LexiconSource;
    use crate::core::stats::{report_summary, TextSummary};
    use crate::utils::input_utils::{read_text_file, SourceError, TextFetcher};

    /// One thing to summarize
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Input {
        /// Literal text given on the command line
        Text(String),
        File(PathBuf),
        Url(String),
    }

    impl Input {
        /// Identifier shown next to the summary
        pub fn name(&self) -> String {
            match self {
                Input::Text(text) => text.clone(),
                Input::File(path) => path.to_string_lossy().to_string(),
                Input::Url(url) => url.clone(),
            }
        }
    }

    /// Summary of one input, with its text and name
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TextReport {
        #[serde(flatten)]
        pub summary: TextSummary,
        pub content: String,
        pub name: String,
    }

    /// What became of one input
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Outcome {
        Report(TextReport),
        /// The input text could not be obtained; carries the message to print
        Unavailable(String),
    }

    impl Outcome {
        pub fn report(&self) -> Option<&TextReport> {
            match self {
                Outcome::Report(report) => Some(report),
                Outcome::Unavailable(_) => None,
            }
        }
    }

    /// Summarize `content` under the given name
    pub fn summarize_content<S>(name: String, content: String, lexicon: &S) -> Result<TextReport>
    where
        S: LexiconSource + ?Sized,
    {
        let summary = report_summary(&content, lexicon).context("Failed to load lexicon")?;

        Ok(TextReport {
            summary: summary.into(),
            content,
            name,
        })
    }

    /// Obtain the text of `input` and summarize it
    ///
    /// # Arguments
    ///
    /// * `input` - Literal text, file or URL
    /// * `lexicon` - Lexicon used for the mood
    /// * `fetcher` - Used for URL inputs
    ///
    /// # Returns
    ///
    /// `Outcome::Unavailable` when a file is missing or unreadable or a URL
    /// cannot be fetched; an error when the lexicon cannot be loaded.
    pub fn summarize_input<S, F>(input: &Input, lexicon: &S, fetcher: &F) -> Result<Outcome>
    where
        S: LexiconSource + ?Sized,
        F: TextFetcher + ?Sized,
    {
        let name = input.name();

        let content = match input {
            Input::Text(text) => text.clone(),
            Input::File(path) => match read_text_file(path) {
                Ok(content) => content,
                Err(e @ SourceError::FileNotFound { .. }) => {
                    warn!("{}", e);
                    return Ok(Outcome::Unavailable(format!("Cannot find file : {}", name)));
                }
                Err(e) => {
                    warn!("{}", e);
                    return Ok(Outcome::Unavailable(format!("Cannot read file : {}", name)));
                }
            },
            Input::Url(url) => match fetcher.fetch(url) {
                Ok(content) => content,
                Err(e) => {
                    if let SourceError::Fetch { reason, .. } = &e {
                        warn!("Fetching {} failed: {}", url, reason);
                    }
                    return Ok(Outcome::Unavailable(format!("Invalid url: {}", url)));
                }
            },
        };

        info!("Summarizing {}", name);
        summarize_content(name, content, lexicon).map(Outcome::Report)
    }

    /// Summarize several inputs in order
    ///
    /// Stops at the first lexicon failure.
    pub fn run_analyzer<S, F>(inputs: &[Input], lexicon: &S, fetcher: &F) -> Result<Vec<Outcome>>
    where
        S: LexiconSource + ?Sized,
        F: TextFetcher + ?Sized,
    {
        inputs
            .iter()
            .map(|input| summarize_input(input, lexicon, fetcher))
            .collect()
    }
}
