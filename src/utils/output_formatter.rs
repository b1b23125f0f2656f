//! Output formatter for text summaries
//!
//! This module handles formatting and exporting summaries in various formats,
//! including console output, JSON and CSV.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;

use crate::app::{Outcome, TextReport};
use crate::core::stats::{FrequencyMap, Mood};

/// Entries sorted by descending count, then by key
fn sorted_counts(counts: &FrequencyMap) -> Vec<(&String, &usize)> {
    let mut sorted: Vec<_> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    sorted
}

fn format_counts(output: &mut String, title: &str, counts: &FrequencyMap) {
    let total: usize = counts.values().sum();
    output.push_str(&format!("  {}: {}\n", title.cyan().bold(), total));

    for (key, count) in sorted_counts(counts) {
        output.push_str(&format!("    - {}: {}\n", key, count));
    }
}

/// Format a summary for console output
///
/// # Arguments
///
/// * `report` - Summary of one input
/// * `verbosity` - 0 shows the mood only, 1 adds word counts, 2 or more adds
///   vowel and consonant counts
///
/// # Returns
///
/// Formatted string for console output
pub fn format_report(report: &TextReport, verbosity: u8) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} {}\n", "Summary for:".yellow().bold(), report.name));

    let mood = match report.summary.mood {
        Mood::Positive => report.summary.mood.as_str().green(),
        Mood::Negative => report.summary.mood.as_str().red(),
        Mood::Neutral => report.summary.mood.as_str().normal(),
    };
    output.push_str(&format!("  {}: {}\n", "Mood".cyan().bold(), mood));

    if verbosity >= 1 {
        format_counts(&mut output, "Words", &report.summary.word_count);
    }

    if verbosity >= 2 {
        format_counts(&mut output, "Vowels", &report.summary.vowel_count);
        format_counts(&mut output, "Consonants", &report.summary.consonant_count);
    }

    output
}

/// JSON payload for one summary
pub fn report_json(report: &TextReport) -> Result<Value> {
    serde_json::to_value(report).context("Failed to serialize summary")
}

/// Render the outcome of one input as it should be printed
///
/// Unavailable inputs render as their plain message in both modes.
pub fn render_outcome(outcome: &Outcome, verbosity: u8, json_mode: bool) -> Result<String> {
    match outcome {
        Outcome::Report(report) if json_mode => {
            let payload = report_json(report)?;
            serde_json::to_string_pretty(&payload).context("Failed to format JSON summary")
        }
        Outcome::Report(report) => Ok(format_report(report, verbosity)),
        Outcome::Unavailable(message) => Ok(message.clone()),
    }
}

/// Export summaries to a CSV file
///
/// One row per counted key: `name,category,key,count`, where category is
/// `vowel`, `consonant`, `word` or `mood`. The mood row carries the label as
/// its key and a count of 1.
///
/// # Arguments
///
/// * `reports` - Summaries to export
/// * `output_path` - Path where the CSV file will be written
pub fn export_csv(reports: &[&TextReport], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create CSV output file: {}", output_path.display()))?;

    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(["name", "category", "key", "count"])
        .context("Failed to write CSV header")?;

    for report in reports {
        let categories = [
            ("vowel", &report.summary.vowel_count),
            ("consonant", &report.summary.consonant_count),
            ("word", &report.summary.word_count),
        ];

        for (category, counts) in categories {
            for (key, count) in counts {
                writer
                    .write_record([report.name.as_str(), category, key.as_str(), count.to_string().as_str()])
                    .context("Failed to write CSV record")?;
            }
        }

        writer
            .write_record([report.name.as_str(), "mood", report.summary.mood.as_str(), "1"])
            .context("Failed to write CSV record")?;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats::TextSummary;

    fn sample_report() -> TextReport {
        let counts = |pairs: &[(&str, usize)]| -> FrequencyMap {
            pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
        };

        TextReport {
            summary: TextSummary {
                vowel_count: counts(&[("a", 2)]),
                consonant_count: counts(&[("b", 1)]),
                word_count: counts(&[("aba", 1)]),
                mood: Mood::Neutral,
            },
            content: "aba".to_string(),
            name: "aba".to_string(),
        }
    }

    #[test]
    fn test_json_shape() {
        let payload = report_json(&sample_report()).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "vowel_count": {"a": 2},
                "consonant_count": {"b": 1},
                "word_count": {"aba": 1},
                "mood": "neutral",
                "content": "aba",
                "name": "aba",
            })
        );
    }

    #[test]
    fn test_render_json_parses_back() {
        let outcome = Outcome::Report(sample_report());
        let rendered = render_outcome(&outcome, 0, true).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["name"], "aba");
        assert_eq!(parsed["mood"], "neutral");
    }

    #[test]
    fn test_render_unavailable_is_plain_message() {
        let outcome = Outcome::Unavailable("Invalid url: http://nowhere.test".to_string());
        assert_eq!(render_outcome(&outcome, 2, true).unwrap(), "Invalid url: http://nowhere.test");
    }

    #[test]
    fn test_format_report_verbosity() {
        let report = sample_report();

        let quiet = format_report(&report, 0);
        assert!(quiet.contains("neutral"));
        assert!(!quiet.contains("aba: 1"));

        let words = format_report(&report, 1);
        assert!(words.contains("- aba: 1"));
        assert!(!words.contains("- a: 2"));

        let full = format_report(&report, 2);
        assert!(full.contains("- a: 2"));
        assert!(full.contains("- b: 1"));
    }

    #[test]
    fn test_sorted_counts_by_count_then_key() {
        let counts: FrequencyMap = [("b", 2), ("a", 2), ("c", 5)]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        let keys: Vec<_> = sorted_counts(&counts).into_iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_export_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let report = sample_report();

        export_csv(&[&report], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "name,category,key,count",
                "aba,vowel,a,2",
                "aba,consonant,b,1",
                "aba,word,aba,1",
                "aba,mood,neutral,1",
            ]
        );
    }
}
