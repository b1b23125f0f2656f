//! Text Summary - vowel, consonant and word frequencies plus a lexicon-based mood
//!
//! The main entry point for the text summary application. It parses command-line
//! arguments, gathers the inputs and prints one summary per input.

use anyhow::{Context, Result};
use clap::{ArgAction, ArgGroup, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, LevelFilter};
use rayon::prelude::*;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use text_summary::app::{self, Input, Outcome};
use text_summary::config::{self, AppConfig};
use text_summary::core::cache::CachedLexicon;
use text_summary::core::lexicon::{FileLexicon, LexiconSource};
use text_summary::utils::input_utils::{self, HttpFetcher, TextFetcher};
use text_summary::utils::output_formatter;

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "text_summary",
    version,
    about = "Vowel, consonant and word frequencies plus mood for text, files and URLs",
    long_about = "Summarizes each input with:
- vowel and consonant frequencies
- normalized word frequencies
- an overall mood (positive, negative or neutral) voted by a subjectivity lexicon"
)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .multiple(true)
        .args(["string", "file", "url"]),
))]
struct Args {
    /// Text to summarize (can be used multiple times)
    #[arg(short = 's', long = "string", action = ArgAction::Append)]
    string: Vec<String>,

    /// File or glob pattern to summarize (can be used multiple times)
    #[arg(short = 'f', long = "file", action = ArgAction::Append)]
    file: Vec<String>,

    /// URL to fetch and summarize (can be used multiple times)
    #[arg(short = 'u', long = "url", action = ArgAction::Append)]
    url: Vec<String>,

    /// Increase detail: -v adds word counts, -vv adds letter counts
    #[arg(short = 'v', action = ArgAction::Count)]
    verbosity: u8,

    /// Print summaries as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Export summaries to a CSV file
    #[arg(long = "csv")]
    csv: Option<PathBuf>,

    /// Path to the subjectivity lexicon
    #[arg(long = "lexicon", env = "TEXT_SUMMARY_LEXICON")]
    lexicon: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Number of parallel workers (0=auto)
    #[arg(long = "parallel")]
    parallel: Option<usize>,

    /// URL fetch timeout in seconds
    #[arg(long = "timeout")]
    timeout: Option<u64>,

    /// Show a progress bar while summarizing
    #[arg(long = "progress", action = ArgAction::SetTrue)]
    progress: bool,

    /// Set logging level (default: WARN)
    #[arg(long = "log-level", default_value = "warn")]
    log_level: LevelFilter,

    /// Log file path (default: stderr)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

/// Main entry point function
fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    setup_logging(&args);

    // Load configuration, command line flags take precedence
    let config = apply_overrides(config::load_config(args.config.as_deref()), &args);

    let inputs = collect_inputs(&args)?;

    let lexicon = CachedLexicon::new(FileLexicon::new(config.lexicon()));
    let fetcher = HttpFetcher::new(Duration::from_secs(config.timeout));

    let outcomes = analyze_inputs(&inputs, &lexicon, &fetcher, &config, args.progress).map_err(|e| {
        error!("{:#}", e);
        e
    })?;

    for outcome in &outcomes {
        println!(
            "{}",
            output_formatter::render_outcome(outcome, args.verbosity, args.json)?
        );
    }

    if let Some(csv_path) = &args.csv {
        let reports: Vec<_> = outcomes.iter().filter_map(Outcome::report).collect();
        output_formatter::export_csv(&reports, csv_path)?;
        info!("Exported {} summaries to {}", reports.len(), csv_path.display());
    }

    Ok(())
}

/// Set up logging with file or console output
fn setup_logging(args: &Args) {
    // Configure logging
    let mut builder = env_logger::Builder::new();

    // Set log level from arguments
    builder.filter_level(args.log_level);

    // Set format
    builder.format(|buf, record| {
        use chrono::Local;
        use std::io::Write;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    // Add file output
    if let Some(log_file) = &args.log_file {
        match File::create(log_file) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Cannot open log file {}: {}", log_file.display(), e),
        }
    }

    // Initialize logger
    builder.init();
}

fn apply_overrides(mut config: AppConfig, args: &Args) -> AppConfig {
    if let Some(lexicon) = &args.lexicon {
        config.lexicon_path = lexicon.clone();
    }
    if let Some(parallel) = args.parallel {
        config.parallel = parallel;
    }
    if let Some(timeout) = args.timeout {
        config.timeout = timeout;
    }
    config
}

/// Strings first, then files (patterns expanded), then URLs
fn collect_inputs(args: &Args) -> Result<Vec<Input>> {
    let mut inputs: Vec<Input> = args.string.iter().cloned().map(Input::Text).collect();

    for pattern in &args.file {
        let paths = input_utils::expand_file_pattern(pattern)
            .with_context(|| format!("Cannot expand file pattern {}", pattern))?;
        inputs.extend(paths.into_iter().map(Input::File));
    }

    inputs.extend(args.url.iter().cloned().map(Input::Url));

    Ok(inputs)
}

/// Summarize all inputs on a local thread pool, keeping input order
fn analyze_inputs<S, F>(
    inputs: &[Input],
    lexicon: &S,
    fetcher: &F,
    config: &AppConfig,
    show_progress: bool,
) -> Result<Vec<Outcome>>
where
    S: LexiconSource + Sync,
    F: TextFetcher + Sync,
{
    if inputs.is_empty() {
        return Ok(Vec::new());
    }

    // Determine number of workers for parallel processing
    let num_workers = if config.parallel == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        config.parallel
    };

    info!("Summarizing {} inputs with {} workers", inputs.len(), num_workers);

    let progress_bar = if show_progress {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} inputs ({eta})")
                .map_err(|e| anyhow::anyhow!("Invalid progress bar template: {}", e))?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Create a local thread pool instead of using the global one
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_workers)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build thread pool: {}", e))?;

    let outcomes = pool.install(|| {
        inputs
            .par_iter()
            .map(|input| {
                let outcome = app::summarize_input(input, lexicon, fetcher);
                if let Some(pb) = &progress_bar {
                    pb.inc(1);
                }
                outcome
            })
            .collect::<Result<Vec<_>>>()
    });

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    outcomes
}
