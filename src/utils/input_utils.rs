//! Input handling utilities
//!
//! This module provides functions for reading text files, expanding file
//! patterns and fetching text from remote URLs.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use globset::GlobBuilder;
use log::{debug, warn};
use walkdir::WalkDir;

/// Errors raised while obtaining input text
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Cannot find file : {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid file pattern {pattern}: {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("Invalid url: {url}")]
    Fetch { url: String, reason: String },
}

/// Something that can turn a URL into text
pub trait TextFetcher {
    fn fetch(&self, url: &str) -> Result<String, SourceError>;
}

/// Blocking HTTP fetcher
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    /// Create a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::config::Config::builder()
            .timeout_global(Some(timeout))
            .build()
            .new_agent();

        Self { agent }
    }
}

impl TextFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, SourceError> {
        let fetch_error = |e: ureq::Error| SourceError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        };

        debug!("Fetching {}", url);
        let response = self.agent.get(url).call().map_err(fetch_error)?;
        response.into_body().read_to_string().map_err(fetch_error)
    }
}

/// Read a text file
///
/// # Arguments
///
/// * `file_path` - Path to the file
///
/// # Returns
///
/// The file content, `SourceError::FileNotFound` when the file does not exist
pub fn read_text_file(file_path: &Path) -> Result<String, SourceError> {
    if !file_path.is_file() {
        return Err(SourceError::FileNotFound {
            path: file_path.to_path_buf(),
        });
    }

    fs::read_to_string(file_path).map_err(|e| SourceError::Io {
        path: file_path.to_path_buf(),
        source: e,
    })
}

fn has_glob_meta(text: &str) -> bool {
    text.contains(['*', '?', '[', '{'])
}

/// Directory made of the pattern's leading components that contain no glob syntax
fn literal_root(pattern: &str) -> PathBuf {
    let mut root = PathBuf::new();

    for component in Path::new(pattern).components() {
        match component {
            Component::Normal(part) if has_glob_meta(&part.to_string_lossy()) => break,
            other => root.push(other.as_os_str()),
        }
    }

    if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root
    }
}

/// Components from the first one with glob syntax to the end
fn glob_components(pattern: &str) -> Vec<String> {
    Path::new(pattern)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .skip_while(|part| !has_glob_meta(part))
        .collect()
}

/// How deep below the literal root a match can lie; `None` for `**`
fn walk_depth(pattern: &str) -> Option<usize> {
    let parts = glob_components(pattern);
    if parts.iter().any(|part| part.contains("**")) {
        None
    } else {
        Some(parts.len())
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Expand a file pattern into the files it names
///
/// A pattern without glob syntax is returned as-is, even when no such file
/// exists. Otherwise every file below the pattern's literal directory prefix
/// is matched against it; `*` does not cross directory separators, `**` does.
/// Hidden files and directories are skipped unless a glob component starts
/// with a dot.
///
/// # Arguments
///
/// * `pattern` - File path or glob pattern
///
/// # Returns
///
/// Matching paths in sorted order
pub fn expand_file_pattern(pattern: &str) -> Result<Vec<PathBuf>, SourceError> {
    if !has_glob_meta(pattern) {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| SourceError::Pattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?
        .compile_matcher();

    let root = literal_root(pattern);
    let relative_to_cwd = !pattern.starts_with("./") && root == Path::new(".");

    let include_hidden = glob_components(pattern).iter().any(|part| part.starts_with('.'));

    let mut walker = WalkDir::new(&root).follow_links(false);
    if let Some(depth) = walk_depth(pattern) {
        walker = walker.max_depth(depth);
    }

    let mut matches: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|entry| include_hidden || !is_hidden(entry))
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let path = entry.into_path();
            if relative_to_cwd {
                path.strip_prefix(".").map(Path::to_path_buf).unwrap_or(path)
            } else {
                path
            }
        })
        .filter(|path| matcher.is_match(path))
        .collect();

    if matches.is_empty() {
        warn!("No files match pattern: {}", pattern);
    }

    matches.sort();
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern_is_kept() {
        let paths = expand_file_pattern("no/such/file.txt").unwrap();
        assert_eq!(paths, vec![PathBuf::from("no/such/file.txt")]);
    }

    #[test]
    fn test_literal_root() {
        assert_eq!(literal_root("*.txt"), PathBuf::from("."));
        assert_eq!(literal_root("docs/notes/*.md"), PathBuf::from("docs/notes"));
        assert_eq!(literal_root("docs/**/x?.md"), PathBuf::from("docs"));
    }

    #[test]
    fn test_expand_glob_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("c.md"), "c").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("d.txt"), "d").unwrap();

        let pattern = format!("{}/*.txt", dir.path().display());
        let paths = expand_file_pattern(&pattern).unwrap();

        assert_eq!(paths, vec![dir.path().join("a.txt"), dir.path().join("b.txt")]);
    }

    #[test]
    fn test_expand_recursive_glob() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("top.txt"), "t").unwrap();
        fs::write(dir.path().join("nested").join("deep.txt"), "d").unwrap();

        let pattern = format!("{}/**/*.txt", dir.path().display());
        let paths = expand_file_pattern(&pattern).unwrap();

        assert!(paths.contains(&dir.path().join("nested").join("deep.txt")));
    }

    #[test]
    fn test_walk_depth() {
        assert_eq!(walk_depth("*.txt"), Some(1));
        assert_eq!(walk_depth("tests/data/*.txt"), Some(1));
        assert_eq!(walk_depth("docs/*/notes/*.md"), Some(3));
        assert_eq!(walk_depth("docs/**/*.md"), None);
    }

    #[test]
    fn test_expand_skips_hidden_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("seen.txt"), "s").unwrap();
        fs::write(dir.path().join(".hidden.txt"), "h").unwrap();
        fs::create_dir(dir.path().join(".cache")).unwrap();
        fs::write(dir.path().join(".cache").join("inner.txt"), "i").unwrap();

        let plain = expand_file_pattern(&format!("{}/**/*.txt", dir.path().display())).unwrap();
        assert_eq!(plain, vec![dir.path().join("seen.txt")]);

        let dotted = expand_file_pattern(&format!("{}/.*.txt", dir.path().display())).unwrap();
        assert_eq!(dotted, vec![dir.path().join(".hidden.txt")]);
    }

    #[test]
    fn test_expand_without_matches() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.txt", dir.path().display());
        assert!(expand_file_pattern(&pattern).unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_text_file(Path::new("no_such_file.txt")).unwrap_err();
        assert!(matches!(err, SourceError::FileNotFound { .. }));
        assert_eq!(err.to_string(), "Cannot find file : no_such_file.txt");
    }

    #[test]
    fn test_read_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, "Some text").unwrap();

        assert_eq!(read_text_file(&path).unwrap(), "Some text");
    }
}
