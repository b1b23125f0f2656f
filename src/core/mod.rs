//! Core module for text statistics
//!
//! This module contains the lexicon loader, the statistics engine that counts
//! characters and words and votes on mood, and an optional lexicon cache.

pub mod cache;
pub mod lexicon;
pub mod stats;
