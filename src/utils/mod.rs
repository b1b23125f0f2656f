//! Utility modules for the text summary tool
//!
//! This module contains utility functions for obtaining input text and for
//! formatting and exporting summaries.

pub mod input_utils;
pub mod output_formatter;
