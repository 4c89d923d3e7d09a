//! JSON output helpers.
//!
//! Microvms and lists of microvms are printed as pretty JSON using the proto
//! field names.

use anyhow::{Context, Result};
use serde::Serialize;

/// Render `value` as pretty JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("JSON serialization failed")
}

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", format_json(value)?);
    Ok(())
}
