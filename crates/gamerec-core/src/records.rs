//! Utilities for records output format
//!
//! Every record is one line: a single-letter kind followed by fields.
//! - `H` header: format version, command and store
//! - `S` stage: name, row count and write time
//! - `R` recommendation: rank, score and quoted identifier

use std::path::Path;

/// Records format version
pub const RECORDS_VERSION: u32 = 1;

/// Escape double quotes in a string for records format.
/// Replaces `"` with `\"` to allow safe embedding in quoted fields.
pub fn escape_quotes(s: &str) -> String {
    s.replace('\"', r#"\""#)
}

/// Header line opening every records output
pub fn header_line(command: &str, store: &Path) -> String {
    format!(
        "H gamerec={} command={} store={}",
        RECORDS_VERSION,
        command,
        path_relative_to_cwd(store)
    )
}

/// Convert an absolute path to a path relative to the current working directory
pub fn path_relative_to_cwd(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        path.strip_prefix(&cwd)
            .ok()
            .map(|p| {
                let s = p.display().to_string();
                if s.is_empty() {
                    ".".to_string()
                } else {
                    s
                }
            })
            .unwrap_or_else(|| path.display().to_string())
    } else {
        path.display().to_string()
    }
}
