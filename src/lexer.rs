//! Splitting a raw input line into the command name and its arguments.

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;

/// Bytes that separate tokens: space, tab, carriage return, newline and bell.
pub const DELIMITERS: &[u8] = b" \t\r\n\x07";

/// Splits `line` into delimiter-separated tokens.
///
/// Runs of delimiters collapse, so no token is ever empty. Quotes and backslashes
/// are ordinary characters. A blank line yields an empty vector.
///
/// The line is raw bytes, not necessarily UTF-8; each token is exactly the bytes it
/// spans, borrowed from `line`.
pub fn split_into_tokens(line: &[u8]) -> Vec<&OsStr> {
    line.split(|b| DELIMITERS.contains(b))
        .filter(|t| !t.is_empty())
        .map(OsStr::from_bytes)
        .collect()
}
