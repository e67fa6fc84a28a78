//! Helpers for turning captured process output into text lines.

use bstr::ByteSlice;

/// Split captured stdout into lines.
///
/// Accepts both `\n` and `\r\n` terminators. Bytes that are not valid UTF-8
/// are replaced with U+FFFD. A trailing terminator does not produce an empty
/// final line, but blank lines in the middle are kept.
pub fn split_lines(stdout: &[u8]) -> Vec<String> {
    stdout
        .lines()
        .map(|line| line.to_str_lossy().into_owned())
        .collect()
}

/// Decode stderr for error reporting: lossy UTF-8, surrounding whitespace removed.
pub fn trimmed_text(bytes: &[u8]) -> String {
    bytes.trim().to_str_lossy().into_owned()
}
