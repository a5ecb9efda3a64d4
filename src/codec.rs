//! Comma-delimited record codec.
//!
//! The on-disk format is deliberately minimal: one header row (discarded on
//! read), comma-separated fields, and quoting only where a field contains
//! the delimiter. There is no escape mechanism for a literal quote
//! character, so a field containing `"` is not guaranteed to round-trip.

use std::fs;
use std::io;
use std::path::Path;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Split one line into fields. A quote character toggles the in-quotes flag
/// and is dropped from the output; every field is trimmed after splitting.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == QUOTE {
            in_quotes = !in_quotes;
        } else if ch == DELIMITER && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Parse a whole document into data rows. The first line is treated as a
/// header and discarded; blank lines are skipped.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .skip(1)
        .filter(|line| !line.is_empty())
        .map(split_line)
        .collect()
}

/// Render a header and data rows. A field is wrapped in quotes only when it
/// contains the delimiter; embedded quote characters are written as-is.
pub fn format(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in rows {
        for (i, field) in row.iter().enumerate() {
            if i > 0 {
                out.push(DELIMITER);
            }
            if field.contains(DELIMITER) {
                out.push(QUOTE);
                out.push_str(field);
                out.push(QUOTE);
            } else {
                out.push_str(field);
            }
        }
        out.push('\n');
    }
    out
}

/// Read and parse a file. Fails when the path cannot be opened for reading.
pub fn read_rows(path: &Path) -> io::Result<Vec<Vec<String>>> {
    let text = fs::read_to_string(path)?;
    Ok(parse(&text))
}

/// Render and overwrite a file. Fails when the path cannot be opened for
/// writing.
pub fn write_rows(path: &Path, header: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    fs::write(path, format(header, rows))
}
