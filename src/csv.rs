//! Shared parser for Google Sheets CSV exports.
//!
//! Handles quoted fields, escaped quotes (`""`), commas and newlines inside
//! quotes, and CRLF / bare CR / LF row endings. Rows whose every field trims
//! to empty are dropped, which also covers the trailing blank line Sheets
//! likes to append.

/// Raw CSV rows, blank rows removed. Fields are not trimmed.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b'"' => {
                if in_quotes && bytes.get(i + 1) == Some(&b'"') {
                    field.push('"');
                    i += 1;
                } else {
                    in_quotes = !in_quotes;
                }
            }
            b',' if !in_quotes => {
                row.push(std::mem::take(&mut field));
            }
            b'\r' | b'\n' if !in_quotes => {
                if c == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                row.push(std::mem::take(&mut field));
                flush_row(&mut rows, &mut row);
            }
            _ => {
                // Multi-byte UTF-8 sequences never collide with the ASCII
                // delimiters matched above, so byte-wise scanning is safe.
                let ch_len = utf8_len(c);
                field.push_str(&text[i..i + ch_len]);
                i += ch_len - 1;
            }
        }
        i += 1;
    }

    row.push(field);
    flush_row(&mut rows, &mut row);
    rows
}

fn flush_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>) {
    if row.iter().any(|f| !f.trim().is_empty()) {
        rows.push(std::mem::take(row));
    } else {
        row.clear();
    }
}

fn utf8_len(first_byte: u8) -> usize {
    match first_byte {
        b if b < 0x80 => 1,
        b if b < 0xE0 => 2,
        b if b < 0xF0 => 3,
        _ => 4,
    }
}

/// A parsed sheet: trimmed header row plus data rows.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn parse(text: &str) -> Self {
        let mut rows = parse_rows(text);
        if rows.is_empty() {
            return Self::default();
        }
        let headers = rows.remove(0).iter().map(|h| h.trim().to_string()).collect();
        Self { headers, rows }
    }

    /// Column index by header name, case-insensitive.
    pub fn col(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.eq_ignore_ascii_case(name))
    }

    /// Trimmed cell value for a resolved column, empty when the column is
    /// missing or the row is short.
    pub fn cell<'a>(&self, row: &'a [String], col: Option<usize>) -> &'a str {
        col.and_then(|idx| row.get(idx))
            .map(|v| v.trim())
            .unwrap_or("")
    }
}

pub fn to_number_maybe(v: &str) -> Option<u32> {
    let s = v.replace(',', "");
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<u32>().ok()
}

/// Sheets checkbox values: TRUE/FALSE, 1/0, yes/no, y/n. Blank is None.
pub fn to_bool_maybe(v: &str) -> Option<bool> {
    match v.trim().to_lowercase().as_str() {
        "" => None,
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Split a `;`-separated cell into trimmed, non-empty parts.
pub fn split_multi(v: &str) -> Vec<String> {
    v.split(';')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

pub fn is_year_header(h: &str) -> bool {
    h.len() == 4 && h.chars().all(|c| c.is_ascii_digit())
}

pub fn non_empty(v: &str) -> Option<String> {
    let trimmed = v.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
