// src/storage/csv.rs

//! Minimal CSV codec for the results artifact.
//!
//! Writing follows RFC 4180 with CRLF line endings; a field is quoted only
//! when it contains a comma, a quote or a line break. Reading accepts the
//! same dialect and tolerates bare LF endings.

use std::io::{self, Write};
use std::mem::take;

use crate::models::ResultRow;

const SEP: char = ',';

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single record to any writer.
pub fn write_record<W: Write, S: AsRef<str>>(w: &mut W, record: &[S]) -> io::Result<()> {
    for (i, cell) in record.iter().enumerate() {
        if i > 0 {
            write!(w, "{SEP}")?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\r\n")
}

/// Render the header plus one record per row.
pub fn to_csv_string(rows: &[ResultRow]) -> String {
    let mut buf: Vec<u8> = Vec::new();

    // Writing into a Vec cannot fail.
    let _ = write_record(&mut buf, &ResultRow::FIELDS[..]);
    for row in rows {
        let _ = write_record(&mut buf, &row.to_record()[..]);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

/// Split CSV text into records.
pub fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut field = String::new();
    let mut record = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            c if c == SEP && !in_quotes => record.push(take(&mut field)),
            '\r' | '\n' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                record.push(take(&mut field));
                if !(record.len() == 1 && record[0].is_empty()) {
                    records.push(take(&mut record));
                } else {
                    record.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    records
}

/// Parse a results CSV back into rows.
///
/// Columns are matched by header name; unknown columns are ignored and
/// absent ones stay empty.
pub fn parse_rows(text: &str) -> Vec<ResultRow> {
    let mut records = parse_records(text).into_iter();
    let Some(header) = records.next() else {
        return Vec::new();
    };

    records
        .map(|record| {
            let mut row = ResultRow::default();
            for (name, value) in header.iter().zip(record) {
                if let Some(slot) = row.get_mut(name) {
                    *slot = value;
                }
            }
            row
        })
        .collect()
}
