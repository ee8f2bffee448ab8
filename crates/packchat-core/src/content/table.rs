//! Minimal CSV reader and aligned table renderer.

use crate::{Error, Result};

/// Parses comma-separated text into rows of fields.
///
/// Supports quoted fields with embedded commas, newlines and doubled quotes,
/// and both `\n` and `\r\n` line endings. Blank lines are skipped.
pub fn parse_csv(input: &str) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' if field.is_empty() => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => finish_row(&mut rows, &mut row, &mut field),
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(Error::invalid_input().with_message("Unterminated quoted field in CSV"));
    }

    finish_row(&mut rows, &mut row, &mut field);
    Ok(rows)
}

fn finish_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>, field: &mut String) {
    if row.is_empty() && field.is_empty() {
        return;
    }

    row.push(std::mem::take(field));
    rows.push(std::mem::take(row));
}

/// Renders rows as a whitespace-aligned table.
///
/// Every column is right-aligned to its widest cell and columns are joined
/// by a single space. Short rows are padded with empty cells.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            widths
                .iter()
                .enumerate()
                .map(|(index, &width)| {
                    let cell = row.get(index).map(String::as_str).unwrap_or_default();
                    format!("{cell:>width$}")
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
