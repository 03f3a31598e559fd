//! Quote-aware CSV tokenizer for fetched sheet exports.
//!
//! Parsing never rejects input: malformed quoting degrades into best-effort
//! tokenization, and an unterminated trailing quote is implicitly closed at
//! end of input. Fields are trimmed after boundary detection, so quoted
//! values with meaningful leading/trailing whitespace are not preserved.

/// Splits raw CSV text into rows of trimmed fields, in source order.
pub fn parse_csv(input: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // "" inside quotes is an escaped literal quote
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => {
                row.push(field.trim().to_string());
                field.clear();
            }
            '\n' | '\r' => {
                // \r\n is one row terminator
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(field.trim().to_string());
                field.clear();
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    // Flush the pending field/row; a trailing newline leaves both empty,
    // so no phantom row is emitted.
    if !field.is_empty() || !row.is_empty() {
        row.push(field.trim().to_string());
        rows.push(row);
    }

    rows
}
