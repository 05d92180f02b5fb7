use std::io::{self, BufRead};

/// Split one line of a recipe file into at most `max_fields` fields.
///
/// A `"` toggles quoting and is dropped; a comma outside quotes ends the
/// field. Once the last field is reached, further commas are kept as text.
/// There is no escape for a literal quote inside a quoted field.
#[must_use]
pub fn parse_row(line: &str, max_fields: usize) -> Vec<String> {
    if max_fields == 0 {
        return Vec::new();
    }

    let mut fields = vec![String::new()];
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '\n' | '\r' => break,
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes && fields.len() < max_fields => fields.push(String::new()),
            _ => {
                if let Some(field) = fields.last_mut() {
                    field.push(ch);
                }
            }
        }
    }

    fields
}

/// Lines of `reader` without their terminators. Each line is decoded on its
/// own, with invalid UTF-8 replaced, so one bad byte never costs more than
/// the line it sits on.
pub fn lossy_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader.split(b'\n').map(|line| {
        line.map(|bytes| {
            let mut text = String::from_utf8_lossy(&bytes).into_owned();
            if text.ends_with('\r') {
                text.pop();
            }
            text
        })
    })
}
