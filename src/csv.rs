// src/csv.rs
//! Row codec for the shortcut file: one `shortcut<sep>canonical-tag` record
//! per line. Cells holding the separator, a quote or a line break are
//! written quoted, and quoted cells may span lines when read back.
use std::io::{self, Write};
use std::mem::take;

/* ---------- reading ---------- */

#[derive(Default)]
struct Rows {
    done: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
}

impl Rows {
    fn end_cell(&mut self) {
        self.row.push(take(&mut self.cell));
    }

    /// A line with nothing on it is not a record.
    fn end_row(&mut self) {
        self.end_cell();
        let row = take(&mut self.row);
        if row.len() > 1 || row.first().is_some_and(|c| !c.is_empty()) {
            self.done.push(row);
        }
    }
}

/// Split `text` into records of cells. Accepts `\n`, `\r\n` and bare `\r`
/// line ends. An unclosed quote runs to the end of the text.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Rows::default();
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if quoted {
            match ch {
                '"' if chars.next_if_eq(&'"').is_some() => rows.cell.push('"'),
                '"' => quoted = false,
                _ => rows.cell.push(ch),
            }
            continue;
        }
        match ch {
            '"' => quoted = true,
            '\r' => {
                chars.next_if_eq(&'\n');
                rows.end_row();
            }
            '\n' => rows.end_row(),
            c if c == sep => rows.end_cell(),
            _ => rows.cell.push(ch),
        }
    }
    rows.end_row();
    rows.done
}

/* ---------- writing ---------- */

fn quote(cell: &str, sep: char) -> String {
    if cell.contains(|c: char| c == sep || matches!(c, '"' | '\n' | '\r')) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        s!(cell)
    }
}

/// Append one record plus a newline to `w`.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let line: Vec<String> = row.iter().map(|c| quote(c, sep)).collect();
    writeln!(w, "{}", line.join(&sep.to_string()))
}
