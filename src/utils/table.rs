//! Table rendering for CLI outputs.
//!
//! Every column but the last is padded to its widest cell plus three
//! spaces. A footer row does not take part in the width calculation.

use unicode_width::UnicodeWidthStr;

const GUTTER: usize = 3;

pub struct Table {
    pub rows: Vec<Vec<String>>,
    pub footer_row: bool,
}

impl Table {
    pub fn new<S: Into<String>>(header: Vec<S>) -> Self {
        Self {
            rows: vec![header.into_iter().map(Into::into).collect()],
            footer_row: false,
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, row: Vec<S>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn with_footer(mut self) -> Self {
        self.footer_row = true;
        self
    }

    pub fn render(&self) -> String {
        render(&self.rows, self.footer_row)
    }
}

pub fn render(rows: &[Vec<String>], footer_row: bool) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };

    let check = if footer_row && rows.len() > 1 {
        &rows[..rows.len() - 1]
    } else {
        rows
    };

    let cols = first.len();
    let widths: Vec<usize> = (0..cols)
        .map(|c| {
            check
                .iter()
                .map(|r| r.get(c).map_or(0, |cell| cell.width()))
                .max()
                .unwrap_or(0)
                + GUTTER
        })
        .collect();

    let mut out = String::new();
    for row in rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            line.push_str(cell);
            if i + 1 < row.len() {
                let pad = widths.get(i).copied().unwrap_or(GUTTER);
                let used = cell.width();
                line.push_str(&" ".repeat(pad.saturating_sub(used)));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
