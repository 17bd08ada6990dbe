//! Fixed-width text tables for terminal output.

/// A ratio in `[0, 1]` as a percentage with one decimal.
pub fn percent(ratio: f64) -> String {
    format!("{:.1}", ratio * 100.0)
}

enum Line {
    Cells(Vec<String>),
    Note(String, String),
}

/// Left-aligned first column, right-aligned numeric columns.
pub(crate) struct Table {
    headers: Vec<String>,
    lines: Vec<Line>,
}

impl Table {
    pub(crate) fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            lines: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, cells: Vec<String>) {
        self.lines.push(Line::Cells(cells));
    }

    /// A row that prints `note` after the first cell instead of numbers.
    pub(crate) fn push_note(&mut self, first: String, note: String) {
        self.lines.push(Line::Note(first, note));
    }

    pub(crate) fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(String::len).collect();
        for line in &self.lines {
            match line {
                Line::Cells(cells) => {
                    for (width, cell) in widths.iter_mut().zip(cells) {
                        *width = (*width).max(cell.len());
                    }
                }
                Line::Note(first, _) => widths[0] = widths[0].max(first.len()),
            }
        }

        let format_row = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, &width))| {
                    if i == 0 {
                        format!("{cell:<width$}")
                    } else {
                        format!("{cell:>width$}")
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = String::new();
        out.push_str(&format_row(&self.headers));
        out.push('\n');
        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total));
        out.push('\n');
        for line in &self.lines {
            match line {
                Line::Cells(cells) => out.push_str(&format_row(cells)),
                Line::Note(first, note) => {
                    let width = widths[0];
                    out.push_str(&format!("{first:<width$}  {note}"));
                }
            }
            out.push('\n');
        }
        out
    }
}
