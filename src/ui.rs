//! Terminal tables for `seed list`.
//!
//! Columns are sized to their content and shrunk (widest first, never below
//! eight characters) until the table fits the terminal.

use colored::*;

const MIN_COLUMN: usize = 8;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are ignored.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self, max_width: usize) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| console::measure_text_width(h))
            .collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(console::measure_text_width(cell));
            }
        }

        // Two-space indent, then "│ cell " per column and a closing "│".
        let overhead = 3 + 3 * widths.len();
        while overhead + widths.iter().sum::<usize>() > max_width {
            let Some(widest) = widths
                .iter_mut()
                .filter(|w| **w > MIN_COLUMN)
                .max_by_key(|w| **w)
            else {
                break;
            };
            *widest -= 1;
        }
        widths
    }

    /// Render to lines no wider than `max_width` where the minimum column width allows.
    pub fn render(&self, max_width: usize) -> Vec<String> {
        let widths = self.column_widths(max_width);

        let border = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {}{}{}", left, segments.join(mid), right)
        };
        let line = |cells: &[String], bold: bool| {
            let mut out = String::from("  │");
            for (cell, &width) in cells.iter().zip(&widths) {
                let cell = console::truncate_str(cell, width, "...");
                let padded = console::pad_str(&cell, width, console::Alignment::Left, None);
                if bold {
                    out.push_str(&format!(" {} │", padded.bold()));
                } else {
                    out.push_str(&format!(" {} │", padded));
                }
            }
            out
        };

        let mut lines = vec![border("┌", "┬", "┐"), line(&self.headers, true)];
        lines.push(border("├", "┼", "┤"));
        for row in &self.rows {
            lines.push(line(row, false));
        }
        lines.push(border("└", "┴", "┘"));
        lines
    }

    pub fn print(&self) {
        let (_, width) = console::Term::stdout().size();
        for line in self.render(width as usize) {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let mut t = Table::new(&["Module", "Target"]);
        t.add_row(vec!["Common".to_string(), "Shared".to_string()]);
        t.add_row(vec!["GameplayCore".to_string(), "Static".to_string()]);
        t
    }

    #[test]
    fn test_render_sizes_columns_to_content() {
        colored::control::set_override(false);
        let lines = table().render(200);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "  ┌──────────────┬────────┐");
        assert_eq!(lines[3], "  │ Common       │ Shared │");
        assert_eq!(lines[4], "  │ GameplayCore │ Static │");
    }

    #[test]
    fn test_render_shrinks_to_terminal() {
        colored::control::set_override(false);
        let lines = table().render(20);
        assert!(lines.iter().all(|l| console::measure_text_width(l) <= 23));
        assert!(lines[4].contains("..."));
    }

    #[test]
    fn test_mismatched_row_is_ignored() {
        let mut t = Table::new(&["A", "B"]);
        t.add_row(vec!["only one".to_string()]);
        assert!(t.is_empty());
    }
}
