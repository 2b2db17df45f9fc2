use unicode_width::UnicodeWidthStr;

use crate::node::Section;
use crate::table::TableElement;

pub fn display_width(s: &str) -> usize {
    s.width()
}

fn pad_to_width(s: &str, width: usize) -> String {
    let current = display_width(s);
    let mut out = s.to_string();
    for _ in current..width {
        out.push(' ');
    }
    out
}

impl TableElement {
    /// Render the visible cells of the table as an aligned plain-text grid.
    ///
    /// Hidden rows and hidden cells are skipped; column widths are computed
    /// over the remaining content with `unicode-width`.
    pub fn render_plain(&self) -> String {
        let mut grid: Vec<Vec<String>> = Vec::new();
        for section in [Section::Head, Section::Body] {
            for row in self.rows(section) {
                if !row.visible {
                    continue;
                }
                let cells: Vec<String> = row
                    .cells
                    .iter()
                    .filter(|c| c.visible)
                    .map(|c| c.content.raw().to_string())
                    .collect();
                grid.push(cells);
            }
        }

        let columns = grid.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &grid {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(display_width(cell));
            }
        }

        let mut out = String::new();
        for row in &grid {
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| pad_to_width(cell, widths[i]))
                .collect();
            out.push_str(line.join(" | ").trim_end());
            out.push('\n');
        }
        out
    }
}
