use tracing::{debug, warn};

use crate::grid::state::SortOrder;
use crate::grid::value::Value;
use crate::grid::Grid;
use crate::text::{align_line, clip_line, fit_line, Align};

/// First visible record so that `cursor` sits inside a window of `rows`.
pub fn scroll_offset(cursor: usize, rows: usize) -> usize {
    if rows == 0 {
        return 0;
    }
    cursor.saturating_sub(rows - 1)
}

/// Numbers hug the right edge, text the left.
fn fit_value(value: &Value, width: usize) -> String {
    let text = value.to_string();
    if value.is_numeric() {
        align_line(&clip_line(&text, width), width, Align::Right, ' ')
    } else {
        fit_line(&text, width)
    }
}

impl Grid {
    fn header_label(&self, column: usize) -> String {
        let mut label = self.headers[column].clone();
        if self.sort.column == Some(column) {
            match self.sort.order {
                SortOrder::Ascending => label = format!("{label} {}", self.theme.sort_ascending),
                SortOrder::Descending => label = format!("{label} {}", self.theme.sort_descending),
                SortOrder::None => {}
            }
        }
        if let Some(filter) = self.filter.as_ref().filter(|f| f.column == column) {
            label = format!("{label} {}{}", self.theme.filter_marker, filter.text);
        }
        label
    }

    fn header_line(&self, widths: &[usize]) -> String {
        let style = self.theme.header_style();
        widths
            .iter()
            .enumerate()
            .map(|(c, &w)| style.render(&fit_line(&self.header_label(c), w)))
            .collect()
    }

    /// One record, each cell painted on its own with the row style, or the
    /// cursor style on the cursor cell. Cells never share a styled span.
    fn body_line(&self, view_row: usize, widths: &[usize]) -> String {
        let record = &self.records[self.view[view_row]];
        let row_style = self.theme.row_style();
        let cursor_style = self.theme.cursor_style();
        record
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(c, (value, &w))| {
                let text = fit_value(value, w);
                if view_row == self.cursor.row && c == self.cursor.col {
                    cursor_style.render(&text)
                } else {
                    row_style.render(&text)
                }
            })
            .collect()
    }

    /// Header line, then as many records as fit below it, scrolled to keep
    /// the cursor in sight. Always `height` lines unless the grid is empty
    /// in either direction.
    pub(crate) fn render_uncached(&self) -> String {
        if self.width == 0 || self.height == 0 {
            return String::new();
        }
        let widths = self.column_widths();
        let used: usize = widths.iter().sum();
        if used > self.width {
            warn!(width = self.width, used, "grid column minimums overflow width");
        }
        let body_rows = self.height - 1;
        let offset = scroll_offset(self.cursor.row, body_rows);
        debug!(
            width = self.width,
            height = self.height,
            visible = self.view.len(),
            offset,
            "grid layout recomputed"
        );
        let blank = " ".repeat(used);
        let mut lines = Vec::with_capacity(self.height);
        lines.push(self.header_line(&widths));
        for i in offset..offset + body_rows {
            if i < self.view.len() {
                lines.push(self.body_line(i, &widths));
            } else {
                lines.push(blank.clone());
            }
        }
        lines.join("\n")
    }
}
