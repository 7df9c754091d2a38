//! Data grid: typed records laid out in columns with a cursor, one sort
//! column and one filter column.
//!
//! Storage order never changes. Sorting and filtering only rebuild the
//! visible view, a list of indices into storage, and the cursor always
//! points into that view. Sorting starts from a base order that is taken
//! from the current sort whenever the sort column changes, so rows tied on
//! the new key keep the order they had on screen.

pub mod render;
pub mod state;
pub mod update;
pub mod value;

use std::cell::RefCell;

use tracing::{debug, warn};

use crate::allocate::allocate_with_minimums;
use crate::config::Theme;
use crate::error::{LayoutError, Result};

pub use state::{Cursor, Direction, Filter, SortOrder, SortState};
pub use update::GridMsg;
pub use value::{infer_record, ColumnKind, Value};

#[derive(Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    headers: Vec<String>,
    kinds: Vec<Option<ColumnKind>>,
    kinds_declared: bool,
    ratios: Vec<usize>,
    min_widths: Vec<usize>,
    records: Vec<Vec<Value>>,
    base: Vec<usize>,
    view: Vec<usize>,
    cursor: Cursor,
    sort: SortState,
    filter: Option<Filter>,
    theme: Theme,
    rendered: RefCell<Option<String>>,
}

fn rejected<T>(err: LayoutError) -> Result<T> {
    warn!(%err, "grid mutation rejected");
    Err(err)
}

/// A `Float` column also takes integers.
fn accepts(kind: ColumnKind, value: &Value) -> bool {
    value.kind() == kind || (kind == ColumnKind::Float && value.kind() == ColumnKind::Integer)
}

impl Grid {
    /// Empty grid with one column per header, all of ratio 1.
    pub fn new<I, S>(width: usize, height: usize, headers: I) -> Result<Grid>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if headers.is_empty() {
            return rejected(LayoutError::EmptyHeaders);
        }
        let n = headers.len();
        Ok(Grid {
            width,
            height,
            headers,
            kinds: vec![None; n],
            kinds_declared: false,
            ratios: vec![1; n],
            min_widths: vec![0; n],
            records: Vec::new(),
            base: Vec::new(),
            view: Vec::new(),
            cursor: Cursor::default(),
            sort: SortState::default(),
            filter: None,
            theme: Theme::default(),
            rendered: RefCell::new(None),
        })
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.set_theme(theme);
        self
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.invalidate();
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    fn invalidate(&mut self) {
        *self.rendered.get_mut() = None;
    }

    /// Rebuild the view from storage, then pull the cursor back inside it.
    fn refresh(&mut self) {
        self.view = state::visible_indices(&self.records, &self.base, self.filter.as_ref(), self.sort);
        self.cursor.clamp(self.view.len(), self.columns());
        self.invalidate();
    }

    fn check_column(&self, column: usize) -> Result<()> {
        if column >= self.columns() {
            return rejected(LayoutError::ColumnOutOfRange {
                column,
                columns: self.columns(),
            });
        }
        Ok(())
    }

    fn check_count(&self, what: &'static str, found: usize) -> Result<()> {
        if found != self.columns() {
            return rejected(LayoutError::SpecCount {
                what,
                expected: self.columns(),
                found,
            });
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.invalidate();
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn columns(&self) -> usize {
        self.headers.len()
    }

    /// Width ratios, one per column; 0 is rejected.
    pub fn set_ratios(&mut self, ratios: &[usize]) -> Result<()> {
        self.check_count("ratios", ratios.len())?;
        if let Some(index) = ratios.iter().position(|&r| r == 0) {
            return rejected(LayoutError::ZeroRatio { index });
        }
        self.ratios = ratios.to_vec();
        self.invalidate();
        Ok(())
    }

    pub fn set_min_widths(&mut self, min_widths: &[usize]) -> Result<()> {
        self.check_count("min widths", min_widths.len())?;
        self.min_widths = min_widths.to_vec();
        self.invalidate();
        Ok(())
    }

    /// Declare every column's kind. Stored records must already conform.
    pub fn set_column_kinds(&mut self, kinds: &[ColumnKind]) -> Result<()> {
        self.check_count("column kinds", kinds.len())?;
        for (row, record) in self.records.iter().enumerate() {
            for (column, (value, &kind)) in record.iter().zip(kinds).enumerate() {
                if !accepts(kind, value) {
                    return rejected(LayoutError::TypeMismatch {
                        row,
                        column,
                        expected: kind,
                        found: value.kind(),
                    });
                }
            }
        }
        self.kinds = kinds.iter().copied().map(Some).collect();
        self.kinds_declared = true;
        self.invalidate();
        Ok(())
    }

    /// Kind per column; `None` until a record or a declaration fixes it.
    pub fn column_kinds(&self) -> &[Option<ColumnKind>] {
        &self.kinds
    }

    /// Check `rows` against `kinds`, filling in kinds that are still open.
    /// Row numbers in errors count from the start of `rows`.
    fn validate(&self, rows: &[Vec<Value>], mut kinds: Vec<Option<ColumnKind>>) -> Result<Vec<Option<ColumnKind>>> {
        let expected = self.columns();
        for (row, record) in rows.iter().enumerate() {
            if record.len() != expected {
                return rejected(LayoutError::RowArity {
                    row,
                    expected,
                    found: record.len(),
                });
            }
            for (column, value) in record.iter().enumerate() {
                let found = value.kind();
                match kinds[column] {
                    None => kinds[column] = Some(found),
                    Some(kind) if accepts(kind, value) => {}
                    Some(ColumnKind::Integer) if !self.kinds_declared && found == ColumnKind::Float => {
                        kinds[column] = Some(ColumnKind::Float);
                    }
                    Some(kind) => {
                        return rejected(LayoutError::TypeMismatch {
                            row,
                            column,
                            expected: kind,
                            found,
                        });
                    }
                }
            }
        }
        Ok(kinds)
    }

    /// Append records. Either every record is stored or none is.
    pub fn add_rows(&mut self, rows: Vec<Vec<Value>>) -> Result<()> {
        self.kinds = self.validate(&rows, self.kinds.clone())?;
        debug!(added = rows.len(), total = self.records.len() + rows.len(), "grid rows added");
        let start = self.records.len();
        self.records.extend(rows);
        self.base.extend(start..self.records.len());
        self.refresh();
        Ok(())
    }

    /// Swap in a new record set. Sort and filter stay and are re-applied.
    pub fn replace_rows(&mut self, rows: Vec<Vec<Value>>) -> Result<()> {
        let open = if self.kinds_declared {
            self.kinds.clone()
        } else {
            vec![None; self.columns()]
        };
        self.kinds = self.validate(&rows, open)?;
        debug!(total = rows.len(), "grid rows replaced");
        self.base = (0..rows.len()).collect();
        self.records = rows;
        self.refresh();
        Ok(())
    }

    pub fn clear_rows(&mut self) {
        self.records.clear();
        self.base.clear();
        if !self.kinds_declared {
            self.kinds = vec![None; self.columns()];
        }
        self.refresh();
    }

    /// Number of stored records, filtered or not.
    pub fn records_len(&self) -> usize {
        self.records.len()
    }

    pub fn visible_len(&self) -> usize {
        self.view.len()
    }

    /// Records in display order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Value]> + '_ {
        self.view.iter().map(move |&i| self.records[i].as_slice())
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.cursor.step(direction, self.view.len(), self.columns());
        self.invalidate();
    }

    pub fn cursor_up(&mut self) {
        self.move_cursor(Direction::Up);
    }

    pub fn cursor_down(&mut self) {
        self.move_cursor(Direction::Down);
    }

    pub fn cursor_left(&mut self) {
        self.move_cursor(Direction::Left);
    }

    pub fn cursor_right(&mut self) {
        self.move_cursor(Direction::Right);
    }

    /// Value under the cursor in the filtered, sorted view.
    pub fn selected(&self) -> Option<&Value> {
        self.selected_record().and_then(|r| r.get(self.cursor.col))
    }

    pub fn selected_record(&self) -> Option<&[Value]> {
        self.view
            .get(self.cursor.row)
            .map(|&i| self.records[i].as_slice())
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// A new sort column rebases on the current full order; clearing the
    /// sort returns to storage order.
    fn apply_sort(&mut self, sort: SortState) {
        if sort.column != self.sort.column {
            if sort.column.is_some() {
                state::sort_indices(&self.records, &mut self.base, self.sort);
            } else {
                self.base = (0..self.records.len()).collect();
            }
            self.cursor.row = 0;
        }
        debug!(column = ?sort.column, order = ?sort.order, "grid sort changed");
        self.sort = sort;
        self.refresh();
    }

    /// Sort ascending on a new column, or flip the direction on the active one.
    pub fn toggle_sort(&mut self, column: usize) -> Result<()> {
        self.check_column(column)?;
        self.apply_sort(self.sort.toggled(column));
        Ok(())
    }

    pub fn order_by_asc(&mut self, column: usize) -> Result<()> {
        self.check_column(column)?;
        self.apply_sort(SortState {
            column: Some(column),
            order: SortOrder::Ascending,
        });
        Ok(())
    }

    pub fn order_by_desc(&mut self, column: usize) -> Result<()> {
        self.check_column(column)?;
        self.apply_sort(SortState {
            column: Some(column),
            order: SortOrder::Descending,
        });
        Ok(())
    }

    /// Back to storage order.
    pub fn clear_sort(&mut self) {
        self.apply_sort(SortState::default());
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Keep records whose `column` contains `text`. Replaces any filter on
    /// another column; empty text clears.
    pub fn set_filter(&mut self, column: usize, text: impl Into<String>) -> Result<()> {
        self.check_column(column)?;
        let text = text.into();
        if text.is_empty() {
            self.clear_filter();
            return Ok(());
        }
        debug!(column, text = %text, "grid filter set");
        self.filter = Some(Filter { column, text });
        self.refresh();
        Ok(())
    }

    pub fn clear_filter(&mut self) {
        if self.filter.take().is_some() {
            debug!("grid filter cleared");
        }
        self.refresh();
    }

    /// Extend the filter of the cursor column by one character. A filter on
    /// another column is dropped first.
    pub fn push_filter_char(&mut self, ch: char) {
        let column = self.cursor.col;
        let mut text = match &self.filter {
            Some(f) if f.column == column => f.text.clone(),
            _ => String::new(),
        };
        text.push(ch);
        debug!(column, text = %text, "grid filter set");
        self.filter = Some(Filter { column, text });
        self.refresh();
    }

    /// Remove the last character of the active filter, clearing it once empty.
    pub fn pop_filter_char(&mut self) {
        let Some(filter) = self.filter.as_mut() else {
            return;
        };
        filter.text.pop();
        if filter.text.is_empty() {
            self.clear_filter();
        } else {
            self.refresh();
        }
    }

    /// Column widths for the current width, honouring minimums.
    pub fn column_widths(&self) -> Vec<usize> {
        allocate_with_minimums(self.width, &self.ratios, &self.min_widths)
    }

    pub fn render(&self) -> String {
        if let Some(cached) = self.rendered.borrow().as_ref() {
            return cached.clone();
        }
        let out = self.render_uncached();
        *self.rendered.borrow_mut() = Some(out.clone());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Grid {
        let mut g = Grid::new(30, 6, ["Name", "Age"]).unwrap();
        g.add_rows(vec![
            infer_record(&["Ann", "30"]),
            infer_record(&["Bob", "25"]),
            infer_record(&["Al", "40"]),
        ])
        .unwrap();
        g
    }

    fn names(g: &Grid) -> Vec<String> {
        g.visible_rows().map(|r| r[0].to_string()).collect()
    }

    #[test]
    fn filter_then_sort_reorders_the_survivors() {
        let mut g = people();
        g.set_filter(0, "A").unwrap();
        assert_eq!(names(&g), vec!["Ann", "Al"]);
        g.toggle_sort(1).unwrap();
        assert_eq!(names(&g), vec!["Ann", "Al"]);
        g.toggle_sort(1).unwrap();
        assert_eq!(names(&g), vec!["Al", "Ann"]);
        assert_eq!(g.records_len(), 3);
    }

    #[test]
    fn new_sort_column_keeps_previous_order_for_ties() {
        let mut g = Grid::new(20, 5, ["Name", "Rank", "Team"]).unwrap();
        g.add_rows(vec![
            infer_record(&["Zed", "2", "x"]),
            infer_record(&["Amy", "1", "x"]),
            infer_record(&["Kim", "3", "x"]),
        ])
        .unwrap();
        g.toggle_sort(1).unwrap();
        assert_eq!(names(&g), vec!["Amy", "Zed", "Kim"]);
        g.toggle_sort(2).unwrap();
        assert_eq!(names(&g), vec!["Amy", "Zed", "Kim"]);
        g.toggle_sort(2).unwrap();
        assert_eq!(names(&g), vec!["Amy", "Zed", "Kim"]);
        // rows added later sort after the rebased ones on ties
        g.add_rows(vec![infer_record(&["Bea", "0", "x"])]).unwrap();
        assert_eq!(names(&g), vec!["Amy", "Zed", "Kim", "Bea"]);
        g.clear_sort();
        assert_eq!(names(&g), vec!["Zed", "Amy", "Kim", "Bea"]);
    }

    #[test]
    fn previous_sort_survives_a_filter_round_trip() {
        let mut g = Grid::new(20, 5, ["Name", "Rank", "Team"]).unwrap();
        g.add_rows(vec![
            infer_record(&["Zed", "2", "x"]),
            infer_record(&["Amy", "1", "y"]),
            infer_record(&["Kim", "3", "x"]),
        ])
        .unwrap();
        g.order_by_desc(1).unwrap();
        g.set_filter(2, "x").unwrap();
        g.toggle_sort(2).unwrap();
        assert_eq!(names(&g), vec!["Kim", "Zed"]);
        g.clear_filter();
        assert_eq!(names(&g), vec!["Kim", "Zed", "Amy"]);
    }

    #[test]
    fn sort_is_numeric_for_number_columns() {
        let mut g = Grid::new(10, 5, ["n"]).unwrap();
        g.add_rows(vec![infer_record(&["9"]), infer_record(&["10"]), infer_record(&["1"])])
            .unwrap();
        g.order_by_asc(0).unwrap();
        assert_eq!(names(&g), vec!["1", "9", "10"]);
        g.order_by_desc(0).unwrap();
        assert_eq!(names(&g), vec!["10", "9", "1"]);
        g.clear_sort();
        assert_eq!(names(&g), vec!["9", "10", "1"]);
    }

    #[test]
    fn cursor_clamps_when_filter_shrinks_view() {
        let mut g = people();
        g.cursor_down();
        g.cursor_down();
        assert_eq!(g.cursor().row, 2);
        g.set_filter(0, "Bob").unwrap();
        assert_eq!(g.visible_len(), 1);
        assert_eq!(g.cursor().row, 0);
        assert_eq!(g.selected(), Some(&Value::from("Bob")));
    }

    #[test]
    fn empty_filter_text_equals_clear() {
        let mut a = people();
        let mut b = people();
        a.set_filter(1, "3").unwrap();
        b.set_filter(1, "3").unwrap();
        a.set_filter(1, "").unwrap();
        b.clear_filter();
        assert!(a.filter().is_none());
        assert_eq!(names(&a), names(&b));
        assert_eq!(a.visible_len(), 3);
    }

    #[test]
    fn filter_on_other_column_replaces() {
        let mut g = people();
        g.set_filter(0, "A").unwrap();
        g.set_filter(1, "25").unwrap();
        assert_eq!(names(&g), vec!["Bob"]);
        assert_eq!(g.filter().map(|f| f.column), Some(1));
    }

    #[test]
    fn empty_view_has_no_selection() {
        let mut g = people();
        g.cursor_right();
        g.set_filter(0, "zzz").unwrap();
        assert_eq!(g.visible_len(), 0);
        assert_eq!(g.cursor(), Cursor { row: 0, col: 1 });
        assert!(g.selected().is_none());
        g.cursor_down();
        assert_eq!(g.cursor().row, 0);
    }

    #[test]
    fn changing_sort_column_resets_cursor_row() {
        let mut g = people();
        g.toggle_sort(1).unwrap();
        g.cursor_down();
        g.cursor_down();
        g.cursor_right();
        g.toggle_sort(1).unwrap();
        assert_eq!(g.cursor(), Cursor { row: 2, col: 1 });
        g.toggle_sort(0).unwrap();
        assert_eq!(g.cursor(), Cursor { row: 0, col: 1 });
    }

    #[test]
    fn selection_follows_the_view() {
        let mut g = people();
        g.order_by_desc(1).unwrap();
        assert_eq!(g.selected(), Some(&Value::from("Al")));
        g.cursor_right();
        assert_eq!(g.selected(), Some(&Value::Int(40)));
    }

    #[test]
    fn bad_batches_are_rejected_whole() {
        let mut g = people();
        let err = g
            .add_rows(vec![infer_record(&["Cy", "22"]), infer_record(&["Di"])])
            .unwrap_err();
        assert_eq!(err, LayoutError::RowArity { row: 1, expected: 2, found: 1 });
        let err = g
            .add_rows(vec![infer_record(&["Cy", "22"]), infer_record(&["Di", "old"])])
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::TypeMismatch {
                row: 1,
                column: 1,
                expected: ColumnKind::Integer,
                found: ColumnKind::Text,
            }
        );
        assert_eq!(g.records_len(), 3);
        assert!(g.replace_rows(vec![infer_record(&["x"])]).is_err());
        assert_eq!(names(&g), vec!["Ann", "Bob", "Al"]);
    }

    #[test]
    fn replace_rows_keeps_sort_and_filter() {
        let mut g = people();
        g.set_filter(0, "o").unwrap();
        g.order_by_asc(1).unwrap();
        g.replace_rows(vec![
            infer_record(&["Joe", "50"]),
            infer_record(&["Ann", "1"]),
            infer_record(&["Moe", "20"]),
        ])
        .unwrap();
        assert_eq!(names(&g), vec!["Moe", "Joe"]);
        g.clear_rows();
        assert_eq!(g.visible_len(), 0);
        assert_eq!(g.column_kinds(), &[None, None]);
    }

    #[test]
    fn inferred_integer_column_widens_to_float() {
        let mut g = Grid::new(10, 5, ["x"]).unwrap();
        g.add_rows(vec![infer_record(&["1"]), infer_record(&["2.5"])]).unwrap();
        assert_eq!(g.column_kinds(), &[Some(ColumnKind::Float)]);
        g.set_column_kinds(&[ColumnKind::Integer]).unwrap_err();
        g.set_column_kinds(&[ColumnKind::Float]).unwrap();
        assert!(g.add_rows(vec![vec![Value::from("n/a")]]).is_err());
    }

    #[test]
    fn whole_floats_filter_by_their_shown_text() {
        let mut g = Grid::new(20, 5, ["who", "kg"]).unwrap();
        g.add_rows(vec![infer_record(&["Bob", "72.0"]), infer_record(&["Ann", "72.5"])])
            .unwrap();
        g.set_filter(1, "72.0").unwrap();
        assert_eq!(names(&g), vec!["Bob"]);
        g.cursor_right();
        assert_eq!(g.selected().map(|v| v.to_string()), Some("72.0".to_string()));
    }

    #[test]
    fn configuration_is_validated() {
        assert_eq!(Grid::new(10, 5, Vec::<String>::new()).unwrap_err(), LayoutError::EmptyHeaders);
        let mut g = people();
        assert_eq!(
            g.set_ratios(&[1]).unwrap_err(),
            LayoutError::SpecCount { what: "ratios", expected: 2, found: 1 }
        );
        assert_eq!(g.set_ratios(&[1, 0]).unwrap_err(), LayoutError::ZeroRatio { index: 1 });
        assert_eq!(
            g.toggle_sort(2).unwrap_err(),
            LayoutError::ColumnOutOfRange { column: 2, columns: 2 }
        );
        assert!(g.set_filter(5, "x").is_err());
        assert_eq!(g.sort(), SortState::default());
    }

    #[test]
    fn column_widths_respect_minimums() {
        let mut g = people();
        g.set_ratios(&[1, 10]).unwrap();
        g.set_min_widths(&[8, 0]).unwrap();
        assert_eq!(g.column_widths(), vec![8, 22]);
        g.resize(11, 6);
        assert_eq!(g.column_widths(), vec![8, 3]);
    }

    #[test]
    fn typing_builds_a_filter_on_the_cursor_column() {
        let mut g = people();
        g.push_filter_char('A');
        g.push_filter_char('l');
        assert_eq!(names(&g), vec!["Al"]);
        g.pop_filter_char();
        assert_eq!(names(&g), vec!["Ann", "Al"]);
        g.cursor_right();
        g.push_filter_char('2');
        assert_eq!(g.filter(), Some(&Filter { column: 1, text: "2".to_string() }));
        assert_eq!(names(&g), vec!["Bob"]);
        g.pop_filter_char();
        assert!(g.filter().is_none());
        assert_eq!(g.visible_len(), 3);
    }
}
