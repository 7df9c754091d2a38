//! Cursor, sort and filter state of a grid, and the visible record view they
//! produce together.

use crate::grid::value::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    /// Pull the cursor back inside `rows` x `cols`. With no rows it parks on
    /// row 0.
    pub fn clamp(&mut self, rows: usize, cols: usize) {
        self.row = self.row.min(rows.saturating_sub(1));
        self.col = self.col.min(cols.saturating_sub(1));
    }

    /// Move one step; stepping past an edge leaves the cursor where it is.
    pub fn step(&mut self, direction: Direction, rows: usize, cols: usize) {
        match direction {
            Direction::Up => self.row = self.row.saturating_sub(1),
            Direction::Down if self.row + 1 < rows => self.row += 1,
            Direction::Left => self.col = self.col.saturating_sub(1),
            Direction::Right if self.col + 1 < cols => self.col += 1,
            _ => {}
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    None,
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<usize>,
    pub order: SortOrder,
}

impl SortState {
    /// Sort state after toggling `column`: a new column starts ascending,
    /// the active one flips.
    pub fn toggled(self, column: usize) -> SortState {
        let order = match (self.column == Some(column), self.order) {
            (true, SortOrder::Ascending) => SortOrder::Descending,
            _ => SortOrder::Ascending,
        };
        SortState {
            column: Some(column),
            order,
        }
    }
}

/// Case-sensitive substring filter on one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub column: usize,
    pub text: String,
}

impl Filter {
    pub fn matches(&self, record: &[Value]) -> bool {
        record
            .get(self.column)
            .is_some_and(|v| v.to_string().contains(&self.text))
    }
}

/// Stable sort of `order` by `sort`; ties keep their place in `order`.
pub fn sort_indices(records: &[Vec<Value>], order: &mut [usize], sort: SortState) {
    let Some(col) = sort.column else {
        return;
    };
    match sort.order {
        SortOrder::Ascending => order.sort_by(|&a, &b| records[a][col].compare(&records[b][col])),
        SortOrder::Descending => order.sort_by(|&a, &b| records[b][col].compare(&records[a][col])),
        SortOrder::None => {}
    }
}

/// Indices into `records` in display order. `base` holds every record in
/// the order sorting starts from; it is filtered first, then stably sorted
/// so equal keys keep their place in `base`.
pub fn visible_indices(
    records: &[Vec<Value>],
    base: &[usize],
    filter: Option<&Filter>,
    sort: SortState,
) -> Vec<usize> {
    let mut view: Vec<usize> = base
        .iter()
        .copied()
        .filter(|&i| filter.map_or(true, |f| f.matches(&records[i])))
        .collect();
    sort_indices(records, &mut view, sort);
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Vec<Value>> {
        vec![
            vec![Value::from("Ann"), Value::Int(30)],
            vec![Value::from("Bob"), Value::Int(25)],
            vec![Value::from("Al"), Value::Int(40)],
            vec![Value::from("Cy"), Value::Int(30)],
        ]
    }

    #[test]
    fn toggle_starts_ascending_then_flips() {
        let s = SortState::default().toggled(1);
        assert_eq!(s, SortState { column: Some(1), order: SortOrder::Ascending });
        let s = s.toggled(1);
        assert_eq!(s.order, SortOrder::Descending);
        let s = s.toggled(1);
        assert_eq!(s.order, SortOrder::Ascending);
        let s = s.toggled(0);
        assert_eq!(s, SortState { column: Some(0), order: SortOrder::Ascending });
    }

    fn storage(recs: &[Vec<Value>]) -> Vec<usize> {
        (0..recs.len()).collect()
    }

    #[test]
    fn sort_is_stable_both_ways() {
        let recs = records();
        let base = storage(&recs);
        let asc = SortState { column: Some(1), order: SortOrder::Ascending };
        assert_eq!(visible_indices(&recs, &base, None, asc), vec![1, 0, 3, 2]);
        let desc = SortState { column: Some(1), order: SortOrder::Descending };
        // Ann and Cy tie on 30 and keep storage order
        assert_eq!(visible_indices(&recs, &base, None, desc), vec![2, 0, 3, 1]);
    }

    #[test]
    fn ties_keep_their_place_in_base() {
        let recs = records();
        // base ordered by name descending: Cy, Bob, Ann, Al
        let base = vec![3, 1, 0, 2];
        let asc = SortState { column: Some(1), order: SortOrder::Ascending };
        assert_eq!(visible_indices(&recs, &base, None, asc), vec![1, 3, 0, 2]);
        let mut order = base.clone();
        sort_indices(&recs, &mut order, SortState::default());
        assert_eq!(order, base);
    }

    #[test]
    fn filter_is_case_sensitive_substring() {
        let recs = records();
        let f = Filter { column: 0, text: "A".to_string() };
        assert_eq!(visible_indices(&recs, &storage(&recs), Some(&f), SortState::default()), vec![0, 2]);
        let f = Filter { column: 0, text: "a".to_string() };
        assert!(visible_indices(&recs, &storage(&recs), Some(&f), SortState::default()).is_empty());
        let f = Filter { column: 1, text: "0".to_string() };
        assert_eq!(visible_indices(&recs, &storage(&recs), Some(&f), SortState::default()), vec![0, 2, 3]);
    }

    #[test]
    fn cursor_stops_at_edges() {
        let mut c = Cursor::default();
        c.step(Direction::Up, 3, 2);
        c.step(Direction::Left, 3, 2);
        assert_eq!(c, Cursor { row: 0, col: 0 });
        for _ in 0..5 {
            c.step(Direction::Down, 3, 2);
            c.step(Direction::Right, 3, 2);
        }
        assert_eq!(c, Cursor { row: 2, col: 1 });
        c.clamp(1, 2);
        assert_eq!(c.row, 0);
        c.clamp(0, 2);
        assert_eq!(c.row, 0);
    }
}
