//! Nested box layout.
//!
//! A [`FlexBox`] stacks [`Row`]s vertically, each row lays out its [`Cell`]s
//! horizontally, and every cell asks its [`ContentProvider`] for the text of
//! its interior. A provider may build and render another `FlexBox` at the
//! size it was given, which is how layouts nest.

pub mod cell;
pub mod content;
pub mod row;

use std::cell::RefCell;

use tracing::{debug, warn};

use crate::allocate::{allocate, reserved, SizeSpec};

pub use cell::Cell;
pub use content::{ContentProvider, StaticContent};
pub use row::Row;

pub use crate::text::Align;

/// Rows of cells laid out inside a `width` x `height` character region.
///
/// The rendered string is cached until the box is mutated. Providers whose
/// output depends on outside state need [`FlexBox::force_recalculate`].
#[derive(Debug)]
pub struct FlexBox {
    width: usize,
    height: usize,
    rows: Vec<Row>,
    align: Align,
    fill: char,
    rendered: RefCell<Option<String>>,
}

impl FlexBox {
    pub fn new(width: usize, height: usize) -> Self {
        FlexBox {
            width,
            height,
            rows: Vec::new(),
            align: Align::Left,
            fill: ' ',
            rendered: RefCell::new(None),
        }
    }

    fn invalidate(&mut self) {
        *self.rendered.get_mut() = None;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn set_width(&mut self, width: usize) -> &mut Self {
        self.width = width;
        self.invalidate();
        self
    }

    pub fn set_height(&mut self, height: usize) -> &mut Self {
        self.height = height;
        self.invalidate();
        self
    }

    pub fn resize(&mut self, width: usize, height: usize) -> &mut Self {
        self.width = width;
        self.height = height;
        self.invalidate();
        self
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn set_align(&mut self, align: Align) -> &mut Self {
        self.align = align;
        self.invalidate();
        self
    }

    /// Character used to pad rows narrower than the box.
    pub fn set_fill(&mut self, fill: char) -> &mut Self {
        self.fill = fill;
        self.invalidate();
        self
    }

    /// Append an empty row and hand it back for filling.
    pub fn new_row(&mut self) -> &mut Row {
        self.invalidate();
        self.rows.push(Row::new());
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    pub fn add_row(&mut self, row: Row) -> &mut Self {
        self.rows.push(row);
        self.invalidate();
        self
    }

    pub fn add_rows(&mut self, rows: impl IntoIterator<Item = Row>) -> &mut Self {
        self.rows.extend(rows);
        self.invalidate();
        self
    }

    /// Replace every row at once, keeping size, alignment and fill.
    pub fn set_rows(&mut self, rows: Vec<Row>) -> &mut Self {
        self.rows = rows;
        self.invalidate();
        self
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.invalidate();
        self.rows.get_mut(index)
    }

    pub fn rows_len(&self) -> usize {
        self.rows.len()
    }

    pub fn cell_by_id(&self, id: &str) -> Option<&Cell> {
        self.rows
            .iter()
            .flat_map(|r| r.cells().iter())
            .find(|c| c.id() == Some(id))
    }

    pub fn cell_by_id_mut(&mut self, id: &str) -> Option<&mut Cell> {
        self.invalidate();
        self.rows
            .iter_mut()
            .flat_map(|r| r.cells_mut().iter_mut())
            .find(|c| c.id() == Some(id))
    }

    /// Drop the cached output so the next render calls every provider again.
    pub fn force_recalculate(&mut self) {
        self.invalidate();
    }

    fn row_specs(&self) -> Vec<SizeSpec> {
        self.rows.iter().map(Row::vertical).collect()
    }

    /// Computed sizes: per row its height and the widths of its cells.
    pub fn layout(&self) -> Vec<(usize, Vec<usize>)> {
        allocate(self.height, &self.row_specs())
            .into_iter()
            .zip(self.rows.iter())
            .map(|(h, row)| (h, row.widths(self.width)))
            .collect()
    }

    /// How far fixed sizes reach past the box as (columns, lines).
    pub fn overflow(&self) -> (usize, usize) {
        let columns = self
            .rows
            .iter()
            .map(|r| reserved(&r.horizontal_specs()).saturating_sub(self.width))
            .max()
            .unwrap_or(0);
        let lines = reserved(&self.row_specs()).saturating_sub(self.height);
        (columns, lines)
    }

    pub fn render(&self) -> String {
        if let Some(cached) = self.rendered.borrow().as_ref() {
            return cached.clone();
        }
        let out = self.render_uncached();
        *self.rendered.borrow_mut() = Some(out.clone());
        out
    }

    fn render_uncached(&self) -> String {
        let specs = self.row_specs();
        let wanted = reserved(&specs);
        if wanted > self.height {
            warn!(height = self.height, wanted, "fixed row heights overflow box");
        }
        let heights = allocate(self.height, &specs);
        debug!(
            width = self.width,
            height = self.height,
            rows = self.rows.len(),
            "flex box layout recomputed"
        );
        let mut lines: Vec<String> = Vec::with_capacity(self.height);
        for (row, h) in self.rows.iter().zip(heights) {
            lines.extend(row.render(self.width, h, self.align, self.fill));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoration::{BorderKind, StyleDecoration};
    use regex::Regex;
    use std::rc::Rc;

    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

    fn size_label(w: usize, h: usize) -> String {
        format!("{w}x{h}")
    }

    #[test]
    fn rows_split_height_and_fill_width() {
        let mut fb = FlexBox::new(20, 9);
        fb.new_row().add_cell(Cell::new(1, 1).with_provider(size_label));
        fb.new_row()
            .add_cells([Cell::new(1, 2).with_provider(size_label), Cell::new(3, 2).with_provider(size_label)]);
        let out = fb.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines.iter().all(|l| l.chars().count() == 20));
        // ratios 1:2 over 9 lines
        assert!(lines[0].starts_with("20x3"));
        assert!(lines[3].starts_with("5x6"));
        assert_eq!(&lines[3][5..8], "15x");
    }

    #[test]
    fn fixed_rows_take_their_height_first() {
        let mut fb = FlexBox::new(10, 10);
        fb.add_rows([
            Row::new().with_fixed_height(3).with_cells([Cell::new(1, 1)]),
            Row::new().with_cells([Cell::new(1, 1)]),
            Row::new().with_fixed_height(3).with_cells([Cell::new(1, 1)]),
        ]);
        let heights: Vec<usize> = fb.layout().into_iter().map(|(h, _)| h).collect();
        assert_eq!(heights, vec![3, 4, 3]);
        assert_eq!(fb.overflow(), (0, 0));
    }

    #[test]
    fn overflow_is_reported_not_clamped() {
        let mut fb = FlexBox::new(10, 4);
        fb.add_row(Row::new().with_fixed_height(6).with_cells([Cell::new(1, 1).with_fixed_width(14)]));
        assert_eq!(fb.overflow(), (4, 2));
        let out = fb.render();
        assert_eq!(out.lines().count(), 6);
        assert!(out.lines().all(|l| l.chars().count() == 14));
    }

    #[test]
    fn center_alignment_pads_both_sides() {
        let mut fb = FlexBox::new(11, 1);
        fb.set_align(Align::Center).set_fill('.');
        fb.new_row()
            .add_cell(Cell::new(1, 1).with_fixed_width(4).with_content("abcd"));
        assert_eq!(fb.render(), "...abcd....");
    }

    #[test]
    fn render_is_idempotent_and_cached() {
        let calls = Rc::new(std::cell::Cell::new(0usize));
        let counter = Rc::clone(&calls);
        let mut fb = FlexBox::new(6, 2);
        fb.new_row().add_cell(Cell::new(1, 1).with_provider(move |w: usize, h: usize| {
            counter.set(counter.get() + 1);
            size_label(w, h)
        }));
        let first = fb.render();
        assert_eq!(first, fb.render());
        assert_eq!(calls.get(), 1);
        fb.force_recalculate();
        assert_eq!(first, fb.render());
        assert_eq!(calls.get(), 2);
        fb.resize(8, 2);
        assert_ne!(first, fb.render());
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn set_rows_rebuilds_in_place() {
        let mut fb = FlexBox::new(4, 1);
        fb.new_row().add_cell(Cell::new(1, 1).with_content("old"));
        assert_eq!(fb.render(), "old ");
        fb.set_rows(vec![Row::new().with_cells([Cell::new(1, 1).with_content("new")])]);
        assert_eq!(fb.rows_len(), 1);
        assert_eq!(fb.render(), "new ");
    }

    #[test]
    fn cells_are_found_by_id() {
        let mut fb = FlexBox::new(20, 1);
        fb.new_row().add_cells([
            Cell::new(1, 1).with_id("info").with_content("a"),
            Cell::new(1, 1).with_id("selected").with_content("b"),
        ]);
        assert!(fb.cell_by_id("info").is_some());
        assert!(fb.cell_by_id("missing").is_none());
        let before = fb.render();
        if let Some(cell) = fb.cell_by_id_mut("selected") {
            cell.set_content("picked");
        }
        assert_ne!(before, fb.render());
        assert!(fb.render().contains("picked"));
    }

    fn nested(width: usize, height: usize, depth: &Rc<std::cell::Cell<usize>>, level: usize) -> String {
        if depth.get() < level {
            depth.set(level);
        }
        if width < 4 || height < 4 {
            return format!("{level}");
        }
        let mut fb = FlexBox::new(width, height);
        let inner = Rc::clone(depth);
        fb.new_row().add_cell(
            Cell::new(1, 1)
                .with_decoration(StyleDecoration::bordered(BorderKind::Rounded))
                .with_provider(move |w: usize, h: usize| nested(w, h, &inner, level + 1)),
        );
        fb.render()
    }

    #[test]
    fn nested_boxes_terminate_and_fill_the_space() {
        let depth = Rc::new(std::cell::Cell::new(0));
        let out = strip_ansi(&nested(10, 10, &depth, 0));
        // 10 -> 8 -> 6 -> 4 -> 2, stop below 4x4
        assert_eq!(depth.get(), 4);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.chars().count() == 10), "{out}");
        assert!(lines[4].contains('4'));
    }

    #[test]
    fn zero_height_renders_empty() {
        let mut fb = FlexBox::new(10, 0);
        fb.new_row().add_cell(Cell::new(1, 1).with_content("x"));
        assert_eq!(fb.render(), "");
    }
}
