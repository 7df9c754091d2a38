use tracing::warn;

use crate::allocate::{allocate, reserved, SizeSpec};
use crate::flexbox::cell::Cell;
use crate::text::{align_line, join_horizontal, Align};

/// Horizontal run of cells sharing one height.
#[derive(Debug, Default)]
pub struct Row {
    cells: Vec<Cell>,
    ratio: Option<usize>,
    fixed_height: Option<usize>,
}

impl Row {
    pub fn new() -> Self {
        Row::default()
    }

    /// Explicit height ratio against sibling rows.
    pub fn with_ratio(mut self, ratio: usize) -> Self {
        self.ratio = Some(ratio.max(1));
        self
    }

    pub fn with_fixed_height(mut self, height: usize) -> Self {
        self.fixed_height = Some(height);
        self
    }

    pub fn with_cells(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.add_cells(cells);
        self
    }

    pub fn set_fixed_height(&mut self, height: Option<usize>) {
        self.fixed_height = height;
    }

    pub fn add_cell(&mut self, cell: Cell) -> &mut Self {
        self.cells.push(cell);
        self
    }

    pub fn add_cells(&mut self, cells: impl IntoIterator<Item = Cell>) -> &mut Self {
        self.cells.extend(cells);
        self
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Height rule for the whole row. Unless set on the row, the ratio is the
    /// largest `ratio_y` of its cells and the fixed height the largest fixed
    /// cell height.
    pub fn vertical(&self) -> SizeSpec {
        let ratio = self.ratio.unwrap_or_else(|| {
            self.cells
                .iter()
                .map(|c| c.vertical().ratio)
                .max()
                .unwrap_or(1)
        });
        let fixed = self
            .fixed_height
            .or_else(|| self.cells.iter().filter_map(|c| c.vertical().fixed).max());
        SizeSpec::ratio(ratio).with_fixed(fixed)
    }

    pub fn horizontal_specs(&self) -> Vec<SizeSpec> {
        self.cells.iter().map(Cell::horizontal).collect()
    }

    pub fn widths(&self, width: usize) -> Vec<usize> {
        allocate(width, &self.horizontal_specs())
    }

    /// Render into exactly `height` lines, each at least `width` wide.
    pub fn render(&self, width: usize, height: usize, align: Align, fill: char) -> Vec<String> {
        if height == 0 {
            return Vec::new();
        }
        let specs = self.horizontal_specs();
        let wanted = reserved(&specs);
        if wanted > width {
            warn!(width, wanted, "fixed cell widths overflow row");
        }
        let blocks: Vec<String> = self
            .cells
            .iter()
            .zip(allocate(width, &specs))
            .map(|(cell, w)| cell.render(w, height))
            .collect();
        join_horizontal(&blocks, height)
            .iter()
            .map(|line| align_line(line, width, align, fill))
            .collect()
    }
}
