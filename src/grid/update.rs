use crate::error::Result;
use crate::grid::state::Direction;
use crate::grid::value::Value;
use crate::grid::Grid;

/// Host events a grid reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum GridMsg {
    Resize { width: usize, height: usize },
    CursorMove(Direction),
    ToggleSort(usize),
    SetFilter { column: usize, text: String },
    ClearFilter,
    ReplaceRows(Vec<Vec<Value>>),
}

impl Grid {
    pub fn update(&mut self, msg: GridMsg) -> Result<()> {
        handle_update(self, msg)
    }
}

pub fn handle_update(g: &mut Grid, msg: GridMsg) -> Result<()> {
    match msg {
        GridMsg::Resize { width, height } => g.resize(width, height),
        GridMsg::CursorMove(direction) => g.move_cursor(direction),
        GridMsg::ToggleSort(column) => g.toggle_sort(column)?,
        GridMsg::SetFilter { column, text } => g.set_filter(column, text)?,
        GridMsg::ClearFilter => g.clear_filter(),
        GridMsg::ReplaceRows(rows) => g.replace_rows(rows)?,
    }
    Ok(())
}
