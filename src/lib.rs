//! stickers - flexbox layout and data grid for terminal UIs
//!
//! Library crate exposing the sizing allocator, the nested box layout and
//! the grid. The demo binary wires them into a bubbletea program.
//!
//! Tests live close to the modules they exercise as unit tests; property
//! tests are under `tests/`.

pub mod allocate;
pub mod config;
pub mod decoration;
pub mod error;
pub mod flexbox;
pub mod grid;
pub mod text;

pub use allocate::{allocate, allocate_with_minimums, SizeSpec};
pub use config::Theme;
pub use decoration::{BorderKind, Decoration, StyleDecoration};
pub use error::{LayoutError, Result};
pub use flexbox::{Align, Cell, ContentProvider, FlexBox, Row, StaticContent};
pub use grid::{ColumnKind, Direction, Grid, GridMsg, Value};
