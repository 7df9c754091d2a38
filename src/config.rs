//! Colours and glyphs used when painting grids and decorated cells.
//!
//! A `Theme` is an explicit value handed to whatever renders with it; the
//! library keeps no process-wide style tables.

use lipgloss::{Color, Style};
use serde::Deserialize;

use crate::decoration::{BorderKind, StyleDecoration};
use crate::error::{LayoutError, Result};

pub type Rgb = [u8; 3];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub header_fg: Rgb,
    pub header_bg: Rgb,
    pub cursor_fg: Rgb,
    pub cursor_bg: Rgb,
    pub row_fg: Rgb,
    pub border: Rgb,
    pub sort_ascending: String,
    pub sort_descending: String,
    pub filter_marker: String,
    /// Colours cycled through by demo cells and nested boxes.
    pub palette: Vec<Rgb>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header_fg: [255, 255, 255],
            header_bg: [95, 95, 95],
            cursor_fg: [0, 0, 0],
            cursor_bg: [0, 238, 238],
            row_fg: [200, 200, 200],
            border: [238, 0, 238],
            sort_ascending: "▲".to_string(),
            sort_descending: "▼".to_string(),
            filter_marker: "⌕".to_string(),
            palette: vec![
                [255, 107, 129],
                [255, 177, 66],
                [38, 222, 129],
                [69, 170, 242],
                [165, 94, 234],
            ],
        }
    }
}

impl Theme {
    /// Parse a theme from JSON. Missing fields keep their default.
    pub fn from_json(text: &str) -> Result<Theme> {
        serde_json::from_str(text).map_err(|e| LayoutError::Theme(e.to_string()))
    }

    pub fn color(rgb: Rgb) -> Color {
        Color::from_rgb(rgb[0], rgb[1], rgb[2])
    }

    pub fn header_style(&self) -> Style {
        Style::new()
            .foreground(Theme::color(self.header_fg))
            .background(Theme::color(self.header_bg))
            .bold(true)
    }

    pub fn cursor_style(&self) -> Style {
        Style::new()
            .foreground(Theme::color(self.cursor_fg))
            .background(Theme::color(self.cursor_bg))
            .bold(true)
    }

    pub fn row_style(&self) -> Style {
        Style::new().foreground(Theme::color(self.row_fg))
    }

    /// Palette entry `index`, wrapping around. An empty palette falls back to
    /// the border colour.
    pub fn palette_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return Theme::color(self.border);
        }
        Theme::color(self.palette[index % self.palette.len()])
    }

    pub fn border_decoration(&self, kind: BorderKind) -> StyleDecoration {
        StyleDecoration::bordered_with(kind, Theme::color(self.border))
    }

    pub fn palette_decoration(&self, kind: BorderKind, index: usize) -> StyleDecoration {
        StyleDecoration::bordered_with(kind, self.palette_color(index))
    }
}
