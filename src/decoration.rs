//! Cell decorations: the border/colour wrapping applied around a cell's
//! interior. The layout only needs to know how much space a decoration
//! takes and how to paint it; glyphs and colours stay with `lipgloss`.

use lipgloss::{double_border, normal_border, rounded_border, thick_border, Color, Style};

/// Wrapping applied around a cell's rendered interior.
pub trait Decoration {
    /// Columns and lines taken by the decoration, summed over both sides.
    fn overhead(&self) -> (usize, usize);

    fn has_border(&self) -> bool {
        self.overhead() != (0, 0)
    }

    /// Wrap an interior block that already has the interior size.
    fn paint(&self, interior: &str) -> String;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderKind {
    Normal,
    Rounded,
    Thick,
    Double,
}

impl BorderKind {
    pub const ALL: [BorderKind; 4] = [
        BorderKind::Normal,
        BorderKind::Rounded,
        BorderKind::Thick,
        BorderKind::Double,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BorderKind::Normal => "Normal Border",
            BorderKind::Rounded => "Rounded Border",
            BorderKind::Thick => "Thick Border",
            BorderKind::Double => "Double Border",
        }
    }

    fn apply(self, style: Style) -> Style {
        match self {
            BorderKind::Normal => style.border(normal_border()),
            BorderKind::Rounded => style.border(rounded_border()),
            BorderKind::Thick => style.border(thick_border()),
            BorderKind::Double => style.border(double_border()),
        }
    }
}

/// A `lipgloss` style used as a decoration, optionally with a one-cell border.
#[derive(Clone)]
pub struct StyleDecoration {
    style: Style,
    border: Option<BorderKind>,
}

impl StyleDecoration {
    /// Style without a border: colours and attributes only, no overhead.
    pub fn plain(style: Style) -> Self {
        StyleDecoration {
            style,
            border: None,
        }
    }

    pub fn bordered(kind: BorderKind) -> Self {
        StyleDecoration {
            style: kind.apply(Style::new()),
            border: Some(kind),
        }
    }

    pub fn bordered_with(kind: BorderKind, color: Color) -> Self {
        StyleDecoration {
            style: kind.apply(Style::new()).border_foreground(color),
            border: Some(kind),
        }
    }

    /// Solid background fill.
    pub fn filled(color: Color) -> Self {
        StyleDecoration::plain(Style::new().background(color))
    }

    pub fn border(&self) -> Option<BorderKind> {
        self.border
    }
}

impl Decoration for StyleDecoration {
    fn overhead(&self) -> (usize, usize) {
        match self.border {
            Some(_) => (2, 2),
            None => (0, 0),
        }
    }

    fn paint(&self, interior: &str) -> String {
        self.style.render(interior)
    }
}
