use lipgloss::Style;

use crate::allocate::SizeSpec;
use crate::decoration::{Decoration, StyleDecoration};
use crate::flexbox::content::{ContentProvider, StaticContent};
use crate::text::{blank_block, pad_block};

/// Leaf of a flex box: sizing rules for both axes, an optional decoration
/// and the provider that fills the interior.
pub struct Cell {
    id: Option<String>,
    horizontal: SizeSpec,
    vertical: SizeSpec,
    decoration: Option<Box<dyn Decoration>>,
    content: Option<Box<dyn ContentProvider>>,
}

impl Cell {
    /// `ratio_x` weighs the cell against its row siblings, `ratio_y` feeds
    /// the row's share of the box height.
    pub fn new(ratio_x: usize, ratio_y: usize) -> Self {
        Cell {
            id: None,
            horizontal: SizeSpec::ratio(ratio_x),
            vertical: SizeSpec::ratio(ratio_y),
            decoration: None,
            content: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_content(mut self, text: impl Into<String>) -> Self {
        self.set_content(text);
        self
    }

    pub fn with_provider<P: ContentProvider + 'static>(mut self, provider: P) -> Self {
        self.set_provider(provider);
        self
    }

    pub fn with_decoration<D: Decoration + 'static>(mut self, decoration: D) -> Self {
        self.set_decoration(decoration);
        self
    }

    /// Shorthand for a border-less style decoration.
    pub fn with_style(self, style: Style) -> Self {
        self.with_decoration(StyleDecoration::plain(style))
    }

    pub fn with_fixed_width(mut self, width: usize) -> Self {
        self.horizontal.fixed = Some(width);
        self
    }

    pub fn with_fixed_height(mut self, height: usize) -> Self {
        self.vertical.fixed = Some(height);
        self
    }

    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = Some(Box::new(StaticContent(text.into())));
    }

    pub fn set_provider<P: ContentProvider + 'static>(&mut self, provider: P) {
        self.content = Some(Box::new(provider));
    }

    pub fn set_decoration<D: Decoration + 'static>(&mut self, decoration: D) {
        self.decoration = Some(Box::new(decoration));
    }

    pub fn clear_decoration(&mut self) {
        self.decoration = None;
    }

    pub fn set_fixed_width(&mut self, width: Option<usize>) {
        self.horizontal.fixed = width;
    }

    pub fn set_fixed_height(&mut self, height: Option<usize>) {
        self.vertical.fixed = height;
    }

    pub fn set_ratio(&mut self, ratio_x: usize, ratio_y: usize) {
        self.horizontal = SizeSpec::ratio(ratio_x).with_fixed(self.horizontal.fixed);
        self.vertical = SizeSpec::ratio(ratio_y).with_fixed(self.vertical.fixed);
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn horizontal(&self) -> SizeSpec {
        self.horizontal
    }

    pub fn vertical(&self) -> SizeSpec {
        self.vertical
    }

    /// Space the decoration takes around the interior.
    pub fn overhead(&self) -> (usize, usize) {
        self.decoration.as_ref().map_or((0, 0), |d| d.overhead())
    }

    /// Render at the outer size `width` x `height`. Returns an empty string
    /// when nothing is left for the interior once the decoration is removed.
    pub fn render(&self, width: usize, height: usize) -> String {
        let (ow, oh) = self.overhead();
        if width <= ow || height <= oh {
            return String::new();
        }
        let (iw, ih) = (width - ow, height - oh);
        let body = match &self.content {
            Some(provider) => pad_block(&provider.render(iw, ih), iw, ih),
            None => blank_block(iw, ih),
        };
        match &self.decoration {
            Some(deco) => deco.paint(&body),
            None => body,
        }
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("id", &self.id)
            .field("horizontal", &self.horizontal)
            .field("vertical", &self.vertical)
            .field("decorated", &self.decoration.is_some())
            .field("has_content", &self.content.is_some())
            .finish()
    }
}
