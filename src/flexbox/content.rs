use crate::text::normalize_block;

/// Produces the interior text of a cell for the size it was given.
///
/// The returned text should fit `width` x `height`; shorter output is padded,
/// longer output is left as is and shows up as misalignment.
pub trait ContentProvider {
    fn render(&self, width: usize, height: usize) -> String;
}

impl<F> ContentProvider for F
where
    F: Fn(usize, usize) -> String,
{
    fn render(&self, width: usize, height: usize) -> String {
        self(width, height)
    }
}

/// Fixed text, clipped to whatever size the cell ends up with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticContent(pub String);

impl ContentProvider for StaticContent {
    fn render(&self, width: usize, height: usize) -> String {
        normalize_block(&self.0, width, height)
    }
}
