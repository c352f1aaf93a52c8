//! Rendered blocks: the unit the layout engine arranges.

use std::fmt;

use crate::measure::{Dimensions, max_line_width};

/// An immutable, measured piece of rendered text.
///
/// Lines never contain `\n`. The width is the widest line in cells; lines
/// narrower than that are padded when the block is joined with others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RenderedBlock {
    lines: Vec<String>,
    width: usize,
}

impl RenderedBlock {
    /// Split a rendered string on `\n` into a block.
    ///
    /// The empty string produces a block with no lines.
    #[must_use]
    pub fn new(text: &str) -> Self {
        if text.is_empty() {
            return Self::empty();
        }
        Self::from_lines(text.split('\n').map(str::to_string).collect())
    }

    /// Build a block from lines that contain no `\n`.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        debug_assert!(lines.iter().all(|line| !line.contains('\n')));
        let width = max_line_width(&lines);
        Self { lines, width }
    }

    /// Build a block with a known width, skipping the measuring pass.
    pub(crate) fn from_measured(lines: Vec<String>, width: usize) -> Self {
        debug_assert_eq!(width, max_line_width(&lines));
        Self { lines, width }
    }

    /// A block with no lines.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            lines: Vec::new(),
            width: 0,
        }
    }

    /// A `width` x `height` block of spaces.
    #[must_use]
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            lines: vec![" ".repeat(width); height],
            width: if height == 0 { 0 } else { width },
        }
    }

    /// The lines of this block.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the block, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Widest line, in terminal cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of lines.
    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Width and height together.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height())
    }

    /// True if the block has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined with `\n`, no trailing newline.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for RenderedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for RenderedBlock {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for RenderedBlock {
    fn from(text: String) -> Self {
        Self::new(&text)
    }
}
