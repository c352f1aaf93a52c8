//! Measurement of rendered text blocks.
//!
//! A block of already-rendered text is treated as an opaque rectangle: its
//! width is the widest line in terminal cells and its height is the number of
//! lines.

use crate::cells::cell_len;

/// Width and height of a block, in cells and lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    /// Widest line, in terminal cells.
    pub width: usize,
    /// Number of lines.
    pub height: usize,
}

impl Dimensions {
    /// Create new dimensions.
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// A block with no lines.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }
}

/// Measure a rendered text blob.
///
/// The height is one more than the number of `\n` separators, except for the
/// empty string which has no lines at all. The width is the maximum cell
/// width across lines.
///
/// ```
/// use flexstack::measure::{measure, Dimensions};
///
/// assert_eq!(measure("│││"), Dimensions::new(3, 1));
/// assert_eq!(measure("ab\nc"), Dimensions::new(2, 2));
/// assert_eq!(measure(""), Dimensions::zero());
/// ```
#[must_use]
pub fn measure(text: &str) -> Dimensions {
    if text.is_empty() {
        return Dimensions::zero();
    }
    text.split('\n')
        .fold(Dimensions::zero(), |dims, line| Dimensions {
            width: dims.width.max(cell_len(line)),
            height: dims.height + 1,
        })
}

/// Width of the widest line.
#[must_use]
pub fn max_line_width<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .map(|line| cell_len(line.as_ref()))
        .max()
        .unwrap_or(0)
}
