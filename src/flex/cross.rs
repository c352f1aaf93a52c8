//! Cross-axis alignment.

use crate::block::RenderedBlock;
use crate::cells::pad_right;

use super::{Align, Direction, Paint};

/// Pad `block` along the cross axis of `direction` up to `target` cells.
///
/// For a row the cross axis is the height, so blank lines (as wide as the
/// block) are added; for a column it is the width, so every line is padded.
/// A block already at or beyond `target` is returned unchanged, and the
/// main-axis size is never altered. `Stretch` fills with `fill`-painted
/// blanks instead of plain padding.
#[must_use]
pub fn align_cross(
    block: &RenderedBlock,
    target: usize,
    align: Align,
    direction: Direction,
    fill: &Paint,
) -> RenderedBlock {
    let natural = direction.cross_size(block);
    if natural >= target || block.is_empty() {
        return block.clone();
    }
    let diff = target - natural;

    match direction {
        Direction::Row => align_height(block, diff, align, fill),
        Direction::Column => align_width(block, target, diff, align, fill),
    }
}

fn align_height(block: &RenderedBlock, diff: usize, align: Align, fill: &Paint) -> RenderedBlock {
    let width = block.width();
    let blank = " ".repeat(width);
    let (top, bottom, bottom_line) = match align {
        Align::Start => (0, diff, blank.clone()),
        Align::End => (diff, 0, blank.clone()),
        Align::Center => (diff / 2, diff - diff / 2, blank.clone()),
        Align::Stretch => (0, diff, fill.apply(&blank)),
    };

    let mut lines = Vec::with_capacity(block.height() + diff);
    lines.extend(std::iter::repeat_n(blank, top));
    lines.extend(block.lines().iter().cloned());
    lines.extend(std::iter::repeat_n(bottom_line, bottom));
    RenderedBlock::from_measured(lines, width)
}

fn align_width(
    block: &RenderedBlock,
    target: usize,
    diff: usize,
    align: Align,
    fill: &Paint,
) -> RenderedBlock {
    let width = block.width();
    let lines = block
        .lines()
        .iter()
        .map(|line| match align {
            Align::Start => pad_right(line, target),
            Align::End => format!("{}{}", " ".repeat(diff), pad_right(line, width)),
            Align::Center => {
                let left = diff / 2;
                let right = diff - left;
                format!(
                    "{}{}{}",
                    " ".repeat(left),
                    pad_right(line, width),
                    " ".repeat(right)
                )
            }
            Align::Stretch => {
                format!("{}{}", pad_right(line, width), fill.apply(&" ".repeat(diff)))
            }
        })
        .collect();
    RenderedBlock::from_measured(lines, target)
}
