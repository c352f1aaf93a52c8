//! Joining aligned blocks along the main axis.

use crate::block::RenderedBlock;
use crate::cells::{cell_len, pad_right, repeat_to_width};

use super::{Direction, Divider, GapPlan};

/// Join cross-aligned blocks according to `plan`.
///
/// Rows are joined line by line, top aligned; columns are stacked. A
/// divider, when given and when there is more than one block, sits in the
/// middle of each gap (extra blank after it) and spans the full cross axis.
/// A single block with no edge padding comes back untouched.
///
/// `plan` is expected to come from [`distribute`](super::distribute) over the
/// same blocks, i.e. one gap per adjacent pair.
#[must_use]
pub fn compose(
    blocks: &[RenderedBlock],
    plan: &GapPlan,
    direction: Direction,
    divider: Option<&Divider>,
) -> RenderedBlock {
    match blocks {
        [] => RenderedBlock::empty(),
        [only] if plan.leading_pad == 0 && plan.trailing_pad == 0 => only.clone(),
        _ => {
            let divider = divider.filter(|_| blocks.len() > 1);
            match direction {
                Direction::Row => compose_row(blocks, plan, divider),
                Direction::Column => compose_column(blocks, plan, divider),
            }
        }
    }
}

fn compose_row(blocks: &[RenderedBlock], plan: &GapPlan, divider: Option<&Divider>) -> RenderedBlock {
    let divider_cell = divider.map(|d| {
        let thickness = cell_len(&d.glyph).max(1);
        (d.paint.apply(&repeat_to_width(&d.glyph, thickness)), thickness)
    });
    let divider_width = divider_cell.as_ref().map_or(0, |(_, w)| *w);

    let separators: Vec<String> = plan
        .gaps
        .iter()
        .map(|&gap| match &divider_cell {
            Some((cell, _)) => {
                let before = gap / 2;
                format!("{}{cell}{}", " ".repeat(before), " ".repeat(gap - before))
            }
            None => " ".repeat(gap),
        })
        .collect();

    let width = plan.total()
        + blocks.iter().map(RenderedBlock::width).sum::<usize>()
        + divider_width * plan.gaps.len();
    if width == 0 {
        return RenderedBlock::empty();
    }
    // Children with no lines still occupy one line once there is padding.
    let height = blocks.iter().map(RenderedBlock::height).max().unwrap_or(0).max(1);
    let leading = " ".repeat(plan.leading_pad);
    let trailing = " ".repeat(plan.trailing_pad);

    let lines = (0..height)
        .map(|row| {
            let mut line = leading.clone();
            for (i, block) in blocks.iter().enumerate() {
                let text = block.lines().get(row).map_or("", String::as_str);
                line.push_str(&pad_right(text, block.width()));
                if let Some(separator) = separators.get(i) {
                    line.push_str(separator);
                }
            }
            line.push_str(&trailing);
            line
        })
        .collect();

    RenderedBlock::from_measured(lines, width)
}

fn compose_column(
    blocks: &[RenderedBlock],
    plan: &GapPlan,
    divider: Option<&Divider>,
) -> RenderedBlock {
    let width = blocks.iter().map(RenderedBlock::width).max().unwrap_or(0);
    let blank = " ".repeat(width);
    let divider_line = divider.map(|d| d.paint.apply(&repeat_to_width(&d.glyph, width)));

    let height = plan.total()
        + blocks.iter().map(RenderedBlock::height).sum::<usize>()
        + usize::from(divider_line.is_some()) * plan.gaps.len();
    let mut lines = Vec::with_capacity(height);

    lines.extend(std::iter::repeat_n(blank.clone(), plan.leading_pad));
    for (i, block) in blocks.iter().enumerate() {
        lines.extend(block.lines().iter().map(|line| pad_right(line, width)));
        if let Some(&gap) = plan.gaps.get(i) {
            match &divider_line {
                Some(rule) => {
                    let before = gap / 2;
                    lines.extend(std::iter::repeat_n(blank.clone(), before));
                    lines.push(rule.clone());
                    lines.extend(std::iter::repeat_n(blank.clone(), gap - before));
                }
                None => lines.extend(std::iter::repeat_n(blank.clone(), gap)),
            }
        }
    }
    lines.extend(std::iter::repeat_n(blank, plan.trailing_pad));

    RenderedBlock::from_measured(lines, width)
}
