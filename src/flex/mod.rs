//! Flexbox-style layout of rendered blocks.
//!
//! A layout runs as a single pass over already-rendered children:
//!
//! 1. every child is measured ([`RenderedBlock`] carries its width/height)
//! 2. each block is padded to the shared cross size ([`align_cross`])
//! 3. leftover main-axis space is split into gaps and edge padding
//!    ([`distribute`])
//! 4. the blocks are joined into one block ([`compose`])
//!
//! [`Flex`], [`HStack`] and [`VStack`] are builders over [`layout`]; they only
//! differ in their defaults.
//!
//! # Example
//!
//! ```rust
//! use flexstack::prelude::*;
//!
//! let row = HStack::new()
//!     .justify(Justify::SpaceBetween)
//!     .size(20)
//!     .child("A")
//!     .child("B");
//!
//! assert_eq!(row.render_to_string(), format!("A{}B", " ".repeat(18)));
//! ```

mod compose;
mod cross;
mod distribute;
mod stack;

use std::fmt;

use crate::block::RenderedBlock;
use crate::cells::cell_len;
use crate::color::ColorSystem;
use crate::style::Style;
use crate::theme::{self, Theme};

pub use compose::compose;
pub use cross::align_cross;
pub use distribute::{GapPlan, distribute};
pub use stack::{Flex, HStack, VStack};

/// Divider glyph used between items laid out in a row.
pub const VERTICAL_DIVIDER: &str = "│";
/// Divider glyph used between items laid out in a column.
pub const HORIZONTAL_DIVIDER: &str = "─";

/// Main-axis direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Items placed left to right.
    #[default]
    Row,
    /// Items placed top to bottom.
    Column,
}

impl Direction {
    /// Parse a direction name, falling back to [`Direction::Row`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match normalize_name(name).as_str() {
            "row" | "horizontal" | "h" => Self::Row,
            "column" | "col" | "vertical" | "v" => Self::Column,
            _ => {
                log::warn!("unknown flex direction {name:?}, using row");
                Self::Row
            }
        }
    }

    /// The divider glyph that runs across this direction's cross axis.
    #[must_use]
    pub const fn default_divider(self) -> &'static str {
        match self {
            Self::Row => VERTICAL_DIVIDER,
            Self::Column => HORIZONTAL_DIVIDER,
        }
    }

    /// Size of a block along this direction's main axis.
    #[must_use]
    pub fn main_size(self, block: &RenderedBlock) -> usize {
        match self {
            Self::Row => block.width(),
            Self::Column => block.height(),
        }
    }

    /// Size of a block along this direction's cross axis.
    #[must_use]
    pub fn cross_size(self, block: &RenderedBlock) -> usize {
        match self {
            Self::Row => block.height(),
            Self::Column => block.width(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Row => "row",
            Self::Column => "column",
        })
    }
}

/// Main-axis distribution of leftover space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Justify {
    /// All leftover space after the last item.
    #[default]
    Start,
    /// Leftover split around the items, extra cell after.
    Center,
    /// All leftover space before the first item.
    End,
    /// Leftover spread between items, none at the edges.
    SpaceBetween,
    /// Half-size slots at the edges, full slots between items.
    SpaceAround,
    /// Equal slots at the edges and between items.
    SpaceEvenly,
}

impl Justify {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Start,
        Self::Center,
        Self::End,
        Self::SpaceBetween,
        Self::SpaceAround,
        Self::SpaceEvenly,
    ];

    /// Parse a justify name, falling back to [`Justify::Start`].
    ///
    /// Accepts CSS-like spellings: `space-between`, `space_between`,
    /// `SpaceBetween`, `flex-start` and so on.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match normalize_name(name).as_str() {
            "start" | "flexstart" | "left" | "top" => Self::Start,
            "center" | "centre" | "middle" => Self::Center,
            "end" | "flexend" | "right" | "bottom" => Self::End,
            "spacebetween" | "between" => Self::SpaceBetween,
            "spacearound" | "around" => Self::SpaceAround,
            "spaceevenly" | "evenly" => Self::SpaceEvenly,
            _ => {
                log::warn!("unknown justify mode {name:?}, using start");
                Self::Start
            }
        }
    }
}

impl fmt::Display for Justify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
            Self::SpaceBetween => "space-between",
            Self::SpaceAround => "space-around",
            Self::SpaceEvenly => "space-evenly",
        })
    }
}

/// Cross-axis placement of each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    /// Top of a row / left of a column.
    #[default]
    Start,
    /// Centered, extra cell after.
    Center,
    /// Bottom of a row / right of a column.
    End,
    /// Filled out to the cross size with `flex.fill` styled cells.
    Stretch,
}

impl Align {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 4] = [Self::Start, Self::Center, Self::End, Self::Stretch];

    /// Parse an align name, falling back to [`Align::Start`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match normalize_name(name).as_str() {
            "start" | "flexstart" | "left" | "top" => Self::Start,
            "center" | "centre" | "middle" => Self::Center,
            "end" | "flexend" | "right" | "bottom" => Self::End,
            "stretch" | "fill" => Self::Stretch,
            _ => {
                log::warn!("unknown align mode {name:?}, using start");
                Self::Start
            }
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
            Self::Stretch => "stretch",
        })
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Everything one layout pass needs, with children already rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutSpec {
    pub items: Vec<RenderedBlock>,
    pub direction: Direction,
    pub justify: Justify,
    pub align: Align,
    /// Explicit spacing between items (cells for rows, lines for columns).
    pub gap: usize,
    /// Fixed main-axis size; 0 means the natural size of the content.
    pub container_main_size: usize,
    pub divider: bool,
    pub divider_glyph: String,
}

impl LayoutSpec {
    /// Main-axis thickness of one divider.
    ///
    /// A row divider is as wide as its glyph (at least one cell); a column
    /// divider is always a single line.
    #[must_use]
    pub fn divider_thickness(&self) -> usize {
        if !self.divider {
            return 0;
        }
        match self.direction {
            Direction::Row => cell_len(&self.divider_glyph).max(1),
            Direction::Column => 1,
        }
    }

    /// Natural main-axis size: items, explicit gaps and dividers.
    #[must_use]
    pub fn natural_main_size(&self) -> usize {
        let slots = self.items.len().saturating_sub(1);
        self.items
            .iter()
            .map(|item| self.direction.main_size(item))
            .sum::<usize>()
            + slots * (self.gap + self.divider_thickness())
    }
}

/// Styling applied while composing.
///
/// With no color system every paint call is the identity, so layouts are
/// plain text unless a caller opts in.
#[derive(Debug, Clone, Default)]
pub struct Paint {
    style: Style,
    color_system: Option<ColorSystem>,
}

impl Paint {
    #[must_use]
    pub fn new(style: Style, color_system: Option<ColorSystem>) -> Self {
        Self {
            style,
            color_system,
        }
    }

    /// A paint that never emits escape codes.
    #[must_use]
    pub fn plain() -> Self {
        Self::new(Style::null(), None)
    }

    /// Paint one line of plain text.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        match self.color_system {
            Some(system) => self.style.render(text, system),
            None => text.to_string(),
        }
    }

    /// Paint one line that may already carry styling of its own.
    #[must_use]
    pub fn apply_over(&self, text: &str) -> String {
        match self.color_system {
            Some(system) => self.style.render_over(text, system),
            None => text.to_string(),
        }
    }

    /// True if painting changes nothing.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.color_system.is_none() || self.style.is_plain()
    }
}

/// A divider to insert between items.
#[derive(Debug, Clone)]
pub struct Divider {
    pub glyph: String,
    pub paint: Paint,
}

/// Run the full layout pipeline.
///
/// The theme supplies the `flex.divider` and `flex.fill` styles; they are
/// only emitted when `color_system` is set.
#[must_use]
pub fn layout(spec: &LayoutSpec, theme: &Theme, color_system: Option<ColorSystem>) -> RenderedBlock {
    if spec.items.is_empty() {
        log::trace!("flex layout: no items");
        return RenderedBlock::empty();
    }

    let direction = spec.direction;
    let cross = spec
        .items
        .iter()
        .map(|item| direction.cross_size(item))
        .max()
        .unwrap_or(0);

    let fill = Paint::new(theme.style(theme::FILL), color_system);
    let aligned: Vec<RenderedBlock> = spec
        .items
        .iter()
        .map(|item| align_cross(item, cross, spec.align, direction, &fill))
        .collect();

    let sizes: Vec<usize> = aligned.iter().map(|b| direction.main_size(b)).collect();
    let slots = aligned.len() - 1;
    let divider_total = slots * spec.divider_thickness();
    let available = spec.container_main_size.saturating_sub(divider_total);
    let mut plan = distribute(&sizes, available, spec.justify, spec.gap);

    // Integer division in some modes can leave a few cells unassigned; they
    // go to the trailing edge so a fixed container is always filled exactly.
    if spec.container_main_size > 0 {
        let used = plan.total() + sizes.iter().sum::<usize>() + divider_total;
        plan.trailing_pad += spec.container_main_size.saturating_sub(used);
    }

    log::trace!(
        "flex layout: direction={} justify={} align={} items={} sizes={sizes:?} cross={cross} plan={plan:?}",
        spec.direction,
        spec.justify,
        spec.align,
        aligned.len(),
    );

    let divider = (spec.divider && slots > 0).then(|| Divider {
        glyph: spec.divider_glyph.clone(),
        paint: Paint::new(theme.style(theme::DIVIDER), color_system),
    });

    compose(&aligned, &plan, direction, divider.as_ref())
}
