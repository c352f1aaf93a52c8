//! Flex, HStack and VStack builders.

use std::fmt;

use crate::block::RenderedBlock;
use crate::color::ColorSystem;
use crate::renderable::{Item, Renderable};
use crate::style::Style;
use crate::terminal;
use crate::theme::Theme;

use super::{Align, Direction, Justify, LayoutSpec, Paint, layout};

/// A flex container.
///
/// Children are rendered every time the container is; nothing is cached.
/// Styling (dividers, stretch fill, the override style) is only emitted once
/// a color system is set with [`Flex::color_system`].
#[derive(Debug, Default)]
pub struct Flex {
    items: Vec<Item>,
    direction: Direction,
    justify: Justify,
    align: Align,
    gap: usize,
    size: usize,
    fill_terminal: bool,
    divider: bool,
    divider_glyph: Option<String>,
    theme: Theme,
    style: Option<Style>,
    color_system: Option<ColorSystem>,
}

impl Flex {
    /// Create an empty row container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty container with the given direction.
    #[must_use]
    pub fn with_direction(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Set the main-axis direction.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the main-axis distribution.
    #[must_use]
    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// Set the cross-axis alignment.
    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set the explicit spacing between items.
    #[must_use]
    pub fn gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    /// Set a fixed main-axis size (0 = natural size).
    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self.fill_terminal = false;
        self
    }

    /// Use the terminal's width (rows) or height (columns) as the main size.
    ///
    /// The terminal is queried on every render, using the direction in
    /// effect at that point. Falls back to 80x24 when it cannot be queried.
    /// A later [`Flex::size`] call replaces this.
    #[must_use]
    pub fn fill_terminal(mut self) -> Self {
        self.fill_terminal = true;
        self
    }

    fn main_size(&self) -> usize {
        if !self.fill_terminal {
            return self.size;
        }
        match self.direction {
            Direction::Row => terminal::get_terminal_width(),
            Direction::Column => terminal::get_terminal_height(),
        }
    }

    /// Show a divider between adjacent items.
    #[must_use]
    pub fn divider(mut self, divider: bool) -> Self {
        self.divider = divider;
        self
    }

    /// Override the divider glyph (enables dividers).
    ///
    /// Only the first line of a multi-line glyph is kept.
    #[must_use]
    pub fn divider_glyph(mut self, glyph: impl Into<String>) -> Self {
        let glyph = glyph.into();
        self.divider_glyph = Some(match glyph.split_once('\n') {
            Some((first, _)) => first.trim_end_matches('\r').to_string(),
            None => glyph,
        });
        self.divider = true;
        self
    }

    /// Set the theme consulted for divider and fill styles.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set an override style painted over the whole composed block.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the color system used for styling (`None` = plain text).
    #[must_use]
    pub fn color_system(mut self, color_system: Option<ColorSystem>) -> Self {
        self.color_system = color_system;
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child<R>(mut self, renderable: R) -> Self
    where
        R: Renderable + Send + Sync + 'static,
    {
        self.items.push(Item::new(renderable));
        self
    }

    /// Append a child that may be absent.
    #[must_use]
    pub fn maybe_child<R>(mut self, renderable: Option<R>) -> Self
    where
        R: Renderable + Send + Sync + 'static,
    {
        self.items.push(Item::from_option(renderable));
        self
    }

    /// Append an item.
    #[must_use]
    pub fn item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Append several children.
    #[must_use]
    pub fn children<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        self.items.extend(items.into_iter().map(Into::into));
        self
    }

    /// Append an item to an existing container.
    pub fn push(&mut self, item: impl Into<Item>) {
        self.items.push(item.into());
    }

    /// Number of items that will be laid out (absent ones excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.iter().filter(|item| item.is_present()).count()
    }

    /// True if there is nothing to lay out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the children and collect the layout parameters.
    #[must_use]
    pub fn layout_spec(&self) -> LayoutSpec {
        LayoutSpec {
            items: self.items.iter().filter_map(Item::render_block).collect(),
            direction: self.direction,
            justify: self.justify,
            align: self.align,
            gap: self.gap,
            container_main_size: self.main_size(),
            divider: self.divider,
            divider_glyph: self
                .divider_glyph
                .clone()
                .unwrap_or_else(|| self.direction.default_divider().to_string()),
        }
    }

    /// Lay out the children.
    #[must_use]
    pub fn render(&self) -> RenderedBlock {
        let block = layout(&self.layout_spec(), &self.theme, self.color_system);

        match &self.style {
            Some(style) => {
                let paint = Paint::new(style.clone(), self.color_system);
                if paint.is_plain() {
                    return block;
                }
                let lines = block
                    .lines()
                    .iter()
                    .map(|line| paint.apply_over(line))
                    .collect();
                RenderedBlock::from_measured(lines, block.width())
            }
            None => block,
        }
    }

    /// Lay out the children as `\n`-separated text.
    #[must_use]
    pub fn render_to_string(&self) -> String {
        self.render().to_text()
    }
}

impl Renderable for Flex {
    fn render_block(&self) -> RenderedBlock {
        self.render()
    }
}

impl fmt::Display for Flex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_to_string())
    }
}

macro_rules! fixed_direction_stack {
    ($(#[$meta:meta])* $name:ident, $direction:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name(Flex);

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self(Flex::with_direction($direction))
            }

            #[must_use]
            pub fn justify(self, justify: Justify) -> Self {
                Self(self.0.justify(justify))
            }

            #[must_use]
            pub fn align(self, align: Align) -> Self {
                Self(self.0.align(align))
            }

            #[must_use]
            pub fn gap(self, gap: usize) -> Self {
                Self(self.0.gap(gap))
            }

            #[must_use]
            pub fn size(self, size: usize) -> Self {
                Self(self.0.size(size))
            }

            #[must_use]
            pub fn fill_terminal(self) -> Self {
                Self(self.0.fill_terminal())
            }

            #[must_use]
            pub fn divider(self, divider: bool) -> Self {
                Self(self.0.divider(divider))
            }

            #[must_use]
            pub fn divider_glyph(self, glyph: impl Into<String>) -> Self {
                Self(self.0.divider_glyph(glyph))
            }

            #[must_use]
            pub fn theme(self, theme: Theme) -> Self {
                Self(self.0.theme(theme))
            }

            #[must_use]
            pub fn style(self, style: Style) -> Self {
                Self(self.0.style(style))
            }

            #[must_use]
            pub fn color_system(self, color_system: Option<ColorSystem>) -> Self {
                Self(self.0.color_system(color_system))
            }

            #[must_use]
            pub fn child<R>(self, renderable: R) -> Self
            where
                R: Renderable + Send + Sync + 'static,
            {
                Self(self.0.child(renderable))
            }

            #[must_use]
            pub fn maybe_child<R>(self, renderable: Option<R>) -> Self
            where
                R: Renderable + Send + Sync + 'static,
            {
                Self(self.0.maybe_child(renderable))
            }

            #[must_use]
            pub fn item(self, item: Item) -> Self {
                Self(self.0.item(item))
            }

            #[must_use]
            pub fn children<I>(self, items: I) -> Self
            where
                I: IntoIterator,
                I::Item: Into<Item>,
            {
                Self(self.0.children(items))
            }

            pub fn push(&mut self, item: impl Into<Item>) {
                self.0.push(item);
            }

            #[must_use]
            pub fn len(&self) -> usize {
                self.0.len()
            }

            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            #[must_use]
            pub fn layout_spec(&self) -> LayoutSpec {
                self.0.layout_spec()
            }

            #[must_use]
            pub fn render(&self) -> RenderedBlock {
                self.0.render()
            }

            #[must_use]
            pub fn render_to_string(&self) -> String {
                self.0.render_to_string()
            }

            /// The underlying [`Flex`] container.
            #[must_use]
            pub fn into_flex(self) -> Flex {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Renderable for $name {
            fn render_block(&self) -> RenderedBlock {
                self.0.render()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$name> for Flex {
            fn from(stack: $name) -> Self {
                stack.0
            }
        }
    };
}

fixed_direction_stack!(
    /// A row of items; dividers default to `│`.
    HStack,
    Direction::Row
);

fixed_direction_stack!(
    /// A column of items; dividers default to `─`.
    VStack,
    Direction::Column
);
