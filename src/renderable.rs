//! Things that can be laid out.

use crate::block::RenderedBlock;

/// Anything that can reduce itself to a [`RenderedBlock`].
///
/// Implemented for plain strings, blocks, and the layout containers
/// themselves so that a [`Flex`](crate::flex::Flex) can hold another one.
pub trait Renderable {
    /// Render to a measured block.
    fn render_block(&self) -> RenderedBlock;
}

impl Renderable for str {
    fn render_block(&self) -> RenderedBlock {
        RenderedBlock::new(self)
    }
}

impl Renderable for String {
    fn render_block(&self) -> RenderedBlock {
        RenderedBlock::new(self)
    }
}

impl Renderable for RenderedBlock {
    fn render_block(&self) -> RenderedBlock {
        self.clone()
    }
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn render_block(&self) -> RenderedBlock {
        (**self).render_block()
    }
}

impl<T: Renderable + ?Sized> Renderable for Box<T> {
    fn render_block(&self) -> RenderedBlock {
        (**self).render_block()
    }
}

/// A layout child: either something to render, or a hole to skip.
///
/// Absent items are dropped before measurement, so conditionally shown
/// children can be passed without rebuilding the child list.
pub enum Item {
    Present(Box<dyn Renderable + Send + Sync>),
    Absent,
}

impl Item {
    /// Wrap a renderable.
    pub fn new(renderable: impl Renderable + Send + Sync + 'static) -> Self {
        Self::Present(Box::new(renderable))
    }

    /// `Present` for `Some`, `Absent` for `None`.
    pub fn from_option<R: Renderable + Send + Sync + 'static>(renderable: Option<R>) -> Self {
        renderable.map_or(Self::Absent, Self::new)
    }

    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Render the item, or `None` when absent.
    #[must_use]
    pub fn render_block(&self) -> Option<RenderedBlock> {
        match self {
            Self::Present(renderable) => Some(renderable.render_block()),
            Self::Absent => None,
        }
    }
}

impl std::fmt::Debug for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present(_) => f.write_str("Item::Present(..)"),
            Self::Absent => f.write_str("Item::Absent"),
        }
    }
}

impl<R: Renderable + Send + Sync + 'static> From<Option<R>> for Item {
    fn from(renderable: Option<R>) -> Self {
        Self::from_option(renderable)
    }
}

impl From<&'static str> for Item {
    fn from(text: &'static str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Item {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<RenderedBlock> for Item {
    fn from(block: RenderedBlock) -> Self {
        Self::new(block)
    }
}
