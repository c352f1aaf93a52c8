//! # flexstack
//!
//! Flexbox-style layout for blocks of already-rendered terminal text.
//!
//! Children are reduced to multi-line strings, measured in terminal cells
//! (not bytes), aligned on the cross axis, spaced on the main axis with one
//! of six justify modes, and joined into a single block, optionally with
//! dividers between them.
//!
//! ## Quick Start
//!
//! ```rust
//! use flexstack::prelude::*;
//!
//! let sidebar = VStack::new().child("files").child("search");
//! let row = HStack::new()
//!     .gap(2)
//!     .divider(true)
//!     .child(sidebar)
//!     .child("main view");
//!
//! assert_eq!(row.render_to_string(), "files  │ main view\nsearch │          ");
//! ```
//!
//! ## Core Concepts
//!
//! - **RenderedBlock**: measured lines of text, the unit of layout
//! - **Renderable**: anything that can produce a block (strings, stacks)
//! - **Flex / HStack / VStack**: layout containers
//! - **Theme / Style**: divider and fill styling, emitted only when a
//!   [`ColorSystem`] is configured
//!
//! ## Logging
//!
//! Layout decisions are reported through the [`log`] facade (`trace` for
//! per-layout summaries, `debug` for overflow). Install any logger, or
//! [`logging::FlexLogger`], to see them.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod block;
pub mod cells;
pub mod color;
pub mod flex;
pub mod logging;
pub mod measure;
pub mod renderable;
pub mod style;
pub mod sync;
pub mod terminal;
pub mod theme;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::block::RenderedBlock;
    pub use crate::color::{Color, ColorSystem, ColorTriplet};
    pub use crate::flex::{Align, Direction, Flex, HStack, Justify, VStack};
    pub use crate::measure::{Dimensions, measure};
    pub use crate::renderable::{Item, Renderable};
    pub use crate::style::{Attributes, Style};
    pub use crate::theme::Theme;
}

// Re-export key types at crate root
pub use block::RenderedBlock;
pub use color::{Color, ColorSystem};
pub use flex::{Align, Direction, Flex, GapPlan, HStack, Justify, LayoutSpec, VStack};
pub use renderable::{Item, Renderable};
pub use style::Style;
pub use theme::Theme;
