//! Style system for terminal text attributes.
//!
//! A [`Style`] is the styling primitive the layout engine delegates to:
//! dividers, stretch fill and the caller's override style are all painted
//! through [`Style::render`]. Styling only ever adds escape sequences, so the
//! cell dimensions computed by the layout are never affected.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex};

use bitflags::bitflags;
use lru::LruCache;

use crate::color::{Color, ColorParseError, ColorSystem};
use crate::sync::lock_recover;

const RESET: &str = "\x1b[0m";

bitflags! {
    /// Text attribute flags.
    ///
    /// Each flag corresponds to an ANSI SGR (Select Graphic Rendition) code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u16 {
        /// Bold/bright text (SGR 1).
        const BOLD      = 1 << 0;
        /// Dim/faint text (SGR 2).
        const DIM       = 1 << 1;
        /// Italic text (SGR 3).
        const ITALIC    = 1 << 2;
        /// Single underline (SGR 4).
        const UNDERLINE = 1 << 3;
        /// Slow blinking text (SGR 5).
        const BLINK     = 1 << 4;
        /// Reverse video (SGR 7).
        const REVERSE   = 1 << 5;
        /// Concealed/hidden text (SGR 8).
        const CONCEAL   = 1 << 6;
        /// Strikethrough text (SGR 9).
        const STRIKE    = 1 << 7;
        /// Overlined text (SGR 53).
        const OVERLINE  = 1 << 8;
    }
}

impl Attributes {
    const SGR_CODES: [(Self, u8, &'static str); 9] = [
        (Self::BOLD, 1, "bold"),
        (Self::DIM, 2, "dim"),
        (Self::ITALIC, 3, "italic"),
        (Self::UNDERLINE, 4, "underline"),
        (Self::BLINK, 5, "blink"),
        (Self::REVERSE, 7, "reverse"),
        (Self::CONCEAL, 8, "conceal"),
        (Self::STRIKE, 9, "strike"),
        (Self::OVERLINE, 53, "overline"),
    ];

    /// Get the ANSI SGR codes for enabled attributes.
    #[must_use]
    pub fn to_sgr_codes(&self) -> Vec<u8> {
        Self::SGR_CODES
            .iter()
            .filter(|(attr, _, _)| self.contains(*attr))
            .map(|(_, code, _)| *code)
            .collect()
    }
}

/// Visual style for terminal text.
///
/// Styles can be layered with [`Style::combine`]; the argument takes
/// precedence for anything it sets explicitly.
///
/// Equality compares what a style sets, so the null style equals an
/// unconfigured [`Style::new`]: both render and combine identically.
#[derive(Debug, Clone, Default)]
pub struct Style {
    /// Foreground color.
    pub color: Option<Color>,
    /// Background color.
    pub bgcolor: Option<Color>,
    /// Enabled attributes.
    pub attributes: Attributes,
    /// Which attributes are explicitly set (vs inherited).
    pub set_attributes: Attributes,
    null: bool,
}

impl Style {
    /// Create an empty (null) style. Rendering with it is a no-op.
    #[must_use]
    pub const fn null() -> Self {
        Self {
            color: None,
            bgcolor: None,
            attributes: Attributes::empty(),
            set_attributes: Attributes::empty(),
            null: true,
        }
    }

    /// Create a new style builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this is a null/empty style.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.null
    }

    /// Returns true if rendering with this style emits no escape codes.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.null || (self.color.is_none() && self.bgcolor.is_none() && self.attributes.is_empty())
    }

    /// Set the foreground color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self.null = false;
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn bgcolor(mut self, color: Color) -> Self {
        self.bgcolor = Some(color);
        self.null = false;
        self
    }

    /// Enable an attribute.
    #[must_use]
    pub fn attr(mut self, attr: Attributes) -> Self {
        self.attributes.insert(attr);
        self.set_attributes.insert(attr);
        self.null = false;
        self
    }

    /// Enable bold text.
    #[must_use]
    pub fn bold(self) -> Self {
        self.attr(Attributes::BOLD)
    }

    /// Enable dim/faint text.
    #[must_use]
    pub fn dim(self) -> Self {
        self.attr(Attributes::DIM)
    }

    /// Enable italic text.
    #[must_use]
    pub fn italic(self) -> Self {
        self.attr(Attributes::ITALIC)
    }

    /// Enable underlined text.
    #[must_use]
    pub fn underline(self) -> Self {
        self.attr(Attributes::UNDERLINE)
    }

    /// Enable reverse video.
    #[must_use]
    pub fn reverse(self) -> Self {
        self.attr(Attributes::REVERSE)
    }

    /// Explicitly disable an attribute.
    #[must_use]
    pub fn not(mut self, attr: Attributes) -> Self {
        self.attributes.remove(attr);
        self.set_attributes.insert(attr);
        self.null = false;
        self
    }

    /// Combine this style with another, with the other style taking precedence.
    #[must_use]
    pub fn combine(&self, other: &Style) -> Style {
        if other.is_null() {
            return self.clone();
        }
        if self.is_null() {
            return other.clone();
        }

        Style {
            color: other.color.or(self.color),
            bgcolor: other.bgcolor.or(self.bgcolor),
            attributes: (self.attributes & !other.set_attributes)
                | (other.attributes & other.set_attributes),
            set_attributes: self.set_attributes | other.set_attributes,
            null: false,
        }
    }

    /// Generate the SGR parameter list for this style.
    #[must_use]
    pub fn make_ansi_codes(&self, color_system: ColorSystem) -> String {
        let mut codes: Vec<String> = self
            .attributes
            .to_sgr_codes()
            .into_iter()
            .map(|code| code.to_string())
            .collect();

        if let Some(color) = &self.color {
            codes.extend(color.downgrade(color_system).get_ansi_codes(true));
        }
        if let Some(bgcolor) = &self.bgcolor {
            codes.extend(bgcolor.downgrade(color_system).get_ansi_codes(false));
        }

        codes.join(";")
    }

    /// Render text with this style applied.
    ///
    /// Text must not contain line breaks; styles are applied per line so
    /// that escape sequences never straddle a `\n`.
    #[must_use]
    pub fn render(&self, text: &str, color_system: ColorSystem) -> String {
        if self.is_null() || text.is_empty() {
            return text.to_string();
        }

        let codes = self.make_ansi_codes(color_system);
        if codes.is_empty() {
            return text.to_string();
        }

        format!("\x1b[{codes}m{text}{RESET}")
    }

    /// Render a line that may already contain styled spans.
    ///
    /// The style is re-established after every reset inside `text`, so it
    /// acts as a base layer under the existing styling.
    #[must_use]
    pub fn render_over(&self, text: &str, color_system: ColorSystem) -> String {
        if self.is_null() || text.is_empty() {
            return text.to_string();
        }

        let codes = self.make_ansi_codes(color_system);
        if codes.is_empty() {
            return text.to_string();
        }

        let prefix = format!("\x1b[{codes}m");
        let body = text.replace(RESET, &format!("{RESET}{prefix}"));
        format!("{prefix}{body}{RESET}")
    }

    /// Parse a style from a string (cached).
    ///
    /// Supported formats:
    /// - Empty/none: `""`, `"none"` -> null style
    /// - Attribute: `"bold"`, `"dim"`, `"underline"`
    /// - Negative: `"not bold"`
    /// - Color: `"red"`, `"#ff0000"`
    /// - Background: `"on red"`
    /// - Combined: `"bold red on white"`
    ///
    /// # Errors
    ///
    /// Returns [`StyleParseError`] for unknown words or malformed colors.
    pub fn parse(style: &str) -> Result<Self, StyleParseError> {
        static CACHE: LazyLock<Mutex<LruCache<String, Style>>> = LazyLock::new(|| {
            Mutex::new(LruCache::new(NonZeroUsize::new(256).expect("non-zero")))
        });

        let normalized = style.trim().to_lowercase();

        if let Some(cached) = lock_recover(&CACHE).get(&normalized) {
            return Ok(cached.clone());
        }

        let result = Self::parse_uncached(&normalized)?;
        lock_recover(&CACHE).put(normalized, result.clone());

        Ok(result)
    }

    fn parse_uncached(style: &str) -> Result<Self, StyleParseError> {
        if style.is_empty() || style == "none" {
            return Ok(Self::null());
        }

        let mut result = Style::new();
        let mut words = style.split_whitespace();

        while let Some(word) = words.next() {
            match word {
                "not" => {
                    let name = words.next().ok_or_else(|| {
                        StyleParseError::InvalidFormat("'not' requires an attribute".to_string())
                    })?;
                    let attr = parse_attribute(name)
                        .ok_or_else(|| StyleParseError::UnknownAttribute(name.to_string()))?;
                    result = result.not(attr);
                }
                "on" => {
                    let name = words.next().ok_or_else(|| {
                        StyleParseError::InvalidFormat("'on' requires a color".to_string())
                    })?;
                    result = result.bgcolor(Color::parse(name)?);
                }
                _ => {
                    if let Some(attr) = parse_attribute(word) {
                        result = result.attr(attr);
                    } else if let Ok(color) = Color::parse(word) {
                        result = result.color(color);
                    } else {
                        return Err(StyleParseError::UnknownToken(word.to_string()));
                    }
                }
            }
        }

        Ok(result)
    }
}

impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
            && self.bgcolor == other.bgcolor
            && self.attributes == other.attributes
            && self.set_attributes == other.set_attributes
    }
}

impl Eq for Style {}

impl Hash for Style {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.color.hash(state);
        self.bgcolor.hash(state);
        self.attributes.hash(state);
        self.set_attributes.hash(state);
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Attributes::SGR_CODES
            .iter()
            .filter_map(|(attr, _, name)| {
                if self.attributes.contains(*attr) {
                    Some((*name).to_string())
                } else if self.set_attributes.contains(*attr) {
                    Some(format!("not {name}"))
                } else {
                    None
                }
            })
            .collect();

        if let Some(color) = &self.color {
            parts.push(color.to_string());
        }
        if let Some(bgcolor) = &self.bgcolor {
            parts.push(format!("on {bgcolor}"));
        }

        if parts.is_empty() {
            return f.write_str("none");
        }
        f.write_str(&parts.join(" "))
    }
}

impl FromStr for Style {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_attribute(name: &str) -> Option<Attributes> {
    match name {
        "bold" | "b" => Some(Attributes::BOLD),
        "dim" | "d" => Some(Attributes::DIM),
        "italic" | "i" => Some(Attributes::ITALIC),
        "underline" | "u" => Some(Attributes::UNDERLINE),
        "blink" => Some(Attributes::BLINK),
        "reverse" | "r" => Some(Attributes::REVERSE),
        "conceal" | "c" => Some(Attributes::CONCEAL),
        "strike" | "s" => Some(Attributes::STRIKE),
        "overline" | "o" => Some(Attributes::OVERLINE),
        _ => None,
    }
}

/// Error type for style parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleParseError {
    InvalidFormat(String),
    UnknownAttribute(String),
    UnknownToken(String),
    ColorError(ColorParseError),
}

impl fmt::Display for StyleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid style format: {s}"),
            Self::UnknownAttribute(s) => write!(f, "Unknown attribute: {s}"),
            Self::UnknownToken(s) => write!(f, "Unknown token: {s}"),
            Self::ColorError(e) => write!(f, "Color error: {e}"),
        }
    }
}

impl std::error::Error for StyleParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ColorError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ColorParseError> for StyleParseError {
    fn from(err: ColorParseError) -> Self {
        Self::ColorError(err)
    }
}
