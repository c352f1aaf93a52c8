//! Colors for divider and fill styling.
//!
//! Supports the 16 standard ANSI colors, the 256-color palette and 24-bit
//! RGB, with downgrading so a layout styled in truecolor still renders on a
//! 16-color terminal.
//!
//! ```
//! use flexstack::color::{Color, ColorSystem};
//!
//! let muted = Color::parse("bright_black").unwrap();
//! assert_eq!(muted.get_ansi_codes(true), vec!["90".to_string()]);
//!
//! let orange = Color::parse("#ff8800").unwrap();
//! let fallback = orange.downgrade(ColorSystem::Standard);
//! assert!(matches!(fallback, Color::Ansi(n) if n < 16));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// RGB color triplet with values 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorTriplet {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorTriplet {
    /// Create a new color triplet from RGB components.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns CSS-style hex format `#rrggbb`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl From<(u8, u8, u8)> for ColorTriplet {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

/// Terminal color system capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ColorSystem {
    /// 4-bit ANSI colors (16 colors).
    #[default]
    Standard,
    /// 8-bit colors (256 colors).
    EightBit,
    /// 24-bit RGB colors.
    TrueColor,
}

impl ColorSystem {
    /// Get the name of this color system.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::EightBit => "256",
            Self::TrueColor => "truecolor",
        }
    }
}

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's default foreground/background.
    #[default]
    Default,
    /// A palette number: 0-15 are the standard colors, 16-255 the extended palette.
    Ansi(u8),
    /// 24-bit color.
    Rgb(ColorTriplet),
}

impl Color {
    /// Create a color from an ANSI palette number.
    #[must_use]
    pub const fn from_ansi(number: u8) -> Self {
        Self::Ansi(number)
    }

    /// Create a color from RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::Rgb(ColorTriplet::new(red, green, blue))
    }

    /// The least capable color system that can display this color exactly.
    #[must_use]
    pub const fn system(&self) -> ColorSystem {
        match self {
            Self::Default => ColorSystem::Standard,
            Self::Ansi(n) if *n < 16 => ColorSystem::Standard,
            Self::Ansi(_) => ColorSystem::EightBit,
            Self::Rgb(_) => ColorSystem::TrueColor,
        }
    }

    /// Approximate RGB value of this color.
    #[must_use]
    pub fn get_truecolor(&self) -> ColorTriplet {
        match *self {
            Self::Default => ColorTriplet::default(),
            Self::Ansi(n) => palette_triplet(n),
            Self::Rgb(triplet) => triplet,
        }
    }

    /// SGR parameters selecting this color as foreground or background.
    #[must_use]
    pub fn get_ansi_codes(&self, foreground: bool) -> Vec<String> {
        let (base, extended) = if foreground { (30, "38") } else { (40, "48") };
        match *self {
            Self::Default => vec![(base + 9).to_string()],
            Self::Ansi(n) if n < 8 => vec![(base + u16::from(n)).to_string()],
            Self::Ansi(n) if n < 16 => vec![(base + 60 + u16::from(n) - 8).to_string()],
            Self::Ansi(n) => vec![extended.to_string(), "5".to_string(), n.to_string()],
            Self::Rgb(t) => vec![
                extended.to_string(),
                "2".to_string(),
                t.red.to_string(),
                t.green.to_string(),
                t.blue.to_string(),
            ],
        }
    }

    /// Downgrade to the closest color the given system can display.
    #[must_use]
    pub fn downgrade(&self, system: ColorSystem) -> Self {
        if self.system() <= system {
            return *self;
        }
        match system {
            ColorSystem::TrueColor => *self,
            ColorSystem::EightBit => Self::Ansi(rgb_to_eight_bit(self.get_truecolor())),
            ColorSystem::Standard => Self::Ansi(rgb_to_standard(self.get_truecolor())),
        }
    }

    /// Parse a color name or specification.
    ///
    /// Accepts `default`, standard names (`red`, `bright_black`, `grey`),
    /// `#rrggbb`, `#rgb`, `color(N)` and `rgb(r, g, b)`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError`] when the input matches none of the forms.
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        static COLOR_NUM_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^color\((\d{1,3})\)$").expect("valid regex"));
        static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
                .expect("valid regex")
        });

        let color = color.trim().to_lowercase();
        if color.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if color == "default" {
            return Ok(Self::Default);
        }

        if let Some(hex) = color.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(color.clone()));
        }

        if let Some(caps) = COLOR_NUM_RE.captures(&color) {
            return caps[1]
                .parse::<u8>()
                .map(Self::Ansi)
                .map_err(|_| ColorParseError::InvalidColorNumber(color.clone()));
        }

        if let Some(caps) = RGB_RE.captures(&color) {
            return match (caps[1].parse(), caps[2].parse(), caps[3].parse()) {
                (Ok(r), Ok(g), Ok(b)) => Ok(Self::from_rgb(r, g, b)),
                _ => Err(ColorParseError::InvalidRgb(color.clone())),
            };
        }

        named_color(&color)
            .map(Self::Ansi)
            .ok_or(ColorParseError::UnknownColor(color))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::from_rgb(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16));
            let mut next = || -> Option<u8> {
                let d = u8::try_from(digits.next()??).ok()?;
                Some(d * 17)
            };
            Some(Color::from_rgb(next()?, next()?, next()?))
        }
        _ => None,
    }
}

fn named_color(name: &str) -> Option<u8> {
    const BASE: [&str; 8] = [
        "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
    ];
    if let Some(index) = BASE.iter().position(|base| *base == name) {
        return u8::try_from(index).ok();
    }
    if let Some(rest) = name.strip_prefix("bright_") {
        return BASE
            .iter()
            .position(|base| *base == rest)
            .and_then(|index| u8::try_from(index + 8).ok());
    }
    match name {
        "grey" | "gray" => Some(8),
        "dark_grey" | "dark_gray" => Some(236),
        "light_grey" | "light_gray" => Some(250),
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Ansi(n) => write!(f, "color({n})"),
            Self::Rgb(t) => write!(f, "{}", t.hex()),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ColorTriplet> for Color {
    fn from(triplet: ColorTriplet) -> Self {
        Self::Rgb(triplet)
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidHex(String),
    InvalidColorNumber(String),
    InvalidRgb(String),
    UnknownColor(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidHex(s) => write!(f, "Invalid hex color: {s}"),
            Self::InvalidColorNumber(s) => write!(f, "Invalid color number: {s}"),
            Self::InvalidRgb(s) => write!(f, "Invalid RGB color: {s}"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// xterm's 16-color palette.
const STANDARD_PALETTE: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (170, 0, 0),
    (0, 170, 0),
    (170, 85, 0),
    (0, 0, 170),
    (170, 0, 170),
    (0, 170, 170),
    (170, 170, 170),
    (85, 85, 85),
    (255, 85, 85),
    (85, 255, 85),
    (255, 255, 85),
    (85, 85, 255),
    (255, 85, 255),
    (85, 255, 255),
    (255, 255, 255),
];

/// Levels of the 6x6x6 color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn palette_triplet(number: u8) -> ColorTriplet {
    match number {
        0..=15 => STANDARD_PALETTE[usize::from(number)].into(),
        16..=231 => {
            let index = usize::from(number - 16);
            ColorTriplet::new(
                CUBE_LEVELS[index / 36],
                CUBE_LEVELS[(index / 6) % 6],
                CUBE_LEVELS[index % 6],
            )
        }
        _ => {
            let level = 8 + (number - 232) * 10;
            ColorTriplet::new(level, level, level)
        }
    }
}

/// Convert RGB to the nearest entry of the 256-color palette.
#[must_use]
pub fn rgb_to_eight_bit(triplet: ColorTriplet) -> u8 {
    let quantize = |v: u8| -> u8 {
        let index = CUBE_LEVELS
            .iter()
            .enumerate()
            .min_by_key(|(_, level)| level.abs_diff(v))
            .map_or(0, |(i, _)| i);
        u8::try_from(index).unwrap_or(0)
    };

    let ColorTriplet { red, green, blue } = triplet;
    if red == green && green == blue {
        if red < 8 {
            return 16;
        }
        if red > 238 {
            return 231;
        }
        return 232 + (red - 8) / 10;
    }

    16 + quantize(red) * 36 + quantize(green) * 6 + quantize(blue)
}

/// Convert RGB to the nearest standard 16-color number.
#[must_use]
pub fn rgb_to_standard(triplet: ColorTriplet) -> u8 {
    let distance = |(r, g, b): (u8, u8, u8)| {
        let dr = u32::from(triplet.red.abs_diff(r));
        let dg = u32::from(triplet.green.abs_diff(g));
        let db = u32::from(triplet.blue.abs_diff(b));
        dr * dr * 2 + dg * dg * 4 + db * db * 3
    };
    let best = STANDARD_PALETTE
        .iter()
        .enumerate()
        .min_by_key(|(_, rgb)| distance(**rgb))
        .map_or(0, |(i, _)| i);
    u8::try_from(best).unwrap_or(0)
}
