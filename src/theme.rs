//! Named styles used by the layout engine.
//!
//! The compositor never looks styles up from ambient state; a [`Theme`] is
//! handed to each layout explicitly. Two names are consulted:
//!
//! - `flex.divider`: the divider glyphs between items (muted by default)
//! - `flex.fill`: blank cells added by [`Align::Stretch`](crate::flex::Align::Stretch)

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::style::{Style, StyleParseError};

/// Style name for divider glyphs.
pub const DIVIDER: &str = "flex.divider";
/// Style name for stretch fill.
pub const FILL: &str = "flex.fill";

const DEFAULT_STYLES: [(&str, &str); 2] = [(DIVIDER, "bright_black"), (FILL, "none")];

/// A set of named styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    /// Create a theme from a map of named styles.
    ///
    /// If `inherit` is true the built-in defaults are included and the given
    /// styles override them.
    #[must_use]
    pub fn new(styles: Option<HashMap<String, Style>>, inherit: bool) -> Self {
        let mut merged = if inherit {
            default_styles()
        } else {
            HashMap::new()
        };
        if let Some(styles) = styles {
            merged.extend(styles);
        }
        Self { styles: merged }
    }

    /// Build a theme from string style definitions (`"bold red"`, `"dim on blue"`).
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidStyle`] naming the first definition that
    /// fails to parse.
    pub fn from_style_definitions<I, K, V>(styles: I, inherit: bool) -> Result<Self, ThemeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut parsed = HashMap::new();
        for (name, definition) in styles {
            let name = name.into();
            let style =
                Style::parse(definition.as_ref()).map_err(|err| ThemeError::InvalidStyle {
                    name: name.clone(),
                    err,
                })?;
            parsed.insert(name, style);
        }
        Ok(Self::new(Some(parsed), inherit))
    }

    /// Get a style by its exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// Get a style by name, or the null style when the name is missing.
    #[must_use]
    pub fn style(&self, name: &str) -> Style {
        self.get(name).cloned().unwrap_or_else(Style::null)
    }

    /// Render the theme as `.ini` text with a `[styles]` section.
    #[must_use]
    pub fn config(&self) -> String {
        let mut entries: Vec<(&String, &Style)> = self.styles.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut out = String::from("[styles]\n");
        for (name, style) in entries {
            out.push_str(&format!("{name} = {style}\n"));
        }
        out
    }

    /// Parse `.ini` text containing a `[styles]` section.
    ///
    /// # Errors
    ///
    /// Fails on a missing section, lines without `=`/`:`, duplicate keys and
    /// invalid style definitions.
    pub fn from_ini_str(contents: &str, inherit: bool) -> Result<Self, ThemeError> {
        let mut in_styles = false;
        let mut seen_styles_section = false;
        let mut styles: HashMap<String, Style> = HashMap::new();

        for (index, raw_line) in contents.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                in_styles = section.trim().eq_ignore_ascii_case("styles");
                seen_styles_section |= in_styles;
                continue;
            }

            if !in_styles {
                continue;
            }

            let invalid = || ThemeError::InvalidIniLine {
                line_no,
                line: raw_line.to_string(),
            };
            let (name, definition) = line
                .split_once('=')
                .or_else(|| line.split_once(':'))
                .ok_or_else(invalid)?;

            let name = name.trim().to_lowercase();
            if name.is_empty() {
                return Err(invalid());
            }

            let style = Style::parse(definition.trim()).map_err(|err| ThemeError::InvalidStyle {
                name: name.clone(),
                err,
            })?;

            if styles.insert(name.clone(), style).is_some() {
                return Err(ThemeError::DuplicateIniKey { line_no, name });
            }
        }

        if !seen_styles_section {
            return Err(ThemeError::MissingStylesSection);
        }

        Ok(Self::new(Some(styles), inherit))
    }

    /// Read a `.ini` theme file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Theme::from_ini_str`].
    pub fn read(path: impl AsRef<Path>, inherit: bool) -> Result<Self, ThemeError> {
        let contents = fs::read_to_string(&path).map_err(|err| ThemeError::Io {
            path: path.as_ref().to_path_buf(),
            err,
        })?;
        Self::from_ini_str(&contents, inherit)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(None, true)
    }
}

fn default_styles() -> HashMap<String, Style> {
    DEFAULT_STYLES
        .iter()
        .map(|(name, definition)| {
            let style = Style::parse(definition).unwrap_or_else(|_| Style::null());
            ((*name).to_string(), style)
        })
        .collect()
}

/// Errors returned when building a [`Theme`].
#[derive(Debug)]
pub enum ThemeError {
    Io {
        path: std::path::PathBuf,
        err: std::io::Error,
    },
    MissingStylesSection,
    InvalidIniLine {
        line_no: usize,
        line: String,
    },
    DuplicateIniKey {
        line_no: usize,
        name: String,
    },
    InvalidStyle {
        name: String,
        err: StyleParseError,
    },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, err } => {
                write!(f, "failed to read theme file {}: {err}", path.display())
            }
            Self::MissingStylesSection => write!(f, "theme ini is missing a [styles] section"),
            Self::InvalidIniLine { line_no, line } => {
                write!(f, "invalid theme ini line {line_no}: {line:?}")
            }
            Self::DuplicateIniKey { line_no, name } => {
                write!(f, "duplicate theme key {name:?} at line {line_no}")
            }
            Self::InvalidStyle { name, err } => {
                write!(f, "invalid style definition for theme key {name:?}: {err}")
            }
        }
    }
}

impl std::error::Error for ThemeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { err, .. } => Some(err),
            Self::InvalidStyle { err, .. } => Some(err),
            _ => None,
        }
    }
}
