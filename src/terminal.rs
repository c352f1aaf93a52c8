//! Terminal detection.
//!
//! The layout engine itself never queries the terminal. These helpers let a
//! caller size a row to the terminal width and decide whether divider and
//! fill styling should be emitted at all.

use std::io::IsTerminal;

use crate::color::ColorSystem;

struct EnvSettings {
    no_color: Option<String>,
    colorterm: Option<String>,
    term: Option<String>,
}

fn read_env_settings() -> EnvSettings {
    EnvSettings {
        no_color: std::env::var("NO_COLOR").ok(),
        colorterm: std::env::var("COLORTERM").ok(),
        term: std::env::var("TERM").ok(),
    }
}

/// Get the terminal size (width, height) in cells.
///
/// Returns `None` if the terminal size cannot be determined.
#[must_use]
pub fn get_terminal_size() -> Option<(usize, usize)> {
    crossterm::terminal::size()
        .ok()
        .map(|(w, h)| (usize::from(w), usize::from(h)))
}

/// Get the terminal width in cells, defaulting to 80.
#[must_use]
pub fn get_terminal_width() -> usize {
    get_terminal_size().map_or(80, |(w, _)| w)
}

/// Get the terminal height in rows, defaulting to 24.
#[must_use]
pub fn get_terminal_height() -> usize {
    get_terminal_size().map_or(24, |(_, h)| h)
}

/// Check if stdout is connected to a terminal.
#[must_use]
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Detect the color system supported by the terminal.
///
/// - `NO_COLOR` (non-empty): no colors
/// - `COLORTERM=truecolor` or `24bit`: 24-bit color
/// - `TERM` suffix `-256color` / `-kitty`: 256 colors
/// - `TERM=dumb` or `TERM=unknown`: no colors
/// - otherwise: standard colors when stdout is a terminal
#[must_use]
pub fn detect_color_system() -> Option<ColorSystem> {
    detect_color_system_with(&read_env_settings(), is_terminal())
}

fn detect_color_system_with(env: &EnvSettings, is_tty: bool) -> Option<ColorSystem> {
    if env
        .no_color
        .as_deref()
        .is_some_and(|value| !value.is_empty())
    {
        return None;
    }

    if let Some(colorterm) = env.colorterm.as_ref() {
        let colorterm = colorterm.trim().to_lowercase();
        if colorterm == "truecolor" || colorterm == "24bit" {
            return Some(ColorSystem::TrueColor);
        }
    }

    let term = env
        .term
        .as_ref()
        .map(|value| value.trim().to_lowercase())
        .unwrap_or_default();
    if term == "dumb" || term == "unknown" {
        return None;
    }
    match term.rsplit('-').next().unwrap_or("") {
        "kitty" | "256color" => return Some(ColorSystem::EightBit),
        "16color" => return Some(ColorSystem::Standard),
        _ => {}
    }

    is_tty.then_some(ColorSystem::Standard)
}
