//! Unicode character cell width calculations.
//!
//! Widths are counted in terminal cells from decoded characters, never from
//! byte length: `"│││"` is nine bytes but three cells, `"日本"` is six bytes
//! but four cells. Escape sequences already present in pre-styled text take
//! up no cells.

use std::borrow::Cow;
use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

use lru::LruCache;
use regex::Regex;
use unicode_width::UnicodeWidthChar;

use crate::sync::lock_recover;

/// Minimum string length to cache (shorter strings have minimal overhead).
const CACHE_MIN_LEN: usize = 8;

static CELL_LEN_CACHE: LazyLock<Mutex<LruCache<String, usize>>> =
    LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

/// CSI sequences (SGR colors, cursor moves) and OSC sequences (hyperlinks,
/// titles) terminated by BEL or ST.
static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)").expect("valid regex")
});

/// Get the cell width of a single character.
///
/// Most characters are 1 cell wide, CJK characters and most emoji are 2,
/// control and combining characters are 0.
#[must_use]
pub fn get_character_cell_size(c: char) -> usize {
    c.width().unwrap_or(0)
}

#[inline]
fn compute_cell_width(text: &str) -> usize {
    strip_ansi(text).chars().map(get_character_cell_size).sum()
}

/// Remove terminal escape sequences, leaving only printable text.
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if text.contains('\x1b') {
        ANSI_RE.replace_all(text, "")
    } else {
        Cow::Borrowed(text)
    }
}

/// Get the total cell width of a single line (cached for longer strings).
#[must_use]
pub fn cell_len(text: &str) -> usize {
    if text.len() < CACHE_MIN_LEN {
        return compute_cell_width(text);
    }

    if let Some(&cached) = lock_recover(&CELL_LEN_CACHE).get(text) {
        return cached;
    }

    let width = compute_cell_width(text);
    lock_recover(&CELL_LEN_CACHE).put(text.to_string(), width);
    width
}

/// Pad a line with trailing spaces up to `width` cells.
///
/// Lines already at least `width` cells wide are returned unchanged; this
/// never truncates.
#[must_use]
pub fn pad_right(text: &str, width: usize) -> String {
    let current = cell_len(text);
    if current >= width {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + width - current);
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width - current));
    out
}

/// Truncate or pad plain text to exactly `total` cells.
///
/// A wide character that would straddle the limit is replaced by padding.
#[must_use]
pub fn set_cell_size(text: &str, total: usize) -> String {
    let current = cell_len(text);

    if current == total {
        return text.to_string();
    }
    if current < total {
        return pad_right(text, total);
    }

    let mut width = 0;
    let mut result = String::new();
    for c in text.chars() {
        let char_width = get_character_cell_size(c);
        if width + char_width > total {
            break;
        }
        width += char_width;
        result.push(c);
    }
    result.extend(std::iter::repeat_n(' ', total - width));
    result
}

/// Repeat `glyph` to fill exactly `width` cells.
///
/// Cells a wide glyph cannot fill are padded with spaces. A zero-width glyph
/// yields spaces.
#[must_use]
pub fn repeat_to_width(glyph: &str, width: usize) -> String {
    let glyph_width = cell_len(glyph);
    if glyph_width == 0 {
        return " ".repeat(width);
    }
    let count = width / glyph_width;
    pad_right(&glyph.repeat(count), width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_width_cache_survives_poison() {
        let _ = thread::spawn(|| {
            let _guard = CELL_LEN_CACHE.lock();
            panic!("poison the width cache");
        })
        .join();

        let line = "poisoned cache │ line";
        assert_eq!(cell_len(line), 21);
        assert!(!CELL_LEN_CACHE.is_poisoned());
        assert_eq!(lock_recover(&CELL_LEN_CACHE).peek(line), Some(&21));
    }

    #[test]
    fn test_ascii_width() {
        assert_eq!(cell_len("hello"), 5);
        assert_eq!(cell_len(""), 0);
    }

    #[test]
    fn test_box_drawing_is_one_cell() {
        assert_eq!("│││".len(), 9);
        assert_eq!(cell_len("│││"), 3);
        assert_eq!(cell_len("─→←"), 3);
    }

    #[test]
    fn test_cjk_width() {
        assert_eq!(cell_len("日本語"), 6);
        assert_eq!(cell_len("Hello日本"), 9);
    }

    #[test]
    fn test_control_and_combining_width() {
        assert_eq!(get_character_cell_size('\0'), 0);
        assert_eq!(get_character_cell_size('\u{0301}'), 0);
        assert_eq!(cell_len("e\u{0301}"), 1);
    }

    #[test]
    fn test_ansi_sequences_have_no_width() {
        assert_eq!(cell_len("\x1b[1;31mred\x1b[0m"), 3);
        assert_eq!(cell_len("\x1b[38;2;255;0;0m│\x1b[0m"), 1);
        assert_eq!(
            cell_len("\x1b]8;;https://example.com\x1b\\link\x1b]8;;\x1b\\"),
            4
        );
    }

    #[test]
    fn test_strip_ansi_borrows_plain_text() {
        assert!(matches!(strip_ansi("plain"), Cow::Borrowed("plain")));
        assert_eq!(strip_ansi("\x1b[2mdim\x1b[0m"), "dim");
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("abcd", 2), "abcd");
        assert_eq!(pad_right("日", 3), "日 ");
        assert_eq!(pad_right("\x1b[1mab\x1b[0m", 3), "\x1b[1mab\x1b[0m ");
    }

    #[test]
    fn test_set_cell_size() {
        assert_eq!(set_cell_size("hi", 5), "hi   ");
        assert_eq!(set_cell_size("hello world", 5), "hello");
        assert_eq!(set_cell_size("日本語", 5), "日本 ");
        assert_eq!(set_cell_size("", 3), "   ");
    }

    #[test]
    fn test_repeat_to_width() {
        assert_eq!(repeat_to_width("─", 4), "────");
        assert_eq!(repeat_to_width("═", 0), "");
        assert_eq!(repeat_to_width("日", 5), "日日 ");
        assert_eq!(repeat_to_width("", 2), "  ");
    }

    #[test]
    fn test_cell_len_caching() {
        let long = "Hello, this is a longer string for testing";
        assert_eq!(cell_len(long), 42);
        assert_eq!(cell_len(long), 42);

        let cjk_long = "日本語テスト文字列";
        assert_eq!(cell_len(cjk_long), 18);
        assert_eq!(cell_len(cjk_long), 18);
    }
}
