//! Logged assertion helpers for flexstack tests.
//!
//! These functions wrap standard assertions with tracing logs,
//! providing detailed context when assertions fail.

#![allow(dead_code)]

use std::fmt::Debug;

/// Assert equality with detailed logging.
///
/// ```rust,ignore
/// assert_eq_logged("row width", block.width(), 20);
/// ```
#[track_caller]
pub fn assert_eq_logged<T: PartialEq + Debug>(context: &str, actual: T, expected: T) {
    tracing::debug!(
        context = context,
        expected = ?expected,
        actual = ?actual,
        "asserting equality"
    );

    if actual != expected {
        tracing::error!(
            context = context,
            expected = ?expected,
            actual = ?actual,
            "assertion failed: values not equal"
        );
    }

    assert_eq!(
        actual, expected,
        "{context}: expected {expected:?}, got {actual:?}"
    );

    tracing::trace!(context = context, "assertion passed");
}

/// Assert that a value is true with logging.
#[track_caller]
pub fn assert_true_logged(context: &str, value: bool) {
    tracing::debug!(context = context, value = value, "asserting true");

    if !value {
        tracing::error!(
            context = context,
            value = value,
            "assertion failed: expected true"
        );
    }

    assert!(value, "{context}: expected true, got false");

    tracing::trace!(context = context, "assertion passed");
}

/// Assert that a string contains a substring with logging.
///
/// ```rust,ignore
/// assert_contains_logged("divider color", &output, "\x1b[90m");
/// ```
#[track_caller]
pub fn assert_contains_logged(context: &str, haystack: &str, needle: &str) {
    tracing::debug!(
        context = context,
        haystack_len = haystack.len(),
        needle = needle,
        "asserting contains"
    );

    if !haystack.contains(needle) {
        tracing::error!(
            context = context,
            haystack = haystack,
            needle = needle,
            "assertion failed: string does not contain substring"
        );
        panic!(
            "{context}: expected string to contain {needle:?}, but it doesn't.\nString: {haystack:?}"
        );
    }

    tracing::trace!(context = context, "assertion passed");
}

/// Assert that a string does not contain a substring with logging.
///
/// ```rust,ignore
/// assert_not_contains_logged("plain output", &output, "\x1b[");
/// ```
#[track_caller]
pub fn assert_not_contains_logged(context: &str, haystack: &str, needle: &str) {
    tracing::debug!(
        context = context,
        haystack_len = haystack.len(),
        needle = needle,
        "asserting not contains"
    );

    if haystack.contains(needle) {
        tracing::error!(
            context = context,
            haystack = haystack,
            needle = needle,
            "assertion failed: string contains forbidden substring"
        );
        panic!(
            "{context}: expected string NOT to contain {needle:?}, but it does.\nString: {haystack:?}"
        );
    }

    tracing::trace!(context = context, "assertion passed");
}

/// Assert that every line of a block has the given cell width.
#[track_caller]
pub fn assert_line_widths_logged(context: &str, text: &str, expected: usize) {
    for (index, line) in text.split('\n').enumerate() {
        let width = flexstack::cells::cell_len(line);
        if width != expected {
            tracing::error!(
                context = context,
                line = index,
                width = width,
                expected = expected,
                "assertion failed: line width mismatch"
            );
        }
        assert_eq!(
            width, expected,
            "{context}: line {index} ({line:?}) is {width} cells, expected {expected}"
        );
    }

    tracing::trace!(context = context, "assertion passed");
}
