//! End-to-end layout tests through the public builders.
//!
//! Run with: RUST_LOG=flexstack=trace cargo test --test flex_layout -- --nocapture

mod common;

use common::{
    assertions::{
        assert_contains_logged, assert_eq_logged, assert_line_widths_logged,
        assert_not_contains_logged, assert_true_logged,
    },
    init_test_logging, log_test_context, test_phase, visible,
};
use flexstack::cells::cell_len;
use flexstack::measure::{Dimensions, measure};
use flexstack::prelude::*;
use flexstack::theme;

#[test]
fn test_space_between_two_items() {
    init_test_logging();
    log_test_context("test_space_between_two_items", "A and B pushed to the edges");

    let row = HStack::new()
        .size(20)
        .justify(Justify::SpaceBetween)
        .child("A")
        .child("B");

    let out = row.render_to_string();
    assert_eq_logged("output", out, format!("A{}B", " ".repeat(18)));
}

#[test]
fn test_space_around_three_items() {
    init_test_logging();

    let row = HStack::new()
        .size(30)
        .justify(Justify::SpaceAround)
        .children(["A", "B", "C"]);

    let out = row.render_to_string();
    let nine = " ".repeat(9);
    assert_true_logged(
        "space-around prefix",
        out.starts_with(&format!("    A{nine}B{nine}C    ")),
    );
    assert_eq_logged("row width", cell_len(&out), 30);
}

#[test]
fn test_no_items_is_empty_string() {
    init_test_logging();

    for justify in Justify::ALL {
        for align in Align::ALL {
            let row = Flex::new().justify(justify).align(align).size(12).divider(true);
            assert_eq_logged("empty row", row.render_to_string(), String::new());
        }
    }
}

#[test]
fn test_empty_children_fill_fixed_size() {
    init_test_logging();
    log_test_context("test_empty_children_fill_fixed_size", "empty strings still honour a fixed size");

    for justify in Justify::ALL {
        let row = HStack::new().size(10).justify(justify).child("").child("");
        let out = row.render_to_string();
        assert_eq_logged("row dimensions", measure(&out), Dimensions::new(10, 1));

        let column = VStack::new().size(5).justify(justify).child("").child("");
        let out = column.render_to_string();
        assert_eq_logged("column height", measure(&out).height, 5);
    }

    let natural = HStack::new().child("").child("").render_to_string();
    assert_eq_logged("natural row", natural, String::new());
}

#[test]
fn test_dashboard_row_snapshot() {
    init_test_logging();

    let _setup = test_phase("setup");
    let row = HStack::new()
        .gap(2)
        .divider(true)
        .align(Align::Center)
        .child("CPU\n42%")
        .child("MEM")
        .child("NET\nup\ndown");
    drop(_setup);

    let _verify = test_phase("verify");
    let out = row.render_to_string();
    assert_line_widths_logged("dashboard", &out, 16);
    insta::assert_snapshot!(visible(&out), @r"
    CPU·│·····│·NET·
    42%·│·MEM·│·up··
    ····│·····│·down
    ");
}

#[test]
fn test_column_divider_right_aligned_snapshot() {
    init_test_logging();

    let column = VStack::new()
        .divider(true)
        .align(Align::End)
        .child("title")
        .child("ab");

    insta::assert_snapshot!(visible(&column.render_to_string()), @r"
    title
    ─────
    ···ab
    ");
}

#[test]
fn test_nested_panes_snapshot() {
    init_test_logging();

    let files = VStack::new().child("Files").child("src").child("tests");
    let preview = VStack::new().child("Preview").child("fn main");
    let panes = HStack::new()
        .size(20)
        .justify(Justify::SpaceBetween)
        .divider(true)
        .child(files)
        .child(preview);

    let out = panes.render_to_string();
    assert_line_widths_logged("panes", &out, 20);
    insta::assert_snapshot!(visible(&out), @r"
    Files···│····Preview
    src·····│····fn·main
    tests···│···········
    ");
}

#[test]
fn test_column_space_evenly() {
    init_test_logging();

    let column = VStack::new()
        .size(9)
        .justify(Justify::SpaceEvenly)
        .child("a")
        .child("b");

    let block = column.render();
    assert_eq_logged("dimensions", block.dimensions(), Dimensions::new(1, 9));
    assert_eq_logged(
        "lines",
        block.lines().iter().map(String::as_str).collect::<Vec<_>>(),
        vec![" ", " ", " ", "a", " ", " ", "b", " ", " "],
    );
}

#[test]
fn test_single_item_end_justify() {
    init_test_logging();

    let row = HStack::new().size(6).justify(Justify::End).divider(true).child("abc");
    assert_eq_logged("single item", row.render_to_string(), "   abc".to_string());
}

#[test]
fn test_wide_characters_are_measured_in_cells() {
    init_test_logging();

    let row = HStack::new()
        .size(10)
        .gap(1)
        .justify(Justify::End)
        .child("日本")
        .child("ok");

    let out = row.render_to_string();
    assert_eq_logged("output", out.as_str(), "   日本 ok");
    assert_eq_logged("measured", measure(&out), Dimensions::new(10, 1));
}

#[test]
fn test_styled_children_keep_their_width() {
    init_test_logging();

    let row = HStack::new()
        .size(6)
        .justify(Justify::Center)
        .child("\x1b[1mbold\x1b[0m");

    let out = row.render_to_string();
    assert_eq_logged("output", out.as_str(), " \x1b[1mbold\x1b[0m ");
    assert_eq_logged("width", cell_len(&out), 6);
}

#[test]
fn test_plain_output_without_color_system() {
    init_test_logging();

    let out = HStack::new()
        .divider(true)
        .align(Align::Stretch)
        .style(Style::new().bgcolor(Color::Ansi(4)))
        .child("a\nb")
        .child("c")
        .render_to_string();

    assert_not_contains_logged("plain", &out, "\x1b[");
    assert_eq_logged("output", out.as_str(), "a│c\nb│ ");
}

#[test]
fn test_divider_uses_theme_color() {
    init_test_logging();

    let out = HStack::new()
        .divider(true)
        .color_system(Some(ColorSystem::Standard))
        .child("a")
        .child("b")
        .render_to_string();

    assert_eq_logged("output", out.as_str(), "a\x1b[90m│\x1b[0mb");
}

#[test]
fn test_stretch_fill_uses_theme() {
    init_test_logging();

    let theme = Theme::from_style_definitions([(theme::FILL, "on blue")], true)
        .expect("valid fill style");
    let column = VStack::new()
        .align(Align::Stretch)
        .theme(theme)
        .color_system(Some(ColorSystem::Standard))
        .child("abc")
        .child("d");

    let block = column.render();
    assert_eq_logged("width", block.width(), 3);
    assert_eq_logged("stretched line", block.lines()[1].as_str(), "d\x1b[44m  \x1b[0m");
}

#[test]
fn test_override_style_layers_under_divider() {
    init_test_logging();

    let out = HStack::new()
        .divider(true)
        .style(Style::parse("on blue").expect("valid style"))
        .color_system(Some(ColorSystem::Standard))
        .child("a")
        .child("b")
        .render_to_string();

    assert_eq_logged(
        "output",
        out.as_str(),
        "\x1b[44ma\x1b[90m│\x1b[0m\x1b[44mb\x1b[0m",
    );
    assert_eq_logged("width", cell_len(&out), 3);
}

#[test]
fn test_divider_glyph_override() {
    init_test_logging();

    let column = VStack::new()
        .divider_glyph("=-")
        .child("abcde")
        .child("x");
    assert_eq_logged(
        "output",
        column.render_to_string(),
        "abcde\n=-=- \nx    ".to_string(),
    );
}

#[test]
fn test_names_from_configuration() {
    init_test_logging();

    let row = Flex::new()
        .direction(Direction::from_name("row"))
        .justify(Justify::from_name("space-evenly"))
        .align(Align::from_name("bogus"))
        .size(5)
        .children(["a", "b"]);

    let spec = row.layout_spec();
    assert_eq_logged("justify", spec.justify, Justify::SpaceEvenly);
    assert_eq_logged("align fallback", spec.align, Align::Start);
    assert_eq_logged("output", row.render_to_string(), " a b ".to_string());
}

#[test]
fn test_display_matches_render_to_string() {
    init_test_logging();

    let row = HStack::new().gap(1).child("x").child(VStack::new().child("1").child("2"));
    assert_eq_logged("display", row.to_string(), row.render_to_string());
    assert_contains_logged("nested", &row.to_string(), "x 1");
}

#[test]
fn test_layouts_render_concurrently() {
    init_test_logging();

    let row = std::sync::Arc::new(
        HStack::new()
            .size(11)
            .justify(Justify::SpaceBetween)
            .divider(true)
            .children(["left", "right"]),
    );
    let expected = row.render_to_string();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let row = std::sync::Arc::clone(&row);
            std::thread::spawn(move || row.render_to_string())
        })
        .collect();

    for handle in handles {
        let out = handle.join().expect("render thread panicked");
        assert_eq_logged("identical output", out.as_str(), expected.as_str());
    }
}
