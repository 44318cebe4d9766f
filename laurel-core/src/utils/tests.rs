use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::prelude::{render_excerpt, Error, Position, SrcSpan};

#[test]
fn test_single_line_excerpt() {
    let excerpt = render_excerpt("a = 1 / 0", SrcSpan::from(8, 9));

    assert_eq!(excerpt, "1 | a = 1 / 0\n            ^");
}

#[test]
fn test_multi_line_excerpt() {
    let src = "if true then\n  say(1)\n";
    let excerpt = render_excerpt(src, SrcSpan::from(3, 19));

    assert_eq!(excerpt, [
        "1 | if true then",
        "       ^^^^^^^^^",
        "2 |   say(1)",
        "    ^^^^^^",
    ].join("\n"));
}

#[test]
fn test_zero_width_and_empty_lines() {
    let excerpt = render_excerpt("if true then", SrcSpan::from(12, 12));
    assert_eq!(excerpt, "1 | if true then\n                ^");

    let excerpt = render_excerpt("a\n\nb", SrcSpan::from(0, 4));
    assert_eq!(excerpt, "1 | a\n    ^\n2 | \n3 | b\n    ^");
}

#[test]
fn test_gutter_is_aligned() {
    let src = (1..=10).map(|idx| format!("x{idx}")).collect::<Vec<String>>().join("\n");
    let start = src.find("x9").unwrap_or_default() as u32;

    let excerpt = render_excerpt(&src, SrcSpan::from(start, src.len() as u32));

    assert_eq!(excerpt, " 9 | x9\n     ^^\n10 | x10\n     ^^^");
}

#[test]
fn test_out_of_range_spans_are_clamped() {
    assert_eq!(render_excerpt("abc", SrcSpan::from(50, 70)), "1 | abc\n       ^");
    assert_eq!(render_excerpt("abc", SrcSpan::from(2, 1)), "1 | abc\n      ^");
    assert_eq!(render_excerpt("", SrcSpan::from(0, 0)), "1 | \n    ^");
}

#[test]
fn test_position_counts_characters() {
    let src = "é = 1\nab";

    assert_eq!(Position::resolve(src, 3), Position { offset: 3, line: 0, column: 2 });
    assert_eq!(Position::resolve(src, 8), Position { offset: 8, line: 1, column: 1 });
    assert_eq!(Position::resolve(src, 1), Position { offset: 0, line: 0, column: 0 });
}

#[test]
fn test_io_error_diagnostic() {
    let err = Error::StdIo { err: std::io::ErrorKind::NotFound };

    assert_eq!(err.pretty_string(), "Standard IO error: entity not found");
}

proptest! {
    #[test]
    fn test_excerpt_never_panics(src in "(?s).{0,60}", start in 0u32..80, end in 0u32..80) {
        let excerpt = render_excerpt(&src, SrcSpan::from(start, end));

        prop_assert!(excerpt.contains(" | "));
        prop_assert!(excerpt.contains('^'));
    }
}
