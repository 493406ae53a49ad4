use super::*;

fn chars(s: &str) -> f64 {
    s.chars().count() as f64
}

#[test]
fn wrap_is_greedy() {
    let lines = wrap_words("the quick brown fox jumps over", 10.0, 10, chars);
    assert_eq!(lines, vec!["the quick", "brown fox", "jumps over"]);
}

#[test]
fn overlong_word_gets_its_own_line() {
    let lines = wrap_words("a supercalifragilistic b", 5.0, 10, chars);
    assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
}

#[test]
fn wrap_truncates_and_collapses_whitespace() {
    let lines = wrap_words("  one   two\nthree four  ", 3.0, 2, chars);
    assert_eq!(lines, vec!["one", "two"]);
    assert!(wrap_words("   ", 10.0, 3, chars).is_empty());
}

#[test]
fn builtin_only_config_hands_out_bitmap_fonts() {
    let mut book = FontBook::new(FontConfig::builtin_only());
    let font = book.font(72.0, true);
    assert_eq!(font, Font::Bitmap { size_px: 72.0 });
    assert_eq!(book.font(72.0, true), font);
    assert_eq!(book.fonts.len(), 1);
    assert!((font.line_height() - 80.0).abs() < 1e-9);
    assert!((book.measure(font, "abcd") - 4.0 * 6.0 * 9.0).abs() < 1e-9);
}

#[test]
fn unreadable_paths_fall_back_to_bitmap() {
    let cfg = FontConfig::builtin_only().with_regular("/definitely/not/a/font.ttf");
    let mut book = FontBook::new(cfg);
    assert!(matches!(book.font(20.0, false), Font::Bitmap { .. }));
    assert!(book.shape(false, 20.0, "x", TextBrushRgba8::default()).is_err());
}

#[test]
fn bitmap_glyph_lookup() {
    assert_eq!(bitmap_glyph('A'), [0x7E, 0x11, 0x11, 0x11, 0x7E]);
    assert_eq!(bitmap_glyph(' '), [0; 5]);
    assert_eq!(bitmap_glyph('\u{20ac}'), bitmap_glyph('?'));
    assert_eq!(bitmap_glyph('\u{b7}'), [0x00, 0x00, 0x08, 0x00, 0x00]);
    assert_eq!(bitmap_glyph('~'), BITMAP_GLYPHS[94]);
}

#[test]
fn wrap_block_keeps_at_most_max_lines_of_the_block_width() {
    use crate::foundation::core::{Rect, Rgba8};
    use crate::layout::plan::TextRole;
    use crate::model::catalog::TextAlign;

    let text: Vec<String> = (0..120).map(|i| format!("word{i}")).collect();
    let block = TextBlock {
        role: TextRole::Description,
        text: text.join(" "),
        rect: Rect::new(1.0, 1.0, 6.0, 2.6),
        size_pt: 18.0,
        bold: false,
        color: Rgba8::WHITE,
        align: TextAlign::Left,
        max_lines: 5,
    };
    let mut book = FontBook::new(FontConfig::builtin_only());
    let (font, lines) = book.wrap_block(&block);
    assert_eq!(font, Font::Bitmap { size_px: 36.0 });
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("word0 "));
    assert!(lines.iter().all(|l| book.measure(font, l) <= 720.0));
    assert!(!lines.iter().any(|l| l.contains("word119")));
}
