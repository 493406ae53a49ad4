use super::*;

#[test]
fn bold_candidates_come_before_regular() {
    let cfg = FontConfig::builtin_only()
        .with_regular("/fonts/regular.ttf")
        .with_bold("/fonts/bold.ttf");
    let bold: Vec<_> = cfg.candidates(true).cloned().collect();
    assert_eq!(
        bold,
        vec![PathBuf::from("/fonts/bold.ttf"), PathBuf::from("/fonts/regular.ttf")]
    );
    let regular: Vec<_> = cfg.candidates(false).cloned().collect();
    assert_eq!(regular, vec![PathBuf::from("/fonts/regular.ttf")]);
}

#[test]
fn builtin_only_has_no_candidates() {
    assert_eq!(FontConfig::builtin_only().candidates(true).count(), 0);
}

#[test]
fn jpeg_quality_defaults_and_clamps() {
    assert_eq!(RasterOpts::default().jpeg_quality, 95);
    assert_eq!(RasterOpts::default().with_jpeg_quality(0).jpeg_quality, 1);
}

#[test]
fn document_fonts_can_be_replaced() {
    let opts = DocumentOpts::default().with_fonts(FontConfig::builtin_only());
    assert_eq!(opts.fonts, FontConfig::builtin_only());
    assert_eq!(opts.font_family, "Neue Haas Grotesk Display Pro");
}
