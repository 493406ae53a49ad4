use super::*;

#[test]
fn category_style_wins_over_legacy() {
    let c = resolve_colors_for("events", "event_speaker");
    assert_eq!(c.name, "Speaker Spotlight");
    assert_eq!(c.style.map(|s| s.id), Some("event_speaker"));
    assert_eq!(c.background, Rgba8::from_hex("#0b1f3a").unwrap());
}

#[test]
fn legacy_palette_is_used_by_template_id() {
    let c = resolve_colors_for("events", "template3");
    assert_eq!(c.name, "Light Theme");
    assert!(c.style.is_none());
    assert_eq!(c.text, Rgba8::rgb(0x18, 0x1a, 0x1c));
}

#[test]
fn unknown_everything_falls_back_to_cbs_blue() {
    let c = resolve_colors_for("nope", "nope");
    assert_eq!(c.name, "CBS Blue");
    assert_eq!(c.background, Rgba8::rgb(0x00, 0x3d, 0xa5));
    assert_eq!(c.accent, Rgba8::rgb(0x00, 0x9b, 0xdb));
    assert!(c.style.is_none());
}

#[test]
fn unknown_category_still_finds_default_category_styles() {
    let c = resolve_colors_for("nope", "research_feature");
    assert_eq!(c.style.map(|s| s.id), Some("research_feature"));
}

#[test]
fn slide_colors_follow_the_chain() {
    let slide = SlideData::builder("Headline", "Body")
        .template_id("template2")
        .build();
    assert_eq!(resolve_colors(&slide).name, "Dark Theme");
}

#[test]
fn legacy_table_has_three_entries() {
    assert_eq!(legacy_templates().len(), 3);
    assert_eq!(legacy_template("template1"), Some(&TemplateConfig::DEFAULT));
    assert!(legacy_template("template4").is_none());
}
