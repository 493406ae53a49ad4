use super::*;

#[test]
fn builder_trims_and_drops_blank_optionals() {
    let s = SlideData::builder("  Big News  ", "\tBody text\n")
        .caption("   ")
        .author_name(" Jane Doe ")
        .event_date("")
        .event_location(" Uris Hall ")
        .build();
    assert_eq!(s.headline(), "Big News");
    assert_eq!(s.description(), "Body text");
    assert_eq!(s.caption(), None);
    assert_eq!(s.author_name(), Some("Jane Doe"));
    assert_eq!(s.event().date, None);
    assert_eq!(s.event().location.as_deref(), Some("Uris Hall"));
}

#[test]
fn defaults_are_template1_and_research_spotlight() {
    let s = SlideData::builder("H", "D").build();
    assert_eq!(s.template_id(), "template1");
    assert_eq!(s.category(), "research_spotlight");
    assert!(s.style().is_none());
    assert_eq!(s.colors().name, "CBS Blue");
    assert_eq!(s.layout(), LayoutKind::SplitTextPrimary);
}

#[test]
fn empty_image_bytes_are_treated_as_missing() {
    let s = SlideData::builder("H", "D").image(Vec::new()).build();
    assert!(s.image().is_none());
    let s = s.with_image(vec![1u8, 2, 3]);
    assert_eq!(s.image(), Some(&[1u8, 2, 3][..]));
}

#[test]
fn event_lines_keep_display_order() {
    let s = SlideData::builder("H", "D")
        .event_location("Room 1")
        .event_date("Today")
        .build();
    let lines = s.event().lines();
    assert_eq!(
        lines,
        vec![(EventField::Date, "Today"), (EventField::Location, "Room 1")]
    );
}

#[test]
fn json_input_accepts_flat_event_fields_and_aliases() {
    let s: SlideData = serde_json::from_str(
        r#"{
            "headline": " Talk ",
            "description": "A talk",
            "slide_category": "events",
            "template_id": "event_speaker",
            "event_time": "6 PM"
        }"#,
    )
    .unwrap();
    assert_eq!(s.headline(), "Talk");
    assert_eq!(s.category(), "events");
    assert_eq!(s.event().time.as_deref(), Some("6 PM"));
    assert_eq!(s.layout(), LayoutKind::CircularSpeaker);
}

#[test]
fn serialization_skips_image_bytes() {
    let s = SlideData::builder("H", "D").image(vec![9u8; 4]).build();
    let json = serde_json::to_value(&s).unwrap();
    assert!(json.get("image").is_none());
    assert_eq!(json["headline"], "H");
}

#[test]
fn suggested_file_name_follows_format_extension() {
    let s = SlideData::builder("Big News: Q3!", "D").build();
    assert_eq!(s.suggested_file_name(ExportFormat::Png), "slide_Big_News_Q3.png");
    assert_eq!(s.suggested_file_name(ExportFormat::Pptx), "slide_Big_News_Q3.pptx");
}
