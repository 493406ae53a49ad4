use super::*;
use crate::foundation::core::{CANVAS_HEIGHT_IN, CANVAS_WIDTH_IN};

fn full_slide() -> SlideData {
    SlideData::builder("A headline about research", "A description of the work.")
        .caption("Research Spotlight")
        .author_name("Jane Doe")
        .publication_link("https://example.com/article")
        .image(vec![0u8; 8])
        .event_date("March 3")
        .event_time("6 PM")
        .event_location("Geffen Hall")
        .build()
}

fn index_of(plan: &SlidePlan, pred: impl Fn(&DrawOp) -> bool) -> Option<usize> {
    plan.ops.iter().position(pred)
}

fn role_index(plan: &SlidePlan, role: TextRole) -> Option<usize> {
    index_of(plan, |op| matches!(op, DrawOp::Text(t) if t.role == role))
}

#[test]
fn every_layout_follows_the_draw_order() {
    let slide = full_slide();
    for layout in LayoutKind::ALL {
        let plan = compile_slide_as(&slide, layout);
        assert!(
            matches!(plan.ops.first(), Some(DrawOp::Gradient { .. })),
            "{layout:?} starts with the background"
        );
        let caption = role_index(&plan, TextRole::Caption).unwrap();
        let headline = role_index(&plan, TextRole::Headline).unwrap();
        let description = role_index(&plan, TextRole::Description).unwrap();
        let brand = role_index(&plan, TextRole::Brand).unwrap();
        let qr = index_of(&plan, |op| matches!(op, DrawOp::Qr { .. })).unwrap();
        assert!(caption < headline && headline < description, "{layout:?}");
        assert!(description < brand && brand < qr, "{layout:?}");
        if layout != LayoutKind::FullHero {
            let photo = index_of(&plan, |op| {
                matches!(op, DrawOp::CirclePhoto { .. } | DrawOp::RectPhoto { .. })
            })
            .unwrap();
            assert!(brand < photo && photo < qr, "{layout:?}");
        }
    }
}

#[test]
fn every_element_stays_on_canvas() {
    let slide = full_slide();
    for layout in LayoutKind::ALL {
        let plan = compile_slide_as(&slide, layout);
        for op in &plan.ops {
            let rect = match op {
                DrawOp::Gradient { rect, .. }
                | DrawOp::FillRect { rect, .. }
                | DrawOp::FrameRect { rect, .. }
                | DrawOp::CirclePhoto { rect, .. }
                | DrawOp::RectPhoto { rect }
                | DrawOp::Icon { rect, .. }
                | DrawOp::Qr { rect, .. } => *rect,
                DrawOp::Text(t) => t.rect,
                DrawOp::FullBleedPhoto { .. } => continue,
            };
            assert!(rect.x0 >= 0.0 && rect.y0 >= 0.0, "{layout:?} {op:?}");
            assert!(
                rect.x1 <= CANVAS_WIDTH_IN + 1e-9 && rect.y1 <= CANVAS_HEIGHT_IN + 1e-9,
                "{layout:?} {op:?}"
            );
        }
    }
}

#[test]
fn missing_optionals_skip_their_steps() {
    let slide = SlideData::builder("Only a headline", "And a description").build();
    for layout in LayoutKind::ALL {
        let plan = compile_slide_as(&slide, layout);
        assert!(plan.qr_rect().is_none(), "{layout:?}");
        assert!(plan.text(TextRole::Caption).is_none());
        assert!(plan.text(TextRole::Author).is_none());
        assert!(plan.text(TextRole::Event).is_none());
        assert!(!plan.uses_photo(), "{layout:?}");
        assert!(plan.text(TextRole::Headline).is_some());
        assert!(plan.text(TextRole::Brand).is_some());
    }
}

#[test]
fn placeholders_only_where_layouts_define_them() {
    let slide = SlideData::builder("H", "D").build();
    let podcast = compile_slide_as(&slide, LayoutKind::Podcast);
    assert!(podcast.ops.iter().any(|op| matches!(
        op,
        DrawOp::Icon {
            kind: IconKind::Microphone,
            ..
        }
    )));
    let wide = compile_slide_as(&slide, LayoutKind::MediaWide);
    assert!(
        wide.ops
            .iter()
            .any(|op| matches!(op, DrawOp::FillRect { color, .. } if *color == PLACEHOLDER_LIGHT))
    );
    let split = compile_slide_as(&slide, LayoutKind::SplitImagePrimary);
    assert!(!split.ops.iter().any(|op| matches!(op, DrawOp::FillRect { .. })));
}

#[test]
fn split_text_headline_moves_up_without_caption() {
    let with = compile_slide_as(&full_slide(), LayoutKind::SplitTextPrimary);
    let without = compile_slide_as(
        &SlideData::builder("H", "D").build(),
        LayoutKind::SplitTextPrimary,
    );
    let h_with = with.text(TextRole::Headline).unwrap().rect;
    let h_without = without.text(TextRole::Headline).unwrap().rect;
    assert!((h_with.y0 - 1.2).abs() < 1e-9);
    assert!((h_without.y0 - 0.8).abs() < 1e-9);
    let d_without = without.text(TextRole::Description).unwrap().rect;
    assert!((d_without.y0 - 2.6).abs() < 1e-9);
}

#[test]
fn captions_are_upper_case() {
    let plan = compile_slide_as(&full_slide(), LayoutKind::SplitTextPrimary);
    assert_eq!(plan.text(TextRole::Caption).unwrap().text, "RESEARCH SPOTLIGHT");
}

#[test]
fn event_fields_stack_or_inline_by_layout() {
    let slide = full_slide();
    let stacked = compile_slide_as(&slide, LayoutKind::SplitTextPrimary);
    let events = stacked
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::Text(t) if t.role == TextRole::Event))
        .count();
    assert_eq!(events, 3);
    let icons = stacked
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::Icon { .. }))
        .count();
    assert_eq!(icons, 3);

    let inline = compile_slide_as(&slide, LayoutKind::CircularSpeaker);
    assert_eq!(
        inline.text(TextRole::Event).unwrap().text,
        "March 3 \u{b7} 6 PM \u{b7} Geffen Hall"
    );
}

#[test]
fn plan_serializes_for_debug_dumps() {
    let plan = compile_slide(&full_slide());
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["layout"], "split_text_primary");
    assert_eq!(json["ops"][0]["op"], "gradient");
}

#[test]
fn compile_is_deterministic() {
    let slide = full_slide();
    for layout in LayoutKind::ALL {
        assert_eq!(compile_slide_as(&slide, layout), compile_slide_as(&slide, layout));
    }
}
