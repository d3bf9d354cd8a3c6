use serde_json::json;

use gifview_core::{
    AnimatedImageView, Dimensions, MeasureDecision, MeasureRequest, PlaybackState, ResourceId,
    Timestamp, ViewDescriptor, ViewId,
};
use gifview_test_fixtures::{
    images, overlays, FixedOverlay, FixtureDecoder, RecordingCanvas, RedrawCounter,
    ScriptedAnimation,
};

fn descriptor(value: serde_json::Value) -> ViewDescriptor {
    ViewDescriptor::from_json(&value.to_string()).expect("descriptor")
}

fn load(d: &ViewDescriptor, overlay: &FixedOverlay) -> AnimatedImageView<ScriptedAnimation> {
    let loader = images::loader().expect("loader");
    AnimatedImageView::load(ViewId(1), d, &loader, &FixtureDecoder, overlay)
}

#[test]
fn loads_fixture_and_captures_dimensions() {
    let play = overlays::provider("play").unwrap();
    let view = load(
        &descriptor(json!({ "src": "raw/spinner", "autoPlay": false })),
        &play,
    );
    assert_eq!(view.state(), PlaybackState::AwaitingStart);
    assert_eq!(view.dimensions(), Some(Dimensions::new(120, 80)));
    assert!(view.accepts_taps());
    assert_eq!(view.overlay().map(|o| o.key.as_str()), Some("icon_play"));
}

#[test]
fn auto_play_descriptor_skips_overlay() {
    let play = overlays::provider("play").unwrap();
    let view = load(
        &descriptor(json!({ "src": "raw/banner", "autoPlay": true })),
        &play,
    );
    assert!(view.state().is_playing());
    assert!(view.overlay().is_none());
    assert!(!view.accepts_taps());
}

#[test]
fn missing_source_attribute_means_static_image() {
    let play = overlays::provider("play").unwrap();
    let view = load(&descriptor(json!({ "autoPlay": false })), &play);
    assert_eq!(view.state(), PlaybackState::NoAnimation);
    assert!(view.overlay().is_none());
}

#[test]
fn unknown_resource_degrades_to_static_image() {
    let play = overlays::provider("play").unwrap();
    let view = load(&descriptor(json!({ "src": "raw/does-not-exist" })), &play);
    assert_eq!(view.state(), PlaybackState::NoAnimation);
    assert!(!view.accepts_taps());

    let mut view = view;
    let mut canvas = RecordingCanvas::default();
    let mut redraws = RedrawCounter::default();
    view.draw(Timestamp::from_millis(1), &mut canvas, &mut redraws);
    assert_eq!(canvas.fallback_count(), 1);
    assert_eq!(redraws.requests, 0);
}

#[test]
fn corrupt_stream_degrades_to_static_image() {
    let play = overlays::provider("play").unwrap();
    let view = load(
        &descriptor(json!({ "src": "raw/corrupt", "autoPlay": true })),
        &play,
    );
    assert_eq!(view.state(), PlaybackState::NoAnimation);
    assert!(view.handle().is_none());
}

#[test]
fn missing_overlay_still_waits_for_tap() {
    let view = load(
        &descriptor(json!({ "src": "raw/spinner" })),
        &FixedOverlay(None),
    );
    assert_eq!(view.state(), PlaybackState::AwaitingStart);
    assert!(view.overlay().is_none());

    let mut view = view;
    let mut canvas = RecordingCanvas::default();
    let mut redraws = RedrawCounter::default();
    let out = view.draw(Timestamp::from_millis(0), &mut canvas, &mut redraws);
    assert_eq!(out.overlay_at, None);
    assert_eq!(out.position_ms(), Some(0));
}

#[test]
fn attributes_drive_loading() {
    let d = ViewDescriptor::from_attributes([
        ("id", "hero"),
        ("src", "raw/spinner"),
        ("autoPlay", "true"),
    ])
    .unwrap();
    assert_eq!(d.src, Some(ResourceId::new("raw/spinner")));

    let view = load(&d, &FixedOverlay(None));
    assert!(view.state().is_playing());
}

#[test]
fn measure_claims_parent_size_only_when_animated() {
    let play = overlays::provider("play").unwrap();
    let proposed = MeasureRequest {
        width: 640,
        height: 360,
    };

    let animated = load(&descriptor(json!({ "src": "raw/spinner" })), &play);
    assert_eq!(
        animated.measure(proposed),
        MeasureDecision::Exact {
            width: 640,
            height: 360
        }
    );

    let plain = load(&descriptor(json!({})), &play);
    assert_eq!(plain.measure(proposed), MeasureDecision::HostDefault);
}
