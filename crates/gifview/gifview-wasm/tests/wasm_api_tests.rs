#![cfg(target_arch = "wasm32")]
use js_sys::{Function, Object, Reflect};
use serde_wasm_bindgen as swb;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use gifview_wasm::{abi_version, GifView};
use serde::Serialize;
use serde_json::json;

wasm_bindgen_test_configure!(run_in_browser);

fn set(obj: &Object, key: &str, value: &JsValue) {
    Reflect::set(obj, &JsValue::from_str(key), value).unwrap();
}

fn animation(duration: u32) -> JsValue {
    let obj = Object::new();
    set(&obj, "duration", &JsValue::from(duration));
    set(&obj, "width", &JsValue::from(120));
    set(&obj, "height", &JsValue::from(80));
    set(&obj, "setPosition", &Function::new_with_args("ms", "this.position = ms;"));
    set(&obj, "render", &Function::new_no_args("this.renders = (this.renders || 0) + 1;"));
    obj.into()
}

fn host() -> Object {
    let obj = Object::new();
    set(
        &obj,
        "requestRedraw",
        &Function::new_no_args("this.redraws = (this.redraws || 0) + 1;"),
    );
    set(&obj, "drawOverlay", &Function::new_with_args("k, x, y", "this.overlay = [x, y];"));
    set(&obj, "drawFallback", &Function::new_no_args("this.fallback = true;"));
    obj
}

fn js(value: serde_json::Value) -> JsValue {
    value
        .serialize(&swb::Serializer::json_compatible())
        .unwrap()
}

fn overlay() -> JsValue {
    js(json!({ "key": "icon_play", "width": 48, "height": 48 }))
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn static_image_without_animation() {
    let mut view = GifView::new(1, JsValue::UNDEFINED, JsValue::NULL, JsValue::NULL).unwrap();
    let h = host();
    view.draw(10.0, h.clone().into()).unwrap();
    assert_eq!(Reflect::get(&h, &"fallback".into()).unwrap(), JsValue::TRUE);
    assert!(!view.accepts_taps());
}

#[wasm_bindgen_test]
fn tap_to_play_runs_one_cycle() {
    let descriptor = js(json!({ "autoPlay": false }));
    let mut view = GifView::new(9, descriptor, animation(500), overlay()).unwrap();
    let h = host();

    view.draw(0.0, h.clone().into()).unwrap();
    let at = Reflect::get(&h, &"overlay".into()).unwrap();
    assert_eq!(js_sys::Array::from(&at).length(), 2);
    assert_eq!(view.overlay_offset(), Some(vec![36, 16]));

    view.tap(9, h.clone().into()).unwrap();
    view.draw(1_000.0, h.clone().into()).unwrap();
    view.draw(1_500.0, h.clone().into()).unwrap();

    let state = view.state().unwrap();
    let name = Reflect::get(&state, &"state".into()).unwrap();
    assert_eq!(name.as_string().as_deref(), Some("finished"));
    // one from the tap, one from the anchoring draw
    let redraws = Reflect::get(&h, &"redraws".into()).unwrap();
    assert_eq!(redraws.as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn malformed_animation_object_degrades() {
    let obj = Object::new();
    set(&obj, "duration", &JsValue::from(100));
    let view = GifView::new(2, JsValue::NULL, obj.into(), JsValue::NULL).unwrap();
    let state = view.state().unwrap();
    let name = Reflect::get(&state, &"state".into()).unwrap();
    assert_eq!(name.as_string().as_deref(), Some("no_animation"));
}
