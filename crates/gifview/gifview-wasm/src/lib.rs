use js_sys::{Function, Reflect};
use serde::Deserialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use gifview_core::{
    AnimatedImageView, AnimationHandle, Dimensions, LoadError, MeasureRequest, Overlay,
    RedrawScheduler, RenderTarget, Tap, Timestamp, ViewDescriptor, ViewId,
};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn get(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn get_function(obj: &JsValue, key: &str) -> Option<Function> {
    get(obj, key).dyn_into::<Function>().ok()
}

fn get_u32(obj: &JsValue, key: &str) -> Option<u32> {
    get(obj, key)
        .as_f64()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.min(f64::from(u32::MAX)) as u32)
}

fn timestamp_from_js(now_ms: f64) -> Timestamp {
    if now_ms.is_finite() && now_ms > 0.0 {
        Timestamp::from_millis(now_ms as u64)
    } else {
        Timestamp::from_millis(0)
    }
}

/// Animation decoded on the JS side:
/// `{ duration, width, height, setPosition(ms), render(x, y) }`.
struct JsAnimation {
    this: JsValue,
    duration_ms: u32,
    dimensions: Dimensions,
    set_position: Function,
    render: Function,
}

impl JsAnimation {
    fn from_js(obj: JsValue) -> Result<Self, LoadError> {
        let set_position = get_function(&obj, "setPosition")
            .ok_or_else(|| LoadError::decode("animation.setPosition is not a function"))?;
        let render = get_function(&obj, "render")
            .ok_or_else(|| LoadError::decode("animation.render is not a function"))?;
        let width = get_u32(&obj, "width")
            .ok_or_else(|| LoadError::decode("animation.width must be a number"))?;
        let height = get_u32(&obj, "height")
            .ok_or_else(|| LoadError::decode("animation.height must be a number"))?;
        Ok(Self {
            // missing duration is treated like a zero-length source
            duration_ms: get_u32(&obj, "duration").unwrap_or(0),
            dimensions: Dimensions::new(width, height),
            set_position,
            render,
            this: obj,
        })
    }
}

impl AnimationHandle for JsAnimation {
    fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn set_position(&mut self, position_ms: u32) {
        if let Err(e) = self
            .set_position
            .call1(&self.this, &JsValue::from(position_ms))
        {
            log::warn!("animation.setPosition threw: {e:?}");
        }
    }

    fn render_current_frame(&mut self, _target: &mut dyn RenderTarget, x: i32, y: i32) {
        // The JS animation owns its pixels and draws itself.
        if let Err(e) = self
            .render
            .call2(&self.this, &JsValue::from(x), &JsValue::from(y))
        {
            log::warn!("animation.render threw: {e:?}");
        }
    }
}

/// Overlay affordance as JS passes it: `{ key, width, height }`.
#[derive(Debug, Deserialize)]
struct JsOverlay {
    key: String,
    width: u32,
    height: u32,
}

impl From<JsOverlay> for Overlay {
    fn from(js: JsOverlay) -> Self {
        Overlay::new(js.key, Dimensions::new(js.width, js.height))
    }
}

/// Render target + scheduler passed to `draw`/`tap`:
/// `{ drawOverlay(key, x, y), drawFallback(), requestRedraw?() }`.
struct JsHost {
    this: JsValue,
}

impl JsHost {
    fn call(&self, name: &str, args: &[JsValue]) {
        let Some(f) = get_function(&self.this, name) else {
            return;
        };
        let arr: js_sys::Array = args.iter().collect();
        if let Err(e) = f.apply(&self.this, &arr) {
            log::warn!("host.{name} threw: {e:?}");
        }
    }
}

impl RenderTarget for JsHost {
    fn draw_overlay(&mut self, overlay: &Overlay, x: i32, y: i32) {
        self.call(
            "drawOverlay",
            &[
                JsValue::from_str(&overlay.key),
                JsValue::from(x),
                JsValue::from(y),
            ],
        );
    }

    fn draw_fallback(&mut self) {
        self.call("drawFallback", &[]);
    }
}

impl RedrawScheduler for JsHost {
    fn request_redraw(&mut self) {
        self.call("requestRedraw", &[]);
    }
}

#[wasm_bindgen]
pub struct GifView {
    core: AnimatedImageView<Box<dyn AnimationHandle>>,
}

#[wasm_bindgen]
impl GifView {
    /// Create a view.
    ///
    /// - `descriptor`: `{ autoPlay?: boolean }` (a `src` key is accepted and ignored:
    ///   the JS side has already decoded the image).
    /// - `animation`: decoded animation object, or null/undefined for a static image.
    /// - `overlay`: `{ key, width, height }`, or null/undefined.
    #[wasm_bindgen(constructor)]
    pub fn new(
        view_id: u32,
        descriptor: JsValue,
        animation: JsValue,
        overlay: JsValue,
    ) -> Result<GifView, JsError> {
        console_error_panic_hook::set_once();

        let descriptor: ViewDescriptor = if jsvalue_is_undefined_or_null(&descriptor) {
            ViewDescriptor::default()
        } else {
            swb::from_value(descriptor)
                .map_err(|e| JsError::new(&format!("descriptor error: {e}")))?
        };

        let overlay: Option<Overlay> = if jsvalue_is_undefined_or_null(&overlay) {
            None
        } else {
            let overlay: JsOverlay = swb::from_value(overlay)
                .map_err(|e| JsError::new(&format!("overlay error: {e}")))?;
            Some(overlay.into())
        };

        let handle: Option<Box<dyn AnimationHandle>> = if jsvalue_is_undefined_or_null(&animation)
        {
            None
        } else {
            match JsAnimation::from_js(animation) {
                Ok(a) => Some(Box::new(a) as Box<dyn AnimationHandle>),
                Err(err) => {
                    log::warn!("view {view_id}: animation unusable, showing static image: {err}");
                    None
                }
            }
        };

        Ok(GifView {
            core: AnimatedImageView::new(ViewId(view_id), descriptor.playback, handle, overlay),
        })
    }

    /// Run one draw tick at `now_ms` (monotonic, e.g. `performance.now()`).
    /// Returns the DrawOutcome as a JS object.
    #[wasm_bindgen]
    pub fn draw(&mut self, now_ms: f64, host: JsValue) -> Result<JsValue, JsError> {
        let mut target = JsHost { this: host.clone() };
        let mut scheduler = JsHost { this: host };
        let out = self
            .core
            .draw(timestamp_from_js(now_ms), &mut target, &mut scheduler);
        swb::to_value(&out).map_err(|e| JsError::new(&format!("outcome error: {e}")))
    }

    /// Deliver a tap aimed at `target_id`. `host.requestRedraw` is called when playback starts.
    #[wasm_bindgen]
    pub fn tap(&mut self, target_id: u32, host: JsValue) -> Result<JsValue, JsError> {
        let mut scheduler = JsHost { this: host };
        let out = self.core.on_tap(Tap::on(ViewId(target_id)), &mut scheduler);
        swb::to_value(&out).map_err(|e| JsError::new(&format!("tap outcome error: {e}")))
    }

    #[wasm_bindgen]
    pub fn measure(&self, width: u32, height: u32) -> Result<JsValue, JsError> {
        let decision = self.core.measure(MeasureRequest { width, height });
        swb::to_value(&decision).map_err(|e| JsError::new(&format!("measure error: {e}")))
    }

    #[wasm_bindgen]
    pub fn state(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.state()).map_err(|e| JsError::new(&format!("state error: {e}")))
    }

    #[wasm_bindgen(js_name = accepts_taps)]
    pub fn accepts_taps(&self) -> bool {
        self.core.accepts_taps()
    }

    /// `[x, y]` where the overlay is drawn, or undefined.
    #[wasm_bindgen(js_name = overlay_offset)]
    pub fn overlay_offset(&self) -> Option<Vec<i32>> {
        self.core.overlay_offset().map(|(x, y)| vec![x, y])
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
