//! Collaborator contracts implemented by the host.
//!
//! The core never decodes, opens files or draws pixels. Hosts plug those
//! capabilities in through the traits below; adapters (wasm, native toolkits)
//! wrap their own objects to satisfy them.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::config::ResourceId;
use crate::error::LoadError;

/// Native pixel size of a decoded image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The "tap to play" affordance bitmap. `key` names the host-side graphic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    pub key: String,
    pub dimensions: Dimensions,
}

impl Overlay {
    pub fn new(key: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            key: key.into(),
            dimensions,
        }
    }
}

/// Borrowed RGBA8 pixels, row-major, `width * height * 4` bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitmap<'a> {
    pub dimensions: Dimensions,
    pub pixels: &'a [u8],
}

/// Surface the view draws into for one draw tick.
pub trait RenderTarget {
    /// Blit a decoded frame with its top-left corner at `(x, y)`.
    ///
    /// Only handles that hand their pixels to the target call this; targets
    /// whose animations draw themselves can keep the no-op.
    fn draw_bitmap(&mut self, bitmap: Bitmap<'_>, x: i32, y: i32) {
        let _ = (bitmap, x, y);
    }
    /// Blit the overlay with its top-left corner at `(x, y)`.
    fn draw_overlay(&mut self, overlay: &Overlay, x: i32, y: i32);
    /// Draw whatever the host shows for a plain (non-animated) image.
    fn draw_fallback(&mut self);
}

/// A decoded, time-indexed animated image. Owned by the host decoder; the
/// view only drives its position and asks it to draw.
pub trait AnimationHandle {
    /// Total cycle length in milliseconds. May be zero for malformed sources.
    fn duration_ms(&self) -> u32;
    fn dimensions(&self) -> Dimensions;
    fn set_position(&mut self, position_ms: u32);
    fn render_current_frame(&mut self, target: &mut dyn RenderTarget, x: i32, y: i32);
}

/// Asks the host for another draw tick. The host delivers it on its own cadence.
pub trait RedrawScheduler {
    fn request_redraw(&mut self);
}

/// Opens the byte stream behind a resource identifier.
pub trait ResourceLoader {
    fn open(&self, id: &ResourceId) -> Result<Box<dyn Read + '_>, LoadError>;
}

/// Turns a byte stream into an animation handle.
pub trait ImageDecoder {
    type Handle: AnimationHandle;

    fn decode_animation(&self, stream: &mut dyn Read) -> Result<Self::Handle, LoadError>;
}

/// Supplies the overlay affordance graphic.
pub trait OverlayProvider {
    fn play_affordance(&self) -> Result<Overlay, LoadError>;
}

impl<F> RedrawScheduler for F
where
    F: FnMut(),
{
    fn request_redraw(&mut self) {
        self()
    }
}

impl<T: AnimationHandle + ?Sized> AnimationHandle for Box<T> {
    fn duration_ms(&self) -> u32 {
        (**self).duration_ms()
    }

    fn dimensions(&self) -> Dimensions {
        (**self).dimensions()
    }

    fn set_position(&mut self, position_ms: u32) {
        (**self).set_position(position_ms)
    }

    fn render_current_frame(&mut self, target: &mut dyn RenderTarget, x: i32, y: i32) {
        (**self).render_current_frame(target, x, y)
    }
}
