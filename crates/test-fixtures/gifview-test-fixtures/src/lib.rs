use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use gifview_core::{
    AnimationHandle, Bitmap, Dimensions, ImageDecoder, LoadError, Overlay, OverlayProvider,
    RedrawScheduler, RenderTarget, ResourceId, ResourceLoader,
};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    images: HashMap<String, String>,
    overlays: HashMap<String, OverlayEntry>,
}

#[derive(Debug, Deserialize)]
struct OverlayEntry {
    key: String,
    width: u32,
    height: u32,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Fixture "image" format understood by [`FixtureDecoder`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FixtureImage {
    pub duration: u32,
    pub width: u32,
    pub height: u32,
}

pub mod images {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.images.keys().cloned().collect()
    }

    pub fn bytes(name: &str) -> Result<Vec<u8>> {
        let rel = lookup(&MANIFEST.images, "image", name)?;
        let path = resolve_path(rel);
        fs::read(&path).with_context(|| format!("failed to read fixture at {}", path.display()))
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.images, "image", name)?;
        Ok(resolve_path(rel))
    }

    /// Resource id under which [`loader`] serves the fixture.
    pub fn resource_id(name: &str) -> ResourceId {
        ResourceId::new(format!("raw/{name}"))
    }

    /// Decoded handle for a well-formed fixture.
    pub fn handle(name: &str) -> Result<ScriptedAnimation> {
        let bytes = bytes(name)?;
        FixtureDecoder
            .decode_animation(&mut bytes.as_slice())
            .map_err(|e| anyhow!("fixture '{name}' does not decode: {e}"))
    }

    /// A loader serving every image fixture as `raw/<name>`.
    pub fn loader() -> Result<MemoryLoader> {
        let mut loader = MemoryLoader::default();
        for name in keys() {
            loader.insert(resource_id(&name), bytes(&name)?);
        }
        Ok(loader)
    }
}

pub mod overlays {
    use super::*;

    pub fn get(name: &str) -> Result<Overlay> {
        let entry = lookup(&MANIFEST.overlays, "overlay", name)?;
        Ok(Overlay::new(
            entry.key.clone(),
            Dimensions::new(entry.width, entry.height),
        ))
    }

    pub fn provider(name: &str) -> Result<FixedOverlay> {
        Ok(FixedOverlay(Some(get(name)?)))
    }
}

/// One call received by a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Bitmap { width: u32, height: u32, x: i32, y: i32 },
    Overlay { key: String, x: i32, y: i32 },
    Fallback,
}

/// Render target that records every call.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn overlays(&self) -> Vec<(i32, i32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Overlay { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn fallback_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Fallback))
            .count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderTarget for RecordingCanvas {
    fn draw_bitmap(&mut self, bitmap: Bitmap<'_>, x: i32, y: i32) {
        self.calls.push(DrawCall::Bitmap {
            width: bitmap.dimensions.width,
            height: bitmap.dimensions.height,
            x,
            y,
        });
    }

    fn draw_overlay(&mut self, overlay: &Overlay, x: i32, y: i32) {
        self.calls.push(DrawCall::Overlay {
            key: overlay.key.clone(),
            x,
            y,
        });
    }

    fn draw_fallback(&mut self) {
        self.calls.push(DrawCall::Fallback);
    }
}

/// Counts redraw requests.
#[derive(Debug, Default)]
pub struct RedrawCounter {
    pub requests: usize,
}

impl RedrawScheduler for RedrawCounter {
    fn request_redraw(&mut self) {
        self.requests += 1;
    }
}

/// Animation handle that remembers the positions it rendered.
#[derive(Debug, Clone)]
pub struct ScriptedAnimation {
    duration_ms: u32,
    dimensions: Dimensions,
    position_ms: u32,
    pixels: Vec<u8>,
    pub rendered: Vec<u32>,
}

impl ScriptedAnimation {
    pub fn new(duration_ms: u32, dimensions: Dimensions) -> Self {
        let len = dimensions.width as usize * dimensions.height as usize * 4;
        Self {
            duration_ms,
            dimensions,
            position_ms: 0,
            pixels: vec![0; len],
            rendered: Vec::new(),
        }
    }

    pub fn position_ms(&self) -> u32 {
        self.position_ms
    }

    pub fn last_rendered(&self) -> Option<u32> {
        self.rendered.last().copied()
    }
}

impl AnimationHandle for ScriptedAnimation {
    fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn set_position(&mut self, position_ms: u32) {
        self.position_ms = position_ms;
    }

    fn render_current_frame(&mut self, target: &mut dyn RenderTarget, x: i32, y: i32) {
        self.rendered.push(self.position_ms);
        target.draw_bitmap(
            Bitmap {
                dimensions: self.dimensions,
                pixels: &self.pixels,
            },
            x,
            y,
        );
    }
}

/// Decodes the JSON fixture image format into a [`ScriptedAnimation`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDecoder;

impl ImageDecoder for FixtureDecoder {
    type Handle = ScriptedAnimation;

    fn decode_animation(&self, stream: &mut dyn Read) -> Result<Self::Handle, LoadError> {
        let image: FixtureImage =
            serde_json::from_reader(stream).map_err(|e| LoadError::decode(e.to_string()))?;
        Ok(ScriptedAnimation::new(
            image.duration,
            Dimensions::new(image.width, image.height),
        ))
    }
}

/// In-memory resource store.
#[derive(Debug, Default, Clone)]
pub struct MemoryLoader {
    resources: HashMap<ResourceId, Vec<u8>>,
}

impl MemoryLoader {
    pub fn insert(&mut self, id: ResourceId, bytes: Vec<u8>) {
        self.resources.insert(id, bytes);
    }
}

impl ResourceLoader for MemoryLoader {
    fn open(&self, id: &ResourceId) -> Result<Box<dyn Read + '_>, LoadError> {
        let bytes = self
            .resources
            .get(id)
            .ok_or_else(|| LoadError::ResourceMissing { id: id.to_string() })?;
        Ok(Box::new(Cursor::new(bytes.as_slice())))
    }
}

/// Overlay provider returning a fixed overlay, or `ResourceMissing` when empty.
#[derive(Debug, Default, Clone)]
pub struct FixedOverlay(pub Option<Overlay>);

impl OverlayProvider for FixedOverlay {
    fn play_affordance(&self) -> Result<Overlay, LoadError> {
        self.0.clone().ok_or_else(|| LoadError::ResourceMissing {
            id: "icon_play".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_entries_resolve() {
        for name in images::keys() {
            assert!(images::path(&name).unwrap().exists(), "{name}");
        }
        assert!(overlays::get("play").is_ok());
        assert!(overlays::get("stop").is_err());
    }

    #[test]
    fn corrupt_fixture_fails_to_decode() {
        let bytes = images::bytes("corrupt").unwrap();
        let err = FixtureDecoder
            .decode_animation(&mut bytes.as_slice())
            .unwrap_err();
        assert_eq!(err.category(), "decode");
    }
}
