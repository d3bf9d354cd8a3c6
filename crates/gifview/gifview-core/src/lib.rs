//! gifview core (host-agnostic)
//!
//! Playback state machine and frame-time mapping for a view that shows either
//! a static image or an animated one. The host decodes images, draws bitmaps
//! and delivers draw ticks and taps; this crate decides which frame to show,
//! when a cycle completes, and whether another draw should be requested.

pub mod clock;
pub mod config;
pub mod error;
pub mod host;
pub mod ids;
pub mod layout;
pub mod mapper;
pub mod outputs;
pub mod state;
pub mod view;

// Re-exports for consumers (adapters)
pub use clock::{Clock, ManualClock, MonotonicClock, Timestamp};
pub use config::{PlaybackConfig, ResourceId, ViewDescriptor};
pub use error::{DescriptorError, LoadError};
pub use host::{
    AnimationHandle, Bitmap, Dimensions, ImageDecoder, Overlay, OverlayProvider, RedrawScheduler,
    RenderTarget, ResourceLoader,
};
pub use ids::{Tap, ViewId};
pub use layout::{overlay_offset, MeasureDecision, MeasureRequest};
pub use mapper::{effective_duration, map_frame, FrameSample, FALLBACK_DURATION_MS};
pub use outputs::{DrawOutcome, Rendered, TapOutcome, ViewEvent};
pub use state::{PlaySession, PlaybackState};
pub use view::AnimatedImageView;
