//! Output contracts returned to the host.
//!
//! Rendering itself goes through the host's `RenderTarget`; these values
//! report what was drawn and which transitions happened, so adapters can
//! forward them (e.g. to JavaScript) and tests can assert on them.

use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;
use crate::state::{PlaySession, PlaybackState};

/// What the draw tick put on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rendered {
    /// Host fallback path (no animation).
    Fallback,
    /// Animation frame at this position.
    Frame { position_ms: u32 },
}

/// Discrete signals emitted while drawing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ViewEvent {
    /// First draw of a play session; position 0 was drawn at `at`.
    /// Auto-play re-anchoring after each cycle does not repeat it.
    PlaybackStarted {
        session: PlaySession,
        at: Timestamp,
    },
    CycleCompleted {
        session: PlaySession,
        elapsed_ms: u64,
    },
    PlaybackFinished {
        position_ms: u32,
    },
}

/// Outcome of one draw tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOutcome {
    /// State after the tick.
    pub state: PlaybackState,
    pub rendered: Rendered,
    /// Where the overlay was drawn, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_at: Option<(i32, i32)>,
    pub redraw_requested: bool,
    #[serde(default)]
    pub events: Vec<ViewEvent>,
}

impl DrawOutcome {
    pub(crate) fn new(state: PlaybackState, rendered: Rendered) -> Self {
        Self {
            state,
            rendered,
            overlay_at: None,
            redraw_requested: false,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn position_ms(&self) -> Option<u32> {
        match self.rendered {
            Rendered::Frame { position_ms } => Some(position_ms),
            Rendered::Fallback => None,
        }
    }

    #[inline]
    pub fn push_event(&mut self, event: ViewEvent) {
        self.events.push(event);
    }
}

/// Outcome of a tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TapOutcome {
    /// Playback started; a redraw was requested.
    Started,
    /// The tap targeted another widget.
    IgnoredForeignTarget,
    /// The view was not waiting for a tap.
    IgnoredState { state: PlaybackState },
}

impl TapOutcome {
    #[inline]
    pub fn started(&self) -> bool {
        matches!(self, Self::Started)
    }
}
