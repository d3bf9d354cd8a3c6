use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;

/// How the current play session was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaySession {
    /// Started by the auto-play policy; loops forever
    Auto,
    /// Started by a tap; stops after one full cycle
    OneShot,
}

impl PlaySession {
    #[inline]
    pub fn loops(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// Playback state of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlaybackState {
    /// Static image, or no image could be loaded
    NoAnimation,
    /// Animation loaded, first frame shown with the overlay
    AwaitingStart,
    /// Advancing frames. `origin` is `None` until the next draw anchors the cycle
    Playing {
        session: PlaySession,
        origin: Option<Timestamp>,
    },
    /// One-shot playback completed; the final frame stays on screen
    Finished { position_ms: u32 },
}

impl PlaybackState {
    /// Get the name of this playback state
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoAnimation => "no_animation",
            Self::AwaitingStart => "awaiting_start",
            Self::Playing { .. } => "playing",
            Self::Finished { .. } => "finished",
        }
    }

    /// Check if frames are advancing
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }

    /// Check if a tap would start playback
    #[inline]
    pub fn can_start(&self) -> bool {
        matches!(self, Self::AwaitingStart)
    }

    /// Cycle origin; only ever set while playing
    #[inline]
    pub fn origin(&self) -> Option<Timestamp> {
        match self {
            Self::Playing { origin, .. } => *origin,
            _ => None,
        }
    }
}
