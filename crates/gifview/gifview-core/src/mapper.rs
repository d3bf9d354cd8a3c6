//! Frame mapper: elapsed wall-clock time → position inside a cyclic animation.
//!
//! Pure functions, no state. The caller owns the cycle origin and is expected
//! to clear it (not move it to `now`) when a sample reports `completed`, so the
//! following draw anchors a fresh cycle at position 0.

use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;

/// Cycle length substituted for animations that report a zero duration.
pub const FALLBACK_DURATION_MS: u32 = 1000;

/// Result of mapping one draw onto the animation timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSample {
    /// Position within the cycle, always in `[0, effective_duration)`.
    pub position_ms: u32,
    /// Raw time since the cycle origin.
    pub elapsed_ms: u64,
    /// A full cycle has elapsed since the origin.
    pub completed: bool,
}

/// Duration used for mapping; zero-length animations fall back to one second.
#[inline]
pub fn effective_duration(duration_ms: u32) -> u32 {
    if duration_ms == 0 {
        FALLBACK_DURATION_MS
    } else {
        duration_ms
    }
}

/// Map `now` onto the animation timeline of a cycle that started at `origin`.
pub fn map_frame(origin: Timestamp, now: Timestamp, duration_ms: u32) -> FrameSample {
    let cycle = u64::from(effective_duration(duration_ms));
    let elapsed_ms = now.saturating_since(origin);
    FrameSample {
        // remainder < cycle <= u32::MAX
        position_ms: (elapsed_ms % cycle) as u32,
        elapsed_ms,
        completed: elapsed_ms >= cycle,
    }
}
