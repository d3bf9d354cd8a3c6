//! Measure override and overlay placement.

use serde::{Deserialize, Serialize};

use crate::host::Dimensions;

/// Size proposed by the parent container for both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureRequest {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureDecision {
    /// Claim exactly this size.
    Exact { width: u32, height: u32 },
    /// Let the host measure as it would a plain image.
    HostDefault,
}

/// An animated view takes exactly what the parent proposes; decoded
/// dimensions never take part in sizing.
pub fn measure(has_animation: bool, proposed: MeasureRequest) -> MeasureDecision {
    if has_animation {
        MeasureDecision::Exact {
            width: proposed.width,
            height: proposed.height,
        }
    } else {
        MeasureDecision::HostDefault
    }
}

/// Top-left corner that centers the overlay inside the animation's native
/// bounds. Each half is floored on its own, so odd sizes round toward the
/// top-left; the result goes negative when the overlay is larger.
pub fn overlay_offset(animation: Dimensions, overlay: Dimensions) -> (i32, i32) {
    let half = |v: u32| i64::from(v / 2);
    let x = half(animation.width) - half(overlay.width);
    let y = half(animation.height) - half(overlay.height);
    (clamp_i32(x), clamp_i32(y))
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
