//! View identity and gesture payloads.

use serde::{Deserialize, Serialize};

/// Identity of a view inside the host's widget tree.
/// Taps are matched against it so gestures bubbling from other widgets are ignored.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ViewId(pub u32);

/// A tap delivered by the host, tagged with the widget it targeted.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tap {
    pub target: ViewId,
}

impl Tap {
    #[inline]
    pub fn on(target: ViewId) -> Self {
        Self { target }
    }

    #[inline]
    pub fn targets(&self, view: ViewId) -> bool {
        self.target == view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_matches_only_its_target() {
        let tap = Tap::on(ViewId(7));
        assert!(tap.targets(ViewId(7)));
        assert!(!tap.targets(ViewId(8)));
    }
}
