//! AnimatedImageView: the playback state machine.
//!
//! The host drives it with two inputs only:
//! - `draw(now, target, scheduler)` once per draw tick it delivers,
//! - `on_tap(tap, scheduler)` for every tap gesture.
//!
//! Each draw either renders the host fallback (no animation), the first frame
//! plus overlay (waiting for a tap), the frame mapped from the clock (playing)
//! or the held final frame (one-shot finished). While playing, the view asks
//! for the next draw itself through the `RedrawScheduler`.

use crate::clock::{Clock, Timestamp};
use crate::config::{PlaybackConfig, ViewDescriptor};
use crate::error::LoadError;
use crate::host::{
    AnimationHandle, Dimensions, ImageDecoder, Overlay, OverlayProvider, RedrawScheduler,
    RenderTarget, ResourceLoader,
};
use crate::ids::{Tap, ViewId};
use crate::layout::{self, MeasureDecision, MeasureRequest};
use crate::mapper::map_frame;
use crate::outputs::{DrawOutcome, Rendered, TapOutcome, ViewEvent};
use crate::state::{PlaySession, PlaybackState};

/// A loaded animation and the dimensions captured when it was decoded.
#[derive(Debug)]
struct LoadedAnimation<H> {
    handle: H,
    dimensions: Dimensions,
}

#[derive(Debug)]
pub struct AnimatedImageView<H> {
    id: ViewId,
    config: PlaybackConfig,
    animation: Option<LoadedAnimation<H>>,
    /// Only kept for tap-to-play views.
    overlay: Option<Overlay>,
    state: PlaybackState,
    /// Set by the first anchoring draw; later re-anchors are new cycles, not a new start.
    session_started: bool,
}

impl<H: AnimationHandle> AnimatedImageView<H> {
    /// Build a view around an already decoded animation (or none).
    ///
    /// Without a handle the view is a plain image for its whole life. The
    /// overlay is dropped unless the view waits for a tap.
    pub fn new(
        id: ViewId,
        config: PlaybackConfig,
        handle: Option<H>,
        overlay: Option<Overlay>,
    ) -> Self {
        let animation = handle.map(|handle| LoadedAnimation {
            dimensions: handle.dimensions(),
            handle,
        });
        let state = match (&animation, config.auto_play) {
            (None, _) => PlaybackState::NoAnimation,
            (Some(_), true) => PlaybackState::Playing {
                session: PlaySession::Auto,
                origin: None,
            },
            (Some(_), false) => PlaybackState::AwaitingStart,
        };
        let overlay = if matches!(state, PlaybackState::AwaitingStart) {
            if overlay.is_none() {
                log::warn!("view {id:?}: tap-to-play view has no overlay affordance");
            }
            overlay
        } else {
            None
        };
        log::debug!("view {id:?}: constructed in state {}", state.name());
        Self {
            id,
            config,
            animation,
            overlay,
            state,
            session_started: false,
        }
    }

    /// Resolve `descriptor.src` through the host collaborators and build the view.
    ///
    /// Missing resources and decode failures are absorbed: the view comes up as
    /// a plain image. The overlay provider is only consulted for tap-to-play views.
    pub fn load<L, D, P>(
        id: ViewId,
        descriptor: &ViewDescriptor,
        loader: &L,
        decoder: &D,
        overlays: &P,
    ) -> Self
    where
        L: ResourceLoader + ?Sized,
        D: ImageDecoder<Handle = H> + ?Sized,
        P: OverlayProvider + ?Sized,
    {
        let handle = match Self::load_animation(descriptor, loader, decoder) {
            Ok(handle) => handle,
            Err(err) => {
                log::warn!(
                    "view {id:?}: animation unavailable ({}), showing static image: {err}",
                    err.category()
                );
                None
            }
        };

        let overlay = if handle.is_some() && !descriptor.playback.auto_play {
            match overlays.play_affordance() {
                Ok(overlay) => Some(overlay),
                Err(err) => {
                    log::warn!("view {id:?}: overlay unavailable: {err}");
                    None
                }
            }
        } else {
            None
        };

        Self::new(id, descriptor.playback, handle, overlay)
    }

    fn load_animation<L, D>(
        descriptor: &ViewDescriptor,
        loader: &L,
        decoder: &D,
    ) -> Result<Option<H>, LoadError>
    where
        L: ResourceLoader + ?Sized,
        D: ImageDecoder<Handle = H> + ?Sized,
    {
        let Some(src) = descriptor.src.as_ref() else {
            return Ok(None);
        };
        let mut stream = loader.open(src)?;
        let handle = decoder.decode_animation(&mut stream)?;
        Ok(Some(handle))
    }

    #[inline]
    pub fn id(&self) -> ViewId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> PlaybackConfig {
        self.config
    }

    #[inline]
    pub fn has_animation(&self) -> bool {
        self.animation.is_some()
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        self.animation.as_ref().map(|a| a.dimensions)
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn handle(&self) -> Option<&H> {
        self.animation.as_ref().map(|a| &a.handle)
    }

    /// Whether a tap listener is attached: an animation is loaded and it waits for the user.
    #[inline]
    pub fn accepts_taps(&self) -> bool {
        self.animation.is_some() && !self.config.auto_play
    }

    /// Top-left of the overlay when it is drawn, centered in the animation bounds.
    pub fn overlay_offset(&self) -> Option<(i32, i32)> {
        let animation = self.animation.as_ref()?;
        let overlay = self.overlay.as_ref()?;
        Some(layout::overlay_offset(
            animation.dimensions,
            overlay.dimensions,
        ))
    }

    /// Animated views claim the parent's proposal on both axes.
    pub fn measure(&self, proposed: MeasureRequest) -> MeasureDecision {
        layout::measure(self.has_animation(), proposed)
    }

    /// Handle a tap. Only a tap on this view while awaiting start does anything.
    pub fn on_tap(&mut self, tap: Tap, scheduler: &mut dyn RedrawScheduler) -> TapOutcome {
        if !tap.targets(self.id) {
            log::debug!("view {:?}: ignoring tap for {:?}", self.id, tap.target);
            return TapOutcome::IgnoredForeignTarget;
        }
        if !self.accepts_taps() || !self.state.can_start() {
            log::debug!("view {:?}: tap ignored in {}", self.id, self.state.name());
            return TapOutcome::IgnoredState { state: self.state };
        }
        // origin anchors on the next draw, not now
        self.state = PlaybackState::Playing {
            session: PlaySession::OneShot,
            origin: None,
        };
        log::info!("view {:?}: tap started one-shot playback", self.id);
        scheduler.request_redraw();
        TapOutcome::Started
    }

    /// Draw using a clock reading taken now.
    pub fn draw_with_clock(
        &mut self,
        clock: &dyn Clock,
        target: &mut dyn RenderTarget,
        scheduler: &mut dyn RedrawScheduler,
    ) -> DrawOutcome {
        self.draw(clock.now(), target, scheduler)
    }

    /// Render one draw tick at time `now`.
    pub fn draw(
        &mut self,
        now: Timestamp,
        target: &mut dyn RenderTarget,
        scheduler: &mut dyn RedrawScheduler,
    ) -> DrawOutcome {
        let Some(animation) = self.animation.as_mut() else {
            target.draw_fallback();
            return DrawOutcome::new(self.state, Rendered::Fallback);
        };

        match self.state {
            PlaybackState::NoAnimation => {
                target.draw_fallback();
                DrawOutcome::new(self.state, Rendered::Fallback)
            }
            PlaybackState::AwaitingStart => {
                animation.render_at(0, target);
                let mut out = DrawOutcome::new(self.state, Rendered::Frame { position_ms: 0 });
                if let Some(overlay) = self.overlay.as_ref() {
                    let (x, y) = layout::overlay_offset(animation.dimensions, overlay.dimensions);
                    log::debug!("view {:?}: overlay at ({x}, {y})", self.id);
                    target.draw_overlay(overlay, x, y);
                    out.overlay_at = Some((x, y));
                }
                out
            }
            PlaybackState::Finished { position_ms } => {
                animation.render_at(position_ms, target);
                DrawOutcome::new(self.state, Rendered::Frame { position_ms })
            }
            PlaybackState::Playing { session, origin } => {
                let mut out = DrawOutcome::new(self.state, Rendered::Fallback);
                let origin = match origin {
                    Some(origin) => origin,
                    None => {
                        if !self.session_started {
                            self.session_started = true;
                            log::info!(
                                "view {:?}: {session:?} playback started at {} ms",
                                self.id,
                                now.as_millis()
                            );
                            out.push_event(ViewEvent::PlaybackStarted { session, at: now });
                        }
                        now
                    }
                };

                let sample = map_frame(origin, now, animation.handle.duration_ms());
                animation.render_at(sample.position_ms, target);

                let next = if sample.completed {
                    out.push_event(ViewEvent::CycleCompleted {
                        session,
                        elapsed_ms: sample.elapsed_ms,
                    });
                    if session.loops() {
                        log::info!(
                            "view {:?}: cycle completed after {} ms, looping",
                            self.id,
                            sample.elapsed_ms
                        );
                        PlaybackState::Playing {
                            session,
                            origin: None,
                        }
                    } else {
                        out.push_event(ViewEvent::PlaybackFinished {
                            position_ms: sample.position_ms,
                        });
                        log::info!(
                            "view {:?}: one-shot playback finished at {} ms",
                            self.id,
                            sample.position_ms
                        );
                        PlaybackState::Finished {
                            position_ms: sample.position_ms,
                        }
                    }
                } else {
                    PlaybackState::Playing {
                        session,
                        origin: Some(origin),
                    }
                };
                self.state = next;

                out.state = next;
                out.rendered = Rendered::Frame {
                    position_ms: sample.position_ms,
                };
                if next.is_playing() {
                    scheduler.request_redraw();
                    out.redraw_requested = true;
                }
                log::debug!(
                    "view {:?}: drew {} ms (elapsed {} ms), state {}",
                    self.id,
                    sample.position_ms,
                    sample.elapsed_ms,
                    next.name()
                );
                out
            }
        }
    }
}

impl<H: AnimationHandle> LoadedAnimation<H> {
    fn render_at(&mut self, position_ms: u32, target: &mut dyn RenderTarget) {
        self.handle.set_position(position_ms);
        self.handle.render_current_frame(target, 0, 0);
    }
}
